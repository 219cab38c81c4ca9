use clap::Parser;
use llm_calc::config::env_file::load_env_file;
use llm_calc::utils::{logger, validation::Validate};
use llm_calc::{Calculator, CliConfig, OpenAiEvaluator, TerminalFrontEnd};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

const KEYPAD_HELP: &str = "Keys: 0-9 . + - * / = c (clear). Type keys and press Enter; an empty line is '='. q quits.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting llm-calc");
    // ${VAR} in the config file may refer to .env entries
    load_env_file(config.env_file.as_deref().map(Path::new));
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let settings = match config.resolve().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("Remote settings: {:?}", settings);

    let evaluator = OpenAiEvaluator::new(&settings)?;
    let front_end = TerminalFrontEnd::new(std::io::stdout(), settings.sound);
    let mut calculator = Calculator::new(evaluator, front_end);
    calculator.start();

    if let Some(parts) = &config.expression {
        if let [first, operator, second] = parts.as_slice() {
            calculator.evaluate_text(first, operator, second).await;
        }
        return Ok(());
    }

    if let Some(keys) = &config.keys {
        calculator.type_keys(keys).await;
        return Ok(());
    }

    println!("{}", KEYPAD_HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "q" | "quit" | "exit" => break,
            "" => {
                calculator.type_keys("=").await;
            }
            keys => {
                calculator.type_keys(keys).await;
            }
        }
    }

    tracing::info!("Bye");
    Ok(())
}
