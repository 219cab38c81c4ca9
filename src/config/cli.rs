use super::toml_config::TomlConfig;
use super::RemoteSettings;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "llm-calc")]
#[command(about = "A keypad calculator that asks a language model for the result")]
pub struct CliConfig {
    /// Base URL of the OpenAI-compatible API
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Model identifier sent with every request
    #[arg(long)]
    pub model: Option<String>,

    /// Environment variable holding the API token
    #[arg(long)]
    pub token_env: Option<String>,

    /// Give up on a request after this many seconds (no limit by default)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Load environment variables from this file instead of searching for `.env`
    #[arg(long)]
    pub env_file: Option<String>,

    /// Press these keys and exit instead of reading the terminal
    #[arg(long, conflicts_with = "expression")]
    pub keys: Option<String>,

    /// Evaluate FIRST OPERATOR SECOND once and exit, e.g. `--expression 3 + 4`
    #[arg(
        long,
        num_args = 3,
        value_names = ["FIRST", "OPERATOR", "SECOND"],
        allow_hyphen_values = true
    )]
    pub expression: Option<Vec<String>>,

    /// Do not ring the bell on key presses
    #[arg(long)]
    pub no_sound: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads the config file when one was given and lays the command line flags over it.
    pub fn resolve(&self) -> Result<RemoteSettings> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        Ok(self.apply_overrides(RemoteSettings::from_toml(&file)))
    }

    pub fn apply_overrides(&self, mut settings: RemoteSettings) -> RemoteSettings {
        if let Some(endpoint) = &self.endpoint {
            settings.endpoint = endpoint.clone();
        }
        if let Some(model) = &self.model {
            settings.model = model.clone();
        }
        if let Some(token_env) = &self.token_env {
            settings.token_env = token_env.clone();
        }
        if self.timeout_seconds.is_some() {
            settings.timeout_seconds = self.timeout_seconds;
        }
        if self.no_sound {
            settings.sound = false;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_flags() {
        let cli = CliConfig::parse_from([
            "llm-calc",
            "--model",
            "gpt-4o",
            "--keys",
            "3+4=",
            "--no-sound",
        ]);
        assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
        assert_eq!(cli.keys.as_deref(), Some("3+4="));
        assert!(cli.no_sound);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_expression_and_env_file() {
        let cli = CliConfig::parse_from([
            "llm-calc",
            "--env-file",
            "/tmp/calc.env",
            "--expression",
            "12",
            "-",
            "-3",
        ]);
        assert_eq!(cli.env_file.as_deref(), Some("/tmp/calc.env"));
        assert_eq!(
            cli.expression,
            Some(vec!["12".to_string(), "-".to_string(), "-3".to_string()])
        );
        assert!(cli.keys.is_none());
    }

    #[test]
    fn test_keys_and_expression_conflict() {
        let parsed = CliConfig::try_parse_from([
            "llm-calc",
            "--keys",
            "1+1=",
            "--expression",
            "1",
            "+",
            "1",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_resolve_without_file_uses_defaults() {
        let settings = CliConfig::default().resolve().unwrap();
        assert_eq!(settings, RemoteSettings::default());
    }

    #[test]
    fn test_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
[remote]
endpoint = "https://file.example.com/v1"
model = "file-model"
timeout_seconds = 10
"#,
            )
            .unwrap();

        let cli = CliConfig {
            config: Some(temp_file.path().to_string_lossy().to_string()),
            model: Some("flag-model".to_string()),
            ..CliConfig::default()
        };
        let settings = cli.resolve().unwrap();

        assert_eq!(settings.endpoint, "https://file.example.com/v1");
        assert_eq!(settings.model, "flag-model");
        assert_eq!(settings.timeout_seconds, Some(10));
        assert!(settings.sound);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = CliConfig {
            config: Some("/definitely/not/here/llm-calc.toml".to_string()),
            ..CliConfig::default()
        };
        assert!(cli.resolve().is_err());
    }
}
