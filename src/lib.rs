pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::{toml_config::TomlConfig, RemoteSettings};

pub use adapters::{OpenAiEvaluator, TerminalFrontEnd};
pub use crate::core::{calculator::Calculator, formatter::format_response};
pub use utils::error::{CalcError, Result};
