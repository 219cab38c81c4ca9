#[cfg(feature = "cli")]
pub mod cli;
pub mod env_file;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_env_var_name, validate_non_empty_string, validate_range, validate_url, Validate,
};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_TOKEN_ENV: &str = "CHAT_GPT_TOKEN";

const MAX_TIMEOUT_SECONDS: u64 = 3600;

/// Remote evaluator settings after merging the config file and command line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSettings {
    pub endpoint: String,
    pub model: String,
    pub token_env: String,
    pub timeout_seconds: Option<u64>,
    pub sound: bool,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            timeout_seconds: None,
            sound: true,
        }
    }
}

impl RemoteSettings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        Self {
            endpoint: config.endpoint().to_string(),
            model: config.model().to_string(),
            token_env: config.token_env().to_string(),
            timeout_seconds: config.remote.timeout_seconds,
            sound: config.sound_enabled(),
        }
    }
}

impl ConfigProvider for RemoteSettings {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn token_env(&self) -> &str {
        &self.token_env
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for RemoteSettings {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

pub(crate) fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_url("remote.endpoint", config.endpoint())?;
    validate_non_empty_string("remote.model", config.model())?;
    validate_env_var_name("remote.token_env", config.token_env())?;
    if let Some(timeout) = config.timeout() {
        validate_range(
            "remote.timeout_seconds",
            timeout.as_secs(),
            1,
            MAX_TIMEOUT_SECONDS,
        )?;
    }
    Ok(())
}
