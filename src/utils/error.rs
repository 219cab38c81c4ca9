use thiserror::Error;

/// Message shown for every transport failure; the underlying cause only goes to the log.
pub const TRANSPORT_UNAVAILABLE: &str = "The remote service is unavailable";

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Remote request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Remote service error: {message}")]
    TransportError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Transport,
    Configuration,
    System,
}

impl CalcError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::ApiError(_) | Self::TransportError { .. } => ErrorCategory::Transport,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    /// Title of the dialog that reports this error.
    pub fn dialog_title(&self) -> &'static str {
        match self {
            Self::ValidationError { message } if message == OPERATOR_MISSING => {
                "Operation not valid!"
            }
            _ => "Error!",
        }
    }

    /// Text meant for the person at the keypad, never the raw transport cause.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } => message.clone(),
            Self::ApiError(_) | Self::TransportError { .. } => TRANSPORT_UNAVAILABLE.to_string(),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            Self::IoError(e) => format!("System error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Clear the display and enter the operation again",
            ErrorCategory::Transport => {
                "Check the network connection and that the API token variable is set"
            }
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
            ErrorCategory::System => "Check file permissions and paths",
        }
    }
}

pub const DIGIT_LIMIT_EXCEEDED: &str = "Sorry, no more than 10 digits are allowed";
pub const OPERATOR_MISSING: &str = "You must insert an operator to continue";

pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_hide_their_cause() {
        let err = CalcError::transport("connection refused by 10.0.0.1");
        assert_eq!(err.category(), ErrorCategory::Transport);
        assert_eq!(err.user_friendly_message(), TRANSPORT_UNAVAILABLE);
        assert_eq!(err.dialog_title(), "Error!");
    }

    #[test]
    fn test_dialog_titles() {
        assert_eq!(
            CalcError::validation(DIGIT_LIMIT_EXCEEDED).dialog_title(),
            "Error!"
        );
        assert_eq!(
            CalcError::validation(OPERATOR_MISSING).dialog_title(),
            "Operation not valid!"
        );
        assert_eq!(
            CalcError::validation(OPERATOR_MISSING).recovery_suggestion(),
            "Clear the display and enter the operation again"
        );
    }
}
