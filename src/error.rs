use serde::Serialize;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Request to {endpoint} failed: {message}")]
    Transport {
        endpoint: &'static str,
        message: &'static str,
    },

    #[error("Request to {endpoint} timed out")]
    Timeout { endpoint: &'static str },

    #[error("Unexpected response shape: {0}")]
    Schema(String),

    #[error("A recommendation request is already in flight")]
    Busy,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Text safe to show to the user
    ///
    /// Transport details are never included; they are only logged where the
    /// failure happens.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Transport { message, .. } => (*message).to_string(),
            AppError::Timeout { .. } => "Request timed out".to_string(),
            AppError::Schema(_) => "Unexpected response from the recommendation service".to_string(),
            AppError::Busy => "Please wait for the current request to finish".to_string(),
            AppError::Config(msg) => msg.clone(),
        }
    }
}

/// Uniform failure value handed to the interface layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            error: err.user_message(),
        }
    }
}

impl From<AppError> for ErrorBody {
    fn from(err: AppError) -> Self {
        Self::from(&err)
    }
}

pub type AppResult<T> = Result<T, AppError>;
