use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    /// An uploaded sheet could not be turned into protocol records.
    /// `message` says what was expected, `detail` carries the underlying
    /// parser error verbatim.
    Load { message: String, detail: String },
    Config(String),
    IoError(String),
}

impl AppError {
    pub fn load(message: impl Into<String>, detail: impl fmt::Display) -> Self {
        AppError::Load {
            message: message.into(),
            detail: detail.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Load { message, detail } => write!(f, "Load error: {} ({})", message, detail),
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

// Implement std::error::Error so the enum serializes cleanly across the API
impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
