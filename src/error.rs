use std::fmt;

#[derive(Debug)]
pub enum StudioError {
    ConfigError(String),
    ValidationError(String),
    RequestError(String),
    ResponseError(String),
    SerializationError(String),
    StorageError(String),
    EncodingError(String),
    InternalError(String),
}

impl fmt::Display for StudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudioError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            StudioError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            StudioError::RequestError(msg) => write!(f, "Request error: {}", msg),
            StudioError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            StudioError::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            StudioError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            StudioError::EncodingError(msg) => write!(f, "Encoding error: {}", msg),
            StudioError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for StudioError {}

pub type Result<T> = std::result::Result<T, StudioError>;
