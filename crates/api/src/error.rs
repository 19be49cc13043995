#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid coordinates '{input}': {reason}")]
    InvalidCoordinates { input: String, reason: &'static str },
    #[error("Invalid filter '{input}': {reason}")]
    InvalidFilter { input: String, reason: &'static str },
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
