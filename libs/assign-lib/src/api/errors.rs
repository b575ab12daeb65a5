use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    /// Admin API is not configured
    NotConfigured(String),
    /// HTTP request could not be completed
    RequestFailed(String),
    /// Server answered with a non-success status
    Status { status: u16, body: String },
    /// Response body could not be read
    InvalidResponse(String),
}

impl ApiError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotConfigured(msg) => write!(f, "admin api is not configured: {msg}"),
            ApiError::RequestFailed(msg) => write!(f, "admin api request failed: {msg}"),
            ApiError::Status { status, body } if body.is_empty() => {
                write!(f, "admin api returned status {status}")
            }
            ApiError::Status { status, body } => {
                write!(f, "admin api returned status {status}: {body}")
            }
            ApiError::InvalidResponse(msg) => write!(f, "invalid response from admin api: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::RequestFailed(err.to_string())
    }
}
