use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed: connection refused, timeout, DNS.
    #[error("Request could not be completed: {0}")]
    Transport(String),

    /// The API answered 401.
    #[error("Authentication required")]
    Unauthorized,

    /// The API rejected the submitted data with 400.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The API answered 409, e.g. registering an existing user.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The API answered 404.
    #[error("Entity not found")]
    NotFound,

    /// The response body could not be decoded.
    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Maps a non-success HTTP status to the matching error, keeping the
    /// response body as context where the status alone says little.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            400 => ApiError::InvalidInput(body.into()),
            404 => ApiError::NotFound,
            409 => ApiError::Conflict(body.into()),
            _ => ApiError::Unexpected(format!("HTTP {status}: {}", body.into())),
        }
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::from_status(status.as_u16(), err.to_string())
        } else if err.is_timeout() || err.is_connect() || err.is_request() || err.is_redirect() {
            ApiError::Transport(err.to_string())
        } else {
            ApiError::Unexpected(err.to_string())
        }
    }
}
