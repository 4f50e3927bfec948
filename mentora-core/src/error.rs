use thiserror::Error;

/// Errors crossing the REST backend boundary.
///
/// None of these are fatal to the application: callers surface a notice and
/// return to the previous stable state.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response: connection refused,
    /// DNS failure, client-side timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status. `message` carries the
    /// server's own `{message}`/`{error}` body field when one was present.
    #[error("backend rejected the request with status {status}")]
    Api { status: u16, message: Option<String> },

    /// The response body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    Parse(String),
}

impl ApiError {
    /// Text to surface to the user: the server's own words when it sent
    /// any, otherwise the caller's fallback.
    pub fn surface_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Api {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
