use thiserror::Error;

use crate::http::response::StatusCode;

/// Failure raised anywhere between reading a request and building its
/// response.
///
/// Each variant selects one canned error response. Failures that are not
/// about the request itself (I/O, serialization, storage) are folded into
/// `BadRequest`, which is also what the client sees for them.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("400 {0}")]
    BadRequest(String),

    #[error("404 {0}")]
    NotFound(String),

    #[error("405 {0}")]
    MethodNotAllowed(String),
}

impl HttpError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        HttpError::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        HttpError::NotFound(msg.into())
    }

    pub fn method_not_allowed(msg: impl Into<String>) -> Self {
        HttpError::MethodNotAllowed(msg.into())
    }

    /// Status code of the canned response for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BadRequest,
            HttpError::NotFound(_) => StatusCode::NotFound,
            HttpError::MethodNotAllowed(_) => StatusCode::MethodNotAllowed,
        }
    }
}

impl From<std::io::Error> for HttpError {
    fn from(e: std::io::Error) -> Self {
        HttpError::BadRequest(format!("I/O error: {}", e))
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(e: serde_json::Error) -> Self {
        HttpError::BadRequest(format!("serialization error: {}", e))
    }
}

impl From<crate::store::StoreError> for HttpError {
    fn from(e: crate::store::StoreError) -> Self {
        HttpError::BadRequest(format!("store error: {}", e))
    }
}
