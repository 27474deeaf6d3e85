//! Failures a connection can end in, each tied to the status it replies with.

use thiserror::Error;

use crate::http::parser::ParseError;
use crate::http::response::{Response, StatusCode};
use crate::router::RouteError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("bad request: {reason}")]
    BadRequest { reason: String },

    #[error("no route for {path}")]
    NotFound { path: String },

    #[error("timed out waiting for request data")]
    Timeout,

    #[error("internal error: {0:#}")]
    Internal(anyhow::Error),
}

impl ServerError {
    pub fn bad_request(reason: impl Into<String>) -> Self {
        ServerError::BadRequest {
            reason: reason.into(),
        }
    }

    /// Status code sent to the client for this failure.
    ///
    /// A timeout is reported as 500, not 408.
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest { .. } => StatusCode::BadRequest,
            ServerError::NotFound { .. } => StatusCode::NotFound,
            ServerError::Timeout => StatusCode::InternalServerError,
            ServerError::Internal(_) => StatusCode::InternalServerError,
        }
    }

    pub fn to_response(&self) -> Response {
        Response::error(self.status())
    }
}

impl From<ParseError> for ServerError {
    fn from(err: ParseError) -> Self {
        ServerError::bad_request(err.to_string())
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err)
    }
}

impl From<RouteError> for ServerError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::NotFound { path } => ServerError::NotFound { path },
            other => ServerError::Internal(other.into()),
        }
    }
}
