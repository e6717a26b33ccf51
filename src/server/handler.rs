//! Application handler contract.
//!
//! A handler receives the parsed request and a buffer for the response body.
//! Returning `Ok(())` sends `200 OK` with whatever was written to the buffer;
//! returning a [`HandlerError`] discards the buffer and sends the error's
//! status with its message as the body.

use bytes::BytesMut;
use thiserror::Error;

use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};

/// Structured failure reported by a handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HandlerError {
    pub status: StatusCode,
    pub message: String,
}

impl HandlerError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BadRequest, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::InternalServerError, message)
    }
}

impl From<HandlerError> for Response {
    fn from(err: HandlerError) -> Self {
        Response::new(err.status, err.message)
    }
}

/// Application code invoked once per request.
///
/// Handlers run on a blocking-capable thread, so they may block without
/// stalling other connections.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, body: &mut BytesMut, request: &Request) -> Result<(), HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(&mut BytesMut, &Request) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    fn handle(&self, body: &mut BytesMut, request: &Request) -> Result<(), HandlerError> {
        self(body, request)
    }
}
