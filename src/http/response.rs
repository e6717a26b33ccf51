use std::fmt;

use crate::http::headers::HeaderTable;

/// HTTP status codes the server emits.
///
/// Only the codes below carry a reason phrase; anything else is written with
/// an empty one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 500 Internal Server Error
    InternalServerError,
    /// Any other code, written without a reason phrase
    Other(u16),
}

impl StatusCode {
    pub fn from_u16(code: u16) -> Self {
        match code {
            200 => StatusCode::Ok,
            400 => StatusCode::BadRequest,
            500 => StatusCode::InternalServerError,
            other => StatusCode::Other(other),
        }
    }

    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use wireline::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::Other(418).as_u16(), 418);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::InternalServerError => 500,
            StatusCode::Other(code) => *code,
        }
    }

    /// Returns the reason phrase for this status code, empty if unknown.
    ///
    /// # Example
    ///
    /// ```
    /// # use wireline::http::response::StatusCode;
    /// assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    /// assert_eq!(StatusCode::Other(404).reason_phrase(), "");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::Other(_) => "",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

/// Headers sent with every response: body length, `Connection: Close` and a
/// plain-text content type.
pub fn default_headers(content_length: usize) -> HeaderTable {
    let mut headers = HeaderTable::new();
    headers.set("Content-Length", content_length.to_string());
    headers.set("Connection", "Close");
    headers.set("Content-Type", "text/plain");
    headers
}

/// A complete HTTP response ready to be written to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderTable,
    pub body: Vec<u8>,
}

impl Response {
    /// Creates a response with the default headers sized to `body`.
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        Self {
            status,
            headers: default_headers(body.len()),
            body,
        }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::Ok, body)
    }

    pub fn bad_request(body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::BadRequest, body)
    }

    pub fn internal_error(body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::InternalServerError, body)
    }

    /// Sets a header, replacing any default of the same name.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.replace(name, value);
        self
    }
}
