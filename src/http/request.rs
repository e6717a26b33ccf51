use std::fmt;

use crate::http::headers::HeaderTable;
use crate::http::parser::ParseError;

/// The first line of a request: method, target and protocol version.
///
/// `version` holds the bare number (`"1.1"`), not the `HTTP/` wire token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLine {
    /// An all-uppercase token such as `GET`
    pub method: String,
    /// The raw request-target, e.g. `/search?q=rust`
    pub target: String,
    pub version: String,
}

/// Progress of a [`Request`] through the incremental parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    Initialized,
    ParsingHeaders,
    ParsingBody,
    Done,
}

impl fmt::Display for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseState::Initialized => "parsing request line",
            ParseState::ParsingHeaders => "parsing headers",
            ParseState::ParsingBody => "parsing body",
            ParseState::Done => "done",
        };
        f.write_str(s)
    }
}

/// Represents an HTTP request read from a client.
///
/// A request starts out empty in [`ParseState::Initialized`] and is filled in
/// place by successive parse passes. Only requests that reached
/// [`ParseState::Done`] are handed to application code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub request_line: RequestLine,
    pub headers: HeaderTable,
    pub body: Vec<u8>,
    pub(crate) state: ParseState,
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Creates an empty request ready for the first parse pass.
    pub fn new() -> Self {
        Self {
            request_line: RequestLine::default(),
            headers: HeaderTable::new(),
            body: Vec::new(),
            state: ParseState::Initialized,
        }
    }

    pub fn method(&self) -> &str {
        &self.request_line.method
    }

    pub fn target(&self) -> &str {
        &self.request_line.target
    }

    /// Case-insensitive header lookup; empty when the header is absent.
    pub fn header(&self, name: &str) -> &str {
        self.headers.get(name)
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ParseState::Done
    }

    /// Declared body length.
    ///
    /// Returns `Ok(None)` when no `Content-Length` header was sent and an error
    /// when the header is not a non-negative base-10 integer.
    pub fn content_length(&self) -> Result<Option<usize>, ParseError> {
        let raw = self.header("Content-Length");
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<usize>()
            .map(Some)
            .map_err(|_| ParseError::InvalidContentLength(raw.to_string()))
    }
}

/// Builder for constructing completed requests without going through the parser.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<String>,
    target: Option<String>,
    headers: HeaderTable,
    body: Vec<u8>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            request_line: RequestLine {
                method: self.method.ok_or("method missing")?,
                target: self.target.ok_or("target missing")?,
                version: "1.1".to_string(),
            },
            headers: self.headers,
            body: self.body,
            state: ParseState::Done,
        })
    }
}
