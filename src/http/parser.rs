use thiserror::Error;
use tracing::trace;

use crate::http::headers::find_crlf;
use crate::http::request::{ParseState, Request, RequestLine};

const HTTP_VERSION_TOKEN: &str = "HTTP/1.1";
const CRLF_LEN: usize = 2;

/// Errors raised while reading or parsing a request.
///
/// All of them are terminal for the request being parsed; the display text is
/// what the client receives as the body of a `400 Bad Request`.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("request line is invalid format")]
    MalformedRequestLine,

    #[error("request method invalid")]
    InvalidMethod,

    #[error("only HTTP/1.1 supported")]
    UnsupportedVersion,

    #[error("invalid header: {0}")]
    InvalidHeaderLine(String),

    #[error("invalid content length value: {0}")]
    InvalidContentLength(String),

    #[error("invalid content length, body too long")]
    BodyTooLong,

    /// The byte source ended before the request was complete.
    #[error("incomplete request, reached end of stream while {state}")]
    IncompleteRequest { state: ParseState },

    #[error("trying to parse after 'done' state")]
    ParseAfterDone,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Request {
    /// Runs one parse pass over `data`.
    ///
    /// Steps through as many states as the buffered bytes allow and returns
    /// how many bytes were consumed. Consumed bytes must not be offered again;
    /// unconsumed bytes must be offered again, followed by new ones.
    pub fn parse(&mut self, data: &[u8]) -> Result<usize, ParseError> {
        if self.is_done() {
            return Err(ParseError::ParseAfterDone);
        }

        let mut total = 0;
        while !self.is_done() {
            let n = self.parse_step(&data[total..])?;
            total += n;
            if n == 0 {
                break;
            }
        }
        Ok(total)
    }

    fn parse_step(&mut self, data: &[u8]) -> Result<usize, ParseError> {
        match self.state {
            ParseState::Initialized => {
                let Some((request_line, consumed)) = parse_request_line(data)? else {
                    return Ok(0);
                };
                trace!(
                    method = %request_line.method,
                    target = %request_line.target,
                    "Parsed request line"
                );
                self.request_line = request_line;
                self.state = ParseState::ParsingHeaders;
                Ok(consumed)
            }

            ParseState::ParsingHeaders => {
                let (consumed, done) = self.headers.parse_one(data)?;
                if done {
                    self.state = ParseState::ParsingBody;
                }
                Ok(consumed)
            }

            ParseState::ParsingBody => {
                // Without a declared length the body is never read.
                let Some(content_length) = self.content_length()? else {
                    self.state = ParseState::Done;
                    return Ok(0);
                };

                self.body.extend_from_slice(data);
                if self.body.len() > content_length {
                    return Err(ParseError::BodyTooLong);
                }
                if self.body.len() == content_length {
                    self.state = ParseState::Done;
                }
                Ok(data.len())
            }

            ParseState::Done => Err(ParseError::ParseAfterDone),
        }
    }
}

/// Parses the request line at the front of `data`.
///
/// Returns `Ok(None)` until a full CRLF-terminated line is buffered.
fn parse_request_line(data: &[u8]) -> Result<Option<(RequestLine, usize)>, ParseError> {
    let Some(idx) = find_crlf(data) else {
        return Ok(None);
    };

    let line = std::str::from_utf8(&data[..idx]).map_err(|_| ParseError::MalformedRequestLine)?;

    let parts: Vec<&str> = line.split(' ').collect();
    let [method, target, version] = parts.as_slice() else {
        return Err(ParseError::MalformedRequestLine);
    };
    if parts.iter().any(|part| part.is_empty()) {
        return Err(ParseError::MalformedRequestLine);
    }

    if !method.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(ParseError::InvalidMethod);
    }
    if *version != HTTP_VERSION_TOKEN {
        return Err(ParseError::UnsupportedVersion);
    }

    let request_line = RequestLine {
        method: method.to_string(),
        target: target.to_string(),
        version: "1.1".to_string(),
    };
    Ok(Some((request_line, idx + CRLF_LEN)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_line_needs_crlf() {
        assert!(parse_request_line(b"GET / HTTP/1.1").unwrap().is_none());
        assert!(parse_request_line(b"GET / HTTP/1.1\r").unwrap().is_none());
    }

    #[test]
    fn request_line_consumes_through_crlf() {
        let (line, consumed) = parse_request_line(b"GET /coffee HTTP/1.1\r\nHost: x\r\n")
            .unwrap()
            .unwrap();
        assert_eq!(line.method, "GET");
        assert_eq!(line.target, "/coffee");
        assert_eq!(line.version, "1.1");
        assert_eq!(consumed, 22);
    }

    #[test]
    fn request_line_rejects_double_space() {
        let result = parse_request_line(b"GET  / HTTP/1.1\r\n");
        assert!(matches!(result, Err(ParseError::MalformedRequestLine)));
    }

    #[test]
    fn request_line_rejects_non_utf8() {
        let result = parse_request_line(b"GET /\xff HTTP/1.1\r\n");
        assert!(matches!(result, Err(ParseError::MalformedRequestLine)));
    }

    #[test]
    fn parse_after_done_is_an_error() {
        let mut req = Request::new();
        req.parse(b"GET / HTTP/1.1\r\n\r\n").unwrap();
        assert!(req.is_done());
        assert!(matches!(req.parse(b""), Err(ParseError::ParseAfterDone)));
    }
}
