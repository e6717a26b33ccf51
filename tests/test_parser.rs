use wireline::http::parser::ParseError;
use wireline::http::request::{ParseState, Request};

fn parse_all(data: &[u8]) -> Result<(Request, usize), ParseError> {
    let mut req = Request::new();
    let consumed = req.parse(data)?;
    Ok((req, consumed))
}

#[test]
fn test_parse_simple_get_request() {
    let data = b"GET / HTTP/1.1\r\nHost: localhost:42069\r\n\r\n";
    let (req, consumed) = parse_all(data).unwrap();

    assert_eq!(req.state(), ParseState::Done);
    assert_eq!(req.method(), "GET");
    assert_eq!(req.target(), "/");
    assert_eq!(req.request_line.version, "1.1");
    assert_eq!(req.header("host"), "localhost:42069");
    assert!(req.body.is_empty());
    assert_eq!(consumed, data.len());
}

#[test]
fn test_parse_post_request_with_body() {
    let data = b"POST /submit HTTP/1.1\r\nContent-Length: 13\r\n\r\nhello world!\n";
    let (req, consumed) = parse_all(data).unwrap();

    assert!(req.is_done());
    assert_eq!(req.method(), "POST");
    assert_eq!(req.body, b"hello world!\n".to_vec());
    assert_eq!(consumed, data.len());
}

#[test]
fn test_parse_request_line_tokens_round_trip() {
    for (method, target) in [
        ("GET", "/"),
        ("POST", "/coffee"),
        ("BREW", "/pot?size=large"),
        ("OPTIONS", "*"),
        ("CONNECT", "example.com:443"),
    ] {
        let data = format!("{method} {target} HTTP/1.1\r\n\r\n");
        let (req, _) = parse_all(data.as_bytes()).unwrap();

        assert_eq!(req.method(), method);
        assert_eq!(req.target(), target);
        assert_eq!(req.request_line.version, "1.1");
    }
}

#[test]
fn test_parse_partial_request_line_consumes_nothing() {
    let mut req = Request::new();
    let consumed = req.parse(b"GET /cof").unwrap();

    assert_eq!(consumed, 0);
    assert_eq!(req.state(), ParseState::Initialized);
}

#[test]
fn test_parse_stops_mid_headers() {
    let mut req = Request::new();
    let data = b"GET / HTTP/1.1\r\nHost: localhost\r\nAcc";
    let consumed = req.parse(data).unwrap();

    assert_eq!(consumed, data.len() - 3);
    assert_eq!(req.state(), ParseState::ParsingHeaders);
    assert_eq!(req.header("Host"), "localhost");

    let consumed = req.parse(b"Accept: */*\r\n\r\n").unwrap();
    assert_eq!(consumed, 15);
    assert!(req.is_done());
    assert_eq!(req.header("accept"), "*/*");
}

#[test]
fn test_parse_body_across_passes() {
    let mut req = Request::new();
    let head = b"POST / HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";
    assert_eq!(req.parse(head).unwrap(), head.len());
    assert_eq!(req.state(), ParseState::ParsingBody);

    assert_eq!(req.parse(b"").unwrap(), 0);
    assert_eq!(req.state(), ParseState::ParsingBody);

    assert_eq!(req.parse(b"world").unwrap(), 5);
    assert!(req.is_done());
    assert_eq!(req.body, b"helloworld".to_vec());
}

#[test]
fn test_parse_zero_content_length() {
    let (req, _) = parse_all(b"POST /submit HTTP/1.1\r\nContent-Length: 0\r\n\r\n").unwrap();

    assert!(req.is_done());
    assert!(req.body.is_empty());
}

#[test]
fn test_parse_without_content_length_ignores_trailing_bytes() {
    let data = b"POST /submit HTTP/1.1\r\nHost: x\r\n\r\njust gonna sneak this in here";
    let (req, consumed) = parse_all(data).unwrap();

    assert!(req.is_done());
    assert!(req.body.is_empty());
    assert_eq!(consumed, data.len() - "just gonna sneak this in here".len());
}

#[test]
fn test_parse_body_too_long() {
    let result = parse_all(b"POST / HTTP/1.1\r\nContent-Length: 3\r\n\r\nhello");

    assert!(matches!(result, Err(ParseError::BodyTooLong)));
}

#[test]
fn test_parse_invalid_content_length() {
    for value in ["abc", "-1", "1.5", "12abc"] {
        let data = format!("POST / HTTP/1.1\r\nContent-Length: {value}\r\n\r\n");
        let result = parse_all(data.as_bytes());

        match result {
            Err(ParseError::InvalidContentLength(v)) => assert_eq!(v, value),
            other => panic!("expected invalid content length for {value}, got {other:?}"),
        }
    }
}

#[test]
fn test_parse_request_line_wrong_part_count() {
    for line in [
        "/coffee HTTP/1.1\r\n",
        "GET /coffee HTTP/1.1 extra\r\n",
        "GET\r\n",
        "GET  /coffee HTTP/1.1\r\n",
        " GET /coffee HTTP/1.1\r\n",
    ] {
        let result = parse_all(line.as_bytes());
        assert!(
            matches!(result, Err(ParseError::MalformedRequestLine)),
            "expected malformed request line for {line:?}"
        );
    }
}

#[test]
fn test_parse_invalid_method() {
    for line in [
        "/coffee GET HTTP/1.1\r\n",
        "/coffee HTTP/1.1 GET\r\n",
        "get / HTTP/1.1\r\n",
        "G3T / HTTP/1.1\r\n",
    ] {
        let result = parse_all(line.as_bytes());
        assert!(
            matches!(result, Err(ParseError::InvalidMethod)),
            "expected invalid method for {line:?}"
        );
    }
}

#[test]
fn test_parse_unsupported_version() {
    for line in [
        "GET /coffee HTTP/2\r\n",
        "GET /coffee HTTP/1.0\r\n",
        "GET /coffee http/1.1\r\n",
    ] {
        let result = parse_all(line.as_bytes());
        assert!(
            matches!(result, Err(ParseError::UnsupportedVersion)),
            "expected unsupported version for {line:?}"
        );
    }
}

#[test]
fn test_parse_malformed_header() {
    let result = parse_all(b"GET / HTTP/1.1\r\nHost localhost:42069\r\n\r\n");

    assert!(matches!(result, Err(ParseError::InvalidHeaderLine(_))));
}

#[test]
fn test_error_messages() {
    let cases: [(&[u8], &str); 4] = [
        (b"/coffee HTTP/1.1\r\n", "request line is invalid format"),
        (b"/coffee GET HTTP/1.1\r\n", "request method invalid"),
        (b"GET /coffee HTTP/2\r\n", "only HTTP/1.1 supported"),
        (
            b"POST / HTTP/1.1\r\nContent-Length: 1\r\n\r\nab",
            "invalid content length, body too long",
        ),
    ];

    for (data, message) in cases {
        let err = parse_all(data).unwrap_err();
        assert_eq!(err.to_string(), message);
    }
}
