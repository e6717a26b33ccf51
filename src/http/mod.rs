//! HTTP/1.1 protocol implementation.
//!
//! This module implements the subset of HTTP/1.1 needed to read one request
//! from a byte stream and answer it. Connections are never reused.
//!
//! # Architecture
//!
//! - **`headers`**: Case-insensitive header table and the single-line header parser
//! - **`request`**: Request representation and parse-state tracking
//! - **`parser`**: The request state machine and its error type
//! - **`reader`**: Pumps bytes from a stream through a growable buffer into the parser
//! - **`response`**: Status codes, default headers and the response type
//! - **`writer`**: Serializes and writes responses to the client
//! - **`connection`**: Drives one request-response exchange on a stream
//!
//! # Request State Machine
//!
//! Every parse pass advances through as many states as the buffered bytes allow:
//!
//! ```text
//!        ┌──────────────────┐
//!        │   Initialized    │ ← Wait for a CRLF-terminated request line
//!        └──────┬───────────┘
//!               │ METHOD SP TARGET SP HTTP/1.1
//!               ▼
//!        ┌──────────────────┐
//!        │  ParsingHeaders  │ ← One `Name: Value` line per step
//!        └──────┬───────────┘
//!               │ Blank line
//!               ▼
//!        ┌──────────────────┐
//!        │   ParsingBody    │ ← Collect exactly Content-Length bytes
//!        └──────┬───────────┘
//!               │ Body complete (or no Content-Length)
//!               ▼
//!        ┌──────────────────┐
//!        │       Done       │
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use wireline::http::reader::request_from_reader;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:42069").await?;
//!     let (mut socket, _addr) = listener.accept().await?;
//!     let request = request_from_reader(&mut socket).await?;
//!     println!("{} {}", request.method(), request.target());
//!     Ok(())
//! }
//! ```

pub mod connection;
pub mod headers;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;
