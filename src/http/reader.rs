use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

use crate::http::parser::ParseError;
use crate::http::request::Request;

/// Starting size of the read buffer; it doubles whenever it fills up.
pub const INITIAL_BUFFER_SIZE: usize = 8;

/// Growable read buffer with a logical fill cursor.
///
/// Bytes `[0, filled)` have been received but not yet consumed by the
/// parser. Consumed bytes are shifted out so they are never offered twice.
#[derive(Debug)]
pub struct ParseBuffer {
    data: Vec<u8>,
    filled: usize,
}

impl ParseBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity.max(1)],
            filled: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Received bytes awaiting the parser.
    pub fn filled(&self) -> &[u8] {
        &self.data[..self.filled]
    }

    /// Doubles the capacity when there is no room left to read into.
    pub fn grow_if_full(&mut self) {
        if self.filled < self.data.len() {
            return;
        }
        let mut grown = vec![0; self.data.len() * 2];
        grown[..self.filled].copy_from_slice(&self.data[..self.filled]);
        self.data = grown;
    }

    /// Free space after the filled region.
    pub fn unfilled_mut(&mut self) -> &mut [u8] {
        &mut self.data[self.filled..]
    }

    /// Marks `n` more bytes of the free space as received.
    pub fn advance(&mut self, n: usize) {
        assert!(self.filled + n <= self.data.len(), "advanced past capacity");
        self.filled += n;
    }

    /// Drops the first `n` received bytes and shifts the rest to the front.
    pub fn consume(&mut self, n: usize) {
        assert!(n <= self.filled, "consumed more than was filled");
        if n == 0 {
            return;
        }
        self.data.copy_within(n..self.filled, 0);
        self.filled -= n;
    }
}

/// Reads exactly one request from `reader`.
///
/// Tolerates any fragmentation of the input, down to a single byte per
/// read. Bytes following a complete request are left unread or discarded.
pub async fn request_from_reader<R>(reader: &mut R) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = ParseBuffer::with_capacity(INITIAL_BUFFER_SIZE);
    let mut request = Request::new();

    while !request.is_done() {
        buffer.grow_if_full();

        let n = reader.read(buffer.unfilled_mut()).await?;
        if n == 0 {
            debug!(
                state = ?request.state(),
                buffered = buffer.filled().len(),
                "Stream ended before request was complete"
            );
            return Err(ParseError::IncompleteRequest {
                state: request.state(),
            });
        }
        buffer.advance(n);

        let consumed = request.parse(buffer.filled())?;
        buffer.consume(consumed);
    }

    Ok(request)
}
