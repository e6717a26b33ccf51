use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::headers::HeaderTable;
use crate::http::response::{Response, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Writes `HTTP/1.1 <code> <reason>\r\n`.
pub fn write_status_line<B: BufMut>(buf: &mut B, status: StatusCode) {
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        status.as_u16(),
        status.reason_phrase()
    );
    buf.put_slice(status_line.as_bytes());
}

/// Writes one `name: value\r\n` line per header followed by the blank line
/// that ends the header section. Header order is unspecified.
pub fn write_headers<B: BufMut>(buf: &mut B, headers: &HeaderTable) {
    for (name, value) in headers.iter() {
        buf.put_slice(name.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(value.as_bytes());
        buf.put_slice(b"\r\n");
    }
    buf.put_slice(b"\r\n");
}

pub fn serialize_response(resp: &Response) -> BytesMut {
    let mut buf = BytesMut::with_capacity(128 + resp.body.len());
    write_status_line(&mut buf, resp.status);
    write_headers(&mut buf, &resp.headers);
    buf.put_slice(&resp.body);
    buf
}

/// A serialized response and how much of it has reached the peer.
#[derive(Debug)]
pub struct ResponseWriter {
    buffer: BytesMut,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn is_finished(&self) -> bool {
        self.written == self.buffer.len()
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
