use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, warn};

use crate::http::reader::request_from_reader;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::server::handler::Handler;

const PANIC_BODY: &str = "Internal Server Error\n";

/// Serves a single request/response exchange over `stream`.
pub struct Connection<S> {
    stream: S,
    handler: Arc<dyn Handler>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handler: Arc<dyn Handler>) -> Self {
        Self {
            stream,
            handler,
            state: ConnectionState::Reading,
        }
    }

    /// Reads one request, answers it and closes the stream.
    ///
    /// The stream is shut down on every path, including write failures.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let result = self.exchange().await;

        if let Err(e) = self.stream.shutdown().await {
            debug!(error = %e, "Shutdown after response failed");
        }

        result
    }

    async fn exchange(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match request_from_reader(&mut self.stream).await {
                        Ok(req) => ConnectionState::Processing(req),
                        Err(e) => {
                            warn!(error = %e, "Rejecting malformed request");
                            let response = Response::bad_request(e.to_string());
                            ConnectionState::Writing(ResponseWriter::new(&response))
                        }
                    };
                }

                ConnectionState::Processing(req) => {
                    debug!(
                        method = req.method(),
                        target = req.target(),
                        body_len = req.body.len(),
                        "Dispatching request"
                    );
                    let response = dispatch(Arc::clone(&self.handler), req).await;
                    debug!(status = response.status.as_u16(), "Handler finished");
                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }
}

/// Runs the handler off the async workers and turns its outcome into a response.
async fn dispatch(handler: Arc<dyn Handler>, request: Request) -> Response {
    let outcome = tokio::task::spawn_blocking(move || {
        let mut body = BytesMut::new();
        let result = handler.handle(&mut body, &request);
        (body, result)
    })
    .await;

    match outcome {
        Ok((body, Ok(()))) => Response::ok(body.to_vec()),
        Ok((_, Err(handler_error))) => handler_error.into(),
        Err(e) => {
            error!(error = %e, "Handler panicked");
            Response::internal_error(PANIC_BODY)
        }
    }
}
