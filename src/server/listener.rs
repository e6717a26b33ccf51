use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::http::connection::Connection;
use crate::server::handler::Handler;

/// Handle to a running server.
///
/// The accept loop runs on its own task. Each accepted connection is served
/// on a separate task and always closed after a single response.
pub struct Server {
    local_addr: SocketAddr,
    closed: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
    accept_loop: JoinHandle<()>,
}

impl Server {
    /// Listens on every interface at `port`.
    pub async fn serve<H: Handler>(port: u16, handler: H) -> anyhow::Result<Self> {
        Self::bind(("0.0.0.0", port), handler).await
    }

    pub async fn bind<A, H>(addr: A, handler: H) -> anyhow::Result<Self>
    where
        A: ToSocketAddrs,
        H: Handler,
    {
        let listener = TcpListener::bind(addr)
            .await
            .context("Failed to bind listener")?;
        let local_addr = listener.local_addr()?;
        info!("Listening on {}", local_addr);

        let closed = Arc::new(AtomicBool::new(false));
        let shutdown = Arc::new(Notify::new());
        let accept_loop = tokio::spawn(accept_loop(
            listener,
            Arc::new(handler),
            Arc::clone(&closed),
            Arc::clone(&shutdown),
        ));

        Ok(Self {
            local_addr,
            closed,
            shutdown,
            accept_loop,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Stops accepting connections. In-flight connections run to completion.
    ///
    /// Calling this more than once has no further effect.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        debug!("Closing listener on {}", self.local_addr);
        self.shutdown.notify_one();
    }

    /// Waits for the accept loop to exit and the listening socket to be released.
    pub async fn wait(self) -> anyhow::Result<()> {
        self.accept_loop
            .await
            .context("Accept loop terminated abnormally")
    }
}

async fn accept_loop(
    listener: TcpListener,
    handler: Arc<dyn Handler>,
    closed: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
) {
    loop {
        let accepted = tokio::select! {
            res = listener.accept() => res,
            _ = shutdown.notified() => {
                debug!("Accept loop stopped");
                return;
            }
        };

        let (socket, peer) = match accepted {
            Ok(conn) => conn,
            Err(e) => {
                // Errors caused by shutting down are expected.
                if closed.load(Ordering::Acquire) {
                    return;
                }
                warn!(error = %e, "Failed to accept connection");
                continue;
            }
        };

        info!("Accepted connection from {}", peer);

        let handler = Arc::clone(&handler);
        tokio::spawn(
            async move {
                let conn = Connection::new(socket, handler);
                if let Err(e) = conn.run().await {
                    error!("Connection error from {}: {}", peer, e);
                }
            }
            .instrument(info_span!("connection", %peer)),
        );
    }
}
