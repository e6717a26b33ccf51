use bytes::{BufMut, BytesMut};
use wireline::config::Config;
use wireline::http::request::Request;
use wireline::server::{HandlerError, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(cfg.log_level()?)
        .init();

    let server = Server::bind(cfg.listen_addr(), demo_handler).await?;
    tracing::info!("Server started on port {}", server.local_addr().port());

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    server.close();
    server.wait().await?;
    tracing::info!("Server gracefully stopped");

    Ok(())
}

fn demo_handler(body: &mut BytesMut, request: &Request) -> Result<(), HandlerError> {
    match request.target() {
        "/yourproblem" => Err(HandlerError::bad_request("Your problem is not my problem\n")),
        "/myproblem" => Err(HandlerError::internal_error("Woopsie, my bad\n")),
        _ => {
            body.put_slice(b"All good, frfr\n");
            Ok(())
        }
    }
}
