//! TCP server: accept loop, shutdown and the application handler contract.

pub mod handler;
pub mod listener;

pub use handler::{Handler, HandlerError};
pub use listener::Server;
