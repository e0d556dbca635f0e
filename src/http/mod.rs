//! HTTP server module.
//!
//! Resolves the configured bind address, serves the router over plain HTTP and
//! shuts down gracefully on SIGTERM/SIGINT, draining in-flight requests for the
//! configured grace period.

mod server;
mod shutdown;

pub use server::{resolve_addr, serve, start_server, ServerError};
pub use shutdown::setup_shutdown_handler;
