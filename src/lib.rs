//! Hearth - minimal HTTP/1.1 server core
//!
//! Incremental request parsing, template-based routing and a per-connection
//! state machine on top of tokio.

pub mod config;
pub mod error;
pub mod http;
pub mod router;
pub mod server;
