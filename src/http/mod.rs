//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 subset the server speaks: one request
//! per connection, bodies framed by `Content-Length` only.
//!
//! # Architecture
//!
//! - **`buffer`**: byte accumulator that parsing consumes from the front
//! - **`parser`**: incremental request parser, re-run as bytes arrive
//! - **`request`**: the request record the parser fills in
//! - **`response`**: status table, response record and builder
//! - **`writer`**: serializes responses and writes them to the stream
//! - **`timer`**: inactivity timer for the read phase
//! - **`connection`**: the per-connection state machine
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Feed chunks to the parser, timer rearmed per chunk
//!        └──────┬──────┘
//!               │ Request finished
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Route and run the handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Replying      │ ← Write response to client
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │ ← Timer cancelled, stream shut down (once)
//!        └──────────────────┘
//! ```
//!
//! A bad request, missing route, timeout or handler failure moves the
//! connection to `Failed`, which replies with the matching status and then
//! closes like any other exchange.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use hearth::http::connection::{Connection, DEFAULT_READ_TIMEOUT};
//! use hearth::router::Router;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let router = Arc::new(Router::new());
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = Arc::clone(&router);
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, router, DEFAULT_READ_TIMEOUT);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod buffer;
pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod timer;
pub mod writer;
