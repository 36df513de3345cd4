//! HTTP protocol implementation.
//!
//! This module implements the request/response engine for a one-request-per-
//! connection HTTP/1.1 server.
//!
//! # Architecture
//!
//! - **`headers`**: Insertion-ordered, case-sensitive header map
//! - **`request`**: HTTP request representation and builder
//! - **`parser`**: Parses incoming HTTP requests from byte buffers, never failing
//! - **`response`**: HTTP response representation with builder pattern
//! - **`encoding`**: gzip Content-Encoding negotiation
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`connection`**: Drives one accepted connection through the pipeline
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Accumulate header block + declared body
//!        └──────┬──────┘
//!               │ Request received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route, then negotiate encoding
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │    Closed        │
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use lantern::http::connection::Connection;
//! use lantern::routes::Router;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let router = std::sync::Arc::new(Router::new(None));
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = router.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, &router);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod encoding;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
