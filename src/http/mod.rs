//! HTTP protocol implementation.
//!
//! A small HTTP/1.1 subset: GET and HEAD for static resources, keep-alive
//! unless the client sends `Connection: close`, and a fixed error page for
//! everything else.
//!
//! # Architecture
//!
//! - **`reader`**: Accumulates a header block until `\r\n\r\n`
//! - **`parser`**: Classifies a header block into a `RequestOutcome`
//! - **`request`**: `Method` and `RequestOutcome`
//! - **`response`**: Status codes, the error page and the response builder
//! - **`writer`**: Serializes and writes responses to the client
//! - **`connection`**: The per-connection state machine
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌──────────────────┐
//!        │ AwaitingRequest  │ ← Read until \r\n\r\n (bare probes ignored)
//!        └──────┬───────────┘
//!               │ Header block received    (end of stream → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │     Parsing      │ ← Always yields a RequestOutcome
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │    Responding    │ ← Build and write the response
//!        └──────┬───────────┘
//!               ├─ Keep-Alive → AwaitingRequest (same connection)
//!               └─ Close → Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use staticd::http::connection::Connection;
//! use staticd::resource::FsResolver;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let resolver = FsResolver::new(".");
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let resolver = resolver.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, resolver, Some(8192));
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;
