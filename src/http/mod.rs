//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request per connection, no
//! keep-alive, no chunked encoding.
//!
//! # Architecture
//!
//! - **`connection`**: The per-connection state machine driving a request through the app
//! - **`parser`**: Reads the request line, header block and body from a stream
//! - **`request`**: HTTP request head representation
//! - **`query`**: URL-encoded pair decoding for query strings and form bodies
//! - **`response`**: HTTP response representation, builder and canned error responses
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//! - **`error`**: The error kinds that map onto canned responses
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Request line, route check, headers
//!        └──────┬──────┘
//!               │ Request head parsed        (errors skip to Writing)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Handler builds the response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response, shut the stream down
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use roster::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let app = Arc::new(app);
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!
//!     loop {
//!         let (socket, peer) = listener.accept().await?;
//!         let app = app.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, peer, app);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod query;
pub mod connection;
pub mod writer;
pub mod mime;
pub mod error;

pub use error::HttpError;
