//! The outbound half of an asynchronous micro HTTP/1.1 server
//!
//! This crate turns a status code, header set and body (buffer, string or stream)
//! into bytes correctly framed on the wire, and writes them to an open connection.
//! It is built on top of tokio and focuses on byte-exact header framing, bounded
//! memory use while streaming large bodies, and resilience against peers that
//! abort the connection mid-response.
//!
//! # Features
//!
//! - Content-length and chunked transfer-encoding framing, mutually exclusive
//!   for the lifetime of a response
//! - Bounded-buffer body streaming from any `AsyncRead` source
//! - One-time header emission guarded by an explicit response lifecycle
//! - Default-header injection and a configurable content-length policy
//! - Cancellation of in-flight sends through `CancellationToken`
//! - Peer disconnects during a write are tolerated, never fatal
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//! use tokio_util::sync::CancellationToken;
//! use micro_respond::transmit::{HeaderSettings, Response};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let settings = Arc::new(HeaderSettings::default());
//!
//!     loop {
//!         let (stream, _remote_addr) = listener.accept().await?;
//!         let settings = Arc::clone(&settings);
//!
//!         tokio::spawn(async move {
//!             let (_reader, writer) = stream.into_split();
//!             let mut response = Response::new("HTTP/1.1", settings, writer);
//!             response.set_status(200);
//!             response.set_content_type("text/plain");
//!
//!             let token = CancellationToken::new();
//!             if let Err(error) = response.send_text("hello world\r\n", true, &token).await {
//!                 eprintln!("send failed: {error}");
//!             }
//!         });
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`transmit`]: The transmission engine ([`transmit::Response`]) and the
//!   response lifecycle guard
//! - [`protocol`]: Protocol types: status reason catalog, ordered header
//!   multimap, payload framing types and error taxonomy
//! - [`codec`]: Wire-format encoders for the header block and both body
//!   framings
//! - [`connection`]: Buffered writing to the underlying connection and the
//!   peer-disconnect classification boundary
//! - [`date`]: Shared `Date` header value service
//!
//! # Limitations
//!
//! - HTTP/1.1 framing only (no HTTP/2 or HTTP/3)
//! - No trailer headers, no compression
//! - Header values pass through verbatim; callers own value sanitization
//! - A single response instance must not be driven concurrently

pub mod codec;
pub mod connection;
pub mod date;
pub mod protocol;
pub mod transmit;

mod utils;
pub(crate) use utils::ensure;
