//! Wire-format encoders for HTTP/1.1 responses
//!
//! This module turns response heads and body fragments into raw bytes using
//! a state machine pattern built on [`tokio_util::codec::Encoder`].
//!
//! # Architecture
//!
//! - Header encoding via the [`header`] module: status line, special-header
//!   precedence and the terminating blank line
//! - Payload encoding via the [`body`] module: chunked transfer encoding and
//!   content-length framing
//! - [`ResponseEncoder`]: the composite encoder enforcing that exactly one
//!   head precedes the payload items of a response
//!
//! # Features
//!
//! - Byte-exact header framing (ordering, casing, CRLF discipline)
//! - Support for chunked transfer encoding
//! - Content-Length based payload handling
//! - Single growable output buffer per send, no repeated reallocation

mod body;
mod header;
mod response_encoder;

pub use body::PayloadEncoder;
pub use header::HeaderEncoder;
pub use response_encoder::ResponseEncoder;
