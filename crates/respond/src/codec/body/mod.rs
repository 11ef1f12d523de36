//! HTTP body encoding for response payloads
//!
//! This module frames body fragments using one of two transfer strategies:
//!
//! - `ChunkedEncoder`: Implements chunked transfer encoding
//! - `LengthEncoder`: Handles fixed-length payload encoding
//! - [`PayloadEncoder`]: Main encoder that manages different encoding
//!   strategies
//!
//! All encoders write into a shared `BytesMut` and track whether the body
//! is complete, so the composite response encoder can retire them.

mod chunked_encoder;
mod length_encoder;
mod payload_encoder;

pub use payload_encoder::PayloadEncoder;
