//! HTTP header block encoding
//!
//! - [`HeaderEncoder`]: Encodes a response head to bytes
//!   - Implements standard HTTP/1.1 status line and header formatting
//!   - Enforces special-header precedence (`Content-Type`,
//!     `Content-Length`, `Transfer-Encoding`, `Date`)
//!   - Emits remaining headers in insertion order

mod header_encoder;

pub use header_encoder::HeaderEncoder;
