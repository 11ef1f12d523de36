//! The response transmission engine
//!
//! This module drives the full outbound lifecycle of a response:
//!
//! - [`Response`]: owns the response state and the connection write half,
//!   decides between content-length and chunked framing, streams bodies
//!   through a bounded buffer and governs connection closure
//! - [`HeaderSettings`]: the header-configuration collaborator supplying
//!   default headers and the content-length policy
//! - The lifecycle guard: monotone `headers_set` / `headers_sent` /
//!   `response_sent` flags enforcing single header emission and rejecting
//!   operations after completion
//!
//! A response is either content-length framed (`send_empty`, `send_buffer`,
//! `send_text`, `send_stream`) or chunked (`send_chunk`,
//! `send_final_chunk`); the two families are mutually exclusive for the
//! lifetime of the response and misuse fails fast with a protocol-state
//! error.

mod config;
mod lifecycle;
mod response;

pub use config::HeaderSettings;
pub use response::DEFAULT_STREAM_BUFFER_SIZE;
pub use response::Response;
