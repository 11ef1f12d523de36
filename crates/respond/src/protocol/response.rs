//! Response head types.
//!
//! [`ResponseHead`] carries the declared fields of a response while
//! application code is still mutating it. [`HeadFrame`] is the borrowed
//! view the transmission engine hands to the encoders once framing is
//! decided at send time.

use crate::protocol::{HeaderBag, PayloadSize};

/// The declared fields of an HTTP response, before any bytes hit the wire.
#[derive(Debug, Clone)]
pub struct ResponseHead {
    version: String,
    status: u16,
    content_type: Option<String>,
    headers: HeaderBag,
}

impl ResponseHead {
    /// Creates a head for the given protocol version, typically copied from
    /// the inbound request. The version is immutable afterwards.
    pub fn new(version: impl Into<String>) -> Self {
        Self { version: version.into(), status: 200, content_type: None, headers: HeaderBag::new() }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.content_type = Some(content_type.into());
    }

    pub fn headers(&self) -> &HeaderBag {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderBag {
        &mut self.headers
    }
}

/// Borrowed view of a response head plus the framing decisions for one send.
///
/// `content_length` is the declared header value (negative means unset and
/// suppresses the `Content-Length` line); `body_len` is the number of body
/// bytes that will actually follow the header block, which drives the
/// payload encoder selection independently of the header value.
#[derive(Debug, Clone, Copy)]
pub struct HeadFrame<'a> {
    head: &'a ResponseHead,
    content_length: i64,
    chunked: bool,
    body_len: u64,
}

impl<'a> HeadFrame<'a> {
    pub fn new(head: &'a ResponseHead, content_length: i64, chunked: bool, body_len: u64) -> Self {
        Self { head, content_length, chunked, body_len }
    }

    pub fn head(&self) -> &ResponseHead {
        self.head
    }

    pub fn content_length(&self) -> i64 {
        self.content_length
    }

    pub fn is_chunked(&self) -> bool {
        self.chunked
    }

    /// Wire framing for the body that follows this head.
    pub fn payload_size(&self) -> PayloadSize {
        if self.chunked {
            PayloadSize::Chunked
        } else if self.body_len > 0 {
            PayloadSize::Length(self.body_len)
        } else {
            PayloadSize::Empty
        }
    }
}
