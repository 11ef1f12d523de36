//! HTTP header encoder implementation for serializing response header blocks
//!
//! This module encodes the status line, the special-cased headers and the
//! caller's header multimap into raw bytes according to HTTP/1.1 framing
//! rules. Construction order is fixed and reproduced exactly:
//!
//! 1. status line
//! 2. `Content-Type` (if set on the head)
//! 3. `Content-Length` (content-length framing only)
//! 4. `Transfer-Encoding: chunked` (chunked framing only)
//! 5. `Date` (always, freshly taken from the date service)
//! 6. remaining headers in insertion order, special-cased names suppressed
//! 7. terminating blank line
//!
//! Header values pass through verbatim: no folding, no encoding, no control
//! character validation. Callers own value sanitization.

use crate::date::DateService;
use crate::protocol::{HeadFrame, SendError, reason_phrase};

use bytes::{BufMut, BytesMut};

use std::io;
use std::io::Write;
use tokio_util::codec::Encoder;

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 4 * 1024;

/// Encoder for HTTP response header blocks implementing the [`Encoder`] trait.
///
/// Serializes a [`HeadFrame`] into raw bytes, automatically emitting the
/// framing header that matches the response's mode and suppressing
/// conflicting caller-supplied entries.
#[derive(Debug, Default)]
pub struct HeaderEncoder;

impl<'a> Encoder<HeadFrame<'a>> for HeaderEncoder {
    type Error = SendError;

    fn encode(&mut self, frame: HeadFrame<'a>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let head = frame.head();

        dst.reserve(INIT_HEADER_SIZE);
        write!(FastWrite(dst), "{} {} {}\r\n", head.version(), head.status(), reason_phrase(head.status()))?;

        let content_type_set = match head.content_type() {
            Some(value) => {
                dst.put_slice(b"Content-Type: ");
                dst.put_slice(value.as_bytes());
                dst.put_slice(b"\r\n");
                true
            }
            None => false,
        };

        let mut content_length_set = false;
        if !frame.is_chunked() && frame.content_length() >= 0 {
            write!(FastWrite(dst), "Content-Length: {}\r\n", frame.content_length())?;
            content_length_set = true;
        }

        let mut transfer_encoding_set = false;
        if frame.is_chunked() {
            dst.put_slice(b"Transfer-Encoding: chunked\r\n");
            transfer_encoding_set = true;
        }

        DateService::global().with_date(|date| {
            dst.put_slice(b"Date: ");
            dst.put_slice(date);
            dst.put_slice(b"\r\n");
        });

        for (name, value) in head.headers().iter() {
            if name.trim().is_empty() {
                continue;
            }
            if content_type_set && name.eq_ignore_ascii_case("Content-Type") {
                continue;
            }
            // a chunked body never carries Content-Length, even caller-supplied
            if (content_length_set || frame.is_chunked()) && name.eq_ignore_ascii_case("Content-Length") {
                continue;
            }
            if transfer_encoding_set && name.eq_ignore_ascii_case("Transfer-Encoding") {
                continue;
            }
            if name.eq_ignore_ascii_case("Date") {
                continue;
            }
            dst.put_slice(name.as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(b"\r\n");
        }

        dst.put_slice(b"\r\n");
        Ok(())
    }
}

/// Fast writer implementation for writing to BytesMut.
///
/// This is an optimization to avoid unnecessary bounds checking when writing
/// to the bytes buffer, since we've already reserved enough space.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
