//! Encoder implementation for content-length framed payloads.
//!
//! The body is a verbatim pass-through; the encoder only tracks how many of
//! the declared bytes remain and rejects anything past the declared length,
//! because overrunning a declared `Content-Length` corrupts the peer's
//! framing.

use crate::protocol::{PayloadItem, SendError};
use bytes::{Buf, BytesMut};
use tokio_util::codec::Encoder;
use tracing::error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthEncoder {
    remaining: u64,
}

impl LengthEncoder {
    pub fn new(length: u64) -> Self {
        Self { remaining: length }
    }

    /// True once the declared length has been fully encoded.
    pub fn is_finish(&self) -> bool {
        self.remaining == 0
    }
}

impl<D: Buf> Encoder<PayloadItem<D>> for LengthEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem<D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            PayloadItem::Chunk(bytes) => {
                if !bytes.has_remaining() {
                    return Ok(());
                }
                let size = bytes.remaining() as u64;
                if size > self.remaining {
                    error!(size, remaining = self.remaining, "payload exceeds declared content length");
                    return Err(SendError::transfer("payload exceeds the declared content length"));
                }
                dst.extend_from_slice(bytes.chunk());
                self.remaining -= size;
                Ok(())
            }
            PayloadItem::Eof => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_through_until_declared_length() {
        let mut encoder = LengthEncoder::new(10);
        let mut dst = BytesMut::new();

        encoder.encode(PayloadItem::Chunk(b"hello".as_slice()), &mut dst).unwrap();
        assert!(!encoder.is_finish());

        encoder.encode(PayloadItem::Chunk(b"world".as_slice()), &mut dst).unwrap();
        assert!(encoder.is_finish());
        assert_eq!(&dst[..], b"helloworld");
    }

    #[test]
    fn test_overrun_is_a_transfer_error() {
        let mut encoder = LengthEncoder::new(3);
        let mut dst = BytesMut::new();

        let result = encoder.encode(PayloadItem::Chunk(b"hello".as_slice()), &mut dst);
        assert!(matches!(result, Err(SendError::Transfer { .. })));
        assert!(dst.is_empty());
    }

    #[test]
    fn test_eof_and_empty_chunks_are_no_ops() {
        let mut encoder = LengthEncoder::new(5);
        let mut dst = BytesMut::new();

        encoder.encode(PayloadItem::Chunk(b"".as_slice()), &mut dst).unwrap();
        encoder.encode(PayloadItem::<&[u8]>::Eof, &mut dst).unwrap();
        assert!(dst.is_empty());
        assert!(!encoder.is_finish());
    }
}
