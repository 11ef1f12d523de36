//! Encoder implementation for HTTP chunked transfer encoding.
//!
//! Each body fragment becomes `<hex-length>\r\n<payload>\r\n`; the end of
//! the body is the zero-length chunk `0\r\n\r\n`. Trailer headers are not
//! supported. A zero-length fragment is legal mid-stream and produces the
//! same bytes as the terminator, which a caller can use to end the body
//! explicitly from its own write loop.

use crate::protocol::{PayloadItem, SendError};
use bytes::{Buf, BytesMut};
use std::io::Write;

use tokio_util::codec::Encoder;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedEncoder {
    eof: bool,
}

impl ChunkedEncoder {
    pub fn new() -> Self {
        Self { eof: false }
    }

    /// True once the terminal chunk has been encoded.
    pub fn is_finish(&self) -> bool {
        self.eof
    }
}

impl<D: Buf> Encoder<PayloadItem<D>> for ChunkedEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem<D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if self.eof {
            warn!("encode payload_item but chunked body already terminated");
            return Ok(());
        }

        match item {
            PayloadItem::Chunk(bytes) => {
                write!(helper::Writer(dst), "{:X}\r\n", bytes.remaining())?;
                dst.reserve(bytes.remaining() + 2);
                dst.extend_from_slice(bytes.chunk());
                dst.extend_from_slice(b"\r\n");
                Ok(())
            }
            PayloadItem::Eof => {
                self.eof = true;
                dst.extend_from_slice(b"0\r\n\r\n");
                Ok(())
            }
        }
    }
}

mod helper {
    use bytes::{BufMut, BytesMut};
    use std::io;

    pub struct Writer<'a>(pub &'a mut BytesMut);

    impl io::Write for Writer<'_> {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.put_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_all(items: Vec<PayloadItem<&[u8]>>) -> BytesMut {
        let mut encoder = ChunkedEncoder::new();
        let mut dst = BytesMut::new();
        for item in items {
            encoder.encode(item, &mut dst).unwrap();
        }
        dst
    }

    /// Minimal chunked parser for round-trip checks: returns the decoded
    /// body and asserts the input is fully consumed by well-formed chunks.
    fn decode_chunked(mut input: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        loop {
            let line_end = input.windows(2).position(|w| w == b"\r\n").expect("missing size CRLF");
            let size_text = std::str::from_utf8(&input[..line_end]).unwrap();
            let size = usize::from_str_radix(size_text, 16).unwrap();
            input = &input[line_end + 2..];

            if size == 0 {
                assert_eq!(input, b"\r\n", "bytes after terminal chunk");
                return body;
            }

            body.extend_from_slice(&input[..size]);
            assert_eq!(&input[size..size + 2], b"\r\n");
            input = &input[size + 2..];
        }
    }

    #[test]
    fn test_chunk_framing() {
        let dst = encode_all(vec![PayloadItem::Chunk(b"hello".as_slice())]);
        assert_eq!(&dst[..], b"5\r\nhello\r\n");
    }

    #[test]
    fn test_hex_length_prefix() {
        let payload = [b'x'; 255];
        let dst = encode_all(vec![PayloadItem::Chunk(payload.as_slice())]);
        assert!(dst.starts_with(b"FF\r\n"));
        assert_eq!(dst.len(), 2 + 2 + 255 + 2);
    }

    #[test]
    fn test_terminal_chunk() {
        let mut encoder = ChunkedEncoder::new();
        let mut dst = BytesMut::new();

        encoder.encode(PayloadItem::<&[u8]>::Eof, &mut dst).unwrap();
        assert_eq!(&dst[..], b"0\r\n\r\n");
        assert!(encoder.is_finish());
    }

    #[test]
    fn test_zero_length_chunk_is_not_terminal() {
        let mut encoder = ChunkedEncoder::new();
        let mut dst = BytesMut::new();

        encoder.encode(PayloadItem::Chunk(b"".as_slice()), &mut dst).unwrap();
        assert_eq!(&dst[..], b"0\r\n\r\n");
        assert!(!encoder.is_finish());
    }

    #[test]
    fn test_items_after_eof_are_ignored() {
        let mut encoder = ChunkedEncoder::new();
        let mut dst = BytesMut::new();

        encoder.encode(PayloadItem::<&[u8]>::Eof, &mut dst).unwrap();
        encoder.encode(PayloadItem::Chunk(b"late".as_slice()), &mut dst).unwrap();
        assert_eq!(&dst[..], b"0\r\n\r\n");
    }

    #[test]
    fn test_round_trip() {
        let dst = encode_all(vec![
            PayloadItem::Chunk(b"hello".as_slice()),
            PayloadItem::Chunk(b", world".as_slice()),
            PayloadItem::Eof,
        ]);
        assert_eq!(decode_chunked(&dst), b"hello, world");
    }
}
