//! Connection-side writing
//!
//! This module owns the boundary between the codec layer and the raw
//! connection:
//!
//! - [`MessageWriter`]: encodes response messages into a single buffer and
//!   flushes it to an `AsyncWrite` sink
//! - [`is_peer_gone`]: the classification boundary deciding which write
//!   errors mean "the peer went away" (tolerated) as opposed to genuine
//!   I/O failures (reported)
//!
//! Peers routinely abort connections mid-response; one client cutting the
//! wire must never crash the server process or disturb other connections,
//! so those write errors are swallowed here and the writer turns into a
//! sink that discards the remaining bytes.

mod message_writer;

pub use message_writer::MessageWriter;

use std::io;

/// Returns true when a write error means the peer is gone rather than a
/// genuine local I/O failure.
pub fn is_peer_gone(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::BrokenPipe
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peer_gone_classification() {
        assert!(is_peer_gone(&io::Error::from(io::ErrorKind::BrokenPipe)));
        assert!(is_peer_gone(&io::Error::from(io::ErrorKind::ConnectionReset)));
        assert!(is_peer_gone(&io::Error::from(io::ErrorKind::ConnectionAborted)));
        assert!(is_peer_gone(&io::Error::from(io::ErrorKind::NotConnected)));

        assert!(!is_peer_gone(&io::Error::from(io::ErrorKind::PermissionDenied)));
        assert!(!is_peer_gone(&io::Error::from(io::ErrorKind::OutOfMemory)));
    }
}
