use std::io;
use thiserror::Error;

/// Errors surfaced by response sending.
///
/// Peer disconnects during a write are deliberately absent here: they are
/// classified at the connection boundary and swallowed, because a client
/// aborting mid-response is an expected environmental event, not a defect.
#[derive(Error, Debug)]
pub enum SendError {
    /// The caller invoked an operation that contradicts the response's
    /// framing mode or lifecycle state. Fatal to the call; nothing was sent.
    #[error("protocol state error: {reason}")]
    ProtocolState { reason: String },

    /// The body source behaved inconsistently with the declared length.
    /// The response must be treated as unusable afterwards.
    #[error("transfer error: {reason}")]
    Transfer { reason: String },

    /// The send was aborted through its cancellation token. Bytes already
    /// handed to the transport are not rolled back.
    #[error("send cancelled")]
    Cancelled,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn protocol_state<S: ToString>(str: S) -> Self {
        Self::ProtocolState { reason: str.to_string() }
    }

    pub fn transfer<S: ToString>(str: S) -> Self {
        Self::Transfer { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
