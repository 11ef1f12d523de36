use crate::codec::ResponseEncoder;
use crate::connection::is_peer_gone;
use crate::protocol::{HeadFrame, Message, PayloadItem, SendError};
use bytes::{Buf, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::codec::Encoder;
use tracing::warn;

/// Buffered, encoder-backed writer over the raw connection.
///
/// Response messages are encoded into one growable buffer; [`flush`]
/// hands the buffer to the transport in a single write. Once a write fails
/// because the peer is gone, the writer latches and silently discards
/// everything that follows, so callers can finish their send loop without
/// special-casing aborted clients.
///
/// [`flush`]: MessageWriter::flush
#[derive(Debug)]
pub struct MessageWriter<W> {
    writer: W,
    buffer: BytesMut,
    encoder: ResponseEncoder,
    peer_gone: bool,
}

impl<W> MessageWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn with_capacity(writer: W, buffer_size: usize) -> Self {
        Self { writer, buffer: BytesMut::with_capacity(buffer_size), encoder: ResponseEncoder::new(), peer_gone: false }
    }

    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// True once a write failed because the peer went away.
    pub fn is_peer_gone(&self) -> bool {
        self.peer_gone
    }

    #[inline]
    pub fn write_header(&mut self, frame: HeadFrame<'_>) -> Result<(), SendError> {
        self.encoder.encode(Message::<_, bytes::Bytes>::Header(frame), &mut self.buffer)
    }

    #[inline]
    pub fn write_payload<D: Buf>(&mut self, item: PayloadItem<D>) -> Result<(), SendError> {
        self.encoder.encode(Message::<HeadFrame<'_>, D>::Payload(item), &mut self.buffer)
    }

    /// Writes the buffered bytes to the transport in one write.
    ///
    /// A peer-gone failure is swallowed: the buffer is discarded, the
    /// writer latches, and the call reports success.
    pub async fn flush(&mut self) -> Result<(), SendError> {
        if self.peer_gone {
            self.buffer.clear();
            return Ok(());
        }
        if self.buffer.is_empty() {
            return Ok(());
        }

        let result = self.writer.write_all(self.buffer.as_ref()).await;
        self.buffer.clear();
        match result {
            Ok(()) => {}
            Err(e) if is_peer_gone(&e) => {
                warn!(cause = %e, "peer gone during write, discarding rest of response");
                self.peer_gone = true;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        match self.writer.flush().await {
            Ok(()) => Ok(()),
            Err(e) if is_peer_gone(&e) => {
                self.peer_gone = true;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Flushes any buffered bytes, then shuts the transport down.
    pub async fn shutdown(&mut self) -> Result<(), SendError> {
        self.flush().await?;
        if self.peer_gone {
            return Ok(());
        }
        match self.writer.shutdown().await {
            Ok(()) => Ok(()),
            Err(e) if is_peer_gone(&e) => {
                self.peer_gone = true;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
