//! The transmission engine: response state, framing decisions and the
//! bounded-buffer body streaming loop.

use std::borrow::Cow;
use std::sync::Arc;

use bytes::Bytes;
use once_cell::sync::OnceCell;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio_util::sync::CancellationToken;
use tracing::{error, trace, warn};

use crate::connection::MessageWriter;
use crate::ensure;
use crate::protocol::{HeadFrame, HeaderBag, PayloadItem, ResponseHead, SendError};
use crate::transmit::config::HeaderSettings;
use crate::transmit::lifecycle::Lifecycle;

/// Default size of the bounded buffer used when streaming a body from a
/// source into the connection.
pub const DEFAULT_STREAM_BUFFER_SIZE: usize = 64 * 1024;

/// One in-flight HTTP response bound to one connection.
///
/// A response is created when the connection accepts a request, mutated by
/// application code (status, headers, content type, framing mode) and then
/// transmitted through exactly one of two families of operations:
///
/// - content-length framing: [`send_empty`], [`send_empty_with_length`],
///   [`send_buffer`], [`send_text`], [`send_stream`]
/// - chunked framing: [`send_chunk`], [`send_final_chunk`]
///
/// The families are mutually exclusive for the lifetime of the response.
/// Header bytes are written at most once, on the first send. All operations
/// take `&mut self`: a single response must not be driven concurrently.
///
/// A peer aborting the connection mid-write is an expected event: the send
/// completes as a no-op for the remaining bytes and the response still
/// reaches its terminal state.
///
/// [`send_empty`]: Response::send_empty
/// [`send_empty_with_length`]: Response::send_empty_with_length
/// [`send_buffer`]: Response::send_buffer
/// [`send_text`]: Response::send_text
/// [`send_stream`]: Response::send_stream
/// [`send_chunk`]: Response::send_chunk
/// [`send_final_chunk`]: Response::send_final_chunk
#[derive(Debug)]
pub struct Response<W> {
    head: ResponseHead,
    content_length: i64,
    chunked: bool,
    lifecycle: Lifecycle,
    settings: Arc<HeaderSettings>,
    writer: MessageWriter<W>,
    buffer_size: usize,
    body: OnceCell<Bytes>,
}

impl<W> Response<W>
where
    W: AsyncWrite + Unpin,
{
    /// Creates a response for the given protocol version (copied from the
    /// inbound request) over the connection write half.
    pub fn new(version: impl Into<String>, settings: Arc<HeaderSettings>, writer: W) -> Self {
        Self::with_buffer_size(version, settings, writer, DEFAULT_STREAM_BUFFER_SIZE)
    }

    /// Same as [`Response::new`] with an explicit stream buffer size.
    ///
    /// # Panics
    ///
    /// Panics if `buffer_size` is zero.
    pub fn with_buffer_size(
        version: impl Into<String>,
        settings: Arc<HeaderSettings>,
        writer: W,
        buffer_size: usize,
    ) -> Self {
        assert!(buffer_size > 0, "stream buffer size must be positive");
        Self {
            head: ResponseHead::new(version),
            content_length: -1,
            chunked: false,
            lifecycle: Lifecycle::default(),
            settings,
            writer: MessageWriter::with_capacity(writer, buffer_size),
            buffer_size,
            body: OnceCell::new(),
        }
    }

    pub fn version(&self) -> &str {
        self.head.version()
    }

    pub fn status(&self) -> u16 {
        self.head.status()
    }

    pub fn set_status(&mut self, status: u16) {
        self.head.set_status(status);
    }

    pub fn content_type(&self) -> Option<&str> {
        self.head.content_type()
    }

    pub fn set_content_type(&mut self, content_type: impl Into<String>) {
        self.head.set_content_type(content_type);
    }

    pub fn headers(&self) -> &HeaderBag {
        self.head.headers()
    }

    pub fn headers_mut(&mut self) -> &mut HeaderBag {
        self.head.headers_mut()
    }

    /// Declared content length. Negative means unset. In chunked mode this
    /// is a running total of payload bytes handed to the chunk operations,
    /// an observable statistic that never reaches the wire.
    pub fn content_length(&self) -> i64 {
        self.content_length
    }

    pub fn set_content_length(&mut self, content_length: i64) {
        self.content_length = content_length;
    }

    pub fn chunked_transfer(&self) -> bool {
        self.chunked
    }

    /// Selects the framing mode. Effectively write-once: chunked transfer
    /// cannot be disabled again, and no change is allowed once header bytes
    /// are on the wire.
    pub fn set_chunked_transfer(&mut self, enabled: bool) -> Result<(), SendError> {
        ensure!(
            !self.lifecycle.headers_sent(),
            SendError::protocol_state("transfer framing cannot change after the headers were sent")
        );
        ensure!(
            !(self.chunked && !enabled),
            SendError::protocol_state("chunked transfer-encoding cannot be disabled once enabled")
        );
        self.chunked = enabled;
        Ok(())
    }

    /// True once a terminal send completed and the connection was closed.
    pub fn response_sent(&self) -> bool {
        self.lifecycle.is_closed()
    }

    /// The body handed to [`Response::send_buffer`] / [`Response::send_text`],
    /// if any. Streamed bodies are not captured.
    pub fn body_bytes(&self) -> Option<&Bytes> {
        self.body.get()
    }

    /// The sent body as text, if any.
    pub fn body_text(&self) -> Option<Cow<'_, str>> {
        self.body_bytes().map(|bytes| String::from_utf8_lossy(bytes))
    }

    pub fn transport(&self) -> &W {
        self.writer.get_ref()
    }

    pub fn transport_mut(&mut self) -> &mut W {
        self.writer.get_mut()
    }

    /// Sends headers with no body and optionally closes the connection.
    ///
    /// A pre-set `content_length` is still declared, which supports
    /// HEAD-style responses that announce a body size without body bytes.
    pub async fn send_empty(&mut self, close: bool, token: &CancellationToken) -> Result<(), SendError> {
        self.ensure_not_chunked("send_empty")?;
        self.send_bodyless(close, token).await
    }

    /// Sets the declared content length, then sends headers with no body.
    pub async fn send_empty_with_length(
        &mut self,
        content_length: i64,
        close: bool,
        token: &CancellationToken,
    ) -> Result<(), SendError> {
        self.ensure_not_chunked("send_empty_with_length")?;
        self.content_length = content_length;
        self.send_bodyless(close, token).await
    }

    /// Sends headers and a complete in-memory body. An empty payload
    /// degrades to [`Response::send_empty`].
    pub async fn send_buffer(
        &mut self,
        data: impl Into<Bytes>,
        close: bool,
        token: &CancellationToken,
    ) -> Result<(), SendError> {
        self.ensure_not_chunked("send_buffer")?;
        let data = data.into();
        if data.is_empty() {
            return self.send_bodyless(close, token).await;
        }

        let length = data.len() as i64;
        let _ = self.body.set(data.clone());
        let mut source: &[u8] = &data;
        self.send_sized(length, Some(&mut source), close, token).await
    }

    /// Sends headers and a UTF-8 text body.
    pub async fn send_text(
        &mut self,
        text: impl Into<String>,
        close: bool,
        token: &CancellationToken,
    ) -> Result<(), SendError> {
        self.send_buffer(Bytes::from(text.into().into_bytes()), close, token).await
    }

    /// Sends headers, then streams exactly `declared_length` bytes from the
    /// source through the bounded buffer. `declared_length <= 0` degrades to
    /// [`Response::send_empty`].
    pub async fn send_stream<S>(
        &mut self,
        declared_length: i64,
        source: &mut S,
        close: bool,
        token: &CancellationToken,
    ) -> Result<(), SendError>
    where
        S: AsyncRead + Unpin + ?Sized,
    {
        self.ensure_not_chunked("send_stream")?;
        if declared_length <= 0 {
            return self.send_bodyless(close, token).await;
        }
        self.send_sized(declared_length, Some(source), close, token).await
    }

    /// Sends headers (once, lazily) and one chunk, keeping the connection
    /// open. Requires chunked mode.
    ///
    /// Transfer failures are reported as `Ok(false)` rather than an error,
    /// because chunk sends run in hot write loops where the caller decides
    /// whether to abort the stream.
    pub async fn send_chunk(&mut self, payload: &[u8], token: &CancellationToken) -> Result<bool, SendError> {
        self.ensure_chunked("send_chunk")?;
        ensure!(
            !self.lifecycle.is_closed(),
            SendError::protocol_state("response already sent and the connection closed")
        );

        self.accumulate_content_length(payload.len());

        match self.write_chunk(payload, false, token).await {
            Ok(()) => Ok(true),
            Err(cause) => {
                warn!(%cause, "chunk send failed");
                Ok(false)
            }
        }
    }

    /// Sends headers (once, lazily), the payload (if non-empty) and the
    /// terminal zero-length chunk, then closes the connection. Requires
    /// chunked mode.
    pub async fn send_final_chunk(&mut self, payload: &[u8], token: &CancellationToken) -> Result<bool, SendError> {
        self.ensure_chunked("send_final_chunk")?;
        ensure!(
            !self.lifecycle.is_closed(),
            SendError::protocol_state("response already sent and the connection closed")
        );

        self.accumulate_content_length(payload.len());

        match self.write_chunk(payload, true, token).await {
            Ok(()) => Ok(true),
            Err(cause) => {
                warn!(%cause, "final chunk send failed");
                Ok(false)
            }
        }
    }

    /// Best-effort teardown: performs an empty final send (the terminal
    /// chunk in chunked mode) and marks the response closed regardless of
    /// the write outcome.
    pub async fn close(&mut self) {
        if self.lifecycle.is_closed() {
            return;
        }
        trace!(state = ?self.lifecycle.state(), "closing response");

        let token = CancellationToken::new();
        let result = if self.chunked {
            self.write_chunk(&[], true, &token).await
        } else {
            self.send_bodyless(true, &token).await
        };
        if let Err(cause) = result {
            warn!(%cause, "teardown send failed, closing response anyway");
        }
        self.lifecycle.mark_closed();
    }

    async fn send_bodyless(&mut self, close: bool, token: &CancellationToken) -> Result<(), SendError> {
        self.send_sized(0, Option::<&mut tokio::io::Empty>::None, close, token).await
    }

    async fn send_sized<S>(
        &mut self,
        length: i64,
        source: Option<&mut S>,
        close: bool,
        token: &CancellationToken,
    ) -> Result<(), SendError>
    where
        S: AsyncRead + Unpin + ?Sized,
    {
        ensure!(
            !self.lifecycle.is_closed(),
            SendError::protocol_state("response already sent and the connection closed")
        );
        ensure!(!token.is_cancelled(), SendError::Cancelled);

        if self.settings.include_content_length && !self.chunked {
            if length > 0 {
                self.content_length = length;
            } else if self.content_length < 0 {
                // bodyless responses still declare a length under the policy
                self.content_length = 0;
            }
        }

        self.write_headers_once(length.max(0) as u64).await?;

        if length > 0 {
            if let Some(source) = source {
                self.copy_body(length as u64, source, token).await?;
            }
        }

        self.writer.flush().await?;

        if close {
            self.writer.shutdown().await?;
            self.lifecycle.mark_closed();
        }
        Ok(())
    }

    async fn write_headers_once(&mut self, body_len: u64) -> Result<(), SendError> {
        if !self.lifecycle.headers_set() {
            self.apply_default_headers();
            self.lifecycle.mark_headers_set();
        }
        if self.lifecycle.headers_sent() {
            return Ok(());
        }

        let frame = HeadFrame::new(&self.head, self.content_length, self.chunked, body_len);
        self.writer.write_header(frame)?;
        self.writer.flush().await?;
        self.lifecycle.mark_headers_sent();
        Ok(())
    }

    async fn copy_body<S>(&mut self, declared: u64, source: &mut S, token: &CancellationToken) -> Result<(), SendError>
    where
        S: AsyncRead + Unpin + ?Sized,
    {
        let mut window = vec![0u8; self.buffer_size];
        let mut remaining = declared;

        while remaining > 0 {
            let limit = window.len().min(usize::try_from(remaining).unwrap_or(usize::MAX));
            let read = tokio::select! {
                biased;
                () = token.cancelled() => return Err(SendError::Cancelled),
                read = source.read(&mut window[..limit]) => read?,
            };
            if read == 0 {
                error!(declared, remaining, "body source ended before the declared length");
                return Err(SendError::transfer("body source ended before the declared content length was transmitted"));
            }

            self.writer.write_payload(PayloadItem::Chunk(&window[..read]))?;
            tokio::select! {
                biased;
                () = token.cancelled() => return Err(SendError::Cancelled),
                flushed = self.writer.flush() => flushed?,
            }

            remaining -= read as u64;
        }
        Ok(())
    }

    async fn write_chunk(&mut self, payload: &[u8], last: bool, token: &CancellationToken) -> Result<(), SendError> {
        ensure!(!token.is_cancelled(), SendError::Cancelled);

        self.write_headers_once(0).await?;

        if !payload.is_empty() || !last {
            self.writer.write_payload(PayloadItem::Chunk(payload))?;
        }
        if last {
            self.writer.write_payload(PayloadItem::<&[u8]>::Eof)?;
        }

        tokio::select! {
            biased;
            () = token.cancelled() => return Err(SendError::Cancelled),
            flushed = self.writer.flush() => flushed?,
        }

        if last {
            self.writer.shutdown().await?;
            self.lifecycle.mark_closed();
        }
        Ok(())
    }

    fn apply_default_headers(&mut self) {
        let settings = Arc::clone(&self.settings);
        for (name, value) in &settings.default_headers {
            if !self.head.headers().contains(name) {
                self.head.headers_mut().append(name.clone(), value.clone());
            }
        }
    }

    fn accumulate_content_length(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        if self.content_length < 0 {
            self.content_length = 0;
        }
        self.content_length += len as i64;
    }

    fn ensure_not_chunked(&self, operation: &str) -> Result<(), SendError> {
        ensure!(
            !self.chunked,
            SendError::protocol_state(format!(
                "{operation} requires content-length framing, but the response is configured for chunked \
                 transfer-encoding; use send_chunk / send_final_chunk"
            ))
        );
        Ok(())
    }

    fn ensure_chunked(&self, operation: &str) -> Result<(), SendError> {
        ensure!(
            self.chunked,
            SendError::protocol_state(format!(
                "{operation} requires chunked transfer-encoding; enable it with set_chunked_transfer(true) \
                 or use the send methods"
            ))
        );
        Ok(())
    }
}
