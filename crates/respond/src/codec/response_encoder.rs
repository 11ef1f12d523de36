use crate::codec::PayloadEncoder;
use crate::codec::header::HeaderEncoder;
use crate::protocol::{HeadFrame, Message, PayloadSize, SendError};
use bytes::{Buf, BytesMut};
use tokio_util::codec::Encoder;
use tracing::error;

/// Composite encoder for a full response: one head, then payload items.
///
/// Encoding the head selects the payload encoder matching the response's
/// framing; the payload encoder is retired once the body is complete.
/// Feeding items out of order is a protocol-state error.
#[derive(Debug)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
    payload_encoder: Option<PayloadEncoder>,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Default for ResponseEncoder {
    fn default() -> Self {
        Self { header_encoder: HeaderEncoder, payload_encoder: None }
    }
}

impl<'a, D: Buf> Encoder<Message<HeadFrame<'a>, D>> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: Message<HeadFrame<'a>, D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            Message::Header(frame) => {
                if self.payload_encoder.is_some() {
                    error!("expect payload item but receive response head");
                    return Err(SendError::protocol_state("response head already encoded, expecting payload items"));
                }

                let payload_encoder = match frame.payload_size() {
                    PayloadSize::Length(size) => PayloadEncoder::fix_length(size),
                    PayloadSize::Chunked => PayloadEncoder::chunked(),
                    PayloadSize::Empty => PayloadEncoder::empty(),
                };
                self.payload_encoder = Some(payload_encoder);
                self.header_encoder.encode(frame, dst)
            }

            Message::Payload(payload_item) => {
                let payload_encoder = if let Some(encoder) = &mut self.payload_encoder {
                    encoder
                } else {
                    error!("expect response head but receive payload item");
                    return Err(SendError::protocol_state("payload item received before the response head"));
                };

                let result = payload_encoder.encode(payload_item, dst);

                if payload_encoder.is_finish() {
                    self.payload_encoder.take();
                }

                result
            }
        }
    }
}
