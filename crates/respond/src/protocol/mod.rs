//! Core protocol abstractions for HTTP/1.1 response transmission.
//!
//! This module provides the fundamental building blocks for turning a
//! response description into wire bytes:
//!
//! - **Message Handling** ([`message`]): framing primitives
//!   - [`Message`]: Represents either a response head or a payload chunk
//!   - [`PayloadItem`]: Handles individual payload chunks and EOF
//!   - [`PayloadSize`]: Describes how the body is delimited on the wire
//!
//! - **Response Head** ([`response`]): the declared fields of a response
//!   - [`ResponseHead`]: protocol version, status, content type and headers
//!   - [`HeadFrame`]: borrowed view handed to the encoders at send time
//!
//! - **Headers** ([`headers`]): [`HeaderBag`], an ordered multimap with
//!   case-insensitive lookup and insertion-order serialization
//!
//! - **Status Catalog** ([`status`]): [`reason_phrase`], the total mapping
//!   from status code to canonical reason phrase
//!
//! - **Error Handling** ([`error`]): [`SendError`], the response sending
//!   error taxonomy

mod message;
pub use message::Message;
pub use message::PayloadItem;
pub use message::PayloadSize;

mod response;
pub use response::HeadFrame;
pub use response::ResponseHead;

mod headers;
pub use headers::HeaderBag;

mod status;
pub use status::reason_phrase;

mod error;
pub use error::SendError;
