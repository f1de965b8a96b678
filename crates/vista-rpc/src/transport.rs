//! Length-prefixed framing for JSON-RPC messages over a byte stream.
//!
//! ```text
//! +----------------+------------------+
//! |  4 bytes       |  N bytes         |
//! |  (length BE)   |  (JSON payload)  |
//! +----------------+------------------+
//! ```

use bytes::{Buf, BufMut, BytesMut};
use std::io;
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

use crate::protocol::Message;

/// Default frame limit (16 MB). Render payloads of large lists stay well below.
pub const MAX_MESSAGE_SIZE: usize = 16 * 1024 * 1024;

const LENGTH_PREFIX_SIZE: usize = 4;

#[derive(Debug)]
pub struct JsonRpcCodec {
    max_size: usize,
    /// Payload length of a frame whose prefix was already consumed
    pending: Option<usize>,
}

impl JsonRpcCodec {
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_size(MAX_MESSAGE_SIZE)
    }

    /// Codec rejecting frames over `max_size` bytes. Clamped to the 4-byte prefix range.
    #[must_use]
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            max_size: max_size.min(u32::MAX as usize),
            pending: None,
        }
    }

    #[must_use]
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for JsonRpcCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for JsonRpcCodec {
    type Item = Message;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let length = match self.pending {
            Some(length) => length,
            None => {
                if src.len() < LENGTH_PREFIX_SIZE {
                    return Ok(None);
                }
                let length = src.get_u32() as usize;
                if length > self.max_size {
                    return Err(CodecError::MessageTooLarge {
                        size: length,
                        max: self.max_size,
                    });
                }
                self.pending = Some(length);
                length
            }
        };

        if src.len() < length {
            src.reserve(length - src.len());
            return Ok(None);
        }

        let payload = src.split_to(length);
        self.pending = None;
        trace!(bytes = length, "Decoded frame");

        let text = std::str::from_utf8(&payload)?;
        Ok(Some(serde_json::from_str(text)?))
    }
}

impl Encoder<Message> for JsonRpcCodec {
    type Error = CodecError;

    // Length is bounded by max_size, which never exceeds u32::MAX
    #[allow(clippy::cast_possible_truncation)]
    fn encode(&mut self, item: Message, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let payload = serde_json::to_vec(&item)?;
        if payload.len() > self.max_size {
            return Err(CodecError::MessageTooLarge {
                size: payload.len(),
                max: self.max_size,
            });
        }

        dst.reserve(LENGTH_PREFIX_SIZE + payload.len());
        dst.put_u32(payload.len() as u32);
        dst.put_slice(&payload);
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Message too large: {size} bytes (max: {max})")]
    MessageTooLarge { size: usize, max: usize },
}
