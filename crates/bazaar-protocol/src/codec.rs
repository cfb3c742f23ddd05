//! Codec for encoding and decoding Bazaar events.
//!
//! Text frames carry a single JSON document. Binary frames carry
//! length-prefixed named MessagePack so several events can share one buffer.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Maximum binary frame size (16 MiB).
pub const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

/// Length prefix size in bytes.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Framing used on a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameFormat {
    /// JSON text frames.
    #[default]
    Json,
    /// Length-prefixed MessagePack binary frames.
    MessagePack,
}

/// Protocol errors that can occur during encoding/decoding.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Frame exceeds maximum size.
    #[error("Frame size {size} exceeds maximum {max}")]
    FrameTooLarge { size: usize, max: usize },

    /// Not enough data to decode frame.
    #[error("Incomplete frame: need {0} more bytes")]
    Incomplete(usize),

    /// JSON encoding or decoding error, including unknown events and
    /// missing fields.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// MessagePack encoding error.
    #[error("Encoding error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    /// MessagePack decoding error.
    #[error("Decoding error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
}

/// Encode an event as a JSON text frame.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_json<T: Serialize>(event: &T) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(event)?)
}

/// Decode an event from a JSON text frame.
///
/// # Errors
///
/// Returns an error if the text is not a well-formed event.
pub fn decode_json<T: DeserializeOwned>(text: &str) -> Result<T, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}

/// Encode an event as a binary frame.
///
/// The encoded format is:
/// - 4 bytes: Big-endian length prefix
/// - N bytes: MessagePack-encoded event (named fields)
///
/// # Errors
///
/// Returns an error if the event is too large or encoding fails.
pub fn encode<T: Serialize>(event: &T) -> Result<Bytes, ProtocolError> {
    let payload = rmp_serde::to_vec_named(event)?;

    if payload.len() > MAX_FRAME_SIZE {
        return Err(ProtocolError::FrameTooLarge {
            size: payload.len(),
            max: MAX_FRAME_SIZE,
        });
    }

    let mut buf = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + payload.len());
    buf.put_u32(payload.len() as u32);
    buf.extend_from_slice(&payload);

    Ok(buf.freeze())
}

/// Decode an event from a complete binary frame.
///
/// # Errors
///
/// Returns an error if the data is incomplete, too large, or invalid.
pub fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T, ProtocolError> {
    if data.len() < LENGTH_PREFIX_SIZE {
        return Err(ProtocolError::Incomplete(LENGTH_PREFIX_SIZE - data.len()));
    }

    let length = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;

    if length > MAX_FRAME_SIZE {
        return Err(ProtocolError::FrameTooLarge {
            size: length,
            max: MAX_FRAME_SIZE,
        });
    }

    let total_size = LENGTH_PREFIX_SIZE + length;
    if data.len() < total_size {
        return Err(ProtocolError::Incomplete(total_size - data.len()));
    }

    Ok(rmp_serde::from_slice(&data[LENGTH_PREFIX_SIZE..total_size])?)
}

/// Try to decode an event from a buffer, advancing it past the frame.
///
/// Returns `Ok(Some(event))` if a complete frame was decoded,
/// `Ok(None)` if more data is needed, or `Err` on protocol error. A frame
/// that fails to deserialize is still consumed.
///
/// # Errors
///
/// Returns an error if the frame is too large or invalid.
pub fn decode_from<T: DeserializeOwned>(buf: &mut BytesMut) -> Result<Option<T>, ProtocolError> {
    decode_from_limited(buf, MAX_FRAME_SIZE)
}

/// Like [`decode_from`], but rejects any frame whose declared payload
/// length exceeds `max_frame_size`.
///
/// The check runs as soon as the length prefix is buffered, so a peer
/// cannot make the caller hold more than `max_frame_size` bytes of a
/// single pending frame.
///
/// # Errors
///
/// Returns an error if the frame is too large or invalid.
pub fn decode_from_limited<T: DeserializeOwned>(
    buf: &mut BytesMut,
    max_frame_size: usize,
) -> Result<Option<T>, ProtocolError> {
    if buf.len() < LENGTH_PREFIX_SIZE {
        return Ok(None);
    }

    let length = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
    let max = max_frame_size.min(MAX_FRAME_SIZE);

    if length > max {
        return Err(ProtocolError::FrameTooLarge { size: length, max });
    }

    let total_size = LENGTH_PREFIX_SIZE + length;
    if buf.len() < total_size {
        return Ok(None);
    }

    buf.advance(LENGTH_PREFIX_SIZE);
    let payload = buf.split_to(length);
    let event = rmp_serde::from_slice(&payload)?;

    Ok(Some(event))
}
