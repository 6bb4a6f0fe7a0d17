//! Byte-level codec: JSON values to and from channel frames.
//!
//! Channels move raw bytes. The client encodes each outbound
//! [`CommandMessage`](crate::CommandMessage) and parses each inbound frame
//! through a [`Codec`] before the payload-level [`decode`](crate::decode)
//! looks at it. Keeping this behind a trait lets a test or an embedding
//! swap the byte format without touching dispatch.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Converts serde values to frames and back.
///
/// `Send + Sync + 'static` so the client holding it can be shared with
/// the task that pumps inbound frames.
pub trait Codec: Send + Sync + 'static {
    /// Serializes `value` into one frame.
    ///
    /// # Errors
    /// [`ProtocolError::Encode`] if the value cannot be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Parses one frame.
    ///
    /// # Errors
    /// [`ProtocolError::Decode`] if the bytes are not a valid `T`.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

/// [`Codec`] over JSON text, the format the game host speaks.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
