//! Error types for the protocol layer.

/// Errors that can occur while encoding commands or reading events.
///
/// Note that a payload that parses but carries a bad or missing
/// event-specific field is *not* an error here: it decodes to
/// [`Event::Error`](crate::Event::Error) so the game handler hears about it.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serializing a command (or any value) to JSON failed.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The bytes were not valid JSON.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// Valid JSON, but not shaped like an inbound event: not an object,
    /// or no `event` key. No handler is invoked for these.
    #[error("malformed payload: {0}")]
    Malformed(String),
}
