//! Error types for the protocol client.

use cardcast_protocol::ProtocolError;
use cardcast_transport::TransportError;

/// Why an outbound command was dropped.
///
/// None of these ever reach the caller of a command method: they are
/// logged and the command returns [`SendOutcome::Dropped`](crate::SendOutcome).
/// [`ProtocolClient::try_send`](crate::ProtocolClient::try_send) exposes
/// them for callers that want to branch on the cause.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No channel is attached yet (or it was detached).
    #[error("no channel attached")]
    ChannelUnavailable,

    /// The command could not be turned into a frame.
    #[error(transparent)]
    Encode(#[from] ProtocolError),

    /// The attached channel refused the frame.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
