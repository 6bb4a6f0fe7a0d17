//! Unified error type for the Cardcast crates.

use cardcast_client::ClientError;
use cardcast_hand::TableError;
use cardcast_protocol::ProtocolError;
use cardcast_transport::TransportError;

/// Top-level error that wraps every crate-specific error.
///
/// Each variant is `#[from]`, so `?` converts sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum CardcastError {
    /// Sending a frame failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A payload could not be encoded or decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A command could not be sent.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The current round refused a local action.
    #[error(transparent)]
    Table(#[from] TableError),
}

#[cfg(test)]
mod tests {
    use cardcast_hand::RoundStatus;
    use cardcast_transport::ChannelId;

    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::Closed(ChannelId::new(4));
        let cardcast_err: CardcastError = err.into();
        assert!(matches!(cardcast_err, CardcastError::Transport(_)));
        assert!(cardcast_err.to_string().contains("chan-4"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::Malformed("no event".into());
        let cardcast_err: CardcastError = err.into();
        assert!(matches!(cardcast_err, CardcastError::Protocol(_)));
        assert!(cardcast_err.to_string().contains("no event"));
    }

    #[test]
    fn test_from_client_error() {
        let cardcast_err: CardcastError = ClientError::ChannelUnavailable.into();
        assert!(matches!(cardcast_err, CardcastError::Client(_)));
    }

    #[test]
    fn test_from_table_error() {
        let err = TableError::InvalidState(RoundStatus::AwaitingResolution);
        let cardcast_err: CardcastError = err.into();
        assert!(matches!(cardcast_err, CardcastError::Table(_)));
        assert_eq!(cardcast_err.to_string(), "not allowed while awaiting resolution");
    }
}
