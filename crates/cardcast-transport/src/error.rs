/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The peer side of the channel is gone, or the task pumping it has
    /// stopped.
    #[error("channel {0} closed")]
    Closed(crate::ChannelId),
}
