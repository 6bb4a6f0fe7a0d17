//! Client configuration.

use cardcast_protocol::DispatchMode;

/// Settings for a [`ProtocolClient`](crate::ProtocolClient).
///
/// Defaults match the current game host: one handler per event, and no
/// hand size on card requests.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Whether one inbound payload may reach several handlers.
    ///
    /// Leave at [`DispatchMode::Exclusive`] unless the host relies on the
    /// legacy chained dispatch.
    pub dispatch_mode: DispatchMode,

    /// Include the current hand size in `CARD_REQUEST`.
    ///
    /// Older hosts used it to top the hand up; current hosts ignore it.
    pub send_hand_size: bool,
}
