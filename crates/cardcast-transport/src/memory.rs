//! In-process duplex channel.
//!
//! Each side of a [`MemoryChannel::pair`] gets a [`MemoryChannel`] to send
//! on and an [`Inbound`] to receive from. Frames sent on one side show up
//! on the other side's `Inbound`.

use tokio::sync::mpsc;

use crate::{Channel, ChannelId, Inbound, TransportError};

/// Sending half of an in-process channel.
#[derive(Debug, Clone)]
pub struct MemoryChannel {
    id: ChannelId,
    tx: mpsc::UnboundedSender<Vec<u8>>,
}

/// One side of a memory pair.
#[derive(Debug)]
pub struct MemoryEndpoint {
    pub channel: MemoryChannel,
    pub inbound: Inbound,
}

impl MemoryChannel {
    /// Creates two connected endpoints.
    pub fn pair() -> (MemoryEndpoint, MemoryEndpoint) {
        let (a_tx, b_rx) = mpsc::unbounded_channel();
        let (b_tx, a_rx) = mpsc::unbounded_channel();
        let a_id = ChannelId::next();
        let b_id = ChannelId::next();

        let a = MemoryEndpoint {
            channel: MemoryChannel { id: a_id, tx: a_tx },
            inbound: Inbound::new(a_id, a_rx),
        };
        let b = MemoryEndpoint {
            channel: MemoryChannel { id: b_id, tx: b_tx },
            inbound: Inbound::new(b_id, b_rx),
        };
        tracing::debug!(a = %a_id, b = %b_id, "memory channel pair created");
        (a, b)
    }

    /// Returns `true` once the peer's `Inbound` has been dropped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl Channel for MemoryChannel {
    fn send(&self, data: &[u8]) -> Result<(), TransportError> {
        self.tx
            .send(data.to_vec())
            .map_err(|_| TransportError::Closed(self.id))
    }

    fn id(&self) -> ChannelId {
        self.id
    }
}
