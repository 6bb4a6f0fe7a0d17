//! Channel abstraction for Cardcast.
//!
//! The game host connection is owned by whoever embeds the client. This
//! crate only defines what the protocol layer needs from it:
//!
//! - [`Channel`] — a non-blocking, fire-and-forget `send` of one frame.
//! - [`Inbound`] — the subscription that yields frames from the host.
//!
//! Two adapters are provided: [`MemoryChannel`] (in-process, used by tests
//! and the demo host) and, behind the `websocket` feature,
//! [`WebSocketChannel`] which wraps an already-established stream.
//!
//! # Feature Flags
//!
//! - `websocket` (default) — WebSocket adapter via `tokio-tungstenite`

mod error;
mod memory;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
pub use memory::{MemoryChannel, MemoryEndpoint};
#[cfg(feature = "websocket")]
pub use websocket::WebSocketChannel;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;

/// Counter for generating unique channel IDs.
static NEXT_CHANNEL_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for a channel, used in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(u64);

impl ChannelId {
    /// Creates a new `ChannelId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Allocates the next process-unique ID.
    pub fn next() -> Self {
        Self(NEXT_CHANNEL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chan-{}", self.0)
    }
}

/// Outbound half of a connection to the game host.
///
/// `send` must not block: implementations queue the frame and return.
/// A returned error means the frame was not queued (the channel is
/// closed); a successful return says nothing about delivery.
pub trait Channel: Send + Sync + 'static {
    /// Queues one frame for the remote peer.
    fn send(&self, data: &[u8]) -> Result<(), TransportError>;

    /// Returns the unique identifier for this channel.
    fn id(&self) -> ChannelId;
}

/// Inbound subscription: frames received from the remote peer, in order.
#[derive(Debug)]
pub struct Inbound {
    id: ChannelId,
    rx: mpsc::UnboundedReceiver<Vec<u8>>,
}

impl Inbound {
    pub(crate) fn new(
        id: ChannelId,
        rx: mpsc::UnboundedReceiver<Vec<u8>>,
    ) -> Self {
        Self { id, rx }
    }

    /// Waits for the next frame.
    ///
    /// Returns `None` once the sending side is gone and every queued
    /// frame has been drained.
    pub async fn recv(&mut self) -> Option<Vec<u8>> {
        self.rx.recv().await
    }

    /// Returns the next queued frame without waiting.
    pub fn try_recv(&mut self) -> Option<Vec<u8>> {
        self.rx.try_recv().ok()
    }

    /// The channel this subscription belongs to.
    pub fn channel_id(&self) -> ChannelId {
        self.id
    }
}
