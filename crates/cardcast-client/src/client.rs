//! The protocol client: commands out, events in.
//!
//! # Failure policy
//!
//! A command that can't be sent (no channel, encode failure, channel
//! closed) is logged and dropped. Nothing is retried and nothing is
//! raised: a lost `JOIN` or `PLAY_CARDS` is recovered by the player
//! pressing the button again. Callers that care can look at the returned
//! [`SendOutcome`].
//!
//! # Concurrency note
//!
//! The attached channel sits behind a `Mutex` so `attach`/`detach` work
//! through a shared reference while [`ProtocolClient::run`] is draining
//! inbound frames on another task. The lock is held only long enough to
//! clone the `Arc`; frames are sent outside it.

use std::sync::{Arc, Mutex, PoisonError};

use cardcast_protocol::{
    CardId, Codec, CommandMessage, Event, JsonCodec, PlayerName, decode,
};
use cardcast_transport::{Channel, Inbound};
use serde_json::Value;

use crate::{ClientConfig, ClientError, GameHandler};

/// What happened to an outbound command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Handed to the channel. Says nothing about delivery.
    Sent,
    /// Logged and discarded.
    Dropped,
}

impl SendOutcome {
    pub fn is_sent(self) -> bool {
        self == Self::Sent
    }
}

/// Speaks the game protocol on behalf of one player.
///
/// Holds protocol framing only: an optional channel, a codec, the config,
/// and the [`GameHandler`] that receives events. All game state lives in
/// the handler.
pub struct ProtocolClient<H: GameHandler, C: Codec = JsonCodec> {
    channel: Mutex<Option<Arc<dyn Channel>>>,
    codec: C,
    config: ClientConfig,
    handler: H,
}

impl<H: GameHandler> ProtocolClient<H> {
    /// Creates a client with the JSON codec and no channel attached.
    pub fn new(handler: H, config: ClientConfig) -> Self {
        Self::with_codec(handler, config, JsonCodec)
    }
}

impl<H: GameHandler, C: Codec> ProtocolClient<H, C> {
    /// Creates a client with a custom byte codec.
    pub fn with_codec(handler: H, config: ClientConfig, codec: C) -> Self {
        Self {
            channel: Mutex::new(None),
            codec,
            config,
            handler,
        }
    }

    // -- Channel lifecycle ------------------------------------------------

    /// Attaches the outbound channel, replacing any previous one.
    pub fn attach(&self, channel: impl Channel) {
        self.attach_shared(Arc::new(channel));
    }

    /// Attaches a channel that is also held elsewhere.
    pub fn attach_shared(&self, channel: Arc<dyn Channel>) {
        let channel_id = channel.id();
        *self.lock_channel() = Some(channel);
        tracing::info!(%channel_id, "channel attached");
    }

    /// Detaches the channel. Returns `false` if none was attached.
    pub fn detach(&self) -> bool {
        match self.lock_channel().take() {
            Some(channel) => {
                tracing::info!(channel_id = %channel.id(), "channel detached");
                true
            }
            None => false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.lock_channel().is_some()
    }

    // -- Commands ---------------------------------------------------------

    /// Sends `JOIN` with the player's name.
    pub fn join(&self, name: &PlayerName) -> SendOutcome {
        tracing::debug!(%name, "join");
        self.send(CommandMessage::Join { name: name.clone() })
    }

    /// Sends `DROPOUT` with the player's name.
    ///
    /// Only meaningful during teardown of a live session: with no channel
    /// attached this is a no-op.
    pub fn leave(&self, name: &PlayerName) -> SendOutcome {
        if !self.is_attached() {
            tracing::debug!(%name, "leave skipped, no channel attached");
            return SendOutcome::Dropped;
        }
        tracing::debug!(%name, "leave");
        self.send(CommandMessage::Dropout { name: name.clone() })
    }

    /// Sends `CARD_REQUEST`. The host answers later with `GOT_CARDS`.
    ///
    /// `hand_size` goes on the wire only if
    /// [`ClientConfig::send_hand_size`] is set.
    pub fn request_hand(&self, hand_size: usize) -> SendOutcome {
        tracing::debug!(hand_size, "request hand");
        let hand_size = self.config.send_hand_size.then_some(hand_size);
        self.send(CommandMessage::CardRequest { hand_size })
    }

    /// Sends `PLAY_CARDS` with the ids in the given order.
    ///
    /// There is no pending-acknowledgement bookkeeping: the caller clears
    /// its selection straight away whatever the outcome.
    pub fn submit_cards(&self, cards: &[CardId]) -> SendOutcome {
        tracing::debug!(count = cards.len(), "submit cards");
        self.send(CommandMessage::PlayCards {
            cards: cards.to_vec(),
        })
    }

    /// Encodes and sends one command, logging and swallowing failure.
    pub fn send(&self, message: CommandMessage) -> SendOutcome {
        let command = message.command();
        match self.try_send(&message) {
            Ok(()) => SendOutcome::Sent,
            Err(ClientError::ChannelUnavailable) => {
                tracing::warn!(%command, "command dropped, no channel attached");
                SendOutcome::Dropped
            }
            Err(e) => {
                tracing::warn!(%command, error = %e, "command dropped");
                SendOutcome::Dropped
            }
        }
    }

    /// Encodes and sends one command, reporting why it failed.
    ///
    /// # Errors
    /// - [`ClientError::ChannelUnavailable`] — nothing attached
    /// - [`ClientError::Encode`] — the codec rejected the payload
    /// - [`ClientError::Transport`] — the channel is closed
    pub fn try_send(&self, message: &CommandMessage) -> Result<(), ClientError> {
        // Clone the Arc and release the lock before touching the channel.
        let channel = self
            .lock_channel()
            .clone()
            .ok_or(ClientError::ChannelUnavailable)?;
        let frame = self.codec.encode(&message.to_payload())?;
        channel.send(&frame)?;
        Ok(())
    }

    // -- Inbound ----------------------------------------------------------

    /// Decodes one payload and invokes the matching handler(s).
    ///
    /// Returns how many handler calls were made: 0 for a malformed
    /// payload, exactly 1 in exclusive mode otherwise.
    pub fn dispatch(&self, payload: &Value) -> usize {
        tracing::debug!(%payload, "payload received");
        let events = match decode(payload, self.config.dispatch_mode) {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring inbound payload");
                return 0;
            }
        };

        let count = events.len();
        for event in events {
            self.deliver(event);
        }
        count
    }

    /// Parses one frame as JSON and dispatches it.
    pub fn dispatch_bytes(&self, frame: &[u8]) -> usize {
        let payload: Value = match self.codec.decode(frame) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable frame");
                return 0;
            }
        };
        self.dispatch(&payload)
    }

    /// Dispatches every frame from `inbound` until it closes.
    pub async fn run(&self, mut inbound: Inbound) {
        let channel_id = inbound.channel_id();
        tracing::info!(%channel_id, "dispatch loop started");
        while let Some(frame) = inbound.recv().await {
            self.dispatch_bytes(&frame);
        }
        tracing::info!(%channel_id, "inbound closed, dispatch loop stopped");
    }

    fn deliver(&self, event: Event) {
        let tag = event.tag();
        tracing::debug!(%tag, "dispatching event");
        match event {
            Event::PlayerJoined { player, opponent } => {
                self.handler.on_game_joined(&player, opponent.as_deref());
            }
            Event::PlayerDropped { player } => self.handler.on_player_drop(&player),
            Event::StatusUpdated(status) => self.handler.on_game_status_update(status),
            Event::CardsPlayed { cards } => self.handler.on_cards_played(&cards),
            Event::GotCards { czar, cards, prompt } => {
                self.handler.on_got_cards(czar, cards, prompt);
            }
            Event::Error { message } => self.handler.on_game_error(&message),
        }
    }

    // -- Accessors --------------------------------------------------------

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn lock_channel(&self) -> std::sync::MutexGuard<'_, Option<Arc<dyn Channel>>> {
        self.channel.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// =========================================================================
// Tests
// =========================================================================
