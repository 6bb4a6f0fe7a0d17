//! `GameSession`: one player's connection to one game.
//!
//! Ties the layers together: UI action → table check → protocol client
//! command → channel, and channel → client dispatch → table → UI.

use std::sync::Arc;

use cardcast_client::{ClientConfig, ProtocolClient, SendOutcome};
use cardcast_hand::{MoveDirection, Table, TableSnapshot, UiCollaborator};
use cardcast_protocol::PlayerName;
use cardcast_transport::{Channel, Inbound};
use serde_json::Value;

use crate::CardcastError;

const WAIT_FOR_ROUND: &str = "You can ask for cards once you've joined and the round is over.";

/// A player's session: the shared [`Table`] plus the [`ProtocolClient`]
/// that feeds it.
///
/// All methods take `&self`, so a session can sit in an `Arc` with
/// [`run`](Self::run) on one task while the UI calls the rest.
pub struct GameSession<U: UiCollaborator> {
    player: PlayerName,
    table: Arc<Table<U>>,
    client: ProtocolClient<Arc<Table<U>>>,
}

impl<U: UiCollaborator> GameSession<U> {
    /// Creates a detached session.
    ///
    /// If `player` is the placeholder name the UI is asked for a real one;
    /// a blank answer keeps the placeholder.
    pub fn new(ui: U, player: PlayerName, config: ClientConfig) -> Self {
        let player = if player.is_placeholder() {
            let answer = ui.prompt_for_player_name();
            let answer = answer.trim();
            if answer.is_empty() {
                player
            } else {
                PlayerName::new(answer)
            }
        } else {
            player
        };
        tracing::info!(%player, dispatch_mode = ?config.dispatch_mode, "session created");

        let table = Arc::new(Table::new(ui));
        let client = ProtocolClient::new(Arc::clone(&table), config);
        Self {
            player,
            table,
            client,
        }
    }

    // -- Lifecycle --------------------------------------------------------

    /// Attaches the channel and sends `JOIN`.
    pub fn attach(&self, channel: impl Channel) -> SendOutcome {
        self.client.attach(channel);
        self.client.join(&self.player)
    }

    /// Sends `DROPOUT` if a channel is attached, then detaches it.
    pub fn end(&self) -> SendOutcome {
        let outcome = self.client.leave(&self.player);
        if self.client.detach() {
            tracing::info!(player = %self.player, "session ended");
        }
        outcome
    }

    // -- Player actions ---------------------------------------------------

    /// Asks the host for cards.
    ///
    /// Refused with a notification (and nothing sent) unless the player
    /// has joined and is either waiting for a hand or topping one up after
    /// `NEXT_ROUND_START`.
    pub fn request_hand(&self) -> SendOutcome {
        if !self.table.can_request_hand() {
            self.table.notify(WAIT_FOR_ROUND);
            return SendOutcome::Dropped;
        }
        let hand_size = self.table.snapshot().hand.len();
        self.client.request_hand(hand_size)
    }

    /// Plays the marked cards.
    ///
    /// Marks are cleared either way. If `PLAY_CARDS` could not be sent the
    /// round goes back to [`RoundStatus::HandActive`](cardcast_hand::RoundStatus)
    /// so the player can mark and submit again.
    ///
    /// # Errors
    /// [`CardcastError::Table`] when the round refuses the submission
    /// (nothing marked, czar, or not in a hand). The UI has already been
    /// told why and nothing was sent.
    pub fn submit(&self) -> Result<SendOutcome, CardcastError> {
        let ids = self.table.begin_submission()?;
        let outcome = self.client.submit_cards(&ids);

        if outcome.is_sent() {
            self.table.clear_marks();
            let noun = if ids.len() == 1 { "Card" } else { "Cards" };
            self.table.notify(format!("{noun} submitted!"));
        } else {
            self.table.abort_submission();
        }
        Ok(outcome)
    }

    pub fn toggle_mark(&self) -> Option<bool> {
        self.table.toggle_mark()
    }

    pub fn move_cursor(&self, direction: MoveDirection) -> Option<usize> {
        self.table.move_cursor(direction)
    }

    pub fn snapshot(&self) -> TableSnapshot {
        self.table.snapshot()
    }

    // -- Inbound ----------------------------------------------------------

    /// Dispatches one decoded payload. See [`ProtocolClient::dispatch`].
    pub fn dispatch(&self, payload: &Value) -> usize {
        self.client.dispatch(payload)
    }

    pub fn dispatch_bytes(&self, frame: &[u8]) -> usize {
        self.client.dispatch_bytes(frame)
    }

    /// Dispatches frames from `inbound` until the peer closes it.
    pub async fn run(&self, inbound: Inbound) {
        self.client.run(inbound).await;
    }

    // -- Accessors --------------------------------------------------------

    pub fn player(&self) -> &PlayerName {
        &self.player
    }

    pub fn table(&self) -> &Table<U> {
        &self.table
    }

    pub fn client(&self) -> &ProtocolClient<Arc<Table<U>>> {
        &self.client
    }

    pub fn is_attached(&self) -> bool {
        self.client.is_attached()
    }
}
