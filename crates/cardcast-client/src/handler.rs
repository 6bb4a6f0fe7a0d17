//! The game handler hook: what happens when an event arrives.
//!
//! The protocol client doesn't know what a hand is. It decodes events and
//! hands each one to a [`GameHandler`], which owns whatever game state the
//! application keeps. The hand/round state machine is one implementation;
//! tests use a recorder.

use std::sync::Arc;

use cardcast_protocol::{Card, CardId, PlayerName, StatusUpdate};

/// Receives decoded events from the game host, one method per event.
///
/// # Trait bounds
///
/// - `Send + Sync` → events may be dispatched from the task that drains
///   the inbound channel while the UI thread reads the same handler.
/// - `'static` → the handler lives as long as the client.
///
/// Methods take `&self`: a handler that keeps state guards it itself, so
/// reads can proceed while nothing is being dispatched.
///
/// # Example
///
/// ```rust
/// use cardcast_client::GameHandler;
/// use cardcast_protocol::{Card, CardId, PlayerName, StatusUpdate};
///
/// /// Logs every event and keeps nothing.
/// struct Logger;
///
/// impl GameHandler for Logger {
///     fn on_game_joined(&self, player: &PlayerName, opponent: Option<&str>) {
///         println!("{player} joined (opponent: {opponent:?})");
///     }
///     fn on_got_cards(&self, is_czar: bool, cards: Vec<Card>, prompt: Option<Card>) {
///         println!("dealt {} cards, czar={is_czar}, prompt={prompt:?}", cards.len());
///     }
///     fn on_game_error(&self, message: &str) {
///         println!("host error: {message}");
///     }
///     fn on_game_status_update(&self, status: StatusUpdate) {
///         println!("status: {status}");
///     }
///     fn on_player_drop(&self, player: &PlayerName) {
///         println!("{player} left");
///     }
///     fn on_cards_played(&self, cards: &[CardId]) {
///         println!("{} cards played", cards.len());
///     }
/// }
/// ```
pub trait GameHandler: Send + Sync + 'static {
    /// A player joined. `opponent` is absent when nobody else is seated.
    fn on_game_joined(&self, player: &PlayerName, opponent: Option<&str>);

    /// The host dealt cards: response cards for the hand, the player's
    /// czar flag for the round, and the round's prompt if it changed.
    fn on_got_cards(&self, is_czar: bool, cards: Vec<Card>, prompt: Option<Card>);

    /// The host reported an error, or sent something unreadable.
    fn on_game_error(&self, message: &str);

    /// Game-level status change.
    fn on_game_status_update(&self, status: StatusUpdate);

    /// A player left the game.
    fn on_player_drop(&self, player: &PlayerName);

    /// Cards were played. Ids may belong to other players.
    fn on_cards_played(&self, cards: &[CardId]);
}

/// Lets a client and its owner share one handler.
impl<H: GameHandler + ?Sized> GameHandler for Arc<H> {
    fn on_game_joined(&self, player: &PlayerName, opponent: Option<&str>) {
        (**self).on_game_joined(player, opponent);
    }

    fn on_got_cards(&self, is_czar: bool, cards: Vec<Card>, prompt: Option<Card>) {
        (**self).on_got_cards(is_czar, cards, prompt);
    }

    fn on_game_error(&self, message: &str) {
        (**self).on_game_error(message);
    }

    fn on_game_status_update(&self, status: StatusUpdate) {
        (**self).on_game_status_update(status);
    }

    fn on_player_drop(&self, player: &PlayerName) {
        (**self).on_player_drop(player);
    }

    fn on_cards_played(&self, cards: &[CardId]) {
        (**self).on_cards_played(cards);
    }
}
