//! Hand and round state for Cardcast.
//!
//! The player's side of a round: the cards in hand, which one is on
//! screen, which are marked to play, the prompt, and whether the player
//! is czar. Everything is mutated through a [`Table`], which implements
//! [`GameHandler`](cardcast_client::GameHandler) so the protocol client
//! can drive it directly.
//!
//! # Key types
//!
//! - [`Table`] — the single mutation point; pushes changes to the UI
//! - [`Hand`] — ordered cards with a wrapping cursor
//! - [`RoundState`] / [`RoundStatus`] — the round state machine
//! - [`UiCollaborator`] — the callbacks the UI layer implements

mod error;
mod hand;
mod round;
mod table;
mod ui;

pub use error::TableError;
pub use hand::{Hand, MoveDirection};
pub use round::{Controls, RoundState, RoundStatus};
pub use table::{Table, TableSnapshot};
pub use ui::{Control, UiCollaborator};
