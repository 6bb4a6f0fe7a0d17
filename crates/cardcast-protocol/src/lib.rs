//! Wire protocol for Cardcast.
//!
//! This crate defines what the player device and the game host say to
//! each other:
//!
//! - **Types** ([`Card`], [`CommandMessage`], [`Event`], [`StatusUpdate`],
//!   etc.) — the vocabulary of commands and events.
//! - **Message codec** ([`encode`], [`decode`], [`DispatchMode`]) — turning
//!   commands into JSON payloads and JSON payloads into events.
//! - **Byte codec** ([`Codec`] trait, [`JsonCodec`]) — payloads to and
//!   from the frames a channel carries.
//! - **Errors** ([`ProtocolError`]).
//!
//! ```text
//! Transport (bytes) → Codec (Value) → decode (Event) → client dispatch
//! ```

mod codec;
mod error;
mod message;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use message::{DispatchMode, decode, encode};
pub use types::{
    Card, CardId, CardKind, Command, CommandMessage, Event, EventTag, PlayerName,
    StatusUpdate,
};
