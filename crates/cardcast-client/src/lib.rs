//! Protocol client for Cardcast.
//!
//! This crate turns player intents into commands on the wire and inbound
//! frames into calls on a [`GameHandler`]:
//!
//! 1. **Commands** — `join`, `leave`, `request_hand`, `submit_cards` on
//!    [`ProtocolClient`]. Failures are logged and swallowed.
//! 2. **Dispatch** — one entry point ([`ProtocolClient::dispatch`]) that
//!    decodes a payload and calls the matching handler method.
//! 3. **Subscription** — [`ProtocolClient::run`] drains an inbound
//!    channel into dispatch.
//!
//! # How it fits in the stack
//!
//! ```text
//! Hand/round state (above)  ← implements GameHandler
//!     ↕
//! Protocol client (this crate)  ← framing only, holds no game state
//!     ↕
//! Protocol + transport (below)  ← payload codec, Channel
//! ```

mod client;
mod config;
mod error;
mod handler;

pub use client::{ProtocolClient, SendOutcome};
pub use config::ClientConfig;
pub use error::ClientError;
pub use handler::GameHandler;
