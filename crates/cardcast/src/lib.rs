//! # Cardcast
//!
//! Client side of a party card game: prompt cards, response cards, and a
//! rotating card czar, played against a remote game host.
//!
//! The workspace is layered the same way the bytes flow:
//!
//! - `cardcast-transport` moves frames over a [`Channel`](prelude::Channel)
//! - `cardcast-protocol` turns frames into commands and events
//! - `cardcast-client` sends commands and dispatches events to a handler
//! - `cardcast-hand` keeps the hand and round state and drives the UI
//!
//! [`GameSession`] wires them together; a front end only implements
//! [`UiCollaborator`](prelude::UiCollaborator).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cardcast::prelude::*;
//!
//! # fn demo<U: UiCollaborator>(ui: U, channel: MemoryChannel) {
//! let session = GameSession::new(ui, PlayerName::new("ann"), ClientConfig::default());
//! session.attach(channel); // sends JOIN
//! session.request_hand();
//! // ...feed inbound frames with `session.run(inbound).await`...
//! session.end();
//! # }
//! ```

mod error;
mod session;

pub use error::CardcastError;
pub use session::GameSession;

pub mod prelude {
    //! Everything a front end usually needs.

    pub use crate::{CardcastError, GameSession};
    pub use cardcast_client::{ClientConfig, ClientError, GameHandler, ProtocolClient, SendOutcome};
    pub use cardcast_hand::{
        Control, Controls, Hand, MoveDirection, RoundState, RoundStatus, Table, TableError,
        TableSnapshot, UiCollaborator,
    };
    pub use cardcast_protocol::{
        Card, CardId, CardKind, CommandMessage, DispatchMode, Event, PlayerName, ProtocolError,
        StatusUpdate,
    };
    pub use cardcast_transport::{Channel, ChannelId, Inbound, MemoryChannel, TransportError};
}
