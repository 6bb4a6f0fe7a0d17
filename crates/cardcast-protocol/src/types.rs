//! Wire vocabulary: cards, commands, events and status updates.
//!
//! Outbound traffic is a small set of commands keyed by `"command"`;
//! inbound traffic is a set of events keyed by `"event"`. Tag matching on
//! the inbound side is case-insensitive because the game host has sent
//! both `GOT_CARDS` and `got_cards` over time.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Identifier of a card, unique within one game session.
///
/// Serialized as a plain number (`#[serde(transparent)]`), so
/// `CardId(5)` travels as `5`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CardId(pub u64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card-{}", self.0)
    }
}

/// A player's display name.
///
/// The name is opaque to the protocol. The only check ever made is
/// whether it is still the [`PlayerName::PLACEHOLDER`] a fresh install
/// starts with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerName(String);

impl PlayerName {
    /// Name used before the player has chosen one.
    pub const PLACEHOLDER: &'static str = "player1";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The placeholder name, used when the caller has none stored.
    pub fn placeholder() -> Self {
        Self(Self::PLACEHOLDER.to_string())
    }

    /// `true` if this is still the placeholder (compared case-insensitively).
    pub fn is_placeholder(&self) -> bool {
        self.0.eq_ignore_ascii_case(Self::PLACEHOLDER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PlayerName {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PlayerName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// Which deck a card comes from.
///
/// On the wire prompts are `"B"` (black) and responses `"W"` (white).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// The round's fill-in-the-blank card.
    #[serde(rename = "B")]
    Prompt,
    /// A card held in a player's hand.
    #[serde(rename = "W")]
    Response,
}

impl CardKind {
    /// Parses the wire letter, accepting either case.
    pub fn from_wire(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("B") {
            Some(Self::Prompt)
        } else if s.eq_ignore_ascii_case("W") {
            Some(Self::Response)
        } else {
            None
        }
    }
}

/// A single card.
///
/// Equality and hashing use `id` only: two copies of the same card with
/// different local marks are the same card. `marked_for_submission` is
/// client-side state and never goes on the wire.
///
/// Deserializing is lenient in the same way the host is: `type` in either
/// case, ids and counts as numbers or numeric strings, `pickCt` clamped to
/// at least 1. A response card must carry an id; a prompt without one
/// gets id 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "WireCard")]
pub struct Card {
    #[serde(rename = "cardId")]
    pub id: CardId,

    pub content: String,

    #[serde(rename = "type")]
    pub kind: CardKind,

    /// How many responses the prompt asks for. Always at least 1.
    #[serde(rename = "pickCt")]
    pub pick_count: u32,

    /// How many extra cards players draw for this prompt.
    #[serde(skip_serializing_if = "is_zero")]
    pub draw: u32,

    #[serde(skip)]
    pub marked_for_submission: bool,
}

/// A card as the host sends it, before validation.
#[derive(Deserialize)]
struct WireCard {
    #[serde(rename = "cardId", default)]
    id: Option<LenientU64>,
    content: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "pickCt", default)]
    pick_count: Option<LenientU64>,
    #[serde(default)]
    draw: Option<LenientU64>,
}

/// A number, a numeric string, or anything else (read as absent).
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientU64 {
    Number(u64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl LenientU64 {
    fn get(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Other(_) => None,
        }
    }
}

fn saturating_u32(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

impl TryFrom<WireCard> for Card {
    type Error = String;

    fn try_from(wire: WireCard) -> Result<Self, Self::Error> {
        let kind = CardKind::from_wire(&wire.kind)
            .ok_or_else(|| format!("unknown card type `{}`", wire.kind))?;
        let id = match (kind, wire.id) {
            (_, Some(raw)) => raw.get().ok_or("card id is not a number")?,
            (CardKind::Prompt, None) => 0,
            (CardKind::Response, None) => return Err("response card without an id".into()),
        };
        let pick_count = wire
            .pick_count
            .and_then(|n| n.get())
            .map_or(1, |n| saturating_u32(n).max(1));
        let draw = wire.draw.and_then(|n| n.get()).map_or(0, saturating_u32);

        Ok(Self {
            id: CardId(id),
            content: wire.content,
            kind,
            pick_count,
            draw,
            marked_for_submission: false,
        })
    }
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

impl Card {
    /// A response card with default pick count and no mark.
    pub fn response(id: u64, content: impl Into<String>) -> Self {
        Self {
            id: CardId(id),
            content: content.into(),
            kind: CardKind::Response,
            pick_count: 1,
            draw: 0,
            marked_for_submission: false,
        }
    }

    /// A prompt card asking for `pick_count` responses (clamped to ≥1).
    pub fn prompt(id: u64, content: impl Into<String>, pick_count: u32) -> Self {
        Self {
            id: CardId(id),
            content: content.into(),
            kind: CardKind::Prompt,
            pick_count: pick_count.max(1),
            draw: 0,
            marked_for_submission: false,
        }
    }

    pub fn is_prompt(&self) -> bool {
        self.kind == CardKind::Prompt
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

// ---------------------------------------------------------------------------
// Outbound commands
// ---------------------------------------------------------------------------

/// The commands the game host accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    Join,
    Dropout,
    CardRequest,
    PlayCards,
}

impl Command {
    /// The wire tag, e.g. `"CARD_REQUEST"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Join => "JOIN",
            Self::Dropout => "DROPOUT",
            Self::CardRequest => "CARD_REQUEST",
            Self::PlayCards => "PLAY_CARDS",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-typed outbound command.
///
/// `#[serde(tag = "command")]` produces the flat shape the host expects:
///   `{ "command": "PLAY_CARDS", "cards": [5, 7] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandMessage {
    Join { name: PlayerName },

    Dropout { name: PlayerName },

    /// Asks the host to deal. Hosts that predate `hand_size` ignore it;
    /// it is left out of the payload entirely when `None`.
    CardRequest {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hand_size: Option<usize>,
    },

    PlayCards { cards: Vec<CardId> },
}

impl CommandMessage {
    pub fn command(&self) -> Command {
        match self {
            Self::Join { .. } => Command::Join,
            Self::Dropout { .. } => Command::Dropout,
            Self::CardRequest { .. } => Command::CardRequest,
            Self::PlayCards { .. } => Command::PlayCards,
        }
    }
}

// ---------------------------------------------------------------------------
// Inbound events
// ---------------------------------------------------------------------------

/// Event tags the host may send, in classification order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTag {
    PlayerJoin,
    PlayerDrop,
    GameStatusUpdate,
    CardPlayed,
    GotCards,
    Error,
}

impl EventTag {
    /// All tags in the order the legacy host client chained them.
    pub const ORDER: [EventTag; 6] = [
        Self::PlayerJoin,
        Self::PlayerDrop,
        Self::GameStatusUpdate,
        Self::CardPlayed,
        Self::GotCards,
        Self::Error,
    ];

    /// Matches a wire tag case-insensitively. Anything unrecognized,
    /// including the literal `"ERROR"`, is [`EventTag::Error`].
    pub fn from_wire(s: &str) -> Self {
        Self::ORDER
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(s))
            .unwrap_or(Self::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PlayerJoin => "PLAYER_JOIN",
            Self::PlayerDrop => "PLAYER_DROP",
            Self::GameStatusUpdate => "GAME_STATUS_UPDATE",
            Self::CardPlayed => "CARD_PLAYED",
            Self::GotCards => "GOT_CARDS",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for EventTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Game-level status changes announced by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusUpdate {
    EndGame,
    NextRoundStart,
    GotAwesome,
    #[default]
    None,
}

impl StatusUpdate {
    const ALL: [StatusUpdate; 4] = [
        Self::EndGame,
        Self::NextRoundStart,
        Self::GotAwesome,
        Self::None,
    ];

    /// Case-insensitive; unknown strings map to [`StatusUpdate::None`].
    pub fn from_wire(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .unwrap_or(Self::None)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::EndGame => "END_GAME",
            Self::NextRoundStart => "NEXT_ROUND_START",
            Self::GotAwesome => "GOT_AWESOME",
            Self::None => "NONE",
        }
    }
}

impl fmt::Display for StatusUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded inbound event. One variant per handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PlayerJoined {
        player: PlayerName,
        opponent: Option<String>,
    },
    PlayerDropped {
        player: PlayerName,
    },
    StatusUpdated(StatusUpdate),
    CardsPlayed {
        cards: Vec<CardId>,
    },
    GotCards {
        czar: bool,
        cards: Vec<Card>,
        prompt: Option<Card>,
    },
    Error {
        message: String,
    },
}

impl Event {
    pub fn tag(&self) -> EventTag {
        match self {
            Self::PlayerJoined { .. } => EventTag::PlayerJoin,
            Self::PlayerDropped { .. } => EventTag::PlayerDrop,
            Self::StatusUpdated(_) => EventTag::GameStatusUpdate,
            Self::CardsPlayed { .. } => EventTag::CardPlayed,
            Self::GotCards { .. } => EventTag::GotCards,
            Self::Error { .. } => EventTag::Error,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // Identity types
    // =====================================================================

    #[test]
    fn test_card_id_serializes_as_plain_number() {
        let json = serde_json::to_string(&CardId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_player_name_placeholder_is_case_insensitive() {
        assert!(PlayerName::from("Player1").is_placeholder());
        assert!(PlayerName::default().is_placeholder());
        assert!(!PlayerName::from("ana").is_placeholder());
    }

    // =====================================================================
    // Cards
    // =====================================================================

    #[test]
    fn test_card_equality_ignores_mark_and_content() {
        let mut a = Card::response(1, "Darth Vader.");
        let b = Card::response(1, "edited");
        a.marked_for_submission = true;
        assert_eq!(a, b);
        assert_ne!(a, Card::response(2, "Darth Vader."));
    }

    #[test]
    fn test_card_wire_shape_uses_host_field_names() {
        let mut card = Card::prompt(9, "I killed _.", 2);
        card.marked_for_submission = true;
        let json = serde_json::to_value(&card).unwrap();

        assert_eq!(json["cardId"], 9);
        assert_eq!(json["type"], "B");
        assert_eq!(json["pickCt"], 2);
        assert!(json.get("marked_for_submission").is_none());
        assert!(json.get("draw").is_none());
    }

    #[test]
    fn test_card_deserialize_defaults_pick_count() {
        let card: Card =
            serde_json::from_str(r#"{"content":"Women.","type":"W","cardId":2}"#).unwrap();
        assert_eq!(card.pick_count, 1);
        assert_eq!(card.kind, CardKind::Response);
        assert!(!card.marked_for_submission);
    }

    #[test]
    fn test_card_deserialize_clamps_zero_pick_count() {
        let card: Card =
            serde_json::from_str(r#"{"content":"_?","type":"B","cardId":4,"pickCt":0}"#).unwrap();
        assert_eq!(card.pick_count, 1);
    }

    #[test]
    fn test_card_deserialize_accepts_lowercase_type_and_string_numbers() {
        let card: Card = serde_json::from_str(
            r#"{"content":"_ and _","type":"b","cardId":"12","pickCt":"2","draw":"1"}"#,
        )
        .unwrap();
        assert_eq!(card.id, CardId(12));
        assert_eq!(card.kind, CardKind::Prompt);
        assert_eq!(card.pick_count, 2);
        assert_eq!(card.draw, 1);
    }

    #[test]
    fn test_card_deserialize_prompt_without_id_gets_zero() {
        let card: Card = serde_json::from_str(
            r#"{"content": "Thats right I killed _____.  How, you ask? ____","type": "B","pickCt": 2,"draw": 1}"#,
        )
        .unwrap();
        assert_eq!(card.id, CardId(0));
        assert_eq!(card.draw, 1);
    }

    #[test]
    fn test_card_deserialize_rejects_bad_shapes() {
        let no_id = serde_json::from_str::<Card>(r#"{"content":"Women.","type":"W"}"#);
        let bad_id = serde_json::from_str::<Card>(r#"{"content":"x","type":"W","cardId":"two"}"#);
        let bad_type = serde_json::from_str::<Card>(r#"{"content":"x","type":"X","cardId":1}"#);
        assert!(no_id.is_err());
        assert!(bad_id.is_err());
        assert!(bad_type.is_err());
    }

    #[test]
    fn test_prompt_pick_count_clamped_to_one() {
        assert_eq!(Card::prompt(1, "_", 0).pick_count, 1);
    }

    #[test]
    fn test_card_kind_from_wire() {
        assert_eq!(CardKind::from_wire("w"), Some(CardKind::Response));
        assert_eq!(CardKind::from_wire("B"), Some(CardKind::Prompt));
        assert_eq!(CardKind::from_wire("X"), None);
    }

    // =====================================================================
    // Commands
    // =====================================================================

    #[test]
    fn test_command_message_join_json_format() {
        let msg = CommandMessage::Join { name: "ana".into() };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({"command": "JOIN", "name": "ana"}));
    }

    #[test]
    fn test_command_message_card_request_omits_missing_hand_size() {
        let msg = CommandMessage::CardRequest { hand_size: None };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({"command": "CARD_REQUEST"}));

        let msg = CommandMessage::CardRequest { hand_size: Some(7) };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["hand_size"], 7);
    }

    #[test]
    fn test_command_message_play_cards_keeps_order() {
        let msg = CommandMessage::PlayCards {
            cards: vec![CardId(7), CardId(5)],
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["command"], "PLAY_CARDS");
        assert_eq!(json["cards"], serde_json::json!([7, 5]));
        assert_eq!(msg.command(), Command::PlayCards);
    }

    // =====================================================================
    // Tags
    // =====================================================================

    #[test]
    fn test_event_tag_from_wire_is_case_insensitive() {
        assert_eq!(EventTag::from_wire("got_cards"), EventTag::GotCards);
        assert_eq!(EventTag::from_wire("Player_Join"), EventTag::PlayerJoin);
    }

    #[test]
    fn test_event_tag_unknown_maps_to_error() {
        assert_eq!(EventTag::from_wire("bogus"), EventTag::Error);
        assert_eq!(EventTag::from_wire(""), EventTag::Error);
        assert_eq!(EventTag::from_wire("ERROR"), EventTag::Error);
    }

    #[test]
    fn test_status_update_unknown_maps_to_none() {
        assert_eq!(StatusUpdate::from_wire("next_round_start"), StatusUpdate::NextRoundStart);
        assert_eq!(StatusUpdate::from_wire("halftime"), StatusUpdate::None);
    }
}
