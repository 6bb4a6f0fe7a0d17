//! Payload-level encode/decode.
//!
//! Payloads are JSON objects ([`serde_json::Value`]). Outbound:
//! `{ "command": <TAG>, ...fields }`. Inbound: `{ "event": <tag>, ...fields }`.
//!
//! Decoding is tolerant. A payload with no `event` key is rejected as
//! [`ProtocolError::Malformed`] and nobody is told about it; a payload with
//! a recognizable event but a missing or mistyped field still decodes, to
//! an [`Event::Error`] with a generic description.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    Card, CardId, CardKind, Command, CommandMessage, Event, EventTag, PlayerName, ProtocolError,
    StatusUpdate,
};

const KEY_COMMAND: &str = "command";
const KEY_NAME: &str = "name";
const KEY_HAND_SIZE: &str = "hand_size";
const KEY_EVENT: &str = "event";
const KEY_PLAYER: &str = "player";
const KEY_OPPONENT: &str = "opponent";
const KEY_STATUS_TYPE: &str = "status_type";
const KEY_CARDS: &str = "cards";
const KEY_CZAR: &str = "czar";
const KEY_MESSAGE: &str = "message";

/// How many events one inbound payload may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// One payload, one event.
    #[default]
    Exclusive,

    /// Legacy chained classification: after the matched tag, every later
    /// tag in [`EventTag::ORDER`] is tried too, down to `ERROR`
    /// (`PLAYER_JOIN` alone does not chain). Later stages whose fields
    /// are absent are skipped. Only for hosts that depend on the old
    /// client's behavior.
    FallThrough,
}

/// Builds an outbound payload: `fields` plus a `"command"` key.
///
/// Purely structural. Field values are kept as given, so numbers stay
/// numbers and arrays keep their order. A `"command"` entry in `fields`
/// is overwritten.
pub fn encode(command: Command, fields: Map<String, Value>) -> Value {
    let mut payload = fields;
    payload.insert(KEY_COMMAND.to_string(), Value::String(command.as_str().to_string()));
    Value::Object(payload)
}

impl CommandMessage {
    /// The outbound payload for this command, built with [`encode`].
    pub fn to_payload(&self) -> Value {
        let mut fields = Map::new();
        match self {
            Self::Join { name } | Self::Dropout { name } => {
                fields.insert(KEY_NAME.to_string(), Value::from(name.as_str()));
            }
            Self::CardRequest { hand_size } => {
                if let Some(n) = hand_size {
                    fields.insert(KEY_HAND_SIZE.to_string(), Value::from(*n));
                }
            }
            Self::PlayCards { cards } => {
                let ids = cards.iter().map(|id| Value::from(id.0)).collect();
                fields.insert(KEY_CARDS.to_string(), Value::Array(ids));
            }
        }
        encode(self.command(), fields)
    }
}

/// Classifies an inbound payload and extracts its event(s).
///
/// With [`DispatchMode::Exclusive`] the result always holds exactly one
/// event.
///
/// # Errors
/// [`ProtocolError::Malformed`] if the payload is not an object or has no
/// `event` key.
pub fn decode(payload: &Value, mode: DispatchMode) -> Result<Vec<Event>, ProtocolError> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ProtocolError::Malformed("payload is not an object".into()))?;
    let raw = obj
        .get(KEY_EVENT)
        .ok_or_else(|| ProtocolError::Malformed("missing `event` key".into()))?;

    let wire_tag = raw.as_str().unwrap_or_default();
    let matched = EventTag::from_wire(wire_tag);

    let order: &'static [EventTag] = &EventTag::ORDER;
    let at = position(matched);
    let stages = match (mode, matched) {
        (DispatchMode::Exclusive, _) | (DispatchMode::FallThrough, EventTag::PlayerJoin) => {
            &order[at..=at]
        }
        (DispatchMode::FallThrough, _) => &order[at..],
    };

    let mut events = Vec::with_capacity(stages.len());
    for (i, &stage) in stages.iter().enumerate() {
        match extract(stage, obj) {
            Ok(event) => events.push(event),
            Err(MissingField(field)) if i == 0 => {
                tracing::warn!(event = wire_tag, %stage, field, "event field missing or invalid");
                events.push(Event::Error {
                    message: generic_message(stage, wire_tag),
                });
            }
            Err(MissingField(field)) => {
                tracing::debug!(%stage, field, "fall-through stage skipped");
            }
        }
    }
    Ok(events)
}

fn position(tag: EventTag) -> usize {
    EventTag::ORDER
        .iter()
        .position(|t| *t == tag)
        .unwrap_or(EventTag::ORDER.len() - 1)
}

fn generic_message(stage: EventTag, wire_tag: &str) -> String {
    match stage {
        EventTag::Error if !wire_tag.eq_ignore_ascii_case(EventTag::Error.as_str()) => {
            format!("unrecognized event `{wire_tag}` from game host")
        }
        EventTag::Error => "game host reported an error without a message".to_string(),
        _ => format!("could not read {stage} event from game host"),
    }
}

/// Name of the field that stopped extraction.
struct MissingField(&'static str);

fn extract(tag: EventTag, obj: &Map<String, Value>) -> Result<Event, MissingField> {
    match tag {
        EventTag::PlayerJoin => Ok(Event::PlayerJoined {
            player: string_field(obj, KEY_PLAYER)?.into(),
            opponent: obj.get(KEY_OPPONENT).and_then(Value::as_str).map(str::to_string),
        }),
        EventTag::PlayerDrop => Ok(Event::PlayerDropped {
            player: PlayerName::from(string_field(obj, KEY_PLAYER)?),
        }),
        EventTag::GameStatusUpdate => {
            let status = string_field(obj, KEY_STATUS_TYPE)?;
            Ok(Event::StatusUpdated(StatusUpdate::from_wire(&status)))
        }
        EventTag::CardPlayed => {
            let cards = array_field(obj, KEY_CARDS)?
                .iter()
                .map(lenient_id)
                .collect::<Option<Vec<_>>>()
                .ok_or(MissingField(KEY_CARDS))?;
            Ok(Event::CardsPlayed { cards })
        }
        EventTag::GotCards => {
            let mut cards = Vec::new();
            let mut prompt = None;
            for value in array_field(obj, KEY_CARDS)? {
                let card = card_from_value(value).ok_or(MissingField(KEY_CARDS))?;
                match card.kind {
                    CardKind::Response => cards.push(card),
                    CardKind::Prompt => prompt = Some(card),
                }
            }
            Ok(Event::GotCards {
                czar: obj.get(KEY_CZAR).and_then(Value::as_bool).unwrap_or(false),
                cards,
                prompt,
            })
        }
        EventTag::Error => Ok(Event::Error {
            message: string_field(obj, KEY_MESSAGE)?,
        }),
    }
}

fn string_field(obj: &Map<String, Value>, key: &'static str) -> Result<String, MissingField> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(MissingField(key))
}

fn array_field<'a>(obj: &'a Map<String, Value>, key: &'static str) -> Result<&'a Vec<Value>, MissingField> {
    obj.get(key).and_then(Value::as_array).ok_or(MissingField(key))
}

/// Accepts `5` or `"5"`.
fn lenient_id(value: &Value) -> Option<CardId> {
    lenient_u64(value).map(CardId)
}

fn lenient_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Reads one card object. Response cards must carry an id; prompt cards
/// may omit it (some hosts never number the prompt deck) and get id 0.
/// Cards share one parser with [`Card`]'s `Deserialize` impl.
fn card_from_value(value: &Value) -> Option<Card> {
    match Card::deserialize(value) {
        Ok(card) => Some(card),
        Err(e) => {
            tracing::debug!(error = %e, "unreadable card");
            None
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
