//! Round state machine and the controls it implies.

use std::fmt;

use cardcast_protocol::Card;

use crate::Hand;

// ---------------------------------------------------------------------------
// RoundStatus
// ---------------------------------------------------------------------------

/// Where the player is in the current round.
///
/// ```text
///                  got cards                 submit
///   AwaitingHand ────────────→ HandActive ────────────→ AwaitingResolution
///        ↑                         ↑                           │
///        │                         └──── NEXT_ROUND_START ─────┤
///        └──────────────────── cards played ───────────────────┘
/// ```
///
/// `cards played` and `END_GAME` return to `AwaitingHand` from any state.
/// `NEXT_ROUND_START` also lets the player top up a hand they still hold;
/// see [`RoundState::top_up`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundStatus {
    /// No usable hand yet; the only thing to do is ask for cards.
    #[default]
    AwaitingHand,
    /// Cards are in hand and may be marked and submitted.
    HandActive,
    /// A submission is out; waiting for the round to resolve.
    AwaitingResolution,
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AwaitingHand => "awaiting hand",
            Self::HandActive => "hand active",
            Self::AwaitingResolution => "awaiting resolution",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// RoundState
// ---------------------------------------------------------------------------

/// Everything about the round except the hand itself.
#[derive(Debug, Clone, Default)]
pub struct RoundState {
    /// The round's prompt card, once the host has sent one.
    pub prompt: Option<Card>,
    /// Whether this player judges the round.
    pub czar: bool,
    pub status: RoundStatus,
    /// Set once the host has confirmed a join.
    pub joined: bool,
    /// `GOT_AWESOME` updates received this session.
    pub awesome_points: u32,
    /// A new round has started and the player may ask for cards while
    /// holding a hand. Cleared by the next deal, submission or resolution.
    pub top_up: bool,
}

impl RoundState {
    /// How many responses the current prompt asks for (1 without one).
    pub fn pick_count(&self) -> u32 {
        self.prompt.as_ref().map_or(1, |p| p.pick_count)
    }
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

/// Which UI actions are available, derived from state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controls {
    pub get_cards: bool,
    pub submit: bool,
    /// Back/next through the hand.
    pub navigate: bool,
}

impl Controls {
    pub fn for_state(round: &RoundState, hand: &Hand) -> Self {
        Self {
            get_cards: round.joined && (round.status == RoundStatus::AwaitingHand || round.top_up),
            submit: round.status == RoundStatus::HandActive && !round.czar,
            navigate: !hand.is_empty(),
        }
    }
}
