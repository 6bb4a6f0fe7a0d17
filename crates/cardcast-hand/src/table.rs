//! The table: hand and round state behind one lock.
//!
//! Every change goes through [`Table::mutate`], which runs the change under
//! the lock and queues an owned snapshot of the result. The queue is
//! published to the UI outside the lock, one thread at a time and in the
//! order the changes were applied, so the last view the UI sees is the
//! current one. UI callbacks may call back into the table; what they
//! change is published after the view they were handed.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

use cardcast_client::GameHandler;
use cardcast_protocol::{Card, CardId, PlayerName, StatusUpdate};

use crate::{
    Control, Controls, Hand, MoveDirection, RoundState, RoundStatus, TableError, UiCollaborator,
};

const NO_CARDS_YET: &str = "You don't have any cards yet.";
const MARK_A_CARD: &str = "You need to tap a card to mark it to be played.";
const CZAR_GREETING: &str = "You're the Card Czar! All hail the Czar!";
const NOT_DELIVERED: &str = "Your cards didn't reach the game. Mark them and try again.";

/// An owned copy of the table for rendering.
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    pub hand: Hand,
    pub round: RoundState,
    pub controls: Controls,
}

impl TableSnapshot {
    /// The card under the cursor.
    pub fn current_card(&self) -> Option<&Card> {
        self.hand.current()
    }
}

/// Notes and the view that follow one change, waiting to be shown.
#[derive(Debug)]
struct Publication {
    notes: Vec<String>,
    view: Option<TableSnapshot>,
}

#[derive(Debug, Default)]
struct TableState {
    hand: Hand,
    round: RoundState,
    pending: VecDeque<Publication>,
}

impl TableState {
    fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            hand: self.hand.clone(),
            round: self.round.clone(),
            controls: Controls::for_state(&self.round, &self.hand),
        }
    }
}

/// The player's side of the game.
///
/// Implements [`GameHandler`], so a
/// [`ProtocolClient`](cardcast_client::ProtocolClient) can drive it
/// directly; local actions (marking, navigating, submitting) come in
/// through the inherent methods. Share it with an `Arc` to do both.
pub struct Table<U: UiCollaborator> {
    state: Mutex<TableState>,
    /// Held by the thread currently draining `pending`.
    publisher: Mutex<()>,
    ui: U,
}

impl<U: UiCollaborator> Table<U> {
    pub fn new(ui: U) -> Self {
        Self {
            state: Mutex::new(TableState::default()),
            publisher: Mutex::new(()),
            ui,
        }
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    // -----------------------------------------------------------------------
    // Local actions
    // -----------------------------------------------------------------------

    /// Flips the mark on the displayed card. No-op on an empty hand.
    pub fn toggle_mark(&self) -> Option<bool> {
        self.mutate(|state, notes| {
            let marked = state.hand.toggle_mark();
            if marked.is_none() {
                notes.push(NO_CARDS_YET.to_string());
            }
            marked
        })
    }

    /// Moves the displayed-card cursor. No-op on an empty hand.
    pub fn move_cursor(&self, direction: MoveDirection) -> Option<usize> {
        self.mutate(|state, notes| {
            let cursor = state.hand.move_cursor(direction);
            if cursor.is_none() {
                notes.push(NO_CARDS_YET.to_string());
            }
            cursor
        })
    }

    /// Ids of marked cards in hand order. Changes nothing.
    pub fn build_submission(&self) -> Vec<CardId> {
        self.lock().hand.marked_ids()
    }

    /// Takes the marked cards for submission and moves the round to
    /// [`RoundStatus::AwaitingResolution`].
    ///
    /// Refused (UI notified, state untouched) for the czar, outside
    /// [`RoundStatus::HandActive`], or with nothing marked.
    pub fn begin_submission(&self) -> Result<Vec<CardId>, TableError> {
        self.mutate(|state, notes| {
            let result = check_submission(state);
            match &result {
                Ok(ids) => {
                    state.round.status = RoundStatus::AwaitingResolution;
                    state.round.top_up = false;
                    tracing::debug!(count = ids.len(), "submission started");
                }
                Err(TableError::EmptySubmission) => notes.push(MARK_A_CARD.to_string()),
                Err(e) => notes.push(e.to_string()),
            }
            result
        })
    }

    /// Puts the round back in [`RoundStatus::HandActive`] after a
    /// submission that never left the client, and unmarks every card.
    ///
    /// A round that has moved on since [`begin_submission`](Self::begin_submission)
    /// keeps its status.
    pub fn abort_submission(&self) {
        self.mutate(|state, notes| {
            state.hand.clear_marks();
            if state.round.status == RoundStatus::AwaitingResolution {
                state.round.status = RoundStatus::HandActive;
            }
            tracing::debug!(status = %state.round.status, "submission aborted");
            notes.push(NOT_DELIVERED.to_string());
        });
    }

    /// Unmarks every card.
    pub fn clear_marks(&self) {
        self.mutate(|state, _| state.hand.clear_marks());
    }

    /// Shows `message` after any views already queued.
    pub fn notify(&self, message: impl Into<String>) {
        self.lock().pending.push_back(Publication {
            notes: vec![message.into()],
            view: None,
        });
        self.flush();
    }

    /// Whether asking the host for cards makes sense right now.
    pub fn can_request_hand(&self) -> bool {
        let state = self.lock();
        Controls::for_state(&state.round, &state.hand).get_cards
    }

    pub fn snapshot(&self) -> TableSnapshot {
        self.lock().snapshot()
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn lock(&self) -> MutexGuard<'_, TableState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `change` under the lock, queues the result, then publishes.
    ///
    /// `change` may push notification texts; they are shown ahead of the
    /// card and control refresh for the same change.
    fn mutate<R>(&self, change: impl FnOnce(&mut TableState, &mut Vec<String>) -> R) -> R {
        let result = {
            let mut state = self.lock();
            let mut notes = Vec::new();
            let result = change(&mut state, &mut notes);
            let view = Some(state.snapshot());
            state.pending.push_back(Publication { notes, view });
            result
        };
        self.flush();
        result
    }

    /// Drains the queue unless another call is already draining it.
    ///
    /// The publisher rechecks the queue after letting go, so a publication
    /// queued while it was finishing is not stranded.
    fn flush(&self) {
        loop {
            let publisher = match self.publisher.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
                Err(TryLockError::WouldBlock) => return,
            };
            while let Some(publication) = self.next_publication() {
                self.publish(&publication);
            }
            drop(publisher);

            if self.lock().pending.is_empty() {
                return;
            }
        }
    }

    fn next_publication(&self) -> Option<Publication> {
        self.lock().pending.pop_front()
    }

    fn publish(&self, publication: &Publication) {
        for note in &publication.notes {
            self.ui.notify(note);
        }
        let Some(view) = &publication.view else {
            return;
        };
        self.ui.render_current_card(view.current_card());
        let controls = view.controls;
        self.ui.set_control_enabled(Control::GetCards, controls.get_cards);
        self.ui.set_control_enabled(Control::Submit, controls.submit);
        self.ui.set_control_enabled(Control::Back, controls.navigate);
        self.ui.set_control_enabled(Control::Next, controls.navigate);
    }
}

fn check_submission(state: &TableState) -> Result<Vec<CardId>, TableError> {
    if state.round.czar {
        return Err(TableError::CzarCannotSubmit);
    }
    if state.round.status != RoundStatus::HandActive {
        return Err(TableError::InvalidState(state.round.status));
    }
    let ids = state.hand.marked_ids();
    if ids.is_empty() {
        return Err(TableError::EmptySubmission);
    }
    Ok(ids)
}

// ---------------------------------------------------------------------------
// Host events
// ---------------------------------------------------------------------------

impl<U: UiCollaborator> GameHandler for Table<U> {
    fn on_game_joined(&self, player: &PlayerName, opponent: Option<&str>) {
        tracing::info!(%player, ?opponent, "joined game");
        self.mutate(|state, notes| {
            state.round.joined = true;
            notes.push(format!("Welcome to the game, {player}"));
        });
    }

    fn on_got_cards(&self, is_czar: bool, cards: Vec<Card>, prompt: Option<Card>) {
        self.mutate(|state, notes| {
            let dealt = cards.len();
            let added = state.hand.extend(cards);
            tracing::info!(dealt, added, is_czar, "got cards");

            state.round.czar = is_czar;
            if let Some(prompt) = prompt {
                state.round.prompt = Some(prompt);
            }
            state.hand.reset_cursor();
            state.round.status = RoundStatus::HandActive;
            state.round.top_up = false;

            let noun = if added == 1 { "card" } else { "cards" };
            notes.push(format!("Received {added} new {noun}."));
            if is_czar {
                notes.push(CZAR_GREETING.to_string());
            }
        });
    }

    fn on_game_error(&self, message: &str) {
        tracing::warn!(error = message, "host reported an error");
        self.mutate(|_, notes| {
            notes.push(format!("Something went wrong on the server: {message}"));
        });
    }

    fn on_game_status_update(&self, status: StatusUpdate) {
        tracing::debug!(%status, "status update");
        self.mutate(|state, notes| match status {
            StatusUpdate::EndGame => {
                state.hand.clear();
                state.round.prompt = None;
                state.round.czar = false;
                state.round.status = RoundStatus::AwaitingHand;
                state.round.top_up = false;
                notes.push("The game is over.".to_string());
            }
            StatusUpdate::NextRoundStart => {
                if state.round.status == RoundStatus::AwaitingResolution {
                    state.round.status = RoundStatus::HandActive;
                }
                state.round.top_up = true;
            }
            StatusUpdate::GotAwesome => {
                state.round.awesome_points += 1;
                notes.push(format!("Awesome points: {}", state.round.awesome_points));
            }
            StatusUpdate::None => {}
        });
    }

    fn on_player_drop(&self, player: &PlayerName) {
        tracing::info!(%player, "player dropped");
        self.mutate(|_, notes| notes.push(format!("{player} left the game.")));
    }

    fn on_cards_played(&self, cards: &[CardId]) {
        self.mutate(|state, _| {
            let removed = state.hand.remove(cards);
            tracing::debug!(played = cards.len(), removed, "cards played");
            state.round.status = RoundStatus::AwaitingHand;
            state.round.top_up = false;
        });
    }
}

// =========================================================================
// Tests
// =========================================================================
