//! The player's hand: response cards in arrival order plus a cursor.
//!
//! The cursor picks the card currently on screen. It is `Some(i)` with
//! `i < len` whenever the hand has cards and `None` when it is empty;
//! every method here keeps that true.

use cardcast_protocol::{Card, CardId};

/// Which way to move the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// One card back, wrapping from the first to the last.
    Back,
    /// One card forward, wrapping from the last to the first.
    Next,
    /// Back to the first card.
    Reset,
}

/// Ordered response cards and the displayed-card cursor.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
    cursor: Option<usize>,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The card under the cursor.
    pub fn current(&self) -> Option<&Card> {
        self.cursor.and_then(|i| self.cards.get(i))
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    /// Appends newly dealt cards after the ones already held.
    ///
    /// A card whose id is already in the hand is skipped. Returns how many
    /// were added. The cursor is left where it was (or set to 0 if the
    /// hand was empty).
    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) -> usize {
        let before = self.cards.len();
        for card in cards {
            if self.contains(card.id) {
                tracing::debug!(card_id = %card.id, "duplicate card ignored");
                continue;
            }
            self.cards.push(card);
        }
        if self.cursor.is_none() {
            self.reset_cursor();
        }
        self.cards.len() - before
    }

    /// Moves the cursor. No-op on an empty hand.
    ///
    /// Returns the new cursor position.
    pub fn move_cursor(&mut self, direction: MoveDirection) -> Option<usize> {
        let len = self.cards.len();
        let current = self.cursor?;
        let next = match direction {
            MoveDirection::Back => (current + len - 1) % len,
            MoveDirection::Next => (current + 1) % len,
            MoveDirection::Reset => 0,
        };
        self.cursor = Some(next);
        self.cursor
    }

    /// Flips the submission mark on the card under the cursor.
    ///
    /// Returns the card's new mark, or `None` on an empty hand.
    pub fn toggle_mark(&mut self) -> Option<bool> {
        let card = self.cursor.and_then(|i| self.cards.get_mut(i))?;
        card.marked_for_submission = !card.marked_for_submission;
        Some(card.marked_for_submission)
    }

    /// Ids of marked cards, in hand order.
    pub fn marked_ids(&self) -> Vec<CardId> {
        self.cards
            .iter()
            .filter(|c| c.marked_for_submission)
            .map(|c| c.id)
            .collect()
    }

    pub fn clear_marks(&mut self) {
        for card in &mut self.cards {
            card.marked_for_submission = false;
        }
    }

    /// Removes every card whose id is listed; unknown ids are ignored.
    ///
    /// Returns how many cards were removed. The cursor goes back to the
    /// first card.
    pub fn remove(&mut self, ids: &[CardId]) -> usize {
        let before = self.cards.len();
        self.cards.retain(|c| !ids.contains(&c.id));
        self.reset_cursor();
        before - self.cards.len()
    }

    /// Drops every card.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.cursor = None;
    }

    /// Puts the cursor on the first card, or clears it if there is none.
    pub fn reset_cursor(&mut self) {
        self.cursor = (!self.cards.is_empty()).then_some(0);
    }
}

// =========================================================================
// Tests
// =========================================================================
