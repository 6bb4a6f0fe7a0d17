//! Error types for the hand/round layer.

use crate::RoundStatus;

/// A local player action the current state does not allow.
///
/// These are refusals, not faults: the table notifies the UI and leaves
/// its state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// Submit pressed with no card marked.
    #[error("no cards marked for submission")]
    EmptySubmission,

    /// The czar judges this round and plays nothing.
    #[error("the card czar does not submit cards")]
    CzarCannotSubmit,

    /// The round is not in a state that accepts this action, e.g. a
    /// second submit while the first awaits resolution.
    #[error("not allowed while {0}")]
    InvalidState(RoundStatus),
}
