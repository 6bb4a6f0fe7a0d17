//! The UI collaborator: what the state layer needs from a front end.
//!
//! Rendering, gestures and dialogs are not part of this workspace. A front
//! end implements [`UiCollaborator`] and the [`Table`](crate::Table) calls
//! it after every state change.

use cardcast_protocol::Card;

/// A UI action the table may enable or disable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    GetCards,
    Submit,
    Back,
    Next,
}

/// Callbacks into the front end.
///
/// Calls are made after the table's state lock is released, so an
/// implementation may call back into the table (e.g. read a snapshot).
pub trait UiCollaborator: Send + Sync + 'static {
    /// Shows the card under the cursor, or an empty state.
    fn render_current_card(&self, card: Option<&Card>);

    /// Shows a short, transient message.
    fn notify(&self, message: &str);

    fn set_control_enabled(&self, control: Control, enabled: bool);

    /// Asks the player for a display name.
    fn prompt_for_player_name(&self) -> String;
}
