// Messages between the app orchestrator and the terminal UI.
//
// The UI never touches the session directly: it sends `UserCommand`s and
// renders whatever `UiUpdate`s come back.

use groupwheel_core::draw::session::{Reveal, SelectionToken, SessionSnapshot};

/// Commands from the UI to the app orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Validate the setup inputs and start a new draw.
    Prepare {
        members: String,
        sequence: String,
        group_count: i64,
    },
    /// Pick the next participant.
    Spin,
    /// The spin animation for this selection has finished; apply it.
    SpinFinished(SelectionToken),
    /// Discard the current draw and return to setup.
    Reset,
    Quit,
}

/// Updates from the app orchestrator to the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Full session state after any change.
    Snapshot(Box<SessionSnapshot>),
    /// `Prepare` was rejected; the session is still in setup.
    SetupFailed(String),
    /// A selection is in flight. The UI animates towards `token.index()`
    /// and answers with `SpinFinished(token)`.
    SpinStarted(SelectionToken),
    /// A selection was applied.
    Revealed(Reveal),
    /// The session hit an internal inconsistency and must be reset.
    Fault(String),
}
