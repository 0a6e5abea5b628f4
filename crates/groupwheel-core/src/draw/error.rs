// Error taxonomy for session setup and the draw cycle.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("member list must not be empty")]
    EmptyRoster,

    #[error("group count must be at least 1, got {0}")]
    InvalidGroupCount(i64),

    #[error("\"{0}\" in the reveal sequence is not in the member list")]
    UnknownParticipant(String),

    #[error("reveal sequence has {actual} names but the member list has {expected}")]
    SequenceLengthMismatch { expected: usize, actual: usize },

    #[error(
        "\"{name}\" appears {sequence_count} times in the reveal sequence \
         but only {roster_count} times in the member list"
    )]
    SequenceNameOverused {
        name: String,
        roster_count: usize,
        sequence_count: usize,
    },

    #[error("forced participant \"{0}\" should be in the pool but was not found")]
    ForcedParticipantNotInPool(String),

    #[error("no selection is in flight")]
    NoSelectionInFlight,

    #[error("selection token {got} does not match the pending selection {expected}")]
    StaleSelection { expected: u64, got: u64 },
}

impl SessionError {
    /// Errors caused by bad setup input. The session stays in Setup and the
    /// user may correct the input and prepare again.
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            SessionError::EmptyRoster
                | SessionError::InvalidGroupCount(_)
                | SessionError::UnknownParticipant(_)
                | SessionError::SequenceLengthMismatch { .. }
                | SessionError::SequenceNameOverused { .. }
        )
    }

    /// Errors that indicate a broken internal invariant rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, SessionError::ForcedParticipantNotInPool(_))
    }
}
