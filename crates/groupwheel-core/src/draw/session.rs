// Game session: the state machine that drives one group draw from setup to
// completion.
//
// Phases:
//   Setup -> (prepare) -> Ready -> (draw) -> Revealing -> (commit) ->
//   AwaitingReveal | Complete
//
// A draw only decides which pool position is revealed. Nothing is assigned
// until the presentation layer reports that its reveal has finished and
// calls `commit_selection`, so at most one selection is ever in flight.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::error::SessionError;
use super::ledger::GroupLedger;
use super::roster::{parse_names, Participant, Roster};
use super::selector::{self, DrawMode, EntropySource, RandSource};
use super::sequence;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for a successful `prepare`.
    Setup,
    /// Prepared, nothing revealed yet.
    Ready,
    /// At least one reveal committed, pool not empty.
    AwaitingReveal,
    /// A selection is in flight and waiting for `commit_selection`.
    Revealing,
    /// Pool is empty; every participant has a group.
    Complete,
    /// A directed draw found the session inconsistent. Only `reset` leaves.
    Faulted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeKind {
    Random,
    Directed,
}

/// Opaque handle for the selection currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionToken {
    serial: u64,
    index: usize,
}

impl SelectionToken {
    /// Pool position that will be revealed when this token is committed.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }
}

/// Outcome of a committed selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub name: String,
    /// Position of the participant in the original roster.
    pub participant_id: usize,
    /// Group that received the participant.
    pub group_index: usize,
    /// Participants still in the pool after this reveal.
    pub remaining: usize,
    pub is_complete: bool,
}

/// Read-only view of the session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub mode: Option<ModeKind>,
    pub pool: Vec<String>,
    pub groups: Vec<Vec<String>>,
    pub current_group_index: usize,
    pub is_complete: bool,
    pub last_reveal: Option<Reveal>,
    pub sequence_cursor: Option<usize>,
}

impl Default for SessionSnapshot {
    /// The view of a session that has not been prepared.
    fn default() -> Self {
        SessionSnapshot {
            phase: SessionPhase::Setup,
            mode: None,
            pool: Vec::new(),
            groups: Vec::new(),
            current_group_index: 0,
            is_complete: false,
            last_reveal: None,
            sequence_cursor: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Everything derived from a successful `prepare`. Dropped on reset.
struct ActiveDraw {
    roster: Roster,
    pool: Vec<Participant>,
    ledger: GroupLedger,
    mode: DrawMode,
    pending: Option<SelectionToken>,
    last_reveal: Option<Reveal>,
}

pub struct GameSession {
    entropy: Box<dyn EntropySource + Send + Sync>,
    phase: SessionPhase,
    active: Option<ActiveDraw>,
    /// Survives reset so tokens issued before a reset stay stale.
    next_serial: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession::new(RandSource::from_entropy())
    }
}

impl GameSession {
    /// Create a session in Setup that draws random indices from `entropy`.
    pub fn new(entropy: impl EntropySource + Send + Sync + 'static) -> Self {
        GameSession {
            entropy: Box::new(entropy),
            phase: SessionPhase::Setup,
            active: None,
            next_serial: 0,
        }
    }

    /// Validate the inputs and move to Ready.
    ///
    /// Any previous draw is discarded first, from any phase including
    /// Faulted. On error the session is left in
    /// Setup with no partial state.
    pub fn prepare(
        &mut self,
        members_text: &str,
        sequence_text: &str,
        group_count: i64,
    ) -> Result<(), SessionError> {
        self.reset_state();

        let roster = Roster::parse(members_text);
        if roster.is_empty() {
            return Err(SessionError::EmptyRoster);
        }

        let group_count = usize::try_from(group_count)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or(SessionError::InvalidGroupCount(group_count))?;

        let candidate = parse_names(sequence_text);
        let mode = if candidate.is_empty() {
            DrawMode::Random
        } else {
            DrawMode::Directed {
                sequence: sequence::validate(candidate, &roster)?,
                cursor: 0,
            }
        };

        info!(
            "Session prepared: {} members, {} groups, {} mode",
            roster.len(),
            group_count,
            if mode.is_directed() { "directed" } else { "random" }
        );

        self.active = Some(ActiveDraw {
            pool: roster.participants().to_vec(),
            roster,
            ledger: GroupLedger::new(group_count),
            mode,
            pending: None,
            last_reveal: None,
        });
        self.phase = SessionPhase::Ready;
        Ok(())
    }

    /// Decide the next participant to reveal without assigning them.
    ///
    /// Returns `Ok(None)` when a draw is not possible right now: not
    /// prepared, a selection already in flight, complete, or faulted.
    pub fn draw(&mut self) -> Result<Option<SelectionToken>, SessionError> {
        if !matches!(self.phase, SessionPhase::Ready | SessionPhase::AwaitingReveal) {
            debug!("Draw ignored in phase {:?}", self.phase);
            return Ok(None);
        }
        let Some(active) = self.active.as_mut() else {
            return Ok(None);
        };

        match selector::select(&active.pool, &active.mode, &mut *self.entropy) {
            Ok(Some(index)) => {
                let token = SelectionToken {
                    serial: self.next_serial,
                    index,
                };
                self.next_serial += 1;
                active.pending = Some(token);
                self.phase = SessionPhase::Revealing;
                debug!(
                    "Drew pool index {} ({}) as selection #{}",
                    index, active.pool[index].name, token.serial
                );
                Ok(Some(token))
            }
            Ok(None) => {
                debug!("Draw ignored: pool is empty");
                Ok(None)
            }
            Err(e) => {
                error!("Draw aborted, session faulted: {}", e);
                self.phase = SessionPhase::Faulted;
                Err(e)
            }
        }
    }

    /// Apply the in-flight selection: assign the participant to the current
    /// group and remove them from the pool.
    pub fn commit_selection(&mut self, token: SelectionToken) -> Result<Reveal, SessionError> {
        let pending = match (&self.phase, self.active.as_ref().and_then(|a| a.pending)) {
            (SessionPhase::Revealing, Some(pending)) => pending,
            _ => {
                warn!("Commit of selection #{} with nothing in flight", token.serial);
                return Err(SessionError::NoSelectionInFlight);
            }
        };
        if pending.serial != token.serial {
            warn!(
                "Stale commit: got selection #{}, expected #{}",
                token.serial, pending.serial
            );
            return Err(SessionError::StaleSelection {
                expected: pending.serial,
                got: token.serial,
            });
        }
        let Some(active) = self.active.as_mut() else {
            return Err(SessionError::NoSelectionInFlight);
        };

        let participant = active.pool.remove(pending.index);
        let group_index = active.ledger.assign(participant.name.clone());
        active.mode.advance();
        active.pending = None;

        let remaining = active.pool.len();
        let is_complete = remaining == 0;
        let reveal = Reveal {
            name: participant.name,
            participant_id: participant.id,
            group_index,
            remaining,
            is_complete,
        };
        active.last_reveal = Some(reveal.clone());

        debug!(
            "Revealed {} into group {} ({} remaining)",
            reveal.name,
            group_index + 1,
            remaining
        );
        if is_complete {
            info!(
                "Draw complete: {} members across {} groups",
                active.roster.len(),
                active.ledger.group_count()
            );
            self.phase = SessionPhase::Complete;
        } else {
            self.phase = SessionPhase::AwaitingReveal;
        }
        Ok(reveal)
    }

    /// Return to Setup, discarding everything derived from `prepare`.
    pub fn reset(&mut self) {
        if self.active.is_some() {
            info!("Session reset from phase {:?}", self.phase);
        }
        self.reset_state();
    }

    fn reset_state(&mut self) {
        self.active = None;
        self.phase = SessionPhase::Setup;
    }

    // --- Queries ---

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }

    /// The roster fixed at prepare time, if prepared.
    pub fn roster(&self) -> Option<&Roster> {
        self.active.as_ref().map(|a| &a.roster)
    }

    /// Participants not yet revealed, in pool order.
    pub fn pool(&self) -> &[Participant] {
        match &self.active {
            Some(active) => &active.pool,
            None => &[],
        }
    }

    /// Accumulated group membership. Empty before prepare.
    pub fn groups(&self) -> &[Vec<String>] {
        match &self.active {
            Some(active) => active.ledger.groups(),
            None => &[],
        }
    }

    pub fn current_group_index(&self) -> usize {
        self.active
            .as_ref()
            .map_or(0, |a| a.ledger.current_index())
    }

    pub fn mode(&self) -> Option<&DrawMode> {
        self.active.as_ref().map(|a| &a.mode)
    }

    /// The selection in flight, if any.
    pub fn pending(&self) -> Option<SelectionToken> {
        self.active.as_ref().and_then(|a| a.pending)
    }

    pub fn last_reveal(&self) -> Option<&Reveal> {
        self.active.as_ref().and_then(|a| a.last_reveal.as_ref())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            mode: self.mode().map(|m| {
                if m.is_directed() {
                    ModeKind::Directed
                } else {
                    ModeKind::Random
                }
            }),
            pool: self.pool().iter().map(|p| p.name.clone()).collect(),
            groups: self.groups().to_vec(),
            current_group_index: self.current_group_index(),
            is_complete: self.is_complete(),
            last_reveal: self.last_reveal().cloned(),
            sequence_cursor: self.mode().and_then(DrawMode::cursor),
        }
    }
}
