// Draw selection: picks the pool position to reveal next.
//
// Random mode asks an injected entropy source for an index; directed mode
// looks up the next forced participant. Selection never mutates the pool.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use super::error::SessionError;
use super::roster::Participant;
use super::sequence::RevealSequence;

// ---------------------------------------------------------------------------
// Entropy
// ---------------------------------------------------------------------------

/// Source of random pool indices.
///
/// Implementations must return a value in `0..upper` when `upper > 0`.
pub trait EntropySource {
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Entropy backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandSource<R> {
    rng: R,
}

impl<R: Rng> RandSource<R> {
    pub fn new(rng: R) -> Self {
        RandSource { rng }
    }
}

impl RandSource<StdRng> {
    /// Seed from OS entropy.
    pub fn from_entropy() -> Self {
        RandSource::new(StdRng::from_entropy())
    }

    /// Reproducible draws for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        RandSource::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> EntropySource for RandSource<R> {
    fn next_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// How the next participant is chosen. Fixed when the session is prepared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawMode {
    Random,
    Directed {
        sequence: RevealSequence,
        /// Index into `sequence` of the next forced reveal.
        cursor: usize,
    },
}

impl DrawMode {
    pub fn is_directed(&self) -> bool {
        matches!(self, DrawMode::Directed { .. })
    }

    pub fn cursor(&self) -> Option<usize> {
        match self {
            DrawMode::Random => None,
            DrawMode::Directed { cursor, .. } => Some(*cursor),
        }
    }

    /// Move past the forced reveal that was just committed.
    pub(crate) fn advance(&mut self) {
        if let DrawMode::Directed { sequence, cursor } = self {
            *cursor = (*cursor + 1).min(sequence.len());
        }
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Choose the pool index to reveal next.
///
/// Returns `Ok(None)` for an empty pool. In directed mode the forced
/// participant is located by roster id; if it is missing from the pool the
/// session state is inconsistent and `ForcedParticipantNotInPool` is returned.
pub fn select(
    pool: &[Participant],
    mode: &DrawMode,
    entropy: &mut dyn EntropySource,
) -> Result<Option<usize>, SessionError> {
    if pool.is_empty() {
        return Ok(None);
    }

    match mode {
        DrawMode::Random => {
            let index = entropy.next_index(pool.len());
            if index >= pool.len() {
                warn!(
                    "Entropy source returned {} for a pool of {}, reducing modulo pool size",
                    index,
                    pool.len()
                );
            }
            Ok(Some(index % pool.len()))
        }
        DrawMode::Directed { sequence, cursor } => {
            let (name, id) = sequence.get(*cursor).ok_or_else(|| {
                SessionError::ForcedParticipantNotInPool(format!("<reveal #{}>", cursor + 1))
            })?;
            pool.iter()
                .position(|p| p.id == id)
                .map(Some)
                .ok_or_else(|| SessionError::ForcedParticipantNotInPool(name.to_string()))
        }
    }
}
