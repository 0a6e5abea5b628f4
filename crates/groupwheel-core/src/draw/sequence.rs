// Director-mode reveal sequence validation.
//
// A candidate sequence is accepted only if every name is on the roster and
// the sequence is exactly as long as the roster. Each entry is then bound
// to a concrete roster position so duplicate names stay unambiguous.

use std::collections::{HashMap, HashSet, VecDeque};

use super::error::SessionError;
use super::roster::Roster;

/// A validated reveal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealSequence {
    names: Vec<String>,
    ids: Vec<usize>,
}

impl RevealSequence {
    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }

    /// The names in reveal order, exactly as entered.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Name and roster id of the entry at `cursor`.
    pub fn get(&self, cursor: usize) -> Option<(&str, usize)> {
        let name = self.names.get(cursor)?;
        let id = self.ids.get(cursor)?;
        Some((name.as_str(), *id))
    }
}

/// Validate `candidate` against `roster`.
///
/// Checks run in a fixed order: unknown names (first offender wins), then
/// length, then names used more often than the roster holds them.
pub fn validate(candidate: Vec<String>, roster: &Roster) -> Result<RevealSequence, SessionError> {
    let known: HashSet<&str> = roster.names().collect();
    if let Some(unknown) = candidate.iter().find(|name| !known.contains(name.as_str())) {
        return Err(SessionError::UnknownParticipant(unknown.clone()));
    }

    if candidate.len() != roster.len() {
        return Err(SessionError::SequenceLengthMismatch {
            expected: roster.len(),
            actual: candidate.len(),
        });
    }

    // k-th occurrence in the sequence claims the k-th roster slot with that name
    let mut slots: HashMap<&str, VecDeque<usize>> = HashMap::new();
    for p in roster.participants() {
        slots.entry(p.name.as_str()).or_default().push_back(p.id);
    }

    let mut ids = Vec::with_capacity(candidate.len());
    for name in &candidate {
        let next = slots.get_mut(name.as_str()).and_then(VecDeque::pop_front);
        match next {
            Some(id) => ids.push(id),
            None => {
                return Err(SessionError::SequenceNameOverused {
                    name: name.clone(),
                    roster_count: roster.count_name(name),
                    sequence_count: candidate.iter().filter(|n| *n == name).count(),
                });
            }
        }
    }

    Ok(RevealSequence {
        names: candidate,
        ids,
    })
}
