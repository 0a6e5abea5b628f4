// Group ledger: round-robin assignment of revealed participants to groups.

use serde::{Deserialize, Serialize};

/// Per-group membership plus the pointer to the group receiving the next
/// reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupLedger {
    groups: Vec<Vec<String>>,
    current: usize,
}

impl GroupLedger {
    /// Create `group_count` empty groups. The count is validated by the
    /// session before a ledger is built.
    pub fn new(group_count: usize) -> Self {
        debug_assert!(group_count >= 1, "group count must be positive");
        GroupLedger {
            groups: vec![Vec::new(); group_count.max(1)],
            current: 0,
        }
    }

    /// Append `name` to the current group and rotate to the next one.
    ///
    /// Returns the index of the group that received the name.
    pub fn assign(&mut self, name: impl Into<String>) -> usize {
        let index = self.current;
        self.groups[index].push(name.into());
        self.current = (self.current + 1) % self.groups.len();
        index
    }

    /// Index of the group that will receive the next reveal.
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn groups(&self) -> &[Vec<String>] {
        &self.groups
    }
}
