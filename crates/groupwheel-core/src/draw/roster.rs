// Roster parsing: comma-separated text into an ordered list of participants.

use serde::{Deserialize, Serialize};

/// A single participant in the draw.
///
/// Identity is the position in the parsed roster, so two participants may
/// share a name and still be distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// 0-based position in the original roster.
    pub id: usize,
    /// Display name, already trimmed.
    pub name: String,
}

/// The fixed, ordered list of participants for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Build a roster from raw text. See [`parse_names`] for the rules.
    pub fn parse(text: &str) -> Self {
        Self::from_names(parse_names(text))
    }

    /// Build a roster from already-cleaned names, assigning ids by position.
    pub fn from_names(names: Vec<String>) -> Self {
        let participants = names
            .into_iter()
            .enumerate()
            .map(|(id, name)| Participant { id, name })
            .collect();
        Roster { participants }
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Iterate over the names in roster order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.participants.iter().map(|p| p.name.as_str())
    }

    /// Number of participants sharing this exact name.
    pub fn count_name(&self, name: &str) -> usize {
        self.names().filter(|n| *n == name).count()
    }
}

/// Split on commas, trim each piece, and drop empty pieces.
///
/// Order is preserved and duplicates are kept. An empty result is not an
/// error here; callers decide what an empty roster means.
pub fn parse_names(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_and_drops_blanks() {
        let names = parse_names("  Budi , Ani,, ,Candra  ,");
        assert_eq!(names, vec!["Budi", "Ani", "Candra"]);
    }

    #[test]
    fn parse_keeps_duplicates_in_order() {
        let names = parse_names("A, B, A");
        assert_eq!(names, vec!["A", "B", "A"]);
    }

    #[test]
    fn parse_empty_and_whitespace_only() {
        assert!(parse_names("").is_empty());
        assert!(parse_names(" ,  , ").is_empty());
    }

    #[test]
    fn parse_keeps_inner_whitespace() {
        let names = parse_names("Mary Ann,  Jo  Jo ");
        assert_eq!(names, vec!["Mary Ann", "Jo  Jo"]);
    }

    #[test]
    fn roster_ids_follow_position() {
        let roster = Roster::parse("A, B, A");
        assert_eq!(roster.len(), 3);
        let ids: Vec<usize> = roster.participants().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(roster.participants()[2].name, "A");
    }

    #[test]
    fn roster_name_queries() {
        let roster = Roster::parse("A, B, A");
        assert_eq!(roster.count_name("A"), 2);
        assert_eq!(roster.count_name("Z"), 0);
    }
}
