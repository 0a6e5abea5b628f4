// Headless runner: performs every draw without the terminal UI and prints
// the resulting groups.

use std::io::Write;

use anyhow::Context;
use serde::Serialize;
use tracing::info;

use groupwheel_core::draw::session::{GameSession, Reveal};

use crate::config::Config;

/// Final group listing printed after the last reveal.
#[derive(Debug, Serialize)]
pub struct GroupsReport {
    pub groups: Vec<GroupEntry>,
}

#[derive(Debug, Serialize)]
pub struct GroupEntry {
    /// 1-based group number.
    pub group: usize,
    pub members: Vec<String>,
}

impl GroupsReport {
    pub fn from_groups(groups: &[Vec<String>]) -> Self {
        GroupsReport {
            groups: groups
                .iter()
                .enumerate()
                .map(|(i, members)| GroupEntry {
                    group: i + 1,
                    members: members.clone(),
                })
                .collect(),
        }
    }
}

/// Prepare from `config`, reveal everyone, and write a line per reveal
/// followed by the groups as JSON.
pub fn run(
    session: &mut GameSession,
    config: &Config,
    out: &mut impl Write,
) -> anyhow::Result<Vec<Reveal>> {
    let roster = &config.roster;
    session
        .prepare(&roster.members, &roster.sequence, roster.group_count)
        .context("invalid setup")?;

    let mut reveals = Vec::new();
    while let Some(token) = session.draw().context("draw failed")? {
        let reveal = session.commit_selection(token)?;
        writeln!(
            out,
            "{} -> Group {} ({} remaining)",
            reveal.name,
            reveal.group_index + 1,
            reveal.remaining
        )?;
        reveals.push(reveal);
    }

    let report = GroupsReport::from_groups(session.groups());
    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    info!("Headless run finished with {} reveals", reveals.len());
    Ok(reveals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RosterConfig;
    use groupwheel_core::draw::selector::RandSource;
    use groupwheel_core::draw::SessionError;

    fn config(members: &str, sequence: &str, group_count: i64) -> Config {
        Config {
            roster: RosterConfig {
                members: members.into(),
                sequence: sequence.into(),
                group_count,
            },
            ..Default::default()
        }
    }

    #[test]
    fn directed_run_prints_reveals_and_groups() {
        let mut session = GameSession::new(RandSource::seeded(1));
        let mut out = Vec::new();
        let reveals = run(&mut session, &config("A, B, C", "C, A, B", 2), &mut out).unwrap();
        assert_eq!(reveals.len(), 3);

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("C -> Group 1 (2 remaining)"));
        assert_eq!(lines.next(), Some("A -> Group 2 (1 remaining)"));
        assert_eq!(lines.next(), Some("B -> Group 1 (0 remaining)"));

        let json_start = text.find('{').unwrap();
        let report: serde_json::Value = serde_json::from_str(&text[json_start..]).unwrap();
        assert_eq!(report["groups"][0]["group"], 1);
        assert_eq!(report["groups"][0]["members"], serde_json::json!(["C", "B"]));
        assert_eq!(report["groups"][1]["members"], serde_json::json!(["A"]));
        assert!(session.is_complete());
    }

    #[test]
    fn setup_error_is_reported() {
        let mut session = GameSession::new(RandSource::seeded(1));
        let mut out = Vec::new();
        let err = run(&mut session, &config("A, B", "A, Z", 1), &mut out).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SessionError>(),
            Some(&SessionError::UnknownParticipant("Z".into()))
        );
        assert!(out.is_empty());
    }
}
