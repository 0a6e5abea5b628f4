// Command-line arguments. Values given here override the config file.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, DEFAULT_CONFIG_PATH};

#[derive(Debug, Parser)]
#[command(name = "groupwheel")]
#[command(about = "Spin a wheel to split members into groups")]
pub struct Cli {
    #[arg(long, help = "Path to the config file", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
    #[arg(long, help = "Comma-separated member names")]
    pub members: Option<String>,
    #[arg(long, help = "Comma-separated reveal order (director mode)")]
    pub sequence: Option<String>,
    #[arg(long, help = "Number of groups", allow_negative_numbers = true)]
    pub groups: Option<i64>,
    #[arg(long, help = "Seed for reproducible random draws")]
    pub seed: Option<u64>,
    #[arg(
        long,
        help = "Run every draw without the terminal UI and print the groups",
        default_value_t = false
    )]
    pub headless: bool,
}

impl Cli {
    /// Overlay any values given on the command line onto `config`.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(members) = &self.members {
            config.roster.members = members.clone();
        }
        if let Some(sequence) = &self.sequence {
            config.roster.sequence = sequence.clone();
        }
        if let Some(groups) = self.groups {
            config.roster.group_count = groups;
        }
        if let Some(seed) = self.seed {
            config.wheel.seed = Some(seed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_config_untouched() {
        let cli = Cli::parse_from(["groupwheel"]);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(!cli.headless);
        let mut config = Config::default();
        cli.apply_to(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::parse_from([
            "groupwheel",
            "--members",
            "A, B, C",
            "--sequence",
            "C, B, A",
            "--groups",
            "2",
            "--seed",
            "7",
            "--headless",
        ]);
        let mut config = Config::default();
        cli.apply_to(&mut config);
        assert_eq!(config.roster.members, "A, B, C");
        assert_eq!(config.roster.sequence, "C, B, A");
        assert_eq!(config.roster.group_count, 2);
        assert_eq!(config.wheel.seed, Some(7));
        assert!(cli.headless);
    }

    #[test]
    fn negative_group_count_parses() {
        let cli = Cli::parse_from(["groupwheel", "--groups", "-1"]);
        assert_eq!(cli.groups, Some(-1));
    }
}
