use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Settings;
use crate::content::State;
use crate::report::ReportFilter;

#[derive(Debug, Parser)]
#[command(name = "content-checker", author, version, about = "Validate course markdown content")]
pub struct Cli {
    /// Directory holding the content directory.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Stop after this many files with issues (negative: unlimited).
    #[arg(long, allow_negative_numbers = true)]
    pub max_errors: Option<i64>,

    /// Skip files with broken front matter instead of aborting.
    #[arg(long)]
    pub skip_broken: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Flags given on the command line win over loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(max_errors) = self.max_errors {
            settings.max_errors = max_errors;
        }
        if self.skip_broken {
            settings.skip_broken = true;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every course, chapter and page with its issues
    Print(PrintArgs),
    /// Print one line per issue; exits with 1 if any
    Errors,
    /// Page counts per course
    Stats(StatsArgs),
}

#[derive(Debug, Args)]
pub struct PrintArgs {
    /// Only pages in this state (repeatable).
    #[arg(long = "state", value_parser = parse_state)]
    pub states: Vec<State>,

    /// Only chapter index pages.
    #[arg(long, conflicts_with = "no_index")]
    pub index_only: bool,

    /// Leave chapter index pages out.
    #[arg(long)]
    pub no_index: bool,
}

impl PrintArgs {
    pub fn filter(&self) -> ReportFilter {
        ReportFilter {
            states: self.states.iter().copied().collect(),
            index: !self.no_index,
            non_index: !self.index_only,
        }
    }
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

fn parse_state(raw: &str) -> Result<State, String> {
    match State::parse(raw) {
        State::Unknown => Err(format!(
            "unknown state `{raw}`, expected stub, incomplete or complete"
        )),
        state => Ok(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_filter_flags() {
        let cli = Cli::try_parse_from([
            "content-checker",
            "print",
            "--state",
            "stub",
            "--state",
            "complete",
            "--no-index",
        ])
        .unwrap();

        let Command::Print(args) = cli.command else {
            panic!("expected print");
        };
        let filter = args.filter();
        assert_eq!(filter.states.len(), 2);
        assert!(filter.states.contains(&State::Stub));
        assert!(!filter.index);
        assert!(filter.non_index);
    }

    #[test]
    fn unknown_state_is_rejected() {
        assert!(Cli::try_parse_from(["content-checker", "print", "--state", "draft"]).is_err());
    }

    #[test]
    fn index_flags_conflict() {
        assert!(
            Cli::try_parse_from(["content-checker", "print", "--index-only", "--no-index"]).is_err()
        );
    }

    #[test]
    fn global_flags_override_settings() {
        let cli = Cli::try_parse_from([
            "content-checker",
            "--max-errors",
            "-1",
            "--skip-broken",
            "errors",
        ])
        .unwrap();

        let mut settings = Settings::default();
        cli.apply(&mut settings);
        assert_eq!(settings.max_errors, -1);
        assert!(settings.skip_broken);
        assert!(matches!(cli.command, Command::Errors));
    }
}
