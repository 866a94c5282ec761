use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Find markdown notes that still contain open tasks"
)]
pub struct Cli {
    /// Vault root to scan (defaults to the current directory)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Settings file (defaults to ~/.config/todo_scan/settings.toml)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Extra folders to exclude for this run only
    #[arg(long, global = true, num_args = 1..)]
    pub exclude_folder: Option<Vec<String>>,

    /// Extra files to exclude for this run only
    #[arg(long, global = true, num_args = 1..)]
    pub exclude_file: Option<Vec<String>>,

    /// Only exclude folders whose path matches an entry up to a '/' boundary
    #[arg(long, global = true)]
    pub segment_match: bool,

    /// Visit directory entries in name order
    #[arg(long, global = true)]
    pub sorted: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write links to every file with open tasks into todo-files-<date>.md
    List {
        /// Date used in the output file name (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Print how many files contain open tasks
    Count,
    /// Inspect or edit the persisted exclusion lists
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Append a Dataview query for tasks completed in the last 7 days
    CompletedWeek {
        /// Optional end date (YYYY-MM-DD) followed by the note path
        #[arg(required = true, num_args = 1..)]
        args: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Print the current settings
    Show,
    AddFolder { path: String },
    RemoveFolder { path: String },
    AddFile { path: String },
    RemoveFile { path: String },
    /// Restore the default (empty) settings
    Reset,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD ({})", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_date_is_parsed_by_clap() {
        let cli = Cli::try_parse_from(["todo_scan", "list", "--date", "2024-02-29"]).unwrap();
        match cli.command {
            Command::List { date } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29));
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn invalid_list_date_is_rejected_at_parse_time() {
        assert!(Cli::try_parse_from(["todo_scan", "list", "--date", "2023-02-29"]).is_err());
        assert!(Cli::try_parse_from(["todo_scan", "list", "--date", "17/05/2024"]).is_err());
    }
}
