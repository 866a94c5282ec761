// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
pub mod paths;
pub mod report;
pub mod review;
pub mod scanner;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::env;
use std::path::PathBuf;

use self::cli::{Cli, Command, SettingsAction};
use self::config::{default_settings_path, resolve_config, Settings};
use self::models::ListOutcome;

/// Initializes components and orchestrates data flow.
pub async fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Load Settings
    let settings_path = match &args.settings {
        Some(path) => path.clone(),
        None => default_settings_path()?,
    };
    let mut settings = Settings::load(&settings_path)?;

    // 3. Dispatch
    match &args.command {
        Command::List { date } => {
            let root = vault_root(&args).await?;
            let config = resolve_config(&args, &settings, &root);
            let date = date.unwrap_or_else(|| Local::now().date_naive());

            log::info!("Scanning {} for open tasks", root.display());
            match report::list_files_with_tasks(&root, &config, date).await? {
                ListOutcome::NoFiles => log::warn!("No files with tasks found."),
                ListOutcome::Written { path, count } => {
                    log::info!("Found {} files with tasks", count);
                    let name = path.file_name().unwrap_or_default().to_string_lossy();
                    println!("Files with tasks have been written to {}", name);
                }
            }
        }
        Command::Count => {
            let root = vault_root(&args).await?;
            let config = resolve_config(&args, &settings, &root);

            log::info!("Scanning {} for open tasks", root.display());
            let count = report::show_task_count(&root, &config).await?;
            println!("Total number of files with tasks: {}", count);
        }
        Command::Settings { action } => {
            if edit_settings(&mut settings, action) {
                settings.save(&settings_path)?;
                log::info!("Saved settings to {}", settings_path.display());
            }
        }
        Command::CompletedWeek { args: week_args } => {
            let request = review::parse_week_args(week_args, Local::now().date_naive())?;
            review::append_completion_query(&request.file, request.end_date).await?;
            println!("Appended dataview block to {}", request.file.display());
        }
    }

    Ok(())
}

/// Applies a settings command. Returns true when the settings changed.
fn edit_settings(settings: &mut Settings, action: &SettingsAction) -> bool {
    match action {
        SettingsAction::Show => {
            println!("Excluded folders:");
            for folder in &settings.excluded_folders {
                println!("  {}", folder);
            }
            println!("Excluded files:");
            for file in &settings.excluded_files {
                println!("  {}", file);
            }
            println!("Folder match: {:?}", settings.folder_match);
            println!("Sorted: {}", settings.sorted);
            false
        }
        SettingsAction::AddFolder { path } => report_change(settings.add_folder(path), path),
        SettingsAction::RemoveFolder { path } => report_change(settings.remove_folder(path), path),
        SettingsAction::AddFile { path } => report_change(settings.add_file(path), path),
        SettingsAction::RemoveFile { path } => report_change(settings.remove_file(path), path),
        SettingsAction::Reset => {
            settings.reset();
            true
        }
    }
}

fn report_change(changed: bool, path: &str) -> bool {
    if !changed {
        log::warn!("Nothing to change for '{}'", path);
    }
    changed
}

/// Absolute, canonical vault root. Exclusion entries are compared against
/// paths built from it, so `.` and `..` segments must not survive.
async fn vault_root(args: &Cli) -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let root = match &args.vault {
        Some(vault) => current_dir.join(vault),
        None => current_dir,
    };
    Ok(scanner::canonical_root(&root).await?)
}
