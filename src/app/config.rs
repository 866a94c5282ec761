use crate::app::cli::Cli;
use crate::app::error::{ScanError, ScanResult};
use crate::app::models::{FolderMatch, ScanConfig};
use crate::app::paths::normalize;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Persisted exclusion lists and scan options.
///
/// Keys present in the file replace the defaults entirely; missing keys
/// fall back to them.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub excluded_folders: Vec<String>,
    pub excluded_files: Vec<String>,
    pub folder_match: FolderMatch,
    pub sorted: bool,
}

pub fn default_settings_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("todo_scan").join("settings.toml"))
}

impl Settings {
    pub fn load(path: &Path) -> ScanResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ScanError::io(path, e)),
        };
        toml::from_str(&content).map_err(|e| ScanError::config(path, e.to_string()))
    }

    pub fn save(&self, path: &Path) -> ScanResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ScanError::io(parent, e))?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ScanError::config(path, e.to_string()))?;
        fs::write(path, content).map_err(|e| ScanError::io(path, e))
    }

    /// Returns false if the folder was already listed.
    pub fn add_folder(&mut self, folder: &str) -> bool {
        add_entry(&mut self.excluded_folders, folder)
    }

    pub fn remove_folder(&mut self, folder: &str) -> bool {
        remove_entry(&mut self.excluded_folders, folder)
    }

    pub fn add_file(&mut self, file: &str) -> bool {
        add_entry(&mut self.excluded_files, file)
    }

    pub fn remove_file(&mut self, file: &str) -> bool {
        remove_entry(&mut self.excluded_files, file)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn add_entry(list: &mut Vec<String>, entry: &str) -> bool {
    let entry = normalize(entry);
    if list.contains(&entry) {
        return false;
    }
    list.push(entry);
    true
}

fn remove_entry(list: &mut Vec<String>, entry: &str) -> bool {
    let entry = normalize(entry);
    let before = list.len();
    list.retain(|item| *item != entry);
    list.len() != before
}

fn merge_vecs(saved: &[String], cli_vec: Option<&Vec<String>>) -> Vec<String> {
    let mut combined = saved.to_vec();
    if let Some(cli_items) = cli_vec {
        combined.extend(cli_items.iter().cloned());
    }
    // Deduplicate while keeping order
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

/// Anchors a settings entry to the vault root unless it is already absolute.
/// Drive-letter paths (`G:/...`) count as absolute on every platform.
fn resolve_entry(entry: &str, root: &Path) -> String {
    let normalized = normalize(entry);
    let bytes = normalized.as_bytes();
    let has_drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
    if Path::new(&normalized).is_absolute() || normalized.starts_with('/') || has_drive {
        normalized
    } else {
        normalize(root.join(&normalized))
    }
}

fn resolve_entries(entries: Vec<String>, root: &Path, kind: &str) -> Vec<String> {
    entries
        .into_iter()
        .filter(|entry| {
            let blank = entry.trim().is_empty();
            if blank {
                log::warn!("Ignoring blank excluded {} entry", kind);
            }
            !blank
        })
        .map(|entry| resolve_entry(&entry, root))
        .collect()
}

/// Builds the configuration for one scan from the saved settings and the
/// per-run command-line overrides.
pub fn resolve_config(cli: &Cli, settings: &Settings, root: &Path) -> ScanConfig {
    let folders = merge_vecs(&settings.excluded_folders, cli.exclude_folder.as_ref());
    let files = merge_vecs(&settings.excluded_files, cli.exclude_file.as_ref());

    ScanConfig {
        excluded_folder_prefixes: resolve_entries(folders, root, "folder"),
        excluded_file_paths: resolve_entries(files, root, "file").into_iter().collect(),
        folder_match: if cli.segment_match {
            FolderMatch::Segment
        } else {
            settings.folder_match
        },
        sorted: cli.sorted || settings.sorted,
    }
}
