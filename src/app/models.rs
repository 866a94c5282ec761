use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// How an excluded folder entry is compared against a directory path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderMatch {
    /// Plain string prefix: `/v/projects` also excludes `/v/projects-and-roles`.
    #[default]
    Raw,
    /// Prefix must end on a path segment boundary.
    Segment,
}

/// Represents the final configuration for one scan, after merging the
/// persisted settings with per-run overrides. All paths are normalized.
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    pub excluded_folder_prefixes: Vec<String>,
    pub excluded_file_paths: HashSet<String>,
    pub folder_match: FolderMatch,
    pub sorted: bool,
}

/// Result of `list_files_with_tasks`.
#[derive(Debug, PartialEq, Eq)]
pub enum ListOutcome {
    /// Nothing matched; no file was written.
    NoFiles,
    Written { path: PathBuf, count: usize },
}
