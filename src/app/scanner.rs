use crate::app::error::{ScanError, ScanResult};
use crate::app::models::ScanConfig;
use crate::app::paths::{is_excluded_file, is_excluded_folder, normalize};
use std::future::Future;
use std::path::{Path, PathBuf};

/// An unchecked checklist item.
pub const TASK_MARKER: &str = "- [ ]";
/// Only files whose name ends with this (case-sensitive) are read.
pub const TRACKED_EXTENSION: &str = ".md";

/// Plain substring search. Indented, quoted or inline checkboxes all count.
pub fn has_incomplete_task(content: &str) -> bool {
    content.contains(TASK_MARKER)
}

/// Resolves `.`, `..` and symlinks in a vault root so walked paths share a
/// prefix with absolute exclusion entries. A missing root is an I/O error.
pub async fn canonical_root(root: &Path) -> ScanResult<PathBuf> {
    tokio::fs::canonicalize(root)
        .await
        .map_err(|e| ScanError::io(root, e))
}

pub struct Scanner {
    root: PathBuf,
    config: ScanConfig,
}

impl Scanner {
    pub fn new(root: PathBuf, config: &ScanConfig) -> Self {
        Self {
            root,
            config: config.clone(),
        }
    }

    /// Returns the normalized paths of every tracked file containing an
    /// incomplete task, in traversal order.
    pub async fn files_with_tasks(&self) -> ScanResult<Vec<String>> {
        self.walk(|path| async move {
            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| ScanError::io(&path, e))?;
            Ok::<_, ScanError>(has_incomplete_task(&content))
        })
        .await
    }

    /// Depth-first, pre-order walk from the root.
    ///
    /// Excluded folders are never listed, excluded files and files without the
    /// tracked extension are never handed to `visit`. Every candidate file is
    /// passed to `visit` one at a time; those for which it returns `true` are
    /// collected. The first error aborts the walk.
    ///
    /// Entries are visited in the order the filesystem lists them unless
    /// `ScanConfig::sorted` is set.
    pub async fn walk<F, Fut>(&self, mut visit: F) -> ScanResult<Vec<String>>
    where
        F: FnMut(PathBuf) -> Fut,
        Fut: Future<Output = ScanResult<bool>>,
    {
        let mut matches = Vec::new();
        let mut stack: Vec<std::vec::IntoIter<PathBuf>> = Vec::new();

        if let Some(entries) = self.enter_dir(&self.root).await? {
            stack.push(entries.into_iter());
        }

        while let Some(entries) = stack.last_mut() {
            let Some(path) = entries.next() else {
                stack.pop();
                continue;
            };

            // lstat: a symlink to a directory is not descended into
            let file_type = tokio::fs::symlink_metadata(&path)
                .await
                .map_err(|e| ScanError::io(&path, e))?
                .file_type();

            if file_type.is_dir() {
                if let Some(children) = self.enter_dir(&path).await? {
                    stack.push(children.into_iter());
                }
                continue;
            }

            let normalized = normalize(&path);
            if is_excluded_file(&normalized, &self.config.excluded_file_paths) {
                log::debug!("Skipping excluded file {}", normalized);
                continue;
            }
            if !normalized.ends_with(TRACKED_EXTENSION) {
                continue;
            }

            if visit(path).await? {
                matches.push(normalized);
            }
        }

        Ok(matches)
    }

    /// Lists a directory unless it falls under an excluded folder prefix.
    async fn enter_dir(&self, dir: &Path) -> ScanResult<Option<Vec<PathBuf>>> {
        let normalized = normalize(dir);
        if is_excluded_folder(
            &normalized,
            &self.config.excluded_folder_prefixes,
            self.config.folder_match,
        ) {
            log::debug!("Skipping excluded folder {}", normalized);
            return Ok(None);
        }

        let mut read_dir = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| ScanError::io(dir, e))?;
        let mut entries = Vec::new();
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| ScanError::io(dir, e))?
        {
            entries.push(entry.path());
        }

        if self.config.sorted {
            entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        }

        Ok(Some(entries))
    }
}
