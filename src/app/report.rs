use crate::app::error::{ScanError, ScanResult};
use crate::app::formatter::OutputGenerator;
use crate::app::models::{ListOutcome, ScanConfig};
use crate::app::scanner::Scanner;
use chrono::NaiveDate;
use std::path::Path;

/// Scans `root` and writes `todo-files-<date>.md` into it, one link per line.
///
/// An empty result writes nothing, so an earlier list for the same date
/// is left as it was.
pub async fn list_files_with_tasks(
    root: &Path,
    config: &ScanConfig,
    date: NaiveDate,
) -> ScanResult<ListOutcome> {
    let files = Scanner::new(root.to_path_buf(), config)
        .files_with_tasks()
        .await?;

    if files.is_empty() {
        return Ok(ListOutcome::NoFiles);
    }

    let path = root.join(OutputGenerator::output_file_name(date));
    let contents = OutputGenerator::generate_list(&files, root);
    tokio::fs::write(&path, contents)
        .await
        .map_err(|e| ScanError::io(&path, e))?;

    Ok(ListOutcome::Written {
        path,
        count: files.len(),
    })
}

pub async fn show_task_count(root: &Path, config: &ScanConfig) -> ScanResult<usize> {
    let files = Scanner::new(root.to_path_buf(), config)
        .files_with_tasks()
        .await?;
    Ok(files.len())
}
