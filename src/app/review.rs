use crate::app::error::{ScanError, ScanResult};
use crate::app::formatter::OutputGenerator;
use anyhow::{bail, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

#[derive(Debug, PartialEq, Eq)]
pub struct WeekRequest {
    pub end_date: NaiveDate,
    pub file: PathBuf,
}

/// `[END_DATE] PATH...`: a leading `YYYY-MM-DD` is taken as the end date,
/// everything else is joined into the note path.
pub fn parse_week_args(args: &[String], today: NaiveDate) -> Result<WeekRequest> {
    let Some(first) = args.first() else {
        bail!("A note path is required");
    };

    let (end_date, parts) = match NaiveDate::parse_from_str(first, "%Y-%m-%d") {
        Ok(date) => {
            if args.len() < 2 {
                bail!("An explicit end date must be followed by a note path");
            }
            (date, &args[1..])
        }
        Err(_) => (today, args),
    };

    let file: PathBuf = parts.iter().collect();
    Ok(WeekRequest { end_date, file })
}

/// Appends the completed-tasks query to `file`, creating it if needed.
pub async fn append_completion_query(file: &Path, end_date: NaiveDate) -> ScanResult<()> {
    let block = OutputGenerator::completion_query(end_date);
    let mut handle = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .await
        .map_err(|e| ScanError::io(file, e))?;
    handle
        .write_all(block.as_bytes())
        .await
        .map_err(|e| ScanError::io(file, e))?;
    handle.flush().await.map_err(|e| ScanError::io(file, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn leading_date_is_the_end_date() {
        let req = parse_week_args(&strings(&["2024-01-08", "journal", "week.md"]), today()).unwrap();
        assert_eq!(req.end_date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        assert_eq!(req.file, Path::new("journal").join("week.md"));
    }

    #[test]
    fn without_date_today_is_used() {
        let req = parse_week_args(&strings(&["notes", "review.md"]), today()).unwrap();
        assert_eq!(req.end_date, today());
        assert_eq!(req.file, Path::new("notes").join("review.md"));
    }

    #[test]
    fn date_alone_is_rejected() {
        assert!(parse_week_args(&strings(&["2024-01-08"]), today()).is_err());
        assert!(parse_week_args(&[], today()).is_err());
    }

    #[tokio::test]
    async fn appends_instead_of_overwriting() {
        let tmp = TempDir::new().unwrap();
        let note = tmp.path().join("review.md");
        fs::write(&note, "# Weekly review\n").unwrap();

        append_completion_query(&note, today()).await.unwrap();
        append_completion_query(&note, today()).await.unwrap();

        let content = fs::read_to_string(&note).unwrap();
        assert!(content.starts_with("# Weekly review\n```dataview\n"));
        assert_eq!(content.matches("```dataview").count(), 2);
        assert!(content.contains("WHERE completion = date(\"2024-06-03\")"));
    }

    #[tokio::test]
    async fn creates_missing_note() {
        let tmp = TempDir::new().unwrap();
        let note = tmp.path().join("new.md");

        append_completion_query(&note, today()).await.unwrap();
        assert_eq!(
            fs::read_to_string(&note).unwrap(),
            OutputGenerator::completion_query(today())
        );
    }
}
