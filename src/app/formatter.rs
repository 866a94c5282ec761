use crate::app::paths::normalize;
use chrono::{Duration, NaiveDate};
use pathdiff::diff_paths;
use std::path::Path;

pub struct OutputGenerator;

impl OutputGenerator {
    /// `/vault/a/b.md` under `/vault` becomes `[[a/b]]`.
    pub fn to_link(file_path: &str, root: &Path) -> String {
        let file_path = Path::new(file_path);
        let relative = diff_paths(file_path, root).unwrap_or_else(|| file_path.to_path_buf());
        let relative = normalize(relative);
        format!("[[{}]]", strip_md_extension(&relative))
    }

    pub fn generate_list(files: &[String], root: &Path) -> String {
        files
            .iter()
            .map(|f| Self::to_link(f, root))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn output_file_name(date: NaiveDate) -> String {
        format!("todo-files-{}.md", date.format("%Y-%m-%d"))
    }

    /// Dataview block listing tasks completed on any of the eight days from
    /// `end_date - 7` up to and including `end_date`.
    pub fn completion_query(end_date: NaiveDate) -> String {
        let start = end_date - Duration::days(7);
        let mut lines = vec!["```dataview".to_string(), "TASK".to_string()];

        for offset in 0..=7 {
            let date = (start + Duration::days(offset)).format("%Y-%m-%d");
            let keyword = if offset == 0 { "WHERE" } else { "OR" };
            lines.push(format!("{} completion = date(\"{}\")", keyword, date));
        }

        lines.push("AND completion != null".to_string());
        lines.push("SORT completion ASC".to_string());
        lines.push("```".to_string());

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn strip_md_extension(path: &str) -> &str {
    let len = path.len();
    if len >= 3 && path.is_char_boundary(len - 3) && path[len - 3..].eq_ignore_ascii_case(".md") {
        &path[..len - 3]
    } else {
        path
    }
}
