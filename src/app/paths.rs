use crate::app::models::FolderMatch;
use std::collections::HashSet;
use std::path::Path;

/// Converts every `\` to `/`. No other canonicalization is done.
pub fn normalize(path: impl AsRef<Path>) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

pub fn is_excluded_folder(normalized_dir: &str, prefixes: &[String], mode: FolderMatch) -> bool {
    prefixes.iter().any(|prefix| match mode {
        FolderMatch::Raw => normalized_dir.starts_with(prefix.as_str()),
        FolderMatch::Segment => matches_segment(normalized_dir, prefix),
    })
}

pub fn is_excluded_file(normalized_file: &str, excluded: &HashSet<String>) -> bool {
    excluded.contains(normalized_file)
}

fn matches_segment(dir: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        // "/" excludes everything under the filesystem root
        return dir.starts_with('/');
    }
    match dir.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalize_converts_backslashes() {
        assert_eq!(normalize(r"G:\Data\ToDo\a.md"), "G:/Data/ToDo/a.md");
        assert_eq!(normalize("/vault/a.md"), "/vault/a.md");
    }

    #[test]
    fn raw_prefix_matches_sibling_with_longer_name() {
        let excluded = prefixes(&["/vault/projects"]);
        assert!(is_excluded_folder("/vault/projects", &excluded, FolderMatch::Raw));
        assert!(is_excluded_folder("/vault/projects/sub", &excluded, FolderMatch::Raw));
        assert!(is_excluded_folder(
            "/vault/projects-and-roles",
            &excluded,
            FolderMatch::Raw
        ));
        assert!(!is_excluded_folder("/vault/notes", &excluded, FolderMatch::Raw));
    }

    #[test]
    fn segment_prefix_stops_at_boundaries() {
        let excluded = prefixes(&["/vault/projects", "/vault/daily/"]);
        let mode = FolderMatch::Segment;
        assert!(is_excluded_folder("/vault/projects", &excluded, mode));
        assert!(is_excluded_folder("/vault/projects/sub", &excluded, mode));
        assert!(!is_excluded_folder("/vault/projects-and-roles", &excluded, mode));
        assert!(is_excluded_folder("/vault/daily", &excluded, mode));
        assert!(is_excluded_folder("/vault/daily/2024", &excluded, mode));
    }

    #[test]
    fn no_prefixes_excludes_nothing() {
        assert!(!is_excluded_folder("/vault", &[], FolderMatch::Raw));
        assert!(!is_excluded_folder("/vault", &[], FolderMatch::Segment));
    }

    #[test]
    fn file_exclusion_is_exact() {
        let excluded: HashSet<String> = ["/vault/CLAUDE.md".to_string()].into_iter().collect();
        assert!(is_excluded_file("/vault/CLAUDE.md", &excluded));
        assert!(!is_excluded_file("/vault/CLAUDE.md.bak", &excluded));
        assert!(!is_excluded_file("/vault/sub/CLAUDE.md", &excluded));
    }
}
