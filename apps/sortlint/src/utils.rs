//! Supporting helpers: message prefixes, path display, JSON loading.

use crate::error::{Result, SortlintError};
use owo_colors::OwoColorize;
use serde_json::Value as Json;
use std::fs;
use std::path::Path;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if colors_enabled() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors_enabled() {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

pub fn info_prefix() -> String {
    if colors_enabled() {
        "info:".blue().bold().to_string()
    } else {
        "info:".to_string()
    }
}

/// `path` relative to `root` when possible, for stable output.
pub fn display_path(root: &Path, path: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .filter(|rel| !rel.starts_with(".."))
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}

pub fn read_json(path: &Path) -> Result<Json> {
    let data = fs::read_to_string(path).map_err(|source| SortlintError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| SortlintError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_display_path_relative_inside_root() {
        let root = PathBuf::from("/repo");
        assert_eq!(display_path(&root, Path::new("/repo/a/b.json")), "a/b.json");
        assert_eq!(display_path(&root, Path::new("/elsewhere/c.json")), "/elsewhere/c.json");
    }

    #[test]
    fn test_read_json_errors() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{ nope").unwrap();
        assert_eq!(read_json(&bad).unwrap_err().rule_id(), "parse-json");
        assert_eq!(
            read_json(&dir.path().join("missing.json")).unwrap_err().rule_id(),
            "read-file"
        );
    }
}
