//! Index schema: lists rules mapping target globs to sort policies.

use crate::error::{Result, SortlintError};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
/// Top-level index configuration.
pub struct Index {
    #[serde(default)]
    pub rules: Vec<RuleIndex>,
}

#[derive(Debug, Clone, Deserialize)]
/// A rule entry from the index.
pub struct RuleIndex {
    pub id: String,
    pub patterns: Vec<String>,
    pub policy: String,
}

impl Index {
    pub fn load(path: &Path) -> Result<Index> {
        let s = fs::read_to_string(path).map_err(|source| SortlintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&s).map_err(|source| SortlintError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl RuleIndex {
    /// Policy path, resolved relative to the index file.
    pub fn policy_path(&self, index_path: &Path) -> PathBuf {
        index_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(&self.policy)
    }

    /// Target files for this rule, sorted.
    ///
    /// Patterns from `overrides` (keyed by rule id) replace the index defaults.
    pub fn targets(
        &self,
        root: &Path,
        overrides: &HashMap<String, Vec<String>>,
    ) -> Result<Vec<PathBuf>> {
        let patterns = overrides.get(&self.id).unwrap_or(&self.patterns);
        let mut targets: Vec<PathBuf> = Vec::new();
        for pat in patterns {
            let pattern = root.join(pat).to_string_lossy().to_string();
            let entries = glob::glob(&pattern).map_err(|source| SortlintError::Glob {
                pattern: pat.clone(),
                source,
            })?;
            targets.extend(entries.flatten().filter(|p| p.is_file()));
        }
        targets.sort();
        targets.dedup();
        Ok(targets)
    }
}
