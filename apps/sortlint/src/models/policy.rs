//! Policy schema used by lint and format passes.
//!
//! A policy is a list of `[[sort]]` entries. Each entry names what to sort
//! (`kind`), where (`paths`, `recursive`), and how (`order`, `params`), plus
//! optional lint `message` and `level`:
//!
//! ```toml
//! [[sort]]
//! kind = "object-keys"
//! paths = ["$.dependencies", "$.devDependencies"]
//! order = "asc"
//! params = { caseSensitive = false, natural = true }
//! level = "error"
//! ```
//!
//! `message` may use `{key}`, `{previous}` and `{order}` placeholders.

use crate::engine::{SortConfig, SortOrder};
use crate::error::{Result, SortlintError};
use crate::extract::{Selector, SortKind};
use crate::models::Severity;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
/// Root policy loaded from TOML files referenced by the index.
pub struct Policy {
    #[serde(default)]
    pub sort: Vec<SortRule>,
}

#[derive(Debug, Clone, Deserialize)]
/// One sort requirement.
pub struct SortRule {
    pub kind: SortKind,
    #[serde(default = "default_paths")]
    pub paths: Vec<String>,
    #[serde(default)]
    pub recursive: bool,
    #[serde(default)]
    pub order: SortOrder,
    #[serde(default)]
    pub params: SortParams,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub level: Option<Severity>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Comparison parameters (`caseSensitive`, `natural`).
pub struct SortParams {
    #[serde(default = "default_true")]
    pub case_sensitive: bool,
    #[serde(default)]
    pub natural: bool,
}

impl Default for SortParams {
    fn default() -> Self {
        SortParams {
            case_sensitive: true,
            natural: false,
        }
    }
}

fn default_paths() -> Vec<String> {
    vec!["$".to_string()]
}

fn default_true() -> bool {
    true
}

impl Policy {
    pub fn load(path: &Path) -> Result<Policy> {
        let s = fs::read_to_string(path).map_err(|source| SortlintError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&s).map_err(|source| SortlintError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Every rule paired with its parsed selectors; fails on the first bad path.
    pub fn prepared(&self) -> Result<Vec<(&SortRule, Vec<Selector>)>> {
        self.sort
            .iter()
            .map(|rule| rule.selectors().map(|sels| (rule, sels)))
            .collect()
    }
}

impl SortRule {
    pub fn config(&self) -> SortConfig {
        SortConfig {
            order: self.order,
            case_sensitive: self.params.case_sensitive,
            natural: self.params.natural,
        }
    }

    pub fn selectors(&self) -> Result<Vec<Selector>> {
        self.paths.iter().map(|p| Selector::parse(p)).collect()
    }

    pub fn severity(&self) -> Severity {
        self.level.unwrap_or_default()
    }

    /// Render the lint message for `key` placed after `previous`.
    pub fn render_message(&self, key: &str, previous: &str) -> String {
        if let Some(tpl) = &self.message {
            return tpl
                .replace("{key}", key)
                .replace("{previous}", previous)
                .replace("{order}", self.order.as_str());
        }
        let mut opts = String::new();
        if !self.params.case_sensitive {
            opts.push_str("insensitive ");
        }
        if self.params.natural {
            opts.push_str("natural ");
        }
        format!(
            "Expected {} to be in {}ending {}order. '{}' should be before '{}'.",
            self.kind.noun(),
            self.order.as_str(),
            opts,
            key,
            previous
        )
    }
}
