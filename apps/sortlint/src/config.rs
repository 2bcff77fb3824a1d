//! Configuration discovery and effective settings resolution.
//!
//! Sortlint reads `sortlint.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config. Defaults:
//! - `index`: none (must be configured)
//! - `output`: `human`
//! - `format.write|diff|check`: false
//! - `log.level`: `warn` (`SORTLINT_LOG` overrides)
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{Result, SortlintError};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILES: [&str; 3] = ["sortlint.toml", "sortlint.yaml", "sortlint.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Formatting-related configuration section under `[format]`.
pub struct FormatCfg {
    pub write: Option<bool>,
    pub diff: Option<bool>,
    pub check: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Logging section under `[log]`.
pub struct LogCfg {
    pub level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `sortlint.toml|yaml`.
pub struct SortlintConfig {
    pub index: Option<String>,
    pub output: Option<String>,
    pub format: Option<FormatCfg>,
    #[serde(default)]
    pub rules: Option<HashMap<String, RulePatternOverride>>, // [rules.<id>].patterns
    pub log: Option<LogCfg>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct RulePatternOverride {
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub index: Option<String>,
    pub config_found: bool,
    pub output: String,
    pub write: bool,
    pub diff: bool,
    pub check: bool,
    pub log_level: String,
    pub pattern_overrides: HashMap<String, Vec<String>>, // id -> patterns
}

impl Effective {
    pub fn index(&self) -> Result<&str> {
        self.index.as_deref().ok_or(SortlintError::IndexNotConfigured)
    }
}

#[derive(Debug, Default, Clone)]
/// Values passed on the command line; `None` defers to the config file.
pub struct CliOverrides<'a> {
    pub repo_root: Option<&'a str>,
    pub index: Option<&'a str>,
    pub output: Option<&'a str>,
    pub write: Option<bool>,
    pub diff: Option<bool>,
    pub check: Option<bool>,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `sortlint.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|name| cur.join(name).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `SortlintConfig` from `sortlint.toml` or `sortlint.yaml|yml` if present.
pub fn load_config(root: &Path) -> Result<Option<SortlintConfig>> {
    for name in CONFIG_FILES {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        let s = fs::read_to_string(&path).map_err(|source| SortlintError::Io {
            path: path.clone(),
            source,
        })?;
        let cfg: SortlintConfig = if name.ends_with(".toml") {
            toml::from_str(&s).map_err(|source| SortlintError::Toml { path, source })?
        } else {
            serde_yaml::from_str(&s).map_err(|source| SortlintError::Yaml { path, source })?
        };
        return Ok(Some(cfg));
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides<'_>) -> Result<Effective> {
    let start = PathBuf::from(cli.repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();
    tracing::debug!(root = %repo_root.display(), config_found, "resolved repository root");

    let index = cli.index.map(|s| s.to_string()).or(cfg.index);
    let output = cli
        .output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let write = cli
        .write
        .or_else(|| cfg.format.as_ref().and_then(|f| f.write))
        .unwrap_or(false);
    let diff = cli
        .diff
        .or_else(|| cfg.format.as_ref().and_then(|f| f.diff))
        .unwrap_or(false);
    let check = cli
        .check
        .or_else(|| cfg.format.as_ref().and_then(|f| f.check))
        .unwrap_or(false);
    let log_level = cfg
        .log
        .and_then(|l| l.level)
        .unwrap_or_else(|| "warn".to_string());

    let pattern_overrides = cfg
        .rules
        .unwrap_or_default()
        .into_iter()
        .map(|(id, ov)| (id, ov.patterns))
        .collect::<HashMap<_, _>>();

    Ok(Effective {
        repo_root,
        index,
        config_found,
        output,
        write,
        diff,
        check,
        log_level,
        pattern_overrides,
    })
}
