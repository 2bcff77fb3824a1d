//! Lint runner for sort-order policies.
//!
//! Produces a `LintResult` with issues and a summary. Each node selected by a
//! policy entry is handed to its extractor and, when the extractor accepts it,
//! checked by the engine; every diagnostic becomes one issue located at the
//! misplaced member.

use crate::engine;
use crate::error::Result;
use crate::extract::{collect_targets, Selector};
use crate::models::index::{Index, RuleIndex};
use crate::models::policy::{Policy, SortRule};
use crate::models::{Issue, LintResult};
use crate::utils::{display_path, read_json};
use rayon::prelude::*;
use serde_json::Value as Json;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Run lint across files matched by the index.
///
/// Missing or invalid policies and unreadable targets are reported as
/// `error` issues; only a missing or invalid index aborts the run.
pub fn run_lint(
    repo_root: &Path,
    index_path: &str,
    patterns_override: &HashMap<String, Vec<String>>,
) -> Result<LintResult> {
    let idx_path = repo_root.join(index_path);
    let index = Index::load(&idx_path)?;

    let mut issues: Vec<Issue> = Vec::new();
    let mut files_count: usize = 0;

    // Cache policies across rules by path to avoid repeated I/O and parse when shared
    let mut policy_cache: HashMap<PathBuf, Policy> = HashMap::new();
    for ri in &index.rules {
        lint_rule(
            repo_root,
            &idx_path,
            ri,
            &mut issues,
            &mut files_count,
            &mut policy_cache,
            patterns_override,
        );
    }

    // Stable: issues of one file keep rule then document order.
    issues.sort_by(|a, b| a.file.cmp(&b.file));
    let result = LintResult::new(issues, files_count);
    info!(
        files = result.summary.files,
        errors = result.summary.errors,
        warnings = result.summary.warnings,
        "lint finished"
    );
    Ok(result)
}

/// Lint a single indexed rule against its targets, collecting issues.
fn lint_rule(
    root: &Path,
    idx_path: &Path,
    ri: &RuleIndex,
    issues: &mut Vec<Issue>,
    files_count: &mut usize,
    policy_cache: &mut HashMap<PathBuf, Policy>,
    patterns_override: &HashMap<String, Vec<String>>,
) {
    let pol_path = ri.policy_path(idx_path);
    if !policy_cache.contains_key(&pol_path) {
        match Policy::load(&pol_path) {
            Ok(p) => {
                policy_cache.insert(pol_path.clone(), p);
            }
            Err(e) => {
                issues.push(Issue::failure(display_path(root, &pol_path), &ri.id, e.to_string()));
                return;
            }
        }
    }
    let Some(policy) = policy_cache.get(&pol_path) else {
        return;
    };
    let prepared = match policy.prepared() {
        Ok(p) => p,
        Err(e) => {
            issues.push(Issue::failure(display_path(root, &pol_path), &ri.id, e.to_string()));
            return;
        }
    };
    let targets = match ri.targets(root, patterns_override) {
        Ok(t) => t,
        Err(e) => {
            issues.push(Issue::failure(display_path(root, idx_path), &ri.id, e.to_string()));
            return;
        }
    };
    debug!(rule = %ri.id, targets = targets.len(), "linting rule");

    // Targets are sorted, and collect keeps that order across threads.
    let per_file: Vec<Vec<Issue>> = targets
        .par_iter()
        .map(|path| lint_file(root, path, &prepared, &ri.id))
        .collect();
    *files_count += targets.len();
    issues.extend(per_file.into_iter().flatten());
}

fn lint_file(
    root: &Path,
    path: &Path,
    prepared: &[(&SortRule, Vec<Selector>)],
    rule_id: &str,
) -> Vec<Issue> {
    let file = display_path(root, path);
    match read_json(path) {
        Ok(json) => {
            let found = lint_document(&json, prepared, &file, rule_id);
            debug!(file = %file, issues = found.len(), "checked file");
            found
        }
        Err(e) => vec![Issue::failure(file, e.rule_id(), e.to_string())],
    }
}

/// Check one parsed document against prepared policy entries.
///
/// Issues come out per entry, then per node in document order, then in scan
/// order within the node.
pub fn lint_document(
    json: &Json,
    prepared: &[(&SortRule, Vec<Selector>)],
    file: &str,
    rule_id: &str,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (rule, selectors) in prepared {
        let extractor = rule.kind.extractor();
        let config = rule.config();
        for at in collect_targets(json, selectors, rule.recursive) {
            let Some(node) = json.pointer(&at.to_pointer()) else {
                continue;
            };
            let Some(items) = extractor.extract(node, &at) else {
                continue;
            };
            for d in engine::check(&items, config, true) {
                issues.push(Issue {
                    file: file.to_string(),
                    rule: format!("{}:{}", rule_id, rule.kind.as_str()),
                    severity: rule.severity(),
                    path: d.node.to_string(),
                    message: rule.render_message(&d.key, &d.previous_key),
                    message_id: Some(d.message_id.as_str().to_string()),
                    fixable: d.fix.is_some(),
                });
            }
        }
    }
    issues
}
