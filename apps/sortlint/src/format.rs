//! JSON formatter applying computed fix plans.
//!
//! For every policy entry, selected nodes are reordered deepest first: an
//! array reorder shifts the indices of everything below it, so children are
//! settled before their parents move. Members move with their values, and
//! output is pretty-printed with a trailing newline.
//!
//! A file is reported as changed only when some plan was non-empty; files
//! that are already sorted are never rewritten, whatever their layout.

use crate::engine::{plan::plan, Comparator};
use crate::error::{Result, SortlintError};
use crate::extract::{apply_plan, collect_targets, Selector};
use crate::models::index::{Index, RuleIndex};
use crate::models::policy::{Policy, SortRule};
use crate::utils::display_path;
use rayon::prelude::*;
use serde_json::Value as Json;
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct FormatResult {
    pub file: String,
    pub changed: bool,
    pub preview: Option<String>,
    pub original: Option<String>,
    pub error: Option<String>,
}

impl FormatResult {
    fn unchanged(file: String, original: Option<String>) -> FormatResult {
        FormatResult {
            file,
            changed: false,
            preview: None,
            original,
            error: None,
        }
    }

    fn failed(file: String, err: &SortlintError) -> FormatResult {
        FormatResult {
            error: Some(err.to_string()),
            ..FormatResult::unchanged(file, None)
        }
    }
}

/// Format JSON files matched by the index using their policies.
///
/// Returns one `FormatResult` per matched file. A file matched by several
/// rules is formatted once, applying their entries in index order, so the
/// preview is the final text. A missing or invalid policy and a bad glob each
/// yield a failed result and the other rules still run. When `write` is
/// false the sorted text is kept as `preview`; `capture_old` also keeps the
/// original text for diffs.
pub fn run_format(
    repo_root: &Path,
    index_path: &str,
    write: bool,
    capture_old: bool,
    patterns_override: &HashMap<String, Vec<String>>,
) -> Result<Vec<FormatResult>> {
    let idx_path = repo_root.join(index_path);
    let index = Index::load(&idx_path)?;

    let mut results = Vec::new();
    let mut policies: Vec<(&RuleIndex, PathBuf, Policy)> = Vec::new();
    for ri in &index.rules {
        let pol_path = ri.policy_path(&idx_path);
        match Policy::load(&pol_path) {
            Ok(p) => policies.push((ri, pol_path, p)),
            Err(e) => {
                warn!(rule = %ri.id, error = %e, "skipping rule");
                results.push(FormatResult::failed(display_path(repo_root, &pol_path), &e));
            }
        }
    }

    let mut per_file: BTreeMap<PathBuf, Vec<(&SortRule, Vec<Selector>)>> = BTreeMap::new();
    for (ri, pol_path, policy) in &policies {
        let prepared = match policy.prepared() {
            Ok(p) => p,
            Err(e) => {
                warn!(rule = %ri.id, error = %e, "skipping rule");
                results.push(FormatResult::failed(display_path(repo_root, pol_path), &e));
                continue;
            }
        };
        let targets = match ri.targets(repo_root, patterns_override) {
            Ok(t) => t,
            Err(e) => {
                warn!(rule = %ri.id, error = %e, "skipping rule");
                results.push(FormatResult::failed(display_path(repo_root, &idx_path), &e));
                continue;
            }
        };
        debug!(rule = %ri.id, targets = targets.len(), "formatting rule");
        for path in targets {
            per_file
                .entry(path)
                .or_default()
                .extend(prepared.iter().cloned());
        }
    }

    let files: Vec<(PathBuf, Vec<(&SortRule, Vec<Selector>)>)> = per_file.into_iter().collect();
    let formatted: Vec<FormatResult> = files
        .par_iter()
        .map(|(path, entries)| format_file(repo_root, path, entries, write, capture_old))
        .collect();
    results.extend(formatted);
    info!(
        total = results.len(),
        changed = results.iter().filter(|r| r.changed).count(),
        failed = results.iter().filter(|r| r.error.is_some()).count(),
        "format finished"
    );
    Ok(results)
}

/// Whether a format run should exit non-zero: any failed file, or any
/// change under `check`.
pub fn should_fail(results: &[FormatResult], check: bool) -> bool {
    results
        .iter()
        .any(|r| r.error.is_some() || (check && r.changed))
}

fn format_file(
    root: &Path,
    path: &Path,
    prepared: &[(&SortRule, Vec<Selector>)],
    write: bool,
    capture_old: bool,
) -> FormatResult {
    let file = display_path(root, path);
    let original = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(source) => {
            let err = SortlintError::Io {
                path: path.to_path_buf(),
                source,
            };
            warn!(error = %err, "cannot format");
            return FormatResult::failed(file, &err);
        }
    };
    let mut json: Json = match serde_json::from_str(&original) {
        Ok(j) => j,
        Err(source) => {
            let err = SortlintError::Json {
                path: path.to_path_buf(),
                source,
            };
            warn!(error = %err, "cannot format");
            return FormatResult::failed(file, &err);
        }
    };
    let kept = capture_old.then(|| original.clone());
    if !format_document(&mut json, prepared) {
        return FormatResult::unchanged(file, kept);
    }
    let text = match render(&json, path) {
        Ok(t) => t,
        Err(err) => return FormatResult::failed(file, &err),
    };
    if write {
        if let Err(source) = fs::write(path, &text) {
            let err = SortlintError::Io {
                path: path.to_path_buf(),
                source,
            };
            return FormatResult::failed(file, &err);
        }
        debug!(file = %file, "wrote sorted file");
        return FormatResult {
            file,
            changed: true,
            preview: None,
            original: kept,
            error: None,
        };
    }
    FormatResult {
        file,
        changed: true,
        preview: Some(text),
        original: kept,
        error: None,
    }
}

/// Apply every prepared entry to `json` in place. Returns whether anything moved.
pub fn format_document(json: &mut Json, prepared: &[(&SortRule, Vec<Selector>)]) -> bool {
    let mut changed = false;
    for (rule, selectors) in prepared {
        let extractor = rule.kind.extractor();
        let comparator = Comparator::new(rule.config());
        let mut targets = collect_targets(json, selectors, rule.recursive);
        targets.sort_by_key(|p| Reverse(p.depth()));
        for at in targets {
            let Some(node) = json.pointer_mut(&at.to_pointer()) else {
                continue;
            };
            let Some(items) = extractor.extract(node, &at) else {
                continue;
            };
            let fix = plan(&items, &comparator);
            changed |= apply_plan(node, &fix);
        }
    }
    changed
}

fn render(json: &Json, path: &Path) -> Result<String> {
    let mut s = serde_json::to_string_pretty(json).map_err(|source| SortlintError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    s.push('\n');
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::lint_document;
    use serde_json::json;
    use tempfile::tempdir;

    fn policy(src: &str) -> Policy {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn test_format_document_sorts_and_keeps_values() {
        let pol = policy("[[sort]]\nkind = \"object-keys\"\nrecursive = true\n");
        let prepared = pol.prepared().unwrap();
        let mut doc = json!({ "z": { "b": 1, "a": 2 }, "m": [3, 1], "a": null });
        assert!(format_document(&mut doc, &prepared));
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"a":null,"m":[3,1],"z":{"a":2,"b":1}}"#
        );
        assert!(lint_document(&doc, &prepared, "f", "r").is_empty());
        assert!(!format_document(&mut doc, &prepared));
    }

    #[test]
    fn test_nested_arrays_sorted_before_parents() {
        let pol = policy(
            r#"
[[sort]]
kind = "string-array"
paths = ["$.groups", "$.groups[*]"]
"#,
        );
        let prepared = pol.prepared().unwrap();
        let mut doc = json!({ "groups": [["d", "c"], ["b", "a"]] });
        // Inner arrays are string arrays; the outer one is not, so it stays.
        assert!(format_document(&mut doc, &prepared));
        assert_eq!(doc, json!({ "groups": [["c", "d"], ["a", "b"]] }));
    }

    #[test]
    fn test_objects_inside_reordered_array_follow_their_parent() {
        let pol = policy(
            r#"
[[sort]]
kind = "object-keys"
paths = ["$.list[*]"]

[[sort]]
kind = "string-array"
paths = ["$.tags"]
params = { caseSensitive = false }
"#,
        );
        let prepared = pol.prepared().unwrap();
        let mut doc = json!({ "tags": ["b", "A", "a"], "list": [{ "y": 1, "x": 2 }] });
        assert!(format_document(&mut doc, &prepared));
        assert_eq!(doc["tags"], json!(["A", "a", "b"]));
        assert_eq!(serde_json::to_string(&doc["list"]).unwrap(), r#"[{"x":2,"y":1}]"#);
    }

    #[test]
    fn test_run_format_preview_then_write() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("index.toml"),
            "[[rules]]\nid = \"p\"\npatterns = [\"*.json\"]\npolicy = \"p.toml\"\n",
        )
        .unwrap();
        fs::write(root.join("p.toml"), "[[sort]]\nkind = \"object-keys\"\n").unwrap();
        fs::write(root.join("a.json"), "{\"b\":1,\"a\":2}").unwrap();
        fs::write(root.join("b.json"), "{\"a\":1}").unwrap();

        let res = run_format(root, "index.toml", false, true, &HashMap::new()).unwrap();
        assert_eq!(res.len(), 2);
        assert!(res[0].changed);
        assert_eq!(
            res[0].preview.as_deref(),
            Some("{\n  \"a\": 2,\n  \"b\": 1\n}\n")
        );
        assert!(res[0].original.is_some());
        assert!(!res[1].changed);
        assert_eq!(fs::read_to_string(root.join("a.json")).unwrap(), "{\"b\":1,\"a\":2}");

        let res = run_format(root, "index.toml", true, false, &HashMap::new()).unwrap();
        assert!(res[0].changed && res[0].preview.is_none());
        assert_eq!(
            fs::read_to_string(root.join("a.json")).unwrap(),
            "{\n  \"a\": 2,\n  \"b\": 1\n}\n"
        );
        let again = run_format(root, "index.toml", false, false, &HashMap::new()).unwrap();
        assert!(again.iter().all(|r| !r.changed));
    }

    #[test]
    fn test_unparsable_file_reports_error() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("index.toml"),
            "[[rules]]\nid = \"p\"\npatterns = [\"*.json\"]\npolicy = \"p.toml\"\n",
        )
        .unwrap();
        fs::write(root.join("p.toml"), "[[sort]]\nkind = \"object-keys\"\n").unwrap();
        fs::write(root.join("bad.json"), "{").unwrap();
        let res = run_format(root, "index.toml", true, false, &HashMap::new()).unwrap();
        assert!(!res[0].changed);
        assert!(res[0].error.as_deref().unwrap().contains("not valid JSON"));
        assert!(should_fail(&res, false));
    }

    #[test]
    fn test_policy_and_glob_failures_keep_other_rules() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("index.toml"),
            r#"
[[rules]]
id = "ok"
patterns = ["*.json"]
policy = "p.toml"

[[rules]]
id = "ghost"
patterns = ["*.json"]
policy = "missing.toml"

[[rules]]
id = "broken-glob"
patterns = ["["]
policy = "p.toml"
"#,
        )
        .unwrap();
        fs::write(root.join("p.toml"), "[[sort]]\nkind = \"object-keys\"\n").unwrap();
        fs::write(root.join("a.json"), "{\"b\":1,\"a\":2}").unwrap();

        let res = run_format(root, "index.toml", false, false, &HashMap::new()).unwrap();
        let files: Vec<(&str, bool, bool)> = res
            .iter()
            .map(|r| (r.file.as_str(), r.changed, r.error.is_some()))
            .collect();
        assert_eq!(
            files,
            vec![
                ("missing.toml", false, true),
                ("index.toml", false, true),
                ("a.json", true, false),
            ]
        );
        assert!(res[1].error.as_deref().unwrap().contains("invalid glob pattern"));
        assert!(should_fail(&res, false));
    }

    #[test]
    fn test_should_fail_only_on_errors_or_checked_changes() {
        let changed = FormatResult {
            changed: true,
            ..FormatResult::unchanged("a.json".into(), None)
        };
        let clean = vec![FormatResult::unchanged("b.json".into(), None)];
        assert!(!should_fail(&clean, true));
        assert!(!should_fail(std::slice::from_ref(&changed), false));
        assert!(should_fail(std::slice::from_ref(&changed), true));
    }

    #[test]
    fn test_rules_sharing_a_file_yield_one_result() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("index.toml"),
            r#"
[[rules]]
id = "keys"
patterns = ["*.json"]
policy = "keys.toml"

[[rules]]
id = "tags"
patterns = ["pkg.json"]
policy = "tags.toml"
"#,
        )
        .unwrap();
        fs::write(root.join("keys.toml"), "[[sort]]\nkind = \"object-keys\"\n").unwrap();
        fs::write(
            root.join("tags.toml"),
            "[[sort]]\nkind = \"string-array\"\npaths = [\"$.tags\"]\n",
        )
        .unwrap();
        fs::write(root.join("pkg.json"), r#"{"tags":["b","a"],"name":"x"}"#).unwrap();

        let res = run_format(root, "index.toml", false, true, &HashMap::new()).unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(
            res[0].preview.as_deref(),
            Some("{\n  \"name\": \"x\",\n  \"tags\": [\n    \"a\",\n    \"b\"\n  ]\n}\n")
        );
    }
}
