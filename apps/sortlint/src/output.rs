//! Output rendering for lint and format commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-item fields and a top-level summary.

use crate::format::FormatResult;
use crate::models::{LintResult, Severity};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Print lint results in the requested format.
pub fn print_lint(res: &LintResult, output: &str) {
    if output == "json" {
        println!("{:#}", compose_lint_json(res));
        return;
    }
    let color = use_colors(output);
    for is in &res.issues {
        let (icon, tag) = match is.severity {
            Severity::Error => ("✖", "⟦error⟧"),
            Severity::Warning => ("▲", "⟦warn⟧"),
            Severity::Info => ("◆", "⟦info⟧"),
        };
        if color {
            let (icon, tag) = match is.severity {
                Severity::Error => (icon.red().to_string(), tag.red().bold().to_string()),
                Severity::Warning => (icon.yellow().to_string(), tag.yellow().bold().to_string()),
                Severity::Info => (icon.blue().to_string(), tag.blue().bold().to_string()),
            };
            println!(
                "{} {} {} {} ❲{}❳ — {}",
                icon,
                tag,
                is.file.bold(),
                is.path.dimmed(),
                is.rule,
                is.message
            );
        } else {
            println!("{} {} {} {} ❲{}❳ — {}", icon, tag, is.file, is.path, is.rule, is.message);
        }
    }
    let s = &res.summary;
    let summary = format!(
        "— Summary — errors={} warnings={} infos={} fixable={} files={}",
        s.errors, s.warnings, s.infos, s.fixable, s.files
    );
    if color {
        println!("{}", summary.bold());
    } else {
        println!("{}", summary);
    }
}

/// Print formatting results, one line (or block) per file.
///
/// Written files show a status line; otherwise changed files show their
/// diff (`diff`) or full sorted preview.
pub fn print_format(results: &[FormatResult], output: &str, write: bool, diff: bool) {
    if output == "json" {
        println!("{:#}", compose_format_json(results, write, diff));
        return;
    }
    let color = use_colors(output);
    for r in results {
        let (label, body) = match (&r.error, r.changed) {
            (Some(err), _) => ("failed:", Some(err.clone())),
            (None, false) => ("no changes:", None),
            (None, true) if write => ("sorted:", None),
            (None, true) if diff => (
                "---",
                line_diff(r.original.as_deref(), r.preview.as_deref()).or_else(|| r.preview.clone()),
            ),
            (None, true) => ("---", r.preview.clone()),
        };
        let head = if !color {
            label.to_string()
        } else {
            match label {
                "failed:" => label.red().bold().to_string(),
                "no changes:" => label.bright_black().to_string(),
                "sorted:" => label.green().bold().to_string(),
                _ => label.cyan().bold().to_string(),
            }
        };
        match body {
            Some(body) if r.error.is_some() => println!("{} {} ({})", head, r.file, body),
            Some(body) => println!("{} {}\n{}", head, r.file, body.trim_end()),
            None => println!("{} {}", head, r.file),
        }
    }
}

/// Line diff between the original and sorted text.
///
/// Shared leading and trailing lines are dropped; the differing middle is
/// shown as removed (`-`) then added (`+`) lines.
fn line_diff(old: Option<&str>, new: Option<&str>) -> Option<String> {
    let old: Vec<&str> = old?.lines().collect();
    let new: Vec<&str> = new?.lines().collect();
    let head = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
    let tail = old[head..]
        .iter()
        .rev()
        .zip(new[head..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let mut out = String::new();
    for line in &old[head..old.len() - tail] {
        out.push_str(&format!("-{}\n", line));
    }
    for line in &new[head..new.len() - tail] {
        out.push_str(&format!("+{}\n", line));
    }
    Some(out)
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &LintResult) -> JsonVal {
    json!({
        "issues": res.issues,
        "summary": res.summary,
    })
}

/// Compose format JSON object (pure) for testing/snapshot purposes.
pub fn compose_format_json(results: &[FormatResult], write: bool, diff: bool) -> JsonVal {
    let items: Vec<_> = results
        .iter()
        .map(|r| {
            json!({
                "file": r.file,
                "changed": r.changed,
                "wrote": write && r.changed,
                "preview": if !write { r.preview.as_ref() } else { None },
                "diff": if diff && !write { line_diff(r.original.as_deref(), r.preview.as_deref()) } else { None },
                "error": r.error,
            })
        })
        .collect();
    let summary = json!({
        "changed": results.iter().filter(|r| r.changed).count(),
        "failed": results.iter().filter(|r| r.error.is_some()).count(),
        "total": results.len(),
        "wrote": if write { results.iter().filter(|r| r.changed).count() } else { 0 },
    });
    json!({"results": items, "summary": summary})
}
