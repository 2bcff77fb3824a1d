//! Shared data models for lint/format outputs and index/policy modules.

pub mod index;
pub mod policy;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Issue severity; `warn` is accepted as an alias of `warning`.
pub enum Severity {
    Info,
    #[default]
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
/// A single lint issue with severity and location.
pub struct Issue {
    pub file: String,
    pub rule: String,
    pub severity: Severity,
    pub path: String,
    pub message: String,
    #[serde(rename = "messageId", skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub fixable: bool,
}

impl Issue {
    /// An error issue for a file that could not be checked.
    pub fn failure(file: String, rule: &str, message: String) -> Issue {
        Issue {
            file,
            rule: rule.to_string(),
            severity: Severity::Error,
            path: "$".into(),
            message,
            message_id: None,
            fixable: false,
        }
    }
}

#[derive(Debug, Default, Serialize)]
/// Aggregated lint summary used by printers.
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
    pub fixable: usize,
    pub files: usize,
}

#[derive(Debug, Serialize)]
/// Lint results container.
pub struct LintResult {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}

impl LintResult {
    /// Build a result, counting issues by severity.
    pub fn new(issues: Vec<Issue>, files: usize) -> LintResult {
        let mut summary = Summary {
            files,
            ..Summary::default()
        };
        for is in &issues {
            match is.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.infos += 1,
            }
            if is.fixable {
                summary.fixable += 1;
            }
        }
        LintResult { issues, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut warn = Issue::failure("a.json".into(), "r", "m".into());
        warn.severity = Severity::Warning;
        warn.fixable = true;
        let res = LintResult::new(
            vec![Issue::failure("b.json".into(), "read-file", "x".into()), warn],
            2,
        );
        assert_eq!(res.summary.errors, 1);
        assert_eq!(res.summary.warnings, 1);
        assert_eq!(res.summary.fixable, 1);
        assert_eq!(res.summary.files, 2);
    }

    #[test]
    fn test_severity_tokens() {
        let s: Severity = serde_json::from_str("\"warn\"").unwrap();
        assert_eq!(s, Severity::Warning);
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), "\"error\"");
    }
}
