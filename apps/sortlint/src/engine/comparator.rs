//! Comparator construction from a sort configuration.
//!
//! The base comparison is always ascending; `SortOrder::Descending` flips the
//! sign at the end. Case folding and natural ordering are independent toggles
//! applied before the base comparison.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Alternating runs of ASCII digits and non-digits.
static RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+|[^0-9]+").expect("run pattern compiles"));

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Expected direction of a sorted sequence.
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    /// Configuration token for this order (`asc` or `desc`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Validated sort settings handed to the engine.
pub struct SortConfig {
    pub order: SortOrder,
    pub case_sensitive: bool,
    pub natural: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        SortConfig {
            order: SortOrder::Ascending,
            case_sensitive: true,
            natural: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
/// Total preorder over key strings built from a `SortConfig`.
pub struct Comparator {
    config: SortConfig,
}

impl Comparator {
    pub fn new(config: SortConfig) -> Self {
        Comparator { config }
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Compare two keys. `Less` means `a` belongs before `b`.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let (a, b) = if self.config.case_sensitive {
            (Cow::Borrowed(a), Cow::Borrowed(b))
        } else {
            (Cow::Owned(a.to_lowercase()), Cow::Owned(b.to_lowercase()))
        };
        let base = if self.config.natural {
            natural_cmp(&a, &b)
        } else {
            a.cmp(&b)
        };
        match self.config.order {
            SortOrder::Ascending => base,
            SortOrder::Descending => base.reverse(),
        }
    }
}

/// Compare two strings run by run, digit runs by numeric value.
///
/// When every compared run is equal, the key with fewer runs sorts first.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = RUNS.find_iter(a).map(|m| m.as_str());
    let mut right = RUNS.find_iter(b).map(|m| m.as_str());
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = compare_runs(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn compare_runs(x: &str, y: &str) -> Ordering {
    if is_digits(x) && is_digits(y) {
        compare_numeric(x, y)
    } else {
        x.cmp(y)
    }
}

fn is_digits(run: &str) -> bool {
    run.bytes().all(|b| b.is_ascii_digit())
}

// Value comparison without parsing, so runs of any length are fine.
fn compare_numeric(x: &str, y: &str) -> Ordering {
    let x = x.trim_start_matches('0');
    let y = y.trim_start_matches('0');
    x.len().cmp(&y.len()).then_with(|| x.cmp(y))
}
