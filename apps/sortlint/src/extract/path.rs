//! JSON locations and the selectors that pick nodes to sort.
//!
//! Selectors are rooted at `$`: `$.scripts`, `$.*.deps`, `$.items[0]`,
//! `$.items[*].tags`, `$["odd.key"]`. `*` matches any one key or index.

use crate::error::{Result, SortlintError};
use serde_json::Value as Json;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
/// Location of a node inside a JSON document.
pub struct JsonPath(Vec<Segment>);

impl JsonPath {
    pub fn root() -> Self {
        JsonPath(Vec::new())
    }

    pub fn key(&self, key: &str) -> Self {
        let mut segs = self.0.clone();
        segs.push(Segment::Key(key.to_string()));
        JsonPath(segs)
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segs = self.0.clone();
        segs.push(Segment::Index(index));
        JsonPath(segs)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// RFC 6901 pointer for `Value::pointer` / `Value::pointer_mut`.
    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for seg in &self.0 {
            out.push('/');
            match seg {
                Segment::Key(k) => out.push_str(&k.replace('~', "~0").replace('/', "~1")),
                Segment::Index(i) => out.push_str(&i.to_string()),
            }
        }
        out
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for seg in &self.0 {
            match seg {
                Segment::Key(k) if is_plain_key(k) => write!(f, ".{}", k)?,
                Segment::Key(k) => write!(f, "[{}]", Json::String(k.clone()))?,
                Segment::Index(i) => write!(f, "[{}]", i)?,
            }
        }
        Ok(())
    }
}

fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && key != "*"
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '$' | '@' | '/' | ':'))
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Key(String),
    Index(usize),
    Any,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A parsed node selector.
pub struct Selector {
    source: String,
    steps: Vec<Step>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Selector> {
        let invalid = |reason: &str| SortlintError::Selector {
            selector: source.to_string(),
            reason: reason.to_string(),
        };
        let rest = source
            .trim()
            .strip_prefix('$')
            .ok_or_else(|| invalid("must start with '$'"))?;
        let chars: Vec<char> = rest.chars().collect();
        let mut steps = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            match chars[i] {
                '.' => {
                    let start = i + 1;
                    let mut end = start;
                    while end < chars.len() && chars[end] != '.' && chars[end] != '[' {
                        end += 1;
                    }
                    let name: String = chars[start..end].iter().collect();
                    match name.as_str() {
                        "" => return Err(invalid("empty key after '.'")),
                        "*" => steps.push(Step::Any),
                        _ => steps.push(Step::Key(name)),
                    }
                    i = end;
                }
                '[' if chars.get(i + 1) == Some(&'"') => {
                    let end = closing_quote(&chars, i + 1)
                        .ok_or_else(|| invalid("unclosed quoted key"))?;
                    if chars.get(end + 1) != Some(&']') {
                        return Err(invalid("expected ']' after quoted key"));
                    }
                    let quoted: String = chars[i + 1..=end].iter().collect();
                    let key: String =
                        serde_json::from_str(&quoted).map_err(|_| invalid("bad quoted key"))?;
                    steps.push(Step::Key(key));
                    i = end + 2;
                }
                '[' => {
                    let close = chars[i..]
                        .iter()
                        .position(|c| *c == ']')
                        .map(|p| p + i)
                        .ok_or_else(|| invalid("unclosed '['"))?;
                    let inner: String = chars[i + 1..close].iter().collect();
                    let inner = inner.trim();
                    if inner == "*" {
                        steps.push(Step::Any);
                    } else {
                        let index = inner
                            .parse::<usize>()
                            .map_err(|_| invalid("expected index, '*' or quoted key"))?;
                        steps.push(Step::Index(index));
                    }
                    i = close + 1;
                }
                _ => return Err(invalid("expected '.' or '['")),
            }
        }
        Ok(Selector {
            source: source.to_string(),
            steps,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Nodes matched by this selector, in document order.
    pub fn select<'a>(&self, root: &'a Json) -> Vec<(JsonPath, &'a Json)> {
        let mut current = vec![(JsonPath::root(), root)];
        for step in &self.steps {
            let mut next = Vec::new();
            for (path, node) in current {
                match (step, node) {
                    (Step::Key(k), Json::Object(map)) => {
                        if let Some(v) = map.get(k) {
                            next.push((path.key(k), v));
                        }
                    }
                    (Step::Index(i), Json::Array(arr)) => {
                        if let Some(v) = arr.get(*i) {
                            next.push((path.index(*i), v));
                        }
                    }
                    (Step::Any, Json::Object(map)) => {
                        next.extend(map.iter().map(|(k, v)| (path.key(k), v)));
                    }
                    (Step::Any, Json::Array(arr)) => {
                        next.extend(arr.iter().enumerate().map(|(i, v)| (path.index(i), v)));
                    }
                    _ => {}
                }
            }
            current = next;
        }
        current
    }
}

/// Index of the quote closing the JSON string that opens at `open`.
fn closing_quote(chars: &[char], open: usize) -> Option<usize> {
    let mut i = open + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

impl FromStr for Selector {
    type Err = SortlintError;

    fn from_str(s: &str) -> Result<Self> {
        Selector::parse(s)
    }
}

/// Collect container nodes to check, deduplicated, in selector then document order.
///
/// With `recursive`, every object and array below a match is included too.
pub fn collect_targets(root: &Json, selectors: &[Selector], recursive: bool) -> Vec<JsonPath> {
    let mut seen: HashSet<JsonPath> = HashSet::new();
    let mut out = Vec::new();
    for sel in selectors {
        for (path, node) in sel.select(root) {
            if recursive {
                walk(node, path, &mut seen, &mut out);
            } else if is_container(node) && seen.insert(path.clone()) {
                out.push(path);
            }
        }
    }
    out
}

fn walk(node: &Json, path: JsonPath, seen: &mut HashSet<JsonPath>, out: &mut Vec<JsonPath>) {
    if !is_container(node) {
        return;
    }
    if seen.insert(path.clone()) {
        out.push(path.clone());
    }
    match node {
        Json::Object(map) => {
            for (k, v) in map {
                walk(v, path.key(k), seen, out);
            }
        }
        Json::Array(arr) => {
            for (i, v) in arr.iter().enumerate() {
                walk(v, path.index(i), seen, out);
            }
        }
        _ => {}
    }
}

fn is_container(node: &Json) -> bool {
    matches!(node, Json::Object(_) | Json::Array(_))
}
