//! Prompt parameterization — repeated identifier values → `$id<N>` placeholders.
//!
//! Substitution is plain text replacement, not token- or word-boundary
//! aware: an identifier that happens to be a substring of unrelated prompt
//! text is replaced too. Longest-first ordering keeps identifiers from
//! corrupting each other (`12` must not be rewritten inside `123`).

use indexmap::IndexMap;
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt;

/// A scalar identifier value discovered inside the items.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    /// Integers above `i64::MAX`; still valid JSON identifiers.
    Uint(u64),
}

impl ParamValue {
    /// Textual form as it appears inside the prompt.
    pub fn as_text(&self) -> String {
        match self {
            ParamValue::Str(s) => s.clone(),
            ParamValue::Int(n) => n.to_string(),
            ParamValue::Uint(n) => n.to_string(),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::Uint(n) => write!(f, "{n}"),
        }
    }
}

/// Identifier value → placeholder, in first-discovery order.
pub type ParameterMapping = IndexMap<ParamValue, String>;

/// Replace identifier-like values from `items` with short placeholders in
/// `prompt`, returning the rewritten prompt and the reversible mapping.
///
/// Discovery is breadth-first in container insertion order (mapping values
/// keep their key, sequence elements carry none), so placeholder numbering
/// is deterministic for a given input. Each distinct value gets the next
/// `$id<N>` the first time it is seen; duplicates reuse their placeholder.
pub fn parameterize(prompt: &str, items: &[Value]) -> (String, ParameterMapping) {
    let mut mapping = ParameterMapping::new();

    let mut queue: VecDeque<(Option<&str>, &Value)> =
        items.iter().map(|item| (None, item)).collect();
    while let Some((key, item)) = queue.pop_front() {
        match item {
            Value::Object(map) => {
                for (k, v) in map {
                    queue.push_back((Some(k.as_str()), v));
                }
            }
            Value::Array(seq) => {
                for v in seq {
                    queue.push_back((None, v));
                }
            }
            leaf => {
                let Some(key) = key else { continue };
                if !is_id_key(key) {
                    continue;
                }
                let Some(value) = identifier_value(leaf) else {
                    continue;
                };
                if !mapping.contains_key(&value) {
                    let placeholder = format!("$id{}", mapping.len() + 1);
                    mapping.insert(value, placeholder);
                }
            }
        }
    }

    // Longer identifiers first, so a short one never clobbers a longer one
    // it is a substring of. Sort is stable: equal lengths keep discovery order.
    let mut entries: Vec<(&ParamValue, &String)> = mapping.iter().collect();
    entries.sort_by(|a, b| b.0.as_text().len().cmp(&a.0.as_text().len()));

    let mut rewritten = prompt.to_string();
    for (value, placeholder) in entries {
        rewritten = rewritten.replace(&value.as_text(), placeholder);
    }
    (rewritten, mapping)
}

/// Reverse [`parameterize`]: substitute placeholders back to their original
/// values, longest placeholder first (`$id1` must not match inside `$id10`).
pub fn deparameterize(text: &str, mapping: &ParameterMapping) -> String {
    let mut entries: Vec<(&ParamValue, &String)> = mapping.iter().collect();
    entries.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    let mut restored = text.to_string();
    for (value, placeholder) in entries {
        restored = restored.replace(placeholder.as_str(), &value.as_text());
    }
    restored
}

/// A key names an identifier if it equals `id` (case-insensitive) or carries
/// an `_id` / `Id` suffix.
fn is_id_key(key: &str) -> bool {
    key.eq_ignore_ascii_case("id") || key.ends_with("_id") || key.ends_with("Id")
}

/// Only string and integer scalars qualify as identifier values.
fn identifier_value(leaf: &Value) -> Option<ParamValue> {
    match leaf {
        Value::String(s) => Some(ParamValue::Str(s.clone())),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(ParamValue::Int(i)),
            None => n.as_u64().map(ParamValue::Uint),
        },
        _ => None,
    }
}
