//! Best-effort recovery of structured data from free-form model text.
//!
//! Models are asked for JSON but answer however they like. Extraction tries,
//! in order: the whole text, the first fenced ```json block, and the span from
//! the first `{` to the last `}`. Only JSON objects count.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json|JSON)?\s*(\{.*?\})\s*```").expect("invalid fenced JSON regex")
});

/// Extract a JSON object from model output.
pub fn extract_json(text: &str) -> Option<Map<String, Value>> {
    let trimmed = text.trim();

    if let Some(object) = parse_object(trimmed) {
        return Some(object);
    }

    if let Some(object) = FENCED_JSON
        .captures_iter(trimmed)
        .filter_map(|caps| caps.get(1))
        .find_map(|m| parse_object(m.as_str()))
    {
        return Some(object);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    parse_object(&trimmed[start..=end])
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// First `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Read a 0..=100 score from a number or numeric string, rounding and clamping.
///
/// Missing, null, and non-numeric values yield `default`.
pub fn score(value: Option<&Value>, default: u8) -> u8 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };

    match raw {
        Some(f) if f.is_finite() => f.round().clamp(0.0, 100.0) as u8,
        _ => default,
    }
}

/// Read a text field. Strings are taken verbatim; other non-null values use
/// their JSON rendering.
pub fn text(map: &Map<String, Value>, key: &str, default: &str) -> String {
    match map.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Read a list of strings. A single string becomes a one-element list.
pub fn string_list(map: &Map<String, Value>, key: &str) -> Vec<String> {
    match map.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}
