use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::path::Path;

use crate::scoring::{BatchOutcome, EntityInput};

const NAME_KEYS: [&str; 2] = ["name", "company_name"];
const LIST_KEYS: [&str; 2] = ["entities", "companies"];

/// Read entities to score from a JSON file.
///
/// Accepted shapes: a top-level array, or an object holding the array under
/// `entities` or `companies`. See [`parse_entities`] for item shapes.
pub fn load_entities(path: &Path) -> Result<Vec<EntityInput>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read batch file at {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse batch file: invalid JSON in {}", path.display()))?;
    parse_entities(value)
}

/// Turn a parsed batch document into entity inputs, preserving order.
///
/// Each item is either a bare name string, or an object with a `name` (or
/// `company_name`) plus either a `data` object or the remaining keys as
/// attributes. Items with no usable name keep an empty name and are reported
/// as failures by the engine.
pub fn parse_entities(value: Value) -> Result<Vec<EntityInput>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => LIST_KEYS
            .iter()
            .find_map(|key| match map.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .context("Batch object must contain an 'entities' or 'companies' array")?,
        _ => anyhow::bail!("Batch file must be a JSON array or object"),
    };

    Ok(items.into_iter().map(entity_from_item).collect())
}

fn entity_from_item(item: Value) -> EntityInput {
    match item {
        Value::String(name) => EntityInput::new(name, Map::new()),
        Value::Object(mut map) => {
            let name = NAME_KEYS
                .iter()
                .find_map(|key| match map.remove(*key) {
                    Some(Value::String(name)) => Some(name),
                    _ => None,
                })
                .unwrap_or_default();
            let attributes = match map.remove("data") {
                Some(Value::Object(data)) => data,
                _ => map,
            };
            EntityInput::new(name, attributes)
        }
        _ => EntityInput::default(),
    }
}

/// Sort outcomes for display: scored entities by final score descending
/// (stable for ties), failures last in input order.
pub fn rank_outcomes(outcomes: &mut [BatchOutcome]) {
    outcomes.sort_by(|a, b| match (a.result(), b.result()) {
        (Some(a), Some(b)) => b.final_score.total_cmp(&a.final_score),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Parse a `KEY=VALUE` attribute given on the command line. Values that
/// parse as JSON numbers stay numeric; everything else is a string.
pub fn parse_attribute(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }
    let value = value.trim();
    let value = match serde_json::from_str::<Value>(value) {
        Ok(number @ Value::Number(_)) => number,
        _ => Value::String(value.to_string()),
    };
    Ok((key.to_string(), value))
}
