//! CSV encode/decode for the consumption log.
//!
//! The wire format quotes every field as a JSON literal (strings with JSON
//! escaping, numbers bare), joined with commas. That keeps embedded commas
//! and quotes in food names round-trippable without pulling in a full CSV
//! dialect. Ids and timestamps are not exported; an import regenerates
//! both, so a round trip is lossy on exactly those two fields.

use chrono::{NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{LogEntry, Meal};

/// Exported columns, in order.
pub const COLUMNS: [&str; 7] = ["name", "meal", "grams", "kcal", "protein", "carbs", "fat"];

/// Suggested filename for an export on `date`.
#[must_use]
pub fn export_filename(date: NaiveDate) -> String {
    format!("calorie-log-{date}.csv")
}

/// Encode the log. An empty log encodes to the empty string.
#[must_use]
pub fn to_csv(entries: &[LogEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut lines = vec![COLUMNS.join(",")];
    for e in entries {
        let fields = [
            json_field(&Value::from(e.name.as_str())),
            json_field(&Value::from(e.meal.as_str())),
            json_field(&Value::from(e.grams)),
            json_field(&Value::from(e.kcal)),
            json_field(&Value::from(e.protein)),
            json_field(&Value::from(e.carbs)),
            json_field(&Value::from(e.fat)),
        ];
        lines.push(fields.join(","));
    }
    lines.join("\n")
}

fn json_field(value: &Value) -> String {
    // Value serialization to a string is infallible.
    serde_json::to_string(value).unwrap_or_default()
}

/// Decode CSV text into ready-to-prepend entries with fresh ids and
/// timestamps.
///
/// Any malformed row fails the whole import; callers must not apply a
/// partial result. Unknown extra columns are parsed and ignored. Empty
/// input yields zero entries.
pub fn from_csv(text: &str) -> Result<Vec<LogEntry>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut lines = text.lines();
    let header = lines.next().unwrap_or_default();
    // The header is a plain comma split; column names never carry escaping.
    let columns: Vec<&str> = header.split(',').collect();

    let index_of = |name: &str| -> Result<usize> {
        columns
            .iter()
            .position(|c| *c == name)
            .ok_or_else(|| Error::Import(format!("missing column '{name}'")))
    };
    let idx_name = index_of("name")?;
    let idx_meal = index_of("meal")?;
    let idx_grams = index_of("grams")?;
    let idx_kcal = index_of("kcal")?;
    let idx_protein = index_of("protein")?;
    let idx_carbs = index_of("carbs")?;
    let idx_fat = index_of("fat")?;

    let mut entries = Vec::new();
    for (row, line) in lines.enumerate() {
        let row = row + 2; // 1-based, counting the header
        let raw_fields = split_row(line)
            .ok_or_else(|| Error::Import(format!("row {row}: unterminated quoted field")))?;
        if raw_fields.len() != columns.len() {
            return Err(Error::Import(format!(
                "row {row}: expected {} fields, found {}",
                columns.len(),
                raw_fields.len()
            )));
        }

        let mut values = Vec::with_capacity(raw_fields.len());
        for raw in &raw_fields {
            let value: Value = serde_json::from_str(raw.trim()).map_err(|_| {
                Error::Import(format!("row {row}: '{raw}' is not a valid field"))
            })?;
            values.push(value);
        }

        let string_at = |idx: usize, what: &str| -> Result<String> {
            values[idx]
                .as_str()
                .map(ToString::to_string)
                .ok_or_else(|| Error::Import(format!("row {row}: {what} must be a string")))
        };
        let number_at = |idx: usize, what: &str| -> Result<f64> {
            values[idx]
                .as_f64()
                .ok_or_else(|| Error::Import(format!("row {row}: {what} must be a number")))
        };

        let meal_name = string_at(idx_meal, "meal")?;
        let meal = Meal::parse(&meal_name)
            .ok_or_else(|| Error::Import(format!("row {row}: unknown meal '{meal_name}'")))?;

        entries.push(LogEntry {
            id: Uuid::new_v4().to_string(),
            name: string_at(idx_name, "name")?,
            meal,
            grams: number_at(idx_grams, "grams")?,
            kcal: number_at(idx_kcal, "kcal")?,
            protein: number_at(idx_protein, "protein")?,
            carbs: number_at(idx_carbs, "carbs")?,
            fat: number_at(idx_fat, "fat")?,
            created_at: Utc::now().to_rfc3339(),
        });
    }
    Ok(entries)
}

/// Split a data row on commas that sit outside JSON string quoting.
/// Returns `None` when a quoted field never closes.
fn split_row(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_string = false;
    let mut escaped = false;

    for c in line.chars() {
        if in_string {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else {
            match c {
                ',' => fields.push(std::mem::take(&mut current)),
                '"' => {
                    in_string = true;
                    current.push(c);
                }
                _ => current.push(c),
            }
        }
    }
    if in_string {
        return None;
    }
    fields.push(current);
    Some(fields)
}
