//! Parse-and-validate primitives for loosely typed request bodies.
//!
//! Payload fields arrive as raw JSON values so that a wrong type surfaces as a
//! field-specific validation message instead of a generic decode failure.
//! Every helper either yields a fully valid typed value or a
//! [`RecordError::Validation`] naming the offending field.

use serde_json::Value;

use crate::store::{RecordError, RecordResult};

/// Validation message returned when an id segment is not a positive integer.
pub const INVALID_ID_MESSAGE: &str = "id must be a positive integer";
/// Validation message returned when an update carries no recognised field.
pub const EMPTY_UPDATE_MESSAGE: &str = "at least one field must be provided";

/// Number of grades every student carries.
pub const GRADE_COUNT: usize = 3;
pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 10.0;

/// Parse an id path segment. Signs, fractions and zero are rejected.
pub fn parse_record_id(raw: &str) -> RecordResult<u64> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RecordError::validation(INVALID_ID_MESSAGE));
    }

    match raw.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(RecordError::validation(INVALID_ID_MESSAGE)),
    }
}

/// Trimmed, non-blank string.
pub fn required_name(value: Option<&Value>, field: &str) -> RecordResult<String> {
    match value {
        None | Some(Value::Null) => Err(RecordError::validation(format!("{field} is required"))),
        Some(Value::String(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(RecordError::validation(format!(
                    "{field} must not be blank"
                )));
            }
            Ok(trimmed.to_string())
        }
        Some(_) => Err(RecordError::validation(format!("{field} must be a string"))),
    }
}

/// Finite number given either as a JSON number or a numeric string.
pub fn number(value: Option<&Value>, field: &str) -> RecordResult<f64> {
    let parsed = match value {
        None | Some(Value::Null) => {
            return Err(RecordError::validation(format!("{field} is required")));
        }
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(raw)) if !raw.trim().is_empty() => raw.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match parsed {
        Some(number) if number.is_finite() => Ok(number),
        _ => Err(RecordError::validation(format!("{field} must be a number"))),
    }
}

/// Finite number strictly greater than zero.
pub fn positive_number(value: Option<&Value>, field: &str) -> RecordResult<f64> {
    let number = number(value, field)?;
    if number <= 0.0 {
        return Err(RecordError::validation(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(number)
}

/// Exactly [`GRADE_COUNT`] numbers, each within `[MIN_GRADE, MAX_GRADE]`.
pub fn grade_triplet(value: Option<&Value>, field: &str) -> RecordResult<[f64; GRADE_COUNT]> {
    let items = match value {
        None | Some(Value::Null) => {
            return Err(RecordError::validation(format!("{field} is required")));
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(RecordError::validation(format!("{field} must be an array")));
        }
    };

    if items.len() != GRADE_COUNT {
        return Err(RecordError::validation(format!(
            "{field} must contain exactly {GRADE_COUNT} values"
        )));
    }

    let mut grades = [0.0; GRADE_COUNT];
    for (index, item) in items.iter().enumerate() {
        let label = format!("{field}[{index}]");
        let grade = number(Some(item), &label)?;
        if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
            return Err(RecordError::validation(format!(
                "{label} must be between {MIN_GRADE} and {MAX_GRADE}"
            )));
        }
        grades[index] = grade;
    }
    Ok(grades)
}

/// Boolean given as a JSON bool or the strings `"true"` / `"false"`.
pub fn flag(value: Option<&Value>, field: &str) -> RecordResult<bool> {
    match value {
        None | Some(Value::Null) => Err(RecordError::validation(format!("{field} is required"))),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(Value::String(raw)) => parse_flag(raw).ok_or_else(|| not_a_flag(field)),
        Some(_) => Err(not_a_flag(field)),
    }
}

/// Query-string flag (`true` / `false`, case-insensitive).
pub fn query_flag(raw: &str, field: &str) -> RecordResult<bool> {
    parse_flag(raw).ok_or_else(|| not_a_flag(field))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn not_a_flag(field: &str) -> RecordError {
    RecordError::validation(format!("{field} must be true or false"))
}

/// Case-insensitive substring match used by `?name=` filters.
pub fn name_contains(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(&needle.trim().to_lowercase())
}
