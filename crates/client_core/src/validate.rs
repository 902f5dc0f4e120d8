//! Field validation for the three forms and the status lookup.
//!
//! Every rule runs locally, before any request is built. The current time is
//! injected so deadline checks stay deterministic under test.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::error::ValidationError;

const MAX_TEXT_LEN: usize = 200;

/// Semantic type tag attached to a raw form value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, trimmed, non-empty, at most 200 characters.
    Text,
    /// `SEGMENT-SEGMENT`, both segments uppercase alphanumeric.
    AssignmentCode,
    /// Uppercase alphanumeric, no separators.
    StudentId,
    /// `YYYY-MM-DD` or `YYYY-MM-DD HH:MM`, strictly in the future.
    Date,
}

/// Validates `raw` against `kind` and returns the trimmed value, or a
/// field-tagged error describing the violated rule.
pub fn validate_field(
    raw: &str,
    kind: FieldKind,
    field: &str,
    now: DateTime<Utc>,
) -> Result<String, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }

    match kind {
        FieldKind::Text => {
            if value.chars().count() > MAX_TEXT_LEN {
                return Err(ValidationError::new(
                    field,
                    format!("must be at most {MAX_TEXT_LEN} characters"),
                ));
            }
        }
        FieldKind::AssignmentCode => {
            if !is_assignment_code(value) {
                return Err(ValidationError::new(
                    field,
                    "must look like CODE-CODE (uppercase letters and digits)",
                ));
            }
        }
        FieldKind::StudentId => {
            if !value.chars().all(is_upper_alnum) {
                return Err(ValidationError::new(
                    field,
                    "must contain only uppercase letters and digits",
                ));
            }
        }
        FieldKind::Date => {
            let deadline = parse_deadline(value)
                .ok_or_else(|| ValidationError::new(field, "must be a date like 2026-01-15"))?;
            if deadline <= now {
                return Err(ValidationError::new(field, "must be in the future"));
            }
        }
    }

    Ok(value.to_string())
}

fn is_upper_alnum(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit()
}

fn is_assignment_code(value: &str) -> bool {
    let Some((class_part, date_part)) = value.split_once('-') else {
        return false;
    };
    !class_part.is_empty()
        && !date_part.is_empty()
        && class_part.chars().all(is_upper_alnum)
        && date_part.chars().all(is_upper_alnum)
}

/// Resolves a deadline string to an instant. A bare date means end of that
/// day (23:59), matching the backend's deadline grammar.
fn parse_deadline(value: &str) -> Option<DateTime<Utc>> {
    let naive = if let Ok(stamp) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M") {
        stamp
    } else {
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
        date.and_time(NaiveTime::from_hms_opt(23, 59, 0)?)
    };
    Utc.from_local_datetime(&naive).single()
}
