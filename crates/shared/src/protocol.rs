use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backend timestamps come in two shapes: RFC 3339 with an offset, or the
/// bare `isoformat()` of a naive datetime (`2026-01-15T23:59:00`). Naive
/// values are taken as UTC; the zone label travels separately in
/// `deadline_tz`.
mod iso_timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(stamp) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(stamp.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|_| de::Error::custom(format!("unrecognized timestamp '{raw}'")))
    }
}

/// Synthetic email-shaped payload posted to `/api/process-email`.
///
/// The subject line doubles as the command channel: the backend's parser
/// recognizes `ASSIGN`, `SUBMIT {code}` and `RETURN {code} {student_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailEnvelope {
    pub subject: String,
    pub body: String,
    pub from_email: String,
    pub to_email: String,
    pub message_id: String,
}

/// Response body of `POST /api/process-email`.
///
/// `response` carries the confirmation text on `success = true`; `detail`
/// carries the rejection reason otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessEmailOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Read-only assignment projection returned by the query endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub code: String,
    pub title: String,
    pub class_name: String,
    #[serde(with = "iso_timestamp")]
    pub deadline_at: DateTime<Utc>,
    pub deadline_tz: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Read-only submission projection; `on_time` is server-computed and never
/// recomputed client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionView {
    pub student_id: String,
    #[serde(with = "iso_timestamp")]
    pub received_at: DateTime<Utc>,
    pub on_time: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Success body of `GET /api/assignments/{code}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentStatusReport {
    pub assignment: AssignmentView,
    pub submissions: Vec<SubmissionView>,
}

/// Non-OK body shared by the query endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}
