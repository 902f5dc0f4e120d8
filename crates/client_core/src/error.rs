use thiserror::Error;

/// Rejected field value, raised before any network traffic.
///
/// Carries the human-readable field name and the rule that was violated so
/// callers can surface it inline next to the offending input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Failure of a single outbound request, network-level or application-level.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered and said no: `success: false` from
    /// `/api/process-email`, or a non-OK query response. `detail` is the
    /// backend's text, passed through verbatim.
    #[error("{detail}")]
    Rejected { detail: String },
    #[error("unexpected response from server: {0}")]
    UnexpectedResponse(String),
}

/// Everything a controller operation can fail with. Callers must handle
/// both branches; nothing propagates past the action boundary.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Request(#[from] RequestError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display_names_the_field() {
        let err = ValidationError::new("Deadline", "must be in the future");
        assert_eq!(err.to_string(), "Deadline: must be in the future");
    }

    #[test]
    fn rejected_request_renders_backend_detail_verbatim_unwrapped() {
        let err = RequestError::Rejected {
            detail: "Duplicate code".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate code");
    }
}
