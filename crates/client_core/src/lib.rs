use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use shared::protocol::{
    AssignmentStatusReport, AssignmentView, EmailEnvelope, ErrorBody, ProcessEmailOutcome,
};
use tracing::{info, warn};
use url::Url;

pub mod envelope;
pub mod error;
pub mod render;
pub mod validate;

use envelope::{
    create_assignment_envelope, return_grade_envelope, submit_work_envelope,
    CreateAssignmentRequest, ReturnGradeRequest, SubmitWorkRequest,
};
use error::{ActionError, RequestError, ValidationError};
use validate::{validate_field, FieldKind};

/// Seam between the controller and the assignment backend. Production code
/// goes through [`HttpBackend`]; tests inject fakes.
#[async_trait]
pub trait AssignmentBackend: Send + Sync {
    /// Delivers one envelope and returns the backend's confirmation text.
    async fn process_email(&self, envelope: &EmailEnvelope) -> Result<String, RequestError>;
    async fn list_assignments(&self) -> Result<Vec<AssignmentView>, RequestError>;
    async fn assignment_status(&self, code: &str)
        -> Result<AssignmentStatusReport, RequestError>;
}

/// reqwest-backed implementation of [`AssignmentBackend`].
///
/// One outbound request per call; no retries, no client-enforced timeout.
pub struct HttpBackend {
    http: Client,
    server_url: String,
}

impl HttpBackend {
    /// `server_url` must be an absolute http(s) URL; a trailing slash is
    /// tolerated.
    pub fn new(server_url: impl Into<String>) -> Result<Self, url::ParseError> {
        Self::with_client(Client::new(), server_url)
    }

    fn with_client(http: Client, server_url: impl Into<String>) -> Result<Self, url::ParseError> {
        let server_url = server_url.into();
        Url::parse(&server_url)?;
        Ok(Self {
            http,
            server_url: server_url.trim_end_matches('/').to_string(),
        })
    }

    /// Extracts the backend's `detail` from a non-OK response, falling back
    /// to the status line when the body is not the expected shape.
    async fn rejection_detail(response: reqwest::Response) -> RequestError {
        let status = response.status();
        let detail = match response.json::<ErrorBody>().await {
            Ok(body) => body.detail,
            Err(_) => format!("server returned {status}"),
        };
        RequestError::Rejected { detail }
    }
}

#[async_trait]
impl AssignmentBackend for HttpBackend {
    async fn process_email(&self, envelope: &EmailEnvelope) -> Result<String, RequestError> {
        let response = self
            .http
            .post(format!("{}/api/process-email", self.server_url))
            .json(envelope)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection_detail(response).await);
        }

        let outcome: ProcessEmailOutcome = response.json().await?;
        if outcome.success {
            outcome.response.ok_or_else(|| {
                RequestError::UnexpectedResponse(
                    "success acknowledged without a response text".to_string(),
                )
            })
        } else {
            Err(RequestError::Rejected {
                detail: outcome
                    .detail
                    .unwrap_or_else(|| "request rejected without detail".to_string()),
            })
        }
    }

    async fn list_assignments(&self) -> Result<Vec<AssignmentView>, RequestError> {
        let response = self
            .http
            .get(format!("{}/api/assignments", self.server_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection_detail(response).await);
        }

        Ok(response.json().await?)
    }

    async fn assignment_status(
        &self,
        code: &str,
    ) -> Result<AssignmentStatusReport, RequestError> {
        let response = self
            .http
            .get(format!("{}/api/assignments/{code}/status", self.server_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection_detail(response).await);
        }

        Ok(response.json().await?)
    }
}

/// Raw field values of the create-assignment form, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct CreateAssignmentForm {
    pub title: String,
    pub class_name: String,
    pub deadline: String,
    pub instructions: String,
}

/// Raw field values of the submit-work form.
#[derive(Debug, Clone, Default)]
pub struct SubmitWorkForm {
    pub assignment_code: String,
    pub student_id: String,
}

/// Raw field values of the return-grade form.
#[derive(Debug, Clone, Default)]
pub struct ReturnGradeForm {
    pub assignment_code: String,
    pub student_id: String,
    pub grade: String,
    pub feedback: String,
}

/// Result of one successful mutating action: the backend's confirmation
/// plus the refreshed listing. `listing` is `None` when the refresh itself
/// failed; the confirmation still stands.
#[derive(Debug)]
pub struct ActionOutcome {
    pub confirmation: String,
    pub listing: Option<Vec<AssignmentView>>,
}

/// Stateless controller for the three forms and the two queries.
///
/// Each operation is one validate → build → send → report cycle; validation
/// failure short-circuits before any request leaves the process, and no
/// state is held across calls.
pub struct FormController<B> {
    backend: B,
}

impl<B: AssignmentBackend> FormController<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub async fn create_assignment(
        &self,
        form: &CreateAssignmentForm,
    ) -> Result<ActionOutcome, ActionError> {
        let now = Utc::now();
        let request = CreateAssignmentRequest {
            title: validate_field(&form.title, FieldKind::Text, "Title", now)?,
            class_name: validate_field(&form.class_name, FieldKind::Text, "Class", now)?,
            deadline: validate_field(&form.deadline, FieldKind::Date, "Deadline", now)?,
            instructions: optional_text(&form.instructions, "Instructions")?,
        };
        self.dispatch(create_assignment_envelope(&request)).await
    }

    pub async fn submit_work(
        &self,
        form: &SubmitWorkForm,
    ) -> Result<ActionOutcome, ActionError> {
        let now = Utc::now();
        let request = SubmitWorkRequest {
            assignment_code: validate_field(
                &form.assignment_code,
                FieldKind::AssignmentCode,
                "Assignment code",
                now,
            )?,
            student_id: validate_field(&form.student_id, FieldKind::StudentId, "Student ID", now)?,
        };
        self.dispatch(submit_work_envelope(&request)).await
    }

    pub async fn return_grade(
        &self,
        form: &ReturnGradeForm,
    ) -> Result<ActionOutcome, ActionError> {
        let now = Utc::now();
        let request = ReturnGradeRequest {
            assignment_code: validate_field(
                &form.assignment_code,
                FieldKind::AssignmentCode,
                "Assignment code",
                now,
            )?,
            student_id: validate_field(&form.student_id, FieldKind::StudentId, "Student ID", now)?,
            grade: validate_field(&form.grade, FieldKind::Text, "Grade", now)?,
            feedback: optional_text(&form.feedback, "Feedback")?,
        };
        self.dispatch(return_grade_envelope(&request)).await
    }

    pub async fn assignment_status(
        &self,
        code: &str,
    ) -> Result<AssignmentStatusReport, ActionError> {
        let validated = validate_field(
            code,
            FieldKind::AssignmentCode,
            "Assignment code",
            Utc::now(),
        )?;
        Ok(self.backend.assignment_status(&validated).await?)
    }

    pub async fn list_assignments(&self) -> Result<Vec<AssignmentView>, ActionError> {
        Ok(self.backend.list_assignments().await?)
    }

    /// Sends one envelope and, on success, refreshes the listing exactly
    /// once. A failed refresh never masks the confirmation.
    async fn dispatch(&self, envelope: EmailEnvelope) -> Result<ActionOutcome, ActionError> {
        info!(
            subject = %envelope.subject,
            message_id = %envelope.message_id,
            "dispatching envelope"
        );
        let confirmation = self.backend.process_email(&envelope).await?;

        let listing = match self.backend.list_assignments().await {
            Ok(listing) => Some(listing),
            Err(err) => {
                warn!(subject = %envelope.subject, "listing refresh failed: {err}");
                None
            }
        };

        Ok(ActionOutcome {
            confirmation,
            listing,
        })
    }
}

/// Validates a text field that may legitimately be left blank.
fn optional_text(raw: &str, field: &str) -> Result<Option<String>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    validate_field(raw, FieldKind::Text, field, Utc::now()).map(Some)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
