//! Builds the synthetic email envelope for each mutating action.
//!
//! Subject-line commands (`ASSIGN`, `SUBMIT {code}`, `RETURN {code}
//! {student_id}`) are a stable contract with the backend's parser and must
//! not change shape.

use shared::{
    domain::{ActorRole, INBOX_ADDRESS},
    protocol::EmailEnvelope,
};
use uuid::Uuid;

/// Validated inputs for an `ASSIGN` envelope.
#[derive(Debug, Clone)]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub class_name: String,
    pub deadline: String,
    pub instructions: Option<String>,
}

/// Validated inputs for a `SUBMIT` envelope.
#[derive(Debug, Clone)]
pub struct SubmitWorkRequest {
    pub assignment_code: String,
    pub student_id: String,
}

/// Validated inputs for a `RETURN` envelope.
#[derive(Debug, Clone)]
pub struct ReturnGradeRequest {
    pub assignment_code: String,
    pub student_id: String,
    pub grade: String,
    pub feedback: Option<String>,
}

pub fn create_assignment_envelope(request: &CreateAssignmentRequest) -> EmailEnvelope {
    let mut body = format!(
        "Title: {}\nClass: {}\nDeadline: {}",
        request.title,
        request.class_name,
        deadline_line(&request.deadline)
    );
    // The backend parser treats Instructions as optional; skip the line
    // rather than send an empty value.
    if let Some(instructions) = &request.instructions {
        body.push_str(&format!("\nInstructions: {instructions}"));
    }
    envelope(ActorRole::Teacher, "ASSIGN".to_string(), body, "assign")
}

pub fn submit_work_envelope(request: &SubmitWorkRequest) -> EmailEnvelope {
    let code = request.assignment_code.to_uppercase();
    let student_id = request.student_id.to_uppercase();
    envelope(
        ActorRole::Student,
        format!("SUBMIT {code}"),
        format!("StudentID: {student_id}"),
        "submit",
    )
}

pub fn return_grade_envelope(request: &ReturnGradeRequest) -> EmailEnvelope {
    let code = request.assignment_code.to_uppercase();
    let student_id = request.student_id.to_uppercase();
    let body = format!(
        "Grade: {}\nFeedback: {}",
        request.grade,
        request.feedback.as_deref().unwrap_or_default()
    );
    envelope(
        ActorRole::Teacher,
        format!("RETURN {code} {student_id}"),
        body,
        "return",
    )
}

/// The backend's deadline grammar is `YYYY-MM-DD [HH:MM] CT`. A bare date
/// gets the end-of-day time spelled out; a date that already carries a time
/// must not get a second one.
fn deadline_line(deadline: &str) -> String {
    if deadline.contains(' ') {
        format!("{deadline} CT")
    } else {
        format!("{deadline} 23:59 CT")
    }
}

fn envelope(role: ActorRole, subject: String, body: String, purpose: &str) -> EmailEnvelope {
    EmailEnvelope {
        subject,
        body,
        from_email: role.from_address().to_string(),
        to_email: INBOX_ADDRESS.to_string(),
        message_id: fresh_message_id(purpose),
    }
}

/// Purpose tag + wall-clock millis + v4 uuid; unique across retriggered
/// sends even within the same millisecond.
fn fresh_message_id(purpose: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    format!(
        "{purpose}-{millis}-{}@assignment-helper.local",
        Uuid::new_v4().simple()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_envelope_carries_teacher_addressing_and_body_template() {
        let env = create_assignment_envelope(&CreateAssignmentRequest {
            title: "Essay draft".to_string(),
            class_name: "English 7".to_string(),
            deadline: "2026-01-15".to_string(),
            instructions: Some("Two pages minimum".to_string()),
        });
        assert_eq!(env.subject, "ASSIGN");
        assert_eq!(
            env.body,
            "Title: Essay draft\nClass: English 7\nDeadline: 2026-01-15 23:59 CT\nInstructions: Two pages minimum"
        );
        assert_eq!(env.from_email, "teacher@example.com");
        assert_eq!(env.to_email, "assignments@example.com");
        assert!(env.message_id.starts_with("assign-"));
    }

    #[test]
    fn assign_envelope_omits_instructions_line_when_absent() {
        let env = create_assignment_envelope(&CreateAssignmentRequest {
            title: "Essay draft".to_string(),
            class_name: "English 7".to_string(),
            deadline: "2026-01-15".to_string(),
            instructions: None,
        });
        assert!(!env.body.contains("Instructions:"));
        assert!(env.body.ends_with("23:59 CT"));
    }

    #[test]
    fn assign_envelope_keeps_explicit_deadline_time_intact() {
        let env = create_assignment_envelope(&CreateAssignmentRequest {
            title: "Essay draft".to_string(),
            class_name: "English 7".to_string(),
            deadline: "2026-01-15 17:00".to_string(),
            instructions: None,
        });
        assert!(env.body.contains("Deadline: 2026-01-15 17:00 CT"));
        assert!(!env.body.contains("23:59"));
    }

    #[test]
    fn submit_envelope_uppercases_code_and_student_id() {
        let env = submit_work_envelope(&SubmitWorkRequest {
            assignment_code: "eng7-0115".to_string(),
            student_id: "ab123".to_string(),
        });
        assert_eq!(env.subject, "SUBMIT ENG7-0115");
        assert_eq!(env.body, "StudentID: AB123");
        assert_eq!(env.from_email, "student@example.com");
    }

    #[test]
    fn return_envelope_embeds_code_and_student_in_subject() {
        let env = return_grade_envelope(&ReturnGradeRequest {
            assignment_code: "ENG7-0115".to_string(),
            student_id: "AB123".to_string(),
            grade: "A-".to_string(),
            feedback: Some("Strong thesis".to_string()),
        });
        assert_eq!(env.subject, "RETURN ENG7-0115 AB123");
        assert_eq!(env.body, "Grade: A-\nFeedback: Strong thesis");
        assert_eq!(env.from_email, "teacher@example.com");
    }

    #[test]
    fn message_ids_are_unique_per_envelope() {
        let request = SubmitWorkRequest {
            assignment_code: "ENG7-0115".to_string(),
            student_id: "AB123".to_string(),
        };
        let first = submit_work_envelope(&request);
        let second = submit_work_envelope(&request);
        assert_ne!(first.message_id, second.message_id);
    }
}
