//! Pure projection-to-text renderers.
//!
//! Everything interpolated here is emitted as literal text; no value from
//! the backend is ever interpreted as markup, so echoed user input (titles,
//! instructions, feedback) cannot smuggle structure into the output.

use shared::protocol::{AssignmentStatusReport, AssignmentView, SubmissionView};

const NO_ASSIGNMENTS_NOTICE: &str = "No assignments found.";
const NO_SUBMISSIONS_NOTICE: &str = "No submissions yet.";

/// One summary block per assignment, or an explicit notice for an empty
/// slate — never an empty rendering.
pub fn render_listing(assignments: &[AssignmentView]) -> String {
    if assignments.is_empty() {
        return NO_ASSIGNMENTS_NOTICE.to_string();
    }

    let mut out = String::new();
    for (index, assignment) in assignments.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        push_assignment_summary(&mut out, assignment);
    }
    out
}

/// Full status view: the assignment followed by its submissions, each
/// tagged from the server-supplied `on_time` flag.
pub fn render_status(report: &AssignmentStatusReport) -> String {
    let mut out = String::new();
    push_assignment_summary(&mut out, &report.assignment);
    if let Some(instructions) = &report.assignment.instructions {
        out.push_str(&format!("  Instructions: {instructions}\n"));
    }

    out.push('\n');
    if report.submissions.is_empty() {
        out.push_str(NO_SUBMISSIONS_NOTICE);
        out.push('\n');
        return out;
    }

    out.push_str("Submissions:\n");
    for submission in &report.submissions {
        out.push_str(&render_submission_line(submission));
        out.push('\n');
    }
    out
}

fn push_assignment_summary(out: &mut String, assignment: &AssignmentView) {
    out.push_str(&format!(
        "[{}] {}\n  Class: {}\n  Due: {} {}\n  Status: {}\n",
        assignment.code,
        assignment.title,
        assignment.class_name,
        assignment.deadline_at.format("%Y-%m-%d %H:%M"),
        assignment.deadline_tz,
        assignment.status,
    ));
}

fn render_submission_line(submission: &SubmissionView) -> String {
    let timeliness = if submission.on_time { "On Time" } else { "Late" };
    format!(
        "  Student {} - {} (received {})",
        submission.student_id,
        timeliness,
        submission.received_at.format("%Y-%m-%d %H:%M"),
    )
}
