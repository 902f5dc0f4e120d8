use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    error::ActionError,
    render::{render_listing, render_status},
    ActionOutcome, CreateAssignmentForm, FormController, HttpBackend, ReturnGradeForm,
    SubmitWorkForm,
};

mod config;

#[derive(Parser, Debug)]
#[command(about = "Terminal front end for the email-first assignment backend")]
struct Cli {
    /// Backend base URL; overrides client.toml and SERVER_URL.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an assignment (teacher action).
    CreateAssignment {
        #[arg(long)]
        title: String,
        #[arg(long)]
        class_name: String,
        /// Deadline date, e.g. 2026-01-15 or "2026-01-15 17:00".
        #[arg(long)]
        deadline: String,
        #[arg(long, default_value = "")]
        instructions: String,
    },
    /// Submit work for an assignment (student action).
    SubmitWork {
        assignment_code: String,
        student_id: String,
    },
    /// Return a grade for a submission (teacher action).
    ReturnGrade {
        assignment_code: String,
        student_id: String,
        #[arg(long)]
        grade: String,
        #[arg(long, default_value = "")]
        feedback: String,
    },
    /// Show one assignment with its submissions.
    Status { assignment_code: String },
    /// List all assignments.
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let cli = Cli::parse();

    let mut settings = config::load_settings();
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }

    let backend = HttpBackend::new(&settings.server_url)
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;
    let controller = FormController::new(backend);

    let result = run_command(&controller, cli.command).await;
    match result {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(err) => {
            // Both validation and request failures end here, rendered
            // inline; neither escapes as a panic or raw backtrace.
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

async fn run_command(
    controller: &FormController<HttpBackend>,
    command: Command,
) -> std::result::Result<String, ActionError> {
    match command {
        Command::CreateAssignment {
            title,
            class_name,
            deadline,
            instructions,
        } => {
            let outcome = controller
                .create_assignment(&CreateAssignmentForm {
                    title,
                    class_name,
                    deadline,
                    instructions,
                })
                .await?;
            Ok(render_outcome(outcome))
        }
        Command::SubmitWork {
            assignment_code,
            student_id,
        } => {
            let outcome = controller
                .submit_work(&SubmitWorkForm {
                    assignment_code,
                    student_id,
                })
                .await?;
            Ok(render_outcome(outcome))
        }
        Command::ReturnGrade {
            assignment_code,
            student_id,
            grade,
            feedback,
        } => {
            let outcome = controller
                .return_grade(&ReturnGradeForm {
                    assignment_code,
                    student_id,
                    grade,
                    feedback,
                })
                .await?;
            Ok(render_outcome(outcome))
        }
        Command::Status { assignment_code } => {
            let report = controller.assignment_status(&assignment_code).await?;
            Ok(render_status(&report))
        }
        Command::List => {
            let assignments = controller.list_assignments().await?;
            Ok(render_listing(&assignments))
        }
    }
}

fn render_outcome(outcome: ActionOutcome) -> String {
    match outcome.listing {
        Some(listing) => format!(
            "{}\n\nAssignments:\n{}",
            outcome.confirmation,
            render_listing(&listing)
        ),
        None => outcome.confirmation,
    }
}
