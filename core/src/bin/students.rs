use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use student_core::{logging, ClientConfig, StudentInput, StudentService};

/// Command-line client for the student records API.
///
/// The backend location comes from `API_BASE_URL` (default
/// `http://localhost:8080/api`) and the per-request timeout from
/// `API_TIMEOUT_MS`; both may be set in a `.env` file.
#[derive(Debug, Parser)]
#[command(name = "students", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every student.
    List,
    /// Fetch one student by id.
    Get { id: String },
    /// Create a student; the server assigns the id.
    Create(StudentFields),
    /// Replace every field of an existing student.
    Update {
        id: String,
        #[command(flatten)]
        fields: StudentFields,
    },
    /// Delete a student by id.
    Delete { id: String },
    /// Search students by free-text query.
    Search { query: String },
}

#[derive(Debug, Args)]
struct StudentFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    roll_no: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    department: String,
    #[arg(long)]
    year: String,
}

impl From<StudentFields> for StudentInput {
    fn from(fields: StudentFields) -> Self {
        StudentInput {
            name: fields.name,
            roll_no: fields.roll_no,
            email: fields.email,
            phone: fields.phone,
            department: fields.department,
            year: fields.year,
        }
    }
}

fn main() -> anyhow::Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();
    let config = ClientConfig::load().context("failed to load configuration")?;
    let service = StudentService::new(&config);

    match cli.command {
        Command::List => print_json(&service.get_all_students()?),
        Command::Get { id } => print_json(&service.get_student_by_id(&id)?),
        Command::Create(fields) => print_json(&service.create_student(&fields.into())?),
        Command::Update { id, fields } => {
            print_json(&service.update_student(&id, &fields.into())?)
        }
        Command::Delete { id } => {
            service.delete_student(&id)?;
            tracing::info!(id = %id, "Deleted student");
            Ok(())
        }
        Command::Search { query } => print_json(&service.search_students(&query)?),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
