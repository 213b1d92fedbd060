//! Pacientes registry terminal client

use std::io;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use pacientes_cli::render::{confirm, delete_prompt, render_record, render_table};
use pacientes_cli::{ApiClient, ApiError, DEFAULT_API_URL};
use pacientes_persistence::types::PatientId;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pacientes-cli", version, about = "Patient registry terminal client")]
struct Cli {
    /// Base URL of the registry API.
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register a new patient
    Register(RegisterArgs),
    /// List every registered patient, newest first
    List,
    /// Show one patient
    Show {
        /// Patient id
        id: PatientId,
    },
    /// Delete a patient
    Delete {
        /// Patient id
        id: PatientId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

// Numbers are taken as text so that malformed values get the same
// field messages the server would give.
#[derive(Debug, Args)]
struct RegisterArgs {
    /// First name
    #[arg(long)]
    nombre: String,

    /// Surname
    #[arg(long)]
    apellido: String,

    /// Weight in kilograms
    #[arg(long, allow_hyphen_values = true)]
    peso: String,

    /// Height in metres
    #[arg(long, allow_hyphen_values = true)]
    talla: String,

    /// Diagnosis
    #[arg(long)]
    diagnostico: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match ApiClient::new(&cli.api_url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(ApiError::Transport(e)) => {
            tracing::debug!(error = %e, "Request failed");
            eprintln!("could not reach the server at {}", client.base_url());
            ExitCode::FAILURE
        }
        Err(ApiError::Validation(errors)) => {
            eprintln!("The patient was not registered:");
            for error in errors {
                eprintln!("  - {}", error);
            }
            ExitCode::FAILURE
        }
        Err(ApiError::Api { message, .. }) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &ApiClient, command: Command) -> Result<(), ApiError> {
    match command {
        Command::Register(args) => {
            let payload = json!({
                "nombre": args.nombre,
                "apellido": args.apellido,
                "peso": args.peso,
                "talla": args.talla,
                "diagnostico": args.diagnostico,
            });
            let record = client.register(&payload).await?;
            println!("Patient registered successfully.\n");
            print!("{}", render_record(&record));
        }
        Command::List => {
            let records = client.list().await?;
            print!("{}", render_table(&records));
        }
        Command::Show { id } => {
            let record = client.get(id).await?;
            print!("{}", render_record(&record));
        }
        Command::Delete { id, yes } => {
            let record = client.get(id).await?;
            if !yes {
                let confirmed = confirm(&delete_prompt(&record), io::stdin().lock(), io::stdout())
                    .unwrap_or(false);
                if !confirmed {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            let deleted = client.delete(id).await?;
            println!("Patient \"{}\" deleted.", deleted.full_name());
        }
    }
    Ok(())
}
