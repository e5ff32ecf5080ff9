use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use quickloan::application::service::LoanApplicationService;
use quickloan::config::StorageConfig;
use quickloan::domain::application::ApplicationId;
use quickloan::domain::decision::DecisionEngine;
use quickloan::interfaces::csv::application_reader::ApplicationReader;
use quickloan::interfaces::json::dto::{LoanApplicationDto, SubmissionResponseDto};
use quickloan::telemetry;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

const IMPORT_HEADER: &str = "row,application_id,status";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true, env = "QUICKLOAN_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Log level or filter directive; RUST_LOG takes precedence.
    #[arg(long, global = true, env = "QUICKLOAN_LOG", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a loan application from a JSON file
    Submit {
        /// Application JSON (applicant, business, loanDetails)
        input: PathBuf,
    },
    /// Print a submitted application as JSON
    Show {
        /// Application id returned by `submit`
        id: ApplicationId,
    },
    /// Submit every row of a CSV file
    Import {
        /// Applications CSV file
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    telemetry::init(&cli.log_level).into_diagnostic()?;

    let store = StorageConfig::new(cli.db_path)
        .build_store()
        .into_diagnostic()?;
    let service = LoanApplicationService::new(DecisionEngine::default(), store);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Submit { input } => {
            let file = File::open(input).into_diagnostic()?;
            let request: LoanApplicationDto = serde_json::from_reader(file).into_diagnostic()?;
            let (applicant, business, loan) = request.into_domain().into_diagnostic()?;

            let application_id = service
                .submit(applicant, business, loan)
                .await
                .into_diagnostic()?;
            print_json(&mut out, &SubmissionResponseDto { application_id })?;
        }
        Command::Show { id } => {
            let view = service.get_by_id(id).await.into_diagnostic()?;
            print_json(&mut out, &LoanApplicationDto::from(view))?;
        }
        Command::Import { input } => {
            let file = File::open(input).into_diagnostic()?;
            let reader = ApplicationReader::new(file);
            writeln!(out, "{IMPORT_HEADER}").into_diagnostic()?;

            for (index, row) in reader.applications().enumerate() {
                let row_number = index + 1;
                let inputs = row.and_then(LoanApplicationDto::into_domain);
                let (applicant, business, loan) = match inputs {
                    Ok(inputs) => inputs,
                    Err(e) => {
                        tracing::warn!(row = row_number, error = %e, "skipping application row");
                        continue;
                    }
                };

                match service.submit_with_status(applicant, business, loan).await {
                    Ok((id, status)) => {
                        writeln!(out, "{row_number},{id},{status}")
                            .into_diagnostic()?;
                    }
                    Err(e) => {
                        tracing::warn!(
                            row = row_number,
                            error = %e,
                            "application row was not persisted"
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)
        .into_diagnostic()?;
    writeln!(out).into_diagnostic()
}
