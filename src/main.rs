use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use ytreporty::api::reports::ReportFilters;
use ytreporty::api::{jobs, reports};
use ytreporty::{ApiResponse, AppPaths, Client, Environment, YtreportyError};

#[derive(Parser)]
#[command(name = "ytreporty", version, about = "List and manipulate YouTube Reporting API jobs")]
struct Cli {
    /// Print info-level log messages
    #[arg(short, long)]
    verbose: bool,

    /// Client-secret filename inside the config directory
    #[arg(long, default_value = "client_secret.json")]
    secret: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new reporting job
    Create {
        #[command(subcommand)]
        resource: CreateResource,
    },

    /// Delete a reporting job
    Delete {
        #[command(subcommand)]
        resource: DeleteResource,
    },

    /// Retrieve information about a reporting job or a specific report
    Get {
        #[command(subcommand)]
        resource: GetResource,
    },

    /// List reporting jobs, reports, or report types
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// Fetch the contents of a report
    Fetch {
        /// ID of the reporting job
        job_id: String,

        /// ID of the report
        report_id: String,
    },
}

#[derive(Subcommand)]
enum CreateResource {
    /// Create a reporting job
    Jobs {
        /// ID of the report type
        report_type_id: String,

        /// Name of the reporting job
        name: String,
    },
}

#[derive(Subcommand)]
enum DeleteResource {
    /// Delete a reporting job
    Jobs {
        /// ID of the reporting job to delete
        job_id: String,
    },
}

#[derive(Subcommand)]
enum GetResource {
    /// Retrieve information about a reporting job
    Jobs {
        /// ID of the reporting job
        job_id: String,
    },

    /// Retrieve information about a specific report
    #[command(name = "jobs.reports")]
    JobsReports {
        /// ID of the reporting job
        job_id: String,

        /// ID of the report
        report_id: String,
    },
}

#[derive(Subcommand)]
enum ListResource {
    /// List reporting jobs
    Jobs,

    /// List reports from a reporting job
    #[command(name = "jobs.reports")]
    JobsReports {
        /// ID of the reporting job
        job_id: String,

        /// Limit to reports created after the given ISO timestamp
        #[arg(long, value_parser = parse_cli_timestamp)]
        created_after: Option<DateTime<Utc>>,

        /// Limit to reports whose oldest data starts on or after the given timestamp
        #[arg(long, value_parser = parse_cli_timestamp)]
        start_time_at_or_after: Option<DateTime<Utc>>,

        /// Limit to reports whose oldest data starts before the given timestamp
        #[arg(long, value_parser = parse_cli_timestamp)]
        start_time_before: Option<DateTime<Utc>>,
    },

    /// List available report types
    #[command(name = "reportTypes")]
    ReportTypes,
}

fn parse_cli_timestamp(input: &str) -> Result<DateTime<Utc>, String> {
    ytreporty::timefmt::parse_timestamp(input).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("YTREPORTY_LOG_LEVEL")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), YtreportyError> {
    let mut env = Environment::load(AppPaths::resolve(), &cli.secret)?;
    let client = Client::new();

    let response = match cli.command {
        Commands::Create {
            resource: CreateResource::Jobs { report_type_id, name },
        } => jobs::create(&client, &mut env, &report_type_id, &name).await?,
        Commands::Delete {
            resource: DeleteResource::Jobs { job_id },
        } => jobs::delete(&client, &mut env, &job_id).await?,
        Commands::Get { resource } => match resource {
            GetResource::Jobs { job_id } => jobs::get(&client, &mut env, &job_id).await?,
            GetResource::JobsReports { job_id, report_id } => {
                reports::get(&client, &mut env, &job_id, &report_id).await?
            }
        },
        Commands::List { resource } => match resource {
            ListResource::Jobs => jobs::list(&client, &mut env).await?,
            ListResource::JobsReports {
                job_id,
                created_after,
                start_time_at_or_after,
                start_time_before,
            } => {
                let filters = ReportFilters {
                    created_after,
                    start_time_at_or_after,
                    start_time_before,
                };
                reports::list(&client, &mut env, &job_id, &filters).await?
            }
            ListResource::ReportTypes => reports::list_types(&client, &mut env).await?,
        },
        Commands::Fetch { job_id, report_id } => {
            reports::fetch(&client, &mut env, &job_id, &report_id).await?
        }
    };

    print_response(&response);
    Ok(())
}

fn print_response(response: &ApiResponse) {
    match response {
        // Report contents go out exactly as received, no trailing newline added.
        ApiResponse::Text(text) => print!("{text}"),
        ApiResponse::Json(doc) => {
            println!(
                "{}",
                serde_json::to_string_pretty(doc).unwrap_or_else(|_| doc.to_string())
            );
        }
    }
}
