mod client;
mod table;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use drr_core::{parse_date, parse_draft, summarize, RecordService, ValidationError};
use tracing_subscriber::EnvFilter;

use crate::client::HttpRecordRepository;

#[derive(Parser)]
#[command(name = "drr")]
#[command(about = "Daily Run Rate calculator and record client", long_about = None)]
struct Cli {
    /// Base URL of the record API
    #[arg(long, env = "DRR_API_URL", default_value = "http://localhost:8000", global = true)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Preview working days, Sundays and DRR for a range (no network)
    Calc {
        /// First day, YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// Last day, YYYY-MM-DD (inclusive)
        #[arg(long)]
        end: String,
        /// Lead count
        #[arg(long, default_value = "")]
        leads: String,
    },
    /// Submit a record (usage: add start:2024-01-01 end:2024-01-07 leads:50)
    Add {
        /// key:value pairs; keys may be shortened to a unique prefix
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List stored records with derived columns
    List,
    /// Delete a record by id
    Delete {
        id: String,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Calc { start, end, leads } => {
            let start = parse_date(&start)?;
            let end = parse_date(&end)?;
            if start > end {
                println!("Warning: start date is after end date; the range is empty.");
            }
            println!("{}", table::render_summary(&summarize(start, end, &leads)));
        }
        Commands::Add { args } => {
            let draft = parse_draft(&args)?;
            let service = RecordService::new(HttpRecordRepository::new(&cli.api_url)?);
            match service.submit(&draft) {
                Ok(record) => {
                    println!("Record added (ID: {})", record.id().unwrap_or("-"));
                    if let Some(drr) = record.get("expectedDRR").and_then(|v| v.as_str()) {
                        println!("  Expected DRR: {}", drr);
                    }
                }
                Err(e) if e.is::<ValidationError>() => {
                    println!("Error: {}", e);
                    println!("Please fill in all required fields with valid values.");
                }
                Err(e) => {
                    tracing::error!("Error submitting data: {:#}", e);
                    return Err(e);
                }
            }
        }
        Commands::List => {
            let service = RecordService::new(HttpRecordRepository::new(&cli.api_url)?);
            let records = service.list().inspect_err(|e| tracing::error!("Error fetching data: {:#}", e))?;
            let now = Utc::now();
            let rows = records.iter().map(|r| drr_core::RecordRow::from_record(r, now)).collect();
            println!("{}", table::render_records(rows, &records));
        }
        Commands::Delete { id } => {
            let service = RecordService::new(HttpRecordRepository::new(&cli.api_url)?);
            match service.delete(&id).inspect_err(|e| tracing::error!("Error deleting data: {:#}", e))? {
                Some(_) => println!("Record {} deleted.", id),
                None => println!("Data not found: {}", id),
            }
        }
    }
    Ok(())
}
