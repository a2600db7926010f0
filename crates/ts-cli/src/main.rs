//! Command-line client for Timesheet RS

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use ts_models::DayType;

mod client;
mod form;
mod render;

use client::TimesheetClient;
use form::{DraftDay, Submission, UpdatePayload};

#[derive(Parser, Debug)]
#[command(name = "timesheet", version, about = "Record and review working, sick and vacation days")]
pub struct Cli {
    /// Base URL of the timesheet server
    #[arg(long, env = "TIMESHEET_API_URL", default_value = "http://localhost:3000", global = true)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit a batch of days under a fresh cost id
    Submit {
        /// A day as DATE:TYPE[:HOURS], e.g. 2024-03-01:working:8
        #[arg(long = "day", required = true)]
        days: Vec<String>,
    },
    /// Show the year view for a cost id
    View {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        cost_id: String,
    },
    /// Update a single day
    Update {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long, value_parser = parse_day_type)]
        day_type: DayType,
        #[arg(long)]
        hours: Option<u32>,
        /// Narrows the target entry and, with --year, re-fetches the view
        #[arg(long)]
        cost_id: Option<String>,
        #[arg(long)]
        year: Option<i32>,
    },
}

fn parse_day_type(value: &str) -> Result<DayType, String> {
    value.parse::<DayType>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = TimesheetClient::new(&cli.api_url)?;
    run(cli.command, &client).await
}

async fn run(command: Command, client: &TimesheetClient) -> Result<()> {
    match command {
        Command::Submit { days } => {
            let drafts = days
                .iter()
                .map(|day| DraftDay::parse(day))
                .collect::<Result<Vec<_>, _>>()?;
            let submission = Submission::new(&drafts);

            let envelope = client
                .create(&submission)
                .await
                .context("Failed to submit timesheet")?;
            println!("{}", envelope.message);
            print!("{}", render::render_created(&envelope.data, &submission.cost_id));
        }
        Command::View { year, cost_id } => {
            let envelope = client
                .by_year(year, &cost_id)
                .await
                .context("Failed to fetch timesheet")?;
            print!("{}", render::render_year(&envelope.data));
        }
        Command::Update { date, day_type, hours, cost_id, year } => {
            if day_type == DayType::Working && hours == Some(0) {
                bail!("working days need more than 0 hours");
            }
            let payload = UpdatePayload::new(date, day_type, hours, cost_id.clone());
            let envelope = client
                .bulk_update(&[payload])
                .await
                .context("Failed to update timesheet")?;
            println!("{}", envelope.message);
            print!("{}", render::render_entries(&envelope.data));

            if let (Some(cost_id), Some(year)) = (cost_id, year) {
                let view = client
                    .by_year(year, &cost_id)
                    .await
                    .context("Failed to refresh timesheet")?;
                println!();
                print!("{}", render::render_year(&view.data));
            }
        }
    }
    Ok(())
}
