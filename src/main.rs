use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use wiki_holidays::batch;
use wiki_holidays::cache::ReportCache;
use wiki_holidays::fetch::WikiClient;
use wiki_holidays::settings::Settings;

#[derive(Parser)]
#[command(name = "wiki_holidays", about = "Holidays, name days and omens from Russian Wikipedia day pages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report for today in the configured time zone
    Today,
    /// Report for a specific date
    Day {
        /// Date as YYYY-MM-DD
        date: NaiveDate,
    },
    /// Parse a local extract file
    Parse {
        file: PathBuf,
        /// Print the report as JSON instead of rendering it
        #[arg(long)]
        json: bool,
    },
    /// Fetch and parse every day of a leap year into one JSON file
    Batch {
        #[arg(short, long, default_value = "holidays.json")]
        out: PathBuf,
        #[arg(short, long, default_value_t = batch::DEFAULT_YEAR)]
        year: i32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;

    let result = match cli.command {
        Commands::Today => {
            let tz = settings.tz()?;
            let today = Utc::now().with_timezone(&tz).date_naive();
            show_day(&settings, today).await
        }
        Commands::Day { date } => show_day(&settings, date).await,
        Commands::Parse { file, json } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let report = wiki_holidays::parse(&text)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report);
            }
            Ok(())
        }
        Commands::Batch { out, year } => {
            println!("Fetching {} days of {}...", batch::year_days(year).len(), year);
            let stats = batch::run(&settings, year, &out).await?;
            println!(
                "Done: {} days ({} fetched, {} parsed) -> {}",
                stats.total,
                stats.fetched,
                stats.parsed,
                out.display()
            );
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

async fn show_day(settings: &Settings, date: NaiveDate) -> anyhow::Result<()> {
    let cache = ReportCache::new(WikiClient::new(settings)?);
    let report = cache.get(date).await;
    // a successful parse always carries stats
    if report.stats.is_empty() {
        println!("No report for {}.", date);
        return Ok(());
    }
    print!("{}", report);
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
