mod cli;
mod logging;
mod site;

use anyhow::{Context, Result};
use caam_core::cache::CacheManager;
use caam_core::pipeline::{self, Fetch};
use caam_core::{DirectorySearch, EventSchedule, SearchOutcome, SheetsClient, SiteConfig};
use chrono::Utc;
use clap::Parser;
use tracing::{info, warn};

use crate::cli::{Cli, Command, SearchArgs};
use crate::site::SiteBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; variables may come from the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = SiteConfig::from_env().context("Invalid configuration")?;
    let _log_guard = logging::init_tracing(config.log_dir.as_deref());
    info!(version = env!("CARGO_PKG_VERSION"), "Starting caam-site");

    let client = SheetsClient::new(config.api_key.clone()).context("Failed to create Sheets client")?;

    match cli.command {
        Command::Build { out, strict } => build(client, config, out, strict).await,
        Command::Events => print_events(&client, &config).await,
        Command::Search(args) => search(&client, &config, &args).await,
    }
}

async fn build(
    client: SheetsClient,
    config: SiteConfig,
    out: Option<std::path::PathBuf>,
    strict: bool,
) -> Result<()> {
    let cache = match config.cache_ttl_minutes {
        Some(_) => match config.cache_dir().and_then(CacheManager::new) {
            Ok(cache) => Some(cache),
            Err(e) => {
                warn!(error = %e, "Cache unavailable, fetching fresh data");
                None
            }
        },
        None => None,
    };

    let mut builder = SiteBuilder::new(client, config);
    if let Some(cache) = cache {
        builder = builder.with_cache(cache);
    }

    let out_dir = builder.output_dir(out);
    let report = builder.build(&out_dir, Utc::now(), strict).await?;
    println!(
        "Wrote {} events ({:?}), {} professionals ({:?}) and {} documents to {}",
        report.event_count,
        report.events,
        report.professional_count,
        report.directory,
        report.documents,
        out_dir.display()
    );
    Ok(())
}

async fn print_events(client: &SheetsClient, config: &SiteConfig) -> Result<()> {
    let fetch = pipeline::load_event_schedule(
        client,
        &config.immersion_sheet_id,
        &config.sheet_range,
        Utc::now(),
    )
    .await;
    let schedule: EventSchedule = match fetch {
        Fetch::Unavailable(e) => return Err(e).context("Events sheet unavailable"),
        other => other.unwrap_or_default(),
    };

    if schedule.is_empty() {
        println!("No events scheduled.");
        return Ok(());
    }

    match &schedule.next_event {
        Some(next) => println!("Next: {} ({})", next.name, next.formatted_date()),
        None => println!("Next: none"),
    }
    println!("\nUpcoming:");
    for event in &schedule.upcoming {
        println!("  {}  {}", event.formatted_date(), event.name);
    }
    println!("\nPast:");
    for event in &schedule.past {
        println!("  {}  {}", event.formatted_date(), event.name);
    }
    Ok(())
}

async fn search(client: &SheetsClient, config: &SiteConfig, args: &SearchArgs) -> Result<()> {
    let directory = pipeline::load_directory(client, &config.members_sheet_id, &config.sheet_range)
        .await
        .into_result()
        .context("Directory sheet unavailable")?;

    let mut search = DirectorySearch::new(&directory.professionals);
    search.submit(args.selection());

    match search.outcome() {
        SearchOutcome::NotSearched => {}
        SearchOutcome::NoMatches => println!("No professionals match the selected filters."),
        SearchOutcome::Matches(count) => {
            println!("{} match(es):", count);
            for professional in search.results() {
                println!(
                    "  {:<28} {:<24} {}",
                    professional.full_name(),
                    professional.location(),
                    professional.speciality.join(", ")
                );
            }
        }
    }
    Ok(())
}
