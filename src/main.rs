use crate::config::{AppConfig, Cli};
use crate::domain::ListingRecord;
use crate::extract::Extractor;
use crate::finance::{Calculator, JurisdictionResolver, RateTable};
use crate::input::{collect_listing_urls, read_link_column, split_candidates};
use crate::runner::{RunObserver, Runner};
use crate::scraper::{HttpTransport, ProxyFetcher, Sleeper, ThreadSleeper, USER_AGENT};
use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::rc::Rc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod domain;
mod errors;
mod extract;
mod finance;
mod input;
mod runner;
mod scraper;
mod spreadsheets;

#[cfg(test)]
mod tests;

/// Logs "n / total completed" as listings finish.
struct LogProgress;

impl RunObserver for LogProgress {
    fn on_record(&mut self, position: usize, total: usize, _record: &ListingRecord) {
        info!("{position} / {total} completed");
    }
}

/// Free-text URLs from the command line and `--urls-file`, plus the link
/// column of `--csv`. A CSV without a link column is reported, not fatal.
fn gather_candidates(cli: &Cli) -> Result<Vec<String>> {
    let mut candidates: Vec<String> = cli
        .urls
        .iter()
        .flat_map(|text| split_candidates(text))
        .map(str::to_string)
        .collect();

    if let Some(path) = &cli.urls_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        candidates.extend(split_candidates(&text).map(str::to_string));
    }

    if let Some(path) = &cli.csv {
        match read_link_column(path) {
            Ok(links) => candidates.extend(links),
            Err(e) => error!("Error: {e}"),
        }
    }

    Ok(candidates)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1️⃣ Logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,listing_scraper=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2️⃣ Configuration
    let config = AppConfig::from_env(&cli).context("Failed to load configuration")?;

    // 3️⃣ Input URLs
    let batch = collect_listing_urls(gather_candidates(&cli)?);
    if batch.rejected > 0 {
        warn!("Ignored {} input(s) that are not listing URLs", batch.rejected);
    }
    if batch.duplicates > 0 {
        let plural = if batch.duplicates > 1 { "s" } else { "" };
        info!(
            "Removed {} duplicate URL{plural}. Processing {} unique URLs.",
            batch.duplicates,
            batch.urls.len()
        );
    }

    // 4️⃣ Pipeline
    let sleeper: Rc<dyn Sleeper> = Rc::new(ThreadSleeper);
    let transport = HttpTransport::new(USER_AGENT, config.relay_timeout)
        .context("Failed to build HTTP client")?;
    let fetcher = ProxyFetcher::new(
        Box::new(transport),
        config.relays.clone(),
        config.relay_pause,
        sleeper.clone(),
    );
    let runner = Runner::new(
        fetcher,
        Extractor::new().context("Failed to compile extraction rules")?,
        Calculator::new(RateTable::us_states()),
        JurisdictionResolver::new().context("Failed to compile jurisdiction rules")?,
        sleeper,
        config.run.clone(),
    );

    let outcome = runner
        .run(&batch.urls, &mut LogProgress)
        .context("Please enter valid listing URLs")?;

    // 5️⃣ Export
    let path = spreadsheets::export(
        &outcome.records,
        config.format,
        config.include_total_monthly,
        config.output.as_deref(),
    )
    .context("Failed to export results")?;

    info!(
        "Scraping Complete! Successfully processed: {} properties, Failed: {} properties, Total: {} properties",
        outcome.summary.successful, outcome.summary.failed, outcome.summary.total
    );
    info!("Results written to {}", path.display());

    Ok(())
}
