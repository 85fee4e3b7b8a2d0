// src/config.rs

use crate::errors::ConfigError;
use crate::runner::{MortgageSource, RunSettings};
use crate::scraper::{PacingWindow, RelayTemplate, DEFAULT_RELAYS};
use crate::spreadsheets::ExportFormat;
use clap::{Parser, ValueEnum};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Scrape listing pages into a spreadsheet with mortgage estimates")]
pub struct Cli {
    /// Listing URLs; separate with whitespace or commas
    pub urls: Vec<String>,

    /// Text file of listing URLs
    #[arg(long)]
    pub urls_file: Option<PathBuf>,

    /// CSV file with a "Links" column
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Output file [default: zilla-scrapa-results-<timestamp>.<ext>]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Relay template, repeatable; `{url}` marks the target, otherwise it is appended
    #[arg(long = "relay")]
    pub relays: Vec<String>,

    /// Extra attempts per listing after the first failure
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Drop the "Total Monthly" column
    #[arg(long)]
    pub no_total_monthly: bool,

    /// Where the mortgage estimate comes from
    #[arg(long, value_enum)]
    pub mortgage_source: Option<MortgageSource>,
}

/// Everything a run needs, resolved from flags, then environment, then defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub output: Option<PathBuf>,
    pub format: ExportFormat,
    pub relays: Vec<RelayTemplate>,
    pub relay_timeout: Duration,
    pub relay_pause: Duration,
    pub include_total_monthly: bool,
    pub run: RunSettings,
}

impl AppConfig {
    /// Loads `.env` if present, then resolves against the process environment.
    pub fn from_env(cli: &Cli) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::resolve(cli, |key| env::var(key).ok())
    }

    pub fn resolve(
        cli: &Cli,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let number = |key: &str, default: u64| -> Result<u64, ConfigError> {
            match lookup(key) {
                None => Ok(default),
                Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                    key: key.to_string(),
                    value,
                }),
            }
        };
        let choice = |key: &str| lookup(key).map(|v| v.trim().to_string());

        let format = match (cli.format, choice("SCRAPER_FORMAT")) {
            (Some(f), _) => f,
            (None, Some(value)) => {
                ExportFormat::from_str(&value, true).map_err(|_| ConfigError::InvalidChoice {
                    key: "SCRAPER_FORMAT".into(),
                    value,
                })?
            }
            (None, None) => ExportFormat::default(),
        };

        let mortgage_source = match (cli.mortgage_source, choice("SCRAPER_MORTGAGE_SOURCE")) {
            (Some(m), _) => m,
            (None, Some(value)) => {
                MortgageSource::from_str(&value, true).map_err(|_| {
                    ConfigError::InvalidChoice {
                        key: "SCRAPER_MORTGAGE_SOURCE".into(),
                        value,
                    }
                })?
            }
            (None, None) => MortgageSource::default(),
        };

        let relay_sources: Vec<String> = if !cli.relays.is_empty() {
            cli.relays.clone()
        } else if let Some(list) = lookup("SCRAPER_RELAYS") {
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        } else {
            DEFAULT_RELAYS.iter().map(|s| s.to_string()).collect()
        };
        let mut relays = relay_sources
            .iter()
            .map(|r| RelayTemplate::parse(r))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(key) = lookup("ZENROWS_API_KEY").filter(|k| !k.trim().is_empty()) {
            relays.insert(0, RelayTemplate::zenrows(key.trim()));
        }

        let pacing_min = number("SCRAPER_PACING_MIN_MS", 3_000)?;
        let pacing_max = number("SCRAPER_PACING_MAX_MS", 5_000)?;
        if pacing_min > pacing_max {
            return Err(ConfigError::PacingWindow {
                min: pacing_min,
                max: pacing_max,
            });
        }

        let max_retries = match cli.max_retries {
            Some(n) => n,
            None => u32::try_from(number("SCRAPER_MAX_RETRIES", 2)?).map_err(|_| {
                ConfigError::InvalidNumber {
                    key: "SCRAPER_MAX_RETRIES".into(),
                    value: lookup("SCRAPER_MAX_RETRIES").unwrap_or_default(),
                }
            })?,
        };

        Ok(Self {
            output: cli
                .output
                .clone()
                .or_else(|| lookup("SCRAPER_OUTPUT").map(PathBuf::from)),
            format,
            relays,
            relay_timeout: Duration::from_secs(number("SCRAPER_RELAY_TIMEOUT_SECS", 15)?),
            relay_pause: Duration::from_millis(number("SCRAPER_RELAY_PAUSE_MS", 1_500)?),
            include_total_monthly: !cli.no_total_monthly,
            run: RunSettings {
                max_retries,
                retry_delay: Duration::from_millis(number("SCRAPER_RETRY_DELAY_MS", 5_000)?),
                pacing: PacingWindow::new(
                    Duration::from_millis(pacing_min),
                    Duration::from_millis(pacing_max),
                ),
                mortgage_source,
            },
        })
    }
}
