// src/runner.rs

use crate::domain::{Field, ListingRecord, ListingStatus};
use crate::errors::RunError;
use crate::extract::{ExtractedFields, Extractor};
use crate::finance::{Calculator, JurisdictionResolver};
use crate::scraper::{FetchError, PacingWindow, ProxyFetcher, Sleeper};
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Where the "Est. Mortgage" figure comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MortgageSource {
    /// Amortization formula over price and state rates.
    #[default]
    Calculator,
    /// Monthly-payment estimate printed on the listing page.
    Page,
}

#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Extra attempts after the first one fails.
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub pacing: PacingWindow,
    pub mortgage_source: MortgageSource,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_delay: Duration::from_secs(5),
            pacing: PacingWindow::default(),
            mortgage_source: MortgageSource::Calculator,
        }
    }
}

/// Progress hooks for whatever is presenting the run.
pub trait RunObserver {
    fn on_listing_start(&mut self, _position: usize, _total: usize, _url: &str) {}
    fn on_record(&mut self, _position: usize, _total: usize, _record: &ListingRecord) {}
}

pub struct NoopObserver;

impl RunObserver for NoopObserver {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub successful: usize,
    pub failed: usize,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub records: Vec<ListingRecord>,
    pub summary: RunSummary,
}

/// Clears the in-progress flag however the run ends.
pub(crate) struct RunGuard<'a>(&'a Cell<bool>);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Processes listing URLs strictly one after another: fetch, extract,
/// estimate, with retries per URL and randomized spacing between URLs.
pub struct Runner {
    fetcher: ProxyFetcher,
    extractor: Extractor,
    calculator: Calculator,
    resolver: JurisdictionResolver,
    sleeper: Rc<dyn Sleeper>,
    settings: RunSettings,
    in_progress: Cell<bool>,
}

impl Runner {
    pub fn new(
        fetcher: ProxyFetcher,
        extractor: Extractor,
        calculator: Calculator,
        resolver: JurisdictionResolver,
        sleeper: Rc<dyn Sleeper>,
        settings: RunSettings,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            calculator,
            resolver,
            sleeper,
            settings,
            in_progress: Cell::new(false),
        }
    }

    pub fn is_running(&self) -> bool {
        self.in_progress.get()
    }

    pub(crate) fn begin(&self) -> Result<RunGuard<'_>, RunError> {
        if self.in_progress.replace(true) {
            return Err(RunError::AlreadyRunning);
        }
        Ok(RunGuard(&self.in_progress))
    }

    /// Runs every URL to a terminal state. Only an empty URL list or an
    /// overlapping start is fatal; per-URL failures become ERROR records.
    pub fn run(
        &self,
        urls: &[String],
        observer: &mut dyn RunObserver,
    ) -> Result<RunOutcome, RunError> {
        if urls.is_empty() {
            return Err(RunError::NoValidUrls);
        }
        let _guard = self.begin()?;

        let total = urls.len();
        let mut records = Vec::with_capacity(total);
        info!("Starting to scrape {total} properties...");

        for (i, url) in urls.iter().enumerate() {
            let position = i + 1;
            observer.on_listing_start(position, total, url);

            let record = self.process(url, position, total);
            observer.on_record(position, total, &record);
            records.push(record);

            if position < total {
                let delay = self.settings.pacing.draw();
                debug!(?delay, "Pausing before next listing");
                self.sleeper.sleep(delay);
            }
        }

        let successful = records.iter().filter(|r| r.is_success()).count();
        let summary = RunSummary {
            successful,
            failed: total - successful,
            total,
        };
        info!(
            successful = summary.successful,
            failed = summary.failed,
            total = summary.total,
            "✓ Scraping completed!"
        );

        Ok(RunOutcome { records, summary })
    }

    /// PENDING -> FETCHING -> SUCCESS, or FETCHING -> RETRYING -> FETCHING
    /// until retries run out, then FAILED.
    fn process(&self, url: &str, position: usize, total: usize) -> ListingRecord {
        let max_retries = self.settings.max_retries;
        let mut retries = 0;

        loop {
            if retries == 0 {
                info!("Processing {position}/{total}: {url}");
            } else {
                info!("Processing {position}/{total}: {url} (Retry {retries}/{max_retries})");
            }

            match self.scrape_listing(url) {
                Ok(record) => {
                    info!("✓ Successfully scraped: {}", record.address);
                    return record;
                }
                Err(e) if retries < max_retries => {
                    retries += 1;
                    warn!("⚠ Attempt {retries} failed for {url}: {e}");
                    self.sleeper.sleep(self.settings.retry_delay);
                }
                Err(e) => {
                    error!("✗ Failed to scrape {url} after {max_retries} retries: {e}");
                    return ListingRecord::failed(url, e.to_string());
                }
            }
        }
    }

    /// One pass of fetch, extract and estimate for a single URL.
    pub fn scrape_listing(&self, url: &str) -> Result<ListingRecord, FetchError> {
        let html = self.fetcher.fetch(url)?;
        let fields = self.extractor.extract(&html);
        Ok(self.assemble(url, fields))
    }

    fn assemble(&self, url: &str, fields: ExtractedFields) -> ListingRecord {
        let jurisdiction = self
            .resolver
            .resolve(&fields.address, self.calculator.rates());
        let price = fields.price.value().map(|p| p.amount());

        let estimate = match self.settings.mortgage_source {
            MortgageSource::Calculator => self.calculator.estimate(price, jurisdiction.as_deref()),
            MortgageSource::Page => self.calculator.estimate_with_payment(
                price,
                jurisdiction.as_deref(),
                &fields.page_mortgage,
            ),
        };
        if jurisdiction.is_none() && fields.address.is_available() {
            debug!(url, "No jurisdiction in address, using national average rates");
        }

        ListingRecord {
            url: url.to_string(),
            status: ListingStatus::Success,
            error: None,
            address: fields.address,
            jurisdiction: Field::from(jurisdiction),
            purchase_price: fields.price,
            down_payment: estimate.down_payment,
            estimated_mortgage: estimate.mortgage,
            total_monthly_payment: estimate.total_monthly,
            beds: fields.beds,
            baths: fields.baths,
            year_built: fields.year_built,
            sqft: fields.sqft,
            days_listed: fields.days_listed,
            realtor_name: fields.realtor_name,
            extras: fields.extras,
        }
    }
}
