pub mod export_csv;
pub mod export_json;
pub mod export_xlsx;

use crate::domain::ListingRecord;
use crate::errors::ExportError;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub use export_csv::write_csv;
pub use export_json::write_json;
pub use export_xlsx::export_listings_xlsx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Json => "json",
        }
    }
}

/// `zilla-scrapa-results-2024-05-01_09-30.csv`
pub fn default_file_name(format: ExportFormat, now: DateTime<Local>) -> String {
    format!(
        "zilla-scrapa-results-{}.{}",
        now.format("%Y-%m-%d_%H-%M"),
        format.extension()
    )
}

/// Column headers; the total-monthly column only exists when the calculator is on.
pub fn headers(include_total_monthly: bool) -> Vec<&'static str> {
    let mut headers = vec![
        "Address",
        "Purchase Price",
        "20% Down Payment",
        "Est. Mortgage (P&I)",
    ];
    if include_total_monthly {
        headers.push("Total Monthly (w/ Tax+Ins)");
    }
    headers.extend([
        "Beds",
        "Baths",
        "Year Built",
        "Sqft",
        "Days Listed",
        "Realtor Name",
        "URL",
    ]);
    headers
}

/// Writes `records` to `path` (or a timestamped file in the working
/// directory) and returns where they went.
pub fn export(
    records: &[ListingRecord],
    format: ExportFormat,
    include_total_monthly: bool,
    path: Option<&Path>,
) -> Result<PathBuf, ExportError> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default_file_name(format, Local::now())));

    match format {
        ExportFormat::Csv => {
            let mut out = BufWriter::new(File::create(&path)?);
            write_csv(&mut out, records, include_total_monthly)?;
        }
        ExportFormat::Json => {
            let out = BufWriter::new(File::create(&path)?);
            write_json(out, records)?;
        }
        ExportFormat::Xlsx => export_listings_xlsx(records, include_total_monthly, &path)?,
    }

    Ok(path)
}
