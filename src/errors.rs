// errors.rs
use thiserror::Error;

/// A strategy table entry that fails to compile. Raised once, at startup.
#[derive(Debug, Error)]
pub enum ExtractorBuildError {
    #[error("Invalid selector '{0}': {1}")]
    Selector(String, String),
    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),
}

/// Problems with the URL sources handed to a run. Never fatal on their own.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("No \"Links\" column found in CSV")]
    NoLinkColumn,
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("No valid listing URLs to process")]
    NoValidUrls,
    #[error("A run is already in progress")]
    AlreadyRunning,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("Failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a whole number, got '{value}'")]
    InvalidNumber { key: String, value: String },
    #[error("Invalid relay template '{0}': must be an http(s) URL")]
    InvalidRelay(String),
    #[error("Invalid {key}: '{value}'")]
    InvalidChoice { key: String, value: String },
    #[error("SCRAPER_PACING_MIN_MS ({min}) exceeds SCRAPER_PACING_MAX_MS ({max})")]
    PacingWindow { min: u64, max: u64 },
}
