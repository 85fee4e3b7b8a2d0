use std::time::Duration;
use thiserror::Error;

/// Why a relay (or every relay) failed to produce a listing page.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("Invalid response content ({0} bytes)")]
    InvalidContent(usize),
    #[error("All proxies failed. Last error: {0}")]
    AllRelaysFailed(Box<FetchError>),
    #[error("No relay endpoints configured")]
    NoRelays,
    #[error("Client setup failed: {0}")]
    Client(String),
}
