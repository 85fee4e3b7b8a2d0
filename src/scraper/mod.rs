mod fetcher;
mod pacing;
mod scraper_error;
mod transport;

pub use fetcher::{ProxyFetcher, RelayTemplate, DEFAULT_RELAYS};
pub use pacing::{PacingWindow, Sleeper, ThreadSleeper};
pub use scraper_error::FetchError;
pub use transport::{HttpTransport, RelayResponse, Transport, USER_AGENT};
