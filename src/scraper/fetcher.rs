// src/scraper/fetcher.rs

use crate::errors::ConfigError;
use crate::scraper::pacing::Sleeper;
use crate::scraper::transport::Transport;
use crate::scraper::FetchError;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const DEFAULT_RELAYS: [&str; 3] = [
    "https://api.allorigins.win/raw?url=",
    "https://corsproxy.io/?",
    "https://cors-anywhere.herokuapp.com/",
];

/// Leaves `A-Z a-z 0-9 - _ . ! ~ * ' ( )` as is; a space becomes `%20`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

/// Anything this short is an error page or a bot wall, not a listing.
pub const MIN_HTML_BYTES: usize = 1000;

/// A relay endpoint. `{url}` marks where the encoded target goes; without
/// it the target is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayTemplate(String);

impl RelayTemplate {
    pub fn parse(template: &str) -> Result<Self, ConfigError> {
        let template = template.trim();
        let probe = url::Url::parse(&template.replace("{url}", ""))
            .map_err(|_| ConfigError::InvalidRelay(template.to_string()))?;
        if !matches!(probe.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidRelay(template.to_string()));
        }
        Ok(Self(template.to_string()))
    }

    /// ZenRows scraping API, passing the origin's status code through.
    pub fn zenrows(api_key: &str) -> Self {
        let key = encode_component(api_key);
        Self(format!(
            "https://api.zenrows.com/v1/?apikey={key}&original_status=true&mode=auto&url={{url}}"
        ))
    }

    pub fn build(&self, target: &str) -> String {
        let encoded = encode_component(target);
        if self.0.contains("{url}") {
            self.0.replace("{url}", &encoded)
        } else {
            format!("{}{}", self.0, encoded)
        }
    }
}

pub fn is_plausible_html(body: &str) -> bool {
    body.len() > MIN_HTML_BYTES && body.to_ascii_lowercase().contains("<html")
}

/// Fetches listing pages through an ordered list of relays.
///
/// Each fetch starts at the relay that last succeeded and walks the list
/// once, pausing between failed relays. The cursor is plain instance state:
/// fetches never overlap, so a `Cell` is enough.
pub struct ProxyFetcher {
    transport: Box<dyn Transport>,
    relays: Vec<RelayTemplate>,
    cursor: Cell<usize>,
    pause: Duration,
    sleeper: Rc<dyn Sleeper>,
}

impl ProxyFetcher {
    pub fn new(
        transport: Box<dyn Transport>,
        relays: Vec<RelayTemplate>,
        pause: Duration,
        sleeper: Rc<dyn Sleeper>,
    ) -> Self {
        Self {
            transport,
            relays,
            cursor: Cell::new(0),
            pause,
            sleeper,
        }
    }

    /// Index of the relay the next fetch tries first.
    pub fn cursor(&self) -> usize {
        self.cursor.get()
    }

    pub fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let n = self.relays.len();
        if n == 0 {
            return Err(FetchError::NoRelays);
        }

        let start = self.cursor.get() % n;
        let mut last_err = FetchError::NoRelays;

        for i in 0..n {
            let index = (start + i) % n;
            let relay_url = self.relays[index].build(url);
            let started = Instant::now();

            match self.try_relay(&relay_url) {
                Ok(body) => {
                    debug!(
                        relay = index + 1,
                        bytes = body.len(),
                        elapsed = ?started.elapsed(),
                        "Proxy succeeded"
                    );
                    if index != start {
                        info!(relay = index + 1, "Switching to proxy {}", index + 1);
                    }
                    self.cursor.set(index);
                    return Ok(body);
                }
                Err(e) => {
                    warn!(relay = index + 1, error = %e, "Proxy {} failed, trying next...", index + 1);
                    last_err = e;
                    if i + 1 < n {
                        self.sleeper.sleep(self.pause);
                    }
                }
            }
        }

        Err(FetchError::AllRelaysFailed(Box::new(last_err)))
    }

    fn try_relay(&self, relay_url: &str) -> Result<String, FetchError> {
        let resp = self.transport.get(relay_url)?;

        if !(200..300).contains(&resp.status) {
            return Err(FetchError::Status(resp.status));
        }
        if !is_plausible_html(&resp.body) {
            return Err(FetchError::InvalidContent(resp.body.len()));
        }
        Ok(resp.body)
    }
}
