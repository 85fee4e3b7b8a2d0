// src/tests/utils.rs

use crate::extract::Extractor;
use crate::finance::{Calculator, JurisdictionResolver, RateTable};
use crate::runner::{RunSettings, Runner};
use crate::scraper::{
    FetchError, PacingWindow, ProxyFetcher, RelayResponse, RelayTemplate, Sleeper, Transport,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

pub const RELAY_PAUSE: Duration = Duration::from_millis(1_500);
pub const RETRY_DELAY: Duration = Duration::from_millis(5_000);

/// Records every requested sleep instead of sleeping.
#[derive(Default)]
pub struct RecordingSleeper {
    pub slept: RefCell<Vec<Duration>>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}

/// Answers relay requests from a script. A reply is chosen by the first key
/// (a relay host or a piece of the encoded target) the request URL contains.
///
/// Each key has a queue of replies; the last one repeats once the queue is
/// down to one. Requests no key matches get a network error.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    replies: Rc<RefCell<Vec<(String, VecDeque<Result<RelayResponse, FetchError>>)>>>,
    pub requests: Rc<RefCell<Vec<String>>>,
}

impl ScriptedTransport {
    pub fn on(self, key: &str, reply: Result<RelayResponse, FetchError>) -> Self {
        {
            let mut replies = self.replies.borrow_mut();
            match replies.iter_mut().find(|(k, _)| k == key) {
                Some((_, queue)) => queue.push_back(reply),
                None => replies.push((key.to_string(), VecDeque::from([reply]))),
            }
        }
        self
    }

    /// Hosts contacted, in order.
    pub fn hosts(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .filter_map(|u| url::Url::parse(u).ok())
            .filter_map(|u| u.host_str().map(str::to_string))
            .collect()
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str) -> Result<RelayResponse, FetchError> {
        self.requests.borrow_mut().push(url.to_string());

        let mut replies = self.replies.borrow_mut();
        let queue = replies
            .iter_mut()
            .find(|(key, _)| url.contains(key.as_str()))
            .map(|(_, q)| q);

        match queue {
            Some(q) if q.len() > 1 => q.pop_front().unwrap(),
            Some(q) => q.front().cloned().unwrap(),
            None => Err(FetchError::Network("connection refused".into())),
        }
    }
}

pub fn ok(body: String) -> Result<RelayResponse, FetchError> {
    Ok(RelayResponse { status: 200, body })
}

pub fn status(code: u16) -> Result<RelayResponse, FetchError> {
    Ok(RelayResponse {
        status: code,
        body: "<html><body>Access denied</body></html>".into(),
    })
}

/// A minimal listing page with an address and an asking price.
pub fn listing_page(address: &str, price: &str, extra: &str) -> String {
    listing_html(&format!(
        r#"<h1 data-testid="property-details-address">{address}</h1>
           <span data-testid="price">{price}</span>
           {extra}"#
    ))
}

/// A plausible page padded past the HTML size threshold.
pub fn listing_html(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Listing</title><style>{}</style></head>\
         <body>{body}</body></html>",
        ".filler{}".repeat(150)
    )
}

pub fn relays(hosts: &[&str]) -> Vec<RelayTemplate> {
    hosts
        .iter()
        .map(|h| RelayTemplate::parse(&format!("https://{h}/raw?url=")).unwrap())
        .collect()
}

pub fn fetcher(
    transport: ScriptedTransport,
    hosts: &[&str],
    sleeper: Rc<RecordingSleeper>,
) -> ProxyFetcher {
    ProxyFetcher::new(Box::new(transport), relays(hosts), RELAY_PAUSE, sleeper)
}

pub fn settings(max_retries: u32) -> RunSettings {
    RunSettings {
        max_retries,
        retry_delay: RETRY_DELAY,
        pacing: PacingWindow::new(Duration::from_millis(3_000), Duration::from_millis(5_000)),
        ..RunSettings::default()
    }
}

pub fn runner(
    transport: ScriptedTransport,
    hosts: &[&str],
    sleeper: Rc<RecordingSleeper>,
    settings: RunSettings,
) -> Runner {
    Runner::new(
        fetcher(transport, hosts, sleeper.clone()),
        Extractor::new().unwrap(),
        Calculator::new(RateTable::us_states()),
        JurisdictionResolver::new().unwrap(),
        sleeper,
        settings,
    )
}
