// src/scraper/transport.rs

use crate::scraper::FetchError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER};
use std::time::Duration;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Status and body of one relay round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: u16,
    pub body: String,
}

/// One GET against a relay URL. Timeouts are the transport's job.
pub trait Transport {
    fn get(&self, url: &str) -> Result<RelayResponse, FetchError>;
}

pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static("https://www.google.com/"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml"),
        );

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, timeout })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<RelayResponse, FetchError> {
        let resp = self.client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout)
            } else {
                FetchError::Network(e.to_string())
            }
        })?;

        let status = resp.status().as_u16();
        let body = resp.text().map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(self.timeout)
            } else {
                FetchError::Network(e.to_string())
            }
        })?;

        Ok(RelayResponse { status, body })
    }
}
