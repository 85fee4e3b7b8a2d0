// src/input/urls.rs

use std::collections::HashSet;
use url::Url;

const LISTING_HOSTS: [&str; 2] = ["zilla.com", "zillow.com"];
const LISTING_PATHS: [&str; 2] = ["/homedetails/", "/b/"];

/// True for single-property (`/homedetails/`) and building (`/b/`) pages on
/// the listing site. Anything unparsable is simply not a listing URL.
pub fn is_listing_url(candidate: &str) -> bool {
    let Ok(url) = Url::parse(candidate.trim()) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    let Some(host) = url.host_str() else {
        return false;
    };

    LISTING_HOSTS.iter().any(|h| host.contains(h))
        && LISTING_PATHS.iter().any(|p| url.path().contains(p))
}

/// Splits pasted free text on whitespace, newlines and commas.
pub fn split_candidates(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Listing URLs in first-seen order, plus what was thrown away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlBatch {
    pub urls: Vec<String>,
    /// Valid URLs dropped because they were already seen.
    pub duplicates: usize,
    /// Candidates that were not listing URLs at all.
    pub rejected: usize,
}

pub fn collect_listing_urls<I, S>(candidates: I) -> UrlBatch
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut batch = UrlBatch::default();

    for candidate in candidates {
        let candidate = candidate.as_ref().trim();
        if !is_listing_url(candidate) {
            batch.rejected += 1;
            continue;
        }
        if seen.insert(candidate.to_string()) {
            batch.urls.push(candidate.to_string());
        } else {
            batch.duplicates += 1;
        }
    }

    batch
}
