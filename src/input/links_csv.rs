// src/input/links_csv.rs

use crate::errors::InputError;
use csv::{ReaderBuilder, Trim};
use std::fs;
use std::path::Path;

/// Pulls the values of the first column whose header contains "link"
/// (case-insensitive). Empty cells and short rows are skipped.
pub fn extract_link_column(csv_text: &str) -> Result<Vec<String>, InputError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(csv_text.as_bytes());

    let column = rdr
        .headers()?
        .iter()
        .position(|h| h.to_lowercase().contains("link"))
        .ok_or(InputError::NoLinkColumn)?;

    let mut links = Vec::new();
    for record in rdr.records() {
        let record = record?;
        match record.get(column) {
            Some(link) if !link.is_empty() => links.push(link.to_string()),
            _ => continue,
        }
    }
    Ok(links)
}

pub fn read_link_column(path: &Path) -> Result<Vec<String>, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    extract_link_column(&text)
}
