// src/finance/jurisdiction.rs

use crate::domain::Field;
use crate::finance::rates::RateTable;
use regex::Regex;

/// Derives a two-letter jurisdiction code from a free-text address.
pub struct JurisdictionResolver {
    trailing: Regex,
    token: Regex,
}

impl JurisdictionResolver {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            // ", IL", ", IL 62701", ", IL 62701-1234" at the very end
            trailing: Regex::new(r",\s*([A-Z]{2})\s*(?:\d{5}(?:-\d{4})?)?\s*$")?,
            token: Regex::new(r"\b([A-Z]{2})\b")?,
        })
    }

    /// Returns `None` when the address is unavailable or yields no code the
    /// rate table recognises; callers then use the default rates.
    pub fn resolve(&self, address: &Field<String>, rates: &RateTable) -> Option<String> {
        let address = address.value()?;

        if let Some(code) = self
            .trailing
            .captures(address)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .filter(|code| rates.is_known(code))
        {
            return Some(code.to_string());
        }

        self.token
            .captures_iter(address)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .filter(|code| rates.is_known(code))
            .last()
            .map(str::to_string)
    }
}
