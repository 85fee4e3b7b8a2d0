// src/finance/rates.rs

use std::collections::HashMap;

/// 30-year fixed rates by state (annual %), 2024 figures.
const INTEREST_RATES: &[(&str, f64)] = &[
    ("AL", 7.25), ("AK", 7.35), ("AZ", 7.15), ("AR", 7.30), ("CA", 7.05), ("CO", 7.10),
    ("CT", 7.20), ("DE", 7.15), ("FL", 7.10), ("GA", 7.20), ("HI", 7.40), ("ID", 7.25),
    ("IL", 7.15), ("IN", 7.20), ("IA", 7.25), ("KS", 7.25), ("KY", 7.30), ("LA", 7.35),
    ("ME", 7.25), ("MD", 7.15), ("MA", 7.10), ("MI", 7.20), ("MN", 7.15), ("MS", 7.35),
    ("MO", 7.25), ("MT", 7.30), ("NE", 7.25), ("NV", 7.20), ("NH", 7.20), ("NJ", 7.15),
    ("NM", 7.25), ("NY", 7.10), ("NC", 7.20), ("ND", 7.30), ("OH", 7.20), ("OK", 7.30),
    ("OR", 7.15), ("PA", 7.15), ("RI", 7.20), ("SC", 7.25), ("SD", 7.30), ("TN", 7.25),
    ("TX", 7.20), ("UT", 7.20), ("VT", 7.25), ("VA", 7.15), ("WA", 7.10), ("WV", 7.30),
    ("WI", 7.20), ("WY", 7.30), ("DC", 7.15),
];

/// Property tax by state (annual % of home value).
const PROPERTY_TAX_RATES: &[(&str, f64)] = &[
    ("AL", 0.41), ("AK", 1.19), ("AZ", 0.62), ("AR", 0.63), ("CA", 0.75), ("CO", 0.51),
    ("CT", 2.14), ("DE", 0.57), ("FL", 0.83), ("GA", 0.89), ("HI", 0.31), ("ID", 0.69),
    ("IL", 2.27), ("IN", 0.85), ("IA", 1.53), ("KS", 1.42), ("KY", 0.86), ("LA", 0.55),
    ("ME", 1.28), ("MD", 1.06), ("MA", 1.21), ("MI", 1.54), ("MN", 1.12), ("MS", 0.81),
    ("MO", 0.97), ("MT", 0.84), ("NE", 1.73), ("NV", 0.53), ("NH", 2.18), ("NJ", 2.49),
    ("NM", 0.80), ("NY", 1.68), ("NC", 0.84), ("ND", 0.98), ("OH", 1.56), ("OK", 0.90),
    ("OR", 0.87), ("PA", 1.58), ("RI", 1.53), ("SC", 0.57), ("SD", 1.32), ("TN", 0.64),
    ("TX", 1.69), ("UT", 0.60), ("VT", 1.90), ("VA", 0.82), ("WA", 0.84), ("WV", 0.59),
    ("WI", 1.85), ("WY", 0.62), ("DC", 0.57),
];

/// National averages used when the jurisdiction is unknown.
pub const DEFAULT_INTEREST_RATE: f64 = 7.20;
pub const DEFAULT_PROPERTY_TAX_RATE: f64 = 1.10;

/// Interest and property-tax rates keyed by two-letter jurisdiction code.
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct RateTable {
    interest: HashMap<String, f64>,
    property_tax: HashMap<String, f64>,
    default_interest: f64,
    default_property_tax: f64,
}

impl RateTable {
    pub fn new(
        interest: HashMap<String, f64>,
        property_tax: HashMap<String, f64>,
        default_interest: f64,
        default_property_tax: f64,
    ) -> Self {
        Self {
            interest,
            property_tax,
            default_interest,
            default_property_tax,
        }
    }

    /// US states plus DC.
    pub fn us_states() -> Self {
        let to_map = |rows: &[(&str, f64)]| {
            rows.iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect::<HashMap<_, _>>()
        };

        Self::new(
            to_map(INTEREST_RATES),
            to_map(PROPERTY_TAX_RATES),
            DEFAULT_INTEREST_RATE,
            DEFAULT_PROPERTY_TAX_RATE,
        )
    }

    pub fn is_known(&self, code: &str) -> bool {
        self.interest.contains_key(code)
    }

    /// Annual interest rate in percent; `None` or an unknown code gets the default.
    pub fn interest_rate(&self, code: Option<&str>) -> f64 {
        code.and_then(|c| self.interest.get(c))
            .copied()
            .unwrap_or(self.default_interest)
    }

    /// Annual property tax in percent of value; `None` or an unknown code gets the default.
    pub fn property_tax_rate(&self, code: Option<&str>) -> f64 {
        code.and_then(|c| self.property_tax.get(c))
            .copied()
            .unwrap_or(self.default_property_tax)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::us_states()
    }
}
