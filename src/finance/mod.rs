pub mod calculator;
pub mod jurisdiction;
pub mod rates;

pub use calculator::{parse_price, Calculator};
pub use jurisdiction::JurisdictionResolver;
pub use rates::RateTable;
