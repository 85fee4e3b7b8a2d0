pub mod field;
pub mod listing;

pub use field::{Dollars, Field, UNAVAILABLE};
pub use listing::{ListingExtras, ListingRecord, ListingStatus};
