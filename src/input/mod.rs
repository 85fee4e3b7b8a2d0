pub mod links_csv;
pub mod urls;

pub use links_csv::read_link_column;
pub use urls::{collect_listing_urls, split_candidates};
