pub mod fields;
pub mod names;
pub mod page;
pub mod rules;

pub use fields::{ExtractedFields, Extractor};
