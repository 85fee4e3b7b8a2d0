use crate::domain::ListingRecord;
use crate::errors::ExportError;
use std::io::Write;

/// Full records, including failure reasons, jurisdiction and extras.
pub fn write_json<W: Write>(w: W, records: &[ListingRecord]) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(w, records)?;
    Ok(())
}
