use crate::domain::ListingRecord;
use crate::spreadsheets::headers;
use std::fmt::Display;
use std::io::{self, Write};

fn quoted(value: impl Display) -> String {
    format!("\"{}\"", value.to_string().replace('"', "\"\""))
}

fn row(record: &ListingRecord, include_total_monthly: bool) -> Vec<String> {
    let mut cells = vec![
        quoted(&record.address),
        quoted(&record.purchase_price),
        quoted(&record.down_payment),
        quoted(&record.estimated_mortgage),
    ];
    if include_total_monthly {
        cells.push(quoted(&record.total_monthly_payment));
    }
    // Numeric-shaped columns go out bare.
    cells.extend([
        record.beds.to_string(),
        record.baths.to_string(),
        record.year_built.to_string(),
        record.sqft.to_string(),
        record.days_listed.to_string(),
    ]);
    cells.push(quoted(&record.realtor_name));
    cells.push(quoted(&record.url));
    cells
}

/// Header row plus one line per record. Strings are quoted; counts, years
/// and areas are not. `INFO_UNAVAILABLE` is written out literally.
pub fn write_csv<W: Write>(
    mut w: W,
    records: &[ListingRecord],
    include_total_monthly: bool,
) -> io::Result<()> {
    writeln!(w, "{}", headers(include_total_monthly).join(","))?;
    for record in records {
        writeln!(w, "{}", row(record, include_total_monthly).join(","))?;
    }
    w.flush()
}
