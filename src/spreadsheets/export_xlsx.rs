use crate::domain::{Field, ListingRecord, UNAVAILABLE};
use crate::errors::ExportError;
use crate::spreadsheets::headers;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::fmt::Display;
use std::path::Path;

/// Numeric cells stay numeric so the sheet sorts and sums; missing values
/// are written as the sentinel text.
fn write_number_field<T: Copy + Into<f64>>(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    field: &Field<T>,
) -> Result<(), XlsxError> {
    match field {
        Field::Value(v) => sheet.write_number(row, col, (*v).into()).map(|_| ()),
        Field::Unavailable => sheet.write_string(row, col, UNAVAILABLE).map(|_| ()),
    }
}

fn write_text<T: Display>(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: T,
) -> Result<(), XlsxError> {
    sheet.write_string(row, col, value.to_string()).map(|_| ())
}

pub fn export_listings_xlsx(
    records: &[ListingRecord],
    include_total_monthly: bool,
    path: &Path,
) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    // Headers
    for (col, header) in headers(include_total_monthly).iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    // Rows
    for (i, rec) in records.iter().enumerate() {
        let r = (i + 1) as u32;
        let mut col: u16 = 0;
        let mut next = || {
            let c = col;
            col += 1;
            c
        };

        write_text(worksheet, r, next(), &rec.address)?;
        write_text(worksheet, r, next(), &rec.purchase_price)?;
        write_text(worksheet, r, next(), &rec.down_payment)?;
        write_text(worksheet, r, next(), &rec.estimated_mortgage)?;
        if include_total_monthly {
            write_text(worksheet, r, next(), &rec.total_monthly_payment)?;
        }
        write_number_field(worksheet, r, next(), &rec.beds)?;
        write_number_field(worksheet, r, next(), &rec.baths)?;
        write_number_field(worksheet, r, next(), &rec.year_built)?;
        write_number_field(worksheet, r, next(), &rec.sqft)?;
        write_number_field(worksheet, r, next(), &rec.days_listed)?;
        write_text(worksheet, r, next(), &rec.realtor_name)?;
        write_text(worksheet, r, next(), &rec.url)?;
    }

    worksheet.autofit();
    workbook.save(path)?;
    Ok(())
}
