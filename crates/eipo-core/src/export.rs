//! CSV and JSON output of a finished run.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::AppError;
use crate::models::IpoListing;

/// Write listings as CSV: one header row, then one row per listing.
///
/// The header comes from [`IpoListing::FIELD_NAMES`], so an empty run still
/// produces a header. Absent values are empty cells.
pub fn write_csv(path: &Path, listings: &[IpoListing]) -> Result<(), AppError> {
    let file = File::create(path)?;
    write_csv_to(BufWriter::new(file), listings)
}

pub fn write_csv_to<W: Write>(writer: W, listings: &[IpoListing]) -> Result<(), AppError> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record(IpoListing::FIELD_NAMES)?;
    for listing in listings {
        csv.serialize(listing)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write listings as a pretty-printed JSON array. Non-ASCII text is kept as-is.
pub fn write_json(path: &Path, listings: &[IpoListing]) -> Result<(), AppError> {
    let file = File::create(path)?;
    write_json_to(BufWriter::new(file), listings)
}

pub fn write_json_to<W: Write>(mut writer: W, listings: &[IpoListing]) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut writer, listings)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
