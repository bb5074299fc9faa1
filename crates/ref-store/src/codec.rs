//! `refs.csv` encoding and decoding.
//!
//! The file has one header row naming the nine fields (see
//! [`Field::header`]) and one row per record, with standard CSV quoting for
//! embedded commas, quotes, and newlines.
//!
//! Decoding is lenient about shape: columns are matched by header name, so
//! their order in the file does not matter; unknown columns are ignored;
//! missing columns and short rows decode as empty strings; a leading UTF-8 BOM
//! is skipped; a zero-byte file is an empty table. Encoding always writes the
//! nine headers in fixed order, even for an empty table.

use csv::{ReaderBuilder, WriterBuilder};
use ref_core::{Field, RecordFields};

use crate::error::StoreError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse `refs.csv` bytes into record fields, preserving row order.
///
/// # Errors
///
/// Returns [`StoreError::Malformed`] if the bytes are not valid UTF-8 CSV.
pub fn decode(bytes: &[u8]) -> Result<Vec<RecordFields>, StoreError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(bytes);

    let columns: Vec<Option<Field>> = reader
        .headers()
        .map_err(StoreError::Malformed)?
        .iter()
        .map(|header| {
            let header = header.trim();
            Field::ALL.into_iter().find(|field| field.header() == header)
        })
        .collect();

    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row.map_err(StoreError::Malformed)?;
        let mut fields = RecordFields::default();
        for (value, column) in row.iter().zip(&columns) {
            if let Some(field) = column {
                fields.set(*field, value);
            }
        }
        rows.push(fields);
    }
    Ok(rows)
}

/// Serialize record fields to `refs.csv` bytes (header + one row each).
///
/// # Errors
///
/// Returns [`StoreError::Encode`] if the CSV writer fails.
pub fn encode<'a, I>(rows: I) -> Result<Vec<u8>, StoreError>
where
    I: IntoIterator<Item = &'a RecordFields>,
{
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(Field::ALL.map(Field::header))
        .map_err(|e| StoreError::Encode(e.into()))?;
    for fields in rows {
        writer
            .write_record(fields.values())
            .map_err(|e| StoreError::Encode(e.into()))?;
    }
    writer
        .into_inner()
        .map_err(|e| StoreError::Encode(e.to_string().into()))
}
