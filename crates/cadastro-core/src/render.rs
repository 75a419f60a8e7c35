//! Table and vertical rendering of query results.

use chrono::{NaiveDate, NaiveDateTime};
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

use crate::query::{Record, SqlValue};

/// Display pattern for dates.
pub const DATE_FMT: &str = "%d/%m/%Y";
/// Display pattern for timestamps.
pub const DATETIME_FMT: &str = "%d/%m/%Y %H:%M";

/// Cell width before wrapping.
const WRAP_WIDTH: usize = 20;

/// Convert a value to its display string.
///
/// Stored temporal text (ISO) is reformatted to the fixed patterns; a
/// timestamp at midnight renders as a plain date. Everything else is
/// stringified as-is.
pub fn display_string(value: &SqlValue) -> String {
    match value {
        SqlValue::Null => String::new(),
        SqlValue::Integer(i) => i.to_string(),
        SqlValue::Real(f) => f.to_string(),
        SqlValue::Text(s) => reformat_temporal(s).unwrap_or_else(|| s.clone()),
    }
}

/// Recognize ISO date/timestamp text and reformat it, or `None`.
fn reformat_temporal(text: &str) -> Option<String> {
    const TS_PATTERNS: [&str; 3] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    for pattern in TS_PATTERNS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(if ts.time() == chrono::NaiveTime::MIN {
                ts.format(DATE_FMT).to_string()
            } else {
                ts.format(DATETIME_FMT).to_string()
            });
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|d| d.format(DATE_FMT).to_string())
}

/// Break text into fixed-width chunks joined by line breaks.
pub fn wrap(text: &str, width: usize) -> String {
    if width == 0 || text.chars().count() <= width {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_cell(value: &SqlValue) -> String {
    wrap(&display_string(value), WRAP_WIDTH)
}

/// Render records as a grid table. Numeric columns are right-aligned,
/// text columns left-aligned. Empty input renders nothing.
pub fn render_table(records: &[Record]) -> Option<String> {
    let first = records.first()?;

    let mut builder = Builder::default();
    builder.push_record(first.field_names());
    for record in records {
        builder.push_record(record.iter().map(|(_, v)| format_cell(v)));
    }

    let mut table = builder.build();
    table.with(Style::modern());
    table.with(Modify::new(Columns::new(..)).with(Alignment::left()));
    for (i, _) in first.iter().enumerate() {
        if column_is_numeric(records, i) {
            table.with(Modify::new(Columns::single(i)).with(Alignment::right()));
        }
    }
    Some(table.to_string())
}

/// A column counts as numeric when every non-null value in it is numeric.
fn column_is_numeric(records: &[Record], index: usize) -> bool {
    let mut saw_number = false;
    for record in records {
        match record.iter().nth(index) {
            Some((_, SqlValue::Null)) | None => {}
            Some((_, v)) if v.as_numeric().is_some() => saw_number = true,
            Some(_) => return false,
        }
    }
    saw_number
}

/// Render a single record vertically: one line per field, numbered.
pub fn render_vertical(record: &Record) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Nº", "Campo", "Valor"]);
    for (i, (name, value)) in record.iter().enumerate() {
        builder.push_record([(i + 1).to_string(), name.to_string(), display_string(value)]);
    }
    let mut table = builder.build();
    table.with(Style::modern());
    table.to_string()
}
