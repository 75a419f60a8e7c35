//! Export of query results to xlsx, CSV and JSON files.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use thiserror::Error;

use crate::query::{Record, SqlValue};
use crate::render::display_string;

/// Supported export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Xlsx, ExportFormat::Csv, ExportFormat::Json];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "Planilha (xlsx)",
            ExportFormat::Csv => "CSV (;)",
            ExportFormat::Json => "JSON",
        }
    }
}

/// Export errors.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Exporting nothing is a failure; no file may be written.
    #[error("no records to export")]
    Empty,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Write the record set to `<base_name>.<ext>` in the chosen format.
/// Temporal values are converted to their fixed display patterns first.
pub fn export_records(
    records: &[Record],
    format: ExportFormat,
    base_name: &str,
) -> Result<PathBuf, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }

    let path = PathBuf::from(format!("{}.{}", base_name, format.extension()));
    match format {
        ExportFormat::Xlsx => write_xlsx(records, &path)?,
        ExportFormat::Csv => write_csv(records, &path)?,
        ExportFormat::Json => write_json(records, &path)?,
    }
    Ok(path)
}

fn write_csv(records: &[Record], path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_path(path)?;
    writer.write_record(records[0].field_names())?;
    for record in records {
        writer.write_record(record.iter().map(|(_, v)| display_string(v)))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json(records: &[Record], path: &Path) -> Result<(), ExportError> {
    let array: Vec<serde_json::Value> = records.iter().map(record_to_json).collect();
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, &array)?;
    Ok(())
}

/// Field order is preserved (serde_json `preserve_order`); numbers stay
/// numbers, temporal text becomes its display form.
fn record_to_json(record: &Record) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (name, value) in record.iter() {
        let json = match value {
            SqlValue::Null => serde_json::Value::Null,
            SqlValue::Integer(i) => serde_json::Value::from(*i),
            SqlValue::Real(f) => serde_json::Value::from(*f),
            SqlValue::Text(_) => serde_json::Value::from(display_string(value)),
        };
        map.insert(name.to_string(), json);
    }
    serde_json::Value::Object(map)
}

fn write_xlsx(records: &[Record], path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in records[0].field_names().iter().enumerate() {
        sheet.write_string(0, col as u16, *name)?;
    }
    for (row, record) in records.iter().enumerate() {
        for (col, (_, value)) in record.iter().enumerate() {
            let row = (row + 1) as u32;
            let col = col as u16;
            match value {
                SqlValue::Null => {}
                SqlValue::Integer(i) => {
                    sheet.write_number(row, col, *i as f64)?;
                }
                SqlValue::Real(f) => {
                    sheet.write_number(row, col, *f)?;
                }
                SqlValue::Text(_) => {
                    sheet.write_string(row, col, display_string(value))?;
                }
            }
        }
    }
    workbook.save(path)?;
    Ok(())
}
