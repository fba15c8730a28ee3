//! Schema inference by sampling.
//!
//! Fixed-width sources carry no type metadata, so a bounded prefix of lines
//! is extracted to raw string columns, round-tripped through CSV, and the
//! re-parsed records are sniffed per column. The round-trip keeps the
//! interchange form honest (quoting, embedded separators) and the sniffer
//! behind a trait so a different implementation can be injected.

use fwscan_core::error::{Error, Result};
use fwscan_core::schema::{DataType, Field, Schema};

use crate::extract::extract_raw;
use crate::layout::OffsetTable;

/// Per-column type sniffing over sampled, extracted rows.
pub trait TypeSniffer {
    fn infer_types(&self, columns: &[String], rows: &[Vec<String>]) -> Result<Schema>;
}

/// What the sniffer has concluded about a column so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Unknown,
    Bool,
    Int,
    Float,
    Text,
}

impl Kind {
    fn of(field: &str) -> Kind {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Kind::Unknown;
        }
        if trimmed.parse::<bool>().is_ok() {
            return Kind::Bool;
        }
        if trimmed.parse::<i64>().is_ok() {
            return Kind::Int;
        }
        if trimmed.parse::<f64>().is_ok() {
            return Kind::Float;
        }
        Kind::Text
    }

    fn combine(self, other: Kind) -> Kind {
        use Kind::*;
        match (self, other) {
            (Unknown, k) | (k, Unknown) => k,
            (a, b) if a == b => a,
            (Int, Float) | (Float, Int) => Float,
            _ => Text,
        }
    }

    fn data_type(self) -> DataType {
        match self {
            Kind::Bool => DataType::Boolean,
            Kind::Int => DataType::Int64,
            Kind::Float => DataType::Float64,
            // a column with no evidence defaults to text
            Kind::Unknown | Kind::Text => DataType::Utf8,
        }
    }
}

/// The default sniffer: serialize the sample to CSV and re-parse it,
/// widening each column's kind as records stream back.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSniffer;

impl TypeSniffer for CsvSniffer {
    fn infer_types(&self, columns: &[String], rows: &[Vec<String>]) -> Result<Schema> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(columns)
            .map_err(|e| Error::Schema(format!("sniffer serialize: {e}")))?;
        for row in rows {
            writer
                .write_record(row)
                .map_err(|e| Error::Schema(format!("sniffer serialize: {e}")))?;
        }
        let buf = writer
            .into_inner()
            .map_err(|e| Error::Schema(format!("sniffer serialize: {e}")))?;

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let mut kinds = vec![Kind::Unknown; columns.len()];
        for record in reader.records() {
            let record = record.map_err(|e| Error::Schema(format!("sniffer parse: {e}")))?;
            for (i, field) in record.iter().enumerate() {
                if let Some(kind) = kinds.get_mut(i) {
                    *kind = kind.combine(Kind::of(field));
                }
            }
        }

        Ok(Schema::new(
            columns
                .iter()
                .zip(kinds)
                .map(|(name, kind)| Field::new(name.clone(), kind.data_type(), true))
                .collect(),
        ))
    }
}

/// Infer a schema from at most `sample.len()` raw lines.
///
/// An empty sample yields every column as `Utf8`: a degenerate but usable
/// schema rather than a hard failure.
pub fn infer_schema(
    sample: &[String],
    table: &OffsetTable,
    sniffer: &dyn TypeSniffer,
) -> Result<Schema> {
    let columns: Vec<String> = table.names().map(str::to_string).collect();
    let rows: Vec<Vec<String>> = sample.iter().map(|line| extract_raw(line, table)).collect();
    sniffer.infer_types(&columns, &rows)
}
