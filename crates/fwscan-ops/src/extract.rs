//! Slice raw lines into columns and cast them against an inferred schema.
//!
//! Slicing is byte-oriented and total: a line shorter than a column's end
//! offset yields the short/empty remainder instead of an error, so ragged
//! files degrade gracefully. Casting is where data-quality problems surface,
//! attributed to the exact source row.

use std::ops::Range;

use fwscan_core::error::{Error, Result};
use fwscan_core::schema::{DataType, Schema};
use fwscan_core::types::{Column, RowBatch, Scalar};

use crate::layout::OffsetTable;
use crate::predicate::Predicate;

fn slice_field(line: &str, span: &Range<usize>) -> String {
    let bytes = line.as_bytes();
    let start = span.start.min(bytes.len());
    let end = span.end.min(bytes.len());
    String::from_utf8_lossy(&bytes[start..end]).into_owned()
}

/// Slice one raw line into untyped string fields, one per table entry.
pub fn extract_raw(line: &str, table: &OffsetTable) -> Vec<String> {
    table
        .entries()
        .iter()
        .map(|(_, span)| slice_field(line, span))
        .collect()
}

fn cast_scalar(raw: &str, target: DataType, column: &str, row: u64) -> Result<Scalar> {
    if target == DataType::Utf8 {
        return Ok(Scalar::Str(raw.to_string()));
    }

    // Fixed-width fields are padded; an all-padding value is a missing value.
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Scalar::Null);
    }

    let parsed = match target {
        DataType::Boolean => trimmed.parse::<bool>().map(Scalar::Bool).ok(),
        DataType::Int64 => trimmed.parse::<i64>().map(Scalar::I64).ok(),
        DataType::Float64 => trimmed.parse::<f64>().map(Scalar::F64).ok(),
        DataType::Utf8 => unreachable!("handled above"),
    };

    parsed.ok_or_else(|| Error::TypeCoercion {
        column: column.to_string(),
        row,
        raw_value: raw.to_string(),
        target,
    })
}

/// Turn a sub-batch of raw lines into one typed `RowBatch`.
///
/// `base_row` is the absolute zero-based index of `lines[0]` in the source,
/// used only for error attribution. The predicate is evaluated against the
/// full typed row before projection, since it may reference columns the
/// request did not select.
pub fn extract_batch(
    lines: &[String],
    base_row: u64,
    table: &OffsetTable,
    schema: &Schema,
    predicate: Option<&Predicate>,
    with_columns: Option<&[String]>,
) -> Result<RowBatch> {
    let mut columns = Vec::with_capacity(table.len());
    for (name, span) in table.entries() {
        let target = schema
            .index_of(name)
            .and_then(|i| schema.field(i))
            .map(|f| f.data_type)
            .ok_or_else(|| Error::Schema(format!("column '{name}' missing from schema")))?;

        let mut values = Vec::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            let raw = slice_field(line, span);
            values.push(cast_scalar(&raw, target, name, base_row + i as u64)?);
        }
        columns.push(Column {
            name: name.clone(),
            values,
        });
    }

    if let Some(pred) = predicate {
        let keep = pred.evaluate(&columns)?;
        for col in &mut columns {
            let mut it = keep.iter();
            col.values.retain(|_| *it.next().unwrap_or(&false));
        }
    }

    if let Some(subset) = with_columns {
        let mut slots: Vec<Option<Column>> = columns.into_iter().map(Some).collect();
        let mut projected = Vec::with_capacity(subset.len());
        for name in subset {
            let pos = slots
                .iter()
                .position(|s| s.as_ref().is_some_and(|c| &c.name == name))
                .ok_or_else(|| Error::Schema(format!("projected column '{name}' not found")))?;
            projected.push(slots[pos].take().unwrap_or_else(|| Column::new(name.clone())));
        }
        columns = projected;
    }

    Ok(RowBatch { columns })
}
