//! Column-location algebra: normalize a column spec into an offset table.
//!
//! The two input shapes become a tagged union resolved exactly once at scan
//! construction; everything downstream consumes only the normalized
//! `OffsetTable`.

use std::collections::HashSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use fwscan_core::error::{Error, Result};

/// The two equivalent ways to spell column locations.
///
/// * `Explicit`: ordered `(name, (start, end))` pairs with half-open byte
///   ranges. Taken as-is; overlap and ordering are the caller's business.
/// * `Sequential`: ordered `(name-or-none, length)` pairs; ranges derive from
///   a running sum of lengths. A `None` name is a filler span that consumes
///   width but is dropped from the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    Explicit(Vec<(String, (usize, usize))>),
    Sequential(Vec<(Option<String>, usize)>),
}

impl ColumnSpec {
    /// Parse a spec from JSON. Input that matches neither recognized shape
    /// fails with `InvalidSpec`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            Error::InvalidSpec(format!("input matches neither recognized shape: {e}"))
        })
    }
}

/// Normalized column locations: ordered `(name, [start, end))` entries with
/// unique names and `end > start` for every entry. The only form consumed
/// downstream of `resolve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetTable {
    entries: Vec<(String, Range<usize>)>,
}

impl OffsetTable {
    pub fn new(entries: Vec<(String, Range<usize>)>) -> Result<Self> {
        let mut seen = HashSet::new();
        for (name, range) in &entries {
            if range.end <= range.start {
                return Err(Error::InvalidSpec(format!(
                    "column '{}' has empty range {}..{}",
                    name, range.start, range.end
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(Error::InvalidSpec(format!("duplicate column '{name}'")));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[(String, Range<usize>)] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalize a `ColumnSpec` into an `OffsetTable`.
///
/// Explicit specs pass through unchanged (modulo structural sanity checks).
/// Sequential specs prefix-sum their lengths left to right; unnamed entries
/// consume width but emit nothing; first-seen order is preserved.
pub fn resolve(spec: &ColumnSpec) -> Result<OffsetTable> {
    match spec {
        ColumnSpec::Explicit(entries) => OffsetTable::new(
            entries
                .iter()
                .map(|(name, (start, end))| (name.clone(), *start..*end))
                .collect(),
        ),
        ColumnSpec::Sequential(entries) => {
            let mut end = 0usize;
            let mut out = Vec::new();
            for (name, length) in entries {
                end += length;
                if let Some(name) = name {
                    out.push((name.clone(), end - length..end));
                }
            }
            OffsetTable::new(out)
        }
    }
}
