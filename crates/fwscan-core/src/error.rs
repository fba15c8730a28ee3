use std::io;

use thiserror::Error;

use crate::schema::DataType;

/// Canonical result for the whole engine.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The column-location input matches neither recognized shape, or is
    /// structurally unsound (overlaps aside, which are the caller's problem).
    /// Raised at resolve time, fatal to the scan's construction.
    #[error("invalid column spec: {0}")]
    InvalidSpec(String),

    /// A scanned value cannot be cast to its inferred type. `row` is the
    /// absolute zero-based line index in the source, so a bad record can be
    /// located without re-running the scan.
    #[error("cannot cast {raw_value:?} to {target:?} (column '{column}', row {row})")]
    TypeCoercion {
        column: String,
        row: u64,
        raw_value: String,
        target: DataType,
    },

    /// The underlying file cannot be opened or read. Not retried here;
    /// retry policy, if any, belongs to the caller.
    #[error("source unavailable: {path}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("predicate error: {0}")]
    Predicate(String),

    #[error("schema error: {0}")]
    Schema(String),

    #[error("internal invariant failed: {0}")]
    Invariant(String),
}
