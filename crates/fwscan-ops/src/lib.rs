#![forbid(unsafe_code)]
//! fwscan-ops: the data-transformation leaves of the fixed-width scan engine.
//!
//! `layout` normalizes column-location specs into offset tables, `extract`
//! slices and casts raw lines, `predicate` evaluates simple row filters, and
//! `infer` sniffs a concrete schema out of a sampled prefix. All of it is
//! pure; the io/exec crates supply the bytes.

pub mod extract;
pub mod infer;
pub mod layout;
pub mod predicate;

pub use extract::{extract_batch, extract_raw};
pub use infer::{infer_schema, CsvSniffer, TypeSniffer};
pub use layout::{resolve, ColumnSpec, OffsetTable};
pub use predicate::{CmpOp, Predicate};
