#![forbid(unsafe_code)]
//! fwscan: read fixed-width text files as lazily scanned tabular data.
//!
//! A byte-offset column spec plus a line-oriented file becomes a
//! schema-typed, pushdown-aware, batch-streamed source. `scan_fwf` defers
//! all reading until a consumer drives the stream; `read_fwf` materializes
//! everything eagerly.

pub use fwscan_core as core;
pub use fwscan_exec as exec;
pub use fwscan_io as io;
pub use fwscan_ops as ops;

pub use fwscan_core::config::ScanConfig;
pub use fwscan_core::error::{Error, Result};
pub use fwscan_core::schema::{DataType, Field, Schema};
pub use fwscan_core::types::{Column, RowBatch, Scalar};
pub use fwscan_exec::{read_fwf, scan_fwf, FwfScan, LazyScan, LazySource, ScanRequest};
pub use fwscan_ops::{ColumnSpec, Predicate};
