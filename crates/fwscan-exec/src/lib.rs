#![forbid(unsafe_code)]
//! fwscan-exec: the pull-based streaming scanner and its lazy registration.
//!
//! `scan` owns the per-execution read loop (one reader per `stream` call,
//! pushdown-aware). `source` is the host-integration shim: it pairs the
//! inferred schema with a stream factory so a consuming engine can defer
//! execution until its plan is final.

pub mod scan;
pub mod source;

pub use scan::{BatchStream, FwfScan, ScanRequest};
pub use source::{read_fwf, register_io_source, scan_fwf, LazyScan, LazySource, StreamFactory};
