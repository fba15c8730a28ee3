#![forbid(unsafe_code)]
//! fwscan-io: line-oriented batched reading for the fixed-width scan engine.
//!
//! One record is exactly one physical line; a line separator inside data is
//! indistinguishable from a record boundary. That constraint belongs to the
//! format, not to this reader.

pub mod error;
pub mod lines;

pub use error::{Error, Result};
pub use lines::LineBatchReader;
