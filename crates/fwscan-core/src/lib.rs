#![forbid(unsafe_code)]
//! fwscan-core: schema, batch, config, and error types shared by every layer.
//!
//! Pure data; no I/O here. The io/ops/exec crates build on these types.

pub mod config;
pub mod error;
pub mod prelude;
pub mod schema;
pub mod types;
