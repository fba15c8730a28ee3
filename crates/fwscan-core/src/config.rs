//! Scan configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Consumer-visible batch size used when a request does not ask for one.
    pub batch_size: usize,

    /// How many leading lines to sample for schema inference.
    pub infer_schema_rows: usize,

    /// How many reader batches to pull per refill. Decouples the reader's
    /// granularity from the consumer-visible batch size.
    pub reader_group: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            batch_size: 10_000,
            infer_schema_rows: 100,
            reader_group: 100,
        }
    }
}

impl ScanConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `FWSCAN_BATCH_SIZE`: consumer-visible batch size
    /// - `FWSCAN_INFER_ROWS`: schema-inference sample length
    /// - `FWSCAN_READER_GROUP`: reader batches pulled per refill
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("FWSCAN_BATCH_SIZE") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.batch_size = v;
            }
        }

        if let Ok(s) = std::env::var("FWSCAN_INFER_ROWS") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.infer_schema_rows = v;
            }
        }

        if let Ok(s) = std::env::var("FWSCAN_READER_GROUP") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.reader_group = v;
            }
        }

        cfg
    }

    pub fn with_infer_schema_rows(mut self, rows: usize) -> Self {
        self.infer_schema_rows = rows;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }
}
