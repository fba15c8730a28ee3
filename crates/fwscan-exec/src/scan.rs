//! The lazy fixed-width scan handle and its batch stream.
//!
//! `FwfScan::open` resolves the offset table and infers the schema once;
//! every subsequent `stream` call opens a fresh reader with its own cursor,
//! so independent executions never contend and never leak state into one
//! another.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use fwscan_core::config::ScanConfig;
use fwscan_core::error::Result;
use fwscan_core::schema::Schema;
use fwscan_core::types::RowBatch;
use fwscan_io::LineBatchReader;
use fwscan_ops::extract::extract_batch;
use fwscan_ops::infer::{infer_schema, CsvSniffer, TypeSniffer};
use fwscan_ops::layout::{resolve, ColumnSpec, OffsetTable};
use fwscan_ops::predicate::Predicate;

/// Per-execution pushdown parameters supplied by the host. A fresh request
/// may accompany every execution of the same logical scan.
#[derive(Debug, Clone, Default)]
pub struct ScanRequest {
    /// Requested column subset; `None` selects all columns.
    pub with_columns: Option<Vec<String>>,
    /// Row filter; rows failing it are dropped before counting against
    /// `n_rows`.
    pub predicate: Option<Predicate>,
    /// Maximum rows to yield across all batches; `None` is unbounded.
    pub n_rows: Option<u64>,
    /// Preferred consumer-visible batch size; `None` takes the configured
    /// default.
    pub batch_size: Option<usize>,
}

/// One logical fixed-width scan: source path, normalized offsets, and the
/// schema inferred once at open time.
pub struct FwfScan {
    path: PathBuf,
    table: OffsetTable,
    schema: Arc<Schema>,
    config: ScanConfig,
}

impl FwfScan {
    /// Resolve the spec, sample the source, and cache the inferred schema.
    pub fn open<P: AsRef<Path>>(path: P, spec: &ColumnSpec, config: ScanConfig) -> Result<Self> {
        Self::open_with_sniffer(path, spec, config, &CsvSniffer)
    }

    /// Like `open`, with an injected type sniffer.
    pub fn open_with_sniffer<P: AsRef<Path>>(
        path: P,
        spec: &ColumnSpec,
        config: ScanConfig,
        sniffer: &dyn TypeSniffer,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let table = resolve(spec)?;

        let sample_rows = config.infer_schema_rows;
        let mut reader =
            LineBatchReader::open(&path, sample_rows.max(1), Some(sample_rows as u64))?;
        let sample = reader.next_batch()?.unwrap_or_default();
        let schema = Arc::new(infer_schema(&sample, &table, sniffer)?);

        debug!(
            source = %path.display(),
            columns = schema.len(),
            sampled = sample.len(),
            "opened fixed-width scan"
        );

        Ok(Self {
            path,
            table,
            schema,
            config,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn schema_arc(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }

    /// Start one execution: open a fresh reader and return the lazy batch
    /// stream for `request`. The stream owns the reader; dropping the stream
    /// closes the file.
    pub fn stream(&self, request: ScanRequest) -> Result<BatchStream> {
        let batch_size = request.batch_size.unwrap_or(self.config.batch_size);

        // The line cap can only be pushed into the reader when no predicate
        // filters rows afterwards; otherwise the cap counts surviving rows
        // and the reader must stay unbounded.
        let line_cap = match (&request.predicate, request.n_rows) {
            (None, Some(n)) => Some(n),
            _ => None,
        };

        let reader = LineBatchReader::open(&self.path, batch_size, line_cap)?;

        debug!(
            source = %self.path.display(),
            batch_size,
            n_rows = ?request.n_rows,
            projected = ?request.with_columns,
            "starting fixed-width stream"
        );

        Ok(BatchStream {
            reader,
            pending: VecDeque::new(),
            table: self.table.clone(),
            schema: Arc::clone(&self.schema),
            with_columns: request.with_columns,
            predicate: request.predicate,
            rows_left: request.n_rows,
            group: self.config.reader_group,
            done: false,
        })
    }
}

/// Finite pull-based sequence of typed batches for one execution. Not
/// restartable; call `FwfScan::stream` again for a fresh pass.
pub struct BatchStream {
    reader: LineBatchReader,
    /// Raw-line sub-batches pulled from the reader in groups.
    pending: VecDeque<Vec<String>>,
    table: OffsetTable,
    schema: Arc<Schema>,
    with_columns: Option<Vec<String>>,
    predicate: Option<Predicate>,
    /// Output rows still owed to the consumer; `None` is unbounded.
    rows_left: Option<u64>,
    group: usize,
    done: bool,
}

impl BatchStream {
    fn refill(&mut self) -> Result<bool> {
        let batches = self.reader.next_batches(self.group)?;
        if batches.is_empty() {
            return Ok(false);
        }
        self.pending.extend(batches);
        Ok(true)
    }

    fn transform(&mut self, lines: Vec<String>, base_row: u64) -> Result<RowBatch> {
        let mut batch = extract_batch(
            &lines,
            base_row,
            &self.table,
            &self.schema,
            self.predicate.as_ref(),
            self.with_columns.as_deref(),
        )?;

        if let Some(left) = &mut self.rows_left {
            let take = (*left).min(batch.num_rows() as u64);
            batch.truncate(take as usize);
            *left -= take;
        }

        Ok(batch)
    }
}

impl Iterator for BatchStream {
    type Item = Result<RowBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done || self.rows_left == Some(0) {
                self.done = true;
                return None;
            }

            if self.pending.is_empty() {
                match self.refill() {
                    Ok(true) => {}
                    Ok(false) => {
                        debug!("fixed-width stream exhausted");
                        self.done = true;
                        return None;
                    }
                    Err(e) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                }
            }

            // base_row: the reader's cursor minus everything still pending
            let queued: u64 = self.pending.iter().map(|b| b.len() as u64).sum();
            let lines = self.pending.pop_front()?;
            let base_row = self.reader.line_no() - queued;

            match self.transform(lines, base_row) {
                Ok(batch) => {
                    // a fully filtered sub-batch is not worth yielding
                    if batch.num_rows() == 0 {
                        continue;
                    }
                    trace!(rows = batch.num_rows(), "yielding batch");
                    return Some(Ok(batch));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
