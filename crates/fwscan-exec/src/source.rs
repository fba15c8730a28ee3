//! Host-integration shim: register a scan as a lazy source.
//!
//! The shim performs no transformation itself. It pairs an inferred schema
//! with a stream factory so the consuming engine can look at the schema
//! while deferring execution, then hand pushdown (columns, predicate, row
//! limit, batch size) back through a `ScanRequest` when the plan finally
//! runs. A source may be executed any number of times.

use std::path::Path;
use std::sync::Arc;

use fwscan_core::config::ScanConfig;
use fwscan_core::error::{Error, Result};
use fwscan_core::schema::Schema;
use fwscan_core::types::{Column, RowBatch};
use fwscan_ops::layout::ColumnSpec;
use fwscan_ops::predicate::Predicate;

use crate::scan::{BatchStream, FwfScan, ScanRequest};

/// Produces one fresh `BatchStream` per execution of the registered scan.
pub type StreamFactory = Arc<dyn Fn(ScanRequest) -> Result<BatchStream> + Send + Sync>;

/// A registered lazy source: schema up front, execution on demand.
#[derive(Clone)]
pub struct LazySource {
    schema: Arc<Schema>,
    factory: StreamFactory,
}

impl std::fmt::Debug for LazySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazySource")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

/// Register `(schema, stream_factory)` as a lazy source.
pub fn register_io_source(schema: Arc<Schema>, factory: StreamFactory) -> LazySource {
    LazySource { schema, factory }
}

impl LazySource {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Begin building a deferred execution against this source.
    pub fn lazy(&self) -> LazyScan {
        LazyScan {
            source: self.clone(),
            request: ScanRequest::default(),
        }
    }
}

/// Deferred execution builder carrying pushdown state. Nothing is read until
/// `stream` or `collect`.
#[derive(Clone)]
pub struct LazyScan {
    source: LazySource,
    request: ScanRequest,
}

impl LazyScan {
    /// Project onto `columns`, in the given order.
    pub fn with_columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.request.with_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Filter rows during the scan. Filtered rows never count against a
    /// later `limit`.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.request.predicate = Some(predicate);
        self
    }

    /// Cap the total rows yielded across all batches.
    pub fn limit(mut self, n_rows: u64) -> Self {
        self.request.n_rows = Some(n_rows);
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.request.batch_size = Some(batch_size);
        self
    }

    /// The schema this execution will produce (projection applied).
    pub fn collect_schema(&self) -> Result<Schema> {
        match &self.request.with_columns {
            None => Ok(Schema::clone(&self.source.schema)),
            Some(subset) => {
                let mut fields = Vec::with_capacity(subset.len());
                for name in subset {
                    let idx = self.source.schema.index_of(name).ok_or_else(|| {
                        Error::Schema(format!("projected column '{name}' not found"))
                    })?;
                    fields.push(self.source.schema.fields[idx].clone());
                }
                Ok(Schema::new(fields))
            }
        }
    }

    /// Execute: one fresh stream honoring the accumulated pushdown.
    pub fn stream(&self) -> Result<BatchStream> {
        (self.source.factory)(self.request.clone())
    }

    /// Materialize the full result eagerly: drain the stream in request
    /// order and concatenate batches preserving row order.
    pub fn collect(&self) -> Result<RowBatch> {
        let schema = self.collect_schema()?;
        let mut out = RowBatch {
            columns: schema
                .fields
                .iter()
                .map(|f| Column::new(f.name.clone()))
                .collect(),
        };

        for batch in self.stream()? {
            out.vstack(batch?).map_err(Error::Invariant)?;
        }
        Ok(out)
    }
}

/// Open a lazy fixed-width scan: resolve the spec, infer the schema from a
/// sampled prefix, and register the stream factory.
pub fn scan_fwf<P: AsRef<Path>>(
    path: P,
    spec: &ColumnSpec,
    config: ScanConfig,
) -> Result<LazySource> {
    let scan = Arc::new(FwfScan::open(path, spec, config)?);
    let schema = scan.schema_arc();
    let factory: StreamFactory = Arc::new(move |request| scan.stream(request));
    Ok(register_io_source(schema, factory))
}

/// Eagerly read a fixed-width file: scan lazily, then materialize.
pub fn read_fwf<P: AsRef<Path>>(
    path: P,
    spec: &ColumnSpec,
    config: ScanConfig,
) -> Result<RowBatch> {
    scan_fwf(path, spec, config)?.lazy().collect()
}
