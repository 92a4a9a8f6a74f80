//! Record sinks: where normalized products go once the pipeline is done
//! with them.
//!
//! Persistence is a collaborator, not part of the crawl core, so the
//! pipeline only sees the [`RecordSink`] trait. The default implementation
//! appends JSON lines to a local file.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

use fixprice_core::CanonicalProduct;

/// Receives each emitted record exactly once, in completion order.
pub(crate) trait RecordSink {
    async fn emit(&mut self, record: &CanonicalProduct) -> anyhow::Result<()>;

    async fn flush(&mut self) -> anyhow::Result<()>;
}

/// Writes one serialized record per line.
pub(crate) struct JsonLinesSink {
    writer: BufWriter<File>,
}

impl JsonLinesSink {
    /// Creates (or truncates) the output file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be created.
    pub(crate) async fn create(path: &Path) -> anyhow::Result<Self> {
        let file = File::create(path).await?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl RecordSink for JsonLinesSink {
    async fn emit(&mut self, record: &CanonicalProduct) -> anyhow::Result<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        self.writer.write_all(&line).await?;
        Ok(())
    }

    async fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush().await?;
        Ok(())
    }
}

/// Collects records in memory; backs the pipeline tests.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemorySink {
    pub(crate) records: Vec<CanonicalProduct>,
}

#[cfg(test)]
impl RecordSink for MemorySink {
    async fn emit(&mut self, record: &CanonicalProduct) -> anyhow::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    async fn flush(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}
