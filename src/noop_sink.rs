use crate::record::Record;
use crate::sink::LogSink;
use async_trait::async_trait;
use std::error::Error;

/// A sink that simply drops all records.
///
/// Handy for binaries and tests that need an [`Emitter`] but no ingestion.
///
/// [`Emitter`]: crate::emitter::Emitter
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

#[async_trait]
impl LogSink for NoopSink {
    async fn send(&self, _records: &[Record]) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}
