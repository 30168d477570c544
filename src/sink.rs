use crate::record::Record;
use async_trait::async_trait;
use std::error::Error;

/// Asynchronous destination for [`Record`]s produced by the
/// [`Emitter`](crate::emitter::Emitter).
///
/// Implementations transport records to a concrete backend (Axiom, a
/// test capture, nowhere). The emitter awaits `send` once per log call
/// and absorbs any error it returns.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Send records to the underlying backend in one request.
    ///
    /// **Parameters**
    /// - `records`: fully assembled [`Record`]s. The emitter always passes
    ///   exactly one.
    ///
    /// **Returns**
    /// - `Ok(())` if the backend accepted the records.
    /// - `Err(..)` on network error, serialization error, non-success HTTP
    ///   status, etc. Nothing is retried.
    async fn send(&self, records: &[Record]) -> Result<(), Box<dyn Error + Send + Sync>>;
}
