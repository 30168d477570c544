use crate::level::Level;
use crate::record::{Record, UNKNOWN_REQUEST_ID};
use crate::request_id::{NoRequestContext, RequestIdSource};
use crate::sink::LogSink;
use crate::value::{Payload, Value};
use chrono::Utc;
use std::sync::Arc;

/// Outcome of one log call.
///
/// Purely informational: a dropped record has already been reported on
/// the local diagnostic stream and callers are free to ignore this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The sink accepted the record.
    Sent,
    /// The sink failed; the record is gone.
    Dropped,
}

/// Fire-and-forget structured logger.
///
/// Every call builds one [`Record`], hands it to the [`LogSink`] and
/// swallows any failure. The emitter holds no mutable state, so one
/// instance (or clones of it) can be shared freely across tasks.
///
/// Failures are reported as `tracing` events. A process without a
/// subscriber discards them; call [`init_diagnostics`] to have them
/// printed to stderr.
///
/// [`init_diagnostics`]: crate::init::init_diagnostics
#[derive(Clone)]
pub struct Emitter {
    sink: Arc<dyn LogSink>,
    request_ids: Arc<dyn RequestIdSource>,
}

impl Emitter {
    /// Create an emitter with no ambient request context.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            request_ids: Arc::new(NoRequestContext),
        }
    }

    /// Use `source` to look up the current request id when the payload
    /// carries none.
    pub fn with_request_ids(mut self, source: impl RequestIdSource + 'static) -> Self {
        self.request_ids = Arc::new(source);
        self
    }

    /// Axiom emitter configured from `AXIOM_*` environment variables,
    /// resolving ambient ids from the task-local
    /// [`RequestScope`](crate::request_id::RequestScope).
    ///
    /// Does not install a subscriber; see [`init_diagnostics`](crate::init::init_diagnostics).
    #[cfg(feature = "axiom")]
    pub fn from_env() -> Self {
        use crate::axiom::AxiomSink;
        use crate::request_id::TaskLocalRequestId;

        Self::new(Arc::new(AxiomSink::from_env())).with_request_ids(TaskLocalRequestId)
    }

    pub async fn info(&self, payload: Payload) -> Delivery {
        self.log(Level::Info, payload).await
    }

    pub async fn warn(&self, payload: Payload) -> Delivery {
        self.log(Level::Warn, payload).await
    }

    pub async fn error(&self, payload: Payload) -> Delivery {
        self.log(Level::Error, payload).await
    }

    pub async fn critical(&self, payload: Payload) -> Delivery {
        self.log(Level::Critical, payload).await
    }

    /// Assemble a record at `level` and send it.
    ///
    /// Never fails. Sink errors are written to the local diagnostic
    /// stream as a `tracing` error event and reported as
    /// [`Delivery::Dropped`].
    pub async fn log(&self, level: Level, payload: Payload) -> Delivery {
        let time = Utc::now();
        let request_id = self.resolve_request_id(&payload);
        let record = Record::assemble(level, payload, request_id, time);

        match self.sink.send(std::slice::from_ref(&record)).await {
            Ok(()) => Delivery::Sent,
            Err(e) => {
                tracing::error!(error = %e, level = %level, "axiom logging error");
                Delivery::Dropped
            }
        }
    }

    /// `id`, then `request.id`, then the ambient source, then `"unknown"`.
    fn resolve_request_id(&self, payload: &Payload) -> String {
        payload
            .get("id")
            .and_then(present_id)
            .or_else(|| payload.get("request").and_then(|r| r.get("id")).and_then(present_id))
            .or_else(|| self.request_ids.request_id().filter(|id| !id.is_empty()))
            .unwrap_or_else(|| UNKNOWN_REQUEST_ID.to_string())
    }
}

/// Non-empty strings and non-zero numbers count as an id.
fn present_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}
