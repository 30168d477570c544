use std::sync::Arc;

use async_trait::async_trait;
use axiom_log_sink::record::Record;
use axiom_log_sink::sink::LogSink;
use axiom_log_sink::{Emitter, ErrorValue, Payload};

/// Example of plugging in a completely custom destination by
/// implementing the `LogSink` trait directly. Here records are printed
/// as the JSON body Axiom would receive.
struct StdoutJsonSink;

#[async_trait]
impl LogSink for StdoutJsonSink {
    async fn send(&self, records: &[Record]) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        println!("{}", serde_json::to_string_pretty(records)?);
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    let log = Emitter::new(Arc::new(StdoutJsonSink))
        .with_request_ids(|| Some("static-request".to_string()));

    log.info(Payload::new().with("message", "custom backend example started")).await;
    log.warn(
        Payload::new()
            .with("message", "upstream slow")
            .with("error", ErrorValue::new("TimeoutError", "took 3s")),
    )
    .await;
}
