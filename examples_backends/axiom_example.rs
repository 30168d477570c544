use axiom_log_sink::init::init_diagnostics;
use axiom_log_sink::request_id::RequestScope;
use axiom_log_sink::{Emitter, Payload};

/// Ships a few records to the dataset named by `AXIOM_DATASET` using the
/// token in `AXIOM_TOKEN`. Run with both set:
///
/// AXIOM_DATASET=my-dataset AXIOM_TOKEN=xaat-... cargo run --example axiom_example
#[tokio::main]
async fn main() {
    if let Err(e) = init_diagnostics() {
        eprintln!("diagnostics not installed: {}", e);
    }

    let log = Emitter::from_env();

    log.info(Payload::new().with("message", "service starting")).await;

    // Simulates a request handler: the inbound x-request-id is picked up
    // from the task-local scope.
    RequestScope::run("req-3f2a", async {
        let err = "forty-two".parse::<u32>().unwrap_err();
        log.error(
            Payload::new()
                .with("message", "could not parse quantity")
                .with("user_id", 42)
                .with_error(&err),
        )
        .await;
    })
    .await;

    let delivery = log
        .critical(Payload::new().with("id", "job-7").with("message", "nightly export aborted"))
        .await;
    println!("last record: {:?}", delivery);
}
