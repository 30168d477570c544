/// Failure of one request to the Axiom ingest endpoint.
#[derive(thiserror::Error, Debug)]
pub enum IngestError {
    #[cfg(feature = "axiom")]
    #[error("ingest request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ingest rejected with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Error returned when installing the diagnostic subscriber.
#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled(#[from] tracing::subscriber::SetGlobalDefaultError),
}
