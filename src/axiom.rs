use crate::env::{env_or, AXIOM_DATASET_ENV, AXIOM_TOKEN_ENV, AXIOM_URL_ENV, DEFAULT_AXIOM_URL};
use crate::error::IngestError;
use crate::record::Record;
use crate::sink::LogSink;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::borrow::Cow;
use std::error::Error;

/// Configuration for [`AxiomSink`].
///
/// No field is validated. An empty dataset or token yields a request the
/// endpoint rejects, which the emitter treats like any other failed send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxiomConfig {
    /// Base URL without path, e.g. "https://api.axiom.co"
    pub url: String,
    pub dataset: String,
    pub token: String,
}

impl AxiomConfig {
    pub fn new(dataset: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: DEFAULT_AXIOM_URL.to_string(),
            dataset: dataset.into(),
            token: token.into(),
        }
    }

    /// Read `AXIOM_DATASET`, `AXIOM_TOKEN` and `AXIOM_URL`.
    ///
    /// Unset dataset and token become empty strings.
    pub fn from_env() -> Self {
        Self {
            url: env_or(AXIOM_URL_ENV, DEFAULT_AXIOM_URL),
            dataset: env_or(AXIOM_DATASET_ENV, ""),
            token: env_or(AXIOM_TOKEN_ENV, ""),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Ingest URL: `{url}/v1/datasets/{dataset}/ingest`.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1/datasets/{}/ingest",
            self.url.trim_end_matches('/'),
            urlencoding::encode(&self.dataset)
        )
    }
}

#[derive(Clone, Debug)]
enum ConfigSource {
    Fixed(AxiomConfig),
    /// Re-read the environment on every send.
    Env,
}

/// Axiom implementation of [`LogSink`] using the HTTP ingest API.
///
/// Each send is a single `POST` whose body is a JSON array of records.
#[derive(Clone, Debug)]
pub struct AxiomSink {
    client: Client,
    source: ConfigSource,
}

impl AxiomSink {
    /// Construct a sink with fixed configuration.
    ///
    /// **Parameters**
    /// - `config`: [`AxiomConfig`] describing base URL, dataset and token.
    ///
    /// **Returns**
    /// - A ready-to-use [`AxiomSink`] that can be passed into
    ///   [`Emitter::new`](crate::emitter::Emitter::new).
    pub fn new(config: AxiomConfig) -> Self {
        Self {
            client: Client::new(),
            source: ConfigSource::Fixed(config),
        }
    }

    /// Construct a sink that reads its configuration from the environment
    /// at the time of each send.
    pub fn from_env() -> Self {
        Self {
            client: Client::new(),
            source: ConfigSource::Env,
        }
    }

    /// Replace the HTTP client, e.g. to set timeouts or a proxy.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn config(&self) -> Cow<'_, AxiomConfig> {
        match &self.source {
            ConfigSource::Fixed(config) => Cow::Borrowed(config),
            ConfigSource::Env => Cow::Owned(AxiomConfig::from_env()),
        }
    }

    /// POST `records` to the ingest endpoint.
    ///
    /// **Returns**
    /// - `Ok(())` on any 2xx response.
    /// - `Err(IngestError)` on transport failure or any other status.
    pub async fn ingest(&self, records: &[Record]) -> Result<(), IngestError> {
        let config = self.config();
        let endpoint = config.endpoint();
        let body = serde_json::to_vec(records)?;

        tracing::debug!(endpoint = %endpoint, records = records.len(), "sending records to axiom");

        let resp = self
            .client
            .post(&endpoint)
            .bearer_auth(&config.token)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        if resp.status().is_success() {
            Ok(())
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_else(|_| "<no body>".to_string());
            Err(IngestError::Status { status, body })
        }
    }
}

#[async_trait]
impl LogSink for AxiomSink {
    async fn send(&self, records: &[Record]) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.ingest(records).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_layout() {
        let config = AxiomConfig::new("web-logs", "xaat-123");
        assert_eq!(config.endpoint(), "https://api.axiom.co/v1/datasets/web-logs/ingest");
    }

    #[test]
    fn endpoint_trims_slash_and_encodes_dataset() {
        let config = AxiomConfig::new("my logs/prod", "t").with_url("http://127.0.0.1:9000/");
        assert_eq!(
            config.endpoint(),
            "http://127.0.0.1:9000/v1/datasets/my%20logs%2Fprod/ingest"
        );
    }

    #[test]
    fn fixed_config_is_borrowed() {
        let sink = AxiomSink::new(AxiomConfig::new("d", "t"));
        assert!(matches!(sink.config(), Cow::Borrowed(_)));
        assert_eq!(sink.config().dataset, "d");
    }
}
