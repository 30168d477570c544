//! Environment variable names used to configure the Axiom sink.
//!
//! These are purely helpers; [`AxiomConfig`](crate::axiom::AxiomConfig)
//! can always be built by hand.

/// Target dataset name.
pub const AXIOM_DATASET_ENV: &str = "AXIOM_DATASET";

/// API token sent as `Authorization: Bearer <token>`.
pub const AXIOM_TOKEN_ENV: &str = "AXIOM_TOKEN";

/// Optional base URL override, e.g. for a regional edge or a local stub.
pub const AXIOM_URL_ENV: &str = "AXIOM_URL";

/// Base URL used when [`AXIOM_URL_ENV`] is unset.
pub const DEFAULT_AXIOM_URL: &str = "https://api.axiom.co";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
