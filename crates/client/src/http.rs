//! Request plumbing shared by the endpoint clients.
//!
//! `ureq` is synchronous; every call issues exactly one request and parses
//! the body as JSON. Decoding into typed entities happens in the endpoint
//! clients, never here.

use serde_json::Value as Json;

use crate::config::Config;
use crate::error::ApiError;

/// Idempotency header the API deduplicates unsafe requests on.
pub const IDEMPOTENCE_KEY_HEADER: &str = "Idempotence-Key";

pub(crate) fn get(
    config: &Config,
    path: &str,
    query: &[(String, String)],
) -> Result<Json, ApiError> {
    let agent = ureq::Agent::new_with_defaults();
    let mut request = agent
        .get(&config.endpoint(path))
        .header("Authorization", &config.basic_auth());
    for (name, value) in query {
        request = request.query(name, value);
    }

    let response = request.call().map_err(status_or_transport)?;
    response
        .into_body()
        .read_json()
        .map_err(|e| ApiError::Transport {
            message: format!("failed to parse response as JSON: {}", e),
        })
}

pub(crate) fn post(
    config: &Config,
    path: &str,
    idempotency_key: &str,
    body: &Json,
) -> Result<Json, ApiError> {
    let agent = ureq::Agent::new_with_defaults();
    let response = agent
        .post(&config.endpoint(path))
        .header("Authorization", &config.basic_auth())
        .header(IDEMPOTENCE_KEY_HEADER, idempotency_key)
        .send_json(body)
        .map_err(status_or_transport)?;

    response
        .into_body()
        .read_json()
        .map_err(|e| ApiError::Transport {
            message: format!("failed to parse response as JSON: {}", e),
        })
}

fn status_or_transport(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::StatusCode(code) => ApiError::Status { status: code },
        other => ApiError::Transport {
            message: other.to_string(),
        },
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
