//! Client error taxonomy.

use yookassa_schema::DecodeError;

/// All errors that can be returned by an API call.
///
/// The client never retries internally; backoff on transport failures and
/// handling of non-success statuses are the caller's decision.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Client misconfiguration (missing credentials).
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Connection-level failure (DNS, TLS, timeouts, malformed body).
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The API answered with a non-success status.
    #[error("API returned status {status}")]
    Status { status: u16 },

    /// The response body did not decode into the expected entity.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
