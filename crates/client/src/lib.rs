//! Thin synchronous client for the YooKassa API.
//!
//! HTTP plumbing only: Basic-auth credentials, the idempotency header, and
//! query passthrough. Response payloads decode through `yookassa-schema`;
//! this crate never interprets entity shapes itself, and it never retries
//! -- backoff is the caller's decision.

pub mod config;
pub mod error;
mod http;
pub mod payments;

pub use config::Config;
pub use error::ApiError;
pub use http::IDEMPOTENCE_KEY_HEADER;
pub use payments::Payments;
