//! The payments endpoint family.
//!
//! A thin shell over the coercion core: every call issues one HTTP request
//! and decodes the response body through `yookassa-schema`. Request bodies
//! pass through as caller-built JSON; this crate does not validate them.

use serde_json::Value as Json;
use yookassa_schema::{build_collection, build_entity, catalog, Collection, Entity};

use crate::config::Config;
use crate::error::ApiError;
use crate::http;

/// Client for `/payments`.
#[derive(Debug, Clone)]
pub struct Payments {
    config: Config,
}

impl Payments {
    pub fn new(config: Config) -> Self {
        Payments { config }
    }

    /// Create a payment. Retrying with the same `idempotency_key` returns
    /// the original payment instead of charging twice.
    pub fn create(&self, payment: &Json, idempotency_key: &str) -> Result<Entity, ApiError> {
        let body = http::post(&self.config, "payments", idempotency_key, payment)?;
        Ok(build_entity(&catalog::PAYMENT, &body)?)
    }

    /// Fetch a payment by id.
    pub fn find(&self, payment_id: &str) -> Result<Entity, ApiError> {
        let body = http::get(&self.config, &payment_path(payment_id), &[])?;
        Ok(build_entity(&catalog::PAYMENT, &body)?)
    }

    /// Capture a payment in `waiting_for_capture`. Omitting `body` captures
    /// the full authorized amount.
    pub fn capture(
        &self,
        payment_id: &str,
        body: Option<&Json>,
        idempotency_key: &str,
    ) -> Result<Entity, ApiError> {
        let path = format!("{}/capture", payment_path(payment_id));
        let response = http::post(&self.config, &path, idempotency_key, &capture_body(body))?;
        Ok(build_entity(&catalog::PAYMENT, &response)?)
    }

    /// Cancel a payment in `waiting_for_capture`.
    pub fn cancel(&self, payment_id: &str, idempotency_key: &str) -> Result<Entity, ApiError> {
        let path = format!("{}/cancel", payment_path(payment_id));
        let response = http::post(&self.config, &path, idempotency_key, &Json::Object(Default::default()))?;
        Ok(build_entity(&catalog::PAYMENT, &response)?)
    }

    /// List payments. Filters pass through as query parameters
    /// (`limit`, `cursor`, `created_at.gt`, ...).
    pub fn list(&self, filters: &[(String, String)]) -> Result<Collection, ApiError> {
        let body = http::get(&self.config, "payments", filters)?;
        Ok(build_collection(&catalog::PAYMENT_COLLECTION, &body)?)
    }
}

fn payment_path(payment_id: &str) -> String {
    format!("payments/{}", payment_id)
}

/// The capture endpoint requires a JSON body even when capturing in full.
fn capture_body(body: Option<&Json>) -> Json {
    match body {
        Some(json) => json.clone(),
        None => Json::Object(Default::default()),
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
