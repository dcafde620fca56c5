//! Scalar coercion rules and the enum validator -- the leaf layer of the
//! decoding pipeline.
//!
//! A rule is total on its accepted raw shapes and fails with TypeMismatch
//! on anything else. No rule performs business validation (range checks,
//! checksums); shape and type only.

use rust_decimal::Decimal;
use serde_json::Value as Json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::DecodeError;
use crate::raw::json_type_name;
use crate::value::Value;

/// A defined conversion from a raw scalar to a typed scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionRule {
    /// Raw must be a string; returned unchanged.
    StrictString,
    /// Digit strings ("0659") and integral numbers become integers. A
    /// non-empty all-`*` mask token is preserved as its original string
    /// form: the upstream API redacts saved-card expiry fields this way,
    /// so callers must treat such fields as "integer or string".
    CoercibleInteger,
    /// Numeric string ("10.00") or number, parsed to an exact decimal.
    Decimal,
    /// RFC 3339 string, sub-second precision preserved.
    Timestamp,
    Boolean,
    /// Pass-through string (ids, cursors, URLs); no validation.
    OpaqueString,
}

impl CoercionRule {
    /// Expected-type label used in TypeMismatch errors.
    pub fn expected(&self) -> &'static str {
        match self {
            CoercionRule::StrictString | CoercionRule::OpaqueString => "string",
            CoercionRule::CoercibleInteger => "integer or digit string",
            CoercionRule::Decimal => "decimal",
            CoercionRule::Timestamp => "RFC 3339 timestamp",
            CoercionRule::Boolean => "boolean",
        }
    }
}

/// Masked fields arrive as a run of `*` characters.
fn is_mask_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b == b'*')
}

fn mismatch(rule: CoercionRule, field: &str, got: String) -> DecodeError {
    DecodeError::TypeMismatch {
        path: field.to_string(),
        expected: rule.expected(),
        got,
    }
}

/// Coerce a raw scalar into a typed scalar according to `rule`.
///
/// `field` is the local field name, used as the error path.
pub fn coerce(raw: &Json, rule: CoercionRule, field: &str) -> Result<Value, DecodeError> {
    match rule {
        CoercionRule::StrictString | CoercionRule::OpaqueString => match raw {
            Json::String(s) => Ok(Value::Str(s.clone())),
            other => Err(mismatch(rule, field, json_type_name(other).to_string())),
        },
        CoercionRule::Boolean => match raw {
            Json::Bool(b) => Ok(Value::Bool(*b)),
            other => Err(mismatch(rule, field, json_type_name(other).to_string())),
        },
        CoercionRule::CoercibleInteger => match raw {
            Json::Number(n) => match n.as_i64() {
                Some(i) => Ok(Value::Int(i)),
                None => Err(mismatch(rule, field, format!("number {}", n))),
            },
            Json::String(s) if is_mask_token(s) => Ok(Value::Str(s.clone())),
            Json::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => s
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| mismatch(rule, field, format!("\"{}\"", s))),
            Json::String(s) => Err(mismatch(rule, field, format!("\"{}\"", s))),
            other => Err(mismatch(rule, field, json_type_name(other).to_string())),
        },
        CoercionRule::Decimal => match raw {
            Json::Number(n) => n
                .to_string()
                .parse::<Decimal>()
                .map(Value::Decimal)
                .map_err(|_| mismatch(rule, field, format!("number {}", n))),
            Json::String(s) => s
                .parse::<Decimal>()
                .map(Value::Decimal)
                .map_err(|_| mismatch(rule, field, format!("\"{}\"", s))),
            other => Err(mismatch(rule, field, json_type_name(other).to_string())),
        },
        CoercionRule::Timestamp => match raw {
            Json::String(s) => OffsetDateTime::parse(s, &Rfc3339)
                .map(Value::Timestamp)
                .map_err(|_| mismatch(rule, field, format!("\"{}\"", s))),
            other => Err(mismatch(rule, field, json_type_name(other).to_string())),
        },
    }
}

/// Restrict a string to a fixed literal set.
///
/// Exact, case-sensitive match, no normalization. A value outside the
/// declared set is always rejected, never coerced to a default.
pub fn validate_enum(
    raw: &Json,
    allowed: &'static [&'static str],
    field: &str,
) -> Result<String, DecodeError> {
    let s = raw.as_str().ok_or_else(|| DecodeError::TypeMismatch {
        path: field.to_string(),
        expected: "string",
        got: json_type_name(raw).to_string(),
    })?;
    if allowed.contains(&s) {
        Ok(s.to_string())
    } else {
        Err(DecodeError::EnumViolation {
            path: field.to_string(),
            value: s.to_string(),
            allowed,
        })
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
