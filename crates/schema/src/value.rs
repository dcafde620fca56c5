//! Decoded runtime values and the immutable entity record.

use rust_decimal::Decimal;
use serde_json::Value as Json;
use std::collections::BTreeMap;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::raw::normalize_key;

/// A decoded field value. All monetary values use `Decimal` -- never `f64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Present-but-null. Stored only for optional fields; distinct from a
    /// field that is absent altogether.
    Null,
    Bool(bool),
    Int(i64),
    Decimal(Decimal),
    Str(String),
    Timestamp(OffsetDateTime),
    /// Free-form mapping carried through without a schema (metadata,
    /// 3-D Secure status blocks).
    Map(BTreeMap<String, Value>),
    List(Vec<Value>),
    Entity(Entity),
}

impl Value {
    /// Returns a human-readable type name for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::Str(_) => "string",
            Value::Timestamp(_) => "timestamp",
            Value::Map(_) => "map",
            Value::List(_) => "list",
            Value::Entity(_) => "entity",
        }
    }

    /// Carry a raw JSON value through without a schema. Integral numbers
    /// become `Int`, other numbers `Decimal`; object keys are normalized so
    /// symbol-serialized mappings decode identically.
    pub(crate) fn from_raw_free(raw: &Json) -> Value {
        match raw {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n
                    .to_string()
                    .parse::<Decimal>()
                    .map(Value::Decimal)
                    .unwrap_or_else(|_| Value::Str(n.to_string())),
            },
            Json::String(s) => Value::Str(s.clone()),
            Json::Array(items) => Value::List(items.iter().map(Value::from_raw_free).collect()),
            Json::Object(obj) => Value::Map(
                obj.iter()
                    .map(|(k, v)| (normalize_key(k).to_string(), Value::from_raw_free(v)))
                    .collect(),
            ),
        }
    }

    /// Encode a decoded value back to its wire form: decimals as strings,
    /// timestamps as RFC 3339. Re-coercing the result yields the same value.
    pub fn to_json(&self) -> Json {
        match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => serde_json::json!(i),
            Value::Decimal(d) => Json::String(d.to_string()),
            Value::Str(s) => Json::String(s.clone()),
            Value::Timestamp(t) => Json::String(t.format(&Rfc3339).unwrap_or_default()),
            Value::Map(map) => Json::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Entity(entity) => entity.to_json(),
        }
    }
}

// ──────────────────────────────────────────────
// Entity
// ──────────────────────────────────────────────

/// An immutable decoded record.
///
/// Holds exactly the fields that were present and valid. Optional fields
/// that were absent have no entry; an explicit null in the source is stored
/// as [`Value::Null`]. Entities built through a variant resolver carry the
/// discriminator literal they resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    variant: Option<&'static str>,
    fields: BTreeMap<String, Value>,
}

impl Entity {
    pub(crate) fn new(variant: Option<&'static str>, fields: BTreeMap<String, Value>) -> Self {
        Entity { variant, fields }
    }

    /// The discriminator literal this entity resolved to, when built
    /// through a variant schema (`"bank_card"`, `"redirect"`, ...).
    pub fn variant(&self) -> Option<&'static str> {
        self.variant
    }

    /// Raw field access. `None` means the field was absent; a present
    /// null is `Some(&Value::Null)`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// All decoded fields, in sorted order.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// String accessor; `None` for absent, null, or non-string fields.
    pub fn str(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(Value::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        match self.fields.get(name) {
            Some(Value::Int(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.fields.get(name) {
            Some(Value::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn decimal(&self, name: &str) -> Option<Decimal> {
        match self.fields.get(name) {
            Some(Value::Decimal(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn timestamp(&self, name: &str) -> Option<OffsetDateTime> {
        match self.fields.get(name) {
            Some(Value::Timestamp(t)) => Some(*t),
            _ => None,
        }
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        match self.fields.get(name) {
            Some(Value::Entity(e)) => Some(e),
            _ => None,
        }
    }

    pub fn map(&self, name: &str) -> Option<&BTreeMap<String, Value>> {
        match self.fields.get(name) {
            Some(Value::Map(m)) => Some(m),
            _ => None,
        }
    }

    /// Walk a dotted path through nested entities and free-form maps.
    pub fn at(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Entity(entity) => entity.fields.get(segment)?,
                Value::Map(map) => map.get(segment)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Encode the record back to a JSON object (wire form).
    pub fn to_json(&self) -> Json {
        Json::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

// ──────────────────────────────────────────────
// Collection
// ──────────────────────────────────────────────

/// A decoded result page.
///
/// Item order matches the raw input sequence. `next_cursor` is `None` when
/// no further page exists; `total` is a count hint some endpoints include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub items: Vec<Entity>,
    pub next_cursor: Option<String>,
    pub total: Option<i64>,
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
