//! Struct builder, variant resolver, and collection wrapper.
//!
//! Pure synchronous functions over a borrowed raw payload and a static
//! schema. A build call returns exactly one entity/collection or exactly
//! one error -- no partial results. The builder short-circuits on the first
//! field failure and prefixes the originating field name on every error it
//! propagates, so the top-level caller sees the full dotted path.

use serde_json::Value as Json;
use std::collections::BTreeMap;

use crate::coerce::{coerce, validate_enum};
use crate::error::DecodeError;
use crate::raw::{json_type_name, lookup};
use crate::schema::{
    AttributeSchema, CollectionSchema, ElementKind, FieldDescriptor, ValueKind, VariantSchema,
};
use crate::value::{Collection, Entity, Value};

/// Build a typed entity from a raw mapping according to `schema`.
///
/// Field lookup tolerates symbol-serialized keys; required fields must be
/// present and non-null; optional fields may be absent (no entry in the
/// result) or explicitly null (stored as [`Value::Null`]).
pub fn build_entity(schema: &AttributeSchema, raw: &Json) -> Result<Entity, DecodeError> {
    build_tagged(schema, raw, None)
}

fn build_tagged(
    schema: &AttributeSchema,
    raw: &Json,
    variant: Option<&'static str>,
) -> Result<Entity, DecodeError> {
    let obj = raw.as_object().ok_or_else(|| DecodeError::MalformedInput {
        path: String::new(),
        message: format!(
            "{} must be a mapping, got {}",
            schema.name,
            json_type_name(raw)
        ),
    })?;

    let mut fields = BTreeMap::new();
    for desc in schema.fields {
        let Some(value) = lookup(obj, desc.name) else {
            if desc.required {
                return Err(DecodeError::MissingField {
                    path: desc.name.to_string(),
                });
            }
            continue;
        };
        if value.is_null() {
            if desc.required {
                return Err(DecodeError::TypeMismatch {
                    path: desc.name.to_string(),
                    expected: expected_of(&desc.kind),
                    got: "null".to_string(),
                });
            }
            fields.insert(desc.name.to_string(), Value::Null);
            continue;
        }
        fields.insert(desc.name.to_string(), build_field(desc, value)?);
    }
    Ok(Entity::new(variant, fields))
}

fn build_field(desc: &FieldDescriptor, raw: &Json) -> Result<Value, DecodeError> {
    match desc.kind {
        ValueKind::Scalar(rule) => coerce(raw, rule, desc.name),
        ValueKind::Enum(allowed) => validate_enum(raw, allowed, desc.name).map(Value::Str),
        ValueKind::Entity(schema) => build_entity(schema, raw)
            .map(Value::Entity)
            .map_err(|e| e.prepend(desc.name)),
        ValueKind::Variant(family) => resolve_variant(family, raw)
            .map(Value::Entity)
            .map_err(|e| e.prepend(desc.name)),
        ValueKind::Map => match raw {
            Json::Object(_) => Ok(Value::from_raw_free(raw)),
            other => Err(DecodeError::TypeMismatch {
                path: desc.name.to_string(),
                expected: "mapping",
                got: json_type_name(other).to_string(),
            }),
        },
    }
}

/// Expected-type label for a field kind, used when a required field is null.
fn expected_of(kind: &ValueKind) -> &'static str {
    match kind {
        ValueKind::Scalar(rule) => rule.expected(),
        ValueKind::Enum(_) => "string",
        ValueKind::Entity(_) | ValueKind::Variant(_) | ValueKind::Map => "mapping",
    }
}

/// Resolve a polymorphic payload to its concrete schema and build it.
///
/// An absent discriminator is MissingField; an unregistered literal is
/// UnknownVariant -- a hard failure, never a fallback to a default branch.
/// Callers that must tolerate forward-compatible new kinds wrap this and
/// choose to degrade themselves.
pub fn resolve_variant(family: &VariantSchema, raw: &Json) -> Result<Entity, DecodeError> {
    let obj = raw.as_object().ok_or_else(|| DecodeError::MalformedInput {
        path: String::new(),
        message: format!(
            "{} must be a mapping, got {}",
            family.name,
            json_type_name(raw)
        ),
    })?;

    let tag_raw = lookup(obj, family.discriminator).ok_or_else(|| DecodeError::MissingField {
        path: family.discriminator.to_string(),
    })?;
    let tag = tag_raw.as_str().ok_or_else(|| DecodeError::TypeMismatch {
        path: family.discriminator.to_string(),
        expected: "string",
        got: json_type_name(tag_raw).to_string(),
    })?;

    let Some((literal, schema)) = family.branch(tag) else {
        return Err(DecodeError::UnknownVariant {
            path: family.discriminator.to_string(),
            discriminator: family.discriminator,
            value: tag.to_string(),
        });
    };

    // The branch schema re-declares the discriminator, so the built entity
    // keeps its own kind tag.
    build_tagged(schema, raw, Some(literal))
}

/// Build a paginated collection: decode every item through the element
/// kind, fail-fast on the first bad item, carry the cursor through.
pub fn build_collection(schema: &CollectionSchema, raw: &Json) -> Result<Collection, DecodeError> {
    let obj = raw.as_object().ok_or_else(|| DecodeError::MalformedInput {
        path: String::new(),
        message: format!(
            "{} must be a mapping, got {}",
            schema.name,
            json_type_name(raw)
        ),
    })?;

    let items_raw = lookup(obj, "items").ok_or_else(|| DecodeError::MissingField {
        path: "items".to_string(),
    })?;
    let arr = items_raw.as_array().ok_or_else(|| DecodeError::TypeMismatch {
        path: "items".to_string(),
        expected: "sequence",
        got: json_type_name(items_raw).to_string(),
    })?;

    let mut items = Vec::with_capacity(arr.len());
    for (idx, item) in arr.iter().enumerate() {
        let entity = match schema.element {
            ElementKind::Entity(element) => build_entity(element, item),
            ElementKind::Variant(family) => resolve_variant(family, item),
        }
        .map_err(|e| e.prepend(&idx.to_string()).prepend("items"))?;
        items.push(entity);
    }

    let next_cursor = match lookup(obj, "next_cursor") {
        None | Some(Json::Null) => None,
        Some(Json::String(s)) => Some(s.clone()),
        Some(other) => {
            return Err(DecodeError::TypeMismatch {
                path: "next_cursor".to_string(),
                expected: "string",
                got: json_type_name(other).to_string(),
            })
        }
    };
    let total = match lookup(obj, "total") {
        None | Some(Json::Null) => None,
        Some(Json::Number(n)) if n.is_i64() => n.as_i64(),
        Some(other) => {
            return Err(DecodeError::TypeMismatch {
                path: "total".to_string(),
                expected: "integer",
                got: json_type_name(other).to_string(),
            })
        }
    };

    Ok(Collection {
        items,
        next_cursor,
        total,
    })
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::CoercionRule;

    static PRODUCT: AttributeSchema = AttributeSchema {
        name: "product",
        fields: &[
            FieldDescriptor {
                name: "code",
                required: true,
                kind: ValueKind::Scalar(CoercionRule::StrictString),
            },
            FieldDescriptor {
                name: "name",
                required: false,
                kind: ValueKind::Scalar(CoercionRule::StrictString),
            },
        ],
    };

    static ORDER: AttributeSchema = AttributeSchema {
        name: "order",
        fields: &[
            FieldDescriptor {
                name: "id",
                required: true,
                kind: ValueKind::Scalar(CoercionRule::OpaqueString),
            },
            FieldDescriptor {
                name: "state",
                required: true,
                kind: ValueKind::Enum(&["open", "closed"]),
            },
            FieldDescriptor {
                name: "product",
                required: false,
                kind: ValueKind::Entity(&PRODUCT),
            },
            FieldDescriptor {
                name: "extra",
                required: false,
                kind: ValueKind::Map,
            },
        ],
    };

    static LINK: AttributeSchema = AttributeSchema {
        name: "link",
        fields: &[
            FieldDescriptor {
                name: "type",
                required: true,
                kind: ValueKind::Enum(&["link"]),
            },
            FieldDescriptor {
                name: "url",
                required: true,
                kind: ValueKind::Scalar(CoercionRule::OpaqueString),
            },
        ],
    };

    static TOKEN: AttributeSchema = AttributeSchema {
        name: "token",
        fields: &[
            FieldDescriptor {
                name: "type",
                required: true,
                kind: ValueKind::Enum(&["token"]),
            },
            FieldDescriptor {
                name: "token",
                required: true,
                kind: ValueKind::Scalar(CoercionRule::OpaqueString),
            },
        ],
    };

    static TARGET: VariantSchema = VariantSchema {
        name: "target",
        discriminator: "type",
        variants: &[("link", &LINK), ("token", &TOKEN)],
    };

    static TARGETS: CollectionSchema = CollectionSchema {
        name: "targets",
        element: ElementKind::Variant(&TARGET),
    };

    #[test]
    fn builds_required_and_optional_fields() {
        let raw = serde_json::json!({
            "id": "ord-1",
            "state": "open",
            "product": { "code": "PRD" }
        });
        let entity = build_entity(&ORDER, &raw).unwrap();
        assert_eq!(entity.str("id"), Some("ord-1"));
        assert_eq!(entity.str("state"), Some("open"));
        let product = entity.entity("product").unwrap();
        assert_eq!(product.str("code"), Some("PRD"));
        // Optional field absent in both raw and result.
        assert_eq!(product.get("name"), None);
    }

    #[test]
    fn missing_required_field_is_the_only_error() {
        let raw = serde_json::json!({ "state": "open" });
        let err = build_entity(&ORDER, &raw).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                path: "id".to_string()
            }
        );
    }

    #[test]
    fn null_required_field_is_a_type_mismatch() {
        let raw = serde_json::json!({ "id": null, "state": "open" });
        let err = build_entity(&ORDER, &raw).unwrap_err();
        match err {
            DecodeError::TypeMismatch { path, got, .. } => {
                assert_eq!(path, "id");
                assert_eq!(got, "null");
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn null_optional_field_is_stored_as_null() {
        let raw = serde_json::json!({ "id": "ord-1", "state": "open", "product": null });
        let entity = build_entity(&ORDER, &raw).unwrap();
        assert_eq!(entity.get("product"), Some(&Value::Null));
        assert_eq!(entity.entity("product"), None);
    }

    #[test]
    fn non_mapping_input_is_malformed() {
        let err = build_entity(&ORDER, &serde_json::json!("not an object")).unwrap_err();
        match err {
            DecodeError::MalformedInput { message, .. } => {
                assert!(message.contains("order must be a mapping"));
            }
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[test]
    fn nested_failure_carries_the_field_path() {
        let raw = serde_json::json!({
            "id": "ord-1",
            "state": "open",
            "product": { "code": 7 }
        });
        let err = build_entity(&ORDER, &raw).unwrap_err();
        assert_eq!(err.path(), "product.code");
    }

    #[test]
    fn symbol_keyed_mapping_decodes_identically() {
        let plain = serde_json::json!({
            "id": "ord-1",
            "state": "open",
            "product": { "code": "PRD", "name": "Advanced" }
        });
        let symbolized = serde_json::json!({
            ":id": "ord-1",
            ":state": "open",
            ":product": { ":code": "PRD", ":name": "Advanced" }
        });
        assert_eq!(
            build_entity(&ORDER, &plain).unwrap(),
            build_entity(&ORDER, &symbolized).unwrap()
        );
    }

    #[test]
    fn free_form_map_field_carries_through() {
        let raw = serde_json::json!({
            "id": "ord-1",
            "state": "open",
            "extra": { "note": "gift", "count": 2 }
        });
        let entity = build_entity(&ORDER, &raw).unwrap();
        let extra = entity.map("extra").unwrap();
        assert_eq!(extra.get("note"), Some(&Value::Str("gift".to_string())));
        assert_eq!(extra.get("count"), Some(&Value::Int(2)));
    }

    #[test]
    fn variant_dispatch_selects_the_registered_schema() {
        let raw = serde_json::json!({ "type": "link", "url": "https://example.test" });
        let entity = resolve_variant(&TARGET, &raw).unwrap();
        assert_eq!(entity.variant(), Some("link"));
        // The discriminator is consumed again inside the branch schema.
        assert_eq!(entity.str("type"), Some("link"));
        assert_eq!(entity.str("url"), Some("https://example.test"));

        // Same payload, same branch, every time.
        let again = resolve_variant(&TARGET, &raw).unwrap();
        assert_eq!(entity, again);
    }

    #[test]
    fn unknown_discriminator_never_falls_back() {
        let raw = serde_json::json!({ "type": "beacon", "url": "https://example.test" });
        let err = resolve_variant(&TARGET, &raw).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownVariant {
                path: "type".to_string(),
                discriminator: "type",
                value: "beacon".to_string(),
            }
        );
    }

    #[test]
    fn absent_discriminator_is_missing_field() {
        let err = resolve_variant(&TARGET, &serde_json::json!({ "url": "x" })).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                path: "type".to_string()
            }
        );
    }

    #[test]
    fn non_string_discriminator_is_a_type_mismatch() {
        let err = resolve_variant(&TARGET, &serde_json::json!({ "type": 7 })).unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { .. }));
    }

    #[test]
    fn collection_decodes_heterogeneous_items_in_order() {
        let raw = serde_json::json!({
            "type": "list",
            "items": [
                { "type": "link", "url": "https://a.test" },
                { "type": "token", "token": "tok_1" }
            ],
            "next_cursor": "cur_2"
        });
        let page = build_collection(&TARGETS, &raw).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].variant(), Some("link"));
        assert_eq!(page.items[1].variant(), Some("token"));
        assert_eq!(page.next_cursor.as_deref(), Some("cur_2"));
        assert_eq!(page.total, None);
    }

    #[test]
    fn collection_fails_fast_on_the_first_bad_item() {
        let raw = serde_json::json!({
            "items": [
                { "type": "link", "url": "https://a.test" },
                { "type": "link" }
            ]
        });
        let err = build_collection(&TARGETS, &raw).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                path: "items.1.url".to_string()
            }
        );
    }

    #[test]
    fn collection_without_cursor_is_the_final_page() {
        let raw = serde_json::json!({ "items": [], "next_cursor": null });
        let page = build_collection(&TARGETS, &raw).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn collection_requires_an_items_sequence() {
        let err = build_collection(&TARGETS, &serde_json::json!({})).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                path: "items".to_string()
            }
        );

        let err =
            build_collection(&TARGETS, &serde_json::json!({ "items": "nope" })).unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { .. }));
    }
}
