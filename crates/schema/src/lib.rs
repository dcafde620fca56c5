//! Typed entity schemas and payload coercion for the YooKassa API.
//!
//! Decodes already-parsed JSON payloads (`serde_json::Value`) into typed,
//! validated entity records. Entity shapes are static data -- an attribute
//! schema per entity, variant schemas for polymorphic families -- and build
//! calls are pure functions over borrowed input: no I/O, no shared mutable
//! state, safe to run concurrently without locking.
//!
//! The pipeline, leaves first: scalar coercers and the enum validator,
//! the struct builder for single entities, the variant resolver for
//! discriminated families, and the collection wrapper for result pages.
//! A build call returns exactly one typed entity/collection or exactly one
//! [`DecodeError`]; malformed input never yields a partial result.

pub mod build;
pub mod catalog;
pub mod coerce;
pub mod error;
mod raw;
pub mod schema;
pub mod value;

pub use build::{build_collection, build_entity, resolve_variant};
pub use coerce::{coerce, validate_enum, CoercionRule};
pub use error::DecodeError;
pub use schema::{
    AttributeSchema, CollectionSchema, ElementKind, FieldDescriptor, ValueKind, VariantSchema,
};
pub use value::{Collection, Entity, Value};

/// Decode a payment object payload.
pub fn decode_payment(raw: &serde_json::Value) -> Result<Entity, DecodeError> {
    build::build_entity(&catalog::PAYMENT, raw)
}

/// Decode a standalone payment-method payload of any registered kind.
pub fn decode_payment_method(raw: &serde_json::Value) -> Result<Entity, DecodeError> {
    build::resolve_variant(&catalog::PAYMENT_METHOD, raw)
}

/// Decode a standalone confirmation payload of any registered kind.
pub fn decode_confirmation(raw: &serde_json::Value) -> Result<Entity, DecodeError> {
    build::resolve_variant(&catalog::CONFIRMATION, raw)
}

/// Decode one page of the payments list endpoint.
pub fn decode_payment_collection(raw: &serde_json::Value) -> Result<Collection, DecodeError> {
    build::build_collection(&catalog::PAYMENT_COLLECTION, raw)
}
