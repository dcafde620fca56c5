//! Entity shapes as static data.
//!
//! Schemas are declared once (see [`crate::catalog`]), are immutable, and
//! are shared read-only across arbitrarily many concurrent build calls.
//! There is no runtime schema mutation API.

use crate::coerce::CoercionRule;

/// Declares how one field of an entity decodes.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub required: bool,
    pub kind: ValueKind,
}

/// The accepted shape of a field value.
#[derive(Debug, Clone, Copy)]
pub enum ValueKind {
    Scalar(CoercionRule),
    /// String restricted to a fixed literal set, matched exactly.
    Enum(&'static [&'static str]),
    /// Nested entity decoded through its own attribute schema.
    Entity(&'static AttributeSchema),
    /// Polymorphic nested entity resolved through a discriminator.
    Variant(&'static VariantSchema),
    /// Free-form mapping carried through unvalidated.
    Map,
}

/// The declared shape of one entity: an ordered set of field descriptors.
#[derive(Debug)]
pub struct AttributeSchema {
    /// Entity name, used in diagnostics.
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl AttributeSchema {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A polymorphic entity family: a discriminator field plus one attribute
/// schema per discriminator literal.
///
/// Every branch schema re-declares the discriminator as a required
/// single-literal enum, so decoded entities always carry their own kind
/// tag.
#[derive(Debug)]
pub struct VariantSchema {
    /// Family name, used in diagnostics.
    pub name: &'static str,
    pub discriminator: &'static str,
    pub variants: &'static [(&'static str, &'static AttributeSchema)],
}

impl VariantSchema {
    /// The registered literal and schema for a discriminator value.
    pub fn branch(&self, tag: &str) -> Option<(&'static str, &'static AttributeSchema)> {
        self.variants
            .iter()
            .find(|&&(literal, _)| literal == tag)
            .copied()
    }

    /// The attribute schema registered for a discriminator literal.
    pub fn schema_for(&self, tag: &str) -> Option<&'static AttributeSchema> {
        self.branch(tag).map(|(_, schema)| schema)
    }

    /// The registered discriminator literals, in declaration order.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.variants.iter().map(|(literal, _)| *literal)
    }
}

/// A paginated result page of one element kind.
#[derive(Debug)]
pub struct CollectionSchema {
    pub name: &'static str,
    pub element: ElementKind,
}

/// What each collection item decodes through.
#[derive(Debug, Clone, Copy)]
pub enum ElementKind {
    Entity(&'static AttributeSchema),
    Variant(&'static VariantSchema),
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
