//! Entity schema catalog for the payment domain.
//!
//! Shapes are data, not code: one static [`AttributeSchema`] per entity,
//! composed into [`VariantSchema`] families for polymorphic payloads.
//! Everything here is constructed at compile time and shared read-only
//! across build calls.

use crate::coerce::CoercionRule::{
    Boolean, CoercibleInteger, Decimal, OpaqueString, StrictString, Timestamp,
};
use crate::schema::ValueKind::{self, Entity, Enum, Map, Scalar, Variant};
use crate::schema::{AttributeSchema, CollectionSchema, ElementKind, FieldDescriptor, VariantSchema};

const fn req(name: &'static str, kind: ValueKind) -> FieldDescriptor {
    FieldDescriptor {
        name,
        required: true,
        kind,
    }
}

const fn opt(name: &'static str, kind: ValueKind) -> FieldDescriptor {
    FieldDescriptor {
        name,
        required: false,
        kind,
    }
}

// ──────────────────────────────────────────────
// Literal sets
// ──────────────────────────────────────────────

/// Bank card brands the API reports. Maestro cards arrive as MasterCard,
/// Visa Electron as Visa.
pub const CARD_TYPES: &[&str] = &[
    "MasterCard",
    "Visa",
    "Mir",
    "UnionPay",
    "JCB",
    "AmericanExpress",
    "DinersClub",
    "Unknown",
];

/// Where saved-card details came from, for wallet passthrough payments.
pub const CARD_SOURCES: &[&str] = &["apple_pay", "google_pay", "mir_pay"];

/// Payment lifecycle states.
pub const PAYMENT_STATUSES: &[&str] = &["pending", "waiting_for_capture", "succeeded", "canceled"];

/// Receipt registration states (fiscalization).
pub const RECEIPT_REGISTRATION_STATUSES: &[&str] = &["pending", "succeeded", "canceled"];

/// Saved payment-method states.
pub const PAYMENT_METHOD_STATUSES: &[&str] = &["active", "inactive"];

// ──────────────────────────────────────────────
// Leaf entities
// ──────────────────────────────────────────────

pub static AMOUNT: AttributeSchema = AttributeSchema {
    name: "amount",
    fields: &[
        req("value", Scalar(Decimal)),
        req("currency", Scalar(StrictString)),
    ],
};

/// Card product details, returned for some cards (e.g. tokenized Mir).
pub static CARD_PRODUCT: AttributeSchema = AttributeSchema {
    name: "card_product",
    fields: &[
        opt("code", Scalar(StrictString)),
        opt("name", Scalar(StrictString)),
    ],
};

/// Bank card details. `first6`/`last4` are digit groups; the expiry pair
/// may arrive masked (`"***"`) for saved cards, in which case the mask is
/// preserved as a string.
pub static CARD: AttributeSchema = AttributeSchema {
    name: "card",
    fields: &[
        opt("first6", Scalar(CoercibleInteger)),
        req("last4", Scalar(CoercibleInteger)),
        opt("expiry_month", Scalar(CoercibleInteger)),
        opt("expiry_year", Scalar(CoercibleInteger)),
        req("card_type", Enum(CARD_TYPES)),
        opt("issuer_country", Scalar(StrictString)),
        opt("issuer_name", Scalar(StrictString)),
        opt("card_product", Entity(&CARD_PRODUCT)),
        opt("source", Enum(CARD_SOURCES)),
    ],
};

pub static RECIPIENT: AttributeSchema = AttributeSchema {
    name: "recipient",
    fields: &[
        req("account_id", Scalar(OpaqueString)),
        req("gateway_id", Scalar(OpaqueString)),
    ],
};

pub static CANCELLATION_DETAILS: AttributeSchema = AttributeSchema {
    name: "cancellation_details",
    fields: &[
        req("party", Scalar(StrictString)),
        req("reason", Scalar(StrictString)),
    ],
};

/// Acquirer authorization data. `three_d_secure` is a free-form status
/// block whose keys vary by acquirer.
pub static AUTHORIZATION_DETAILS: AttributeSchema = AttributeSchema {
    name: "authorization_details",
    fields: &[
        opt("rrn", Scalar(OpaqueString)),
        opt("auth_code", Scalar(OpaqueString)),
        opt("three_d_secure", Map),
    ],
};

// ──────────────────────────────────────────────
// Payment methods (variant family)
// ──────────────────────────────────────────────

pub static PAYMENT_METHOD_BANK_CARD: AttributeSchema = AttributeSchema {
    name: "bank_card",
    fields: &[
        req("type", Enum(&["bank_card"])),
        req("id", Scalar(OpaqueString)),
        req("saved", Scalar(Boolean)),
        opt("status", Enum(PAYMENT_METHOD_STATUSES)),
        opt("title", Scalar(StrictString)),
        opt("card", Entity(&CARD)),
    ],
};

pub static PAYMENT_METHOD_YOO_MONEY: AttributeSchema = AttributeSchema {
    name: "yoo_money",
    fields: &[
        req("type", Enum(&["yoo_money"])),
        req("id", Scalar(OpaqueString)),
        req("saved", Scalar(Boolean)),
        opt("status", Enum(PAYMENT_METHOD_STATUSES)),
        opt("title", Scalar(StrictString)),
        opt("account_number", Scalar(OpaqueString)),
    ],
};

pub static PAYMENT_METHOD_SBP: AttributeSchema = AttributeSchema {
    name: "sbp",
    fields: &[
        req("type", Enum(&["sbp"])),
        req("id", Scalar(OpaqueString)),
        req("saved", Scalar(Boolean)),
        opt("status", Enum(PAYMENT_METHOD_STATUSES)),
        opt("title", Scalar(StrictString)),
        opt("sbp_operation_id", Scalar(OpaqueString)),
    ],
};

pub static PAYMENT_METHOD_SBERBANK: AttributeSchema = AttributeSchema {
    name: "sberbank",
    fields: &[
        req("type", Enum(&["sberbank"])),
        req("id", Scalar(OpaqueString)),
        req("saved", Scalar(Boolean)),
        opt("status", Enum(PAYMENT_METHOD_STATUSES)),
        opt("title", Scalar(StrictString)),
        opt("phone", Scalar(OpaqueString)),
    ],
};

pub static PAYMENT_METHOD_CASH: AttributeSchema = AttributeSchema {
    name: "cash",
    fields: &[
        req("type", Enum(&["cash"])),
        req("id", Scalar(OpaqueString)),
        req("saved", Scalar(Boolean)),
        opt("status", Enum(PAYMENT_METHOD_STATUSES)),
        opt("title", Scalar(StrictString)),
        opt("phone", Scalar(OpaqueString)),
    ],
};

/// How the payment was (or will be) paid. The `type` literal selects the
/// concrete shape; only `bank_card` carries a nested card sub-entity.
pub static PAYMENT_METHOD: VariantSchema = VariantSchema {
    name: "payment_method",
    discriminator: "type",
    variants: &[
        ("bank_card", &PAYMENT_METHOD_BANK_CARD),
        ("yoo_money", &PAYMENT_METHOD_YOO_MONEY),
        ("sbp", &PAYMENT_METHOD_SBP),
        ("sberbank", &PAYMENT_METHOD_SBERBANK),
        ("cash", &PAYMENT_METHOD_CASH),
    ],
};

// ──────────────────────────────────────────────
// Confirmations (variant family)
// ──────────────────────────────────────────────

pub static CONFIRMATION_REDIRECT: AttributeSchema = AttributeSchema {
    name: "redirect",
    fields: &[
        req("type", Enum(&["redirect"])),
        req("confirmation_url", Scalar(OpaqueString)),
        opt("return_url", Scalar(OpaqueString)),
        opt("enforce", Scalar(Boolean)),
    ],
};

pub static CONFIRMATION_EMBEDDED: AttributeSchema = AttributeSchema {
    name: "embedded",
    fields: &[
        req("type", Enum(&["embedded"])),
        req("confirmation_token", Scalar(OpaqueString)),
    ],
};

pub static CONFIRMATION_EXTERNAL: AttributeSchema = AttributeSchema {
    name: "external",
    fields: &[req("type", Enum(&["external"]))],
};

pub static CONFIRMATION_MOBILE_APPLICATION: AttributeSchema = AttributeSchema {
    name: "mobile_application",
    fields: &[
        req("type", Enum(&["mobile_application"])),
        req("confirmation_url", Scalar(OpaqueString)),
    ],
};

pub static CONFIRMATION_QR: AttributeSchema = AttributeSchema {
    name: "qr",
    fields: &[
        req("type", Enum(&["qr"])),
        req("confirmation_data", Scalar(OpaqueString)),
    ],
};

/// The follow-up step the payer must complete. Each kind carries its own
/// follow-up field: a redirect URL, an embeddable token, a deep link, or
/// QR payload.
pub static CONFIRMATION: VariantSchema = VariantSchema {
    name: "confirmation",
    discriminator: "type",
    variants: &[
        ("redirect", &CONFIRMATION_REDIRECT),
        ("embedded", &CONFIRMATION_EMBEDDED),
        ("external", &CONFIRMATION_EXTERNAL),
        ("mobile_application", &CONFIRMATION_MOBILE_APPLICATION),
        ("qr", &CONFIRMATION_QR),
    ],
};

// ──────────────────────────────────────────────
// Payment
// ──────────────────────────────────────────────

pub static PAYMENT: AttributeSchema = AttributeSchema {
    name: "payment",
    fields: &[
        req("id", Scalar(OpaqueString)),
        req("status", Enum(PAYMENT_STATUSES)),
        req("amount", Entity(&AMOUNT)),
        opt("income_amount", Entity(&AMOUNT)),
        opt("refunded_amount", Entity(&AMOUNT)),
        opt("description", Scalar(StrictString)),
        opt("recipient", Entity(&RECIPIENT)),
        opt("payment_method", Variant(&PAYMENT_METHOD)),
        req("created_at", Scalar(Timestamp)),
        opt("captured_at", Scalar(Timestamp)),
        opt("expires_at", Scalar(Timestamp)),
        opt("confirmation", Variant(&CONFIRMATION)),
        req("test", Scalar(Boolean)),
        req("paid", Scalar(Boolean)),
        opt("refundable", Scalar(Boolean)),
        opt("receipt_registration", Enum(RECEIPT_REGISTRATION_STATUSES)),
        opt("metadata", Map),
        opt("cancellation_details", Entity(&CANCELLATION_DETAILS)),
        opt("authorization_details", Entity(&AUTHORIZATION_DETAILS)),
        opt("merchant_customer_id", Scalar(OpaqueString)),
    ],
};

/// One page of the payments list endpoint.
pub static PAYMENT_COLLECTION: CollectionSchema = CollectionSchema {
    name: "payment_collection",
    element: ElementKind::Entity(&PAYMENT),
};

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_family_registers_expected_kinds() {
        for tag in ["bank_card", "yoo_money", "sbp", "sberbank", "cash"] {
            assert!(
                PAYMENT_METHOD.schema_for(tag).is_some(),
                "missing payment method kind {}",
                tag
            );
        }
        assert!(PAYMENT_METHOD.schema_for("crypto_wallet").is_none());
    }

    #[test]
    fn confirmation_family_registers_expected_kinds() {
        for tag in ["redirect", "embedded", "external", "mobile_application", "qr"] {
            assert!(
                CONFIRMATION.schema_for(tag).is_some(),
                "missing confirmation kind {}",
                tag
            );
        }
    }

    #[test]
    fn payment_declares_its_core_required_fields() {
        for name in ["id", "status", "amount", "created_at", "test", "paid"] {
            let field = PAYMENT.field(name).unwrap();
            assert!(field.required, "{} should be required", name);
        }
        assert!(!PAYMENT.field("payment_method").unwrap().required);
    }
}
