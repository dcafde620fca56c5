//! Decode error taxonomy.
//!
//! Every failure carries the dotted field path from the top-level entity
//! (`payment_method.card.card_type`) so callers can report precisely which
//! nested attribute failed. Errors are terminal for the build call that
//! produced them; retrying a fetch is the transport layer's decision.

/// All errors that can be returned by a build call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A required field was not present in the raw mapping.
    #[error("missing required field '{path}'")]
    MissingField { path: String },

    /// A field value does not match its declared type or coercion rule.
    #[error("type mismatch at '{path}': expected {expected}, got {got}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        got: String,
    },

    /// A string field holds a value outside its declared literal set.
    #[error("invalid value '{value}' at '{path}', allowed: {allowed:?}")]
    EnumViolation {
        path: String,
        value: String,
        allowed: &'static [&'static str],
    },

    /// A discriminator literal has no registered variant schema.
    #[error("unknown variant '{value}' for discriminator '{discriminator}' at '{path}'")]
    UnknownVariant {
        path: String,
        discriminator: &'static str,
        value: String,
    },

    /// The raw value is not the shape a build step requires.
    #[error("malformed input at '{path}': {message}")]
    MalformedInput { path: String, message: String },
}

impl DecodeError {
    /// The dotted path of the field that failed, relative to the entity the
    /// build call started from. Empty for a top-level shape failure.
    pub fn path(&self) -> &str {
        match self {
            DecodeError::MissingField { path }
            | DecodeError::TypeMismatch { path, .. }
            | DecodeError::EnumViolation { path, .. }
            | DecodeError::UnknownVariant { path, .. }
            | DecodeError::MalformedInput { path, .. } => path,
        }
    }

    /// Prefix `segment` onto the error path while bubbling out of a nested
    /// build. Nested failures propagate unchanged apart from this.
    pub(crate) fn prepend(mut self, segment: &str) -> Self {
        let path = match &mut self {
            DecodeError::MissingField { path }
            | DecodeError::TypeMismatch { path, .. }
            | DecodeError::EnumViolation { path, .. }
            | DecodeError::UnknownVariant { path, .. }
            | DecodeError::MalformedInput { path, .. } => path,
        };
        if path.is_empty() {
            *path = segment.to_string();
        } else {
            *path = format!("{}.{}", segment, path);
        }
        self
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
