//! Error types for pattern generalisation.
//!
//! All errors are strongly typed using thiserror, so callers can match on the
//! specific condition. Operators never recover from an error on their own
//! except where documented ([`GeneraliseError::UnsupportedValue`] inside
//! attribute generalisation).

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// `widening_factor` is zero, negative or not finite.
    #[error("Widening factor must be finite and positive, got {value}")]
    InvalidWideningFactor {
        value: f64,
    },

    /// `zero_width` is zero, negative or not finite.
    #[error("Zero-width fallback must be finite and positive, got {value}")]
    InvalidZeroWidth {
        value: f64,
    },

    /// A size or count field is below its minimum.
    #[error("Field '{field}' must be at least {min}")]
    TooSmall {
        field: String,
        min: usize,
    },

    /// A meta type was given a supertype.
    #[error("Type '{label}' is both a meta type and a subtype of '{parent}'")]
    MetaTypeWithParent {
        label: String,
        parent: String,
    },

    /// Following supertypes from `label` never reaches a root.
    #[error("Type hierarchy contains a cycle through '{label}'")]
    CyclicHierarchy {
        label: String,
    },

    /// The supertype chain of `label` ends at `root`, which is not a meta type.
    #[error("Type '{label}' is not rooted at a meta type (chain ends at '{root}')")]
    UnrootedType {
        label: String,
        root: String,
    },

    /// No operator is registered under `name`.
    #[error("Unknown operator '{name}'")]
    UnknownOperator {
        name: String,
    },
}

/// Top-level error type.
#[derive(Debug, Error)]
pub enum GeneraliseError {
    /// A pattern violates a structural invariant (e.g. two `isa` on one
    /// variable). Callers must treat this as fatal.
    #[error("Malformed pattern at '{variable}': {reason}")]
    MalformedInput {
        variable: String,
        reason: String,
    },

    /// The type context has no supertype for a label.
    #[error("No supertype known for type '{label}'")]
    MissingSupertype {
        label: String,
    },

    /// A value predicate cannot be folded into a numeric range.
    #[error("Unsupported value predicate '{predicate}': {reason}")]
    UnsupportedValue {
        predicate: String,
        reason: String,
    },

    /// Iterated application did not reach a fixed point in time.
    #[error("Operators did not converge within {rounds} rounds ({remaining} patterns left)")]
    DidNotConverge {
        rounds: usize,
        remaining: usize,
    },

    /// Invalid operator, driver or schema configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A failure outside the pattern model, such as a worker thread that
    /// could not be started.
    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl GeneraliseError {
    /// Creates a malformed-input error.
    #[must_use]
    pub fn malformed(variable: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            variable: variable.into(),
            reason: reason.into(),
        }
    }

    /// Creates a missing-supertype error.
    #[must_use]
    pub fn missing_supertype(label: impl Into<String>) -> Self {
        Self::MissingSupertype {
            label: label.into(),
        }
    }

    /// Creates an unsupported-value error.
    #[must_use]
    pub fn unsupported_value(predicate: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            predicate: predicate.into(),
            reason: reason.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a malformed-input error.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }

    /// Returns true if this is a missing-supertype error.
    #[must_use]
    pub const fn is_missing_supertype(&self) -> bool {
        matches!(self, Self::MissingSupertype { .. })
    }

    /// Returns true if this is an unsupported-value error.
    #[must_use]
    pub const fn is_unsupported_value(&self) -> bool {
        matches!(self, Self::UnsupportedValue { .. })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    /// Returns true if the operator that raised this error can carry on by
    /// leaving the affected statement unchanged.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::UnsupportedValue { .. })
    }
}

/// Result type alias for generalisation operations.
pub type GeneraliseResult<T> = Result<T, GeneraliseError>;
