//! Variable references.
//!
//! A reference is the identity of a variable inside a pattern. Properties are
//! attached to references by [`ThingVariable`](super::ThingVariable) and
//! [`TypeVariable`](super::TypeVariable); the reference itself carries nothing
//! but its name.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Name shared by every anonymous reference.
pub const ANONYMOUS_NAME: &str = "_";

/// A reference to a pattern variable.
///
/// Two references are equal iff their names match. Every anonymous reference
/// uses [`ANONYMOUS_NAME`], so anonymous variables are told apart by the
/// properties they carry, never by identity.
///
/// # Examples
///
/// ```
/// use pattern_ops::VarRef;
///
/// let x = VarRef::named("x");
/// assert!(x.is_named());
/// assert_eq!(x, VarRef::named("x"));
/// assert!(VarRef::anonymous().is_anonymous());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarRef {
    name: String,
    #[serde(default)]
    anonymous: bool,
}

impl VarRef {
    /// Creates a user-named reference.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            anonymous: false,
        }
    }

    /// Creates a system-generated anonymous reference.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            name: ANONYMOUS_NAME.to_string(),
            anonymous: true,
        }
    }

    /// Returns the variable name (without the `$` sigil).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if the user named this variable.
    #[must_use]
    pub const fn is_named(&self) -> bool {
        !self.anonymous
    }

    /// Returns true if the system generated this variable.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    /// Returns a named reference whose name is this one's plus `suffix`.
    #[must_use]
    pub fn suffixed(&self, suffix: &str) -> Self {
        Self::named(format!("{}{suffix}", self.name))
    }
}

impl PartialEq for VarRef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for VarRef {}

impl Hash for VarRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for VarRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VarRef {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for VarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.anonymous {
            write!(f, "$_")
        } else {
            write!(f, "${}", self.name)
        }
    }
}

/// A reference to a schema type: either a concrete label or a type variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TypeRef {
    /// A concrete type label, e.g. `person`.
    Label(String),
    /// A variable ranging over types, e.g. `$t`.
    Variable(VarRef),
}

impl TypeRef {
    /// Creates a label reference.
    #[must_use]
    pub fn label(label: impl Into<String>) -> Self {
        Self::Label(label.into())
    }

    /// Returns the label, if this is a label reference.
    #[must_use]
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Self::Label(l) => Some(l),
            Self::Variable(_) => None,
        }
    }

    /// Returns the variable, if this is a variable reference.
    #[must_use]
    pub const fn as_variable(&self) -> Option<&VarRef> {
        match self {
            Self::Variable(v) => Some(v),
            Self::Label(_) => None,
        }
    }
}

impl From<VarRef> for TypeRef {
    fn from(v: VarRef) -> Self {
        Self::Variable(v)
    }
}

impl From<&str> for TypeRef {
    fn from(v: &str) -> Self {
        Self::Label(v.to_string())
    }
}

impl From<String> for TypeRef {
    fn from(v: String) -> Self {
        Self::Label(v)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(l) => write!(f, "{l}"),
            Self::Variable(v) => write!(f, "{v}"),
        }
    }
}
