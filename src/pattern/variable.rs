//! Thing and type variables.
//!
//! A variable is a reference plus the properties attached to it. Variables are
//! immutable values: every builder method consumes `self` and returns a new
//! variable, and the property list is always stored in normal (sorted) order
//! so that structural equality ignores the order properties were stated in.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::property::{RelationProperty, RolePlayer, ThingProperty};
use super::reference::{TypeRef, VarRef};
use super::value::{Comparator, Literal, ValueOperation};

/// A variable ranging over data instances, with its properties.
///
/// # Examples
///
/// ```
/// use pattern_ops::pattern::var;
///
/// let a = var("x").isa("person").iid("0x1");
/// let b = var("x").iid("0x1").isa("person");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "ThingVariableRepr")]
pub struct ThingVariable {
    reference: VarRef,
    properties: Vec<ThingProperty>,
}

#[derive(Deserialize)]
struct ThingVariableRepr {
    reference: VarRef,
    #[serde(default)]
    properties: Vec<ThingProperty>,
}

impl From<ThingVariableRepr> for ThingVariable {
    fn from(repr: ThingVariableRepr) -> Self {
        Self::new(repr.reference).with_properties(repr.properties)
    }
}

impl ThingVariable {
    /// Creates a variable without properties.
    #[must_use]
    pub const fn new(reference: VarRef) -> Self {
        Self {
            reference,
            properties: Vec::new(),
        }
    }

    /// Creates an anonymous variable without properties.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(VarRef::anonymous())
    }

    /// The statement's head.
    #[must_use]
    pub const fn reference(&self) -> &VarRef {
        &self.reference
    }

    /// Name of the head, `_` when anonymous.
    #[must_use]
    pub fn name(&self) -> &str {
        self.reference.name()
    }

    /// Returns true unless the head is anonymous.
    #[must_use]
    pub const fn is_named(&self) -> bool {
        self.reference.is_named()
    }

    /// Returns the properties in normal order.
    #[must_use]
    pub fn properties(&self) -> &[ThingProperty] {
        &self.properties
    }

    /// Returns a variable with the same reference and the given properties.
    #[must_use]
    pub fn with_properties(self, properties: impl IntoIterator<Item = ThingProperty>) -> Self {
        let mut properties: Vec<ThingProperty> = properties.into_iter().collect();
        properties.sort();
        Self {
            reference: self.reference,
            properties,
        }
    }

    /// Returns a variable with one more property.
    #[must_use]
    pub fn plus_property(self, property: ThingProperty) -> Self {
        let Self {
            reference,
            mut properties,
        } = self;
        properties.push(property);
        Self::new(reference).with_properties(properties)
    }

    /// Returns a variable with the same properties under another reference.
    #[must_use]
    pub fn with_reference(self, reference: VarRef) -> Self {
        Self {
            reference,
            properties: self.properties,
        }
    }

    /// Returns the same reference without any properties.
    #[must_use]
    pub fn without_properties(&self) -> Self {
        Self::new(self.reference.clone())
    }

    /// Returns the variable's type, if it has an `isa` property.
    #[must_use]
    pub fn isa_type(&self) -> Option<&TypeRef> {
        self.properties.iter().find_map(|p| match p {
            ThingProperty::Isa { type_ref, .. } => Some(type_ref),
            _ => None,
        })
    }

    /// Returns the variable's relation property, if any.
    #[must_use]
    pub fn relation(&self) -> Option<&RelationProperty> {
        self.properties.iter().find_map(|p| match p {
            ThingProperty::Relation(rel) => Some(rel),
            _ => None,
        })
    }

    /// Iterates over the variable's identifiers.
    pub fn iids(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().filter_map(|p| match p {
            ThingProperty::Iid { iid } => Some(iid.as_str()),
            _ => None,
        })
    }

    /// Iterates over the variable's value predicates.
    pub fn values(&self) -> impl Iterator<Item = &ValueOperation> {
        self.properties.iter().filter_map(|p| match p {
            ThingProperty::Value(op) => Some(op),
            _ => None,
        })
    }

    /// Returns true if no property is attached.
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.properties.is_empty()
    }

    // --- builders ---

    /// Adds `isa <type>`.
    #[must_use]
    pub fn isa(self, type_ref: impl Into<TypeRef>) -> Self {
        self.plus_property(ThingProperty::isa(type_ref, false))
    }

    /// Adds `isa! <type>`.
    #[must_use]
    pub fn isa_explicit(self, type_ref: impl Into<TypeRef>) -> Self {
        self.plus_property(ThingProperty::isa(type_ref, true))
    }

    /// Adds `iid <iid>`.
    #[must_use]
    pub fn iid(self, iid: impl Into<String>) -> Self {
        self.plus_property(ThingProperty::iid(iid))
    }

    /// Adds `has <attribute_type> <attribute>`.
    #[must_use]
    pub fn has(self, attribute_type: impl Into<String>, attribute: ThingVariable) -> Self {
        self.plus_property(ThingProperty::has(attribute_type, attribute))
    }

    /// Adds `has <attribute_type> <value>`, i.e. ownership of an anonymous
    /// attribute equal to `value`.
    #[must_use]
    pub fn has_value(self, attribute_type: impl Into<String>, value: impl Into<Literal>) -> Self {
        self.has(attribute_type, ThingVariable::anonymous().value_eq(value))
    }

    /// Adds a role-player without a role.
    #[must_use]
    pub fn rel(self, player: impl Into<VarRef>) -> Self {
        self.plus_player(RolePlayer::new(player.into()))
    }

    /// Adds a role-player with a role (label or variable).
    #[must_use]
    pub fn rel_role(self, role: impl Into<TypeRef>, player: impl Into<VarRef>) -> Self {
        self.plus_player(RolePlayer::with_role(role, player.into()))
    }

    fn plus_player(self, player: RolePlayer) -> Self {
        let Self {
            reference,
            properties,
        } = self;
        let mut relation = None;
        let mut rest = Vec::with_capacity(properties.len() + 1);
        for p in properties {
            match p {
                ThingProperty::Relation(rel) if relation.is_none() => relation = Some(rel),
                other => rest.push(other),
            }
        }
        let relation = match relation {
            Some(rel) => rel.plus_player(player),
            None => RelationProperty::new(std::iter::once(player)),
        };
        rest.push(ThingProperty::Relation(relation));
        Self::new(reference).with_properties(rest)
    }

    /// Adds `!= <other>`.
    #[must_use]
    pub fn neq(self, other: impl Into<VarRef>) -> Self {
        self.plus_property(ThingProperty::neq(other.into()))
    }

    /// Adds an arbitrary value predicate.
    #[must_use]
    pub fn value(self, op: ValueOperation) -> Self {
        self.plus_property(ThingProperty::Value(op))
    }

    /// Adds `== <value>`.
    #[must_use]
    pub fn value_eq(self, value: impl Into<Literal>) -> Self {
        self.value(ValueOperation::literal(Comparator::Eq, value))
    }

    /// Adds `> <value>`.
    #[must_use]
    pub fn gt(self, value: impl Into<Literal>) -> Self {
        self.value(ValueOperation::literal(Comparator::Gt, value))
    }

    /// Adds `>= <value>`.
    #[must_use]
    pub fn gte(self, value: impl Into<Literal>) -> Self {
        self.value(ValueOperation::literal(Comparator::Gte, value))
    }

    /// Adds `< <value>`.
    #[must_use]
    pub fn lt(self, value: impl Into<Literal>) -> Self {
        self.value(ValueOperation::literal(Comparator::Lt, value))
    }

    /// Adds `<= <value>`.
    #[must_use]
    pub fn lte(self, value: impl Into<Literal>) -> Self {
        self.value(ValueOperation::literal(Comparator::Lte, value))
    }

    /// Adds `contains <value>`.
    #[must_use]
    pub fn contains(self, value: impl Into<String>) -> Self {
        self.value(ValueOperation::literal(Comparator::Contains, value.into()))
    }

    /// Adds `like <regex>`.
    #[must_use]
    pub fn like(self, pattern: impl Into<String>) -> Self {
        self.value(ValueOperation::literal(Comparator::Like, pattern.into()))
    }
}

impl From<ThingVariable> for VarRef {
    fn from(v: ThingVariable) -> Self {
        v.reference
    }
}

impl From<ThingVariable> for TypeRef {
    fn from(v: ThingVariable) -> Self {
        Self::Variable(v.reference)
    }
}

impl fmt::Display for ThingVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reference)?;
        for (i, p) in self.properties.iter().enumerate() {
            if i == 0 {
                write!(f, " {p}")?;
            } else {
                write!(f, ", {p}")?;
            }
        }
        Ok(())
    }
}

/// A variable ranging over schema types, optionally pinned to a label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeVariable {
    reference: VarRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl TypeVariable {
    /// Creates an unpinned type variable.
    #[must_use]
    pub const fn new(reference: VarRef) -> Self {
        Self {
            reference,
            label: None,
        }
    }

    /// Returns a copy pinned to `label`.
    #[must_use]
    pub fn label(self, label: impl Into<String>) -> Self {
        Self {
            reference: self.reference,
            label: Some(label.into()),
        }
    }

    /// The type variable itself.
    #[must_use]
    pub const fn reference(&self) -> &VarRef {
        &self.reference
    }

    /// Returns the label, if pinned.
    #[must_use]
    pub fn type_label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the same label under another reference.
    #[must_use]
    pub fn with_reference(self, reference: VarRef) -> Self {
        Self {
            reference,
            label: self.label,
        }
    }
}

impl fmt::Display for TypeVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} type {label}", self.reference),
            None => write!(f, "{}", self.reference),
        }
    }
}

/// A statement of a conjunction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "variable", rename_all = "snake_case")]
pub enum Variable {
    /// A statement about data instances.
    Thing(ThingVariable),
    /// A statement about schema types.
    Type(TypeVariable),
}

impl Variable {
    /// The statement's head.
    #[must_use]
    pub const fn reference(&self) -> &VarRef {
        match self {
            Self::Thing(v) => v.reference(),
            Self::Type(v) => v.reference(),
        }
    }

    /// Returns true unless the head is anonymous.
    #[must_use]
    pub const fn is_named(&self) -> bool {
        self.reference().is_named()
    }

    /// The thing statement, if this is one.
    #[must_use]
    pub const fn as_thing(&self) -> Option<&ThingVariable> {
        match self {
            Self::Thing(v) => Some(v),
            Self::Type(_) => None,
        }
    }

    /// The type statement, if this is one.
    #[must_use]
    pub const fn as_type(&self) -> Option<&TypeVariable> {
        match self {
            Self::Type(v) => Some(v),
            Self::Thing(_) => None,
        }
    }

    /// Calls `f` for every variable this statement mentions, its own
    /// reference included.
    pub fn for_each_reference<'a>(&'a self, f: &mut impl FnMut(&'a VarRef)) {
        f(self.reference());
        if let Self::Thing(thing) = self {
            for p in thing.properties() {
                p.for_each_reference(f);
            }
        }
    }
}

impl From<ThingVariable> for Variable {
    fn from(v: ThingVariable) -> Self {
        Self::Thing(v)
    }
}

impl From<TypeVariable> for Variable {
    fn from(v: TypeVariable) -> Self {
        Self::Type(v)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thing(v) => write!(f, "{v}"),
            Self::Type(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{anon, type_var, var};

    #[test]
    fn test_property_order_is_irrelevant() {
        assert_eq!(
            var("x").isa("person").has_value("age", 3),
            var("x").has_value("age", 3).isa("person")
        );
    }

    #[test]
    fn test_rel_accumulates_into_one_relation() {
        let r = var("r").rel(var("x")).rel_role("employer", var("y")).isa("employment");
        assert_eq!(r.properties().iter().filter(|p| p.is_relation()).count(), 1);
        let rel = r.relation().unwrap();
        assert_eq!(rel.players().len(), 2);
        assert_eq!(rel.players()[1].role_label(), Some("employer"));
    }

    #[test]
    fn test_accessors() {
        let x = var("x").isa("person").iid("0x1");
        assert_eq!(x.isa_type(), Some(&TypeRef::label("person")));
        assert_eq!(x.iids().collect::<Vec<_>>(), vec!["0x1"]);
        assert!(x.relation().is_none());
        assert!(!x.is_bare());
        assert!(x.without_properties().is_bare());
    }

    #[test]
    fn test_anonymous_attributes_compare_by_properties() {
        assert_eq!(anon().gt(16), anon().gt(16));
        assert_ne!(anon().gt(16), anon().gt(8.0));
    }

    #[test]
    fn test_with_reference_keeps_properties() {
        let x = var("x").isa("person");
        let y = x.clone().with_reference(VarRef::named("y"));
        assert_eq!(y.name(), "y");
        assert_eq!(y.properties(), x.properties());
    }

    #[test]
    fn test_display() {
        let r = var("r").rel(var("x")).rel(var("y")).isa("marriage");
        assert_eq!(format!("{r}"), "$r ($x, $y), isa marriage");
        let x = var("x").has("age", anon().gt(16));
        assert_eq!(format!("{x}"), "$x has age > 16");
        let t = type_var("t").label("person");
        assert_eq!(format!("{t}"), "$t type person");
    }

    #[test]
    fn test_serialization_normalises_properties() {
        let x = var("x").isa("person").iid("0x1");
        let json = serde_json::to_string(&x).unwrap();
        let decoded: ThingVariable = serde_json::from_str(&json).unwrap();
        assert_eq!(x, decoded);
    }
}
