//! The pattern algebra.
//!
//! Immutable, structurally-compared values describing a conjunctive query
//! pattern: variables, their properties, and conjunctions of statements.
//! Operators read these values and build fresh ones; nothing here mutates in
//! place.
//!
//! The free functions [`var`], [`anon`], [`type_var`] and [`and`] are the
//! reference factory: every producer of patterns goes through them, so
//! `var("x")` built in one place is interchangeable with `var("x")` built in
//! another.

mod conjunction;
mod property;
mod reference;
mod serialization;
mod validation;
mod value;
mod variable;

pub use conjunction::Conjunction;
pub use property::{RelationProperty, RolePlayer, ThingProperty};
pub use reference::{TypeRef, VarRef, ANONYMOUS_NAME};
pub use serialization::{from_json, to_json_pretty};
pub use value::{Comparator, Literal, Operand, ValueOperation};
pub use variable::{ThingVariable, TypeVariable, Variable};

/// A named thing variable without properties.
#[must_use]
pub fn var(name: impl Into<String>) -> ThingVariable {
    ThingVariable::new(VarRef::named(name))
}

/// An anonymous thing variable without properties.
#[must_use]
pub fn anon() -> ThingVariable {
    ThingVariable::anonymous()
}

/// A named type variable without a label.
#[must_use]
pub fn type_var(name: impl Into<String>) -> TypeVariable {
    TypeVariable::new(VarRef::named(name))
}

/// Conjunction of the given statements.
#[must_use]
pub fn and<I>(variables: I) -> Conjunction
where
    I: IntoIterator,
    I::Item: Into<Variable>,
{
    Conjunction::new(variables.into_iter().map(Into::into))
}
