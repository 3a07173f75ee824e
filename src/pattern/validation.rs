//! Pattern validation.
//!
//! Builders produce well-formed patterns by construction, but patterns also
//! arrive from JSON or from third-party producers. Operators validate their
//! input first and reject violated invariants as
//! [`GeneraliseError::MalformedInput`].

use std::collections::BTreeMap;

use regex::Regex;

use crate::error::{GeneraliseError, GeneraliseResult};

use super::conjunction::Conjunction;
use super::property::ThingProperty;
use super::reference::{TypeRef, VarRef};
use super::value::{Comparator, Literal, Operand, ValueOperation};
use super::variable::{ThingVariable, TypeVariable, Variable};

fn validate_label(owner: &str, what: &str, label: &str) -> GeneraliseResult<()> {
    if label.trim().is_empty() {
        return Err(GeneraliseError::malformed(owner, format!("empty {what} label")));
    }
    Ok(())
}

fn validate_type_ref(owner: &str, what: &str, type_ref: &TypeRef) -> GeneraliseResult<()> {
    match type_ref {
        TypeRef::Label(label) => validate_label(owner, what, label),
        TypeRef::Variable(v) if v.is_anonymous() => Err(GeneraliseError::malformed(
            owner,
            format!("{what} variable must be named"),
        )),
        TypeRef::Variable(_) => Ok(()),
    }
}

fn validate_value(owner: &str, op: &ValueOperation) -> GeneraliseResult<()> {
    match (&op.comparator, &op.operand) {
        (Comparator::Like, Operand::Literal(Literal::String(pattern))) => {
            Regex::new(pattern).map(|_| ()).map_err(|e| {
                GeneraliseError::malformed(owner, format!("invalid like pattern {pattern:?}: {e}"))
            })
        }
        (Comparator::Like | Comparator::Contains, Operand::Literal(lit)) if !matches!(lit, Literal::String(_)) => {
            Err(GeneraliseError::malformed(
                owner,
                format!("'{}' needs a string, got {}", op.comparator, lit.type_name()),
            ))
        }
        (_, Operand::Literal(Literal::Float(v))) if v.is_nan() => {
            Err(GeneraliseError::malformed(owner, "NaN literal"))
        }
        _ => Ok(()),
    }
}

impl ThingVariable {
    /// Validates this variable and every attribute it owns.
    ///
    /// `is_attribute` relaxes the single-value rule: an owned attribute may
    /// carry both bounds of a numeric range.
    pub fn validate(&self, is_attribute: bool) -> GeneraliseResult<()> {
        let owner = self.name();
        let mut isa_count = 0usize;
        let mut relation_count = 0usize;
        let mut value_count = 0usize;

        for p in self.properties() {
            match p {
                ThingProperty::Relation(rel) => {
                    relation_count += 1;
                    if rel.players().is_empty() {
                        return Err(GeneraliseError::malformed(owner, "relation without role-players"));
                    }
                    for rp in rel.players() {
                        if let Some(role) = &rp.role {
                            validate_type_ref(owner, "role", role)?;
                        }
                    }
                }
                ThingProperty::Isa { type_ref, .. } => {
                    isa_count += 1;
                    validate_type_ref(owner, "isa", type_ref)?;
                }
                ThingProperty::Iid { iid } => {
                    if iid.trim().is_empty() {
                        return Err(GeneraliseError::malformed(owner, "empty iid"));
                    }
                }
                ThingProperty::Has {
                    attribute_type,
                    attribute,
                } => {
                    validate_label(owner, "attribute", attribute_type)?;
                    attribute.validate(true)?;
                }
                ThingProperty::Value(op) => {
                    value_count += 1;
                    validate_value(owner, op)?;
                }
                ThingProperty::Neq { .. } => {}
            }
        }

        if isa_count > 1 {
            return Err(GeneraliseError::malformed(owner, format!("{isa_count} isa properties")));
        }
        if relation_count > 1 {
            return Err(GeneraliseError::malformed(
                owner,
                format!("{relation_count} relation properties"),
            ));
        }
        if value_count > 1 && !is_attribute {
            return Err(GeneraliseError::malformed(
                owner,
                format!("{value_count} value properties"),
            ));
        }
        Ok(())
    }
}

impl TypeVariable {
    /// Validates this type variable.
    pub fn validate(&self) -> GeneraliseResult<()> {
        match self.type_label() {
            Some(label) => validate_label(self.reference().name(), "type", label),
            None => Ok(()),
        }
    }
}

impl Conjunction {
    /// Validates every statement, then the per-variable limits across
    /// statements sharing a head: at most one `isa` and one relation.
    pub fn validate(&self) -> GeneraliseResult<()> {
        for v in self.variables() {
            match v {
                Variable::Thing(thing) => thing.validate(false)?,
                Variable::Type(ty) => ty.validate()?,
            }
        }

        let mut counts: BTreeMap<&VarRef, (usize, usize)> = BTreeMap::new();
        for thing in self.thing_variables().filter(|t| t.is_named()) {
            let entry = counts.entry(thing.reference()).or_default();
            for p in thing.properties() {
                match p {
                    ThingProperty::Isa { .. } => entry.0 += 1,
                    ThingProperty::Relation(_) => entry.1 += 1,
                    _ => {}
                }
            }
        }
        for (var, (isa_count, relation_count)) in counts {
            if isa_count > 1 {
                return Err(GeneraliseError::malformed(var.name(), format!("{isa_count} isa properties")));
            }
            if relation_count > 1 {
                return Err(GeneraliseError::malformed(
                    var.name(),
                    format!("{relation_count} relation properties"),
                ));
            }
        }
        Ok(())
    }
}
