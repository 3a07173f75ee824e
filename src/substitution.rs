//! Variable substitution inside properties.
//!
//! Given a mapping `V -> V'`, rewrites every variable-valued slot of a
//! property. Labels and identifiers are never touched. The rewrite is a
//! closed match over [`ThingProperty`], so adding a property kind forces this
//! module to decide how it is substituted.

use std::collections::HashMap;

use crate::pattern::{
    Operand, RelationProperty, RolePlayer, ThingProperty, ThingVariable, TypeRef, ValueOperation,
    VarRef, Variable,
};

/// A variable renaming.
pub type Substitution = HashMap<VarRef, VarRef>;

fn substitute_ref(var: &VarRef, map: &Substitution) -> VarRef {
    map.get(var).cloned().unwrap_or_else(|| var.clone())
}

fn substitute_type_ref(type_ref: &TypeRef, map: &Substitution) -> TypeRef {
    match type_ref {
        TypeRef::Label(_) => type_ref.clone(),
        TypeRef::Variable(v) => TypeRef::Variable(substitute_ref(v, map)),
    }
}

/// Rewrites the variables of one property.
#[must_use]
pub fn substitute_property(property: &ThingProperty, map: &Substitution) -> ThingProperty {
    match property {
        ThingProperty::Relation(rel) => ThingProperty::Relation(RelationProperty::new(
            rel.players().iter().map(|rp| RolePlayer {
                player: substitute_ref(&rp.player, map),
                role: rp.role.as_ref().map(|role| substitute_type_ref(role, map)),
            }),
        )),
        ThingProperty::Isa { type_ref, explicit } => ThingProperty::Isa {
            type_ref: substitute_type_ref(type_ref, map),
            explicit: *explicit,
        },
        ThingProperty::Iid { .. } => property.clone(),
        ThingProperty::Has {
            attribute_type,
            attribute,
        } => ThingProperty::Has {
            attribute_type: attribute_type.clone(),
            attribute: substitute_thing(attribute, map),
        },
        ThingProperty::Value(op) => match &op.operand {
            Operand::Literal(_) => property.clone(),
            Operand::Variable(v) => ThingProperty::Value(ValueOperation::variable(
                op.comparator,
                substitute_ref(v, map),
            )),
        },
        ThingProperty::Neq { other } => ThingProperty::neq(substitute_ref(other, map)),
    }
}

/// Rewrites a thing variable: its own reference and all its properties.
#[must_use]
pub fn substitute_thing(thing: &ThingVariable, map: &Substitution) -> ThingVariable {
    thing
        .without_properties()
        .with_reference(substitute_ref(thing.reference(), map))
        .with_properties(thing.properties().iter().map(|p| substitute_property(p, map)))
}

/// Rewrites a statement.
#[must_use]
pub fn substitute_variable(variable: &Variable, map: &Substitution) -> Variable {
    match variable {
        Variable::Thing(thing) => Variable::Thing(substitute_thing(thing, map)),
        Variable::Type(ty) => {
            Variable::Type(ty.clone().with_reference(substitute_ref(ty.reference(), map)))
        }
    }
}
