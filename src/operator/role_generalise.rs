//! One-step role generalisation.
//!
//! A role-player `T: $x` becomes `sup(T): $x`, or `$xrole: $x` once `T` is
//! the meta role. Role-players with a role variable or without a role are
//! left alone. Unlike [`TypeGeneralise`](super::TypeGeneralise), a role is
//! never removed: the role-player always survives.

use crate::context::TypeContext;
use crate::error::GeneraliseResult;
use crate::pattern::{Conjunction, RolePlayer, ThingProperty, ThingVariable, TypeRef, Variable};

use super::{distinct_from, Generalisations, Operator, OperatorKind};

/// Lifts one labelled role one step up the role hierarchy.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleGeneralise;

impl Operator for RoleGeneralise {
    fn kind(&self) -> OperatorKind {
        OperatorKind::RoleGeneralise
    }

    fn apply<'a>(
        &self,
        src: &'a Conjunction,
        ctx: &'a dyn TypeContext,
    ) -> GeneraliseResult<Generalisations<'a>> {
        src.validate()?;

        let mut outputs = Vec::new();
        for (index, statement) in src.variables().iter().enumerate() {
            let Variable::Thing(thing) = statement else {
                continue;
            };
            for generalised in generalise_roles(thing, ctx)? {
                outputs.push(src.replace(index, Some(generalised.into())));
            }
        }
        Ok(distinct_from(src, outputs.into_iter()))
    }
}

/// One rewrite of `thing` per role-player whose role can be generalised.
fn generalise_roles(thing: &ThingVariable, ctx: &dyn TypeContext) -> GeneraliseResult<Vec<ThingVariable>> {
    let Some(relation) = thing.relation() else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for (index, rp) in relation.players().iter().enumerate() {
        let Some(label) = rp.role_label() else {
            continue;
        };
        let role = if ctx.is_meta_type(label) {
            if rp.player.is_anonymous() {
                continue;
            }
            TypeRef::Variable(rp.player.suffixed("role"))
        } else {
            TypeRef::Label(ctx.sup(label)?)
        };

        let relation = relation.replace_player(index, RolePlayer::with_role(role, rp.player.clone()));
        let properties = thing.properties().iter().map(|p| match p {
            ThingProperty::Relation(_) => ThingProperty::Relation(relation.clone()),
            other => other.clone(),
        });
        out.push(thing.without_properties().with_properties(properties));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::testing::MockTypeContext;
    use crate::pattern::{and, var};
    use std::collections::HashSet;

    fn apply(src: &Conjunction) -> HashSet<Conjunction> {
        RoleGeneralise.apply(src, &MockTypeContext::new()).unwrap().collect()
    }

    #[test]
    fn test_walks_up_to_the_meta_role_then_to_a_variable() {
        let step1 = and([var("r").rel_role("subRole", var("x")).isa("baseRelation")]);
        let step2 = and([var("r").rel_role("baseRole", var("x")).isa("baseRelation")]);
        let step3 = and([var("r").rel_role("role", var("x")).isa("baseRelation")]);
        let step4 = and([var("r").rel_role(var("xrole"), var("x")).isa("baseRelation")]);

        assert_eq!(apply(&step1), HashSet::from([step2.clone()]));
        assert_eq!(apply(&step2), HashSet::from([step3.clone()]));
        assert_eq!(apply(&step3), HashSet::from([step4.clone()]));
        assert!(apply(&step4).is_empty());
    }

    #[test]
    fn test_one_output_per_role_player() {
        let src = and([var("r")
            .rel_role("subRole", var("x"))
            .rel_role("subRole", var("y"))
            .rel(var("z"))]);
        let out = apply(&src);
        assert_eq!(
            out,
            HashSet::from([
                and([var("r").rel_role("baseRole", var("x")).rel_role("subRole", var("y")).rel(var("z"))]),
                and([var("r").rel_role("subRole", var("x")).rel_role("baseRole", var("y")).rel(var("z"))]),
            ])
        );
    }

    #[test]
    fn test_relation_type_is_untouched() {
        let src = and([var("r").rel_role("subRole", var("x")).isa("subRelation")]);
        for out in apply(&src) {
            let r = out.thing_variables().next().unwrap();
            assert_eq!(r.isa_type(), Some(&TypeRef::label("subRelation")));
        }
    }

    #[test]
    fn test_no_roles_emits_nothing() {
        assert!(apply(&and([var("x").isa("subEntity")])).is_empty());
        assert!(apply(&and([var("r").rel(var("x"))])).is_empty());
    }

    #[test]
    fn test_unknown_role_propagates_missing_supertype() {
        let src = and([var("r").rel_role("mystery", var("x"))]);
        let err = RoleGeneralise.apply(&src, &MockTypeContext::new()).err().unwrap();
        assert!(err.is_missing_supertype());
    }
}
