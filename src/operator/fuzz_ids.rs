use crate::context::TypeContext;
use crate::error::GeneraliseResult;
use crate::pattern::{Conjunction, ThingProperty, ThingVariable, Variable};

use super::{expand, unchanged, Alternatives, Generalisations, Operator, OperatorKind};

/// Displaces instance identifiers.
///
/// Each statement carrying an `iid` either keeps it or has it replaced by a
/// fresh identifier from the context. Every output therefore pins at least
/// one variable to an instance the input never mentioned.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzIds;

impl Operator for FuzzIds {
    fn kind(&self) -> OperatorKind {
        OperatorKind::FuzzIds
    }

    fn apply<'a>(
        &self,
        src: &'a Conjunction,
        ctx: &'a dyn TypeContext,
    ) -> GeneraliseResult<Generalisations<'a>> {
        src.validate()?;
        if src.thing_variables().all(|v| v.iids().next().is_none()) {
            return Ok(unchanged(src));
        }

        let alternatives = src
            .variables()
            .iter()
            .map(|statement| match statement {
                Variable::Thing(thing) if thing.iids().next().is_some() => {
                    Alternatives::one_of(vec![statement.clone(), with_fresh_iid(thing, ctx).into()])
                }
                _ => Alternatives::unchanged(statement),
            })
            .collect();
        Ok(expand(src, alternatives, false))
    }
}

fn with_fresh_iid(thing: &ThingVariable, ctx: &dyn TypeContext) -> ThingVariable {
    let kept = thing.properties().iter().filter(|p| !p.is_iid()).cloned();
    thing
        .without_properties()
        .with_properties(kept.chain(std::iter::once(ThingProperty::iid(ctx.fresh_instance_id()))))
}
