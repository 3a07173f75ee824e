use crate::context::TypeContext;
use crate::error::GeneraliseResult;
use crate::pattern::{Conjunction, ThingProperty, Variable};

use super::{expand, unchanged, Alternatives, Generalisations, Operator, OperatorKind};

/// Drops instance identifiers.
///
/// Every `iid` is independently kept or dropped; all combinations except
/// "keep everything" are emitted, sanitised. A pattern without identifiers
/// is emitted as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveSubstitution;

impl Operator for RemoveSubstitution {
    fn kind(&self) -> OperatorKind {
        OperatorKind::RemoveSubstitution
    }

    fn apply<'a>(
        &self,
        src: &'a Conjunction,
        _ctx: &'a dyn TypeContext,
    ) -> GeneraliseResult<Generalisations<'a>> {
        src.validate()?;
        if src.thing_variables().all(|v| v.iids().next().is_none()) {
            return Ok(unchanged(src));
        }

        let alternatives = src
            .variables()
            .iter()
            .map(|statement| match statement {
                Variable::Thing(thing) => {
                    let choices = thing
                        .properties()
                        .iter()
                        .enumerate()
                        .filter(|(_, p)| p.is_iid())
                        .map(|(index, p)| (index, vec![Some(p.clone()), None::<ThingProperty>]))
                        .collect();
                    Alternatives::properties(thing, choices)
                }
                Variable::Type(_) => Alternatives::unchanged(statement),
            })
            .collect();
        Ok(expand(src, alternatives, true))
    }
}
