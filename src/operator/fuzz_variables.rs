use crate::context::TypeContext;
use crate::error::GeneraliseResult;
use crate::pattern::{Conjunction, VarRef};
use crate::substitution::{substitute_variable, Substitution};

use super::{distinct_from, Generalisations, Operator, OperatorKind};

/// Renames one named variable at a time.
///
/// Each output is the input with exactly one named variable replaced
/// everywhere by a fresh name from the context, so outputs are
/// alpha-equivalent to the input. Anonymous variables are never renamed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzVariables;

impl Operator for FuzzVariables {
    fn kind(&self) -> OperatorKind {
        OperatorKind::FuzzVariables
    }

    fn apply<'a>(
        &self,
        src: &'a Conjunction,
        ctx: &'a dyn TypeContext,
    ) -> GeneraliseResult<Generalisations<'a>> {
        src.validate()?;

        let renamed = src.named_references().into_iter().map(move |var| {
            let fresh = VarRef::named(ctx.fresh_variable_name());
            let map = Substitution::from([(var, fresh)]);
            src.variables()
                .iter()
                .map(|v| substitute_variable(v, &map))
                .collect::<Conjunction>()
        });
        Ok(distinct_from(src, renamed))
    }
}
