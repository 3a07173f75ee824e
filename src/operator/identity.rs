use crate::context::TypeContext;
use crate::error::GeneraliseResult;
use crate::pattern::Conjunction;

use super::{unchanged, Generalisations, Operator, OperatorKind};

/// Emits its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Operator for Identity {
    fn kind(&self) -> OperatorKind {
        OperatorKind::Identity
    }

    fn apply<'a>(
        &self,
        src: &'a Conjunction,
        _ctx: &'a dyn TypeContext,
    ) -> GeneraliseResult<Generalisations<'a>> {
        src.validate()?;
        Ok(unchanged(src))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SchemaContext;
    use crate::pattern::{and, var};

    #[test]
    fn test_identity_emits_input() {
        let src = and([var("x").isa("person")]);
        let out: Vec<Conjunction> = Identity.apply(&src, &SchemaContext::new()).unwrap().collect();
        assert_eq!(out, vec![src]);
    }
}
