//! One-step type generalisation.
//!
//! Each named statement is generalised on its own, one step up the type
//! hierarchy:
//!
//! | statement                     | result                              |
//! |-------------------------------|-------------------------------------|
//! | `$x isa T`, `T` not meta      | `$x isa sup(T)`                     |
//! | `$x isa T`, `T` meta          | `$x isa $xtype`                     |
//! | `$x isa $t` and nothing else  | statement removed                   |
//! | `$t type T`, `T` not meta     | `$t type sup(T)`                    |
//!
//! Everything else (anonymous statements, meta type labels, `isa $t` next to
//! other constraints) has no generalisation here.

use crate::context::TypeContext;
use crate::error::GeneraliseResult;
use crate::pattern::{Conjunction, ThingProperty, ThingVariable, TypeRef, TypeVariable, Variable};

use super::{distinct_from, Generalisations, Operator, OperatorKind};

/// Lifts one `isa` or `type` statement one step up the hierarchy.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeGeneralise;

/// What happens to one statement.
enum Step {
    Replace(Variable),
    Remove,
}

impl Operator for TypeGeneralise {
    fn kind(&self) -> OperatorKind {
        OperatorKind::TypeGeneralise
    }

    fn apply<'a>(
        &self,
        src: &'a Conjunction,
        ctx: &'a dyn TypeContext,
    ) -> GeneraliseResult<Generalisations<'a>> {
        src.validate()?;

        let mut outputs = Vec::new();
        for (index, statement) in src.variables().iter().enumerate() {
            if !statement.is_named() {
                continue;
            }
            let step = match statement {
                Variable::Thing(thing) => generalise_thing(thing, ctx)?,
                Variable::Type(ty) => generalise_type(ty, ctx)?,
            };
            match step {
                Some(Step::Replace(v)) => outputs.push(src.replace(index, Some(v))),
                Some(Step::Remove) => outputs.push(src.replace(index, None)),
                None => {}
            }
        }
        Ok(distinct_from(src, outputs.into_iter()))
    }
}

fn generalise_thing(thing: &ThingVariable, ctx: &dyn TypeContext) -> GeneraliseResult<Option<Step>> {
    let new_type = match thing.isa_type() {
        None => return Ok(None),
        Some(TypeRef::Variable(_)) => {
            return Ok((thing.properties().len() == 1).then_some(Step::Remove));
        }
        Some(TypeRef::Label(label)) if ctx.is_meta_type(label) => {
            TypeRef::Variable(thing.reference().suffixed("type"))
        }
        Some(TypeRef::Label(label)) => TypeRef::Label(ctx.sup(label)?),
    };

    let properties = thing.properties().iter().map(|p| match p {
        ThingProperty::Isa { .. } => ThingProperty::isa(new_type.clone(), false),
        other => other.clone(),
    });
    Ok(Some(Step::Replace(
        thing.without_properties().with_properties(properties).into(),
    )))
}

fn generalise_type(ty: &TypeVariable, ctx: &dyn TypeContext) -> GeneraliseResult<Option<Step>> {
    match ty.type_label() {
        Some(label) if !ctx.is_meta_type(label) => {
            let sup = ctx.sup(label)?;
            Ok(Some(Step::Replace(ty.clone().label(sup).into())))
        }
        _ => Ok(None),
    }
}
