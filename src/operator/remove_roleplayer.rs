use crate::context::TypeContext;
use crate::error::GeneraliseResult;
use crate::pattern::{Conjunction, RelationProperty, ThingProperty, ThingVariable, Variable};

use super::{expand, replace_properties, unchanged, Alternatives, Generalisations, Operator, OperatorKind};

/// Drops role-players from relations.
///
/// Every relation independently keeps any subset of its role-players,
/// including none (the relation property is then dropped). Outputs are
/// sanitised, so players that no longer take part in anything disappear
/// with their role.
#[derive(Debug, Clone, Copy, Default)]
pub struct RemoveRolePlayer;

impl Operator for RemoveRolePlayer {
    fn kind(&self) -> OperatorKind {
        OperatorKind::RemoveRolePlayer
    }

    fn apply<'a>(
        &self,
        src: &'a Conjunction,
        _ctx: &'a dyn TypeContext,
    ) -> GeneraliseResult<Generalisations<'a>> {
        src.validate()?;
        if src.thing_variables().all(|v| v.relation().is_none()) {
            return Ok(unchanged(src));
        }

        let alternatives = src
            .variables()
            .iter()
            .map(|statement| match statement {
                Variable::Thing(thing) => player_subsets(thing, statement),
                Variable::Type(_) => Alternatives::unchanged(statement),
            })
            .collect();
        Ok(expand(src, alternatives, true))
    }
}

/// `thing` once per subset of its role-players, one keep/drop digit per
/// player. Subsets are built only when the product reaches them.
fn player_subsets<'a>(thing: &'a ThingVariable, statement: &'a Variable) -> Alternatives<'a> {
    let Some(index) = thing.properties().iter().position(ThingProperty::is_relation) else {
        return Alternatives::unchanged(statement);
    };
    let Some(relation) = thing.relation() else {
        return Alternatives::unchanged(statement);
    };

    let players = relation.players();
    Alternatives::new(vec![2; players.len()], move |dropped| {
        let kept = players
            .iter()
            .zip(dropped)
            .filter(|(_, d)| **d == 0)
            .map(|(rp, _)| rp.clone());
        let relation = RelationProperty::from_players(kept).map(ThingProperty::Relation);
        replace_properties(thing, [(index, relation)]).into()
    })
}
