//! Post-transformation clean-up.
//!
//! Removing properties can leave statements behind that no longer say
//! anything, or that only described a role-player which is gone. Those are
//! dropped so every emitted pattern stays connected.

use std::collections::BTreeSet;

use crate::pattern::{Conjunction, ThingProperty, VarRef, Variable};

/// Cleans `transformed`, which was derived from `original`:
///
/// 1. a variable that stopped playing a role is dropped with all of its
///    statements when, taken together, they carry nothing but `isa`/`iid`
///    and no other statement mentions it;
/// 2. thing statements without properties are dropped.
///
/// The result may be the empty conjunction.
#[must_use]
pub fn sanitise(transformed: Conjunction, original: &Conjunction) -> Conjunction {
    let stray: BTreeSet<VarRef> = original
        .role_players()
        .difference(&transformed.role_players())
        .filter(|player| is_stray(player, &transformed))
        .cloned()
        .collect();

    let keep = |v: &Variable| match v {
        Variable::Type(_) => true,
        Variable::Thing(thing) => !thing.is_bare() && !stray.contains(thing.reference()),
    };

    let kept: Vec<Variable> = transformed.variables().iter().filter(|v| keep(*v)).cloned().collect();
    if kept.len() == transformed.len() {
        transformed
    } else {
        Conjunction::new(kept)
    }
}

// Every statement about `player` only pins a type or an identifier, and no
// property anywhere mentions it.
fn is_stray(player: &VarRef, pattern: &Conjunction) -> bool {
    let only_pinned = pattern
        .variables()
        .iter()
        .filter(|v| v.reference() == player)
        .all(|v| match v {
            Variable::Thing(thing) => thing
                .properties()
                .iter()
                .all(|p| matches!(p, ThingProperty::Isa { .. } | ThingProperty::Iid { .. })),
            Variable::Type(_) => false,
        });
    only_pinned && !pattern.mentions(player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{and, var};

    #[test]
    fn test_bare_statements_are_dropped() {
        let original = and([var("x").isa("a").iid("0x1")]);
        let transformed = and([var("x"), var("y").isa("b")]);
        assert_eq!(sanitise(transformed, &original), and([var("y").isa("b")]));
    }

    #[test]
    fn test_orphaned_role_players_are_dropped() {
        let original = and([
            var("r").rel_role(var("rx"), var("x")).rel_role(var("ry"), var("y")),
            var("x").isa("someType"),
            var("y").isa("someType"),
        ]);
        let transformed = and([
            var("r").rel_role(var("rx"), var("x")),
            var("x").isa("someType"),
            var("y").isa("someType"),
        ]);
        assert_eq!(
            sanitise(transformed, &original),
            and([var("r").rel_role(var("rx"), var("x")), var("x").isa("someType")])
        );
    }

    #[test]
    fn test_orphaned_players_with_other_constraints_are_kept() {
        let original = and([
            var("r").rel(var("x")).rel(var("y")),
            var("y").has("name", var("n")),
        ]);
        let transformed = and([var("r").rel(var("x")), var("y").has("name", var("n"))]);
        assert_eq!(sanitise(transformed.clone(), &original), transformed);
    }

    #[test]
    fn test_players_are_judged_across_all_their_statements() {
        let original = and([
            var("r").rel(var("x")).rel(var("y")),
            var("x").isa("someType"),
            var("y").isa("someType"),
            var("y").has("name", var("n")),
        ]);
        let transformed = and([
            var("r").rel(var("x")),
            var("x").isa("someType"),
            var("y").isa("someType"),
            var("y").has("name", var("n")),
        ]);
        assert_eq!(sanitise(transformed.clone(), &original), transformed);
    }

    #[test]
    fn test_split_stray_player_is_dropped_whole() {
        let original = and([
            var("r").rel(var("x")).rel(var("y")),
            var("x").isa("someType"),
            var("y").isa("someType"),
            var("y").iid("0x1"),
        ]);
        let transformed = and([
            var("r").rel(var("x")),
            var("x").isa("someType"),
            var("y").isa("someType"),
            var("y").iid("0x1"),
        ]);
        assert_eq!(
            sanitise(transformed, &original),
            and([var("r").rel(var("x")), var("x").isa("someType")])
        );
    }

    #[test]
    fn test_orphaned_players_still_referenced_are_kept() {
        let original = and([
            var("r").rel(var("x")).rel(var("y")),
            var("y").isa("person"),
            var("z").neq(var("y")),
        ]);
        let transformed = and([var("r").rel(var("x")), var("y").isa("person"), var("z").neq(var("y"))]);
        assert_eq!(sanitise(transformed.clone(), &original), transformed);
    }

    #[test]
    fn test_everything_may_be_dropped() {
        let original = and([var("r").rel(var("x")), var("x").isa("p")]);
        let transformed = and([var("r"), var("x").isa("p")]);
        assert!(sanitise(transformed, &original).is_empty());
    }

    #[test]
    fn test_untouched_pattern_is_unchanged() {
        let p = and([var("r").rel(var("x")).isa("rel"), var("x").isa("p")]);
        assert_eq!(sanitise(p.clone(), &p), p);
    }
}
