mod common;

use std::collections::HashSet;

use common::{apply, apply_all, iids, MockTypeContext};
use pattern_ops::pattern::{and, anon, var};
use pattern_ops::{converge, Conjunction, DriverConfig, OperatorKind, Operators, Variable};

#[test]
fn identity_returns_input() {
    let ctx = MockTypeContext::new();
    let input = and([anon().isa("thing")]);
    assert_eq!(apply(&Operators::identity(), &input, &ctx), HashSet::from([input]));
}

#[test]
fn type_generalise_single_statement_walks_the_hierarchy() {
    let ctx = MockTypeContext::new();
    let op = Operators::type_generalise();

    let input = HashSet::from([and([var("x").isa("subEntity")])]);
    let first = apply_all(&op, &input, &ctx);
    assert_eq!(first, HashSet::from([and([var("x").isa("baseEntity")])]));

    let second = apply_all(&op, &first, &ctx);
    assert_eq!(second, HashSet::from([and([var("x").isa("entity")])]));

    let third = apply_all(&op, &second, &ctx);
    assert_eq!(third, HashSet::from([and([var("x").isa(var("xtype"))])]));
}

#[test]
fn type_generalise_decrements_labels_one_by_one() {
    let ctx = MockTypeContext::new();
    let input = and([
        var("r").rel(var("x")).rel(var("y")).isa("subRelation"),
        var("x").isa("subEntity"),
        var("y").isa("subEntity"),
    ]);
    let expected = HashSet::from([
        and([
            var("r").rel(var("x")).rel(var("y")).isa("subRelation"),
            var("x").isa("baseEntity"),
            var("y").isa("subEntity"),
        ]),
        and([
            var("r").rel(var("x")).rel(var("y")).isa("subRelation"),
            var("x").isa("subEntity"),
            var("y").isa("baseEntity"),
        ]),
        and([
            var("r").rel(var("x")).rel(var("y")).isa("baseRelation"),
            var("x").isa("subEntity"),
            var("y").isa("subEntity"),
        ]),
    ]);
    assert_eq!(apply(&Operators::type_generalise(), &input, &ctx), expected);
}

#[test]
fn type_generalise_keeps_variable_types_next_to_other_constraints() {
    let ctx = MockTypeContext::new();
    let input = and([
        var("r").rel_role(var("rx"), var("x")).isa(var("rtype")),
        var("x").isa("subEntity"),
    ]);
    let expected = HashSet::from([and([
        var("r").rel_role(var("rx"), var("x")).isa(var("rtype")),
        var("x").isa("baseEntity"),
    ])]);
    assert_eq!(apply(&Operators::type_generalise(), &input, &ctx), expected);
}

#[test]
fn role_generalise_decrements_labels_one_by_one() {
    let ctx = MockTypeContext::new();
    let input = and([
        var("r")
            .rel_role("baseRole", var("x"))
            .rel_role("subRole", var("y"))
            .rel_role("role", var("z")),
        var("x").isa("subEntity"),
        var("y").isa("subEntity"),
    ]);
    let expected = HashSet::from([
        and([
            var("r")
                .rel_role("baseRole", var("x"))
                .rel_role("subRole", var("y"))
                .rel_role(var("zrole"), var("z")),
            var("x").isa("subEntity"),
            var("y").isa("subEntity"),
        ]),
        and([
            var("r")
                .rel_role("baseRole", var("x"))
                .rel_role("baseRole", var("y"))
                .rel_role("role", var("z")),
            var("x").isa("subEntity"),
            var("y").isa("subEntity"),
        ]),
        and([
            var("r")
                .rel_role("role", var("x"))
                .rel_role("subRole", var("y"))
                .rel_role("role", var("z")),
            var("x").isa("subEntity"),
            var("y").isa("subEntity"),
        ]),
    ]);
    assert_eq!(apply(&Operators::role_generalise(), &input, &ctx), expected);
}

#[test]
fn remove_substitution_on_single_substitution() {
    let ctx = MockTypeContext::new();
    let expected = HashSet::from([and([var("x").isa("subEntity")])]);

    let single_statement = and([var("x").isa("subEntity").iid("0x123")]);
    assert_eq!(apply(&Operators::remove_substitution(), &single_statement, &ctx), expected);

    let split_statements = and([var("x").isa("subEntity"), var("x").iid("0x123")]);
    assert_eq!(apply(&Operators::remove_substitution(), &split_statements, &ctx), expected);
}

#[test]
fn remove_substitution_generates_every_configuration() {
    let ctx = MockTypeContext::new();
    let input = and([
        var("r").rel(var("x")).rel(var("y")),
        var("x").iid("0x123"),
        var("y").iid("0x456"),
        var("z").iid("0x789"),
    ]);
    let rel = || var("r").rel(var("x")).rel(var("y"));
    let expected = HashSet::from([
        and([rel(), var("x").iid("0x123")]),
        and([rel(), var("y").iid("0x456")]),
        and([rel(), var("z").iid("0x789")]),
        and([rel(), var("x").iid("0x123"), var("y").iid("0x456")]),
        and([rel(), var("x").iid("0x123"), var("z").iid("0x789")]),
        and([rel(), var("y").iid("0x456"), var("z").iid("0x789")]),
        and([rel()]),
    ]);
    assert_eq!(apply(&Operators::remove_substitution(), &input, &ctx), expected);
}

#[test]
fn remove_substitution_without_substitutions_is_a_no_op() {
    let ctx = MockTypeContext::new();
    let input = and([
        var("r").rel(var("x")).rel(var("y")),
        var("x").isa("subEntity"),
        var("y").isa("subEntity"),
    ]);
    assert_eq!(
        apply(&Operators::remove_substitution(), &input, &ctx),
        HashSet::from([input])
    );
}

#[test]
fn remove_roleplayer_generates_every_configuration() {
    let ctx = MockTypeContext::new();
    let input = and([var("r").rel(var("x")).rel(var("y")).rel(var("z")).isa("baseRelation")]);
    let expected = HashSet::from([
        and([var("r").isa("baseRelation")]),
        and([var("r").rel(var("x")).rel(var("y")).isa("baseRelation")]),
        and([var("r").rel(var("x")).rel(var("z")).isa("baseRelation")]),
        and([var("r").rel(var("y")).rel(var("z")).isa("baseRelation")]),
        and([var("r").rel(var("x")).isa("baseRelation")]),
        and([var("r").rel(var("y")).isa("baseRelation")]),
        and([var("r").rel(var("z")).isa("baseRelation")]),
    ]);
    assert_eq!(apply(&Operators::remove_roleplayer(), &input, &ctx), expected);
}

#[test]
fn remove_roleplayer_removes_stray_statements() {
    let ctx = MockTypeContext::new();
    let input = and([
        var("r").rel_role(var("rx"), var("x")).rel_role(var("ry"), var("y")),
        var("x").isa("someType"),
        var("y").isa("someType"),
    ]);
    let out = apply(&Operators::remove_roleplayer(), &input, &ctx);
    assert!(out.contains(&and([var("r").rel_role(var("rx"), var("x")), var("x").isa("someType")])));
    assert!(out.contains(&and([var("r").rel_role(var("ry"), var("y")), var("y").isa("someType")])));
    for pattern in &out {
        assert!(pattern.thing_variables().all(|v| !v.is_bare()));
    }
}

#[test]
fn remove_roleplayer_keeps_players_that_still_own_attributes() {
    let ctx = MockTypeContext::new();
    let input = and([
        var("r").rel(var("x")).rel(var("y")),
        var("x").isa("someType"),
        var("y").isa("someType"),
        var("y").has("name", var("n")),
    ]);
    let out = apply(&Operators::remove_roleplayer(), &input, &ctx);
    assert!(out.contains(&and([
        var("r").rel(var("x")),
        var("x").isa("someType"),
        var("y").isa("someType"),
        var("y").has("name", var("n")),
    ])));
    assert!(!out.contains(&and([
        var("r").rel(var("x")),
        var("x").isa("someType"),
        var("y").has("name", var("n")),
    ])));
}

#[test]
fn remove_roleplayer_without_relations_is_a_no_op() {
    let ctx = MockTypeContext::new();
    let input = and([var("x").isa("subEntity")]);
    assert_eq!(
        apply(&Operators::remove_roleplayer(), &input, &ctx),
        HashSet::from([input])
    );
}

#[test]
fn generalise_attribute_extends_a_point_value_three_times() {
    let ctx = MockTypeContext::new();
    let op = Operators::generalise_attribute();
    let mut patterns = HashSet::from([and([var("x").has_value("someAttribute", 1500)])]);
    for _ in 0..3 {
        patterns = apply_all(&op, &patterns, &ctx);
    }
    assert_eq!(
        patterns,
        HashSet::from([and([var("x").has("someAttribute", anon().gt(-1500.0).lt(4500.0))])])
    );
}

#[test]
fn generalise_attribute_extends_split_bounds_independently() {
    let ctx = MockTypeContext::new();
    let input = and([
        var("x").has("someAttribute", anon().gt(16)),
        var("x").has("someAttribute", anon().lt(64)),
    ]);
    let expected = HashSet::from([
        and([
            var("x").has("someAttribute", anon().gt(8.0)),
            var("x").has("someAttribute", anon().lt(64)),
        ]),
        and([
            var("x").has("someAttribute", anon().gt(16)),
            var("x").has("someAttribute", anon().lt(96.0)),
        ]),
        and([
            var("x").has("someAttribute", anon().gt(8.0)),
            var("x").has("someAttribute", anon().lt(96.0)),
        ]),
    ]);
    assert_eq!(apply(&Operators::generalise_attribute(), &input, &ctx), expected);
}

#[test]
fn fuzz_variables_renames_every_named_variable() {
    let ctx = MockTypeContext::new();
    let input = and([
        var("r")
            .rel_role("subRole", var("x"))
            .rel_role("subRole", var("y"))
            .rel_role("subRole", var("z")),
        var("x").isa("subEntity"),
        var("x").iid("0x123"),
        var("y").isa("subEntity"),
        var("y").iid("0x456"),
        var("z").isa("subEntity"),
        var("z").iid("0x789"),
    ]);
    let op = Operators::fuzz_variables();
    let outputs = apply(&op, &input, &ctx);
    assert_eq!(outputs.len(), input.named_references().len());
    assert_eq!(outputs.len(), 4);

    for output in &outputs {
        assert_ne!(output, &input);
        assert_eq!(output.len(), input.len());
        assert_eq!(
            input.named_references().difference(&output.named_references()).count(),
            1
        );
        for second in apply(&op, output, &ctx) {
            assert_ne!(&second, output);
        }
    }
}

#[test]
fn fuzz_variables_handles_binary_properties() {
    let ctx = MockTypeContext::new();
    let input = and([
        var("r").has("someAttribute", var("v")),
        var("r").isa(var("type")),
        var("v").neq(var("v2")),
    ]);
    let original: HashSet<Variable> = input.variables().iter().cloned().collect();
    let outputs = apply(&Operators::fuzz_variables(), &input, &ctx);
    assert_eq!(outputs.len(), 4);
    for output in outputs {
        let statements: HashSet<Variable> = output.variables().iter().cloned().collect();
        assert!(original.difference(&statements).next().is_some());
    }
}

#[test]
fn fuzz_ids_displaces_at_least_one_id() {
    let ctx = MockTypeContext::new();
    let input = and([var("x").iid("0x123"), var("y").iid("0x456")]);
    let input_ids = iids(&input);

    let op = Operators::fuzz_ids();
    let first = apply(&op, &input, &ctx);
    let second = apply_all(&op, &first, &ctx);

    for pattern in first.iter().chain(&second) {
        assert!(iids(pattern).difference(&input_ids).next().is_some());
    }
    assert!(!first.contains(&input));
    assert_ne!(first, second);
}

#[test]
fn mixed_operators_converge() {
    let ctx = MockTypeContext::new();
    let input = and([
        var("r").rel_role("subRole", var("x")).rel_role("subRole", var("y")),
        var("x").isa("subEntity"),
        var("x").iid("0x123"),
        var("y").isa("subEntity"),
    ]);
    let ops = [
        OperatorKind::RemoveSubstitution,
        OperatorKind::TypeGeneralise,
        OperatorKind::RoleGeneralise,
        OperatorKind::RemoveRolePlayer,
    ]
    .iter()
    .map(OperatorKind::build)
    .collect::<Vec<_>>();

    let reached = converge(&input, &ops, &ctx, &DriverConfig::default()).unwrap();
    assert!(reached.contains(&input));
    assert!(reached.contains(&Conjunction::empty()));
    assert!(reached.contains(&and([
        var("r").rel_role(var("xrole"), var("x")),
        var("x").isa(var("xtype")),
    ])));
}
