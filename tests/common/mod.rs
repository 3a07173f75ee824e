#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use pattern_ops::{Conjunction, GeneraliseResult, Operator, SchemaContext, TypeContext};

/// Three-level hierarchies for entities, relations, roles and attributes,
/// with deterministic fresh values.
#[derive(Debug)]
pub struct MockTypeContext {
    schema: SchemaContext,
    next_id: AtomicUsize,
    next_name: AtomicUsize,
}

impl MockTypeContext {
    pub fn new() -> Self {
        let schema = SchemaContext::new()
            .with_subtype("baseEntity", "entity")
            .with_subtype("subEntity", "baseEntity")
            .with_subtype("baseRelation", "relation")
            .with_subtype("subRelation", "baseRelation")
            .with_subtype("baseRole", "role")
            .with_subtype("subRole", "baseRole")
            .with_subtype("baseAttribute", "attribute")
            .with_subtype("someAttribute", "baseAttribute")
            .with_subtype("someType", "entity");
        Self {
            schema,
            next_id: AtomicUsize::new(0),
            next_name: AtomicUsize::new(0),
        }
    }
}

impl TypeContext for MockTypeContext {
    fn sup(&self, label: &str) -> GeneraliseResult<String> {
        self.schema.sup(label)
    }

    fn is_meta_type(&self, label: &str) -> bool {
        self.schema.is_meta_type(label)
    }

    fn fresh_instance_id(&self) -> String {
        format!("0xfresh{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn fresh_variable_name(&self) -> String {
        format!("fresh{}", self.next_name.fetch_add(1, Ordering::Relaxed))
    }
}

/// Collects one application of `op` into a set.
pub fn apply(op: &dyn Operator, src: &Conjunction, ctx: &dyn TypeContext) -> HashSet<Conjunction> {
    op.apply(src, ctx)
        .unwrap_or_else(|e| panic!("{:?} failed on {src}: {e}", op.kind()))
        .collect()
}

/// Applies `op` to every pattern of `inputs` and unions the outputs.
pub fn apply_all(
    op: &dyn Operator,
    inputs: &HashSet<Conjunction>,
    ctx: &dyn TypeContext,
) -> HashSet<Conjunction> {
    inputs.iter().flat_map(|p| apply(op, p, ctx)).collect()
}

/// Every iid mentioned by a statement head.
pub fn iids(pattern: &Conjunction) -> HashSet<String> {
    pattern
        .thing_variables()
        .flat_map(|v| v.iids().map(str::to_string).collect::<Vec<_>>())
        .collect()
}
