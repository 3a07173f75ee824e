//! Deterministic context shared by operator tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::context::{SchemaContext, TypeContext};
use crate::error::GeneraliseResult;

#[derive(Debug)]
pub(crate) struct MockTypeContext {
    schema: SchemaContext,
    next_id: AtomicUsize,
    next_name: AtomicUsize,
}

impl MockTypeContext {
    pub(crate) fn new() -> Self {
        let schema = SchemaContext::new()
            .with_subtype("baseEntity", "entity")
            .with_subtype("subEntity", "baseEntity")
            .with_subtype("baseRelation", "relation")
            .with_subtype("subRelation", "baseRelation")
            .with_subtype("baseRole", "role")
            .with_subtype("subRole", "baseRole")
            .with_subtype("baseAttribute", "attribute")
            .with_subtype("subAttribute", "baseAttribute");
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
