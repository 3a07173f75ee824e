//! The type context.
//!
//! Operators never look at a schema directly. Everything they need from it
//! (single-step supertypes, the meta-type predicate and fresh values) is
//! asked of a [`TypeContext`] injected per call. [`SchemaContext`] is the
//! in-memory implementation used by harnesses and tests.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ConfigError, GeneraliseError, GeneraliseResult};

/// Meta types of the query language's schema.
pub const DEFAULT_META_TYPES: [&str; 5] = ["thing", "entity", "relation", "attribute", "role"];

/// Schema capabilities required by the operators.
///
/// Contexts are shared across worker threads by the parallel driver.
/// [`fresh_instance_id`](Self::fresh_instance_id) must never return the same
/// value twice within a process.
pub trait TypeContext: Send + Sync {
    /// Returns the direct supertype of `label`.
    ///
    /// # Errors
    ///
    /// [`GeneraliseError::MissingSupertype`] if `label` is unknown or is a
    /// meta type.
    fn sup(&self, label: &str) -> GeneraliseResult<String>;

    /// Returns true for the topmost schema types, which have no supertype.
    fn is_meta_type(&self, label: &str) -> bool;

    /// Returns an opaque, never-repeating instance identifier.
    fn fresh_instance_id(&self) -> String;

    /// Returns a never-repeating variable name.
    fn fresh_variable_name(&self) -> String {
        format!("v{}", Uuid::new_v4().simple())
    }
}

/// Serializable description of a type hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Topmost types. Empty means [`DEFAULT_META_TYPES`].
    pub meta_types: Vec<String>,
    /// Map from a type label to its direct supertype.
    pub supertypes: HashMap<String, String>,
}

/// In-memory type hierarchy.
///
/// # Examples
///
/// ```
/// use pattern_ops::{SchemaContext, TypeContext};
///
/// let ctx = SchemaContext::new()
///     .with_subtype("baseEntity", "entity")
///     .with_subtype("subEntity", "baseEntity");
/// assert_eq!(ctx.sup("subEntity").unwrap(), "baseEntity");
/// assert!(ctx.is_meta_type("entity"));
/// ```
#[derive(Debug, Clone)]
pub struct SchemaContext {
    meta_types: HashSet<String>,
    supertypes: HashMap<String, String>,
}

impl Default for SchemaContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaContext {
    /// Creates a context holding only the default meta types.
    #[must_use]
    pub fn new() -> Self {
        Self {
            meta_types: DEFAULT_META_TYPES.iter().map(ToString::to_string).collect(),
            supertypes: HashMap::new(),
        }
    }

    /// Creates a context from a config, checking the hierarchy is a forest
    /// rooted at meta types.
    ///
    /// # Errors
    ///
    /// [`ConfigError::CyclicHierarchy`], [`ConfigError::UnrootedType`] or
    /// [`ConfigError::MetaTypeWithParent`].
    pub fn from_config(config: &SchemaConfig) -> Result<Self, ConfigError> {
        let mut ctx = if config.meta_types.is_empty() {
            Self::new()
        } else {
            Self {
                meta_types: config.meta_types.iter().cloned().collect(),
                supertypes: HashMap::new(),
            }
        };
        ctx.supertypes = config.supertypes.clone();
        ctx.check_hierarchy()?;
        Ok(ctx)
    }

    /// Declares `label` a meta type.
    #[must_use]
    pub fn with_meta_type(mut self, label: impl Into<String>) -> Self {
        self.meta_types.insert(label.into());
        self
    }

    /// Declares `parent` the direct supertype of `label`.
    #[must_use]
    pub fn with_subtype(mut self, label: impl Into<String>, parent: impl Into<String>) -> Self {
        self.supertypes.insert(label.into(), parent.into());
        self
    }

    /// Number of non-meta types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.supertypes.len()
    }

    /// Returns true if no subtype has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.supertypes.is_empty()
    }

    /// Returns the chain of supertypes from `label` (exclusive) up to its
    /// meta type (inclusive).
    pub fn ancestors(&self, label: &str) -> GeneraliseResult<Vec<String>> {
        let mut out = Vec::new();
        let mut current = label.to_string();
        while !self.is_meta_type(&current) {
            current = self.sup(&current)?;
            out.push(current.clone());
            if out.len() > self.supertypes.len() {
                return Err(GeneraliseError::Config(ConfigError::CyclicHierarchy {
                    label: label.to_string(),
                }));
            }
        }
        Ok(out)
    }

    fn check_hierarchy(&self) -> Result<(), ConfigError> {
        for (label, parent) in &self.supertypes {
            if self.meta_types.contains(label) {
                return Err(ConfigError::MetaTypeWithParent {
                    label: label.clone(),
                    parent: parent.clone(),
                });
            }
            let mut current = parent;
            let mut steps = 0usize;
            while let Some(next) = self.supertypes.get(current) {
                steps += 1;
                if steps > self.supertypes.len() {
                    return Err(ConfigError::CyclicHierarchy {
                        label: label.clone(),
                    });
                }
                current = next;
            }
            if !self.meta_types.contains(current) {
                return Err(ConfigError::UnrootedType {
                    label: label.clone(),
                    root: current.clone(),
                });
            }
        }
        Ok(())
    }
}

impl TypeContext for SchemaContext {
    fn sup(&self, label: &str) -> GeneraliseResult<String> {
        self.supertypes
            .get(label)
            .cloned()
            .ok_or_else(|| GeneraliseError::missing_supertype(label))
    }

    fn is_meta_type(&self, label: &str) -> bool {
        self.meta_types.contains(label)
    }

    fn fresh_instance_id(&self) -> String {
        format!("0x{}", Uuid::new_v4().simple())
    }
}
