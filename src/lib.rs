//! # pattern-ops - Pattern Generalisation for Graph Queries
//!
//! A library of generalisation operators over conjunctive patterns of a
//! typed graph query language. Given a pattern, each operator produces
//! alternative patterns that match a superset of what the input matches
//! (or, for the fuzzers, an equivalent set). Verification harnesses use the
//! outputs to check that a reasoner's answers grow monotonically as queries
//! are weakened.
//!
//! ## Core Concepts
//!
//! - **Conjunction**: a set of statements `AND`-ed together
//! - **ThingVariable / TypeVariable**: statements over data instances and schema types
//! - **ThingProperty**: a constraint on a thing (`isa`, `has`, a value, a relation, `!=`, `iid`)
//! - **TypeContext**: the schema oracle injected into every operator
//! - **Operator**: a single-step generalisation, returning a lazy iterator
//!
//! ## Usage
//!
//! ```rust
//! use pattern_ops::pattern::{and, var};
//! use pattern_ops::{Operator, Operators, SchemaContext};
//!
//! let ctx = SchemaContext::new()
//!     .with_subtype("baseEntity", "entity")
//!     .with_subtype("subEntity", "baseEntity");
//!
//! let src = and([var("x").isa("subEntity").iid("0x123")]);
//! let outputs: Vec<_> = Operators::type_generalise().apply(&src, &ctx)?.collect();
//! assert_eq!(outputs, vec![and([var("x").isa("baseEntity").iid("0x123")])]);
//! # Ok::<(), pattern_ops::GeneraliseError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod logging;

// Pattern model
pub mod cartesian;
pub mod error;
pub mod pattern;
pub mod range;
pub mod sanitise;
pub mod substitution;

// Operators and their surroundings
pub mod config;
pub mod context;
pub mod driver;
pub mod operator;

// Re-export primary types at crate root for convenience
pub use config::{DriverConfig, GeneraliseConfig};
pub use context::{SchemaConfig, SchemaContext, TypeContext, DEFAULT_META_TYPES};
pub use driver::{apply_chain, apply_parallel, converge};
pub use error::{ConfigError, GeneraliseError, GeneraliseResult};
pub use operator::{
    FuzzIds, FuzzVariables, GeneraliseAttribute, Generalisations, Identity, Operator, OperatorKind,
    Operators, RemoveRolePlayer, RemoveSubstitution, RoleGeneralise, TypeGeneralise,
};
pub use pattern::{
    Comparator, Conjunction, Literal, Operand, RelationProperty, RolePlayer, ThingProperty,
    ThingVariable, TypeRef, TypeVariable, ValueOperation, VarRef, Variable,
};
pub use range::{Bound, Range};
