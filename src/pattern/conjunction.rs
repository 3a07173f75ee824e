//! Conjunctions of statements.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::reference::VarRef;
use super::variable::{ThingVariable, TypeVariable, Variable};

/// A set of statements that are conceptually `AND`-ed together.
///
/// Statements are stored sorted and deduplicated, so equality is set
/// equality regardless of the order statements were given in. Several
/// statements may describe the same variable (`$x isa person; $x iid 0x1;`);
/// they are kept apart, exactly as written.
///
/// # Examples
///
/// ```
/// use pattern_ops::pattern::{and, var};
///
/// let a = and([var("x").isa("person"), var("y").isa("person")]);
/// let b = and([var("y").isa("person"), var("x").isa("person")]);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "ConjunctionRepr")]
pub struct Conjunction {
    variables: Vec<Variable>,
}

#[derive(Deserialize)]
struct ConjunctionRepr {
    #[serde(default)]
    variables: Vec<Variable>,
}

impl From<ConjunctionRepr> for Conjunction {
    fn from(repr: ConjunctionRepr) -> Self {
        Self::new(repr.variables)
    }
}

impl Conjunction {
    /// Creates a conjunction in normal form.
    #[must_use]
    pub fn new(variables: impl IntoIterator<Item = Variable>) -> Self {
        let mut variables: Vec<Variable> = variables.into_iter().collect();
        variables.sort();
        variables.dedup();
        Self { variables }
    }

    /// The empty conjunction, which matches everything.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            variables: Vec::new(),
        }
    }

    /// Returns the statements in normal order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Iterates over the thing statements.
    pub fn thing_variables(&self) -> impl Iterator<Item = &ThingVariable> {
        self.variables.iter().filter_map(Variable::as_thing)
    }

    /// Iterates over the type statements.
    pub fn type_variables(&self) -> impl Iterator<Item = &TypeVariable> {
        self.variables.iter().filter_map(Variable::as_type)
    }

    /// Number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true for the empty conjunction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Returns true if `variable` is one of the statements.
    #[must_use]
    pub fn contains(&self, variable: &Variable) -> bool {
        self.variables.binary_search(variable).is_ok()
    }

    /// Returns a conjunction with the statement at `index` replaced, or
    /// removed when `replacement` is `None`.
    #[must_use]
    pub fn replace(&self, index: usize, replacement: Option<Variable>) -> Self {
        let mut variables = self.variables.clone();
        match replacement {
            Some(v) => variables[index] = v,
            None => {
                variables.remove(index);
            }
        }
        Self::new(variables)
    }

    /// Every named variable mentioned anywhere in the conjunction.
    #[must_use]
    pub fn named_references(&self) -> BTreeSet<VarRef> {
        let mut out = BTreeSet::new();
        for v in &self.variables {
            v.for_each_reference(&mut |r| {
                if r.is_named() {
                    out.insert(r.clone());
                }
            });
        }
        out
    }

    /// Every variable playing a role in some relation of the conjunction.
    #[must_use]
    pub fn role_players(&self) -> BTreeSet<VarRef> {
        self.thing_variables()
            .filter_map(ThingVariable::relation)
            .flat_map(|rel| rel.players().iter().map(|rp| rp.player.clone()))
            .collect()
    }

    /// Returns true if some property of some statement mentions `var`.
    /// Statement heads do not count.
    #[must_use]
    pub fn mentions(&self, var: &VarRef) -> bool {
        let mut found = false;
        for thing in self.thing_variables() {
            for p in thing.properties() {
                p.for_each_reference(&mut |r| found |= r == var);
            }
        }
        found
    }
}

impl FromIterator<Variable> for Conjunction {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for v in &self.variables {
            write!(f, " {v};")?;
        }
        write!(f, " }}")
    }
}
