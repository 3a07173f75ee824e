//! Generalisation operators.
//!
//! Every operator implements [`Operator`]: given a conjunction and a type
//! context it returns a lazy sequence of alternative conjunctions, each
//! reachable from the input by one application of the operator's rule.
//!
//! Shared contract:
//! - the input is never mutated;
//! - the input is never part of the output (except for [`Identity`] and the
//!   no-op case below);
//! - operators with an explicit "nothing to rewrite" case
//!   ([`RemoveSubstitution`], [`RemoveRolePlayer`], [`FuzzIds`]) emit exactly
//!   the input when there is nothing to rewrite, so drivers can treat that
//!   as a fixed point; the others then emit nothing;
//! - output order is unspecified and duplicates are collapsed;
//! - malformed input is rejected up front with
//!   [`GeneraliseError::MalformedInput`](crate::GeneraliseError::MalformedInput).

mod fuzz_ids;
mod fuzz_variables;
mod generalise_attribute;
mod identity;
mod registry;
mod remove_roleplayer;
mod remove_substitution;
mod role_generalise;
mod type_generalise;

#[cfg(test)]
pub(crate) mod testing;

use std::collections::HashSet;
use std::fmt;

use crate::cartesian::MixedRadix;
use crate::context::TypeContext;
use crate::error::GeneraliseResult;
use crate::pattern::{Conjunction, ThingProperty, ThingVariable, Variable};
use crate::sanitise::sanitise;

pub use fuzz_ids::FuzzIds;
pub use fuzz_variables::FuzzVariables;
pub use generalise_attribute::GeneraliseAttribute;
pub use identity::Identity;
pub use registry::{OperatorKind, Operators};
pub use remove_roleplayer::RemoveRolePlayer;
pub use remove_substitution::RemoveSubstitution;
pub use role_generalise::RoleGeneralise;
pub use type_generalise::TypeGeneralise;

/// Lazy sequence of generalised patterns.
pub type Generalisations<'a> = Box<dyn Iterator<Item = Conjunction> + Send + 'a>;

/// A pattern generalisation operator.
pub trait Operator: fmt::Debug + Send + Sync {
    /// The registry entry this operator implements.
    fn kind(&self) -> OperatorKind;

    /// Applies one step of the operator's rule to `src`.
    ///
    /// # Errors
    ///
    /// `MalformedInput` for invalid patterns, and whatever the context raises
    /// (typically `MissingSupertype`).
    fn apply<'a>(
        &self,
        src: &'a Conjunction,
        ctx: &'a dyn TypeContext,
    ) -> GeneraliseResult<Generalisations<'a>>;
}

/// Drops the input and already-seen patterns from `outputs`.
pub(crate) fn distinct_from<'a>(
    src: &'a Conjunction,
    outputs: impl Iterator<Item = Conjunction> + Send + 'a,
) -> Generalisations<'a> {
    let mut seen = HashSet::new();
    Box::new(outputs.filter(move |p| p != src && seen.insert(p.clone())))
}

/// Emits exactly `src`.
pub(crate) fn unchanged(src: &Conjunction) -> Generalisations<'_> {
    Box::new(std::iter::once(src.clone()))
}

/// Emits nothing.
pub(crate) fn nothing<'a>() -> Generalisations<'a> {
    Box::new(std::iter::empty())
}

/// The ways one statement of the input may be rewritten.
///
/// A statement contributes one digit per independent choice; `build` turns
/// the statement's digits into the rewritten statement. All-zero digits must
/// reproduce the statement unchanged. Alternatives are built only when the
/// product reaches them.
pub(crate) struct Alternatives<'a> {
    radices: Vec<usize>,
    build: Box<dyn Fn(&[usize]) -> Variable + Send + 'a>,
}

impl<'a> Alternatives<'a> {
    pub(crate) fn new(radices: Vec<usize>, build: impl Fn(&[usize]) -> Variable + Send + 'a) -> Self {
        Self {
            radices,
            build: Box::new(build),
        }
    }

    /// No choice: the statement stays as it is.
    pub(crate) fn unchanged(statement: &'a Variable) -> Self {
        Self::new(Vec::new(), move |_| statement.clone())
    }

    /// One of `candidates`, the unchanged statement first.
    pub(crate) fn one_of(candidates: Vec<Variable>) -> Self {
        Self::new(vec![candidates.len()], move |digits| candidates[digits[0]].clone())
    }

    /// One alternative per targeted property of `thing`.
    ///
    /// `choices` pairs a property index with its alternatives; the original
    /// property must come first and `None` drops the property.
    pub(crate) fn properties(
        thing: &'a ThingVariable,
        choices: Vec<(usize, Vec<Option<ThingProperty>>)>,
    ) -> Self {
        let radices = choices.iter().map(|(_, alts)| alts.len()).collect();
        Self::new(radices, move |digits| {
            let picked = choices
                .iter()
                .zip(digits)
                .map(|((index, alts), pick)| (*index, alts[*pick].clone()));
            replace_properties(thing, picked).into()
        })
    }

    /// Returns true if the statement has more than one alternative.
    pub(crate) fn has_choice(&self) -> bool {
        self.radices.iter().any(|r| *r > 1)
    }
}

/// Cartesian expansion over per-statement alternatives.
///
/// `alternatives[i]` describes the candidates for statement `i` of `src`.
/// Every combination except the all-unchanged one becomes an output,
/// optionally sanitised against `src`. Only the current digit tuple is held
/// between outputs.
pub(crate) fn expand<'a>(
    src: &'a Conjunction,
    alternatives: Vec<Alternatives<'a>>,
    sanitised: bool,
) -> Generalisations<'a> {
    let radices = alternatives.iter().flat_map(|alt| alt.radices.iter().copied()).collect();
    let outputs = MixedRadix::new(radices).skip(1).map(move |digits| {
        let mut rest = digits.as_slice();
        let statements = alternatives.iter().map(|alt| {
            let (mine, tail) = rest.split_at(alt.radices.len());
            rest = tail;
            (alt.build)(mine)
        });
        let candidate = Conjunction::new(statements);
        if sanitised {
            sanitise(candidate, src)
        } else {
            candidate
        }
    });
    distinct_from(src, outputs)
}

/// `thing` with the property at each given index replaced, or dropped for
/// `None`.
pub(crate) fn replace_properties(
    thing: &ThingVariable,
    replacements: impl IntoIterator<Item = (usize, Option<ThingProperty>)>,
) -> ThingVariable {
    let mut properties: Vec<Option<ThingProperty>> = thing.properties().iter().cloned().map(Some).collect();
    for (index, replacement) in replacements {
        properties[index] = replacement;
    }
    thing.without_properties().with_properties(properties.into_iter().flatten())
}
