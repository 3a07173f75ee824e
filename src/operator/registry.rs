//! Operator registry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::GeneraliseConfig;
use crate::error::ConfigError;
use crate::logging;

use super::{
    FuzzIds, FuzzVariables, GeneraliseAttribute, Identity, Operator, RemoveRolePlayer,
    RemoveSubstitution, RoleGeneralise, TypeGeneralise,
};

/// Names of the registered operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    /// Emits the input unchanged.
    Identity,
    /// One step up the type hierarchy for one statement.
    TypeGeneralise,
    /// One step up the role hierarchy for one role-player.
    RoleGeneralise,
    /// Drops instance identifiers.
    RemoveSubstitution,
    /// Drops role-players.
    #[serde(rename = "remove_roleplayer")]
    RemoveRolePlayer,
    /// Widens numeric attribute predicates.
    GeneraliseAttribute,
    /// Replaces instance identifiers with fresh ones.
    FuzzIds,
    /// Renames one variable.
    FuzzVariables,
}

impl OperatorKind {
    /// Every kind, in registry order.
    pub const ALL: [Self; 8] = [
        Self::Identity,
        Self::TypeGeneralise,
        Self::RoleGeneralise,
        Self::RemoveSubstitution,
        Self::RemoveRolePlayer,
        Self::GeneraliseAttribute,
        Self::FuzzIds,
        Self::FuzzVariables,
    ];

    /// The registry name, as accepted by [`Operators::by_name`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::TypeGeneralise => "type_generalise",
            Self::RoleGeneralise => "role_generalise",
            Self::RemoveSubstitution => "remove_substitution",
            Self::RemoveRolePlayer => "remove_roleplayer",
            Self::GeneraliseAttribute => "generalise_attribute",
            Self::FuzzIds => "fuzz_ids",
            Self::FuzzVariables => "fuzz_variables",
        }
    }

    /// True for the operators that only produce alpha-equivalent or
    /// identifier-displaced variants instead of strictly weaker patterns.
    #[must_use]
    pub const fn is_fuzzer(&self) -> bool {
        matches!(self, Self::FuzzIds | Self::FuzzVariables)
    }

    /// Instantiates the operator, with the default configuration where one
    /// applies.
    #[must_use]
    pub fn build(&self) -> Box<dyn Operator> {
        match self {
            Self::Identity => Box::new(Identity),
            Self::TypeGeneralise => Box::new(TypeGeneralise),
            Self::RoleGeneralise => Box::new(RoleGeneralise),
            Self::RemoveSubstitution => Box::new(RemoveSubstitution),
            Self::RemoveRolePlayer => Box::new(RemoveRolePlayer),
            Self::GeneraliseAttribute => Box::new(GeneraliseAttribute::default()),
            Self::FuzzIds => Box::new(FuzzIds),
            Self::FuzzVariables => Box::new(FuzzVariables),
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatorKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownOperator { name: s.to_string() })
    }
}

/// Entry points for every operator.
///
/// # Examples
///
/// ```
/// use pattern_ops::pattern::{and, var};
/// use pattern_ops::{Operator, Operators, SchemaContext};
///
/// let ctx = SchemaContext::new().with_subtype("person", "entity");
/// let src = and([var("x").isa("person")]);
/// let out: Vec<_> = Operators::type_generalise().apply(&src, &ctx).unwrap().collect();
/// assert_eq!(out, vec![and([var("x").isa("entity")])]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Operators;

impl Operators {
    /// Returns its input.
    #[must_use]
    pub const fn identity() -> Identity {
        Identity
    }

    /// One step up the type hierarchy, one statement at a time.
    #[must_use]
    pub const fn type_generalise() -> TypeGeneralise {
        TypeGeneralise
    }

    /// One step up the role hierarchy, one role-player at a time.
    #[must_use]
    pub const fn role_generalise() -> RoleGeneralise {
        RoleGeneralise
    }

    /// Drops instance identifiers.
    #[must_use]
    pub const fn remove_substitution() -> RemoveSubstitution {
        RemoveSubstitution
    }

    /// Drops role-players from relations.
    #[must_use]
    pub const fn remove_roleplayer() -> RemoveRolePlayer {
        RemoveRolePlayer
    }

    /// Attribute widening with the default factor `k = 2`.
    #[must_use]
    pub fn generalise_attribute() -> GeneraliseAttribute {
        GeneraliseAttribute::default()
    }

    /// Attribute widening with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns the config's validation error.
    pub fn generalise_attribute_with(config: GeneraliseConfig) -> Result<GeneraliseAttribute, ConfigError> {
        GeneraliseAttribute::new(config)
    }

    /// Replaces instance identifiers with fresh ones.
    #[must_use]
    pub const fn fuzz_ids() -> FuzzIds {
        FuzzIds
    }

    /// Renames one variable at a time.
    #[must_use]
    pub const fn fuzz_variables() -> FuzzVariables {
        FuzzVariables
    }

    /// Every registered operator, in registry order.
    #[must_use]
    pub fn all() -> Vec<Box<dyn Operator>> {
        OperatorKind::ALL.iter().map(OperatorKind::build).collect()
    }

    /// The strictly generalising operators: everything except the identity
    /// and the fuzzers.
    #[must_use]
    pub fn generalising() -> Vec<Box<dyn Operator>> {
        OperatorKind::ALL
            .iter()
            .filter(|kind| **kind != OperatorKind::Identity && !kind.is_fuzzer())
            .map(OperatorKind::build)
            .collect()
    }

    /// Looks an operator up by its registry name.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownOperator`] for names not in the registry.
    pub fn by_name(name: &str) -> Result<Box<dyn Operator>, ConfigError> {
        let kind: OperatorKind = name.parse()?;
        logging::debug!("resolved operator {kind}");
        Ok(kind.build())
    }
}
