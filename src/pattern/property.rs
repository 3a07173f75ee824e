//! Thing properties.
//!
//! Properties are modelled as a closed tagged variant, so every consumer
//! (substitution, sanitisation, operators) matches exhaustively over them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::reference::{TypeRef, VarRef};
use super::value::{Operand, ValueOperation};
use super::variable::ThingVariable;

/// A single `(role, player)` pair of a relation.
///
/// Field order matters: the derived ordering sorts by player first, which is
/// the normal form of a relation's players.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RolePlayer {
    /// The variable playing the role.
    pub player: VarRef,
    /// The role, if one was stated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<TypeRef>,
}

impl RolePlayer {
    /// Creates a role-player without an explicit role.
    #[must_use]
    pub const fn new(player: VarRef) -> Self {
        Self { player, role: None }
    }

    /// Creates a role-player with the given role.
    #[must_use]
    pub fn with_role(role: impl Into<TypeRef>, player: VarRef) -> Self {
        Self {
            player,
            role: Some(role.into()),
        }
    }

    /// Returns the role label, if the role is a concrete label.
    #[must_use]
    pub fn role_label(&self) -> Option<&str> {
        self.role.as_ref().and_then(TypeRef::as_label)
    }
}

impl fmt::Display for RolePlayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.role {
            Some(role) => write!(f, "{role}: {}", self.player),
            None => write!(f, "{}", self.player),
        }
    }
}

/// The role-players of a relation, kept sorted by player name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RelationRepr")]
pub struct RelationProperty {
    players: Vec<RolePlayer>,
}

#[derive(Deserialize)]
struct RelationRepr {
    players: Vec<RolePlayer>,
}

impl From<RelationRepr> for RelationProperty {
    fn from(repr: RelationRepr) -> Self {
        Self::new(repr.players)
    }
}

impl RelationProperty {
    /// Creates a relation property in normal form.
    #[must_use]
    pub fn new(players: impl IntoIterator<Item = RolePlayer>) -> Self {
        let mut players: Vec<RolePlayer> = players.into_iter().collect();
        players.sort();
        Self { players }
    }

    /// Builds a relation from a (possibly empty) collection of players.
    ///
    /// Returns `None` for an empty collection: a relation without players is
    /// not a property at all.
    #[must_use]
    pub fn from_players(players: impl IntoIterator<Item = RolePlayer>) -> Option<Self> {
        let relation = Self::new(players);
        if relation.players.is_empty() {
            None
        } else {
            Some(relation)
        }
    }

    /// Returns the role-players in normal order.
    #[must_use]
    pub fn players(&self) -> &[RolePlayer] {
        &self.players
    }

    /// Returns a copy with one more role-player.
    #[must_use]
    pub fn plus_player(&self, player: RolePlayer) -> Self {
        Self::new(self.players.iter().cloned().chain(std::iter::once(player)))
    }

    /// Returns a copy with the player at `index` replaced.
    #[must_use]
    pub fn replace_player(&self, index: usize, player: RolePlayer) -> Self {
        let mut players = self.players.clone();
        players[index] = player;
        Self::new(players)
    }
}

impl fmt::Display for RelationProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, rp) in self.players.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{rp}")?;
        }
        write!(f, ")")
    }
}

/// A constraint attached to a thing variable.
///
/// Variant order is the display order of a statement: relation first, then
/// type, identifier, ownerships, values and inequalities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "property", rename_all = "snake_case")]
pub enum ThingProperty {
    /// The thing is a relation with these role-players.
    Relation(RelationProperty),

    /// The thing is an instance of a type.
    Isa {
        /// The type, by label or by variable.
        type_ref: TypeRef,
        /// `isa!`: direct instance, excluding subtypes.
        #[serde(default)]
        explicit: bool,
    },

    /// The thing has this instance identifier.
    Iid {
        /// Opaque identifier, e.g. `0x123`.
        iid: String,
    },

    /// The thing owns an attribute of the given type.
    Has {
        /// Label of the owned attribute type.
        attribute_type: String,
        /// The owned attribute, possibly carrying value predicates.
        attribute: ThingVariable,
    },

    /// The thing's value satisfies a comparison.
    Value(ValueOperation),

    /// The thing is distinct from another thing.
    Neq {
        /// The other thing.
        other: VarRef,
    },
}

impl ThingProperty {
    /// Creates an `isa` property.
    #[must_use]
    pub fn isa(type_ref: impl Into<TypeRef>, explicit: bool) -> Self {
        Self::Isa {
            type_ref: type_ref.into(),
            explicit,
        }
    }

    /// Creates an `iid` property.
    #[must_use]
    pub fn iid(iid: impl Into<String>) -> Self {
        Self::Iid { iid: iid.into() }
    }

    /// Creates a `has` property.
    #[must_use]
    pub fn has(attribute_type: impl Into<String>, attribute: ThingVariable) -> Self {
        Self::Has {
            attribute_type: attribute_type.into(),
            attribute,
        }
    }

    /// Creates a `!=` (distinct thing) property.
    #[must_use]
    pub const fn neq(other: VarRef) -> Self {
        Self::Neq { other }
    }

    /// Short name of the property kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Relation(_) => "relation",
            Self::Isa { .. } => "isa",
            Self::Iid { .. } => "iid",
            Self::Has { .. } => "has",
            Self::Value(_) => "value",
            Self::Neq { .. } => "neq",
        }
    }

    /// Returns true for an `isa` property.
    #[must_use]
    pub const fn is_isa(&self) -> bool {
        matches!(self, Self::Isa { .. })
    }

    /// Returns true for an `iid` property.
    #[must_use]
    pub const fn is_iid(&self) -> bool {
        matches!(self, Self::Iid { .. })
    }

    /// Returns true for a relation property.
    #[must_use]
    pub const fn is_relation(&self) -> bool {
        matches!(self, Self::Relation(_))
    }

    /// Returns true for a `has` property.
    #[must_use]
    pub const fn is_has(&self) -> bool {
        matches!(self, Self::Has { .. })
    }

    /// Returns true for a value predicate.
    #[must_use]
    pub const fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Calls `f` for every variable this property mentions, including
    /// variables nested inside an owned attribute.
    pub fn for_each_reference<'a>(&'a self, f: &mut impl FnMut(&'a VarRef)) {
        match self {
            Self::Relation(rel) => {
                for rp in rel.players() {
                    if let Some(TypeRef::Variable(role)) = &rp.role {
                        f(role);
                    }
                    f(&rp.player);
                }
            }
            Self::Isa { type_ref, .. } => {
                if let TypeRef::Variable(v) = type_ref {
                    f(v);
                }
            }
            Self::Iid { .. } => {}
            Self::Has { attribute, .. } => {
                f(attribute.reference());
                for p in attribute.properties() {
                    p.for_each_reference(f);
                }
            }
            Self::Value(op) => {
                if let Operand::Variable(v) = &op.operand {
                    f(v);
                }
            }
            Self::Neq { other } => f(other),
        }
    }
}

impl fmt::Display for ThingProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relation(rel) => write!(f, "{rel}"),
            Self::Isa { type_ref, explicit } => {
                if *explicit {
                    write!(f, "isa! {type_ref}")
                } else {
                    write!(f, "isa {type_ref}")
                }
            }
            Self::Iid { iid } => write!(f, "iid {iid}"),
            Self::Has {
                attribute_type,
                attribute,
            } => {
                write!(f, "has {attribute_type}")?;
                if attribute.is_named() {
                    write!(f, " {}", attribute.reference())?;
                }
                for p in attribute.properties() {
                    write!(f, " {p}")?;
                }
                Ok(())
            }
            Self::Value(op) => write!(f, "{op}"),
            Self::Neq { other } => write!(f, "!= {other}"),
        }
    }
}
