//! Numeric value ranges.
//!
//! The value predicates attached to an owned attribute (`has age > 16`) are
//! folded into a [`Range`], widened with [`Range::generalise`], and turned
//! back into predicates with [`Range::to_properties`].
//!
//! Widening with factor `k` and magnitude `m(x)` (`|x|`, or the zero-width
//! fallback when `x` is zero):
//!
//! | Range | Widened |
//! |---|---|
//! | `v` | `(v - m(v)/k, v + m(v)/k)`, both exclusive |
//! | `> lo` | `> lo - m(lo)/k` |
//! | `< hi` | `< hi + m(hi)/k` |
//! | `(lo, hi)` | `(lo - w/k, hi + w/k)` with `w = hi - lo` |
//! | unbounded | unbounded |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GeneraliseConfig;
use crate::error::{GeneraliseError, GeneraliseResult};
use crate::pattern::{Comparator, Literal, Operand, ThingProperty, ValueOperation};

/// One end of a range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    /// The bounding value.
    pub value: f64,
    /// Whether the value itself is inside the range.
    pub inclusive: bool,
}

impl Bound {
    /// A bound that admits `value`.
    #[must_use]
    pub const fn inclusive(value: f64) -> Self {
        Self {
            value,
            inclusive: true,
        }
    }

    /// A bound that excludes `value`.
    #[must_use]
    pub const fn exclusive(value: f64) -> Self {
        Self {
            value,
            inclusive: false,
        }
    }

    // Of two lower bounds, the one admitting fewer values.
    fn tighter_lower(self, other: Self) -> Self {
        if other.value > self.value || (other.value == self.value && !other.inclusive) {
            other
        } else {
            self
        }
    }

    fn tighter_upper(self, other: Self) -> Self {
        if other.value < self.value || (other.value == self.value && !other.inclusive) {
            other
        } else {
            self
        }
    }
}

/// A numeric interval described by comparison predicates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Range {
    /// No numeric predicate.
    Unbounded,
    /// `> low` or `>= low`.
    LowerBounded {
        /// Lower end.
        low: Bound,
    },
    /// `< high` or `<= high`.
    UpperBounded {
        /// Upper end.
        high: Bound,
    },
    /// Both ends.
    Bounded {
        /// Lower end.
        low: Bound,
        /// Upper end.
        high: Bound,
    },
    /// `== value`.
    PointEquality {
        /// The single admitted value.
        value: f64,
    },
}

impl Range {
    /// Folds value predicates into the smallest range satisfying all of them.
    ///
    /// # Errors
    ///
    /// [`GeneraliseError::UnsupportedValue`] for predicates that are not a
    /// numeric `==`, `<`, `<=`, `>` or `>=` against a literal.
    pub fn create<'a>(values: impl IntoIterator<Item = &'a ValueOperation>) -> GeneraliseResult<Self> {
        let mut point: Option<f64> = None;
        let mut low: Option<Bound> = None;
        let mut high: Option<Bound> = None;

        for op in values {
            let v = numeric_operand(op)?;
            match op.comparator {
                Comparator::Eq => point = Some(v),
                Comparator::Gt => low = Some(tighten(low, Bound::exclusive(v), Bound::tighter_lower)),
                Comparator::Gte => low = Some(tighten(low, Bound::inclusive(v), Bound::tighter_lower)),
                Comparator::Lt => high = Some(tighten(high, Bound::exclusive(v), Bound::tighter_upper)),
                Comparator::Lte => high = Some(tighten(high, Bound::inclusive(v), Bound::tighter_upper)),
                Comparator::Neq | Comparator::Contains | Comparator::Like => {
                    return Err(GeneraliseError::unsupported_value(
                        op.to_string(),
                        "comparator does not describe an interval",
                    ));
                }
            }
        }

        Ok(match (point, low, high) {
            (Some(value), _, _) => Self::PointEquality { value },
            (None, None, None) => Self::Unbounded,
            (None, Some(low), None) => Self::LowerBounded { low },
            (None, None, Some(high)) => Self::UpperBounded { high },
            (None, Some(low), Some(high)) => Self::Bounded { low, high },
        })
    }

    /// Widens the range with the default configuration (`k = 2`).
    #[must_use]
    pub fn generalise(&self) -> Self {
        self.generalise_with(&GeneraliseConfig::default())
    }

    /// Widens the range with the given configuration.
    #[must_use]
    pub fn generalise_with(&self, config: &GeneraliseConfig) -> Self {
        let k = config.widening_factor;
        let magnitude = |x: f64| if x == 0.0 { config.zero_width } else { x.abs() };

        match *self {
            Self::Unbounded => Self::Unbounded,
            Self::PointEquality { value } => {
                let delta = magnitude(value) / k;
                Self::Bounded {
                    low: Bound::exclusive(value - delta),
                    high: Bound::exclusive(value + delta),
                }
            }
            Self::LowerBounded { low } => Self::LowerBounded {
                low: Bound {
                    value: low.value - magnitude(low.value) / k,
                    inclusive: low.inclusive,
                },
            },
            Self::UpperBounded { high } => Self::UpperBounded {
                high: Bound {
                    value: high.value + magnitude(high.value) / k,
                    inclusive: high.inclusive,
                },
            },
            Self::Bounded { low, high } => {
                let width = high.value - low.value;
                let width = if width > 0.0 { width } else { config.zero_width };
                let delta = width / k;
                Self::Bounded {
                    low: Bound {
                        value: low.value - delta,
                        inclusive: low.inclusive,
                    },
                    high: Bound {
                        value: high.value + delta,
                        inclusive: high.inclusive,
                    },
                }
            }
        }
    }

    /// Canonical value predicates describing this range.
    #[must_use]
    pub fn to_properties(&self) -> Vec<ThingProperty> {
        let lower = |b: Bound| {
            let cmp = if b.inclusive { Comparator::Gte } else { Comparator::Gt };
            ThingProperty::Value(ValueOperation::literal(cmp, b.value))
        };
        let upper = |b: Bound| {
            let cmp = if b.inclusive { Comparator::Lte } else { Comparator::Lt };
            ThingProperty::Value(ValueOperation::literal(cmp, b.value))
        };
        match *self {
            Self::Unbounded => Vec::new(),
            Self::PointEquality { value } => {
                vec![ThingProperty::Value(ValueOperation::literal(Comparator::Eq, value))]
            }
            Self::LowerBounded { low } => vec![lower(low)],
            Self::UpperBounded { high } => vec![upper(high)],
            Self::Bounded { low, high } => vec![lower(low), upper(high)],
        }
    }

    /// The lower end, treating a point as an inclusive bound.
    #[must_use]
    pub const fn lower(&self) -> Option<Bound> {
        match *self {
            Self::LowerBounded { low } | Self::Bounded { low, .. } => Some(low),
            Self::PointEquality { value } => Some(Bound::inclusive(value)),
            Self::Unbounded | Self::UpperBounded { .. } => None,
        }
    }

    /// The upper end, treating a point as an inclusive bound.
    #[must_use]
    pub const fn upper(&self) -> Option<Bound> {
        match *self {
            Self::UpperBounded { high } | Self::Bounded { high, .. } => Some(high),
            Self::PointEquality { value } => Some(Bound::inclusive(value)),
            Self::Unbounded | Self::LowerBounded { .. } => None,
        }
    }

    /// Returns true if every value in `other` is also in `self`.
    #[must_use]
    pub fn includes(&self, other: &Self) -> bool {
        let lower_ok = match (self.lower(), other.lower()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(a), Some(b)) => a.value < b.value || (a.value == b.value && (a.inclusive || !b.inclusive)),
        };
        let upper_ok = match (self.upper(), other.upper()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(a), Some(b)) => a.value > b.value || (a.value == b.value && (a.inclusive || !b.inclusive)),
        };
        lower_ok && upper_ok
    }
}

fn tighten(current: Option<Bound>, candidate: Bound, pick: fn(Bound, Bound) -> Bound) -> Bound {
    match current {
        Some(existing) => pick(existing, candidate),
        None => candidate,
    }
}

fn numeric_operand(op: &ValueOperation) -> GeneraliseResult<f64> {
    match &op.operand {
        Operand::Literal(lit @ (Literal::Int(_) | Literal::Float(_))) => lit
            .as_float()
            .ok_or_else(|| GeneraliseError::internal("numeric literal without float value")),
        Operand::Literal(lit) => Err(GeneraliseError::unsupported_value(
            op.to_string(),
            format!("{} values have no numeric range", lit.type_name()),
        )),
        Operand::Variable(_) => Err(GeneraliseError::unsupported_value(
            op.to_string(),
            "comparison against a variable",
        )),
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = |b: Bound| if b.inclusive { '[' } else { '(' };
        let close = |b: Bound| if b.inclusive { ']' } else { ')' };
        match *self {
            Self::Unbounded => write!(f, "(-∞, ∞)"),
            Self::PointEquality { value } => write!(f, "{{{value}}}"),
            Self::LowerBounded { low } => write!(f, "{}{}, ∞)", open(low), low.value),
            Self::UpperBounded { high } => write!(f, "(-∞, {}{}", high.value, close(high)),
            Self::Bounded { low, high } => {
                write!(f, "{}{}, {}{}", open(low), low.value, high.value, close(high))
            }
        }
    }
}
