//! Numeric attribute widening.
//!
//! For every owned attribute whose value predicates fold into a numeric
//! [`Range`], the predicates are either kept or replaced by the widened
//! range. Attributes that cannot be folded (strings, `!=`, comparisons with
//! another variable) are left exactly as they are.

use crate::config::GeneraliseConfig;
use crate::context::TypeContext;
use crate::error::{ConfigError, GeneraliseResult};
use crate::pattern::{Conjunction, ThingProperty, ThingVariable, Variable};
use crate::range::Range;

use super::{expand, nothing, Alternatives, Generalisations, Operator, OperatorKind};

/// Widens numeric value predicates on owned attributes.
#[derive(Debug, Clone, Default)]
pub struct GeneraliseAttribute {
    config: GeneraliseConfig,
}

impl GeneraliseAttribute {
    /// Creates the operator with a custom widening configuration.
    ///
    /// # Errors
    ///
    /// Returns the config's validation error.
    pub fn new(config: GeneraliseConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The widening configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GeneraliseConfig {
        &self.config
    }

    /// The widened `has` property, or `None` if `property` cannot be widened.
    fn widen(&self, property: &ThingProperty) -> GeneraliseResult<Option<ThingProperty>> {
        let ThingProperty::Has {
            attribute_type,
            attribute,
        } = property
        else {
            return Ok(None);
        };

        let range = match Range::create(attribute.values()) {
            Ok(range) => range,
            Err(e) if e.is_recoverable() => return Ok(None),
            Err(e) => return Err(e),
        };
        let widened = range.generalise_with(&self.config);
        if widened == range {
            return Ok(None);
        }

        let kept = attribute.properties().iter().filter(|p| !p.is_value()).cloned();
        let attribute = attribute
            .without_properties()
            .with_properties(kept.chain(widened.to_properties()));
        Ok(Some(ThingProperty::has(attribute_type.clone(), attribute)))
    }

    fn alternatives<'a>(&self, thing: &'a ThingVariable) -> GeneraliseResult<Alternatives<'a>> {
        let mut choices = Vec::new();
        for (index, property) in thing.properties().iter().enumerate() {
            if let Some(widened) = self.widen(property)? {
                choices.push((index, vec![Some(property.clone()), Some(widened)]));
            }
        }
        Ok(Alternatives::properties(thing, choices))
    }
}

impl Operator for GeneraliseAttribute {
    fn kind(&self) -> OperatorKind {
        OperatorKind::GeneraliseAttribute
    }

    fn apply<'a>(
        &self,
        src: &'a Conjunction,
        _ctx: &'a dyn TypeContext,
    ) -> GeneraliseResult<Generalisations<'a>> {
        src.validate()?;

        let mut alternatives = Vec::with_capacity(src.len());
        let mut widenable = false;
        for statement in src.variables() {
            match statement {
                Variable::Thing(thing) => {
                    let alts = self.alternatives(thing)?;
                    widenable |= alts.has_choice();
                    alternatives.push(alts);
                }
                Variable::Type(_) => alternatives.push(Alternatives::unchanged(statement)),
            }
        }

        if !widenable {
            return Ok(nothing());
        }
        Ok(expand(src, alternatives, false))
    }
}
