//! Pattern serialization helpers.
//!
//! Verification harnesses persist failing patterns for replay; these helpers
//! keep the JSON format in one place.

use crate::error::{GeneraliseError, GeneraliseResult};

use super::conjunction::Conjunction;

/// Serialize a conjunction to pretty JSON.
pub fn to_json_pretty(pattern: &Conjunction) -> GeneraliseResult<String> {
    serde_json::to_string_pretty(pattern)
        .map_err(|e| GeneraliseError::internal(format!("serialize pattern: {e}")))
}

/// Deserialize a conjunction from JSON.
///
/// Callers should then invoke [`Conjunction::validate`] before handing the
/// pattern to an operator.
pub fn from_json(s: &str) -> GeneraliseResult<Conjunction> {
    serde_json::from_str::<Conjunction>(s)
        .map_err(|e| GeneraliseError::internal(format!("deserialize pattern: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{and, anon, type_var, var, Variable};

    #[test]
    fn test_json_roundtrip() {
        let pattern = and([
            Variable::from(
                var("r")
                    .rel_role("employee", var("x"))
                    .rel_role(var("role"), var("y"))
                    .isa_explicit("employment"),
            ),
            Variable::from(var("x").iid("0x1").has("age", anon().gt(16).lt(64.5))),
            Variable::from(var("y").neq(var("x")).has("name", var("n"))),
            Variable::from(type_var("t").label("person")),
        ]);

        let json = to_json_pretty(&pattern).unwrap();
        let decoded = from_json(&json).unwrap();
        assert_eq!(pattern, decoded);
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = from_json("{ not json").unwrap_err();
        assert!(err.is_internal());
    }
}
