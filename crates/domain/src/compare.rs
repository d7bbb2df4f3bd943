//! Structural deep equality over JSON values.
//!
//! Object key order is irrelevant; array element order is significant.
//! A mismatch reports the JSON-pointer path of the first divergence so
//! failures in large payloads stay readable.

use serde_json::Value;

/// The first point at which two JSON values diverge.
#[derive(Debug, Clone, PartialEq)]
pub struct Divergence {
    /// JSON-pointer style path of the divergence (`/data/hero/name`).
    pub path: String,
    /// What the fixture expected at the path.
    pub expected: Value,
    /// What the payload actually held at the path.
    pub actual: Value,
}

/// Compares two JSON values structurally.
///
/// # Errors
///
/// Returns the first [`Divergence`] between `actual` and `expected`.
pub fn deep_compare(actual: &Value, expected: &Value) -> Result<(), Divergence> {
    compare_at(actual, expected, String::new())
}

fn compare_at(actual: &Value, expected: &Value, path: String) -> Result<(), Divergence> {
    match (actual, expected) {
        (Value::Object(actual_map), Value::Object(expected_map)) => {
            for (key, expected_value) in expected_map {
                let child = format!("{path}/{key}");
                match actual_map.get(key) {
                    Some(actual_value) => compare_at(actual_value, expected_value, child)?,
                    None => {
                        return Err(Divergence {
                            path: child,
                            expected: expected_value.clone(),
                            actual: Value::Null,
                        });
                    }
                }
            }
            for (key, actual_value) in actual_map {
                if !expected_map.contains_key(key) {
                    return Err(Divergence {
                        path: format!("{path}/{key}"),
                        expected: Value::Null,
                        actual: actual_value.clone(),
                    });
                }
            }
            Ok(())
        }
        (Value::Array(actual_items), Value::Array(expected_items)) => {
            if actual_items.len() != expected_items.len() {
                return Err(Divergence {
                    path,
                    expected: expected.clone(),
                    actual: actual.clone(),
                });
            }
            for (index, (actual_item, expected_item)) in
                actual_items.iter().zip(expected_items).enumerate()
            {
                compare_at(actual_item, expected_item, format!("{path}/{index}"))?;
            }
            Ok(())
        }
        (actual, expected) if actual == expected => Ok(()),
        (actual, expected) => Err(Divergence {
            path,
            expected: expected.clone(),
            actual: actual.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_reflexive() {
        let value = json!({"a": [1, {"b": null}], "c": "x"});
        assert_eq!(deep_compare(&value, &value), Ok(()));
    }

    #[test]
    fn test_object_key_order_is_irrelevant() {
        let left: Value = serde_json::from_str(r#"{"a":1,"b":2}"#).expect("valid");
        let right: Value = serde_json::from_str(r#"{"b":2,"a":1}"#).expect("valid");
        assert_eq!(deep_compare(&left, &right), Ok(()));
    }

    #[test]
    fn test_array_order_is_significant() {
        let result = deep_compare(&json!([1, 2]), &json!([2, 1]));
        let divergence = result.expect_err("arrays differ");
        assert_eq!(divergence.path, "/0");
    }

    #[test]
    fn test_reports_path_of_first_divergence() {
        let actual = json!({"data": {"hero": {"name": "R2-D2"}}});
        let expected = json!({"data": {"hero": {"name": "C-3PO"}}});
        let divergence = deep_compare(&actual, &expected).expect_err("names differ");
        assert_eq!(divergence.path, "/data/hero/name");
        assert_eq!(divergence.expected, json!("C-3PO"));
        assert_eq!(divergence.actual, json!("R2-D2"));
    }

    #[test]
    fn test_missing_key_diverges() {
        let divergence =
            deep_compare(&json!({}), &json!({"hero": {"name": "R2-D2"}})).expect_err("missing");
        assert_eq!(divergence.path, "/hero");
        assert_eq!(divergence.actual, Value::Null);
    }

    #[test]
    fn test_extra_key_diverges() {
        let divergence =
            deep_compare(&json!({"hero": 1, "droid": 2}), &json!({"hero": 1})).expect_err("extra");
        assert_eq!(divergence.path, "/droid");
    }

    #[test]
    fn test_array_length_mismatch() {
        let divergence = deep_compare(&json!([1]), &json!([1, 2])).expect_err("lengths differ");
        assert_eq!(divergence.path, "");
    }

    #[test]
    fn test_number_representations_compare_by_value() {
        assert_eq!(deep_compare(&json!(1.0), &json!(1.0)), Ok(()));
        assert!(deep_compare(&json!(1), &json!(2)).is_err());
    }
}
