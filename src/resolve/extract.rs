//! Typed access to fields of an upstream JSON document.
//!
//! Paths are dotted (`engines.thrust_sea_level.kN`). Every accessor tells a
//! missing field apart from a field that is present with the wrong type, and
//! reports the full path so a changed upstream schema is easy to pin down.

use serde_json::Value;

use crate::model::ExtractError;

/// Short name of a JSON value's type, for error messages.
pub fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn wrong_type(path: &str, expected: &'static str, found: &Value) -> ExtractError {
    ExtractError::WrongType {
        path: path.to_string(),
        expected,
        found: kind(found),
    }
}

/// Walks `path` from `root`. Every intermediate value must be an object.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Result<&'a Value, ExtractError> {
    let mut current = root;
    let mut walked = String::new();

    for segment in path.split('.') {
        let parent_path = walked.clone();
        if !walked.is_empty() {
            walked.push('.');
        }
        walked.push_str(segment);

        let object = match current.as_object() {
            Some(object) => object,
            None => {
                let at = if parent_path.is_empty() { "<root>" } else { parent_path.as_str() };
                return Err(wrong_type(at, "object", current));
            }
        };
        current = object
            .get(segment)
            .ok_or_else(|| ExtractError::MissingField { path: walked.clone() })?;
    }

    Ok(current)
}

pub fn number(root: &Value, path: &str) -> Result<f64, ExtractError> {
    let value = lookup(root, path)?;
    value.as_f64().ok_or_else(|| wrong_type(path, "number", value))
}

/// A number that must be present but may be an explicit `null`.
pub fn nullable_number(root: &Value, path: &str) -> Result<Option<f64>, ExtractError> {
    match lookup(root, path)? {
        Value::Null => Ok(None),
        value => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| wrong_type(path, "number or null", value)),
    }
}

/// A number whose last path segment may be absent or `null`.
///
/// Parents must still exist: only the leaf is optional.
pub fn optional_number(root: &Value, path: &str) -> Result<Option<f64>, ExtractError> {
    match lookup(root, path) {
        Ok(Value::Null) => Ok(None),
        Ok(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| wrong_type(path, "number", value)),
        Err(ExtractError::MissingField { path: missing }) if missing == path => Ok(None),
        Err(e) => Err(e),
    }
}

pub fn count(root: &Value, path: &str) -> Result<u32, ExtractError> {
    let value = lookup(root, path)?;
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| wrong_type(path, "non-negative integer", value))
}

pub fn string(root: &Value, path: &str) -> Result<String, ExtractError> {
    let value = lookup(root, path)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| wrong_type(path, "string", value))
}

pub fn boolean(root: &Value, path: &str) -> Result<bool, ExtractError> {
    let value = lookup(root, path)?;
    value.as_bool().ok_or_else(|| wrong_type(path, "boolean", value))
}

pub fn array<'a>(root: &'a Value, path: &str) -> Result<&'a Vec<Value>, ExtractError> {
    let value = lookup(root, path)?;
    value.as_array().ok_or_else(|| wrong_type(path, "array", value))
}

pub fn string_list(root: &Value, path: &str) -> Result<Vec<String>, ExtractError> {
    array(root, path)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| wrong_type(&format!("{}[{}]", path, i), "string", item))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "name": "Falcon 9",
            "stages": 2,
            "engines": { "thrust_sea_level": { "kN": 7607 }, "type": "merlin" },
            "first_stage": { "fuel_amount_tons": null, "burn_time_sec": 162, "reusable": true },
            "second_stage": { "burn_time_sec": null },
            "flickr_images": ["https://a", "https://b"],
            "mass": "heavy"
        })
    }

    #[test]
    fn test_nested_number_lookup() {
        assert_eq!(number(&sample(), "engines.thrust_sea_level.kN"), Ok(7607.0));
    }

    #[test]
    fn test_missing_field_reports_full_path() {
        let err = number(&sample(), "engines.thrust_vacuum.kN").unwrap_err();
        assert_eq!(err, ExtractError::MissingField { path: "engines.thrust_vacuum".into() });
    }

    #[test]
    fn test_wrong_type_is_distinct_from_missing() {
        let err = string(&sample(), "stages").unwrap_err();
        assert_eq!(
            err,
            ExtractError::WrongType { path: "stages".into(), expected: "string", found: "number" }
        );
    }

    #[test]
    fn test_indexing_through_a_scalar_is_wrong_type() {
        let err = number(&sample(), "mass.kg").unwrap_err();
        assert_eq!(
            err,
            ExtractError::WrongType { path: "mass".into(), expected: "object", found: "string" }
        );
    }

    #[test]
    fn test_non_object_root_is_wrong_type() {
        let err = lookup(&json!([1, 2]), "name").unwrap_err();
        assert_eq!(err.path(), "<root>");
    }

    #[test]
    fn test_optional_number_accepts_null_and_absent_leaf() {
        let doc = sample();
        assert_eq!(optional_number(&doc, "first_stage.fuel_amount_tons"), Ok(None));
        assert_eq!(optional_number(&doc, "first_stage.oxidizer_tons"), Ok(None));
        assert_eq!(optional_number(&doc, "first_stage.burn_time_sec"), Ok(Some(162.0)));
    }

    #[test]
    fn test_optional_number_still_requires_parent() {
        let err = optional_number(&sample(), "third_stage.fuel_amount_tons").unwrap_err();
        assert_eq!(err, ExtractError::MissingField { path: "third_stage".into() });
    }

    #[test]
    fn test_nullable_number_requires_key() {
        let doc = sample();
        assert_eq!(nullable_number(&doc, "second_stage.burn_time_sec"), Ok(None));
        assert!(nullable_number(&doc, "second_stage.thrust").is_err());
    }

    #[test]
    fn test_count_rejects_fractional_and_negative() {
        assert!(count(&json!({"n": 2.5}), "n").is_err());
        assert!(count(&json!({"n": -1}), "n").is_err());
        assert_eq!(count(&json!({"n": 9}), "n"), Ok(9));
    }

    #[test]
    fn test_string_list_reports_offending_index() {
        let err = string_list(&json!({"imgs": ["a", 3]}), "imgs").unwrap_err();
        assert_eq!(err.path(), "imgs[1]");
        assert_eq!(string_list(&sample(), "flickr_images").unwrap().len(), 2);
    }

    #[test]
    fn test_boolean_lookup() {
        assert_eq!(boolean(&sample(), "first_stage.reusable"), Ok(true));
    }
}
