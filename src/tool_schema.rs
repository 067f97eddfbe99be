//! Tool parameter schemas: discovery info and request validation.
//!
//! Tools describe their parameters with an OpenAI function-calling style
//! JSON Schema. Incoming parameters are checked against that schema before
//! a tool runs, on both the REST and MCP surfaces.

use anyhow::{bail, Result};
use serde::Serialize;

/// Serializable tool info for the `/tools/list` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    /// `true` for tools shipped with the binary.
    pub builtin: bool,
    /// OpenAI function-calling JSON Schema.
    pub parameters: serde_json::Value,
}

/// Validate `params` against `schema` and inject declared defaults.
///
/// Checks required fields, primitive `type`s, and `enum` membership.
/// Returns the parameter object with defaults filled in.
pub fn validate_params(
    schema: &serde_json::Value,
    params: &serde_json::Value,
) -> Result<serde_json::Value> {
    let params_obj = match params {
        serde_json::Value::Object(map) => map.clone(),
        serde_json::Value::Null => serde_json::Map::new(),
        other => bail!("parameters must be a JSON object, got {}", json_type_name(other)),
    };

    let properties = schema
        .get("properties")
        .and_then(|p| p.as_object())
        .cloned()
        .unwrap_or_default();

    let required: Vec<&str> = schema
        .get("required")
        .and_then(|r| r.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_str()).collect())
        .unwrap_or_default();

    for req_field in &required {
        if !params_obj.contains_key(*req_field) {
            bail!("missing required parameter: {}", req_field);
        }
    }

    let mut result = params_obj.clone();

    for (prop_name, prop_schema) in &properties {
        let Some(value) = params_obj.get(prop_name) else {
            if let Some(default) = prop_schema.get("default") {
                result.insert(prop_name.clone(), default.clone());
            }
            continue;
        };

        // Explicit null on an optional parameter means "not given".
        if value.is_null() && !required.contains(&prop_name.as_str()) {
            result.remove(prop_name);
            continue;
        }

        if let Some(expected_type) = prop_schema.get("type").and_then(|t| t.as_str()) {
            let type_ok = match expected_type {
                "string" => value.is_string(),
                "integer" => value.is_i64() || value.is_u64(),
                "number" => value.is_number(),
                "boolean" => value.is_boolean(),
                "array" => value.is_array(),
                "object" => value.is_object(),
                _ => true,
            };
            if !type_ok {
                bail!(
                    "parameter '{}' must be of type '{}', got {}",
                    prop_name,
                    expected_type,
                    json_type_name(value)
                );
            }
        }

        if let Some(enum_values) = prop_schema.get("enum").and_then(|e| e.as_array()) {
            if !enum_values.contains(value) {
                let allowed: Vec<String> = enum_values.iter().map(|v| v.to_string()).collect();
                bail!(
                    "parameter '{}' must be one of [{}], got {}",
                    prop_name,
                    allowed.join(", "),
                    value
                );
            }
        }
    }

    Ok(serde_json::Value::Object(result))
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "topic": { "type": "string" },
                "save": { "type": "boolean", "default": false },
                "mode": { "type": "string", "enum": ["combined", "split"] }
            },
            "required": ["topic"]
        })
    }

    #[test]
    fn injects_defaults() {
        let out = validate_params(&schema(), &json!({ "topic": "arts" })).unwrap();
        assert_eq!(out["save"], false);
        assert!(out.get("mode").is_none());
    }

    #[test]
    fn missing_required() {
        let err = validate_params(&schema(), &json!({})).unwrap_err();
        assert_eq!(err.to_string(), "missing required parameter: topic");
    }

    #[test]
    fn wrong_type() {
        let err = validate_params(&schema(), &json!({ "topic": 5 })).unwrap_err();
        assert!(err.to_string().contains("must be of type 'string', got number"));
    }

    #[test]
    fn enum_membership() {
        let err =
            validate_params(&schema(), &json!({ "topic": "a", "mode": "both" })).unwrap_err();
        assert!(err.to_string().contains("must be one of"));
    }

    #[test]
    fn null_optional_is_dropped() {
        let out = validate_params(&schema(), &json!({ "topic": "a", "mode": null })).unwrap();
        assert!(out.get("mode").is_none());
    }

    #[test]
    fn non_object_params_rejected() {
        assert!(validate_params(&schema(), &json!("arts")).is_err());
    }
}
