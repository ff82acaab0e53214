//! JSON schema generation for tool parameters.
//!
//! Tool arguments derive `schemars::JsonSchema`; the chat-completions
//! protocol wants a self-contained object schema, so the generated root is
//! stripped of meta keys and every `$ref` is inlined from `definitions`.

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Types usable as tool arguments.
///
/// Blanket-implemented for anything that is `JsonSchema + DeserializeOwned`.
pub trait ToolParameters: JsonSchema + DeserializeOwned {
    /// Inlined object schema suitable for the `parameters` field of a function tool.
    fn parameters_schema() -> Value {
        let mut value = serde_json::to_value(schema_for!(Self)).unwrap_or_default();

        let definitions = value.get("definitions").cloned();
        if let Some(defs) = definitions {
            inline_refs(&mut value, &defs);
        }

        if let Value::Object(map) = &mut value {
            map.remove("$schema");
            map.remove("definitions");
            map.remove("title");
            if map.get("type") == Some(&Value::String("object".into())) {
                map.insert("additionalProperties".into(), Value::Bool(false));
            }
        }

        value
    }
}

impl<T: JsonSchema + DeserializeOwned> ToolParameters for T {}

fn inline_refs(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            let target = map
                .get("$ref")
                .and_then(Value::as_str)
                .and_then(|r| r.strip_prefix("#/definitions/"))
                .and_then(|name| definitions.get(name))
                .cloned();

            if let Some(def) = target {
                *value = def;
                inline_refs(value, definitions);
                return;
            }

            for (_, v) in map.iter_mut() {
                inline_refs(v, definitions);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                inline_refs(item, definitions);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    struct FetchArgs {
        /// Page to fetch
        url: String,
    }

    #[derive(Deserialize, JsonSchema)]
    struct Window {
        from: String,
        to: String,
    }

    #[derive(Deserialize, JsonSchema)]
    struct SearchArgs {
        query: String,
        window: Window,
    }

    #[test]
    fn test_flat_schema_has_no_meta_keys() {
        let schema = FetchArgs::parameters_schema();
        let obj = schema.as_object().unwrap();

        assert!(!obj.contains_key("$schema"));
        assert!(!obj.contains_key("title"));
        assert_eq!(obj["type"], "object");
        assert_eq!(obj["additionalProperties"], false);
        assert!(obj["properties"].get("url").is_some());
    }

    #[test]
    fn test_nested_refs_are_inlined() {
        let schema = SearchArgs::parameters_schema();
        let text = serde_json::to_string(&schema).unwrap();

        assert!(!text.contains("$ref"), "refs should be inlined: {}", text);
        assert!(schema.get("definitions").is_none());
        assert_eq!(schema["properties"]["window"]["type"], "object");
    }
}
