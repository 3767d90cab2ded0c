//! Structured-output schema normalization.
//!
//! The cloud API requires a strict JSON Schema: every object node carries
//! `type: "object"` plus `properties`, every array node carries `type:
//! "array"` plus `items`. Callers are allowed three levels of sophistication:
//!
//! - a named template (see [`templates::SchemaTemplate`])
//! - a full JSON Schema (passed through after validation)
//! - a shorthand example, either `{"name": "string", ...}` or an array of
//!   example objects, which is converted into a schema
//!
//! [`normalize`] collapses all three into the canonical form. It is pure and
//! idempotent: normalizing an already-canonical schema yields it unchanged.

pub mod templates;

use serde_json::{json, Map, Value};

use crate::error::ValidationError;
pub use templates::SchemaTemplate;

/// The JSON Schema type names the service accepts.
const VALID_TYPES: [&str; 6] = ["object", "array", "string", "number", "boolean", "null"];

/// A caller-supplied schema specification.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaSpec {
    /// One of the fixed named templates.
    Template(SchemaTemplate),
    /// A raw value: a full JSON Schema, a shorthand example object, or an
    /// array of example objects.
    Raw(Value),
}

impl SchemaSpec {
    /// Resolve a template by name (unknown names fall back to `product`).
    pub fn template(name: &str) -> Self {
        SchemaSpec::Template(SchemaTemplate::from_name(name))
    }

    /// Wrap a raw schema value.
    pub fn raw(value: Value) -> Self {
        SchemaSpec::Raw(value)
    }
}

/// How a single property value in a shorthand example is interpreted.
///
/// Classification happens structurally, once, at the boundary; the recursive
/// conversion below is total over this union.
enum Fragment<'a> {
    /// A bare primitive-type name, e.g. `"string"`.
    PrimitiveName(&'a str),
    /// A nested example object without its own `type` key.
    NestedExample(&'a Map<String, Value>),
    /// Anything else: assumed to already be a well-formed schema fragment.
    AlreadySchema(&'a Value),
}

fn classify(value: &Value) -> Fragment<'_> {
    match value {
        Value::String(name) => Fragment::PrimitiveName(name),
        Value::Object(map) if !map.contains_key("type") => Fragment::NestedExample(map),
        other => Fragment::AlreadySchema(other),
    }
}

/// Convert a shorthand example's properties into schema fragments.
fn convert_properties(example: &Map<String, Value>) -> Map<String, Value> {
    example
        .iter()
        .map(|(key, value)| {
            let converted = match classify(value) {
                Fragment::PrimitiveName(name) => json!({ "type": name }),
                Fragment::NestedExample(nested) => json!({
                    "type": "object",
                    "properties": convert_properties(nested),
                }),
                Fragment::AlreadySchema(fragment) => fragment.clone(),
            };
            (key.clone(), converted)
        })
        .collect()
}

fn keys_of(map: &Map<String, Value>) -> Value {
    Value::Array(map.keys().cloned().map(Value::String).collect())
}

/// Normalize a schema specification into the canonical JSON Schema the
/// service accepts.
///
/// Pure function, no side effects. Fails with a [`ValidationError`] when the
/// raw input is not an object or array, is an empty array, declares an
/// unrecognized `type`, or declares `object`/`array` without
/// `properties`/`items`.
pub fn normalize(spec: &SchemaSpec) -> Result<Value, ValidationError> {
    match spec {
        SchemaSpec::Template(template) => Ok(template.schema()),
        SchemaSpec::Raw(value) => normalize_raw(value),
    }
}

fn normalize_raw(value: &Value) -> Result<Value, ValidationError> {
    match value {
        // Array of example objects: the first element defines the item shape.
        Value::Array(items) => {
            let first = match items.first() {
                Some(Value::Object(map)) => map,
                Some(_) => return Err(ValidationError::ExampleItemNotObject),
                None => return Err(ValidationError::EmptyExampleArray),
            };
            Ok(json!({
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": convert_properties(first),
                    "required": keys_of(first),
                }
            }))
        }
        Value::Object(map) => match map.get("type") {
            // Already claims to be a JSON Schema: validate the basics, then
            // tidy up object properties so shorthand fragments inside a real
            // schema still come out canonical.
            Some(Value::String(declared)) => {
                if !VALID_TYPES.contains(&declared.as_str()) {
                    return Err(ValidationError::UnknownSchemaType(declared.clone()));
                }
                match declared.as_str() {
                    "object" => match map.get("properties") {
                        Some(Value::Object(properties)) => {
                            let mut canonical = map.clone();
                            canonical.insert(
                                "properties".to_string(),
                                Value::Object(convert_properties(properties)),
                            );
                            Ok(Value::Object(canonical))
                        }
                        _ => Err(ValidationError::ObjectWithoutProperties),
                    },
                    "array" => {
                        if map.contains_key("items") {
                            Ok(value.clone())
                        } else {
                            Err(ValidationError::ArrayWithoutItems)
                        }
                    }
                    // Primitive types pass through unchanged.
                    _ => Ok(value.clone()),
                }
            }
            Some(other) => Err(ValidationError::UnknownSchemaType(other.to_string())),
            // Bare example object: wrap it into an object schema with every
            // top-level key required.
            None => Ok(json!({
                "type": "object",
                "properties": convert_properties(map),
                "required": keys_of(map),
            })),
        },
        _ => Err(ValidationError::SchemaNotObjectOrArray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize_value(value: Value) -> Value {
        normalize(&SchemaSpec::Raw(value)).expect("normalization should succeed")
    }

    #[test]
    fn shorthand_object_becomes_object_schema() {
        let canonical = normalize_value(json!({ "name": "string", "age": "number" }));
        assert_eq!(canonical["type"], "object");
        assert_eq!(canonical["properties"]["name"], json!({ "type": "string" }));
        assert_eq!(canonical["properties"]["age"], json!({ "type": "number" }));
        let required = canonical["required"].as_array().unwrap();
        assert_eq!(required.len(), 2);
        assert!(required.contains(&json!("name")));
        assert!(required.contains(&json!("age")));
    }

    #[test]
    fn nested_example_objects_recurse() {
        let canonical = normalize_value(json!({
            "name": "string",
            "address": { "street": "string", "zip": "string" }
        }));
        let address = &canonical["properties"]["address"];
        assert_eq!(address["type"], "object");
        assert_eq!(
            address["properties"]["street"],
            json!({ "type": "string" })
        );
        // Nested examples do not get their own required list.
        assert!(address.get("required").is_none());
    }

    #[test]
    fn array_of_examples_uses_first_element() {
        let canonical = normalize_value(json!([
            { "title": "string" },
            { "ignored": "boolean" }
        ]));
        assert_eq!(canonical["type"], "array");
        assert_eq!(canonical["items"]["type"], "object");
        assert_eq!(
            canonical["items"]["properties"]["title"],
            json!({ "type": "string" })
        );
        assert_eq!(canonical["items"]["required"], json!(["title"]));
        assert!(canonical["items"]["properties"].get("ignored").is_none());
    }

    #[test]
    fn full_schema_passes_through_with_properties_tidied() {
        let canonical = normalize_value(json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "count": "number"
            },
            "required": ["title"]
        }));
        assert_eq!(canonical["properties"]["title"], json!({ "type": "string" }));
        assert_eq!(canonical["properties"]["count"], json!({ "type": "number" }));
        // Caller-declared required list is preserved, not regenerated.
        assert_eq!(canonical["required"], json!(["title"]));
    }

    #[test]
    fn normalize_is_idempotent() {
        let inputs = [
            json!({ "name": "string", "nested": { "inner": "boolean" } }),
            json!([{ "a": "string", "b": "number" }]),
            json!({
                "type": "object",
                "properties": { "x": "string" },
                "required": ["x"]
            }),
            json!({ "type": "string" }),
        ];
        for input in inputs {
            let once = normalize_value(input);
            let twice = normalize_value(once.clone());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn templates_normalize_to_themselves() {
        for template in SchemaTemplate::ALL {
            let canonical = normalize(&SchemaSpec::Template(template)).unwrap();
            assert_eq!(normalize_value(canonical.clone()), canonical);
        }
    }

    #[test]
    fn template_required_is_subset_of_properties() {
        for template in SchemaTemplate::ALL {
            let canonical = normalize(&SchemaSpec::Template(template)).unwrap();
            let properties = canonical["properties"].as_object().unwrap();
            let required = canonical["required"].as_array().unwrap();
            for key in required {
                let key = key.as_str().unwrap();
                assert!(
                    properties.contains_key(key),
                    "template {} requires unknown property {}",
                    template.name(),
                    key
                );
            }
        }
    }

    #[test]
    fn unknown_template_name_resolves_to_product() {
        let fallback = normalize(&SchemaSpec::template("no-such-template")).unwrap();
        let product = normalize(&SchemaSpec::Template(SchemaTemplate::Product)).unwrap();
        assert_eq!(fallback, product);
    }

    #[test]
    fn scalar_input_is_rejected() {
        let err = normalize(&SchemaSpec::Raw(json!("string"))).unwrap_err();
        assert_eq!(err, ValidationError::SchemaNotObjectOrArray);
        let err = normalize(&SchemaSpec::Raw(Value::Null)).unwrap_err();
        assert_eq!(err, ValidationError::SchemaNotObjectOrArray);
    }

    #[test]
    fn empty_example_array_is_rejected() {
        let err = normalize(&SchemaSpec::Raw(json!([]))).unwrap_err();
        assert_eq!(err, ValidationError::EmptyExampleArray);
    }

    #[test]
    fn non_object_array_item_is_rejected() {
        let err = normalize(&SchemaSpec::Raw(json!(["string"]))).unwrap_err();
        assert_eq!(err, ValidationError::ExampleItemNotObject);
    }

    #[test]
    fn unknown_declared_type_is_rejected() {
        let err = normalize(&SchemaSpec::Raw(json!({ "type": "integer" }))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownSchemaType("integer".to_string())
        );
    }

    #[test]
    fn object_without_properties_is_rejected() {
        let err = normalize(&SchemaSpec::Raw(json!({ "type": "object" }))).unwrap_err();
        assert_eq!(err, ValidationError::ObjectWithoutProperties);
    }

    #[test]
    fn array_without_items_is_rejected() {
        let err = normalize(&SchemaSpec::Raw(json!({ "type": "array" }))).unwrap_err();
        assert_eq!(err, ValidationError::ArrayWithoutItems);
    }

    #[test]
    fn primitive_schema_passes_through() {
        let canonical = normalize_value(json!({ "type": "string" }));
        assert_eq!(canonical, json!({ "type": "string" }));
    }
}
