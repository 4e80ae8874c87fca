//! Schema validation
//!
//! A [`SchemaValidator`] compiles the schema of a document class once; the resulting
//! [`CompiledSchema`] validates payloads. Document types do not talk to validators
//! directly: they call a [`ValidationContext`], which knows which compiled schema
//! belongs to which class.

use std::fmt;
use std::sync::Arc;

use reinhardt_mime_exception::{MimeError, MimeResult};
use serde_json::Value;

use crate::document::DocumentClass;

/// Compiles schemas into reusable validators.
pub trait SchemaValidator: Send + Sync + fmt::Debug {
	/// Compiles `schema`. An invalid schema is a configuration error.
	fn compile(&self, schema: &Value) -> MimeResult<Arc<dyn CompiledSchema>>;
}

/// A compiled schema.
pub trait CompiledSchema: Send + Sync + fmt::Debug {
	/// Fails with [`MimeError::Validation`] when `data` does not match.
	fn validate(&self, data: &Value) -> MimeResult<()>;
}

/// Validation hook handed to document types while parsing and rendering.
pub trait ValidationContext {
	/// Validates `data` against the schema of `class`. Classes without a schema pass.
	fn validate(&self, class: &DocumentClass, data: &Value) -> MimeResult<()>;
}

/// A context that accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoValidation;

impl ValidationContext for NoValidation {
	fn validate(&self, _class: &DocumentClass, _data: &Value) -> MimeResult<()> {
		Ok(())
	}
}

/// A context that compiles the class schema on every call.
///
/// Meant for one-off use of a document type; the registry caches compiled schemas instead.
#[derive(Debug, Clone, Copy)]
pub struct DirectValidation<'a> {
	validator: &'a dyn SchemaValidator,
}

impl<'a> DirectValidation<'a> {
	pub fn new(validator: &'a dyn SchemaValidator) -> Self {
		Self { validator }
	}
}

impl ValidationContext for DirectValidation<'_> {
	fn validate(&self, class: &DocumentClass, data: &Value) -> MimeResult<()> {
		match class.schema() {
			Some(schema) => self.validator.compile(schema)?.validate(data),
			None => Ok(()),
		}
	}
}

/// JSON Schema validation backed by the `jsonschema` crate.
///
/// # Examples
///
/// ```
/// use reinhardt_documents::{JsonSchemaValidator, SchemaValidator};
/// use serde_json::json;
///
/// let schema = JsonSchemaValidator::new()
///     .compile(&json!({"type": "object", "required": ["message"]}))
///     .unwrap();
///
/// assert!(schema.validate(&json!({"message": "ok"})).is_ok());
/// assert!(schema.validate(&json!({})).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator;

impl JsonSchemaValidator {
	pub fn new() -> Self {
		Self
	}
}

impl SchemaValidator for JsonSchemaValidator {
	fn compile(&self, schema: &Value) -> MimeResult<Arc<dyn CompiledSchema>> {
		let validator = jsonschema::validator_for(schema)
			.map_err(|e| MimeError::Configuration(format!("invalid schema: {}", e)))?;
		Ok(Arc::new(JsonSchema { validator }))
	}
}

struct JsonSchema {
	validator: jsonschema::Validator,
}

impl CompiledSchema for JsonSchema {
	fn validate(&self, data: &Value) -> MimeResult<()> {
		let errors: Vec<String> = self
			.validator
			.iter_errors(data)
			.map(|e| {
				let path = e.instance_path.to_string();
				if path.is_empty() {
					e.to_string()
				} else {
					format!("{}: {}", path, e)
				}
			})
			.collect();

		if errors.is_empty() {
			Ok(())
		} else {
			Err(MimeError::Validation(errors.join("; ")))
		}
	}
}

impl fmt::Debug for JsonSchema {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("JsonSchema").finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use rstest::{fixture, rstest};
	use serde_json::json;

	use super::*;

	#[fixture]
	fn somedata_schema() -> Arc<dyn CompiledSchema> {
		JsonSchemaValidator::new()
			.compile(&json!({
				"type": "object",
				"properties": {
					"string": {"type": "string"},
					"integer": {"type": "number"},
					"somelist": {"type": "array"}
				},
				"required": ["string", "integer", "somelist"]
			}))
			.unwrap()
	}

	#[rstest]
	fn test_valid_payload(somedata_schema: Arc<dyn CompiledSchema>) {
		let data = json!({"string": "Hello", "integer": 12, "somelist": ["Foo", "Bar"]});
		assert!(somedata_schema.validate(&data).is_ok());
	}

	#[rstest]
	fn test_missing_fields(somedata_schema: Arc<dyn CompiledSchema>) {
		let result = somedata_schema.validate(&json!({"string": "Hello"}));
		match result {
			Err(MimeError::Validation(message)) => {
				assert!(message.contains("integer"));
				assert!(message.contains("somelist"));
			}
			other => panic!("Expected validation error, got {:?}", other),
		}
	}

	#[rstest]
	fn test_wrong_type_reports_path(somedata_schema: Arc<dyn CompiledSchema>) {
		let data = json!({"string": 1, "integer": 12, "somelist": []});
		let result = somedata_schema.validate(&data);
		assert!(matches!(result, Err(MimeError::Validation(msg)) if msg.contains("/string")));
	}

	#[rstest]
	fn test_invalid_schema_is_configuration_error() {
		let result = JsonSchemaValidator::new().compile(&json!({"type": 12}));
		assert!(matches!(result, Err(MimeError::Configuration(_))));
	}

	#[rstest]
	fn test_direct_validation_skips_classes_without_schema() {
		let class = DocumentClass::builder("Free").object_type("free").build();
		let validator = JsonSchemaValidator::new();
		let context = DirectValidation::new(&validator);
		assert!(context.validate(&class, &json!("anything")).is_ok());
	}

	#[rstest]
	fn test_direct_validation_uses_class_schema() {
		let class = DocumentClass::builder("Named")
			.object_type("named")
			.schema(json!({"type": "object", "required": ["name"]}))
			.build();
		let validator = JsonSchemaValidator::new();
		let context = DirectValidation::new(&validator);
		assert!(context.validate(&class, &json!({"name": "x"})).is_ok());
		assert!(context.validate(&class, &json!({})).is_err());
	}
}
