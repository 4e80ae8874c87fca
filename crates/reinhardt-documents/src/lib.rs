//! # Reinhardt Documents
//!
//! Document classes, wire representations and schema validation.
//!
//! ## Document types
//!
//! | Type | Mimetype | Parse |
//! |---|---|---|
//! | [`HtmlDocumentType`] | `text/html` | no |
//! | [`JsonDocumentType`] | `application/{object_type}+json` | yes |
//! | [`TextDocumentType`] | `text/plain` | no |
//! | `YamlDocumentType` (feature `yaml`) | `application/{object_type}+yaml` | yes |
//!
//! Types with an `{object_type}` template are *custom*: they produce one mimetype per
//! registered document class.
//!
//! ## Example
//!
//! ```
//! use reinhardt_documents::{
//!     DirectValidation, DocumentClass, DocumentType, JsonDocumentType, JsonSchemaValidator,
//!     TypedDocument,
//! };
//! use serde::{Deserialize, Serialize};
//! use serde_json::{Value, json};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct SomeData {
//!     string: String,
//!     integer: i64,
//!     somelist: Vec<String>,
//! }
//!
//! impl TypedDocument for SomeData {
//!     const OBJECT_TYPE: &'static str = "somedata";
//!
//!     fn schema() -> Option<Value> {
//!         Some(json!({
//!             "type": "object",
//!             "required": ["string", "integer", "somelist"]
//!         }))
//!     }
//! }
//!
//! let validator = JsonSchemaValidator::new();
//! let validation = DirectValidation::new(&validator);
//! let json = JsonDocumentType::new();
//!
//! let class = DocumentClass::of::<SomeData>();
//! assert_eq!(json.get_mimetype(Some(&class)).unwrap(), "application/somedata+json");
//!
//! let body = br#"{"string": "Hello", "integer": 12, "somelist": ["Foo", "Bar"]}"#;
//! let object: SomeData = json.parse(&validation, &class, body).unwrap().downcast().unwrap();
//! assert_eq!(object.somelist, ["Foo", "Bar"]);
//!
//! assert!(json.parse(&validation, &class, br#"{"string": "Hello"}"#).is_err());
//! ```

pub mod document;
pub mod document_type;
pub mod html;
pub mod json;
pub mod text;
pub mod validator;
#[cfg(feature = "yaml")]
pub mod yaml;

pub use document::{
	DecodedDocument, Document, DocumentClass, DocumentClassBuilder, TypedDocument, document_data,
};
pub use document_type::{DocumentType, OBJECT_TYPE_PLACEHOLDER, default_document_types};
pub use html::{HtmlDocumentType, HtmlOptions};
pub use json::JsonDocumentType;
pub use text::{TextDocumentType, TextOptions};
pub use validator::{
	CompiledSchema, DirectValidation, JsonSchemaValidator, NoValidation, SchemaValidator,
	ValidationContext,
};
#[cfg(feature = "yaml")]
pub use yaml::YamlDocumentType;
