//! JSON document type
//!
//! Every registered class gets its own mimetype, `application/{object_type}+json`.

use bytes::Bytes;
use reinhardt_mime_exception::{MimeError, MimeResult};
use serde_json::Value;

use crate::document::{DecodedDocument, Document, DocumentClass, document_data};
use crate::document_type::DocumentType;
use crate::validator::ValidationContext;

const JSON_MIME: &str = "application/{object_type}+json";

/// JSON representation of documents.
///
/// # Examples
///
/// ```
/// use reinhardt_documents::{DocumentType, JsonDocumentType, NoValidation, TypedDocument};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Greeting {
///     message: String,
/// }
///
/// impl TypedDocument for Greeting {
///     const OBJECT_TYPE: &'static str = "greeting";
/// }
///
/// let greeting = Greeting { message: "hi".to_string() };
/// let body = JsonDocumentType::new().render(&NoValidation, &greeting).unwrap();
/// assert_eq!(&body[..], br#"{"message":"hi"}"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonDocumentType {
	pretty: bool,
}

impl JsonDocumentType {
	pub fn new() -> Self {
		Self::default()
	}

	/// Emit indented JSON.
	pub fn pretty(mut self, pretty: bool) -> Self {
		self.pretty = pretty;
		self
	}
}

impl DocumentType for JsonDocumentType {
	fn name(&self) -> &str {
		"json"
	}

	fn custom_mime(&self) -> bool {
		true
	}

	fn mime(&self) -> &str {
		JSON_MIME
	}

	fn parse(
		&self,
		validation: &dyn ValidationContext,
		class: &DocumentClass,
		raw: &[u8],
	) -> MimeResult<DecodedDocument> {
		let data: Value = serde_json::from_slice(raw)?;
		validation.validate(class, &data)?;
		class.decode(data)
	}

	fn render(
		&self,
		validation: &dyn ValidationContext,
		object: &dyn Document,
	) -> MimeResult<Bytes> {
		let data = document_data(object)?;
		validation.validate(&object.document_class(), &data)?;

		let encoded = if self.pretty {
			serde_json::to_vec_pretty(&data)
		} else {
			serde_json::to_vec(&data)
		};
		encoded
			.map(Bytes::from)
			.map_err(|e| MimeError::Internal(format!("json encoding failed: {}", e)))
	}
}
