//! YAML document type
//!
//! Not part of the default set; add it to a provider explicitly.

use bytes::Bytes;
use reinhardt_mime_exception::{MimeError, MimeResult};
use serde_json::Value;

use crate::document::{DecodedDocument, Document, DocumentClass, document_data};
use crate::document_type::DocumentType;
use crate::validator::ValidationContext;

/// YAML representation of documents, served as `application/{object_type}+yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlDocumentType;

impl YamlDocumentType {
	pub fn new() -> Self {
		Self
	}
}

impl DocumentType for YamlDocumentType {
	fn name(&self) -> &str {
		"yaml"
	}

	fn custom_mime(&self) -> bool {
		true
	}

	fn mime(&self) -> &str {
		"application/{object_type}+yaml"
	}

	fn parse(
		&self,
		validation: &dyn ValidationContext,
		class: &DocumentClass,
		raw: &[u8],
	) -> MimeResult<DecodedDocument> {
		let data: Value =
			serde_yaml::from_slice(raw).map_err(|e| MimeError::Decode(e.to_string()))?;
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
		serde_yaml::to_string(&data)
			.map(Bytes::from)
			.map_err(|e| MimeError::Internal(format!("yaml encoding failed: {}", e)))
	}
}
