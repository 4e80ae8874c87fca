//! Document types
//!
//! A document type is one wire representation (JSON, HTML, plain text, ...). It is
//! stateless: everything it needs to encode or decode a payload is passed in.

use std::fmt;

use bytes::Bytes;
use reinhardt_mime_exception::{MimeError, MimeResult};

use crate::document::{DecodedDocument, Document, DocumentClass};
use crate::html::{HtmlDocumentType, HtmlOptions};
use crate::json::JsonDocumentType;
use crate::text::{TextDocumentType, TextOptions};
use crate::validator::ValidationContext;

/// Placeholder replaced by the document class object type in custom mimetypes.
pub const OBJECT_TYPE_PLACEHOLDER: &str = "{object_type}";

/// One wire representation of documents.
pub trait DocumentType: Send + Sync + fmt::Debug {
	/// Short name used in logs and conflict messages.
	fn name(&self) -> &str;

	/// Whether the mimetype depends on the document class.
	///
	/// Custom types get one registry entry per registered class, built by filling
	/// [`OBJECT_TYPE_PLACEHOLDER`] in [`mime`](Self::mime).
	fn custom_mime(&self) -> bool;

	/// The fixed mimetype, or the template for custom types.
	fn mime(&self) -> &str;

	/// Resolves the mimetype for `class`.
	///
	/// Non-custom types ignore the class. Custom types fail with a configuration error
	/// when no class is given or the class has no object type.
	///
	/// Mimetypes are case-insensitive; the resolved string is always lower case.
	fn get_mimetype(&self, class: Option<&DocumentClass>) -> MimeResult<String> {
		if !self.custom_mime() {
			return Ok(self.mime().to_ascii_lowercase());
		}

		let class = class.ok_or_else(|| {
			MimeError::Configuration(format!(
				"document type {} needs a document class to resolve its mimetype",
				self.name()
			))
		})?;
		let object_type = class.object_type().ok_or_else(|| {
			MimeError::Configuration(format!(
				"document type {} cannot resolve a mimetype for {}: missing object_type",
				self.name(),
				class.name()
			))
		})?;

		Ok(self
			.mime()
			.replace(OBJECT_TYPE_PLACEHOLDER, object_type)
			.to_ascii_lowercase())
	}

	/// Decodes `raw` into an object of `class`, validating the data first.
	fn parse(
		&self,
		validation: &dyn ValidationContext,
		class: &DocumentClass,
		raw: &[u8],
	) -> MimeResult<DecodedDocument>;

	/// Encodes `object`. Implementations validate the data before emitting bytes.
	fn render(&self, validation: &dyn ValidationContext, object: &dyn Document)
	-> MimeResult<Bytes>;
}

/// The default set of document types: HTML, JSON and plain text, in that order.
///
/// # Examples
///
/// ```
/// use reinhardt_documents::{HtmlOptions, TextOptions, default_document_types};
///
/// let types = default_document_types(&HtmlOptions::default(), &TextOptions::default());
/// let names: Vec<&str> = types.iter().map(|t| t.name()).collect();
/// assert_eq!(names, ["html", "json", "text"]);
/// ```
pub fn default_document_types(
	html: &HtmlOptions,
	text: &TextOptions,
) -> Vec<Box<dyn DocumentType>> {
	vec![
		Box::new(HtmlDocumentType::with_options(html.clone())),
		Box::new(JsonDocumentType::new()),
		Box::new(TextDocumentType::with_options(text.clone())),
	]
}
