//! HTML document type
//!
//! Renders any document as a browsable page of nested tables. Encode only.

mod markup;
mod tree;

pub use markup::{Markup, NodeId};
pub use tree::build_data;

use bytes::Bytes;
use reinhardt_mime_exception::{MimeError, MimeResult};
use serde::{Deserialize, Serialize};

use crate::document::{DecodedDocument, Document, DocumentClass, document_data};
use crate::document_type::DocumentType;
use crate::validator::ValidationContext;

/// Page options for [`HtmlDocumentType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlOptions {
	/// Content of the `<title>` element.
	pub title: String,
}

impl Default for HtmlOptions {
	fn default() -> Self {
		Self {
			title: "Data".to_string(),
		}
	}
}

/// HTML representation of documents, served as `text/html`.
///
/// # Examples
///
/// ```
/// use reinhardt_documents::{DocumentType, HtmlDocumentType, NoValidation, TypedDocument};
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
/// let body = HtmlDocumentType::new().render(&NoValidation, &greeting).unwrap();
/// let page = std::str::from_utf8(&body).unwrap();
///
/// assert!(page.starts_with("<html><head><title>Data</title></head><body>"));
/// assert!(page.contains("<h1>greeting (Greeting)</h1>"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HtmlDocumentType {
	options: HtmlOptions,
}

impl HtmlDocumentType {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_options(options: HtmlOptions) -> Self {
		Self { options }
	}
}

impl DocumentType for HtmlDocumentType {
	fn name(&self) -> &str {
		"html"
	}

	fn custom_mime(&self) -> bool {
		false
	}

	fn mime(&self) -> &str {
		"text/html"
	}

	fn parse(
		&self,
		_validation: &dyn ValidationContext,
		_class: &DocumentClass,
		_raw: &[u8],
	) -> MimeResult<DecodedDocument> {
		Err(MimeError::NotSupported(
			"text/html cannot be parsed".to_string(),
		))
	}

	fn render(
		&self,
		validation: &dyn ValidationContext,
		object: &dyn Document,
	) -> MimeResult<Bytes> {
		let class = object.document_class();
		let data = document_data(object)?;
		validation.validate(&class, &data)?;

		let mut page = Markup::new("html");
		let root = page.root();
		let head = page.add(root, "head", &[]);
		let title = page.add(head, "title", &[]);
		page.add_text(title, self.options.title.as_str());

		let body = page.add(root, "body", &[]);
		let heading = page.add(body, "h1", &[]);
		let heading_text = match class.object_type() {
			Some(object_type) => format!("{} ({})", object_type, class.name()),
			None => class.name().to_string(),
		};
		page.add_text(heading, heading_text);

		build_data(&mut page, body, &data);

		Ok(Bytes::from(page.render()))
	}
}
