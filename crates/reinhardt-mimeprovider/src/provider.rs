//! The mime provider
//!
//! Bundles settings, registry and renderer behind one value that the host framework
//! shares between requests.

use std::sync::Arc;

use bytes::Bytes;
use reinhardt_documents::{
	DecodedDocument, Document, DocumentClass, DocumentType, JsonSchemaValidator, SchemaValidator,
	TypedDocument, default_document_types,
};
use reinhardt_mime_exception::{MimeError, MimeResult};

use crate::body;
use crate::client::ResponseReader;
use crate::config::MimeSettings;
use crate::context::RequestContext;
use crate::error_document::{ErrorDocument, ErrorHandler, default_error_handler};
use crate::registry::MimeRegistry;
use crate::renderer::{MimeRenderer, Rendered};

/// Negotiated rendering and body parsing over one registry.
///
/// Build it once at startup, then share it (for instance as `Arc<MimeProvider>`).
///
/// # Examples
///
/// ```
/// use reinhardt_documents::TypedDocument;
/// use reinhardt_mimeprovider::MimeProvider;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Article {
///     title: String,
/// }
///
/// impl TypedDocument for Article {
///     const OBJECT_TYPE: &'static str = "article";
/// }
///
/// let provider = MimeProvider::builder().document::<Article>().build().unwrap();
///
/// let article = Article { title: "Hello".to_string() };
/// let rendered = provider.render(&article, Some("application/article+json")).unwrap();
/// assert_eq!(rendered.mimetype, "application/article+json");
/// assert_eq!(&rendered.body[..], br#"{"title":"Hello"}"#);
///
/// let rendered = provider.render(&article, None).unwrap();
/// assert_eq!(rendered.mimetype, "text/html");
/// ```
#[derive(Debug)]
pub struct MimeProvider {
	settings: MimeSettings,
	registry: MimeRegistry,
	renderer: MimeRenderer,
}

impl MimeProvider {
	pub fn builder() -> MimeProviderBuilder {
		MimeProviderBuilder::default()
	}

	/// A provider with the default setup and `classes` registered.
	pub fn new(classes: &[DocumentClass]) -> MimeResult<Self> {
		Self::builder().documents(classes.iter().cloned()).build()
	}

	pub fn settings(&self) -> &MimeSettings {
		&self.settings
	}

	pub fn renderer_name(&self) -> &str {
		&self.settings.renderer_name
	}

	pub fn attribute_name(&self) -> &str {
		&self.settings.attribute_name
	}

	pub fn registry(&self) -> &MimeRegistry {
		&self.registry
	}

	pub fn renderer(&self) -> &MimeRenderer {
		&self.renderer
	}

	/// Registers more document classes. See [`MimeRegistry::register`].
	pub fn register(&mut self, classes: &[DocumentClass]) -> MimeResult<()> {
		self.registry.register(classes)
	}

	/// See [`MimeRenderer::render`].
	pub fn render(&self, object: &dyn Document, accept: Option<&str>) -> MimeResult<Rendered> {
		self.renderer.render(&self.registry, object, accept)
	}

	/// See [`MimeRenderer::respond`].
	pub fn respond(&self, object: &dyn Document, context: &mut dyn RequestContext) -> Bytes {
		self.renderer.respond(&self.registry, object, context)
	}

	/// See [`MimeRenderer::respond_error`].
	pub fn respond_error(&self, error: &MimeError, context: &mut dyn RequestContext) -> Bytes {
		self.renderer.respond_error(&self.registry, error, context)
	}

	/// Renders the outcome of a view: the object on success, the error document otherwise.
	pub fn respond_result(
		&self,
		outcome: MimeResult<&dyn Document>,
		context: &mut dyn RequestContext,
	) -> Bytes {
		match outcome {
			Ok(object) => self.respond(object, context),
			Err(error) => self.respond_error(&error, context),
		}
	}

	/// See [`body::parse_body`].
	pub fn parse_body(
		&self,
		body: &[u8],
		content_type: Option<&str>,
	) -> MimeResult<Option<DecodedDocument>> {
		body::parse_body(&self.registry, body, content_type)
	}

	/// See [`body::parse_body_as`].
	pub fn parse_body_as<T: TypedDocument>(
		&self,
		body: &[u8],
		content_type: Option<&str>,
	) -> MimeResult<Option<T>> {
		body::parse_body_as(&self.registry, body, content_type)
	}

	/// Parses the body of the request behind `context`.
	pub fn request_body(&self, context: &dyn RequestContext) -> MimeResult<Option<DecodedDocument>> {
		self.parse_body(context.body(), context.content_type())
	}

	/// A reader for responses of services sharing this registry.
	pub fn reader(&self) -> ResponseReader<'_> {
		ResponseReader::new(&self.registry)
	}
}

/// Builder for [`MimeProvider`]. Everything is checked together in [`build`](Self::build).
#[derive(Default)]
pub struct MimeProviderBuilder {
	settings: MimeSettings,
	document_types: Option<Vec<Arc<dyn DocumentType>>>,
	validator: Option<Arc<dyn SchemaValidator>>,
	error_handler: Option<Arc<ErrorHandler>>,
	error_document_type: Option<Arc<dyn DocumentType>>,
	classes: Vec<DocumentClass>,
}

impl MimeProviderBuilder {
	pub fn settings(mut self, settings: MimeSettings) -> Self {
		self.settings = settings;
		self
	}

	/// Replaces the default document types (HTML, JSON, text).
	pub fn document_types(mut self, document_types: Vec<Arc<dyn DocumentType>>) -> Self {
		self.document_types = Some(document_types);
		self
	}

	/// Adds a document type to the explicit list, starting from an empty one.
	pub fn document_type(mut self, document_type: impl DocumentType + 'static) -> Self {
		self.document_types
			.get_or_insert_with(Vec::new)
			.push(Arc::new(document_type));
		self
	}

	/// Replaces the JSON Schema validator.
	pub fn validator(mut self, validator: impl SchemaValidator + 'static) -> Self {
		self.validator = Some(Arc::new(validator));
		self
	}

	/// Replaces [`default_error_handler`].
	pub fn error_handler<F>(mut self, handler: F) -> Self
	where
		F: Fn(&MimeError, &mut dyn RequestContext) -> Box<dyn Document> + Send + Sync + 'static,
	{
		self.error_handler = Some(Arc::new(handler));
		self
	}

	/// Document type used for error documents. Defaults to the first non-custom type.
	pub fn error_document_type(mut self, document_type: impl DocumentType + 'static) -> Self {
		self.error_document_type = Some(Arc::new(document_type));
		self
	}

	/// Registers the class of `T`.
	pub fn document<T: TypedDocument>(mut self) -> Self {
		self.classes.push(DocumentClass::of::<T>());
		self
	}

	pub fn class(mut self, class: DocumentClass) -> Self {
		self.classes.push(class);
		self
	}

	pub fn documents(mut self, classes: impl IntoIterator<Item = DocumentClass>) -> Self {
		self.classes.extend(classes);
		self
	}

	/// Builds the provider.
	///
	/// # Errors
	///
	/// - [`MimeError::Configuration`] for invalid settings, an empty document type list,
	///   a custom error document type or no non-custom type to fall back on
	/// - any error of [`MimeRegistry::new`] and [`MimeRegistry::register`]
	pub fn build(self) -> MimeResult<MimeProvider> {
		self.settings.validate()?;

		let document_types = match self.document_types {
			Some(document_types) => document_types,
			None => default_document_types(&self.settings.html, &self.settings.text)
				.into_iter()
				.map(Arc::from)
				.collect(),
		};
		if document_types.is_empty() {
			return Err(MimeError::Configuration(
				"no document types specified".to_string(),
			));
		}

		let error_document_type = match self.error_document_type {
			Some(document_type) => document_type,
			None => document_types
				.iter()
				.find(|t| !t.custom_mime())
				.cloned()
				.ok_or_else(|| {
					MimeError::Configuration(
						"no non-custom document type available for error documents".to_string(),
					)
				})?,
		};
		let error_handler = self
			.error_handler
			.unwrap_or_else(|| Arc::new(default_error_handler));
		let renderer = MimeRenderer::new(error_document_type, error_handler)?;

		let validator = self
			.validator
			.unwrap_or_else(|| Arc::new(JsonSchemaValidator::new()));
		let mut registry = MimeRegistry::new(document_types, validator)?;
		registry.register(&self.classes)?;
		registry.precompile(&DocumentClass::of::<ErrorDocument>())?;

		tracing::debug!(
			"mime provider {} ready with {} mimetypes",
			self.settings.renderer_name,
			registry.len()
		);

		Ok(MimeProvider {
			settings: self.settings,
			registry,
			renderer,
		})
	}
}

impl std::fmt::Debug for MimeProviderBuilder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MimeProviderBuilder")
			.field("settings", &self.settings)
			.field("document_types", &self.document_types)
			.field("classes", &self.classes)
			.finish_non_exhaustive()
	}
}
