//! Negotiated rendering
//!
//! [`MimeRenderer::render`] picks a representation for an object and encodes it.
//! [`MimeRenderer::respond`] does the same for a request and never fails: errors are
//! rendered as error documents with the error document type.

use std::sync::Arc;

use bytes::Bytes;
use reinhardt_documents::{Document, DocumentType};
use reinhardt_mime_exception::{MimeError, MimeResult};
use reinhardt_negotiation::AcceptHeader;

use crate::context::RequestContext;
use crate::error_document::{ErrorDocument, ErrorHandler};
use crate::registry::MimeRegistry;

/// Encoded body and the mimetype it was encoded as.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
	pub body: Bytes,
	pub mimetype: String,
}

/// Renders documents against a registry.
pub struct MimeRenderer {
	error_document_type: Arc<dyn DocumentType>,
	error_handler: Arc<ErrorHandler>,
}

impl MimeRenderer {
	/// Creates a renderer.
	///
	/// # Errors
	///
	/// Returns [`MimeError::Configuration`] when the error document type is custom: error
	/// documents need a mimetype that does not depend on any registered class.
	pub fn new(
		error_document_type: Arc<dyn DocumentType>,
		error_handler: Arc<ErrorHandler>,
	) -> MimeResult<Self> {
		if error_document_type.custom_mime() {
			return Err(MimeError::Configuration(format!(
				"error document type {} must not be custom",
				error_document_type.name()
			)));
		}
		Ok(Self {
			error_document_type,
			error_handler,
		})
	}

	pub fn error_document_type(&self) -> &dyn DocumentType {
		self.error_document_type.as_ref()
	}

	/// Renders `object` in the representation `accept` prefers.
	///
	/// A missing or blank `accept` admits everything.
	///
	/// # Errors
	///
	/// - [`MimeError::BadRequest`] when no registered representation is acceptable
	/// - [`MimeError::Internal`] when the object has no data form
	/// - whatever validation or encoding of the object fails with
	pub fn render(
		&self,
		registry: &MimeRegistry,
		object: &dyn Document,
		accept: Option<&str>,
	) -> MimeResult<Rendered> {
		let class = object.document_class();
		let accept_header = AcceptHeader::from_header(accept);

		let (mimetype, entry) = registry.negotiate(&accept_header, &class).ok_or_else(|| {
			MimeError::BadRequest(format!(
				"no acceptable representation for Accept: {}",
				accept.unwrap_or("*/*")
			))
		})?;

		let content_type = entry.document_type().get_mimetype(Some(&class))?;
		if content_type != mimetype {
			return Err(MimeError::Internal(format!(
				"{} resolved to {} but was negotiated as {}",
				class, content_type, mimetype
			)));
		}

		let body = entry.document_type().render(registry, object)?;
		tracing::debug!("rendered {} as {}", class, content_type);

		Ok(Rendered {
			body,
			mimetype: content_type,
		})
	}

	/// Renders `object` for a request, falling back to an error document.
	///
	/// Sets the response content type (and the status, on errors) on `context`.
	pub fn respond(
		&self,
		registry: &MimeRegistry,
		object: &dyn Document,
		context: &mut dyn RequestContext,
	) -> Bytes {
		match self.render(registry, object, context.accept()) {
			Ok(rendered) => {
				context.set_response_content_type(&rendered.mimetype);
				rendered.body
			}
			Err(error) => self.respond_error(registry, &error, context),
		}
	}

	/// Renders the error document for `error`.
	///
	/// Never fails. If the handler's document cannot be rendered, an [`ErrorDocument`]
	/// is rendered instead; if that fails too, the body is the status title.
	pub fn respond_error(
		&self,
		registry: &MimeRegistry,
		error: &MimeError,
		context: &mut dyn RequestContext,
	) -> Bytes {
		if error.is_client_error() {
			tracing::debug!("request failed: {}", error);
		} else {
			tracing::error!("request failed: {}", error);
		}

		context.set_status(error.status_code());
		let document = (self.error_handler)(error, context);

		let rendered = self.render_error_document(registry, document.as_ref()).or_else(|e| {
			tracing::warn!("error document could not be rendered: {}", e);
			self.render_error_document(registry, &ErrorDocument::title_only(error))
		});

		match rendered {
			Ok(rendered) => {
				context.set_response_content_type(&rendered.mimetype);
				rendered.body
			}
			Err(e) => {
				tracing::warn!("fallback error document could not be rendered: {}", e);
				context.set_response_content_type("text/plain");
				Bytes::from_static(error.title().as_bytes())
			}
		}
	}

	fn render_error_document(
		&self,
		registry: &MimeRegistry,
		document: &dyn Document,
	) -> MimeResult<Rendered> {
		let body = self.error_document_type.render(registry, document)?;
		Ok(Rendered {
			body,
			mimetype: self.error_document_type.get_mimetype(None)?,
		})
	}
}

impl std::fmt::Debug for MimeRenderer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MimeRenderer")
			.field("error_document_type", &self.error_document_type.name())
			.finish_non_exhaustive()
	}
}
