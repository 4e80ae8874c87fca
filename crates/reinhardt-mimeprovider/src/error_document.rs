//! Error documents
//!
//! Request-time failures are answered with a document like any other response. The
//! error handler decides which document; [`default_error_handler`] answers with an
//! [`ErrorDocument`] carrying the error message.

use reinhardt_documents::{Document, TypedDocument};
use reinhardt_mime_exception::MimeError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::context::RequestContext;

/// Turns a request-time error into the document sent back to the client.
///
/// Runs after the response status has been set from the error, so handlers only
/// need to touch the context to override it.
pub type ErrorHandler =
	dyn Fn(&MimeError, &mut dyn RequestContext) -> Box<dyn Document> + Send + Sync;

/// Built-in error payload, object type `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDocument {
	pub message: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
}

impl ErrorDocument {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			title: None,
		}
	}

	/// Describes `error` with its message and status title.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_mime_exception::MimeError;
	/// use reinhardt_mimeprovider::ErrorDocument;
	///
	/// let error = MimeError::BadRequest("unsupported content-type: text/csv".to_string());
	/// let document = ErrorDocument::from_error(&error);
	///
	/// assert_eq!(document.message, "bad request: unsupported content-type: text/csv");
	/// assert_eq!(document.title.as_deref(), Some("Bad Request"));
	/// ```
	pub fn from_error(error: &MimeError) -> Self {
		Self {
			message: error.to_string(),
			title: Some(error.title().to_string()),
		}
	}

	/// A document naming the status only, for errors whose details stay on the server.
	pub fn title_only(error: &MimeError) -> Self {
		Self::new(error.title())
	}
}

impl TypedDocument for ErrorDocument {
	const OBJECT_TYPE: &'static str = "error";

	fn schema() -> Option<Value> {
		Some(json!({
			"type": "object",
			"properties": {
				"message": {"type": "string"},
				"title": {"type": "string"}
			},
			"required": ["message"]
		}))
	}
}

/// Sets the status from `error` and answers with an [`ErrorDocument`].
///
/// Server faults only expose their status title.
pub fn default_error_handler(
	error: &MimeError,
	context: &mut dyn RequestContext,
) -> Box<dyn Document> {
	context.set_status(error.status_code());
	if error.is_client_error() {
		Box::new(ErrorDocument::from_error(error))
	} else {
		Box::new(ErrorDocument::title_only(error))
	}
}
