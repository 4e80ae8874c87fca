//! # Reinhardt Mime Exception
//!
//! Error taxonomy for the mimetype registry, content negotiation and the
//! rendering / parsing pipeline.
//!
//! Errors fall in two groups:
//!
//! - **Setup errors** ([`MimeError::Configuration`], [`MimeError::Conflict`]) are raised
//!   while building a provider and abort setup.
//! - **Request errors** (everything else) are raised while serving a request and are
//!   converted into a rendered error document at the renderer boundary.
//!
//! ## Example
//!
//! ```
//! use reinhardt_mime_exception::MimeError;
//! use http::StatusCode;
//!
//! let error = MimeError::BadRequest("no acceptable representation".to_string());
//! assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
//! assert_eq!(error.title(), "Bad Request");
//! assert!(error.is_client_error());
//! ```

use http::StatusCode;
use thiserror::Error;

/// Errors raised by the mime layer.
#[derive(Debug, Error)]
pub enum MimeError {
	/// Invalid setup input (empty document type list, custom error document type, ...).
	#[error("configuration error: {0}")]
	Configuration(String),

	/// Two handlers resolved to the same mimetype.
	#[error("conflicting handler for {mimetype}: {existing} and {new}")]
	Conflict {
		mimetype: String,
		existing: String,
		new: String,
	},

	/// The request cannot be served as asked.
	#[error("bad request: {0}")]
	BadRequest(String),

	/// The request body could not be decoded.
	#[error("malformed body: {0}")]
	Decode(String),

	/// A payload did not match the schema of its document class.
	#[error("validation failed: {0}")]
	Validation(String),

	/// Decoding was attempted on an encode-only representation.
	#[error("not supported: {0}")]
	NotSupported(String),

	/// A programming defect on the server side.
	#[error("internal error: {0}")]
	Internal(String),
}

impl MimeError {
	/// Creates a conflict error for `mimetype`.
	pub fn conflict(
		mimetype: impl Into<String>,
		existing: impl Into<String>,
		new: impl Into<String>,
	) -> Self {
		Self::Conflict {
			mimetype: mimetype.into(),
			existing: existing.into(),
			new: new.into(),
		}
	}

	/// HTTP status the error maps to when rendered as a response.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_mime_exception::MimeError;
	/// use http::StatusCode;
	///
	/// let error = MimeError::Internal("object not serializable".to_string());
	/// assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
	///
	/// let error = MimeError::Validation("missing field".to_string());
	/// assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
	/// ```
	pub fn status_code(&self) -> StatusCode {
		match self {
			Self::BadRequest(_) | Self::Decode(_) | Self::Validation(_) | Self::NotSupported(_) => {
				StatusCode::BAD_REQUEST
			}
			Self::Configuration(_) | Self::Conflict { .. } | Self::Internal(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	/// Short human readable title matching the status code.
	pub fn title(&self) -> &'static str {
		self.status_code()
			.canonical_reason()
			.unwrap_or("Internal Server Error")
	}

	/// Whether the error is caused by the client (4xx).
	pub fn is_client_error(&self) -> bool {
		self.status_code().is_client_error()
	}

	/// Whether the error can only happen while building a provider.
	pub fn is_setup_error(&self) -> bool {
		matches!(self, Self::Configuration(_) | Self::Conflict { .. })
	}
}

impl From<serde_json::Error> for MimeError {
	fn from(error: serde_json::Error) -> Self {
		Self::Decode(error.to_string())
	}
}

/// Result type for mime operations.
pub type MimeResult<T> = Result<T, MimeError>;
