//! Client-side response decoding
//!
//! [`ResponseReader`] decodes responses of a service sharing the same document classes,
//! using the same registry. Sending requests is left to whatever HTTP client the
//! application uses.

use bytes::Bytes;
use http::Response;
use http::header::CONTENT_TYPE;
use reinhardt_documents::{DecodedDocument, DocumentClass, TypedDocument};
use reinhardt_mime_exception::MimeError;
use reinhardt_negotiation::content_type_essence;
use thiserror::Error;

use crate::registry::MimeRegistry;

/// `Accept` header sent when the caller does not restrict the response type.
pub const DEFAULT_ACCEPT: &str = "*/*";

/// Errors raised while decoding a response.
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("cannot handle empty Content-Type")]
	MissingContentType,

	#[error("cannot handle response type: {0}")]
	UnsupportedType(String),

	#[error("unexpected response type: {0}")]
	UnexpectedType(String),

	#[error("response format invalid: {0}")]
	InvalidFormat(String),

	#[error("failed to parse content of type {mimetype}: {source}")]
	Undecodable {
		mimetype: String,
		#[source]
		source: MimeError,
	},
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Decodes responses against a registry.
#[derive(Debug, Clone, Copy)]
pub struct ResponseReader<'a> {
	registry: &'a MimeRegistry,
}

impl<'a> ResponseReader<'a> {
	pub fn new(registry: &'a MimeRegistry) -> Self {
		Self { registry }
	}

	/// `Accept` header asking for any of `expect`, or everything when `expect` is empty.
	pub fn accept_header(&self, expect: &[DocumentClass]) -> String {
		let mimetypes: Vec<&str> = self
			.registry
			.mimetypes()
			.iter()
			.filter(|(_, entry)| {
				entry
					.class()
					.is_some_and(|class| entry.can_decode() && expect.contains(class))
			})
			.map(|(mimetype, _)| mimetype.as_str())
			.collect();

		if mimetypes.is_empty() {
			DEFAULT_ACCEPT.to_string()
		} else {
			mimetypes.join(", ")
		}
	}

	/// Decodes `body` declared as `content_type`.
	///
	/// When `expect` is not empty, the decoded class must be one of its classes.
	pub fn read(
		&self,
		content_type: Option<&str>,
		body: &[u8],
		expect: &[DocumentClass],
	) -> ClientResult<DecodedDocument> {
		let content_type = content_type
			.map(str::trim)
			.filter(|c| !c.is_empty())
			.ok_or(ClientError::MissingContentType)?;
		let mimetype = content_type_essence(content_type)
			.ok_or_else(|| ClientError::UnsupportedType(content_type.to_string()))?;

		let entry = self
			.registry
			.get(&mimetype)
			.ok_or_else(|| ClientError::UnsupportedType(mimetype.clone()))?;
		let class = entry
			.class()
			.ok_or_else(|| ClientError::UnsupportedType(mimetype.clone()))?;

		if !expect.is_empty() && !expect.contains(class) {
			return Err(ClientError::UnexpectedType(mimetype));
		}

		entry
			.document_type()
			.parse(self.registry, class, body)
			.map_err(|e| match e {
				MimeError::Validation(message) => ClientError::InvalidFormat(message),
				source => {
					tracing::error!("failed to parse content of type {}: {}", mimetype, source);
					ClientError::Undecodable { mimetype, source }
				}
			})
	}

	/// Decodes an `http` response.
	pub fn read_response(
		&self,
		response: &Response<Bytes>,
		expect: &[DocumentClass],
	) -> ClientResult<DecodedDocument> {
		let content_type = response
			.headers()
			.get(CONTENT_TYPE)
			.and_then(|value| value.to_str().ok());
		self.read(content_type, response.body(), expect)
	}

	/// Decodes an `http` response that must carry a `T`.
	///
	/// # Examples
	///
	/// ```
	/// use bytes::Bytes;
	/// use http::Response;
	/// use reinhardt_mimeprovider::{MimeProvider, ResponseReader};
	/// use reinhardt_documents::TypedDocument;
	/// use serde::{Deserialize, Serialize};
	///
	/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
	/// struct Pong {
	///     seq: u32,
	/// }
	///
	/// impl TypedDocument for Pong {
	///     const OBJECT_TYPE: &'static str = "pong";
	/// }
	///
	/// let provider = MimeProvider::builder().document::<Pong>().build().unwrap();
	/// let reader = ResponseReader::new(provider.registry());
	///
	/// let response = Response::builder()
	///     .header("Content-Type", "application/pong+json; charset=utf-8")
	///     .body(Bytes::from_static(br#"{"seq": 3}"#))
	///     .unwrap();
	///
	/// assert_eq!(reader.read_as::<Pong>(&response).unwrap(), Pong { seq: 3 });
	/// ```
	pub fn read_as<T: TypedDocument>(&self, response: &Response<Bytes>) -> ClientResult<T> {
		let expected = DocumentClass::of::<T>();
		let decoded = self.read_response(response, std::slice::from_ref(&expected))?;
		decoded
			.downcast::<T>()
			.map_err(|decoded| ClientError::UnexpectedType(decoded.class().to_string()))
	}
}
