//! # Reinhardt Mime
//!
//! Content negotiation and representation rendering, driven by a conflict-checked
//! mimetype registry.
//!
//! Applications describe their payloads as document classes. Each document type
//! (HTML, JSON, plain text, ...) either serves one fixed mimetype for every object or
//! one mimetype per class (`application/{object_type}+json`). Responses are rendered in
//! the representation the client's `Accept` header prefers; request bodies are decoded
//! and validated by their `Content-Type`.
//!
//! ## Crates
//!
//! - [`exception`] - error taxonomy and HTTP status mapping
//! - [`negotiation`] - media types and `Accept` header matching
//! - [`documents`] - document classes, schema validation and document types
//! - [`provider`] - registry, renderer, body parsing, client decoding and settings
//!
//! ## Feature Flags
//!
//! - `yaml` (default) - the `application/{object_type}+yaml` document type
//! - `full` - all features enabled
//!
//! ## Quick Example
//!
//! ```
//! use reinhardt_mime::prelude::*;
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Greeting {
//!     text: String,
//! }
//!
//! impl TypedDocument for Greeting {
//!     const OBJECT_TYPE: &'static str = "greeting";
//! }
//!
//! let provider = MimeProvider::builder().document::<Greeting>().build().unwrap();
//!
//! let greeting = provider
//!     .parse_body_as::<Greeting>(br#"{"text": "hi"}"#, Some("application/greeting+json"))
//!     .unwrap();
//! assert_eq!(greeting, Some(Greeting { text: "hi".to_string() }));
//!
//! let rendered = provider
//!     .render(&Greeting { text: "hi".to_string() }, Some("text/plain"))
//!     .unwrap();
//! assert_eq!(&rendered.body[..], br#"{"text": "hi"}"#);
//! ```

pub mod documents;
pub mod exception;
pub mod negotiation;
pub mod provider;

pub use reinhardt_documents::{
	DecodedDocument, Document, DocumentClass, DocumentType, TypedDocument,
};
pub use reinhardt_mime_exception::{MimeError, MimeResult};
pub use reinhardt_mimeprovider::{MimeProvider, MimeProviderBuilder, MimeSettings};

/// Everything needed to declare documents and serve them.
pub mod prelude {
	pub use crate::{
		DecodedDocument, Document, DocumentClass, DocumentType, MimeError, MimeProvider,
		MimeProviderBuilder, MimeResult, MimeSettings, TypedDocument,
	};
	pub use reinhardt_mimeprovider::{
		ErrorDocument, HttpExchange, JsonRef, Rendered, RequestContext, ResponseReader,
	};

	// External
	pub use serde::{Deserialize, Serialize};
}
