//! # Reinhardt Mimeprovider
//!
//! Content negotiation and representation rendering driven by a conflict-checked
//! mimetype registry.
//!
//! ## Overview
//!
//! - [`MimeRegistry`] maps mimetypes to document types and document classes
//! - [`MimeRenderer`] negotiates a representation from the `Accept` header, renders it,
//!   and turns failures into error documents
//! - [`parse_body`] decodes request bodies by their `Content-Type`
//! - [`ResponseReader`] decodes responses on the client side
//! - [`MimeProvider`] bundles all of the above with its [`MimeSettings`]
//!
//! ## Example
//!
//! ```
//! use bytes::Bytes;
//! use http::{Request, StatusCode};
//! use reinhardt_documents::TypedDocument;
//! use reinhardt_mimeprovider::{HttpExchange, MimeProvider};
//! use serde::{Deserialize, Serialize};
//! use serde_json::{Value, json};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct SomeData {
//!     string: String,
//!     integer: i64,
//!     somelist: Vec<String>,
//! }
//!
//! impl TypedDocument for SomeData {
//!     const OBJECT_TYPE: &'static str = "somedata";
//!
//!     fn schema() -> Option<Value> {
//!         Some(json!({
//!             "type": "object",
//!             "required": ["string", "integer", "somelist"]
//!         }))
//!     }
//! }
//!
//! let provider = MimeProvider::builder().document::<SomeData>().build().unwrap();
//!
//! let request = Request::builder()
//!     .header("Content-Type", "application/somedata+json")
//!     .header("Accept", "text/plain")
//!     .body(Bytes::from_static(
//!         br#"{"string": "Hello", "integer": 12, "somelist": ["Foo", "Bar"]}"#,
//!     ))
//!     .unwrap();
//! let mut exchange = HttpExchange::new(request);
//!
//! let body = provider.request_body(&exchange).unwrap().unwrap();
//! let data: SomeData = body.downcast().unwrap();
//! assert_eq!(data.integer, 12);
//!
//! let output = provider.respond(&data, &mut exchange);
//! let response = exchange.into_response(output);
//! assert_eq!(response.status(), StatusCode::OK);
//! assert_eq!(response.headers()["content-type"], "text/plain");
//! assert_eq!(
//!     &response.body()[..],
//!     br#"{"integer": 12, "somelist": [...], "string": "Hello"}"#
//! );
//! ```

pub mod body;
pub mod client;
pub mod config;
pub mod context;
pub mod error_document;
pub mod json_ref;
pub mod provider;
pub mod registry;
pub mod renderer;

pub use body::{parse_body, parse_body_as};
pub use client::{ClientError, ClientResult, DEFAULT_ACCEPT, ResponseReader};
pub use config::MimeSettings;
pub use context::{HttpExchange, RequestContext};
pub use error_document::{ErrorDocument, ErrorHandler, default_error_handler};
pub use json_ref::{JsonRef, JsonRefBuilder};
pub use provider::{MimeProvider, MimeProviderBuilder};
pub use registry::{MimeEntry, MimeRegistry};
pub use renderer::{MimeRenderer, Rendered};
