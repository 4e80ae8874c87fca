//! JSON references
//!
//! A reference is a `{"$ref": path, "rel": label}` mapping embedded in document data.
//! The HTML document type renders it as a link.

use reinhardt_documents::DocumentClass;
use reinhardt_mime_exception::{MimeError, MimeResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A link from one document to another resource.
///
/// # Examples
///
/// ```
/// use reinhardt_documents::DocumentClass;
/// use reinhardt_mimeprovider::JsonRef;
/// use serde_json::json;
///
/// let user = DocumentClass::builder("User").object_type("user").build();
///
/// let by_route = JsonRef::to("user-list", "/users/").build().unwrap();
/// assert_eq!(by_route.to_value(), json!({"$ref": "/users/", "rel": "user-list"}));
///
/// let by_document = JsonRef::to("user-detail", "/users/7/").document(&user).build().unwrap();
/// assert_eq!(by_document.rel, "user");
///
/// let explicit = JsonRef::to("user-detail", "/users/7/")
///     .document(&user)
///     .rel("author")
///     .build()
///     .unwrap();
/// assert_eq!(explicit.rel, "author");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRef {
	#[serde(rename = "$ref")]
	pub reference: String,
	pub rel: String,
}

impl JsonRef {
	/// Starts a reference to `path`, the resolved path of route `route`.
	pub fn to(route: impl Into<String>, path: impl Into<String>) -> JsonRefBuilder {
		JsonRefBuilder {
			route: route.into(),
			path: path.into(),
			document: None,
			rel: None,
		}
	}

	pub fn to_value(&self) -> Value {
		let mut map = serde_json::Map::new();
		map.insert("$ref".to_string(), Value::String(self.reference.clone()));
		map.insert("rel".to_string(), Value::String(self.rel.clone()));
		Value::Object(map)
	}
}

impl From<JsonRef> for Value {
	fn from(reference: JsonRef) -> Self {
		reference.to_value()
	}
}

/// Builder for [`JsonRef`].
#[derive(Debug, Clone)]
pub struct JsonRefBuilder {
	route: String,
	path: String,
	document: Option<DocumentClass>,
	rel: Option<String>,
}

impl JsonRefBuilder {
	/// Class of the referenced document; its object type becomes the default label.
	pub fn document(mut self, class: &DocumentClass) -> Self {
		self.document = Some(class.clone());
		self
	}

	/// Explicit label, taking precedence over the document and route names.
	pub fn rel(mut self, rel: impl Into<String>) -> Self {
		self.rel = Some(rel.into());
		self
	}

	/// Builds the reference.
	///
	/// # Errors
	///
	/// Returns [`MimeError::Internal`] when the referenced document class has no object type.
	pub fn build(self) -> MimeResult<JsonRef> {
		let object_type = match &self.document {
			Some(class) => Some(class.object_type().ok_or_else(|| {
				MimeError::Internal(format!(
					"cannot reference {} without object_type",
					class.name()
				))
			})?),
			None => None,
		};

		let rel = match (self.rel, object_type) {
			(Some(rel), _) => rel,
			(None, Some(object_type)) => object_type.to_string(),
			(None, None) => self.route,
		};

		Ok(JsonRef {
			reference: self.path,
			rel,
		})
	}
}
