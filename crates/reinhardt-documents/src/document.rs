//! Document classes and document instances
//!
//! A [`DocumentClass`] describes one kind of application payload: its stable
//! `object_type`, an optional JSON schema and an optional decode capability.
//! Instances handed to a renderer implement [`Document`].
//!
//! Most applications implement [`TypedDocument`] on a serde type and get both for free:
//!
//! ```
//! use reinhardt_documents::{Document, DocumentClass, TypedDocument};
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct SomeData {
//!     string: String,
//!     integer: i64,
//! }
//!
//! impl TypedDocument for SomeData {
//!     const OBJECT_TYPE: &'static str = "somedata";
//! }
//!
//! let class = DocumentClass::of::<SomeData>();
//! assert_eq!(class.object_type(), Some("somedata"));
//! assert_eq!(class.name(), "SomeData");
//!
//! let object = SomeData { string: "Hello".to_string(), integer: 12 };
//! assert_eq!(object.to_data(), Some(json!({"string": "Hello", "integer": 12})));
//!
//! let decoded = class.decode(json!({"string": "Hi", "integer": 1})).unwrap();
//! let decoded: SomeData = decoded.downcast().unwrap();
//! assert_eq!(decoded.integer, 1);
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use reinhardt_mime_exception::{MimeError, MimeResult};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

type DecodeFn = dyn Fn(Value) -> MimeResult<Box<dyn Any + Send + Sync>> + Send + Sync;

/// An object that can be handed to a renderer.
pub trait Document: Send + Sync {
	/// The class this instance belongs to.
	fn document_class(&self) -> DocumentClass;

	/// Structured data form of the object.
	///
	/// `None` means the object has no data form and cannot be rendered.
	fn to_data(&self) -> Option<Value>;
}

/// A serde type with a stable object type, usable as a document class.
pub trait TypedDocument: Serialize + DeserializeOwned + Send + Sync + 'static {
	/// Stable identifier, used to build per-class mimetypes such as
	/// `application/{object_type}+json`.
	const OBJECT_TYPE: &'static str;

	/// JSON schema that payloads of this class must satisfy.
	fn schema() -> Option<Value> {
		None
	}
}

impl<T: TypedDocument> Document for T {
	fn document_class(&self) -> DocumentClass {
		DocumentClass::of::<T>()
	}

	fn to_data(&self) -> Option<Value> {
		match serde_json::to_value(self) {
			Ok(value) => Some(value),
			Err(e) => {
				tracing::debug!(object_type = T::OBJECT_TYPE, "to_data failed: {}", e);
				None
			}
		}
	}
}

struct ClassInner {
	name: String,
	object_type: Option<String>,
	schema: Option<Value>,
	decoder: Option<Arc<DecodeFn>>,
}

/// Describes one kind of application payload.
///
/// Cheap to clone; clones share the same description.
#[derive(Clone)]
pub struct DocumentClass {
	inner: Arc<ClassInner>,
}

impl DocumentClass {
	/// Starts describing a class by hand.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_documents::DocumentClass;
	/// use serde_json::json;
	///
	/// let class = DocumentClass::builder("Report")
	///     .object_type("report")
	///     .schema(json!({"type": "object"}))
	///     .build();
	///
	/// assert_eq!(class.object_type(), Some("report"));
	/// assert!(class.schema().is_some());
	/// assert!(!class.can_decode());
	/// ```
	pub fn builder(name: impl Into<String>) -> DocumentClassBuilder {
		DocumentClassBuilder {
			name: name.into(),
			object_type: None,
			schema: None,
			decoder: None,
		}
	}

	/// Describes a [`TypedDocument`], including its serde based decoder.
	pub fn of<T: TypedDocument>() -> Self {
		let mut builder = Self::builder(short_type_name::<T>())
			.object_type(T::OBJECT_TYPE)
			.decoder(|data| {
				serde_json::from_value::<T>(data)
					.map(|value| Box::new(value) as Box<dyn Any + Send + Sync>)
					.map_err(|e| MimeError::Decode(format!("{}: {}", T::OBJECT_TYPE, e)))
			});
		if let Some(schema) = T::schema() {
			builder = builder.schema(schema);
		}
		builder.build()
	}

	/// Human readable class name, used in conflict messages and HTML headings.
	pub fn name(&self) -> &str {
		&self.inner.name
	}

	pub fn object_type(&self) -> Option<&str> {
		self.inner.object_type.as_deref()
	}

	/// The object type, or a validation error naming the class.
	pub fn require_object_type(&self) -> MimeResult<&str> {
		self.object_type().ok_or_else(|| {
			MimeError::Validation(format!(
				"missing object_type on document class {}",
				self.name()
			))
		})
	}

	pub fn schema(&self) -> Option<&Value> {
		self.inner.schema.as_ref()
	}

	/// Whether payloads of this class can be decoded into objects.
	pub fn can_decode(&self) -> bool {
		self.inner.decoder.is_some()
	}

	/// Builds an object of this class from already validated data.
	pub fn decode(&self, data: Value) -> MimeResult<DecodedDocument> {
		let decoder = self.inner.decoder.as_ref().ok_or_else(|| {
			MimeError::NotSupported(format!("document class {} cannot be decoded", self.name()))
		})?;
		Ok(DecodedDocument {
			class: self.clone(),
			value: decoder(data)?,
		})
	}
}

impl PartialEq for DocumentClass {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
			|| (self.inner.name == other.inner.name
				&& self.inner.object_type == other.inner.object_type)
	}
}

impl fmt::Debug for DocumentClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DocumentClass")
			.field("name", &self.inner.name)
			.field("object_type", &self.inner.object_type)
			.field("schema", &self.inner.schema.is_some())
			.field("decodable", &self.inner.decoder.is_some())
			.finish()
	}
}

impl fmt::Display for DocumentClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.inner.name)
	}
}

/// Builder for [`DocumentClass`].
pub struct DocumentClassBuilder {
	name: String,
	object_type: Option<String>,
	schema: Option<Value>,
	decoder: Option<Arc<DecodeFn>>,
}

impl DocumentClassBuilder {
	pub fn object_type(mut self, object_type: impl Into<String>) -> Self {
		self.object_type = Some(object_type.into());
		self
	}

	pub fn schema(mut self, schema: Value) -> Self {
		self.schema = Some(schema);
		self
	}

	/// Sets the decode capability.
	pub fn decoder<F>(mut self, decoder: F) -> Self
	where
		F: Fn(Value) -> MimeResult<Box<dyn Any + Send + Sync>> + Send + Sync + 'static,
	{
		self.decoder = Some(Arc::new(decoder));
		self
	}

	pub fn build(self) -> DocumentClass {
		DocumentClass {
			inner: Arc::new(ClassInner {
				name: self.name,
				object_type: self.object_type,
				schema: self.schema,
				decoder: self.decoder,
			}),
		}
	}
}

impl fmt::Debug for DocumentClassBuilder {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DocumentClassBuilder")
			.field("name", &self.name)
			.field("object_type", &self.object_type)
			.finish()
	}
}

/// An object produced by decoding a payload.
pub struct DecodedDocument {
	class: DocumentClass,
	value: Box<dyn Any + Send + Sync>,
}

impl DecodedDocument {
	/// The class the payload was decoded as.
	pub fn class(&self) -> &DocumentClass {
		&self.class
	}

	pub fn is<T: 'static>(&self) -> bool {
		self.value.is::<T>()
	}

	pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
		self.value.downcast_ref::<T>()
	}

	/// Takes the concrete object out, or gives the document back on a type mismatch.
	pub fn downcast<T: 'static>(self) -> Result<T, Self> {
		let Self { class, value } = self;
		match value.downcast::<T>() {
			Ok(object) => Ok(*object),
			Err(value) => Err(Self { class, value }),
		}
	}
}

impl fmt::Debug for DecodedDocument {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("DecodedDocument")
			.field("class", &self.class)
			.finish_non_exhaustive()
	}
}

/// Structured data of `object`, or an internal error if it has none.
pub fn document_data(object: &dyn Document) -> MimeResult<Value> {
	object
		.to_data()
		.ok_or_else(|| MimeError::Internal("object not serializable".to_string()))
}

/// `my_crate::models::SomeData<T>` -> `SomeData<T>`
fn short_type_name<T: ?Sized>() -> String {
	let full = std::any::type_name::<T>();
	let base = full.split('<').next().unwrap_or(full);
	let start = base.rfind("::").map(|i| i + 2).unwrap_or(0);
	full[start..].to_string()
}
