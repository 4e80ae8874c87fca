//! Mimetype registry
//!
//! Maps resolved mimetype strings to the document type serving them, the document class
//! bound to them (custom types only) and the compiled schema of that class.
//!
//! The registry is filled in two passes. The base pass runs once at construction and
//! adds one entry per non-custom document type. Every [`register`](MimeRegistry::register)
//! call then adds one entry per custom document type and registered class. A mimetype is
//! never claimed twice.

use std::sync::Arc;

use indexmap::IndexMap;
use reinhardt_documents::{
	CompiledSchema, DocumentClass, DocumentType, SchemaValidator, ValidationContext,
};
use reinhardt_mime_exception::{MimeError, MimeResult};
use reinhardt_negotiation::{AcceptHeader, is_restricted_name};
use serde_json::Value;

/// One registry entry.
#[derive(Debug, Clone)]
pub struct MimeEntry {
	document_type: Arc<dyn DocumentType>,
	class: Option<DocumentClass>,
	validator: Option<Arc<dyn CompiledSchema>>,
}

impl MimeEntry {
	pub fn document_type(&self) -> &dyn DocumentType {
		self.document_type.as_ref()
	}

	/// The bound class. Always `None` for non-custom document types.
	pub fn class(&self) -> Option<&DocumentClass> {
		self.class.as_ref()
	}

	/// Compiled schema of the bound class, if it declares one.
	pub fn validator(&self) -> Option<&Arc<dyn CompiledSchema>> {
		self.validator.as_ref()
	}

	/// Whether payloads of this mimetype can be turned into objects.
	pub fn can_decode(&self) -> bool {
		self.class.as_ref().is_some_and(DocumentClass::can_decode)
	}

	/// Whether objects of `class` can be rendered through this entry.
	pub fn serves(&self, class: &DocumentClass) -> bool {
		self.class.as_ref().is_none_or(|bound| bound == class)
	}

	fn handler_name(&self) -> String {
		match &self.class {
			Some(class) => class.name().to_string(),
			None => self.document_type.name().to_string(),
		}
	}
}

#[derive(Debug)]
struct RegisteredClass {
	class: DocumentClass,
	validator: Option<Arc<dyn CompiledSchema>>,
}

/// Conflict-checked mapping from mimetype to [`MimeEntry`], in registration order.
#[derive(Debug)]
pub struct MimeRegistry {
	document_types: Vec<Arc<dyn DocumentType>>,
	schema_validator: Arc<dyn SchemaValidator>,
	entries: IndexMap<String, MimeEntry>,
	classes: IndexMap<String, RegisteredClass>,
	// Validation-only classes: schemas cached without mimetype entries.
	schemas: IndexMap<String, RegisteredClass>,
}

impl MimeRegistry {
	/// Creates a registry holding the base entries of `document_types`.
	///
	/// # Errors
	///
	/// - [`MimeError::Configuration`] when `document_types` is empty
	/// - [`MimeError::Conflict`] when two non-custom types share a mimetype
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	///
	/// use reinhardt_documents::{
	///     DocumentType, HtmlDocumentType, JsonDocumentType, JsonSchemaValidator, TextDocumentType,
	/// };
	/// use reinhardt_mimeprovider::MimeRegistry;
	///
	/// let types: Vec<Arc<dyn DocumentType>> = vec![
	///     Arc::new(HtmlDocumentType::new()),
	///     Arc::new(JsonDocumentType::new()),
	///     Arc::new(TextDocumentType::new()),
	/// ];
	/// let registry = MimeRegistry::new(types, Arc::new(JsonSchemaValidator::new())).unwrap();
	///
	/// let mimetypes: Vec<&str> = registry.mimetypes().keys().map(String::as_str).collect();
	/// assert_eq!(mimetypes, ["text/html", "text/plain"]);
	/// ```
	pub fn new(
		document_types: Vec<Arc<dyn DocumentType>>,
		schema_validator: Arc<dyn SchemaValidator>,
	) -> MimeResult<Self> {
		if document_types.is_empty() {
			return Err(MimeError::Configuration(
				"no document types specified".to_string(),
			));
		}

		let mut entries: IndexMap<String, MimeEntry> = IndexMap::new();
		for document_type in document_types.iter().filter(|t| !t.custom_mime()) {
			let mimetype = document_type.get_mimetype(None)?;
			if let Some(existing) = entries.get(&mimetype) {
				return Err(MimeError::conflict(
					mimetype,
					existing.handler_name(),
					document_type.name(),
				));
			}
			tracing::debug!("registered {} for {}", mimetype, document_type.name());
			entries.insert(
				mimetype,
				MimeEntry {
					document_type: Arc::clone(document_type),
					class: None,
					validator: None,
				},
			);
		}

		Ok(Self {
			document_types,
			schema_validator,
			entries,
			classes: IndexMap::new(),
			schemas: IndexMap::new(),
		})
	}

	/// Registers document classes.
	///
	/// All-or-nothing: on error the registry is left exactly as it was.
	///
	/// # Errors
	///
	/// - [`MimeError::Validation`] when a class has no object type, or one that is not a
	///   valid media type name (RFC 6838)
	/// - [`MimeError::Configuration`] when a class schema does not compile
	/// - [`MimeError::Conflict`] when a resolved mimetype is already taken, either by an
	///   existing entry or by another class of the same call
	pub fn register(&mut self, classes: &[DocumentClass]) -> MimeResult<()> {
		for class in classes {
			let object_type = class.require_object_type()?;
			if !is_restricted_name(object_type) {
				return Err(MimeError::Validation(format!(
					"invalid object_type {:?} on document class {}: not a media type name",
					object_type,
					class.name()
				)));
			}
		}

		let mut staged_classes: IndexMap<String, RegisteredClass> = IndexMap::new();
		for class in classes {
			let object_type = class.require_object_type()?;
			if self.classes.contains_key(object_type) || staged_classes.contains_key(object_type)
			{
				continue;
			}
			let validator = match class.schema() {
				Some(schema) => Some(self.schema_validator.compile(schema)?),
				None => None,
			};
			staged_classes.insert(
				object_type.to_string(),
				RegisteredClass {
					class: class.clone(),
					validator,
				},
			);
		}

		let mut staged: IndexMap<String, MimeEntry> = IndexMap::new();
		for document_type in self.document_types.iter().filter(|t| t.custom_mime()) {
			for class in classes {
				let mimetype = document_type.get_mimetype(Some(class))?;
				if let Some(existing) = self.entries.get(&mimetype).or_else(|| staged.get(&mimetype))
				{
					return Err(MimeError::conflict(
						mimetype,
						existing.handler_name(),
						class.name(),
					));
				}

				let object_type = class.require_object_type()?;
				let validator = staged_classes
					.get(object_type)
					.or_else(|| self.classes.get(object_type))
					.and_then(|registered| registered.validator.clone());

				staged.insert(
					mimetype,
					MimeEntry {
						document_type: Arc::clone(document_type),
						class: Some(class.clone()),
						validator,
					},
				);
			}
		}

		for (mimetype, entry) in staged {
			tracing::debug!(
				"registered {} for {} ({})",
				mimetype,
				entry.handler_name(),
				entry.document_type.name()
			);
			self.entries.insert(mimetype, entry);
		}
		self.classes.extend(staged_classes);

		Ok(())
	}

	/// Compiles and caches the schema of `class` without adding any mimetype entry.
	///
	/// For classes that are rendered but never negotiated, such as error documents.
	/// Classes already known to the registry are left alone.
	///
	/// # Errors
	///
	/// - [`MimeError::Validation`] when the class has no object type
	/// - [`MimeError::Configuration`] when the class schema does not compile
	pub fn precompile(&mut self, class: &DocumentClass) -> MimeResult<()> {
		let object_type = class.require_object_type()?;
		if self.registered(class).is_some() {
			return Ok(());
		}
		let validator = match class.schema() {
			Some(schema) => Some(self.schema_validator.compile(schema)?),
			None => None,
		};
		tracing::debug!("cached schema of {}", class);
		self.schemas.insert(
			object_type.to_string(),
			RegisteredClass {
				class: class.clone(),
				validator,
			},
		);
		Ok(())
	}

	/// The cached compiled schema of `class`, registered or precompiled.
	pub fn compiled_schema(&self, class: &DocumentClass) -> Option<&Arc<dyn CompiledSchema>> {
		self.registered(class)
			.and_then(|registered| registered.validator.as_ref())
	}

	pub fn get(&self, mimetype: &str) -> Option<&MimeEntry> {
		self.entries.get(mimetype)
	}

	/// All entries, in registration order.
	pub fn mimetypes(&self) -> &IndexMap<String, MimeEntry> {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn document_types(&self) -> &[Arc<dyn DocumentType>] {
		&self.document_types
	}

	/// Registered classes, in registration order.
	pub fn classes(&self) -> impl Iterator<Item = &DocumentClass> {
		self.classes.values().map(|registered| &registered.class)
	}

	/// Looks up a registered class by object type.
	pub fn class(&self, object_type: &str) -> Option<&DocumentClass> {
		self.classes.get(object_type).map(|registered| &registered.class)
	}

	/// Mimetypes able to represent objects of `class`, in registration order.
	pub fn mimetypes_for<'a>(&'a self, class: &'a DocumentClass) -> impl Iterator<Item = &'a str> {
		self.entries
			.iter()
			.filter(move |(_, entry)| entry.serves(class))
			.map(|(mimetype, _)| mimetype.as_str())
	}

	/// Picks the entry `accept` prefers among those able to represent `class`.
	///
	/// Ties in quality and specificity go to the first registered mimetype.
	pub fn negotiate(
		&self,
		accept: &AcceptHeader,
		class: &DocumentClass,
	) -> Option<(&str, &MimeEntry)> {
		let mimetype = accept.best_match(self.mimetypes_for(class))?;
		self.entries
			.get_key_value(mimetype)
			.map(|(mimetype, entry)| (mimetype.as_str(), entry))
	}

	fn registered(&self, class: &DocumentClass) -> Option<&RegisteredClass> {
		let object_type = class.object_type()?;
		[&self.classes, &self.schemas]
			.into_iter()
			.filter_map(|known| known.get(object_type))
			.find(|registered| registered.class == *class)
	}
}

impl ValidationContext for MimeRegistry {
	fn validate(&self, class: &DocumentClass, data: &Value) -> MimeResult<()> {
		match self.registered(class) {
			Some(registered) => match &registered.validator {
				Some(validator) => validator.validate(data),
				None => Ok(()),
			},
			// Unknown classes are validated on the spot.
			None => match class.schema() {
				Some(schema) => self.schema_validator.compile(schema)?.validate(data),
				None => Ok(()),
			},
		}
	}
}
