//! Plain text document type
//!
//! A structural pretty-print of the document data, meant for humans and `curl`.

use bytes::Bytes;
use reinhardt_mime_exception::{MimeError, MimeResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{DecodedDocument, Document, DocumentClass, document_data};
use crate::document_type::DocumentType;
use crate::validator::ValidationContext;

/// Layout options for [`TextDocumentType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
	/// Container levels shown before nested containers collapse to `[...]` / `{...}`.
	pub depth: usize,
	/// Spaces per nesting level in multi-line output.
	pub indent: usize,
	/// Containers that fit in this many columns are printed on one line.
	pub width: usize,
}

impl Default for TextOptions {
	fn default() -> Self {
		Self {
			depth: 1,
			indent: 4,
			width: 80,
		}
	}
}

/// Plain text representation of documents, served as `text/plain`.
#[derive(Debug, Clone, Default)]
pub struct TextDocumentType {
	options: TextOptions,
}

impl TextDocumentType {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_options(options: TextOptions) -> Self {
		Self { options }
	}

	/// Pretty-prints `data` with these options.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_documents::TextDocumentType;
	/// use serde_json::json;
	///
	/// let text = TextDocumentType::new();
	/// assert_eq!(
	///     text.format(&json!({"b": [1, 2], "a": "x"})),
	///     r#"{"a": "x", "b": [...]}"#
	/// );
	/// ```
	pub fn format(&self, data: &Value) -> String {
		self.format_value(data, 0, 0)
	}

	// Recursion is bounded by `depth`: deeper containers are never descended into.
	fn format_value(&self, value: &Value, level: usize, column: usize) -> String {
		let (open, close, entries) = match value {
			Value::Array(items) if !items.is_empty() => {
				if level >= self.options.depth {
					return "[...]".to_string();
				}
				let entries = items
					.iter()
					.map(|item| self.format_value(item, level + 1, column + self.options.indent))
					.collect::<Vec<_>>();
				('[', ']', entries)
			}
			Value::Object(map) if !map.is_empty() => {
				if level >= self.options.depth {
					return "{...}".to_string();
				}
				let mut keys: Vec<&String> = map.keys().collect();
				keys.sort();
				let entries = keys
					.into_iter()
					.map(|key| {
						format!(
							"{}: {}",
							Value::String(key.clone()),
							self.format_value(&map[key], level + 1, column + self.options.indent)
						)
					})
					.collect::<Vec<_>>();
				('{', '}', entries)
			}
			scalar => return scalar.to_string(),
		};

		let compact = format!("{}{}{}", open, entries.join(", "), close);
		if !compact.contains('\n') && column + compact.chars().count() <= self.options.width {
			return compact;
		}

		let inner = " ".repeat(column + self.options.indent);
		let mut output = String::new();
		output.push(open);
		output.push('\n');
		for (i, entry) in entries.iter().enumerate() {
			output.push_str(&inner);
			output.push_str(entry);
			if i + 1 < entries.len() {
				output.push(',');
			}
			output.push('\n');
		}
		output.push_str(&" ".repeat(column));
		output.push(close);
		output
	}
}

impl DocumentType for TextDocumentType {
	fn name(&self) -> &str {
		"text"
	}

	fn custom_mime(&self) -> bool {
		false
	}

	fn mime(&self) -> &str {
		"text/plain"
	}

	fn parse(
		&self,
		_validation: &dyn ValidationContext,
		_class: &DocumentClass,
		_raw: &[u8],
	) -> MimeResult<DecodedDocument> {
		Err(MimeError::NotSupported(
			"text/plain cannot be parsed".to_string(),
		))
	}

	fn render(
		&self,
		validation: &dyn ValidationContext,
		object: &dyn Document,
	) -> MimeResult<Bytes> {
		let data = document_data(object)?;
		validation.validate(&object.document_class(), &data)?;
		Ok(Bytes::from(self.format(&data)))
	}
}
