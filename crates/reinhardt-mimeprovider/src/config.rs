//! Provider settings
//!
//! Settings can be written by hand or loaded from TOML:
//!
//! ```toml
//! renderer_name = "mime"
//! attribute_name = "mime_body"
//!
//! [text]
//! depth = 2
//! indent = 2
//! width = 100
//!
//! [html]
//! title = "API"
//! ```

use std::path::Path;

use reinhardt_documents::{HtmlOptions, TextOptions};
use reinhardt_mime_exception::{MimeError, MimeResult};
use serde::{Deserialize, Serialize};

/// Settings of a [`MimeProvider`](crate::MimeProvider).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MimeSettings {
	/// Name under which the host framework registers the renderer.
	pub renderer_name: String,

	/// Name of the request attribute holding the parsed body.
	pub attribute_name: String,

	/// Layout of the default `text/plain` representation.
	pub text: TextOptions,

	/// Page options of the default `text/html` representation.
	pub html: HtmlOptions,
}

impl Default for MimeSettings {
	fn default() -> Self {
		Self {
			renderer_name: "mime".to_string(),
			attribute_name: "mime_body".to_string(),
			text: TextOptions::default(),
			html: HtmlOptions::default(),
		}
	}
}

impl MimeSettings {
	pub fn with_renderer_name(mut self, name: impl Into<String>) -> Self {
		self.renderer_name = name.into();
		self
	}

	pub fn with_attribute_name(mut self, name: impl Into<String>) -> Self {
		self.attribute_name = name.into();
		self
	}

	pub fn with_text(mut self, text: TextOptions) -> Self {
		self.text = text;
		self
	}

	pub fn with_html(mut self, html: HtmlOptions) -> Self {
		self.html = html;
		self
	}

	/// Parses settings from a TOML string. Missing keys keep their defaults.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_mimeprovider::MimeSettings;
	///
	/// let settings = MimeSettings::from_toml_str("[text]\ndepth = 3").unwrap();
	/// assert_eq!(settings.text.depth, 3);
	/// assert_eq!(settings.text.width, 80);
	/// assert_eq!(settings.renderer_name, "mime");
	/// ```
	pub fn from_toml_str(content: &str) -> MimeResult<Self> {
		toml::from_str(content)
			.map_err(|e| MimeError::Configuration(format!("invalid mime settings: {}", e)))
	}

	/// Loads settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> MimeResult<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| {
			MimeError::Configuration(format!("cannot read {}: {}", path.display(), e))
		})?;
		Self::from_toml_str(&content)
	}

	/// Checks the settings as a whole.
	pub fn validate(&self) -> MimeResult<()> {
		let mut problems = Vec::new();

		if self.renderer_name.trim().is_empty() {
			problems.push("renderer_name must not be empty");
		}
		if self.attribute_name.trim().is_empty() {
			problems.push("attribute_name must not be empty");
		}
		if self.text.indent == 0 {
			problems.push("text.indent must be positive");
		}
		if self.text.width == 0 {
			problems.push("text.width must be positive");
		}

		if problems.is_empty() {
			Ok(())
		} else {
			Err(MimeError::Configuration(problems.join(", ")))
		}
	}
}
