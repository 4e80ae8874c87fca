//! Media type and media range parsing

use std::fmt;

/// How precisely a media range names a media type.
///
/// Ordered from least to most specific, so `Ord` can be used for tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Specificity {
	/// `*/*`
	Any,
	/// `type/*`
	Type,
	/// `type/subtype`
	Exact,
}

/// A media type (`text/html`) or media range (`text/*`, `*/*`) with its quality weight.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaType {
	pub main_type: String,
	pub subtype: String,
	/// Parameters other than `q`, in header order.
	pub parameters: Vec<(String, String)>,
	pub quality: f32,
}

impl MediaType {
	/// Creates a media type with quality 1.0 and no parameters.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::MediaType;
	///
	/// let html = MediaType::new("text", "html");
	/// assert_eq!(html.essence(), "text/html");
	/// assert_eq!(html.quality, 1.0);
	/// ```
	pub fn new(main_type: impl Into<String>, subtype: impl Into<String>) -> Self {
		Self {
			main_type: main_type.into().to_ascii_lowercase(),
			subtype: subtype.into().to_ascii_lowercase(),
			parameters: Vec::new(),
			quality: 1.0,
		}
	}

	/// Parses a single media type / media range, including parameters.
	///
	/// Returns `None` for malformed input: missing `/`, empty parts, a wildcard main
	/// type with a concrete subtype, or a quality outside `0..=1`.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::MediaType;
	///
	/// let parsed = MediaType::parse("application/json; charset=utf-8; q=0.5").unwrap();
	/// assert_eq!(parsed.essence(), "application/json");
	/// assert_eq!(parsed.quality, 0.5);
	/// assert_eq!(parsed.parameter("charset"), Some("utf-8"));
	///
	/// assert!(MediaType::parse("json").is_none());
	/// assert!(MediaType::parse("*/json").is_none());
	/// ```
	pub fn parse(value: &str) -> Option<Self> {
		let mut parts = value.split(';');
		let essence = parts.next()?.trim();
		let (main_type, subtype) = essence.split_once('/')?;
		let (main_type, subtype) = (main_type.trim(), subtype.trim());

		if main_type.is_empty() || subtype.is_empty() || subtype.contains('/') {
			return None;
		}
		if main_type == "*" && subtype != "*" {
			return None;
		}

		let mut media_type = Self::new(main_type, subtype);

		for parameter in parts {
			let parameter = parameter.trim();
			if parameter.is_empty() {
				continue;
			}
			let (key, value) = parameter.split_once('=')?;
			let key = key.trim().to_ascii_lowercase();
			let value = value.trim().trim_matches('"');

			if key == "q" {
				let quality: f32 = value.parse().ok()?;
				if !(0.0..=1.0).contains(&quality) {
					return None;
				}
				media_type.quality = quality;
			} else {
				media_type.parameters.push((key, value.to_string()));
			}
		}

		Some(media_type)
	}

	/// `type/subtype` without parameters.
	pub fn essence(&self) -> String {
		format!("{}/{}", self.main_type, self.subtype)
	}

	/// Looks up a parameter (other than `q`) by name.
	pub fn parameter(&self, name: &str) -> Option<&str> {
		self.parameters
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	pub fn specificity(&self) -> Specificity {
		match (self.main_type.as_str(), self.subtype.as_str()) {
			("*", _) => Specificity::Any,
			(_, "*") => Specificity::Type,
			_ => Specificity::Exact,
		}
	}

	/// Whether this media range admits `other`.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::MediaType;
	///
	/// let html = MediaType::new("text", "html");
	/// assert!(MediaType::new("*", "*").matches(&html));
	/// assert!(MediaType::new("text", "*").matches(&html));
	/// assert!(MediaType::new("text", "html").matches(&html));
	/// assert!(!MediaType::new("text", "plain").matches(&html));
	/// ```
	pub fn matches(&self, other: &MediaType) -> bool {
		match self.specificity() {
			Specificity::Any => true,
			Specificity::Type => self.main_type == other.main_type,
			Specificity::Exact => {
				self.main_type == other.main_type && self.subtype == other.subtype
			}
		}
	}
}

impl fmt::Display for MediaType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.main_type, self.subtype)?;
		for (key, value) in &self.parameters {
			write!(f, "; {}={}", key, value)?;
		}
		if self.quality < 1.0 {
			write!(f, "; q={}", self.quality)?;
		}
		Ok(())
	}
}

/// Strips parameters from a `Content-Type` value and normalizes its case.
///
/// # Examples
///
/// ```
/// use reinhardt_negotiation::content_type_essence;
///
/// assert_eq!(
///     content_type_essence("Application/SomeData+JSON; charset=utf-8"),
///     Some("application/somedata+json".to_string())
/// );
/// assert_eq!(content_type_essence("   "), None);
/// ```
pub fn content_type_essence(content_type: &str) -> Option<String> {
	MediaType::parse(content_type).map(|media_type| media_type.essence())
}

/// Whether `name` is a valid type or subtype name (RFC 6838, section 4.2).
///
/// Names start with a letter or digit, continue with letters, digits and
/// `!#$&-^_.+`, and are at most 127 characters long.
///
/// # Examples
///
/// ```
/// use reinhardt_negotiation::is_restricted_name;
///
/// assert!(is_restricted_name("somedata"));
/// assert!(is_restricted_name("vnd.example-v2"));
/// assert!(!is_restricted_name("some data"));
/// assert!(!is_restricted_name("a/b"));
/// ```
pub fn is_restricted_name(name: &str) -> bool {
	let mut chars = name.chars();
	let Some(first) = chars.next() else {
		return false;
	};
	name.len() <= 127
		&& first.is_ascii_alphanumeric()
		&& chars.all(|c| c.is_ascii_alphanumeric() || "!#$&-^_.+".contains(c))
}
