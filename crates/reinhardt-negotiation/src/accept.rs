//! Accept header parsing

use super::media_type::{MediaType, Specificity};

/// Represents an Accept header
#[derive(Debug, Clone)]
pub struct AcceptHeader {
	/// Accepted media ranges, highest quality first. Header order is kept among
	/// ranges of equal quality.
	pub media_types: Vec<MediaType>,
}

/// How well an offered media type is accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preference {
	pub quality: f32,
	/// Specificity of the range that decided the quality.
	pub specificity: Specificity,
}

impl AcceptHeader {
	/// Parses an Accept header string into an AcceptHeader struct
	///
	/// Malformed entries are skipped.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::AcceptHeader;
	///
	/// let accept = AcceptHeader::parse("application/json, text/html; q=0.9");
	/// assert_eq!(accept.media_types.len(), 2);
	/// assert_eq!(accept.media_types[0].quality, 1.0);
	/// assert_eq!(accept.media_types[1].quality, 0.9);
	///
	/// let complex = AcceptHeader::parse("text/html;q=0.1, application/json; q=0.8, bogus");
	/// assert_eq!(complex.media_types.len(), 2);
	/// // Sorted by quality
	/// assert_eq!(complex.media_types[0].subtype, "json");
	/// ```
	pub fn parse(header: &str) -> Self {
		let mut media_types: Vec<MediaType> = header
			.split(',')
			.filter_map(|s| MediaType::parse(s.trim()))
			.collect();

		// Stable sort by quality (highest first)
		media_types.sort_by(|a, b| b.quality.total_cmp(&a.quality));

		Self { media_types }
	}

	/// An Accept header admitting everything (`*/*`).
	pub fn any() -> Self {
		Self {
			media_types: vec![MediaType::new("*", "*")],
		}
	}

	/// Parses an optional header; a missing or blank header accepts everything.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::AcceptHeader;
	///
	/// assert_eq!(AcceptHeader::from_header(None).media_types[0].essence(), "*/*");
	/// assert_eq!(AcceptHeader::from_header(Some("  ")).media_types[0].essence(), "*/*");
	/// assert_eq!(AcceptHeader::from_header(Some("text/html")).media_types.len(), 1);
	/// ```
	pub fn from_header(header: Option<&str>) -> Self {
		match header.map(str::trim) {
			Some(value) if !value.is_empty() => Self::parse(value),
			_ => Self::any(),
		}
	}

	/// Creates an empty AcceptHeader with no media types
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::AcceptHeader;
	///
	/// let empty = AcceptHeader::empty();
	/// assert_eq!(empty.media_types.len(), 0);
	/// ```
	pub fn empty() -> Self {
		Self {
			media_types: Vec::new(),
		}
	}

	/// How `offer` is accepted by this header.
	///
	/// The most specific matching range decides the quality, so
	/// `text/*;q=0.5, text/html` accepts `text/html` at 1.0. Returns `None` when no
	/// range matches or the deciding range has `q=0`.
	pub fn preference(&self, offer: &MediaType) -> Option<Preference> {
		let mut decided: Option<&MediaType> = None;

		// Ranges are sorted by quality, so the first hit per specificity is the best one.
		for range in self.media_types.iter().filter(|range| range.matches(offer)) {
			match decided {
				Some(current) if current.specificity() >= range.specificity() => {}
				_ => decided = Some(range),
			}
		}

		let range = decided?;
		if range.quality <= 0.0 {
			return None;
		}
		Some(Preference {
			quality: range.quality,
			specificity: range.specificity(),
		})
	}

	/// Finds the best matching media type from available options
	///
	/// Ranking is by quality, then by the specificity of the deciding range, then by
	/// the order of `available`.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::{AcceptHeader, MediaType};
	///
	/// let accept = AcceptHeader::parse("application/json, text/html");
	/// let available = vec![
	///     MediaType::new("text", "html"),
	///     MediaType::new("application", "xml"),
	/// ];
	/// let best = accept.find_best_match(&available);
	/// assert!(best.is_some());
	/// assert_eq!(best.unwrap().subtype, "html");
	///
	/// let no_match = AcceptHeader::parse("application/json");
	/// let result = no_match.find_best_match(&available);
	/// assert!(result.is_none());
	/// ```
	pub fn find_best_match(&self, available: &[MediaType]) -> Option<MediaType> {
		let mut best: Option<(&MediaType, Preference)> = None;

		for offer in available {
			let Some(preference) = self.preference(offer) else {
				continue;
			};
			let better = match &best {
				None => true,
				Some((_, current)) => {
					preference.quality > current.quality
						|| (preference.quality == current.quality
							&& preference.specificity > current.specificity)
				}
			};
			if better {
				best = Some((offer, preference));
			}
		}

		best.map(|(offer, _)| offer.clone())
	}

	/// Like [`find_best_match`](Self::find_best_match), over mimetype strings.
	///
	/// Offers that are not valid media types are ignored.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_negotiation::AcceptHeader;
	///
	/// let offers = ["application/foo+json", "application/bar+json", "text/html"];
	///
	/// let accept = AcceptHeader::parse("*/*");
	/// assert_eq!(accept.best_match(offers), Some("application/foo+json"));
	///
	/// let accept = AcceptHeader::parse("*/*;q=0.5, text/html");
	/// assert_eq!(accept.best_match(offers), Some("text/html"));
	/// ```
	pub fn best_match<'a, I>(&self, offers: I) -> Option<&'a str>
	where
		I: IntoIterator<Item = &'a str>,
	{
		let offers: Vec<(&'a str, MediaType)> = offers
			.into_iter()
			.filter_map(|offer| MediaType::parse(offer).map(|media_type| (offer, media_type)))
			.collect();
		let available: Vec<MediaType> = offers.iter().map(|(_, m)| m.clone()).collect();

		let best = self.find_best_match(&available)?;
		offers
			.into_iter()
			.find(|(_, media_type)| *media_type == best)
			.map(|(offer, _)| offer)
	}
}
