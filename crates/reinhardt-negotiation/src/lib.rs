//! # Reinhardt Negotiation
//!
//! Media type parsing and weighted `Accept` header matching.
//!
//! ## Ranking
//!
//! An offered media type is ranked by the quality of the most specific media range
//! that admits it. Ranges with `q=0` exclude the offer. Between offers of equal
//! quality, the one admitted by the more specific range (`type/subtype` over
//! `type/*` over `*/*`) wins, and after that the offer listed first.
//!
//! ## Example
//!
//! ```
//! use reinhardt_negotiation::AcceptHeader;
//!
//! let accept = AcceptHeader::from_header(Some("text/*;q=0.5, application/somedata+json"));
//! let offers = ["text/html", "application/somedata+json", "text/plain"];
//! assert_eq!(accept.best_match(offers), Some("application/somedata+json"));
//! ```

pub mod accept;
pub mod media_type;

pub use accept::{AcceptHeader, Preference};
pub use media_type::{MediaType, Specificity, content_type_essence, is_restricted_name};
