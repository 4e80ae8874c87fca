//! Media types and `Accept` header negotiation.
//!
//! # Examples
//!
//! ```
//! use reinhardt_mime::negotiation::AcceptHeader;
//!
//! let accept = AcceptHeader::parse("text/*;q=0.5, application/json");
//! assert_eq!(
//!     accept.best_match(["text/plain", "application/json"]),
//!     Some("application/json")
//! );
//! ```

pub use reinhardt_negotiation::*;
