//! Registry, renderer, body parsing and the provider bundling them.
//!
//! # Examples
//!
//! ```
//! use reinhardt_mime::provider::MimeProvider;
//!
//! let provider = MimeProvider::new(&[]).unwrap();
//! let mimetypes: Vec<&str> = provider
//!     .registry()
//!     .mimetypes()
//!     .keys()
//!     .map(String::as_str)
//!     .collect();
//! assert_eq!(mimetypes, ["text/html", "text/plain"]);
//! ```

pub use reinhardt_mimeprovider::*;
