//! Errors of the mime layer.
//!
//! # Examples
//!
//! ```
//! use reinhardt_mime::exception::MimeError;
//!
//! let error = MimeError::Decode("trailing comma".to_string());
//! assert!(error.is_client_error());
//! ```

pub use reinhardt_mime_exception::*;
