//! Document classes, validation and the document types that encode them.

pub use reinhardt_documents::*;
