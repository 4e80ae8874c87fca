//! Request body parsing

use reinhardt_documents::{DecodedDocument, DocumentClass, TypedDocument};
use reinhardt_mime_exception::{MimeError, MimeResult};
use reinhardt_negotiation::content_type_essence;

use crate::registry::MimeRegistry;

/// Decodes a request body according to its declared content type.
///
/// Returns `Ok(None)` when there is no body: the body is empty or no content type was
/// declared. Parameters such as `charset` are ignored when looking the type up.
///
/// # Errors
///
/// - [`MimeError::BadRequest`] when the content type is not registered or its entry
///   cannot decode (no bound class, or a class without decoder)
/// - [`MimeError::Decode`] when the body is malformed
/// - [`MimeError::Validation`] when the data does not match the class schema
pub fn parse_body(
	registry: &MimeRegistry,
	body: &[u8],
	content_type: Option<&str>,
) -> MimeResult<Option<DecodedDocument>> {
	let Some(content_type) = content_type.map(str::trim).filter(|c| !c.is_empty()) else {
		return Ok(None);
	};
	if body.is_empty() {
		return Ok(None);
	}

	let unsupported = || MimeError::BadRequest(format!("unsupported content-type: {}", content_type));

	let mimetype = content_type_essence(content_type).ok_or_else(unsupported)?;
	let entry = registry.get(&mimetype).ok_or_else(unsupported)?;
	let class = match entry.class() {
		Some(class) if class.can_decode() => class,
		_ => return Err(unsupported()),
	};

	let decoded = entry.document_type().parse(registry, class, body)?;
	tracing::debug!("parsed {} body as {}", mimetype, class);
	Ok(Some(decoded))
}

/// Like [`parse_body`], requiring the body to be a `T`.
///
/// A body of another registered class is rejected with [`MimeError::BadRequest`].
pub fn parse_body_as<T: TypedDocument>(
	registry: &MimeRegistry,
	body: &[u8],
	content_type: Option<&str>,
) -> MimeResult<Option<T>> {
	let Some(decoded) = parse_body(registry, body, content_type)? else {
		return Ok(None);
	};

	let expected = DocumentClass::of::<T>();
	if *decoded.class() != expected {
		return Err(MimeError::BadRequest(format!(
			"expected a {} body, got {}",
			T::OBJECT_TYPE,
			decoded.class()
		)));
	}

	decoded.downcast::<T>().map(Some).map_err(|decoded| {
		MimeError::Internal(format!(
			"{} decoded to an unexpected type",
			decoded.class()
		))
	})
}
