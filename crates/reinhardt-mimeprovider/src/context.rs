//! Request context seen by the renderer and the body parser

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE, HeaderName};
use http::{HeaderValue, Request, Response, StatusCode};

/// What the mime layer needs from the host framework for one request.
pub trait RequestContext {
	/// Buffered request body.
	fn body(&self) -> &[u8];

	/// Declared `Content-Type` of the request body.
	fn content_type(&self) -> Option<&str>;

	/// Raw `Accept` header, repeated headers joined with `, `.
	fn accept(&self) -> Option<&str>;

	fn status(&self) -> StatusCode;

	fn set_status(&mut self, status: StatusCode);

	fn set_response_content_type(&mut self, mimetype: &str);
}

/// A [`RequestContext`] over an `http` request, collecting response metadata.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use http::{Request, StatusCode};
/// use reinhardt_mimeprovider::{HttpExchange, RequestContext};
///
/// let request = Request::builder()
///     .header("Accept", "text/plain")
///     .body(Bytes::new())
///     .unwrap();
///
/// let mut exchange = HttpExchange::new(request);
/// assert_eq!(exchange.accept(), Some("text/plain"));
///
/// exchange.set_status(StatusCode::CREATED);
/// exchange.set_response_content_type("text/plain");
/// let response = exchange.into_response(Bytes::from_static(b"done"));
///
/// assert_eq!(response.status(), StatusCode::CREATED);
/// assert_eq!(response.headers()["content-type"], "text/plain");
/// ```
#[derive(Debug)]
pub struct HttpExchange {
	request: Request<Bytes>,
	accept: Option<String>,
	status: StatusCode,
	content_type: Option<String>,
}

impl HttpExchange {
	pub fn new(request: Request<Bytes>) -> Self {
		let accept = joined_header(&request, ACCEPT);
		Self {
			request,
			accept,
			status: StatusCode::OK,
			content_type: None,
		}
	}

	pub fn request(&self) -> &Request<Bytes> {
		&self.request
	}

	/// Content type chosen for the response so far.
	pub fn response_content_type(&self) -> Option<&str> {
		self.content_type.as_deref()
	}

	/// Builds the response from the collected status and content type.
	pub fn into_response(self, body: Bytes) -> Response<Bytes> {
		let mut response = Response::new(body);
		*response.status_mut() = self.status;
		if let Some(content_type) = self.content_type {
			match HeaderValue::try_from(content_type) {
				Ok(value) => {
					response.headers_mut().insert(CONTENT_TYPE, value);
				}
				Err(e) => tracing::warn!("dropping invalid response content type: {}", e),
			}
		}
		response
	}

	fn header(&self, name: HeaderName) -> Option<&str> {
		self.request
			.headers()
			.get(name)
			.and_then(|value| value.to_str().ok())
	}
}

/// Repeated list headers combined into one value, as RFC 9110 section 5.3 allows.
/// Values that are not visible ASCII are skipped.
fn joined_header(request: &Request<Bytes>, name: HeaderName) -> Option<String> {
	let values: Vec<&str> = request
		.headers()
		.get_all(name)
		.iter()
		.filter_map(|value| value.to_str().ok())
		.collect();
	if values.is_empty() {
		None
	} else {
		Some(values.join(", "))
	}
}

impl From<Request<Bytes>> for HttpExchange {
	fn from(request: Request<Bytes>) -> Self {
		Self::new(request)
	}
}

impl RequestContext for HttpExchange {
	fn body(&self) -> &[u8] {
		self.request.body()
	}

	fn content_type(&self) -> Option<&str> {
		self.header(CONTENT_TYPE)
	}

	fn accept(&self) -> Option<&str> {
		self.accept.as_deref()
	}

	fn status(&self) -> StatusCode {
		self.status
	}

	fn set_status(&mut self, status: StatusCode) {
		self.status = status;
	}

	fn set_response_content_type(&mut self, mimetype: &str) {
		self.content_type = Some(mimetype.to_string());
	}
}
