//! Facade Tests
//!
//! Request/response cycles written against the `reinhardt_mime` prelude only.
//!
//! # Test Categories
//!
//! - Exchange: parse a request body, respond in the negotiated representation
//! - Errors: invalid bodies answered with an error document
//! - Client: reading a response back through the shared registry

use bytes::Bytes;
use http::{Request, StatusCode};
use reinhardt_mime::prelude::*;
use rstest::*;
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Order {
	item: String,
	quantity: u32,
}

impl TypedDocument for Order {
	const OBJECT_TYPE: &'static str = "order";

	fn schema() -> Option<serde_json::Value> {
		Some(json!({
			"type": "object",
			"properties": {
				"item": {"type": "string"},
				"quantity": {"type": "integer", "minimum": 1}
			},
			"required": ["item", "quantity"]
		}))
	}
}

#[fixture]
fn provider() -> MimeProvider {
	MimeProvider::builder().document::<Order>().build().unwrap()
}

fn exchange(body: &'static [u8], content_type: &str, accept: &str) -> HttpExchange {
	let request = Request::builder()
		.header("Content-Type", content_type)
		.header("Accept", accept)
		.body(Bytes::from_static(body))
		.unwrap();
	HttpExchange::new(request)
}

// ============================================================================
// Exchange
// ============================================================================

#[rstest]
fn test_echo_exchange(provider: MimeProvider) {
	let mut exchange = exchange(
		br#"{"item": "tea", "quantity": 2}"#,
		"application/order+json; charset=utf-8",
		"application/order+json",
	);

	let decoded = provider.request_body(&exchange).unwrap().unwrap();
	let order = decoded.downcast::<Order>().unwrap();
	assert_eq!(order.quantity, 2);

	let body = provider.respond(&order, &mut exchange);
	let response = exchange.into_response(body);

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(response.headers()["content-type"], "application/order+json");
	let echoed: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
	assert_eq!(echoed, json!({"item": "tea", "quantity": 2}));
}

// ============================================================================
// Errors
// ============================================================================

#[rstest]
fn test_invalid_body_is_answered_with_error_document(provider: MimeProvider) {
	let mut exchange = exchange(
		br#"{"item": "tea", "quantity": 0}"#,
		"application/order+json",
		"application/order+json",
	);

	let outcome = provider.request_body(&exchange);
	let error = outcome.err().unwrap();
	assert!(matches!(error, MimeError::Validation(_)));

	let body = provider.respond_error(&error, &mut exchange);
	let response = exchange.into_response(body);

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(response.headers()["content-type"], "text/html");
	let page = std::str::from_utf8(response.body()).unwrap();
	assert!(page.contains("validation failed"));
}

// ============================================================================
// Client
// ============================================================================

#[rstest]
fn test_response_reads_back(provider: MimeProvider) {
	let order = Order {
		item: "cake".to_string(),
		quantity: 1,
	};
	let mut exchange = exchange(b"", "text/plain", "application/order+json");

	let body = provider.respond(&order, &mut exchange);
	let response = exchange.into_response(body);

	assert_eq!(provider.reader().read_as::<Order>(&response).unwrap(), order);
}
