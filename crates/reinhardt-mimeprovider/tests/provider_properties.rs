//! Mime Provider Property Tests
//!
//! Registry, negotiation, rendering and parsing behaviour of a complete provider.
//!
//! # Test Categories
//!
//! - Registry shape: base entries, per-class entries, conflicts
//! - Negotiation: wildcard determinism, unacceptable types
//! - Parsing: the SomeData scenario, round-trips
//! - Error rendering: status codes and error documents
//! - Logging of request failures

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use http::{Request, StatusCode};
use proptest::prelude::*;
use reinhardt_documents::{
	Document, DocumentClass, DocumentType, HtmlDocumentType, JsonDocumentType, TypedDocument,
};
use reinhardt_mime_exception::MimeError;
use reinhardt_mimeprovider::{HttpExchange, MimeProvider, RequestContext};
use rstest::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SomeData {
	string: String,
	integer: i64,
	somelist: Vec<String>,
}

impl TypedDocument for SomeData {
	const OBJECT_TYPE: &'static str = "somedata";

	fn schema() -> Option<Value> {
		Some(json!({
			"type": "object",
			"properties": {
				"string": {"type": "string"},
				"integer": {"type": "number"},
				"somelist": {"type": "array"}
			},
			"required": ["string", "integer", "somelist"]
		}))
	}
}

/// A document that cannot produce data.
struct Opaque;

impl Document for Opaque {
	fn document_class(&self) -> DocumentClass {
		DocumentClass::builder("Opaque").object_type("opaque").build()
	}

	fn to_data(&self) -> Option<Value> {
		None
	}
}

// =============================================================================
// Fixtures
// =============================================================================

#[fixture]
fn provider() -> MimeProvider {
	MimeProvider::builder()
		.document::<SomeData>()
		.class(Opaque.document_class())
		.build()
		.unwrap()
}

fn exchange(accept: Option<&str>, content_type: Option<&str>, body: &'static [u8]) -> HttpExchange {
	let mut builder = Request::builder();
	if let Some(accept) = accept {
		builder = builder.header("Accept", accept);
	}
	if let Some(content_type) = content_type {
		builder = builder.header("Content-Type", content_type);
	}
	HttpExchange::new(builder.body(Bytes::from_static(body)).unwrap())
}

fn classes(object_types: &[String]) -> Vec<DocumentClass> {
	object_types
		.iter()
		.map(|object_type| {
			DocumentClass::builder(object_type.to_uppercase())
				.object_type(object_type.clone())
				.build()
		})
		.collect()
}

// =============================================================================
// Registry shape
// =============================================================================

#[rstest]
fn test_registry_contents(provider: MimeProvider) {
	let mimetypes: Vec<&str> = provider
		.registry()
		.mimetypes()
		.keys()
		.map(String::as_str)
		.collect();
	assert_eq!(
		mimetypes,
		[
			"text/html",
			"text/plain",
			"application/somedata+json",
			"application/opaque+json",
		]
	);
}

#[rstest]
fn test_same_object_type_conflicts_and_keeps_state(mut provider: MimeProvider) {
	let before: Vec<String> = provider.registry().mimetypes().keys().cloned().collect();
	let impostor = DocumentClass::builder("Impostor").object_type("somedata").build();

	let result = provider.register(&[impostor]);

	match result {
		Err(MimeError::Conflict {
			mimetype,
			existing,
			new,
		}) => {
			assert_eq!(mimetype, "application/somedata+json");
			assert_eq!(existing, "SomeData");
			assert_eq!(new, "Impostor");
		}
		other => panic!("Expected conflict, got {:?}", other),
	}
	let after: Vec<String> = provider.registry().mimetypes().keys().cloned().collect();
	assert_eq!(before, after);
	assert_eq!(
		provider
			.registry()
			.get("application/somedata+json")
			.unwrap()
			.class()
			.unwrap()
			.name(),
		"SomeData"
	);
}

proptest! {
	#[test]
	fn prop_one_entry_per_base_type_and_class(
		object_types in prop::collection::btree_set("[a-z]{1,8}", 0..12)
	) {
		let object_types: Vec<String> = object_types.into_iter().collect();
		let provider = MimeProvider::new(&classes(&object_types)).unwrap();
		let registry = provider.registry();

		let base: Vec<&str> = registry
			.mimetypes()
			.iter()
			.filter(|(_, entry)| entry.class().is_none())
			.map(|(mimetype, _)| mimetype.as_str())
			.collect();
		prop_assert_eq!(base, vec!["text/html", "text/plain"]);

		prop_assert_eq!(registry.len(), 2 + object_types.len());
		for object_type in &object_types {
			let mimetype = format!("application/{}+json", object_type);
			let entry = registry.get(&mimetype);
			prop_assert!(entry.is_some(), "{} missing", mimetype);
			prop_assert_eq!(
				entry.and_then(|e| e.class()).and_then(|c| c.object_type()),
				Some(object_type.as_str())
			);
		}
	}

	#[test]
	fn prop_failed_register_changes_nothing(
		existing in prop::collection::btree_set("[a-z]{1,6}", 1..6),
		fresh in prop::collection::btree_set("[A-Z]{1,6}", 0..6),
		pick in any::<prop::sample::Index>(),
	) {
		let existing: Vec<String> = existing.into_iter().collect();
		let mut provider = MimeProvider::new(&classes(&existing)).unwrap();
		let before: Vec<String> = provider.registry().mimetypes().keys().cloned().collect();

		// Suffixed object types never collide; the last one always does.
		let mut batch: Vec<String> = fresh.into_iter().map(|t| t.to_lowercase() + "_x").collect();
		batch.push(pick.get(&existing).clone());

		let result = provider.register(&classes(&batch));
		let is_conflict = matches!(result, Err(MimeError::Conflict { .. }));
		prop_assert!(is_conflict);
		let after: Vec<String> = provider.registry().mimetypes().keys().cloned().collect();
		prop_assert_eq!(before, after);
	}
}

// =============================================================================
// Negotiation
// =============================================================================

#[rstest]
#[case(None)]
#[case(Some("*/*"))]
#[case(Some("text/*, application/*"))]
fn test_wildcards_pick_first_registered(provider: MimeProvider, #[case] accept: Option<&str>) {
	let data = SomeData {
		string: "Hello".to_string(),
		integer: 12,
		somelist: vec![],
	};
	let rendered = provider.render(&data, accept).unwrap();
	assert_eq!(rendered.mimetype, "text/html");
}

#[rstest]
fn test_wildcard_among_custom_types_picks_first_registered() {
	let provider = MimeProvider::builder()
		.document_type(JsonDocumentType::new())
		.error_document_type(HtmlDocumentType::new())
		.documents(classes(&["foo".to_string(), "bar".to_string()]))
		.build()
		.unwrap();

	let offers: Vec<&str> = provider
		.registry()
		.mimetypes()
		.keys()
		.map(String::as_str)
		.collect();
	let accept = reinhardt_negotiation::AcceptHeader::parse("*/*");
	assert_eq!(accept.best_match(offers.iter().copied()), Some("application/foo+json"));

	let generic = reinhardt_negotiation::AcceptHeader::parse("application/json");
	assert_eq!(generic.best_match(offers.iter().copied()), None);
}

#[rstest]
fn test_text_plain_not_available() {
	let provider = MimeProvider::builder()
		.document_type(HtmlDocumentType::new())
		.document_type(JsonDocumentType::new())
		.document::<SomeData>()
		.build()
		.unwrap();
	assert_eq!(provider.registry().len(), 2);

	let data = SomeData {
		string: "Hello".to_string(),
		integer: 12,
		somelist: vec![],
	};
	let result = provider.render(&data, Some("text/plain"));
	assert!(matches!(result, Err(MimeError::BadRequest(_))));

	let mut exchange = exchange(Some("text/plain"), None, b"");
	let body = provider.respond(&data, &mut exchange);
	assert_eq!(exchange.status(), StatusCode::BAD_REQUEST);
	assert_eq!(exchange.response_content_type(), Some("text/html"));
	assert!(std::str::from_utf8(&body).unwrap().contains("Bad Request"));
}

// =============================================================================
// Parsing
// =============================================================================

#[rstest]
fn test_some_data_scenario(provider: MimeProvider) {
	let parsed = provider
		.parse_body_as::<SomeData>(
			br#"{"string":"Hello","integer":12,"somelist":["Foo","Bar"]}"#,
			Some("application/somedata+json"),
		)
		.unwrap()
		.unwrap();
	assert_eq!(
		parsed,
		SomeData {
			string: "Hello".to_string(),
			integer: 12,
			somelist: vec!["Foo".to_string(), "Bar".to_string()],
		}
	);

	let result = provider.parse_body(br#"{"string":"Hello"}"#, Some("application/somedata+json"));
	assert!(matches!(result, Err(MimeError::Validation(_))));
}

#[rstest]
fn test_request_body_from_exchange(provider: MimeProvider) {
	let no_body = exchange(None, Some("application/somedata+json"), b"");
	assert!(provider.request_body(&no_body).unwrap().is_none());

	let html = exchange(None, Some("text/html"), b"<p>hi</p>");
	assert!(matches!(
		provider.request_body(&html),
		Err(MimeError::BadRequest(_))
	));
}

#[rstest]
fn test_mixed_case_object_type_round_trips() {
	#[derive(Debug, PartialEq, Serialize, Deserialize)]
	struct UserProfile {
		nickname: String,
	}

	impl TypedDocument for UserProfile {
		const OBJECT_TYPE: &'static str = "UserProfile";
	}

	let provider = MimeProvider::builder()
		.document::<UserProfile>()
		.build()
		.unwrap();
	let profile = UserProfile {
		nickname: "kent".to_string(),
	};

	let rendered = provider
		.render(&profile, Some("application/UserProfile+json"))
		.unwrap();
	assert_eq!(rendered.mimetype, "application/userprofile+json");

	let parsed = provider
		.parse_body_as::<UserProfile>(&rendered.body, Some(rendered.mimetype.as_str()))
		.unwrap();
	assert_eq!(parsed, Some(UserProfile {
		nickname: "kent".to_string(),
	}));

	let reader = provider.reader();
	let decoded = reader
		.read(Some("application/UserProfile+json"), &rendered.body, &[])
		.unwrap();
	assert_eq!(decoded.downcast_ref::<UserProfile>(), Some(&profile));
}

#[rstest]
fn test_object_types_differing_in_case_conflict(mut provider: MimeProvider) {
	let shouting = DocumentClass::builder("Shouting").object_type("SomeData").build();
	let result = provider.register(&[shouting]);
	assert!(matches!(
		result,
		Err(MimeError::Conflict { mimetype, .. }) if mimetype == "application/somedata+json"
	));
}

proptest! {
	#[test]
	fn prop_json_round_trip(
		string in ".{0,20}",
		integer in -1_000_000i64..1_000_000,
		somelist in prop::collection::vec("[a-zA-Z0-9 ]{0,8}", 0..5),
	) {
		let provider = MimeProvider::builder().document::<SomeData>().build().unwrap();
		let data = SomeData { string, integer, somelist };

		let rendered = provider.render(&data, Some("application/somedata+json")).unwrap();
		let parsed = provider
			.parse_body_as::<SomeData>(&rendered.body, Some(rendered.mimetype.as_str()))
			.unwrap();
		prop_assert_eq!(parsed, Some(data));
	}
}

// =============================================================================
// Error rendering
// =============================================================================

#[rstest]
fn test_non_serializable_object_yields_server_error(provider: MimeProvider) {
	let mut exchange = exchange(Some("application/opaque+json"), None, b"");

	let body = provider.respond(&Opaque, &mut exchange);

	assert_eq!(exchange.status(), StatusCode::INTERNAL_SERVER_ERROR);
	assert_eq!(exchange.response_content_type(), Some("text/html"));
	let page = std::str::from_utf8(&body).unwrap();
	assert!(page.contains("<h1>error (ErrorDocument)</h1>"));
	assert!(page.contains("Internal Server Error"));
	assert!(!page.contains("not serializable"));
}

#[rstest]
fn test_invalid_outgoing_data_yields_bad_request(provider: MimeProvider) {
	struct Mislabelled;

	impl Document for Mislabelled {
		fn document_class(&self) -> DocumentClass {
			DocumentClass::of::<SomeData>()
		}

		fn to_data(&self) -> Option<Value> {
			Some(json!({"string": 1}))
		}
	}

	let mut exchange = exchange(Some("application/somedata+json"), None, b"");
	provider.respond(&Mislabelled, &mut exchange);
	assert_eq!(exchange.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
fn test_custom_error_handler() {
	#[derive(Serialize, Deserialize)]
	struct Problem {
		detail: String,
		status: u16,
	}

	impl TypedDocument for Problem {
		const OBJECT_TYPE: &'static str = "problem";
	}

	let provider = MimeProvider::builder()
		.document::<SomeData>()
		.error_handler(|error: &MimeError, context: &mut dyn RequestContext| {
			context.set_status(StatusCode::UNPROCESSABLE_ENTITY);
			Box::new(Problem {
				detail: error.to_string(),
				status: 422,
			}) as Box<dyn Document>
		})
		.error_document_type(reinhardt_documents::TextDocumentType::new())
		.build()
		.unwrap();

	let mut exchange = exchange(None, Some("application/somedata+json"), b"{}");
	let error = provider.request_body(&exchange).unwrap_err();
	let body = provider.respond_error(&error, &mut exchange);

	assert_eq!(exchange.status(), StatusCode::UNPROCESSABLE_ENTITY);
	assert_eq!(exchange.response_content_type(), Some("text/plain"));
	assert!(std::str::from_utf8(&body).unwrap().contains(r#""status": 422"#));
}

#[rstest]
fn test_respond_result_renders_view_errors(provider: MimeProvider) {
	let mut exchange = exchange(None, None, b"");
	let outcome: Result<&dyn Document, MimeError> =
		Err(MimeError::NotSupported("uploads".to_string()));

	let body = provider.respond_result(outcome, &mut exchange);

	assert_eq!(exchange.status(), StatusCode::BAD_REQUEST);
	assert!(std::str::from_utf8(&body).unwrap().contains("not supported: uploads"));
}

// =============================================================================
// Logging
// =============================================================================

#[rstest]
fn test_request_failures_are_logged_by_severity(provider: MimeProvider) {
	use tracing_subscriber::layer::SubscriberExt as _;
	use tracing_subscriber::util::SubscriberInitExt as _;

	// Arrange
	struct LogCapture {
		logs: Arc<Mutex<Vec<String>>>,
	}

	impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LogCapture {
		fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
			struct MessageVisitor {
				message: String,
			}

			impl tracing::field::Visit for MessageVisitor {
				fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
					if field.name() == "message" {
						self.message = format!("{:?}", value);
					}
				}
			}

			let mut visitor = MessageVisitor {
				message: String::new(),
			};
			event.record(&mut visitor);

			let mut logs = self.logs.lock().unwrap();
			logs.push(format!("[{}] {}", event.metadata().level(), visitor.message));
		}
	}

	let logs = Arc::new(Mutex::new(Vec::new()));
	let capture = LogCapture { logs: logs.clone() };
	let _guard = tracing_subscriber::registry().with(capture).set_default();

	// Act
	let mut client_error = exchange(Some("image/png"), None, b"");
	provider.respond(
		&SomeData {
			string: String::new(),
			integer: 0,
			somelist: vec![],
		},
		&mut client_error,
	);
	let mut server_error = exchange(None, None, b"");
	provider.respond(&Opaque, &mut server_error);

	// Assert
	let captured = logs.lock().unwrap();
	assert!(
		captured
			.iter()
			.any(|log| log.starts_with("[DEBUG] request failed: bad request")),
		"{:?}",
		captured
	);
	assert!(
		captured
			.iter()
			.any(|log| log.starts_with("[ERROR] request failed: internal error")),
		"{:?}",
		captured
	);
	assert!(
		!captured
			.iter()
			.any(|log| log.starts_with("[ERROR] request failed: bad request")),
		"{:?}",
		captured
	);
}

#[rstest]
fn test_document_types_are_shared_not_copied(provider: MimeProvider) {
	let entry = provider.registry().get("application/somedata+json").unwrap();
	let json = provider
		.registry()
		.document_types()
		.iter()
		.find(|t| t.custom_mime())
		.unwrap();
	assert_eq!(entry.document_type().name(), json.name());
	assert!(Arc::strong_count(json) >= 2);
}
