//! Property tests for Accept header negotiation
//!
//! - Wildcard-only headers pick the first offer
//! - `q=0` ranges never select the excluded type
//! - Selection never returns a type the header does not admit

use proptest::prelude::*;
use reinhardt_negotiation::{AcceptHeader, MediaType};
use rstest::rstest;

fn offer_strategy() -> impl Strategy<Value = Vec<String>> {
	prop::collection::vec("[a-z]{1,8}", 1..8).prop_map(|names| {
		let mut seen = Vec::new();
		for name in names {
			let offer = format!("application/{}+json", name);
			if !seen.contains(&offer) {
				seen.push(offer);
			}
		}
		seen
	})
}

proptest! {
	#[test]
	fn prop_wildcard_selects_first_offer(offers in offer_strategy()) {
		let accept = AcceptHeader::parse("*/*");
		let selected = accept.best_match(offers.iter().map(String::as_str));
		prop_assert_eq!(selected, Some(offers[0].as_str()));
	}

	#[test]
	fn prop_excluded_offer_never_selected(offers in offer_strategy(), index in 0usize..8) {
		let excluded = &offers[index % offers.len()];
		let accept = AcceptHeader::parse(&format!("{};q=0, */*;q=0.5", excluded));
		let selected = accept.best_match(offers.iter().map(String::as_str));
		prop_assert_ne!(selected, Some(excluded.as_str()));
		if offers.len() == 1 {
			prop_assert_eq!(selected, None);
		}
	}

	#[test]
	fn prop_selection_is_admitted(offers in offer_strategy(), header in "(text|application)/(\\*|html|[a-z]{1,8}\\+json)") {
		let accept = AcceptHeader::parse(&header);
		if let Some(selected) = accept.best_match(offers.iter().map(String::as_str)) {
			let selected = MediaType::parse(selected).unwrap();
			prop_assert!(accept.media_types.iter().any(|range| range.matches(&selected)));
		}
	}
}

#[rstest]
#[case("application/json", None)]
#[case("application/foo+json", Some("application/foo+json"))]
#[case("application/bar+json", Some("application/bar+json"))]
#[case("application/*", Some("application/foo+json"))]
#[case("text/plain", None)]
fn test_json_family_requires_explicit_match(#[case] header: &str, #[case] expected: Option<&str>) {
	let offers = ["application/foo+json", "application/bar+json"];
	let accept = AcceptHeader::parse(header);
	assert_eq!(accept.best_match(offers), expected);
}

#[rstest]
fn test_browser_accept_header_prefers_html() {
	let accept = AcceptHeader::parse(
		"text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
	);
	let offers = ["application/somedata+json", "text/plain", "text/html"];
	assert_eq!(accept.best_match(offers), Some("text/html"));
}
