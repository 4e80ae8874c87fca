//! Structured data to HTML tables

use serde_json::Value;

use super::markup::{Markup, NodeId};

const TABLE_ATTRS: &[(&str, &str)] = &[("cellspacing", "0"), ("cellpadding", "2")];
const SEQUENCE_VALUE_ATTRS: &[(&str, &str)] = &[("style", "padding: 0 2px"), ("align", "left")];
const KEY_ATTRS: &[(&str, &str)] = &[("valign", "top"), ("align", "right")];
const MAPPING_VALUE_ATTRS: &[(&str, &str)] =
	&[("style", "padding: 0 2px;"), ("align", "left")];

/// Appends the table form of `data` under `parent`.
///
/// - sequences become one row per element: index header, value cell
/// - mappings become one row per key, keys sorted: `key:` header, value cell
/// - mappings with a non-null `$ref` become a link labelled by `rel` (or the reference)
/// - anything else becomes its string form
///
/// Uses a work list instead of recursion.
pub fn build_data(markup: &mut Markup, parent: NodeId, data: &Value) {
	let mut stack: Vec<(NodeId, &Value)> = vec![(parent, data)];

	while let Some((element, data)) = stack.pop() {
		let mut pending: Vec<(NodeId, &Value)> = Vec::new();

		match data {
			Value::Array(items) => {
				let table = markup.add(element, "table", TABLE_ATTRS);
				for (index, item) in items.iter().enumerate() {
					let row = markup.add(table, "tr", &[]);
					let header = markup.add(row, "th", &[]);
					markup.add_text(header, index.to_string());
					let cell = markup.add(row, "td", SEQUENCE_VALUE_ATTRS);
					pending.push((cell, item));
				}
			}
			Value::Object(map) => match map.get("$ref").filter(|r| !r.is_null()) {
				Some(reference) => {
					let href = scalar_text(reference);
					let label = match map.get("rel").filter(|r| !r.is_null()) {
						Some(rel) => scalar_text(rel),
						None => href.clone(),
					};
					let link = markup.add(element, "a", &[("href", href.as_str())]);
					markup.add_text(link, label);
				}
				None => {
					let table = markup.add(element, "table", TABLE_ATTRS);
					let mut entries: Vec<(&String, &Value)> = map.iter().collect();
					entries.sort_by(|a, b| a.0.cmp(b.0));
					for (key, value) in entries {
						let row = markup.add(table, "tr", &[]);
						let header = markup.add(row, "th", KEY_ATTRS);
						markup.add_text(header, format!("{}:", key));
						let cell = markup.add(row, "td", MAPPING_VALUE_ATTRS);
						pending.push((cell, value));
					}
				}
			},
			scalar => markup.add_text(element, scalar_text(scalar)),
		}

		// Reversed so cells are filled in document order.
		stack.extend(pending.into_iter().rev());
	}
}

/// String form of a value: strings verbatim, everything else as JSON.
pub(crate) fn scalar_text(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;
	use serde_json::json;

	use super::*;

	fn render(data: Value) -> String {
		let mut markup = Markup::new("body");
		let root = markup.root();
		build_data(&mut markup, root, &data);
		markup.render()
	}

	#[rstest]
	#[case(json!("text"), "<body>text</body>")]
	#[case(json!(12), "<body>12</body>")]
	#[case(json!(true), "<body>true</body>")]
	#[case(json!(null), "<body>null</body>")]
	fn test_scalars(#[case] data: Value, #[case] expected: &str) {
		assert_eq!(render(data), expected);
	}

	#[rstest]
	fn test_sequence_rows() {
		assert_eq!(
			render(json!(["Foo", "Bar"])),
			concat!(
				r#"<body><table cellspacing="0" cellpadding="2">"#,
				r#"<tr><th>0</th><td style="padding: 0 2px" align="left">Foo</td></tr>"#,
				r#"<tr><th>1</th><td style="padding: 0 2px" align="left">Bar</td></tr>"#,
				"</table></body>"
			)
		);
	}

	#[rstest]
	fn test_mapping_keys_sorted() {
		let html = render(json!({"zeta": 1, "alpha": 2}));
		let alpha = html.find("alpha:").unwrap();
		let zeta = html.find("zeta:").unwrap();
		assert!(alpha < zeta);
		assert!(html.contains(r#"<th valign="top" align="right">alpha:</th>"#));
		assert!(html.contains(r#"<td style="padding: 0 2px;" align="left">2</td>"#));
	}

	#[rstest]
	fn test_reference_becomes_link() {
		assert_eq!(
			render(json!({"$ref": "/items/1", "rel": "item"})),
			r#"<body><a href="/items/1">item</a></body>"#
		);
		assert_eq!(
			render(json!({"$ref": "/items/1"})),
			r#"<body><a href="/items/1">/items/1</a></body>"#
		);
	}

	#[rstest]
	fn test_null_reference_is_plain_mapping() {
		let html = render(json!({"$ref": null}));
		assert!(html.contains("$ref:"));
		assert!(!html.contains("<a "));
	}

	#[rstest]
	fn test_nested_values_stay_in_their_cells() {
		let html = render(json!({"outer": [1, {"inner": "x"}]}));
		assert_eq!(
			html,
			concat!(
				r#"<body><table cellspacing="0" cellpadding="2"><tr>"#,
				r#"<th valign="top" align="right">outer:</th>"#,
				r#"<td style="padding: 0 2px;" align="left">"#,
				r#"<table cellspacing="0" cellpadding="2">"#,
				r#"<tr><th>0</th><td style="padding: 0 2px" align="left">1</td></tr>"#,
				r#"<tr><th>1</th><td style="padding: 0 2px" align="left">"#,
				r#"<table cellspacing="0" cellpadding="2"><tr>"#,
				r#"<th valign="top" align="right">inner:</th>"#,
				r#"<td style="padding: 0 2px;" align="left">x</td>"#,
				"</tr></table></td></tr></table></td></tr></table></body>"
			)
		);
	}
}
