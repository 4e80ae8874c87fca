//! Minimal markup tree
//!
//! Elements live in an arena and refer to their children by [`NodeId`]. Serialization
//! walks the arena with an explicit stack, so arbitrarily deep documents do not grow
//! the call stack.

use std::borrow::Cow;

/// Handle to an element in a [`Markup`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug)]
enum Node {
	Element {
		tag: String,
		attrs: Vec<(String, String)>,
		children: Vec<usize>,
	},
	Text(String),
}

/// An element tree with a single root.
///
/// # Examples
///
/// ```
/// use reinhardt_documents::html::Markup;
///
/// let mut markup = Markup::new("p");
/// let root = markup.root();
/// let link = markup.add(root, "a", &[("href", "/items?a=1&b=2")]);
/// markup.add_text(link, "<items>");
///
/// assert_eq!(
///     markup.render(),
///     r#"<p><a href="/items?a=1&amp;b=2">&lt;items&gt;</a></p>"#
/// );
/// ```
#[derive(Debug)]
pub struct Markup {
	nodes: Vec<Node>,
}

impl Markup {
	pub fn new(root_tag: impl Into<String>) -> Self {
		Self {
			nodes: vec![Node::Element {
				tag: root_tag.into(),
				attrs: Vec::new(),
				children: Vec::new(),
			}],
		}
	}

	pub fn root(&self) -> NodeId {
		NodeId(0)
	}

	/// Appends a child element to `parent` and returns it.
	pub fn add(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
		let id = self.push(Node::Element {
			tag: tag.to_string(),
			attrs: attrs
				.iter()
				.map(|(name, value)| (name.to_string(), value.to_string()))
				.collect(),
			children: Vec::new(),
		});
		self.attach(parent, id);
		NodeId(id)
	}

	/// Appends a text child to `parent`.
	pub fn add_text(&mut self, parent: NodeId, text: impl Into<String>) {
		let id = self.push(Node::Text(text.into()));
		self.attach(parent, id);
	}

	/// Number of elements and text nodes in the tree.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Serializes the tree, escaping text and attribute values.
	pub fn render(&self) -> String {
		enum Step {
			Open(usize),
			Close(usize),
		}

		let mut output = String::new();
		let mut stack = vec![Step::Open(0)];

		while let Some(step) = stack.pop() {
			match step {
				Step::Open(id) => match &self.nodes[id] {
					Node::Element {
						tag,
						attrs,
						children,
					} => {
						output.push('<');
						output.push_str(tag);
						for (name, value) in attrs {
							output.push(' ');
							output.push_str(name);
							output.push_str("=\"");
							output.push_str(&escape(value));
							output.push('"');
						}
						output.push('>');

						stack.push(Step::Close(id));
						stack.extend(children.iter().rev().map(|&child| Step::Open(child)));
					}
					Node::Text(text) => output.push_str(&escape(text)),
				},
				Step::Close(id) => {
					if let Node::Element { tag, .. } = &self.nodes[id] {
						output.push_str("</");
						output.push_str(tag);
						output.push('>');
					}
				}
			}
		}

		output
	}

	fn push(&mut self, node: Node) -> usize {
		self.nodes.push(node);
		self.nodes.len() - 1
	}

	fn attach(&mut self, parent: NodeId, child: usize) {
		// Only elements are handed out as NodeId, so the parent is always an element.
		if let Node::Element { children, .. } = &mut self.nodes[parent.0] {
			children.push(child);
		}
	}
}

/// Escapes `&`, `<`, `>`, `"` and `'`.
pub(crate) fn escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}
