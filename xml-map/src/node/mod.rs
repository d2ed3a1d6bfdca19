//! Owned, read-only XML element tree
//!
//! The mapper needs random access to a document (searching descendants by depth, looking at
//! siblings, reading attributes of nested elements), so documents are first read into this tree
//! using `quick-xml`.
//!
//! Comments, processing instructions, the XML declaration and whitespace-only text are dropped
//! while reading; CDATA sections become text.

mod namespace;
mod parser;

use crate::Result;
use std::{
	borrow::Cow,
	collections::VecDeque,
	fmt,
	str::FromStr,
};

/// Namespace bound to the `xmlns` prefix
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// Name of an element or attribute: optional namespace URI and local name
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct QName {
	namespace: Option<String>,
	local: String,
}

impl QName {
	/// Name in the given namespace (or none)
	pub fn new(namespace: Option<&str>, local: impl Into<String>) -> Self {
		Self {
			namespace: namespace.map(String::from),
			local: local.into(),
		}
	}

	/// Name without namespace
	pub fn local(local: impl Into<String>) -> Self {
		Self {
			namespace: None,
			local: local.into(),
		}
	}

	/// Namespace URI
	pub fn namespace(&self) -> Option<&str> {
		self.namespace.as_deref()
	}

	/// Local part of the name
	pub fn local_name(&self) -> &str {
		&self.local
	}

	/// Same namespace, different local name
	pub fn with_local(&self, local: impl Into<String>) -> Self {
		Self {
			namespace: self.namespace.clone(),
			local: local.into(),
		}
	}

	pub(crate) fn strip_namespace(&mut self) {
		self.namespace = None;
	}
}

impl fmt::Display for QName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.namespace {
			Some(ns) => write!(f, "{{{}}}{}", ns, self.local),
			None => f.write_str(&self.local),
		}
	}
}

/// Attribute of an element
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Attribute {
	name: QName,
	value: String,
	namespace_declaration: bool,
}

impl Attribute {
	/// Plain attribute
	pub fn new(name: QName, value: impl Into<String>) -> Self {
		Self {
			name,
			value: value.into(),
			namespace_declaration: false,
		}
	}

	pub(crate) fn namespace_declaration(name: QName, value: impl Into<String>) -> Self {
		Self {
			name,
			value: value.into(),
			namespace_declaration: true,
		}
	}

	/// Attribute name
	pub fn name(&self) -> &QName {
		&self.name
	}

	/// Local part of the attribute name
	pub fn local_name(&self) -> &str {
		self.name.local_name()
	}

	/// Unescaped attribute value
	pub fn value(&self) -> &str {
		&self.value
	}

	/// Whether this is `xmlns="..."` or `xmlns:prefix="..."`
	pub fn is_namespace_declaration(&self) -> bool {
		self.namespace_declaration
	}
}

/// Content of an element
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Node {
	/// Nested element
	Element(Element),
	/// Text (including CDATA)
	Text(String),
}

/// XML element with attributes and content
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Element {
	name: QName,
	attributes: Vec<Attribute>,
	nodes: Vec<Node>,
	self_closing: bool,
}

impl Element {
	/// New element without attributes or content
	pub fn new(name: QName) -> Self {
		Self {
			name,
			attributes: Vec::new(),
			nodes: Vec::new(),
			self_closing: false,
		}
	}

	/// Add attribute (builder style)
	pub fn with_attribute(mut self, name: QName, value: impl Into<String>) -> Self {
		self.attributes.push(Attribute::new(name, value));
		self
	}

	/// Add nested element (builder style)
	pub fn with_child(mut self, child: Element) -> Self {
		self.nodes.push(Node::Element(child));
		self
	}

	/// Add text (builder style)
	pub fn with_text(mut self, text: impl Into<String>) -> Self {
		self.nodes.push(Node::Text(text.into()));
		self
	}

	/// Element name
	pub fn name(&self) -> &QName {
		&self.name
	}

	/// Local part of the element name
	pub fn local_name(&self) -> &str {
		self.name.local_name()
	}

	/// Attributes in document order
	pub fn attributes(&self) -> &[Attribute] {
		&self.attributes
	}

	/// Content in document order
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Whether the element was written as `<name/>` (or `<name ... />`)
	pub fn is_self_closing(&self) -> bool {
		self.self_closing
	}

	/// Whether there are nested elements
	pub fn has_elements(&self) -> bool {
		self.elements().next().is_some()
	}

	/// Whether there are any attributes
	pub fn has_attributes(&self) -> bool {
		!self.attributes.is_empty()
	}

	/// Nested elements (only direct children)
	pub fn elements(&self) -> impl Iterator<Item = &Element> {
		self.nodes.iter().filter_map(|node| match node {
			Node::Element(e) => Some(e),
			Node::Text(_) => None,
		})
	}

	/// First direct child with exactly the given name
	pub fn child(&self, name: &QName) -> Option<&Element> {
		self.elements().find(|e| e.name == *name)
	}

	/// All direct children with exactly the given name
	pub fn children_named<'a>(&'a self, name: &'a QName) -> impl Iterator<Item = &'a Element> + 'a {
		self.elements().filter(move |e| e.name == *name)
	}

	/// First attribute with exactly the given name
	pub fn attribute(&self, name: &QName) -> Option<&Attribute> {
		self.attributes.iter().find(|a| a.name == *name)
	}

	/// Concatenated text of this element and all nested elements
	pub fn value(&self) -> Cow<'_, str> {
		match self.nodes.as_slice() {
			[] => Cow::Borrowed(""),
			[Node::Text(text)] => Cow::Borrowed(text),
			_ => {
				let mut text = String::new();
				self.collect_text(&mut text);
				Cow::Owned(text)
			},
		}
	}

	fn collect_text(&self, out: &mut String) {
		for node in &self.nodes {
			match node {
				Node::Text(text) => out.push_str(text),
				Node::Element(e) => e.collect_text(out),
			}
		}
	}

	/// All nested elements (not including `self`) in document order
	pub fn descendants(&self) -> Vec<&Element> {
		let mut result = Vec::new();
		self.collect_descendants(&mut result);
		result
	}

	fn collect_descendants<'a>(&'a self, out: &mut Vec<&'a Element>) {
		for e in self.elements() {
			out.push(e);
			e.collect_descendants(out);
		}
	}

	/// All nested elements (not including `self`) ordered by ascending depth
	///
	/// Elements on the same depth are in document order.
	pub fn descendants_by_depth(&self) -> Vec<&Element> {
		let mut result = self.descendants_and_self_by_depth();
		result.remove(0);
		result
	}

	/// `self` followed by all nested elements ordered by ascending depth
	pub fn descendants_and_self_by_depth(&self) -> Vec<&Element> {
		let mut result = Vec::new();
		let mut queue = VecDeque::new();
		queue.push_back(self);
		while let Some(e) = queue.pop_front() {
			result.push(e);
			queue.extend(e.elements());
		}
		result
	}

	/// Direct parent of `element` if it is nested (at any depth) within `self`
	///
	/// Compares identity, not equality.
	pub fn parent_of(&self, element: &Element) -> Option<&Element> {
		if self.elements().any(|e| std::ptr::eq(e, element)) {
			return Some(self);
		}
		self.elements().find_map(|e| e.parent_of(element))
	}

	pub(crate) fn push_attribute(&mut self, attribute: Attribute) {
		self.attributes.push(attribute);
	}

	pub(crate) fn push_node(&mut self, node: Node) {
		self.nodes.push(node);
	}

	pub(crate) fn set_self_closing(&mut self) {
		self.self_closing = true;
	}
}

/// Parsed XML document
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Document {
	root: Element,
}

impl Document {
	/// Read document from text
	pub fn parse(text: &str) -> Result<Self> {
		parser::parse_document(text)
	}

	/// Wrap root element
	pub fn new(root: Element) -> Self {
		Self { root }
	}

	/// Root element
	pub fn root(&self) -> &Element {
		&self.root
	}

	/// Remove all namespaces from element and attribute names, and drop all namespace
	/// declarations.
	pub fn strip_namespaces(&mut self) {
		namespace::strip_namespaces(&mut self.root);
	}
}

impl FromStr for Document {
	type Err = crate::Error;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}
