use crate::{
	errors,
	node::{
		Attribute,
		Document,
		Element,
		Node,
		QName,
		XMLNS_NAMESPACE,
	},
	Result,
};
use quick_xml::{
	escape::resolve_xml_entity,
	events::{
		BytesStart,
		Event,
	},
	name::ResolveResult,
	NsReader,
};

/// Read a complete document into an element tree
pub(super) fn parse_document(text: &str) -> Result<Document> {
	let mut reader = NsReader::from_reader(text.as_bytes());
	reader.config_mut().trim_text(false);

	let mut buf = Vec::new();
	let mut tree = TreeBuilder::default();
	loop {
		buf.clear();
		let (resolve, event) = reader.read_resolved_event_into(&mut buf)?;
		let namespace = resolve_namespace(resolve)?;
		match event {
			Event::Start(start) => {
				let element = read_start(&reader, &start, namespace)?;
				tree.open(element)?;
			},
			Event::Empty(start) => {
				let mut element = read_start(&reader, &start, namespace)?;
				element.set_self_closing();
				tree.leaf(element)?;
			},
			Event::End(_) => tree.close()?,
			Event::Text(t) => {
				let t = t.decode().map_err(errors::malformed_document)?;
				tree.text(&t, false)?;
			},
			Event::CData(t) => {
				let t = std::str::from_utf8(t.as_ref()).map_err(errors::malformed_document)?;
				tree.text(t, true)?;
			},
			Event::GeneralRef(r) => {
				let raw = r.decode().map_err(errors::malformed_document)?;
				tree.text(&resolve_entity(&raw)?, true)?;
			},
			// ignore those
			Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => (),
			Event::Eof => break,
		}
	}
	tree.finish()
}

fn read_start<R>(reader: &NsReader<R>, start: &BytesStart<'_>, namespace: Option<String>) -> Result<Element> {
	let local = std::str::from_utf8(start.local_name().as_ref())
		.map_err(errors::malformed_document)?
		.to_string();
	let mut element = Element::new(QName { namespace, local });

	for attr in start.attributes() {
		let attr = attr.map_err(errors::malformed_document)?;
		let key = attr.key;
		let value = attr
			.unescape_value()
			.map_err(errors::malformed_document)?
			.into_owned();
		let attr_local = std::str::from_utf8(key.local_name().as_ref())
			.map_err(errors::malformed_document)?
			.to_string();

		// namespace declarations are kept (flagged) so they can be dropped explicitly later
		if key.as_ref() == b"xmlns" {
			element.push_attribute(Attribute::namespace_declaration(QName::local(attr_local), value));
			continue;
		}
		if key.prefix().map_or(false, |prefix| prefix.as_ref() == b"xmlns") {
			let name = QName::new(Some(XMLNS_NAMESPACE), attr_local);
			element.push_attribute(Attribute::namespace_declaration(name, value));
			continue;
		}

		let (resolve, _) = reader.resolver().resolve_attribute(key);
		let namespace = resolve_namespace(resolve)?;
		element.push_attribute(Attribute::new(
			QName {
				namespace,
				local: attr_local,
			},
			value,
		));
	}

	Ok(element)
}

fn resolve_namespace(resolve: ResolveResult<'_>) -> Result<Option<String>> {
	match resolve {
		ResolveResult::Bound(ns) => Ok(Some(String::from_utf8_lossy(ns.as_ref()).into_owned())),
		ResolveResult::Unbound => Ok(None),
		ResolveResult::Unknown(prefix) => Err(errors::malformed_document(format_args!(
			"unknown namespace prefix {:?}",
			String::from_utf8_lossy(&prefix)
		))),
	}
}

/// Resolve a general entity or character reference
fn resolve_entity(raw: &str) -> Result<String> {
	if let Some(resolved) = resolve_xml_entity(raw) {
		return Ok(resolved.into());
	}

	if let Some(rest) = raw.strip_prefix('#') {
		let code = if let Some(hex) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
			u32::from_str_radix(hex, 16)
		} else {
			rest.parse::<u32>()
		}
		.map_err(|_| errors::malformed_document(format_args!("invalid character reference &{};", raw)))?;

		let ch = char::from_u32(code)
			.ok_or_else(|| errors::malformed_document(format_args!("invalid character reference &{};", raw)))?;
		return Ok(ch.to_string());
	}

	Err(errors::malformed_document(format_args!("unknown entity &{};", raw)))
}

/// Deepest element nesting accepted; the tree is walked recursively.
pub(super) const MAX_DEPTH: usize = 1024;

/// Collects elements into a tree while reading events
#[derive(Default)]
struct TreeBuilder {
	open: Vec<Element>,
	root: Option<Element>,
	text: String,
	// text contained CDATA or references, so it must be kept even if it is whitespace only
	significant: bool,
}

impl TreeBuilder {
	fn text(&mut self, text: &str, significant: bool) -> Result<()> {
		self.text.push_str(text);
		self.significant |= significant;
		Ok(())
	}

	fn flush_text(&mut self) -> Result<()> {
		let text = std::mem::take(&mut self.text);
		let significant = std::mem::replace(&mut self.significant, false);
		if !significant && text.trim().is_empty() {
			return Ok(());
		}
		match self.open.last_mut() {
			Some(parent) => {
				parent.push_node(Node::Text(text));
				Ok(())
			},
			None => Err(errors::malformed_document("text outside of root element")),
		}
	}

	fn open(&mut self, element: Element) -> Result<()> {
		self.flush_text()?;
		if self.open.is_empty() && self.root.is_some() {
			return Err(errors::malformed_document("multiple root elements"));
		}
		if self.open.len() >= MAX_DEPTH {
			return Err(errors::malformed_document(format_args!(
				"elements nested deeper than {} levels",
				MAX_DEPTH
			)));
		}
		self.open.push(element);
		Ok(())
	}

	fn leaf(&mut self, element: Element) -> Result<()> {
		self.open(element)?;
		self.close()
	}

	fn close(&mut self) -> Result<()> {
		self.flush_text()?;
		let element = self
			.open
			.pop()
			.ok_or_else(|| errors::malformed_document("unexpected end tag"))?;
		match self.open.last_mut() {
			Some(parent) => parent.push_node(Node::Element(element)),
			None => self.root = Some(element),
		}
		Ok(())
	}

	fn finish(mut self) -> Result<Document> {
		self.flush_text()?;
		if let Some(element) = self.open.last() {
			return Err(errors::malformed_document(format_args!("unclosed element {}", element.name())));
		}
		match self.root {
			Some(root) => Ok(Document::new(root)),
			None => Err(errors::malformed_document("no root element")),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::Error;

	#[test]
	fn namespaces_are_resolved() {
		let doc = parse_document(r#"<r xmlns="urn:a" xmlns:b="urn:b" b:x="1" y="2"><b:c/></r>"#).unwrap();
		let root = doc.root();
		assert_eq!(root.name(), &QName::new(Some("urn:a"), "r"));
		let attrs = root.attributes();
		assert_eq!(attrs.len(), 4);
		assert!(attrs[0].is_namespace_declaration());
		assert!(attrs[1].is_namespace_declaration());
		assert_eq!(attrs[2].name(), &QName::new(Some("urn:b"), "x"));
		// unprefixed attributes are never in the default namespace
		assert_eq!(attrs[3].name(), &QName::local("y"));
		let c = root.elements().next().unwrap();
		assert_eq!(c.name(), &QName::new(Some("urn:b"), "c"));
		assert!(c.is_self_closing());
	}

	#[test]
	fn text_handling() {
		let doc = parse_document("<r>\n\t<a> x &amp; y </a>\n\t<b><![CDATA[ ]]></b><c>&#65;&#x42;</c><!-- note --></r>").unwrap();
		let root = doc.root();
		assert_eq!(root.nodes().len(), 3);
		assert_eq!(root.child(&QName::local("a")).unwrap().value(), " x & y ");
		assert_eq!(root.child(&QName::local("b")).unwrap().value(), " ");
		assert_eq!(root.child(&QName::local("c")).unwrap().value(), "AB");
	}

	#[test]
	fn empty_and_self_closing() {
		let doc = parse_document("<r><a/><b></b></r>").unwrap();
		let root = doc.root();
		assert!(root.child(&QName::local("a")).unwrap().is_self_closing());
		assert!(!root.child(&QName::local("b")).unwrap().is_self_closing());
	}

	#[test]
	fn nesting_limit() {
		fn nested(depth: usize) -> String {
			format!("<r>{}{}</r>", "<a>".repeat(depth - 1), "</a>".repeat(depth - 1))
		}
		assert!(parse_document(&nested(MAX_DEPTH)).is_ok());
		assert!(matches!(parse_document(&nested(MAX_DEPTH + 1)), Err(Error::MalformedDocument(_))));
		assert!(matches!(parse_document(&nested(15_000)), Err(Error::MalformedDocument(_))));

		let leaf = format!("<r>{}<b/>{}</r>", "<a>".repeat(MAX_DEPTH - 1), "</a>".repeat(MAX_DEPTH - 1));
		assert!(matches!(parse_document(&leaf), Err(Error::MalformedDocument(_))));
	}

	#[test]
	fn malformed() {
		assert!(matches!(parse_document(""), Err(Error::MalformedDocument(_))));
		assert!(matches!(parse_document("<a/><b/>"), Err(Error::MalformedDocument(_))));
		assert!(matches!(parse_document("text<a/>"), Err(Error::MalformedDocument(_))));
		assert!(matches!(parse_document("<a><b></a>"), Err(Error::MalformedInput(_))));
		assert!(parse_document("<a>").is_err());
		assert!(parse_document("<x:a/>").is_err());
	}
}
