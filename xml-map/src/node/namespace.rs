use crate::node::{
	Element,
	Node,
};

/// Strip namespaces from `element` and everything nested in it
///
/// Namespace declarations are removed; other namespaced attributes keep their local name.
pub(super) fn strip_namespaces(element: &mut Element) {
	element.name.strip_namespace();
	element.attributes.retain(|attr| !attr.namespace_declaration);
	for attr in &mut element.attributes {
		attr.name.strip_namespace();
	}
	for node in &mut element.nodes {
		if let Node::Element(child) = node {
			strip_namespaces(child);
		}
	}
}

#[cfg(test)]
mod test {
	use crate::node::{
		Document,
		QName,
	};

	#[test]
	fn strips_everything() {
		let mut doc = Document::parse(
			r#"<r xmlns="urn:a" xmlns:b="urn:b" b:x="1"><b:c><d b:y="2"/></b:c></r>"#,
		)
		.unwrap();
		doc.strip_namespaces();

		let expected = Document::parse(r#"<r x="1"><c><d y="2"/></c></r>"#).unwrap();
		assert_eq!(doc, expected);
		assert_eq!(doc.root().attributes()[0].name(), &QName::local("x"));
	}
}
