//! Finding the element or attribute a member is read from
//!
//! Documents from different sources name the same thing `FirstName`, `firstName`,
//! `firstname` or `first_name`; the lookups here try a fixed list of spellings and the first
//! match wins, regardless of where in the document later spellings appear.

use crate::{
	mapper::MappingContext,
	names,
	node::{
		Attribute,
		Element,
		QName,
	},
};
use std::borrow::Cow;
use tracing::trace;

/// Element for `name` below `current`
///
/// In order: direct child with the exact, lower-cased or camel-cased name; `current` itself if
/// the name is `Value`; the first descendant (by ascending depth) whose name matches after
/// removing `_` and `-` (first as written, then lower-cased).
pub fn find_element<'a>(current: &'a Element, name: &QName, cx: &MappingContext<'_>) -> Option<&'a Element> {
	let culture = cx.culture();
	let local = name.local_name();

	if let Some(element) = current.child(name) {
		return Some(element);
	}
	if let Some(element) = current.child(&name.with_local(culture.to_lower(local))) {
		trace!(%name, "matched lower-cased element name");
		return Some(element);
	}
	if let Some(element) = current.child(&name.with_local(names::camel_case(local, culture))) {
		trace!(%name, "matched camel-cased element name");
		return Some(element);
	}
	if local == "Value" {
		trace!("Value resolves to the current element");
		return Some(current);
	}

	let stripped = names::strip_separators(local);
	let descendants = current.descendants_by_depth();
	if let Some(element) = descendants
		.iter()
		.copied()
		.find(|e| names::strip_separators(e.local_name()) == stripped)
	{
		trace!(%name, found = element.local_name(), "matched element name without separators");
		return Some(element);
	}
	let stripped_lower = culture.to_lower(&stripped);
	let element = descendants
		.into_iter()
		.find(|e| names::strip_separators(e.local_name()) == stripped_lower)?;
	trace!(%name, found = element.local_name(), "matched lower-cased element name without separators");
	Some(element)
}

/// Attribute for `name` on `current` or any element below it (by ascending depth)
///
/// Attribute names are compared without `_` and `-` against the exact, lower-cased and
/// camel-cased local name; with `exact_only` the attribute name must be exactly the local
/// name. Namespace declarations are never matched.
pub fn find_attribute<'a>(
	current: &'a Element,
	name: &QName,
	exact_only: bool,
	cx: &MappingContext<'_>,
) -> Option<&'a Attribute> {
	let culture = cx.culture();
	let local = name.local_name();
	let lower = culture.to_lower(local);
	let camel = names::camel_case(local, culture);

	let attribute = current
		.descendants_and_self_by_depth()
		.into_iter()
		.flat_map(|e| e.attributes())
		.filter(|a| !a.is_namespace_declaration())
		.find(|a| {
			if exact_only {
				return a.local_name() == local;
			}
			let stripped = names::strip_separators(a.local_name());
			stripped == local || stripped == lower || stripped == camel
		})?;
	trace!(%name, found = attribute.local_name(), "matched attribute");
	Some(attribute)
}

/// Text for `name` below `current`: the matched element's text, else the matched attribute's
/// value
///
/// A matched element that is self-closing without attributes or children gives no value (and
/// attributes are not searched then).
pub fn find_value<'a>(current: &'a Element, name: &QName, cx: &MappingContext<'_>) -> Option<Cow<'a, str>> {
	match find_element(current, name, cx) {
		Some(element) => {
			if element.is_self_closing() && !element.has_elements() && !element.has_attributes() {
				trace!(%name, "empty element, no value");
				None
			} else {
				Some(element.value())
			}
		},
		None => find_attribute(current, name, false, cx).map(|a| Cow::Borrowed(a.value())),
	}
}
