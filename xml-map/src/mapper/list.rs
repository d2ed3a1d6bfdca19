//! Collections: wrapped item lists, item search below a scope and list-derivatives

use super::{
	map_members,
	MappingContext,
};
use crate::{
	names,
	node::Element,
	traits::XmlMap,
	Result,
};
use tracing::trace;

/// Items of a wrapping element: all children named like its first child
pub fn wrapped_items(container: &Element) -> Vec<&Element> {
	match container.elements().next() {
		Some(first) => container.children_named(first.name()).collect(),
		None => Vec::new(),
	}
}

/// Elements of type `item_name` anywhere below `scope`, in document order
///
/// Tries the exact (namespaced) name, the lower-cased and camel-cased names, then names with
/// separators stripped (as written and lower-cased); the first non-empty set wins.
pub fn find_items<'a>(scope: &'a Element, item_name: &str, cx: &MappingContext<'_>) -> Vec<&'a Element> {
	let culture = cx.culture();
	let descendants = scope.descendants();
	let select = |rule: &str, matches: &dyn Fn(&Element) -> bool| -> Vec<&'a Element> {
		let found: Vec<&'a Element> = descendants.iter().copied().filter(|e| matches(e)).collect();
		if !found.is_empty() {
			trace!(item = item_name, rule, count = found.len(), "found collection items");
		}
		found
	};

	let exact = cx.qualify(item_name);
	let found = select("exact", &|e| *e.name() == exact);
	if !found.is_empty() {
		return found;
	}
	let lower = cx.qualify(&culture.to_lower(item_name));
	let found = select("lower-case", &|e| *e.name() == lower);
	if !found.is_empty() {
		return found;
	}
	let camel = cx.qualify(&names::camel_case(item_name, culture));
	let found = select("camel-case", &|e| *e.name() == camel);
	if !found.is_empty() {
		return found;
	}
	let stripped = names::strip_separators(item_name);
	let found = select("stripped", &|e| names::strip_separators(e.local_name()) == stripped);
	if !found.is_empty() {
		return found;
	}
	let stripped_lower = culture.to_lower(&stripped);
	select("stripped lower-case", &|e| names::strip_separators(e.local_name()) == stripped_lower)
}

/// Build a list-derivative: items are searched below `scope`, own members are mapped from `own`
pub fn populate_derivative<T: XmlMap>(scope: &Element, own: &Element, cx: &MappingContext<'_>) -> Result<T> {
	let mut target = T::default();
	let descriptor = T::type_descriptor();
	if let Some(items) = descriptor.items_descriptor() {
		let elements = find_items(scope, items.item_type_name(), cx);
		items.populate(&mut target, elements, cx)?;
	}
	map_members(&mut target, &descriptor, own, cx)?;
	Ok(target)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		culture::Culture,
		node::Document,
		registry::ConverterRegistry,
		test_struct::ProductPage,
	};

	fn values<'a>(elements: &[&'a Element]) -> Vec<std::borrow::Cow<'a, str>> {
		elements.iter().map(|e| e.value()).collect()
	}

	#[test]
	fn wrapped() {
		let document: Document = "<Items><Item>1</Item><Other>x</Other><Item>2</Item></Items>".parse().unwrap();
		assert_eq!(values(&wrapped_items(document.root())), ["1", "2"]);
		let document: Document = "<Items/>".parse().unwrap();
		assert!(wrapped_items(document.root()).is_empty());
	}

	#[test]
	fn item_precedence() {
		let culture = Culture::invariant();
		let registry = ConverterRegistry::new();
		let cx = MappingContext::new(&culture, &registry);

		let document: Document = "<r><order_line>a</order_line><OrderLine>b</OrderLine></r>".parse().unwrap();
		assert_eq!(values(&find_items(document.root(), "OrderLine", &cx)), ["b"]);

		let document: Document = "<r><orderline>a</orderline><orderLine>b</orderLine></r>".parse().unwrap();
		assert_eq!(values(&find_items(document.root(), "OrderLine", &cx)), ["a"]);

		let document: Document = "<r><x><order_line>a</order_line></x><Order-Line>b</Order-Line></r>".parse().unwrap();
		assert_eq!(values(&find_items(document.root(), "OrderLine", &cx)), ["b"]);

		let document: Document = "<r><order_line>a</order_line></r>".parse().unwrap();
		assert_eq!(values(&find_items(document.root(), "OrderLine", &cx)), ["a"]);

		let document: Document = "<r><line/></r>".parse().unwrap();
		assert!(find_items(document.root(), "OrderLine", &cx).is_empty());
	}

	#[test]
	fn derivative() {
		let culture = Culture::invariant();
		let registry = ConverterRegistry::new();
		let cx = MappingContext::new(&culture, &registry);
		let document: Document = ProductPage::TEST_DOCUMENT.parse().unwrap();
		let page: ProductPage = populate_derivative(document.root(), document.root(), &cx).unwrap();
		assert_eq!(page, ProductPage::test_result());
	}
}
