//! Recursive mapping of elements into `XmlMap` records
//!
//! For every member of a record the mapper resolves a source below the current element (see
//! `resolver`), then hands text, a subtree or a list of elements to the member's `FromXml`
//! implementation depending on its coercion `Kind`. Members without a source keep their
//! default value.

pub mod list;
pub mod root;

use crate::{
	coerce::Kind,
	culture::Culture,
	descriptor::{
		MemberDescriptor,
		MemberSource,
		Source,
		TypeDescriptor,
	},
	node::{
		Element,
		QName,
	},
	registry::ConverterRegistry,
	resolver,
	traits::XmlMap,
	Result,
};
use std::borrow::Cow;
use tracing::trace;

/// Settings for a single mapping pass
#[derive(Clone, Copy, Debug)]
pub struct MappingContext<'a> {
	namespace: Option<&'a str>,
	culture: &'a Culture,
	date_format: Option<&'a str>,
	registry: &'a ConverterRegistry,
}

impl<'a> MappingContext<'a> {
	/// Context without namespace and explicit date format
	pub fn new(culture: &'a Culture, registry: &'a ConverterRegistry) -> Self {
		Self {
			namespace: None,
			culture,
			date_format: None,
			registry,
		}
	}

	/// Namespace lookup names are qualified with
	pub fn with_namespace(mut self, namespace: Option<&'a str>) -> Self {
		self.namespace = namespace;
		self
	}

	/// .NET style date/time pattern for values without offset
	pub fn with_date_format(mut self, date_format: Option<&'a str>) -> Self {
		self.date_format = date_format;
		self
	}

	/// Configured namespace
	pub fn namespace(&self) -> Option<&'a str> {
		self.namespace
	}

	/// Culture
	pub fn culture(&self) -> &'a Culture {
		self.culture
	}

	/// Explicit date/time pattern
	pub fn date_format(&self) -> Option<&'a str> {
		self.date_format
	}

	/// Converter registry
	pub fn registry(&self) -> &'a ConverterRegistry {
		self.registry
	}

	/// Qualify a local name with the configured namespace
	pub fn qualify(&self, local: &str) -> QName {
		QName::new(self.namespace, local)
	}
}

/// Map `element` into a fresh `T`
pub fn map_new<T: XmlMap>(element: &Element, cx: &MappingContext<'_>) -> Result<T> {
	let mut target = T::default();
	map_into(&mut target, element, cx)?;
	Ok(target)
}

/// Map `element` into the members of an existing `T`
pub fn map_into<T: XmlMap>(target: &mut T, element: &Element, cx: &MappingContext<'_>) -> Result<()> {
	map_members(target, &T::type_descriptor(), element, cx)
}

pub(crate) fn map_members<T: 'static>(
	target: &mut T,
	descriptor: &TypeDescriptor<T>,
	current: &Element,
	cx: &MappingContext<'_>,
) -> Result<()> {
	for member in descriptor.members() {
		map_member(target, member, current, cx)?;
	}
	Ok(())
}

fn map_member<T: 'static>(
	target: &mut T,
	member: &MemberDescriptor<T>,
	current: &Element,
	cx: &MappingContext<'_>,
) -> Result<()> {
	let name = cx.qualify(member.lookup_name());
	let value: Option<Cow<'_, str>> = match member.source() {
		MemberSource::Content => Some(current.value()),
		MemberSource::Attribute => resolver::find_attribute(current, &name, member.is_renamed(), cx)
			.map(|attribute| Cow::Borrowed(attribute.value())),
		MemberSource::Auto => resolver::find_value(current, &name, cx),
	};
	let kind = member.kind();

	let value = match value {
		Some(value) => value,
		None if kind == Kind::Collection && member.source() == MemberSource::Auto => {
			let items = inline_items(member, current, cx);
			trace!(member = member.name(), count = items.len(), "collection from unwrapped siblings");
			return member.assign(target, Source::Items(items), cx);
		},
		None => {
			trace!(member = member.name(), "no source found, keeping default");
			return Ok(());
		},
	};

	if member.is_nullable() && kind.is_scalar() && value.is_empty() {
		return member.assign(target, Source::Null, cx);
	}

	match kind {
		Kind::DateOffset if value.trim().is_empty() => {
			trace!(member = member.name(), "empty date/time, keeping default");
			Ok(())
		},
		Kind::Collection => {
			let items = resolver::find_element(current, &name, cx)
				.map(list::wrapped_items)
				.unwrap_or_default();
			member.assign(target, Source::Items(items), cx)
		},
		Kind::ListDerivative => {
			let own = current.child(&name).unwrap_or(current);
			member.assign(target, Source::Derivative { scope: current, own }, cx)
		},
		Kind::Nested => {
			if let Some(converted) = cx.registry().convert(member.value_type(), &value) {
				trace!(member = member.name(), "converted by registry");
				return member.assign(target, Source::Converted(converted?), cx);
			}
			match resolver::find_element(current, &name, cx) {
				Some(element) => member.assign(target, Source::Element(element), cx),
				None => {
					trace!(member = member.name(), "no element for nested record, keeping default");
					Ok(())
				},
			}
		},
		_ => member.assign(target, Source::Text(value), cx),
	}
}

/// Items of a collection written as repeated siblings without wrapping element
///
/// The element type name is searched below `current`; all siblings of the first match sharing
/// its name are the items.
fn inline_items<'a, T>(member: &MemberDescriptor<T>, current: &'a Element, cx: &MappingContext<'_>) -> Vec<&'a Element> {
	let Some(item_name) = member.item_type_name() else {
		return Vec::new();
	};
	let Some(first) = resolver::find_element(current, &cx.qualify(item_name), cx) else {
		return Vec::new();
	};
	let parent = current.parent_of(first).unwrap_or(current);
	parent.children_named(first.name()).collect()
}
