//! Member metadata of mapped types
//!
//! `TypeDescriptor`s are usually generated by `#[derive(XmlMap)]`, but can be written by hand
//! (together with the `FromXml` implementation the derive would generate):
//!
//! ```
//! use std::borrow::Cow;
//! use xml_map::{
//! 	coerce::Kind,
//! 	descriptor::{MemberDescriptor, TypeDescriptor},
//! 	mapper::{self, MappingContext},
//! 	node::Element,
//! 	FromXml, XmlMap,
//! };
//!
//! #[derive(Default)]
//! struct Point {
//! 	x: i32,
//! 	y: i32,
//! 	label: Option<String>,
//! }
//!
//! impl XmlMap for Point {
//! 	fn type_descriptor() -> TypeDescriptor<Self> {
//! 		fn x(p: &mut Point) -> &mut i32 { &mut p.x }
//! 		fn y(p: &mut Point) -> &mut i32 { &mut p.y }
//! 		fn label(p: &mut Point) -> &mut Option<String> { &mut p.label }
//!
//! 		TypeDescriptor::new("Point")
//! 			.member(MemberDescriptor::new("X", x).attribute())
//! 			.member(MemberDescriptor::new("Y", y).attribute())
//! 			.member(MemberDescriptor::new("Label", label).content())
//! 	}
//! }
//!
//! impl FromXml for Point {
//! 	const KIND: Kind = Kind::Nested;
//!
//! 	fn type_name() -> Cow<'static, str> {
//! 		Cow::Borrowed("Point")
//! 	}
//!
//! 	fn from_element(element: &Element, cx: &MappingContext<'_>) -> xml_map::Result<Self> {
//! 		mapper::map_new(element, cx)
//! 	}
//! }
//!
//! let point: Point = xml_map::from_str(r#"<Point x="1" y="2">origin</Point>"#).unwrap();
//! assert_eq!((point.x, point.y), (1, 2));
//! assert_eq!(point.label.as_deref(), Some("origin"));
//! ```

use crate::{
	coerce::Kind,
	mapper::MappingContext,
	node::Element,
	traits::FromXml,
	Result,
};
use std::{
	any::{
		Any,
		TypeId,
	},
	borrow::Cow,
	fmt,
};

/// Where a member's value may come from
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MemberSource {
	/// Element search, then attribute search
	Auto,
	/// Attribute search only
	Attribute,
	/// Text of the current element
	Content,
}

/// What the mapper found for a member
pub(crate) enum Source<'a> {
	/// Empty text for a nullable member
	Null,
	Text(Cow<'a, str>),
	Element(&'a Element),
	Items(Vec<&'a Element>),
	Derivative { scope: &'a Element, own: &'a Element },
	Converted(Box<dyn Any>),
}

trait Slot<T> {
	fn assign(&self, target: &mut T, source: Source<'_>, cx: &MappingContext<'_>) -> Result<()>;
}

struct FieldSlot<T, F> {
	field: fn(&mut T) -> &mut F,
}

impl<T, F: FromXml> Slot<T> for FieldSlot<T, F> {
	fn assign(&self, target: &mut T, source: Source<'_>, cx: &MappingContext<'_>) -> Result<()> {
		let value = match source {
			Source::Null => match F::null() {
				Some(value) => value,
				None => return Ok(()),
			},
			Source::Text(text) => F::from_text(&text, cx)?,
			Source::Element(element) => F::from_element(element, cx)?,
			Source::Items(items) => F::from_items(&items, cx)?,
			Source::Derivative { scope, own } => F::from_derivative(scope, own, cx)?,
			Source::Converted(value) => F::from_converted(value)?,
		};
		*(self.field)(target) = value;
		Ok(())
	}
}

/// Description of a mapped type: its name, members and (for list-derivatives) items
pub struct TypeDescriptor<T> {
	name: Cow<'static, str>,
	members: Vec<MemberDescriptor<T>>,
	items: Option<ItemsDescriptor<T>>,
}

impl<T: 'static> TypeDescriptor<T> {
	/// New descriptor without members
	pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
		Self {
			name: name.into(),
			members: Vec::new(),
			items: None,
		}
	}

	/// Add a member
	pub fn member(mut self, member: MemberDescriptor<T>) -> Self {
		self.members.push(member);
		self
	}

	/// Set the list part of a list-derivative
	pub fn items(mut self, items: ItemsDescriptor<T>) -> Self {
		self.items = Some(items);
		self
	}

	/// Type name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Members in declaration order
	pub fn members(&self) -> &[MemberDescriptor<T>] {
		&self.members
	}

	/// List part
	pub fn items_descriptor(&self) -> Option<&ItemsDescriptor<T>> {
		self.items.as_ref()
	}
}

impl<T> fmt::Debug for TypeDescriptor<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TypeDescriptor")
			.field("name", &self.name)
			.field("members", &self.members)
			.field("items", &self.items)
			.finish()
	}
}

/// A writable member of a mapped type
pub struct MemberDescriptor<T> {
	name: &'static str,
	rename: Option<&'static str>,
	source: MemberSource,
	kind: Kind,
	nullable: bool,
	type_name: Cow<'static, str>,
	item_type_name: Option<Cow<'static, str>>,
	value_type: TypeId,
	slot: Box<dyn Slot<T>>,
}

impl<T: 'static> MemberDescriptor<T> {
	/// Member `name` stored through `field`; kind and nullability come from `F`
	pub fn new<F: FromXml>(name: &'static str, field: fn(&mut T) -> &mut F) -> Self {
		Self {
			name,
			rename: None,
			source: MemberSource::Auto,
			kind: F::KIND,
			nullable: F::NULLABLE,
			type_name: F::type_name(),
			item_type_name: F::item_type_name(),
			value_type: F::value_type(),
			slot: Box::new(FieldSlot { field }),
		}
	}

	/// Override the lookup name
	pub fn rename(mut self, name: &'static str) -> Self {
		self.rename = Some(name);
		self
	}

	/// Only look at attributes
	pub fn attribute(mut self) -> Self {
		self.source = MemberSource::Attribute;
		self
	}

	/// Take the text of the current element
	pub fn content(mut self) -> Self {
		self.source = MemberSource::Content;
		self
	}

	pub(crate) fn assign(&self, target: &mut T, source: Source<'_>, cx: &MappingContext<'_>) -> Result<()> {
		self.slot.assign(target, source, cx)
	}
}

impl<T> MemberDescriptor<T> {
	/// Member name
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Name to search for: override name if declared, member name otherwise
	pub fn lookup_name(&self) -> &'static str {
		self.rename.unwrap_or(self.name)
	}

	/// Whether an override name was declared
	pub fn is_renamed(&self) -> bool {
		self.rename.is_some()
	}

	/// Source restriction
	pub fn source(&self) -> MemberSource {
		self.source
	}

	/// Coercion kind
	pub fn kind(&self) -> Kind {
		self.kind
	}

	/// Whether the member is an `Option<_>`
	pub fn is_nullable(&self) -> bool {
		self.nullable
	}

	/// Name of the member's type
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// Element type name for collections
	pub fn item_type_name(&self) -> Option<&str> {
		self.item_type_name.as_deref()
	}

	/// Type identity used for converter lookup
	pub fn value_type(&self) -> TypeId {
		self.value_type
	}
}

impl<T> fmt::Debug for MemberDescriptor<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemberDescriptor")
			.field("name", &self.name)
			.field("rename", &self.rename)
			.field("source", &self.source)
			.field("kind", &self.kind)
			.field("nullable", &self.nullable)
			.field("type_name", &self.type_name)
			.finish()
	}
}

/// The list part of a list-derivative: element type and the `Vec` to fill
pub struct ItemsDescriptor<T> {
	item_type_name: Cow<'static, str>,
	slot: Box<dyn Slot<T>>,
}

impl<T: 'static> ItemsDescriptor<T> {
	/// Items of type `E` stored in `field`
	pub fn new<E: FromXml>(field: fn(&mut T) -> &mut Vec<E>) -> Self {
		Self {
			item_type_name: E::type_name(),
			slot: Box::new(FieldSlot { field }),
		}
	}

	/// Element type name
	pub fn item_type_name(&self) -> &str {
		&self.item_type_name
	}

	pub(crate) fn populate(&self, target: &mut T, elements: Vec<&Element>, cx: &MappingContext<'_>) -> Result<()> {
		self.slot.assign(target, Source::Items(elements), cx)
	}
}

impl<T> fmt::Debug for ItemsDescriptor<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ItemsDescriptor")
			.field("item_type_name", &self.item_type_name)
			.finish()
	}
}
