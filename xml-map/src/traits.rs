use crate::{
	coerce::Kind,
	descriptor::TypeDescriptor,
	errors,
	mapper::MappingContext,
	node::Element,
	Result,
};
use std::{
	any::{
		Any,
		TypeId,
	},
	borrow::Cow,
};

/// Values that can be built from XML text or elements
///
/// `KIND` tells the mapper where to look for a source and which of the constructors to call:
/// scalar kinds get `from_text` (or `from_element`), collections `from_items`, list-derivatives
/// `from_derivative` and nested records `from_element` (or `from_converted` when the
/// `ConverterRegistry` knows the type).
///
/// Implemented for primitives, strings, `chrono`, `rust_decimal`, `uuid` and `url` types,
/// `Option<T>` and `Vec<T>`; can be derived for records (`XmlMap`) and fieldless enums
/// (`XmlEnum`) if the `derive` feature is active.
pub trait FromXml: Sized + 'static {
	/// Coercion kind
	const KIND: Kind;

	/// Whether empty text means "no value" (see `null`)
	const NULLABLE: bool = false;

	/// Name used to find elements of this type (collection items, list-derivatives)
	fn type_name() -> Cow<'static, str>;

	/// Name of the element type for collections
	fn item_type_name() -> Option<Cow<'static, str>> {
		None
	}

	/// Type identity the `ConverterRegistry` is asked for
	fn value_type() -> TypeId {
		TypeId::of::<Self>()
	}

	/// Convert text
	fn from_text(text: &str, cx: &MappingContext<'_>) -> Result<Self> {
		let _ = (text, cx);
		Err(errors::unsupported_type(Self::type_name()))
	}

	/// Convert an element; scalars use the element's text
	fn from_element(element: &Element, cx: &MappingContext<'_>) -> Result<Self> {
		Self::from_text(&element.value(), cx)
	}

	/// Build a collection from its item elements (in document order)
	fn from_items(items: &[&Element], cx: &MappingContext<'_>) -> Result<Self> {
		let _ = (items, cx);
		Err(errors::unsupported_type(Self::type_name()))
	}

	/// Build a list-derivative: items are searched below `scope`, own members below `own`
	fn from_derivative(scope: &Element, own: &Element, cx: &MappingContext<'_>) -> Result<Self> {
		let _ = (scope, own, cx);
		Err(errors::unsupported_type(Self::type_name()))
	}

	/// Take the value a registered converter produced
	fn from_converted(value: Box<dyn Any>) -> Result<Self> {
		match value.downcast::<Self>() {
			Ok(value) => Ok(*value),
			Err(_) => Err(errors::unsupported_type(Self::type_name())),
		}
	}

	/// The "no value" value for `NULLABLE` types
	fn null() -> Option<Self> {
		None
	}
}

/// Records whose members are mapped from XML
///
/// Can be derived (if `derive` feature is active); the derive also implements `FromXml` with
/// kind `Nested`, or `ListDerivative` if a field is marked `#[xml_map(items)]`.
pub trait XmlMap: Default + 'static {
	/// Member metadata and setters
	fn type_descriptor() -> TypeDescriptor<Self>;
}
