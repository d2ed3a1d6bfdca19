use crate::{
	coerce::{
		self,
		Kind,
		Uri,
	},
	errors,
	mapper::MappingContext,
	node::Element,
	traits::FromXml,
	Result,
};
use chrono::{
	DateTime,
	FixedOffset,
	NaiveDate,
	NaiveDateTime,
	Utc,
};
use rust_decimal::Decimal;
use std::{
	any::{
		Any,
		TypeId,
	},
	borrow::Cow,
};
use url::Url;
use uuid::Uuid;

macro_rules! scalar_impl {
	($ty:ty, $kind:ident, $name:expr, |$text:ident, $cx:ident| $convert:expr) => {
		impl FromXml for $ty {
			const KIND: Kind = Kind::$kind;

			fn type_name() -> Cow<'static, str> {
				Cow::Borrowed($name)
			}

			fn from_text($text: &str, $cx: &MappingContext<'_>) -> Result<Self> {
				$convert
			}
		}
	};
}

macro_rules! integer_impls {
	($($ty:ident)*) => {$(
		scalar_impl!($ty, Integer, stringify!($ty), |text, _cx| coerce::integer(text));
	)*};
}

integer_impls!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

scalar_impl!(f32, Float, "f32", |text, cx| coerce::float(text, cx.culture()));
scalar_impl!(f64, Float, "f64", |text, cx| coerce::float(text, cx.culture()));
scalar_impl!(bool, Bool, "bool", |text, cx| coerce::boolean(text, cx.culture()));
scalar_impl!(Decimal, Decimal, "Decimal", |text, cx| coerce::decimal(text, cx.culture()));
scalar_impl!(String, String, "String", |text, _cx| Ok(text.to_string()));
scalar_impl!(Uuid, Guid, "Uuid", |text, _cx| coerce::guid(text));
scalar_impl!(Uri, Uri, "Uri", |text, _cx| coerce::uri(text));
scalar_impl!(chrono::Duration, Duration, "Duration", |text, _cx| coerce::duration(text));

scalar_impl!(NaiveDateTime, Date, "NaiveDateTime", |text, cx| {
	coerce::date_time(text, cx.date_format(), cx.culture())
});
scalar_impl!(NaiveDate, Date, "NaiveDate", |text, cx| {
	coerce::date(text, cx.date_format(), cx.culture())
});
scalar_impl!(DateTime<FixedOffset>, DateOffset, "DateTime", |text, cx| {
	coerce::date_time_offset(text, cx.culture(), cx.registry())
});
scalar_impl!(DateTime<Utc>, DateOffset, "DateTime", |text, cx| {
	coerce::date_time_utc(text, cx.culture(), cx.registry())
});

scalar_impl!(std::time::Duration, Duration, "Duration", |text, _cx| {
	coerce::duration(text)?
		.to_std()
		.map_err(|e| errors::conversion_failure("std::time::Duration", text, e))
});

scalar_impl!(Url, Uri, "Url", |text, _cx| match coerce::uri(text)? {
	Uri::Absolute(url) => Ok(url),
	Uri::Relative(_) => Err(errors::conversion_failure("Url", text, "relative URL without base")),
});

impl<T: FromXml> FromXml for Option<T> {
	const KIND: Kind = T::KIND;
	const NULLABLE: bool = true;

	fn type_name() -> Cow<'static, str> {
		T::type_name()
	}

	fn item_type_name() -> Option<Cow<'static, str>> {
		T::item_type_name()
	}

	fn value_type() -> TypeId {
		T::value_type()
	}

	fn from_text(text: &str, cx: &MappingContext<'_>) -> Result<Self> {
		T::from_text(text, cx).map(Some)
	}

	fn from_element(element: &Element, cx: &MappingContext<'_>) -> Result<Self> {
		if T::KIND.is_scalar() && element.value().is_empty() {
			return Ok(None);
		}
		T::from_element(element, cx).map(Some)
	}

	fn from_items(items: &[&Element], cx: &MappingContext<'_>) -> Result<Self> {
		T::from_items(items, cx).map(Some)
	}

	fn from_derivative(scope: &Element, own: &Element, cx: &MappingContext<'_>) -> Result<Self> {
		T::from_derivative(scope, own, cx).map(Some)
	}

	fn from_converted(value: Box<dyn Any>) -> Result<Self> {
		T::from_converted(value).map(Some)
	}

	fn null() -> Option<Self> {
		Some(None)
	}
}

impl<T: FromXml> FromXml for Vec<T> {
	const KIND: Kind = Kind::Collection;

	fn type_name() -> Cow<'static, str> {
		Cow::Owned(format!("Vec<{}>", T::type_name()))
	}

	fn item_type_name() -> Option<Cow<'static, str>> {
		Some(T::type_name())
	}

	fn from_items(items: &[&Element], cx: &MappingContext<'_>) -> Result<Self> {
		items.iter().map(|item| T::from_element(item, cx)).collect()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		culture::Culture,
		registry::ConverterRegistry,
	};

	fn convert<T: FromXml>(text: &str) -> Result<T> {
		let culture = Culture::invariant();
		let registry = ConverterRegistry::new();
		T::from_text(text, &MappingContext::new(&culture, &registry))
	}

	#[test]
	fn kinds() {
		assert_eq!(<i32 as FromXml>::KIND, Kind::Integer);
		assert_eq!(<Option<i32> as FromXml>::KIND, Kind::Integer);
		assert!(<Option<i32> as FromXml>::NULLABLE);
		assert!(!<i32 as FromXml>::NULLABLE);
		assert_eq!(<Vec<u8> as FromXml>::KIND, Kind::Collection);
		assert_eq!(<Vec<u8> as FromXml>::item_type_name().as_deref(), Some("u8"));
		assert_eq!(<DateTime<Utc> as FromXml>::KIND, Kind::DateOffset);
		assert_eq!(<Option<Uuid> as FromXml>::value_type(), TypeId::of::<Uuid>());
	}

	#[test]
	fn scalars() {
		assert_eq!(convert::<i32>("42").unwrap(), 42);
		assert_eq!(convert::<u64>(" 7 ").unwrap(), 7);
		assert!(convert::<bool>("True").unwrap());
		assert_eq!(convert::<String>(" keep ").unwrap(), " keep ");
		assert_eq!(convert::<Option<i32>>("5").unwrap(), Some(5));
		assert_eq!(convert::<f64>("0.5").unwrap(), 0.5);
		assert_eq!(convert::<std::time::Duration>("PT1M").unwrap(), std::time::Duration::from_secs(60));
		assert!(convert::<std::time::Duration>("-PT1M").is_err());
		assert_eq!(convert::<Url>("https://example.com/").unwrap().as_str(), "https://example.com/");
		assert!(convert::<Url>("relative/path").unwrap_err().is_conversion_failure());
		assert!(convert::<i32>("x").unwrap_err().is_conversion_failure());
	}

	#[test]
	fn null() {
		assert_eq!(<Option<i32> as FromXml>::null(), Some(None));
		assert_eq!(<i32 as FromXml>::null(), None);
	}

	#[test]
	fn items() {
		let culture = Culture::invariant();
		let registry = ConverterRegistry::new();
		let cx = MappingContext::new(&culture, &registry);
		let a = Element::new(crate::node::QName::local("v")).with_text("1");
		let b = Element::new(crate::node::QName::local("v")).with_text("2");
		let empty = Element::new(crate::node::QName::local("v"));
		assert_eq!(Vec::<i32>::from_items(&[&a, &b], &cx).unwrap(), vec![1, 2]);
		assert_eq!(Vec::<Option<i32>>::from_items(&[&a, &empty], &cx).unwrap(), vec![Some(1), None]);
		assert!(Vec::<i32>::from_items(&[&a, &empty], &cx).is_err());
		assert!(i32::from_items(&[&a], &cx).is_err());
	}
}
