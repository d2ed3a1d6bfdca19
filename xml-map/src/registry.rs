use crate::Result;
use std::{
	any::{
		type_name,
		Any,
		TypeId,
	},
	collections::HashMap,
	fmt,
};

type ConvertFn = dyn Fn(&str) -> Result<Box<dyn Any>> + Send + Sync;

struct Converter {
	type_name: &'static str,
	convert: Box<ConvertFn>,
}

/// Text converters for types the mapper doesn't know how to build from elements
///
/// Consulted for members of nested (non-scalar) kind before the mapper descends into a child
/// element, and for date/time values with offset that fail strict parsing.
#[derive(Default)]
pub struct ConverterRegistry {
	converters: HashMap<TypeId, Converter>,
}

impl ConverterRegistry {
	/// Empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Register (or replace) the converter for `T`
	pub fn register<T, F>(&mut self, convert: F)
	where
		T: Any,
		F: Fn(&str) -> Result<T> + Send + Sync + 'static,
	{
		let converter = Converter {
			type_name: type_name::<T>(),
			convert: Box::new(move |text: &str| Ok(Box::new(convert(text)?) as Box<dyn Any>)),
		};
		self.converters.insert(TypeId::of::<T>(), converter);
	}

	/// Builder variant of `register`
	pub fn with<T, F>(mut self, convert: F) -> Self
	where
		T: Any,
		F: Fn(&str) -> Result<T> + Send + Sync + 'static,
	{
		self.register(convert);
		self
	}

	/// Whether a converter for `T` is registered
	pub fn contains<T: Any>(&self) -> bool {
		self.contains_type(TypeId::of::<T>())
	}

	/// Whether a converter for the type with id `type_id` is registered
	pub fn contains_type(&self, type_id: TypeId) -> bool {
		self.converters.contains_key(&type_id)
	}

	/// Convert `text` into the type with id `type_id`; `None` if no converter is registered
	pub fn convert(&self, type_id: TypeId, text: &str) -> Option<Result<Box<dyn Any>>> {
		self.converters.get(&type_id).map(|converter| (converter.convert)(text))
	}

	/// Typed variant of `convert`
	pub fn convert_to<T: Any>(&self, text: &str) -> Option<Result<T>> {
		let converted = self.convert(TypeId::of::<T>(), text)?;
		Some(converted.map(|value| match value.downcast::<T>() {
			Ok(value) => *value,
			Err(_) => unreachable!("converter registered for wrong type"),
		}))
	}
}

impl fmt::Debug for ConverterRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_set()
			.entries(self.converters.values().map(|c| c.type_name))
			.finish()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::errors;

	#[derive(Debug, PartialEq)]
	struct Point(i32, i32);

	fn point(text: &str) -> Result<Point> {
		let (x, y) = text
			.split_once(',')
			.ok_or_else(|| errors::conversion_failure("Point", text, "expected x,y"))?;
		let x = x.trim().parse().map_err(|e| errors::conversion_failure("Point", text, e))?;
		let y = y.trim().parse().map_err(|e| errors::conversion_failure("Point", text, e))?;
		Ok(Point(x, y))
	}

	#[test]
	fn test() {
		let registry = ConverterRegistry::new().with(point);
		assert!(registry.contains::<Point>());
		assert!(!registry.contains::<String>());
		assert_eq!(registry.convert_to::<Point>("1, 2").unwrap().unwrap(), Point(1, 2));
		assert!(registry.convert_to::<Point>("1").unwrap().is_err());
		assert!(registry.convert_to::<String>("x").is_none());

		let boxed = registry.convert(TypeId::of::<Point>(), "3,4").unwrap().unwrap();
		assert_eq!(*boxed.downcast::<Point>().unwrap(), Point(3, 4));
		assert!(format!("{:?}", registry).contains("Point"));
	}
}
