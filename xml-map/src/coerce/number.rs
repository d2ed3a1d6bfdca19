use crate::{
	culture::Culture,
	errors,
	Result,
};
use rust_decimal::Decimal;
use std::{
	any::type_name,
	fmt,
	str::FromStr,
};

fn short_type_name<T>() -> &'static str {
	let name = type_name::<T>();
	name.rsplit("::").next().unwrap_or(name)
}

/// Integer: optional sign and digits, surrounding whitespace allowed; no group separators.
pub fn integer<T>(text: &str) -> Result<T>
where
	T: FromStr,
	T::Err: fmt::Display,
{
	text.trim()
		.parse::<T>()
		.map_err(|e| errors::conversion_failure(short_type_name::<T>(), text, e))
}

/// Floating point number using the culture's separators; exponents allowed.
pub fn float<T>(text: &str, culture: &Culture) -> Result<T>
where
	T: FromStr,
	T::Err: fmt::Display,
{
	culture
		.normalize_number(text)
		.parse::<T>()
		.map_err(|e| errors::conversion_failure(short_type_name::<T>(), text, e))
}

/// Fixed-point decimal using the culture's separators.
pub fn decimal(text: &str, culture: &Culture) -> Result<Decimal> {
	let normalized = culture.normalize_number(text);
	let unsigned = normalized.strip_prefix('+').unwrap_or(&normalized);
	Decimal::from_str(unsigned).map_err(|e| errors::conversion_failure("Decimal", text, e))
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn integers() {
		assert_eq!(integer::<i32>("42").unwrap(), 42);
		assert_eq!(integer::<i64>(" -7 ").unwrap(), -7);
		assert_eq!(integer::<u8>("+200").unwrap(), 200);
		assert!(integer::<u8>("300").unwrap_err().is_conversion_failure());
		assert!(integer::<i32>("1,000").is_err());
		assert!(integer::<i32>("").is_err());
	}

	#[test]
	fn floats() {
		assert_eq!(float::<f64>("1,234.5", &Culture::invariant()).unwrap(), 1234.5);
		assert_eq!(float::<f64>("1.234,5", &Culture::de_de()).unwrap(), 1234.5);
		assert_eq!(float::<f32>("2.5e2", &Culture::invariant()).unwrap(), 250.0);
		assert!(float::<f64>("abc", &Culture::invariant()).is_err());
	}

	#[test]
	fn decimals() {
		let d = decimal("12.50", &Culture::invariant()).unwrap();
		assert_eq!(d.to_string(), "12.50");
		assert_eq!(decimal("+3,25", &Culture::de_de()).unwrap().to_string(), "3.25");
		assert!(decimal("12.x", &Culture::invariant()).is_err());
	}

	#[test]
	fn error_names_target() {
		match integer::<u32>("x") {
			Err(crate::Error::ConversionFailure { target, .. }) => assert_eq!(target, "u32"),
			other => panic!("unexpected {:?}", other),
		}
	}
}
