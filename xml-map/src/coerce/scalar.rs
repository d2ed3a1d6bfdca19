use crate::{
	culture::Culture,
	errors,
	names,
	Result,
};
use std::fmt;
use url::Url;
use uuid::Uuid;

/// Boolean: `true`/`false` in any case, or `1`/`0`
pub fn boolean(text: &str, culture: &Culture) -> Result<bool> {
	match culture.to_lower(text.trim()).as_str() {
		"true" | "1" => Ok(true),
		"false" | "0" => Ok(false),
		_ => Err(errors::conversion_failure("bool", text, "expected true or false")),
	}
}

/// UUID; empty text is the nil UUID
///
/// Accepts hyphenated, simple, braced (`{...}`), parenthesised (`(...)`) and URN forms.
pub fn guid(text: &str) -> Result<Uuid> {
	let trimmed = text.trim();
	if trimmed.is_empty() {
		return Ok(Uuid::nil());
	}
	let literal = trimmed
		.strip_prefix('(')
		.and_then(|t| t.strip_suffix(')'))
		.unwrap_or(trimmed);
	Uuid::parse_str(literal).map_err(|e| errors::conversion_failure("Uuid", text, e))
}

/// URI which is either absolute or relative to some unknown base
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Uri {
	/// Absolute URI
	Absolute(Url),
	/// Relative reference, kept as written
	Relative(String),
}

impl Uri {
	/// Whether the URI is absolute
	pub fn is_absolute(&self) -> bool {
		matches!(self, Self::Absolute(_))
	}

	/// Resolve against a base URL
	pub fn resolve(&self, base: &Url) -> std::result::Result<Url, url::ParseError> {
		match self {
			Self::Absolute(url) => Ok(url.clone()),
			Self::Relative(reference) => base.join(reference),
		}
	}
}

impl Default for Uri {
	fn default() -> Self {
		Self::Relative(String::new())
	}
}

impl fmt::Display for Uri {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Absolute(url) => fmt::Display::fmt(url, f),
			Self::Relative(reference) => f.write_str(reference),
		}
	}
}

/// Relative-or-absolute URI
pub fn uri(text: &str) -> Result<Uri> {
	let trimmed = text.trim();
	match Url::parse(trimmed) {
		Ok(url) => Ok(Uri::Absolute(url)),
		Err(url::ParseError::RelativeUrlWithoutBase) => Ok(Uri::Relative(trimmed.to_string())),
		Err(e) => Err(errors::conversion_failure("Uri", text, e)),
	}
}

/// Find the enum member `text` names
///
/// `members` are the member names in declaration order, `discriminants` their numeric values.
/// Names are matched case-insensitively against all spellings from
/// `names::enum_name_variants`; if no name matches, numeric text is matched against the
/// discriminants. Returns the index of the matching member.
pub fn enumeration(
	text: &str,
	members: &[&str],
	discriminants: &[i64],
	type_name: &'static str,
	culture: &Culture,
) -> Result<usize> {
	let wanted = culture.to_lower(text);
	for (index, member) in members.iter().enumerate() {
		let found = names::enum_name_variants(member, culture)
			.iter()
			.any(|variant| culture.to_lower(variant) == wanted);
		if found {
			return Ok(index);
		}
	}

	if let Ok(value) = text.trim().parse::<i64>() {
		if let Some(index) = discriminants.iter().position(|&d| d == value) {
			return Ok(index);
		}
	}

	Err(errors::conversion_failure(type_name, text, "no matching enum member"))
}
