//! Locale rules used while matching names and converting text
//!
//! A `Culture` is passed explicitly to every resolution and conversion; there is no global
//! locale.

use std::borrow::Cow;

/// Numeric separators, date layouts and case folding of a locale
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Culture {
	name: Cow<'static, str>,
	decimal_separator: char,
	group_separator: char,
	date_formats: Vec<Cow<'static, str>>,
	turkic_casing: bool,
}

impl Default for Culture {
	fn default() -> Self {
		Self::invariant()
	}
}

impl Culture {
	/// Locale independent rules (`.` decimal separator, month-first dates)
	pub fn invariant() -> Self {
		Self {
			name: Cow::Borrowed(""),
			decimal_separator: '.',
			group_separator: ',',
			date_formats: vec![
				Cow::Borrowed("%m/%d/%Y %H:%M:%S"),
				Cow::Borrowed("%m/%d/%Y %I:%M:%S %p"),
				Cow::Borrowed("%m/%d/%Y %H:%M"),
				Cow::Borrowed("%m/%d/%Y"),
			],
			turkic_casing: false,
		}
	}

	/// English (United States)
	pub fn en_us() -> Self {
		Self {
			name: Cow::Borrowed("en-US"),
			..Self::invariant()
		}
	}

	/// German (Germany)
	pub fn de_de() -> Self {
		Self {
			name: Cow::Borrowed("de-DE"),
			decimal_separator: ',',
			group_separator: '.',
			date_formats: vec![
				Cow::Borrowed("%d.%m.%Y %H:%M:%S"),
				Cow::Borrowed("%d.%m.%Y %H:%M"),
				Cow::Borrowed("%d.%m.%Y"),
			],
			turkic_casing: false,
		}
	}

	/// French (France)
	pub fn fr_fr() -> Self {
		Self {
			name: Cow::Borrowed("fr-FR"),
			decimal_separator: ',',
			group_separator: '\u{202f}',
			date_formats: vec![
				Cow::Borrowed("%d/%m/%Y %H:%M:%S"),
				Cow::Borrowed("%d/%m/%Y %H:%M"),
				Cow::Borrowed("%d/%m/%Y"),
			],
			turkic_casing: false,
		}
	}

	/// Turkish (Turkey); uses dotted/dotless i case mapping
	pub fn tr_tr() -> Self {
		Self {
			name: Cow::Borrowed("tr-TR"),
			turkic_casing: true,
			..Self::de_de()
		}
	}

	/// Custom culture starting from the invariant rules
	pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
		Self {
			name: name.into(),
			..Self::invariant()
		}
	}

	/// Set decimal separator
	pub fn with_decimal_separator(mut self, separator: char) -> Self {
		self.decimal_separator = separator;
		self
	}

	/// Set digit group separator
	pub fn with_group_separator(mut self, separator: char) -> Self {
		self.group_separator = separator;
		self
	}

	/// Replace date layouts (`chrono` strftime syntax) tried by the generic date parser
	pub fn with_date_formats<I, S>(mut self, formats: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Cow<'static, str>>,
	{
		self.date_formats = formats.into_iter().map(Into::into).collect();
		self
	}

	/// Enable dotted/dotless i case mapping (Turkish, Azerbaijani)
	pub fn with_turkic_casing(mut self, enable: bool) -> Self {
		self.turkic_casing = enable;
		self
	}

	/// Locale name (empty for the invariant culture)
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Decimal separator
	pub fn decimal_separator(&self) -> char {
		self.decimal_separator
	}

	/// Digit group separator
	pub fn group_separator(&self) -> char {
		self.group_separator
	}

	/// Date layouts tried by the generic date parser
	pub fn date_formats(&self) -> impl Iterator<Item = &str> {
		self.date_formats.iter().map(|f| f.as_ref())
	}

	/// Lower-case text
	pub fn to_lower(&self, text: &str) -> String {
		if !self.turkic_casing {
			return text.to_lowercase();
		}
		let mut result = String::with_capacity(text.len());
		for c in text.chars() {
			match c {
				'I' => result.push('ı'),
				'İ' => result.push('i'),
				c => result.extend(c.to_lowercase()),
			}
		}
		result
	}

	/// Upper-case text
	pub fn to_upper(&self, text: &str) -> String {
		if !self.turkic_casing {
			return text.to_uppercase();
		}
		let mut result = String::with_capacity(text.len());
		for c in text.chars() {
			match c {
				'i' => result.push('İ'),
				'ı' => result.push('I'),
				c => result.extend(c.to_uppercase()),
			}
		}
		result
	}

	/// Compare text ignoring case
	pub fn eq_ignore_case(&self, a: &str, b: &str) -> bool {
		a == b || self.to_lower(a) == self.to_lower(b)
	}

	/// Prepare numeric text for `str::parse`: trim, drop group separators and use `.` as decimal
	/// separator.
	pub(crate) fn normalize_number<'a>(&self, text: &'a str) -> Cow<'a, str> {
		let text = text.trim();
		if self.decimal_separator == '.' && !text.contains(self.group_separator) {
			return Cow::Borrowed(text);
		}
		let normalized = text
			.chars()
			.filter(|&c| c != self.group_separator)
			.map(|c| if c == self.decimal_separator { '.' } else { c })
			.collect();
		Cow::Owned(normalized)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn numbers() {
		assert_eq!(Culture::invariant().normalize_number(" 1,234.5 "), "1234.5");
		assert_eq!(Culture::de_de().normalize_number("1.234,5"), "1234.5");
		assert_eq!(Culture::invariant().normalize_number("42"), "42");
	}

	#[test]
	fn casing() {
		let tr = Culture::tr_tr();
		assert_eq!(tr.to_lower("TITLE"), "tıtle");
		assert_eq!(tr.to_upper("title"), "TİTLE");
		assert_eq!(Culture::invariant().to_lower("TITLE"), "title");
		assert!(Culture::invariant().eq_ignore_case("Active", "ACTIVE"));
		assert!(!tr.eq_ignore_case("ID", "id"));
	}

	#[test]
	fn builder() {
		let culture = Culture::new("x-custom")
			.with_decimal_separator(',')
			.with_group_separator(' ')
			.with_date_formats(["%Y%m%d"]);
		assert_eq!(culture.name(), "x-custom");
		assert_eq!(culture.normalize_number("1 000,25"), "1000.25");
		assert_eq!(culture.date_formats().collect::<Vec<_>>(), ["%Y%m%d"]);
	}
}
