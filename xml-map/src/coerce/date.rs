use crate::{
	culture::Culture,
	errors,
	registry::ConverterRegistry,
	Result,
};
use chrono::{
	DateTime,
	FixedOffset,
	NaiveDate,
	NaiveDateTime,
	NaiveTime,
	Utc,
};
use std::any::Any;

const ISO_LAYOUTS: &[&str] = &[
	"%Y-%m-%dT%H:%M:%S%.f",
	"%Y-%m-%d %H:%M:%S%.f",
	"%Y-%m-%dT%H:%M",
	"%Y-%m-%d %H:%M",
];

const OFFSET_LAYOUTS: &[&str] = &[
	"%Y-%m-%dT%H:%M:%S%.f%z",
	"%Y-%m-%d %H:%M:%S%.f%z",
	"%Y-%m-%d %H:%M:%S%.f %z",
	"%Y-%m-%dT%H:%M%z",
];

/// Translate a .NET style custom date/time pattern (`yyyy-MM-dd HH:mm:ss`) into a `chrono`
/// format string.
///
/// Quoted text (`'...'`, `"..."`) and backslash-escaped characters are literals; a leading `%`
/// (single specifier pattern) is ignored.
pub fn translate_date_format(format: &str) -> String {
	let chars: Vec<char> = format.chars().collect();
	let mut out = String::with_capacity(format.len() * 2);
	let mut i = 0;
	while i < chars.len() {
		let c = chars[i];
		let mut run = 1;
		while i + run < chars.len() && chars[i + run] == c {
			run += 1;
		}
		if c == '.' && run == 1 && matches!(chars.get(i + 1), Some('f' | 'F')) {
			// fraction of any length, read as fraction of a second
			let digits = chars[i + 1..].iter().take_while(|&&c| c == 'f' || c == 'F').count();
			out.push_str("%.f");
			i += 1 + digits;
			continue;
		}
		match c {
			'y' => out.push_str(if run <= 2 { "%y" } else { "%Y" }),
			'M' => out.push_str(match run {
				1 | 2 => "%m",
				3 => "%b",
				_ => "%B",
			}),
			'd' => out.push_str(match run {
				1 | 2 => "%d",
				3 => "%a",
				_ => "%A",
			}),
			'H' => out.push_str("%H"),
			'h' => out.push_str("%I"),
			'm' => out.push_str("%M"),
			's' => out.push_str("%S"),
			'f' | 'F' => out.push_str(match run {
				1..=3 => "%3f",
				4..=6 => "%6f",
				_ => "%9f",
			}),
			't' => out.push_str("%p"),
			'z' => out.push_str(if run >= 3 { "%:z" } else { "%z" }),
			'K' => out.push_str("%:z"),
			'%' => (),
			'\'' | '"' => {
				// quoted literal; an unterminated quote runs to the end
				let mut end = i + 1;
				while end < chars.len() && chars[end] != c {
					push_literal(&mut out, chars[end]);
					end += 1;
				}
				i = end + 1;
				continue;
			},
			'\\' => {
				if let Some(&next) = chars.get(i + 1) {
					push_literal(&mut out, next);
				}
				i += 2;
				continue;
			},
			_ => {
				for _ in 0..run {
					push_literal(&mut out, c);
				}
			},
		}
		i += run;
	}
	out
}

fn push_literal(out: &mut String, c: char) {
	if c == '%' {
		out.push_str("%%");
	} else {
		out.push(c);
	}
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
	date.and_time(NaiveTime::MIN)
}

fn parse_exact(text: &str, format: &str, target: &'static str) -> Result<NaiveDateTime> {
	let layout = translate_date_format(format);
	let trimmed = text.trim();
	NaiveDateTime::parse_from_str(trimmed, &layout)
		.or_else(|_| NaiveDate::parse_from_str(trimmed, &layout).map(midnight))
		.map_err(|e| errors::conversion_failure(target, text, format_args!("{} (expected format {:?})", e, format)))
}

fn parse_with_offset(text: &str) -> Option<DateTime<FixedOffset>> {
	if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
		return Some(dt);
	}
	OFFSET_LAYOUTS
		.iter()
		.find_map(|layout| DateTime::parse_from_str(text, layout).ok())
}

/// Date/time in one of the ISO layouts, with an offset (converted to UTC), or in one of the
/// culture's layouts.
fn parse_generic(text: &str, culture: &Culture) -> Option<NaiveDateTime> {
	let trimmed = text.trim();
	if let Some(dt) = ISO_LAYOUTS
		.iter()
		.find_map(|layout| NaiveDateTime::parse_from_str(trimmed, layout).ok())
	{
		return Some(dt);
	}
	if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
		return Some(dt.naive_utc());
	}
	if let Some(dt) = parse_with_offset(trimmed) {
		return Some(dt.naive_utc());
	}
	if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
		return Some(midnight(date));
	}
	culture.date_formats().find_map(|layout| {
		NaiveDateTime::parse_from_str(trimmed, layout)
			.or_else(|_| NaiveDate::parse_from_str(trimmed, layout).map(midnight))
			.ok()
	})
}

/// Date/time without offset
///
/// Uses the explicit .NET style `format` if given, otherwise tries ISO layouts, RFC 3339 and
/// RFC 2822 (converted to UTC) and the culture's layouts.
pub fn date_time(text: &str, format: Option<&str>, culture: &Culture) -> Result<NaiveDateTime> {
	match format {
		Some(format) => parse_exact(text, format, "NaiveDateTime"),
		None => parse_generic(text, culture)
			.ok_or_else(|| errors::conversion_failure("NaiveDateTime", text, "unrecognized date/time")),
	}
}

/// Date without time; see `date_time`
pub fn date(text: &str, format: Option<&str>, culture: &Culture) -> Result<NaiveDate> {
	match format {
		Some(format) => parse_exact(text, format, "NaiveDate").map(|dt| dt.date()),
		None => parse_generic(text, culture)
			.map(|dt| dt.date())
			.ok_or_else(|| errors::conversion_failure("NaiveDate", text, "unrecognized date")),
	}
}

fn offset_date_time<T: Any>(
	text: &str,
	culture: &Culture,
	registry: &ConverterRegistry,
	target: &'static str,
	convert: fn(DateTime<FixedOffset>) -> T,
) -> Result<T> {
	let trimmed = text.trim();
	if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
		return Ok(convert(dt));
	}
	if let Some(converted) = registry.convert_to::<T>(text) {
		return converted;
	}
	if let Some(dt) = parse_with_offset(trimmed) {
		return Ok(convert(dt));
	}
	// no offset in the text: read as UTC
	parse_generic(trimmed, culture)
		.map(|naive| convert(naive.and_utc().into()))
		.ok_or_else(|| errors::conversion_failure(target, text, "unrecognized date/time"))
}

/// Date/time with offset
///
/// Strict RFC 3339 first, then a converter registered for `DateTime<FixedOffset>`, then lenient
/// layouts (RFC 2822, other offset layouts, text without offset read as UTC).
pub fn date_time_offset(
	text: &str,
	culture: &Culture,
	registry: &ConverterRegistry,
) -> Result<DateTime<FixedOffset>> {
	offset_date_time(text, culture, registry, "DateTime<FixedOffset>", |dt| dt)
}

/// Like `date_time_offset`, converted to UTC (the registry is asked for `DateTime<Utc>`)
pub fn date_time_utc(text: &str, culture: &Culture, registry: &ConverterRegistry) -> Result<DateTime<Utc>> {
	offset_date_time(text, culture, registry, "DateTime<Utc>", |dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod test {
	use super::*;

	fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
		NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
	}

	#[test]
	fn translate() {
		assert_eq!(translate_date_format("yyyy-MM-dd"), "%Y-%m-%d");
		assert_eq!(translate_date_format("dd.MM.yy HH:mm:ss.fff"), "%d.%m.%y %H:%M:%S%.f");
		assert_eq!(translate_date_format("HH:mm:ss.FFFFFFF"), "%H:%M:%S%.f");
		assert_eq!(translate_date_format("HHmmssfff"), "%H%M%S%3f");
		assert_eq!(translate_date_format("yyyy-MM-dd'T'HH:mm zzz"), "%Y-%m-%dT%H:%M %:z");
		assert_eq!(translate_date_format("d MMMM yyyy h:mm tt"), "%d %B %Y %I:%M %p");
		assert_eq!(translate_date_format(r"yyyy\%MM"), "%Y%%%m");
	}

	#[test]
	fn explicit_format() {
		let c = Culture::invariant();
		assert_eq!(date_time("2020-02-28", Some("yyyy-MM-dd"), &c).unwrap(), ymd_hms(2020, 2, 28, 0, 0, 0));
		assert_eq!(
			date_time("28.02.2020 13:45", Some("dd.MM.yyyy HH:mm"), &c).unwrap(),
			ymd_hms(2020, 2, 28, 13, 45, 0),
		);
		assert!(date_time("31-02-2020", Some("yyyy-MM-dd"), &c).unwrap_err().is_conversion_failure());
		assert!(date_time("2020-02-31", Some("yyyy-MM-dd"), &c).is_err());
	}

	#[test]
	fn explicit_format_fractions() {
		let c = Culture::invariant();
		let expected = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap().and_hms_milli_opt(3, 4, 5, 500).unwrap();
		for (text, format) in [
			("2020-01-02T03:04:05.5", "yyyy-MM-ddTHH:mm:ss.f"),
			("2020-01-02T03:04:05.50", "yyyy-MM-ddTHH:mm:ss.ff"),
			("2020-01-02T03:04:05.500", "yyyy-MM-ddTHH:mm:ss.fff"),
			("2020-01-02T03:04:05.5000000", "yyyy-MM-ddTHH:mm:ss.fffffff"),
			("2020-01-02T03:04:05.5", "yyyy-MM-ddTHH:mm:ss.FFFFFFF"),
		] {
			assert_eq!(date_time(text, Some(format), &c).unwrap(), expected, "{} / {}", text, format);
		}
	}

	#[test]
	fn generic() {
		let c = Culture::invariant();
		assert_eq!(date_time("2021-03-04T05:06:07", None, &c).unwrap(), ymd_hms(2021, 3, 4, 5, 6, 7));
		assert_eq!(date_time("2021-03-04T05:06:07+02:00", None, &c).unwrap(), ymd_hms(2021, 3, 4, 3, 6, 7));
		assert_eq!(date_time("2021-03-04", None, &c).unwrap(), ymd_hms(2021, 3, 4, 0, 0, 0));
		assert_eq!(date_time("03/04/2021 10:00:00", None, &c).unwrap(), ymd_hms(2021, 3, 4, 10, 0, 0));
		assert_eq!(date_time("04.03.2021", None, &Culture::de_de()).unwrap(), ymd_hms(2021, 3, 4, 0, 0, 0));
		assert_eq!(date("2021-03-04T23:59:00", None, &c).unwrap(), NaiveDate::from_ymd_opt(2021, 3, 4).unwrap());
		assert!(date_time("yesterday", None, &c).unwrap_err().is_conversion_failure());
	}

	#[test]
	fn with_offset() {
		let c = Culture::invariant();
		let registry = ConverterRegistry::new();
		let dt = date_time_offset("2021-03-04T05:06:07+02:00", &c, &registry).unwrap();
		assert_eq!(dt.offset().local_minus_utc(), 7200);
		assert_eq!(dt.naive_utc(), ymd_hms(2021, 3, 4, 3, 6, 7));

		let dt = date_time_offset("Thu, 04 Mar 2021 05:06:07 +0100", &c, &registry).unwrap();
		assert_eq!(dt.offset().local_minus_utc(), 3600);

		let dt = date_time_offset("2021-03-04 05:06:07", &c, &registry).unwrap();
		assert_eq!(dt.offset().local_minus_utc(), 0);
		assert_eq!(dt.naive_utc(), ymd_hms(2021, 3, 4, 5, 6, 7));

		let utc = date_time_utc("2021-03-04T05:06:07+02:00", &c, &registry).unwrap();
		assert_eq!(utc.naive_utc(), ymd_hms(2021, 3, 4, 3, 6, 7));

		assert!(date_time_offset("soon", &c, &registry).is_err());
	}

	#[test]
	fn offset_consults_registry_before_lenient_parsing() {
		let c = Culture::invariant();
		let mut registry = ConverterRegistry::new();
		registry.register(|text: &str| {
			let seconds: i64 = text
				.trim_start_matches('@')
				.parse()
				.map_err(|e| errors::conversion_failure("epoch", text, e))?;
			DateTime::from_timestamp(seconds, 0)
				.map(DateTime::<FixedOffset>::from)
				.ok_or_else(|| errors::conversion_failure("epoch", text, "out of range"))
		});
		let dt = date_time_offset("@86400", &c, &registry).unwrap();
		assert_eq!(dt.naive_utc(), ymd_hms(1970, 1, 2, 0, 0, 0));
		// strict parse wins over the registry
		let dt = date_time_offset("2021-03-04T05:06:07Z", &c, &registry).unwrap();
		assert_eq!(dt.naive_utc(), ymd_hms(2021, 3, 4, 5, 6, 7));
	}
}
