use crate::{
	errors,
	Result,
};
use chrono::Duration;

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

fn failure(text: &str, reason: &str) -> crate::Error {
	errors::conversion_failure("Duration", text, reason)
}

/// Time span
///
/// Accepts XML schema durations (`P1DT2H30M`, `-PT0.5S`; a year counts as 365 days, a month as
/// 30 days) and clock notation `[-][d.]hh:mm[:ss[.fffffff]]`.
pub fn duration(text: &str) -> Result<Duration> {
	let trimmed = text.trim();
	let (negative, unsigned) = match trimmed.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, trimmed),
	};
	let span = if let Some(designators) = unsigned.strip_prefix('P') {
		schema_duration(designators).ok_or_else(|| failure(text, "invalid duration"))?
	} else {
		clock_duration(unsigned).ok_or_else(|| failure(text, "invalid time span"))?
	};
	Ok(if negative { -span } else { span })
}

fn schema_duration(designators: &str) -> Option<Duration> {
	let (date_part, time_part) = match designators.split_once('T') {
		Some((date, time)) => {
			if time.is_empty() {
				return None;
			}
			(date, Some(time))
		},
		None => (designators, None),
	};
	if date_part.is_empty() && time_part.is_none() {
		return None;
	}

	let mut total = Duration::zero();
	for (value, unit) in components(date_part)? {
		let days = match unit {
			'Y' => 365,
			'M' => 30,
			'W' => 7,
			'D' => 1,
			_ => return None,
		};
		total = total.checked_add(&Duration::try_days(whole(value)?.checked_mul(days)?)?)?;
	}
	if let Some(time_part) = time_part {
		for (value, unit) in components(time_part)? {
			let span = match unit {
				'H' => Duration::try_hours(whole(value)?)?,
				'M' => Duration::try_minutes(whole(value)?)?,
				'S' => seconds(value)?,
				_ => return None,
			};
			total = total.checked_add(&span)?;
		}
	}
	Some(total)
}

/// Split `1Y2M3D` into `[("1", 'Y'), ("2", 'M'), ("3", 'D')]`
fn components(part: &str) -> Option<Vec<(&str, char)>> {
	let mut result = Vec::new();
	let mut start = 0;
	for (index, c) in part.char_indices() {
		if c.is_ascii_digit() || c == '.' {
			continue;
		}
		let value = &part[start..index];
		if value.is_empty() {
			return None;
		}
		result.push((value, c));
		start = index + c.len_utf8();
	}
	if start != part.len() {
		// trailing number without designator
		return None;
	}
	Some(result)
}

fn whole(value: &str) -> Option<i64> {
	value.parse().ok()
}

fn seconds(value: &str) -> Option<Duration> {
	match value.split_once('.') {
		None => Duration::try_seconds(whole(value)?),
		Some((secs, fraction)) => {
			let secs = if secs.is_empty() { 0 } else { whole(secs)? };
			if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
				return None;
			}
			let nanos = format!("0.{}", fraction).parse::<f64>().ok()? * NANOS_PER_SECOND;
			Duration::try_seconds(secs)?.checked_add(&Duration::nanoseconds(nanos.round() as i64))
		},
	}
}

fn clock_duration(text: &str) -> Option<Duration> {
	let (days, clock) = match text.split_once(':') {
		None => return Duration::try_days(whole(text)?),
		Some((head, _)) => match head.split_once('.') {
			Some((days, _)) => (whole(days)?, &text[days.len() + 1..]),
			None => {
				let _ = hours_only(head)?;
				(0, text)
			},
		},
	};

	let mut parts = clock.split(':');
	let hours = parts.next().and_then(hours_only)?;
	let minutes = parts.next().and_then(whole)?;
	let second_span = match parts.next() {
		Some(s) => seconds(s)?,
		None => Duration::zero(),
	};
	if parts.next().is_some() || hours >= 24 || minutes >= 60 || second_span >= Duration::try_seconds(60)? {
		return None;
	}

	Duration::try_days(days)?
		.checked_add(&Duration::try_hours(hours)?)?
		.checked_add(&Duration::try_minutes(minutes)?)?
		.checked_add(&second_span)
}

fn hours_only(text: &str) -> Option<i64> {
	if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	whole(text)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn schema() {
		assert_eq!(duration("P1D").unwrap(), Duration::days(1));
		assert_eq!(duration("PT2H30M").unwrap(), Duration::minutes(150));
		assert_eq!(duration("P1DT1S").unwrap(), Duration::days(1) + Duration::seconds(1));
		assert_eq!(duration("PT0.5S").unwrap(), Duration::milliseconds(500));
		assert_eq!(duration("-PT1M").unwrap(), Duration::minutes(-1));
		assert_eq!(duration("P1Y2M").unwrap(), Duration::days(365 + 60));
		assert!(duration("P").is_err());
		assert!(duration("PT").is_err());
		assert!(duration("P1H").is_err());
		assert!(duration("PT5").is_err());
	}

	#[test]
	fn clock() {
		assert_eq!(duration("01:30:00").unwrap(), Duration::minutes(90));
		assert_eq!(duration("00:00:01.25").unwrap(), Duration::milliseconds(1250));
		assert_eq!(duration("2.03:00:00").unwrap(), Duration::hours(51));
		assert_eq!(duration("-00:10").unwrap(), Duration::minutes(-10));
		assert_eq!(duration("3").unwrap(), Duration::days(3));
		assert!(duration("25:00:00").is_err());
		assert!(duration("10:61").is_err());
		assert!(duration("soon").unwrap_err().is_conversion_failure());
		assert!(duration("").is_err());
	}
}
