//! Name transformations used by the lookup heuristics

use crate::culture::Culture;

/// Remove underscores and dashes (`first_name`, `first-name` → `firstname`)
pub fn strip_separators(name: &str) -> String {
	name.chars().filter(|&c| c != '_' && c != '-').collect()
}

/// PascalCase: split words on underscores and spaces, upper-case the first letter of each
/// word; a word that is otherwise all upper-case is lower-cased (`ID` → `Id`).
pub fn pascal_case(name: &str, culture: &Culture) -> String {
	name.split(|c| c == '_' || c == ' ')
		.filter(|word| !word.is_empty())
		.map(|word| {
			let mut chars = word.chars();
			let first = chars.next().map(String::from).unwrap_or_default();
			let rest = chars.as_str();
			let rest = if is_upper_case(rest) {
				culture.to_lower(rest)
			} else {
				rest.to_string()
			};
			culture.to_upper(&first) + &rest
		})
		.collect()
}

/// camelCase: like `pascal_case`, with lower-case first letter (`FirstName` → `firstName`).
pub fn camel_case(name: &str, culture: &Culture) -> String {
	let pascal = pascal_case(name, culture);
	let mut chars = pascal.chars();
	match chars.next() {
		Some(first) => culture.to_lower(&first.to_string()) + chars.as_str(),
		None => pascal,
	}
}

fn is_upper_case(text: &str) -> bool {
	text.chars().all(|c| !c.is_lowercase())
}

/// Split a PascalCase/camelCase name into words joined by `separator`
///
/// Word boundaries: before an upper-case letter following a lower-case letter or digit, and
/// before the last upper-case letter of an upper-case run followed by a lower-case letter
/// (`HTMLPage` → `HTML_Page`). Existing dashes and whitespace become the separator too.
pub fn separate_words(name: &str, separator: char) -> String {
	let chars: Vec<char> = name.chars().collect();
	let mut result = String::with_capacity(name.len() + 4);
	for (i, &c) in chars.iter().enumerate() {
		if c == '-' || c.is_whitespace() {
			result.push(separator);
			continue;
		}
		if i > 0 && c.is_uppercase() {
			let prev = chars[i - 1];
			let next_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());
			if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower) {
				result.push(separator);
			}
		}
		result.push(c);
	}
	result
}

/// Spellings an enum member name may appear as in a document
///
/// Variants are meant to be compared case-insensitively.
pub fn enum_name_variants(name: &str, culture: &Culture) -> Vec<String> {
	if name.is_empty() {
		return Vec::new();
	}
	let underscored = separate_words(name, '_');
	vec![
		name.to_string(),
		camel_case(name, culture),
		culture.to_lower(name),
		separate_words(name, '-'),
		format!("_{}", name),
		camel_case(&underscored, culture),
		separate_words(name, ' '),
		underscored,
	]
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn strip() {
		assert_eq!(strip_separators("first_name"), "firstname");
		assert_eq!(strip_separators("first-name"), "firstname");
		assert_eq!(strip_separators("FirstName"), "FirstName");
	}

	#[test]
	fn camel() {
		let c = Culture::invariant();
		assert_eq!(camel_case("FirstName", &c), "firstName");
		assert_eq!(camel_case("first_name", &c), "firstName");
		assert_eq!(camel_case("ID", &c), "id");
		assert_eq!(camel_case("Value", &c), "value");
		assert_eq!(camel_case("", &c), "");
		assert_eq!(pascal_case("user_id", &c), "UserId");
		assert_eq!(camel_case("Index", &Culture::tr_tr()), "ındex");
	}

	#[test]
	fn words() {
		assert_eq!(separate_words("HTMLPage", '_'), "HTML_Page");
		assert_eq!(separate_words("PendingApproval", '-'), "Pending-Approval");
		assert_eq!(separate_words("Level2Access", ' '), "Level2 Access");
		assert_eq!(separate_words("already_split", '_'), "already_split");
	}

	#[test]
	fn variants() {
		let c = Culture::invariant();
		let v = enum_name_variants("PendingApproval", &c);
		for expected in ["PendingApproval", "pendingApproval", "pendingapproval", "Pending-Approval", "Pending_Approval", "Pending Approval", "_PendingApproval"] {
			assert!(v.iter().any(|n| n == expected), "missing {}", expected);
		}
		assert!(enum_name_variants("", &c).is_empty());
	}
}
