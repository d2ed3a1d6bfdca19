//! Conversion of text into typed values
//!
//! Every member of a mapped type has a coercion `Kind`; the kind decides where the mapper looks
//! for a source (text of an element or attribute, a subtree, a list of elements) and which of
//! the conversion functions in this module turns it into a value.

mod date;
mod duration;
mod number;
mod scalar;

pub use self::{
	date::{
		date,
		date_time,
		date_time_offset,
		date_time_utc,
		translate_date_format,
	},
	duration::duration,
	number::{
		decimal,
		float,
		integer,
	},
	scalar::{
		boolean,
		enumeration,
		guid,
		uri,
		Uri,
	},
};

/// Closed set of ways text or subtrees become values
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
	/// `true`/`false` (any case), `1`/`0`
	Bool,
	/// Integer primitives
	Integer,
	/// Floating point primitives
	Float,
	/// Fixed-point decimal
	Decimal,
	/// Fieldless enum matched by member name
	Enum,
	/// Raw text
	String,
	/// Date/time without offset
	Date,
	/// Date/time with offset
	DateOffset,
	/// UUID
	Guid,
	/// Time span
	Duration,
	/// Relative or absolute URI
	Uri,
	/// Ordered collection of elements
	Collection,
	/// Collection with additional fields of its own
	ListDerivative,
	/// Nested record (or a type handled by the converter registry)
	Nested,
}

impl Kind {
	/// Whether values of this kind are converted from text
	pub fn is_scalar(self) -> bool {
		!matches!(self, Self::Collection | Self::ListDerivative | Self::Nested)
	}
}
