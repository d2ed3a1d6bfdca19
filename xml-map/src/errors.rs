#![allow(missing_docs)] // helper names should be good enough
//! Error type and helper functions to generate common errors

use std::{
	borrow::Cow,
	fmt,
};

/// Everything that can go wrong while mapping a document
///
/// Missing data is never an error; members without a source keep their default value.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The XML reader rejected the input.
	#[error("malformed XML: {0}")]
	MalformedInput(#[from] quick_xml::Error),
	/// The input was readable, but doesn't form a single well-formed document.
	#[error("malformed XML document: {0}")]
	MalformedDocument(String),
	/// Text couldn't be coerced into the declared type of a member.
	#[error("cannot convert {text:?} to {target}: {reason}")]
	ConversionFailure {
		/// Name of the type the text was converted to
		target: Cow<'static, str>,
		/// The offending text
		text: String,
		/// Why the conversion failed
		reason: String,
	},
	/// A type has no way to be built from the requested kind of source.
	#[error("unsupported type {0}")]
	UnsupportedType(Cow<'static, str>),
}

impl Error {
	/// Whether this is a `ConversionFailure`
	pub fn is_conversion_failure(&self) -> bool {
		matches!(self, Self::ConversionFailure { .. })
	}
}

pub fn malformed_document(msg: impl fmt::Display) -> Error {
	Error::MalformedDocument(msg.to_string())
}

pub fn conversion_failure(
	target: impl Into<Cow<'static, str>>,
	text: &str,
	reason: impl fmt::Display,
) -> Error {
	Error::ConversionFailure {
		target: target.into(),
		text: text.into(),
		reason: reason.to_string(),
	}
}

pub fn unsupported_type(name: impl Into<Cow<'static, str>>) -> Error {
	Error::UnsupportedType(name.into())
}
