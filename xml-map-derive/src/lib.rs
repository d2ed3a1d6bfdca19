//! Derive `xml-map` trait implementations
//!
//! Deriving supports the following attributes on the type:
//! - `#[xml_map(rename = "...")]`: Name used to find elements of this type (for example as
//!   collection items); defaults to the type name
//! - `#[xml_map(crate = "...")]`: Name of `xml-map` crate in local scope; defaults to `xml_map`
//!
//! And the following attributes on struct fields (`XmlMap` only):
//! - `#[xml_map(rename = "...")]`: Lookup name instead of the member name (the field name in
//!   PascalCase, `first_name` becomes `FirstName`)
//! - `#[xml_map(attribute)]`: Only read the field from attributes (with `rename` the attribute
//!   name must match exactly)
//! - `#[xml_map(content)]`: Read the field from the text of the element itself
//! - `#[xml_map(skip)]`: Don't map the field; it keeps its default value
//! - `#[xml_map(items)]`: `Vec<T>` field holding the items of a list-derivative
//!
//! Enum variants (`XmlEnum` only) accept `#[xml_map(rename = "...")]`.
//!
//! Multiple attributes can be combined like `#[xml_map(rename = "...", attribute)]`.
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/xml-map-derive/0.0.1")]

extern crate proc_macro;

mod element;
mod enumeration;
mod mapper;

use darling::FromDeriveInput;
use proc_macro::TokenStream;
use syn::{
	parse_macro_input,
	DeriveInput,
};

use crate::element::{
	EnumInput,
	MapInput,
};

/// Derive `xml_map::XmlMap` and `xml_map::FromXml` for structs with named fields
#[proc_macro_derive(XmlMap, attributes(xml_map))]
pub fn derive_xml_map(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);

	TokenStream::from(
		match MapInput::from_derive_input(&input).and_then(|input| mapper::derive_xml_map(&input)) {
			Ok(output) => output,
			Err(e) => e.write_errors(),
		},
	)
}

/// Derive `xml_map::FromXml` for fieldless enums
#[proc_macro_derive(XmlEnum, attributes(xml_map))]
pub fn derive_xml_enum(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);

	TokenStream::from(
		match EnumInput::from_derive_input(&input).and_then(|input| enumeration::derive_xml_enum(&input)) {
			Ok(output) => output,
			Err(e) => e.write_errors(),
		},
	)
}
