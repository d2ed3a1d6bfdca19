#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/xml-map/0.0.1")]
//! This library maps XML documents into statically typed Rust values, tolerating the
//! inconsistent naming found in real-world XML APIs.
//!
//! Strict mappers expect every element to be spelled exactly as declared. Documents produced by
//! different services rarely agree though: the same member shows up as `FirstName`,
//! `firstName`, `firstname` or `first_name`, sometimes as element and sometimes as attribute,
//! and lists may or may not have a wrapping element. The mapper here searches for each member
//! using a fixed order of naming heuristics and leaves members it can't find at their default
//! value; only text that can't be converted into the declared type is an error.
//!
//! ```
//! use xml_map::{XmlDeserializer, XmlEnum, XmlMap};
//!
//! #[derive(XmlMap, Default, Debug)]
//! struct Order {
//! 	id: u32,
//! 	customer_name: String,
//! 	status: Status,
//! 	lines: Vec<Line>,
//! }
//!
//! #[derive(XmlMap, Default, Debug)]
//! struct Line {
//! 	sku: String,
//! 	quantity: u32,
//! }
//!
//! #[derive(XmlEnum, Default, Debug, PartialEq)]
//! enum Status {
//! 	#[default]
//! 	Open,
//! 	Shipped,
//! }
//!
//! let order: Order = XmlDeserializer::new()
//! 	.deserialize(
//! 		r#"<order id="7">
//! 			<customer_name>Ann</customer_name>
//! 			<status>SHIPPED</status>
//! 			<Line sku="A-1"><Quantity>2</Quantity></Line>
//! 			<Line sku="B-2"><Quantity>1</Quantity></Line>
//! 		</order>"#,
//! 	)
//! 	.unwrap();
//! assert_eq!(order.id, 7);
//! assert_eq!(order.customer_name, "Ann");
//! assert_eq!(order.status, Status::Shipped);
//! assert_eq!(order.lines.len(), 2);
//! assert_eq!(order.lines[1].sku, "B-2");
//! ```
//!
//! If the `derive` feature is enabled (default) the following traits can be derived:
//! - `XmlMap` (records; also implements `FromXml`)
//! - `XmlEnum` (fieldless enums; implements `FromXml`)

pub mod coerce;
pub mod culture;
pub mod descriptor;
mod deserializer;
pub mod errors;
mod impls;
pub mod mapper;
pub mod names;
pub mod node;
pub mod registry;
pub mod resolver;
mod traits;

pub use self::errors::Error;
/// Result alias with our error type included
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(any(test, feature = "_private-test"))]
mod test_struct;

pub use self::{
	deserializer::{
		Response,
		XmlDeserializer,
	},
	traits::{
		FromXml,
		XmlMap,
	},
};

#[cfg_attr(doc_cfg, doc(cfg(feature = "derive")))]
#[cfg(feature = "derive")]
pub use xml_map_derive::{
	XmlEnum,
	XmlMap,
};

/// Map XML text with the default configuration (see `XmlDeserializer`)
pub fn from_str<T: FromXml + Default>(text: &str) -> Result<T> {
	XmlDeserializer::new().from_str(text)
}
