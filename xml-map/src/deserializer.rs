use crate::{
	culture::Culture,
	mapper::{
		root,
		MappingContext,
	},
	node::Document,
	registry::ConverterRegistry,
	traits::FromXml,
	Result,
};
use tracing::{
	debug,
	trace,
};

/// Something carrying the raw text of a response
pub trait Response {
	/// Raw text content
	fn content(&self) -> &str;
}

impl Response for str {
	fn content(&self) -> &str {
		self
	}
}

impl Response for String {
	fn content(&self) -> &str {
		self
	}
}

/// Maps XML documents into `FromXml` types
///
/// Configure with the builder methods before use; the configuration is read-only while
/// mapping, so a deserializer can be shared between threads.
///
/// ```
/// use xml_map::{culture::Culture, XmlDeserializer};
///
/// let deserializer = XmlDeserializer::new()
/// 	.with_root_element("Total")
/// 	.with_culture(Culture::de_de());
/// let total: f64 = deserializer.deserialize("<Response><Total>1.234,5</Total></Response>").unwrap();
/// assert_eq!(total, 1234.5);
/// ```
#[derive(Debug, Default)]
pub struct XmlDeserializer {
	root_element: Option<String>,
	namespace: Option<String>,
	date_format: Option<String>,
	culture: Culture,
	registry: ConverterRegistry,
}

impl XmlDeserializer {
	/// Deserializer with invariant culture and no converters
	pub fn new() -> Self {
		Self::default()
	}

	/// Start mapping at the child of the document root with this name
	pub fn with_root_element(mut self, name: impl Into<String>) -> Self {
		self.root_element = Some(name.into());
		self
	}

	/// Keep namespaces and qualify lookup names with this namespace
	///
	/// Without a namespace all namespaces are removed from documents before mapping.
	pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
		self.namespace = Some(namespace.into());
		self
	}

	/// .NET style pattern (`yyyy-MM-dd HH:mm`) for date/time values without offset
	pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
		self.date_format = Some(format.into());
		self
	}

	/// Culture for numbers, dates and case-insensitive matching
	pub fn with_culture(mut self, culture: Culture) -> Self {
		self.culture = culture;
		self
	}

	/// Converters for types that are built from text
	pub fn with_registry(mut self, registry: ConverterRegistry) -> Self {
		self.registry = registry;
		self
	}

	/// Configured root element
	pub fn root_element(&self) -> Option<&str> {
		self.root_element.as_deref()
	}

	/// Configured namespace
	pub fn namespace(&self) -> Option<&str> {
		self.namespace.as_deref()
	}

	/// Configured date/time pattern
	pub fn date_format(&self) -> Option<&str> {
		self.date_format.as_deref()
	}

	/// Configured culture
	pub fn culture(&self) -> &Culture {
		&self.culture
	}

	/// Converter registry
	pub fn registry(&self) -> &ConverterRegistry {
		&self.registry
	}

	/// Mutable converter registry
	pub fn registry_mut(&mut self) -> &mut ConverterRegistry {
		&mut self.registry
	}

	/// Context for a mapping pass with this configuration
	pub fn context(&self) -> MappingContext<'_> {
		MappingContext::new(&self.culture, &self.registry)
			.with_namespace(self.namespace.as_deref())
			.with_date_format(self.date_format.as_deref())
	}

	/// Map the content of `response`
	pub fn deserialize<T, R>(&self, response: &R) -> Result<T>
	where
		T: FromXml + Default,
		R: Response + ?Sized,
	{
		self.from_str(response.content())
	}

	/// Map XML text; empty text results in `T::default()`
	pub fn from_str<T: FromXml + Default>(&self, text: &str) -> Result<T> {
		if text.is_empty() {
			debug!("empty content");
			return Ok(T::default());
		}
		let mut document = Document::parse(text)?;
		if self.namespace.is_none() {
			trace!("removing namespaces");
			document.strip_namespaces();
		}
		self.from_document(&document)
	}

	/// Map a parsed document (namespaces are not removed here)
	pub fn from_document<T: FromXml + Default>(&self, document: &Document) -> Result<T> {
		root::map_document(document, self.root_element(), &self.context())
	}
}
