use super::{
	list,
	MappingContext,
};
use crate::{
	coerce::Kind,
	node::{
		Document,
		Element,
	},
	traits::FromXml,
	Result,
};
use tracing::debug;

/// Element mapping starts from
///
/// With `root_element` configured this is the first child of the document root with that
/// (namespaced) name; `None` if there is no such child.
pub fn mapping_root<'a>(document: &'a Document, root_element: Option<&str>, cx: &MappingContext<'_>) -> Option<&'a Element> {
	let root = document.root();
	match root_element {
		None => Some(root),
		Some(name) => {
			let name = cx.qualify(name);
			let found = root.child(&name);
			match found {
				Some(_) => debug!(root = %name, "mapping below configured root element"),
				None => debug!(root = %name, "configured root element not found"),
			}
			found
		},
	}
}

/// Map a whole document into `T`
///
/// A missing configured root element results in `T::default()`. Bare collections are filled
/// with the matching items anywhere below the mapping root; list-derivatives read their own
/// members from the root's child named like the type (or the root itself).
pub fn map_document<T: FromXml + Default>(
	document: &Document,
	root_element: Option<&str>,
	cx: &MappingContext<'_>,
) -> Result<T> {
	let Some(root) = mapping_root(document, root_element, cx) else {
		return Ok(T::default());
	};
	match T::KIND {
		Kind::Collection => {
			let items = match T::item_type_name() {
				Some(item_name) => list::find_items(root, &item_name, cx),
				None => Vec::new(),
			};
			debug!(count = items.len(), "document is a collection");
			T::from_items(&items, cx)
		},
		Kind::ListDerivative => {
			let own = root.child(&cx.qualify(&T::type_name())).unwrap_or(root);
			T::from_derivative(root, own, cx)
		},
		_ => T::from_element(root, cx),
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		culture::Culture,
		registry::ConverterRegistry,
		test_struct::{
			Product,
			ProductPage,
		},
	};

	fn map<T: FromXml + Default>(text: &str, root_element: Option<&str>) -> T {
		let mut document: Document = text.parse().unwrap();
		document.strip_namespaces();
		let culture = Culture::invariant();
		let registry = ConverterRegistry::new();
		map_document(&document, root_element, &MappingContext::new(&culture, &registry)).unwrap()
	}

	#[test]
	fn test() {
		let product: Product = map("<Response><Product><Name>a</Name></Product></Response>", Some("Product"));
		assert_eq!(product.name, "a");
	}

	#[test]
	fn missing_root_element() {
		let product: Product = map("<Response><Name>a</Name></Response>", Some("Product"));
		assert_eq!(product, Product::default());
	}

	#[test]
	fn bare_collection() {
		let products: Vec<Product> = map(
			"<Response><Page><Product><Id>1</Id></Product></Page><Product><Id>2</Id></Product></Response>",
			None,
		);
		assert_eq!(products.iter().map(|p| p.id).collect::<Vec<_>>(), [1, 2]);

		let ids: Vec<i32> = map("<ids><i32>4</i32><i32>5</i32></ids>", None);
		assert_eq!(ids, [4, 5]);
	}

	#[test]
	fn list_derivative() {
		let page: ProductPage = map(
			"<Response><ProductPage page=\"3\"/><Product><Name>x</Name></Product></Response>",
			None,
		);
		assert_eq!(page.page_number, 3);
		assert_eq!(page.products.len(), 1);
		assert_eq!(page.products[0].name, "x");
	}

	#[test]
	fn scalar_document() {
		let value: i32 = map("<Count>17</Count>", None);
		assert_eq!(value, 17);
	}
}
