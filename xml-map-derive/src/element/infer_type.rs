use syn::{
	GenericArgument,
	PathArguments,
	PathSegment,
	Type,
};

/// Infer the element type of a type that appears to be `Vec<T>`.
pub fn vec_item(ty: &Type) -> Option<&Type> {
	let last = selfless_last(ty)?;
	if last.ident != "Vec" {
		return None;
	}

	if let PathArguments::AngleBracketed(args) = &last.arguments {
		if args.args.len() != 1 {
			return None;
		}
		if let Some(GenericArgument::Type(item)) = args.args.first() {
			return Some(item);
		}
	}

	None
}

fn selfless_last(ty: &Type) -> Option<&PathSegment> {
	if let Type::Path(ty) = ty {
		if ty.qself.is_none() {
			return ty.path.segments.last();
		}
	}

	None
}

#[cfg(test)]
mod test {
	use super::*;
	use quote::ToTokens;
	use syn::parse_quote;

	fn item_of(ty: Type) -> Option<String> {
		vec_item(&ty).map(|item| item.to_token_stream().to_string())
	}

	#[test]
	fn test() {
		assert_eq!(item_of(parse_quote!(Vec<Item>)).as_deref(), Some("Item"));
		assert_eq!(item_of(parse_quote!(std::vec::Vec<u32>)).as_deref(), Some("u32"));

		assert!(vec_item(&parse_quote!(Option<Vec<Item>>)).is_none());
		assert!(vec_item(&parse_quote!(Vec)).is_none());
		assert!(vec_item(&parse_quote!(<T as Trait>::Vec<Item>)).is_none());
	}
}
