use crate::element::EnumInput;
use proc_macro2::{
	Literal,
	TokenStream,
};
use quote::quote;

pub fn derive_xml_enum(input: &EnumInput) -> darling::Result<TokenStream> {
	let EnumInput {
		ident,
		generics,
		xml_map_crate,
		..
	} = input;

	if !generics.params.is_empty() {
		return Err(darling::Error::custom("generic types are not supported").with_span(generics));
	}

	let type_name = input.type_name();
	let variants: Vec<_> = input.variants().map(|variant| &variant.ident).collect();
	let names: Vec<_> = input.variants().map(|variant| variant.name()).collect();
	let indices = (0..variants.len()).map(Literal::usize_unsuffixed);

	Ok(quote! {
		const _: () = {
			use #xml_map_crate::{
				coerce::{
					self,
					Kind,
				},
				errors,
				mapper::MappingContext,
				FromXml,
			};

			impl FromXml for #ident {
				const KIND: Kind = Kind::Enum;

				fn type_name() -> ::std::borrow::Cow<'static, str> {
					::std::borrow::Cow::Borrowed(#type_name)
				}

				fn from_text(text: &str, cx: &MappingContext<'_>) -> #xml_map_crate::Result<Self> {
					const MEMBERS: &[&str] = &[#(#names),*];
					let discriminants: &[i64] = &[#(Self::#variants as i64),*];
					match coerce::enumeration(text, MEMBERS, discriminants, #type_name, cx.culture())? {
						#(#indices => Ok(Self::#variants),)*
						_ => Err(errors::unsupported_type(#type_name)),
					}
				}
			}
		};
	})
}
