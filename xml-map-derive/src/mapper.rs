use crate::element::{
	FieldSource,
	MapInput,
};
use proc_macro2::TokenStream;
use quote::{
	format_ident,
	quote,
	quote_spanned,
};

pub fn derive_xml_map(input: &MapInput) -> darling::Result<TokenStream> {
	let MapInput {
		ident,
		generics,
		xml_map_crate,
		..
	} = input;

	if !generics.params.is_empty() {
		return Err(darling::Error::custom("generic types are not supported").with_span(generics));
	}

	let items: Vec<_> = input.items().collect();
	if let Some(second) = items.get(1) {
		return Err(darling::Error::custom("only one field can be marked `items`").with_span(&second.ident));
	}
	let items = items.first();
	let type_name = input.type_name();

	let mut accessors = TokenStream::new();
	let mut members = TokenStream::new();
	for (index, member) in input.members().enumerate() {
		let span = member.span();
		let field = &member.ident;
		let ty = &member.ty;
		let accessor = format_ident!("__xml_map_member_{}", index);
		accessors.extend(quote_spanned! {span=>
			fn #accessor(target: &mut #ident) -> &mut #ty {
				&mut target.#field
			}
		});

		let name = member.name();
		let mut descriptor = quote_spanned! {span=>
			MemberDescriptor::new::<#ty>(#name, #accessor)
		};
		if let Some(rename) = &member.rename {
			descriptor.extend(quote!(.rename(#rename)));
		}
		match member.source {
			FieldSource::Auto => (),
			FieldSource::Attribute => descriptor.extend(quote!(.attribute())),
			FieldSource::Content => descriptor.extend(quote!(.content())),
		}
		members.extend(quote! { .member(#descriptor) });
	}

	let (kind, items_descriptor, from_element, from_derivative) = match items {
		None => (
			quote!(Nested),
			TokenStream::new(),
			quote! {
				mapper::map_new(element, cx)
			},
			TokenStream::new(),
		),
		Some(items) => {
			let span = items.span();
			let field = &items.ident;
			let ty = &items.ty;
			let item_ty = &items.item_ty;
			accessors.extend(quote_spanned! {span=>
				fn __xml_map_items(target: &mut #ident) -> &mut #ty {
					&mut target.#field
				}
			});
			(
				quote!(ListDerivative),
				quote_spanned! {span=>
					.items(ItemsDescriptor::new::<#item_ty>(__xml_map_items))
				},
				quote! {
					mapper::list::populate_derivative(element, element, cx)
				},
				quote! {
					fn from_derivative(
						scope: &Element,
						own: &Element,
						cx: &MappingContext<'_>,
					) -> #xml_map_crate::Result<Self> {
						mapper::list::populate_derivative(scope, own, cx)
					}
				},
			)
		},
	};

	Ok(quote! {
		const _: () = {
			#[allow(unused_imports)]
			use #xml_map_crate::{
				coerce::Kind,
				descriptor::{
					ItemsDescriptor,
					MemberDescriptor,
					TypeDescriptor,
				},
				mapper::{
					self,
					MappingContext,
				},
				node::Element,
				FromXml,
				XmlMap,
			};

			impl XmlMap for #ident {
				fn type_descriptor() -> TypeDescriptor<Self> {
					#accessors

					TypeDescriptor::new(#type_name)
						#members
						#items_descriptor
				}
			}

			impl FromXml for #ident {
				const KIND: Kind = Kind::#kind;

				fn type_name() -> ::std::borrow::Cow<'static, str> {
					::std::borrow::Cow::Borrowed(#type_name)
				}

				fn from_element(element: &Element, cx: &MappingContext<'_>) -> #xml_map_crate::Result<Self> {
					#from_element
				}

				#from_derivative
			}
		};
	})
}
