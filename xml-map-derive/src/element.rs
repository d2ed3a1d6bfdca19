use darling::{
	ast,
	util::Flag,
	FromDeriveInput,
	FromField,
	FromVariant,
};
use proc_macro2::Span;
use syn::{
	ext::IdentExt,
	parse_quote,
	spanned::Spanned,
	Generics,
	Ident,
	Path,
	Type,
};

pub mod infer_type;

fn default_crate_path() -> Path {
	parse_quote!(xml_map)
}

/// Where a field reads its value from
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
	Auto,
	Attribute,
	Content,
}

/// A mapped member of the deriving struct.
pub struct Member {
	pub ident: Ident,
	pub ty: Type,
	pub rename: Option<String>,
	pub source: FieldSource,
	span: Span,
}

impl Member {
	/// Member name: the field identifier in PascalCase (`first_name` → `FirstName`).
	pub fn name(&self) -> String {
		pascal_case(&self.ident.unraw().to_string())
	}

	pub fn span(&self) -> Span {
		self.span
	}
}

/// The `Vec<T>` field holding the items of a list-derivative.
pub struct Items {
	pub ident: Ident,
	pub ty: Type,
	pub item_ty: Type,
	span: Span,
}

impl Items {
	pub fn span(&self) -> Span {
		self.span
	}
}

/// A field on the deriving struct; skipped fields are not mapped at all.
pub enum Field {
	Member(Member),
	Items(Items),
	Skip,
}

impl FromField for Field {
	fn from_field(field: &syn::Field) -> darling::Result<Self> {
		#[derive(FromField)]
		#[darling(attributes(xml_map))]
		struct RawField {
			ident: Option<Ident>,
			ty: Type,
			#[darling(default)]
			rename: Option<String>,
			#[darling(default)]
			attribute: Flag,
			#[darling(default)]
			content: Flag,
			#[darling(default)]
			skip: Flag,
			#[darling(default)]
			items: Flag,
		}

		let RawField {
			ident,
			ty,
			rename,
			attribute,
			content,
			skip,
			items,
		} = RawField::from_field(field)?;

		let ident = ident.ok_or_else(|| darling::Error::custom("Only named fields supported").with_span(field))?;

		if skip.is_present() {
			return Ok(Field::Skip);
		}

		if items.is_present() {
			if rename.is_some() || attribute.is_present() || content.is_present() {
				return Err(darling::Error::custom(
					"`items` can't be combined with `rename`, `attribute` or `content`",
				)
				.with_span(field));
			}
			let item_ty = infer_type::vec_item(&ty)
				.cloned()
				.ok_or_else(|| darling::Error::custom("`items` requires a `Vec<T>` field").with_span(&ty))?;
			return Ok(Field::Items(Items {
				ident,
				ty,
				item_ty,
				span: field.span(),
			}));
		}

		let source = match (attribute.is_present(), content.is_present()) {
			(false, false) => FieldSource::Auto,
			(true, false) => FieldSource::Attribute,
			(false, true) => FieldSource::Content,
			(true, true) => {
				return Err(darling::Error::custom("`attribute` and `content` are exclusive").with_span(field));
			},
		};

		Ok(Field::Member(Member {
			ident,
			ty,
			rename,
			source,
			span: field.span(),
		}))
	}
}

#[derive(FromDeriveInput)]
#[darling(attributes(xml_map), supports(struct_named))]
pub struct MapInput {
	pub ident: Ident,
	pub generics: Generics,
	pub data: ast::Data<(), Field>,
	/// If set, the name used to find elements of this type instead of the struct ident.
	#[darling(default)]
	rename: Option<String>,
	#[darling(rename = "crate", default = "default_crate_path")]
	pub xml_map_crate: Path,
}

impl MapInput {
	/// Type name used when searching for elements of this type.
	pub fn type_name(&self) -> String {
		self.rename.clone().unwrap_or_else(|| self.ident.to_string())
	}

	/// The fields of the input struct.
	pub fn fields(&self) -> impl Iterator<Item = &Field> {
		self.data.as_ref().take_struct().into_iter().flat_map(|fields| fields.fields)
	}

	/// Fields mapped as members.
	pub fn members(&self) -> impl Iterator<Item = &Member> {
		self.fields().filter_map(|field| {
			if let Field::Member(member) = field {
				Some(member)
			} else {
				None
			}
		})
	}

	/// Fields holding list-derivative items (valid input has at most one).
	pub fn items(&self) -> impl Iterator<Item = &Items> {
		self.fields().filter_map(|field| {
			if let Field::Items(items) = field {
				Some(items)
			} else {
				None
			}
		})
	}
}

#[derive(FromVariant)]
#[darling(attributes(xml_map))]
pub struct EnumVariant {
	pub ident: Ident,
	#[darling(default)]
	rename: Option<String>,
}

impl EnumVariant {
	/// Name the variant is matched by.
	pub fn name(&self) -> String {
		self.rename.clone().unwrap_or_else(|| self.ident.to_string())
	}
}

#[derive(FromDeriveInput)]
#[darling(attributes(xml_map), supports(enum_unit))]
pub struct EnumInput {
	pub ident: Ident,
	pub generics: Generics,
	pub data: ast::Data<EnumVariant, ()>,
	#[darling(default)]
	rename: Option<String>,
	#[darling(rename = "crate", default = "default_crate_path")]
	pub xml_map_crate: Path,
}

impl EnumInput {
	pub fn type_name(&self) -> String {
		self.rename.clone().unwrap_or_else(|| self.ident.to_string())
	}

	pub fn variants(&self) -> impl Iterator<Item = &EnumVariant> {
		self.data.as_ref().take_enum().into_iter().flatten()
	}
}

/// `first_name` → `FirstName`
fn pascal_case(name: &str) -> String {
	name.split('_')
		.filter(|word| !word.is_empty())
		.map(|word| {
			let mut chars = word.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
				None => String::new(),
			}
		})
		.collect()
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn member_names() {
		assert_eq!(pascal_case("first_name"), "FirstName");
		assert_eq!(pascal_case("id"), "Id");
		assert_eq!(pascal_case("_private"), "Private");
		assert_eq!(pascal_case("already_CamelCase"), "AlreadyCamelCase");
		assert_eq!(pascal_case("page2_size"), "Page2Size");
	}
}
