//! `#[derive(XmlSchema)]` expansion.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DataEnum, DataStruct, DeriveInput, Error, Fields, Result, parse_macro_input};

use crate::attrs::{ContainerAttrs, FieldAttrs, Role};

/// Entry point for the `#[derive(XmlSchema)]` macro.
pub fn derive_xml_schema(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);
	expand(&input).unwrap_or_else(Error::into_compile_error).into()
}

fn krate() -> TokenStream2 {
	quote!(::tagpath::schema)
}

fn expand(input: &DeriveInput) -> Result<TokenStream2> {
	if !input.generics.params.is_empty() {
		return Err(Error::new_spanned(
			&input.generics,
			"XmlSchema cannot be derived for generic types",
		));
	}

	let container = ContainerAttrs::parse(&input.attrs)?;
	match &input.data {
		Data::Struct(data) => expand_struct(input, &container, data),
		Data::Enum(data) => {
			if let Some(root) = &container.root {
				return Err(Error::new_spanned(root, "only structs can declare a root tag"));
			}
			expand_enum(input, data)
		}
		Data::Union(_) => Err(Error::new_spanned(
			&input.ident,
			"XmlSchema can only be derived for structs and enums",
		)),
	}
}

fn expand_struct(input: &DeriveInput, container: &ContainerAttrs, data: &DataStruct) -> Result<TokenStream2> {
	let krate = krate();
	let ident = &input.ident;

	let Fields::Named(named) = &data.fields else {
		return Err(Error::new_spanned(ident, "XmlSchema requires a struct with named fields"));
	};

	let mut schemas = Vec::new();
	let mut reads = Vec::new();
	let mut choice_statics = Vec::new();
	let mut base = None;

	for field in &named.named {
		let Some(name) = &field.ident else {
			continue;
		};
		let attrs = FieldAttrs::parse(&field.attrs)?;

		let ctor = match attrs.role {
			Role::Skip => continue,
			Role::Base => {
				if base.is_some() {
					return Err(Error::new_spanned(name, "at most one field can hold the base type"));
				}
				base = Some((name, &field.ty));
				continue;
			}
			Role::Attribute => quote!(#krate::FieldSchema::attribute),
			Role::Element => quote!(#krate::FieldSchema::element),
		};

		let index = schemas.len();
		let name_str = name.unraw().to_string();
		let tagged = attrs.tag.as_ref().map(|tag| quote!(.tagged(#tag)));
		let with_choices = (!attrs.choices.is_empty()).then(|| {
			let choices_ident = format_ident!("__XML_CHOICES_{}", index);
			let len = attrs.choices.len();
			let entries = attrs
				.choices
				.iter()
				.map(|(ty, tag)| quote!(#krate::ElementChoice::of::<#ty>(#tag)));
			choice_statics.push(quote! {
				static #choices_ident: [#krate::ElementChoice; #len] = [#(#entries),*];
			});
			quote!(.with_choices(&#choices_ident))
		});

		schemas.push(quote!(#ctor(#name_str) #tagged #with_choices));
		reads.push(quote! {
			#index => ::core::option::Option::Some(#krate::Field::value(&self.#name)),
		});
	}

	let count = schemas.len();
	let with_root = container.root.as_ref().map(|root| quote!(.with_root(#root)));
	let with_base = base.map(|(_, ty)| quote!(.with_base(<#ty as #krate::Node>::type_schema)));
	let base_fn = base.map(|(name, _)| {
		quote! {
			fn base(&self) -> ::core::option::Option<&dyn #krate::Node> {
				::core::option::Option::Some(&self.#name)
			}
		}
	});

	Ok(quote! {
		impl #krate::Field for #ident {
			fn value(&self) -> #krate::Value<'_> {
				#krate::Value::Node(self)
			}
		}

		impl #krate::Node for #ident {
			fn type_schema() -> &'static #krate::TypeSchema {
				#(#choice_statics)*
				static __XML_FIELDS: [#krate::FieldSchema; #count] = [#(#schemas),*];
				static __XML_SCHEMA: #krate::TypeSchema =
					#krate::TypeSchema::complex(::core::stringify!(#ident), &__XML_FIELDS)
						#with_root
						#with_base;
				&__XML_SCHEMA
			}

			fn schema(&self) -> &'static #krate::TypeSchema {
				<Self as #krate::Node>::type_schema()
			}

			fn field(&self, index: usize) -> ::core::option::Option<#krate::Value<'_>> {
				match index {
					#(#reads)*
					_ => ::core::option::Option::None,
				}
			}

			#base_fn
		}
	})
}

fn expand_enum(input: &DeriveInput, data: &DataEnum) -> Result<TokenStream2> {
	let krate = krate();
	let ident = &input.ident;

	if let Some(attr) = data
		.variants
		.iter()
		.flat_map(|variant| &variant.attrs)
		.find(|attr| attr.path().is_ident("xml"))
	{
		return Err(Error::new_spanned(attr, "xml attributes are not supported on variants"));
	}

	if data.variants.iter().all(|variant| matches!(variant.fields, Fields::Unit)) {
		return Ok(quote! {
			impl #krate::Field for #ident {
				fn value(&self) -> #krate::Value<'_> {
					#krate::Value::Node(self)
				}
			}

			impl #krate::Node for #ident {
				fn type_schema() -> &'static #krate::TypeSchema {
					static __XML_SCHEMA: #krate::TypeSchema =
						#krate::TypeSchema::enumeration(::core::stringify!(#ident));
					&__XML_SCHEMA
				}

				fn schema(&self) -> &'static #krate::TypeSchema {
					<Self as #krate::Node>::type_schema()
				}

				fn field(&self, _index: usize) -> ::core::option::Option<#krate::Value<'_>> {
					::core::option::Option::None
				}
			}
		});
	}

	let mut arms = Vec::new();
	for variant in &data.variants {
		let is_choice = matches!(&variant.fields, Fields::Unnamed(fields) if fields.unnamed.len() == 1);
		if !is_choice {
			return Err(Error::new_spanned(
				variant,
				"XmlSchema enums hold either unit variants only or one value per variant",
			));
		}
		let name = &variant.ident;
		arms.push(quote!(Self::#name(inner) => #krate::Field::value(inner),));
	}

	Ok(quote! {
		impl #krate::Field for #ident {
			fn value(&self) -> #krate::Value<'_> {
				match self {
					#(#arms)*
				}
			}
		}
	})
}
