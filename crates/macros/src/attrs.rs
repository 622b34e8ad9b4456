use syn::meta::ParseNestedMeta;
use syn::{Attribute, Error, LitStr, Path, Result, Token};

/// Parsed `#[xml(...)]` attributes on the derived type.
#[derive(Default)]
pub struct ContainerAttrs {
	pub root: Option<LitStr>,
}

impl ContainerAttrs {
	pub fn parse(attrs: &[Attribute]) -> Result<Self> {
		let mut out = Self::default();
		for attr in attrs.iter().filter(|a| a.path().is_ident("xml")) {
			attr.parse_nested_meta(|meta| {
				if meta.path.is_ident("root") {
					if out.root.is_some() {
						return Err(meta.error("duplicate `root`"));
					}
					out.root = Some(meta.value()?.parse()?);
					Ok(())
				} else {
					Err(meta.error("unknown xml container attribute; expected `root`"))
				}
			})?;
		}
		Ok(out)
	}
}

/// How a struct field takes part in the schema.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Role {
	Attribute,
	Element,
	/// Holds the ancestor type's part.
	Base,
	Skip,
}

/// Parsed `#[xml(...)]` attributes on one struct field.
pub struct FieldAttrs {
	pub role: Role,
	pub tag: Option<LitStr>,
	/// `(runtime type, tag)` pairs of a polymorphic field.
	pub choices: Vec<(Path, LitStr)>,
}

impl FieldAttrs {
	pub fn parse(attrs: &[Attribute]) -> Result<Self> {
		let mut attribute = false;
		let mut element = false;
		let mut base = false;
		let mut skip = false;
		let mut tag: Option<LitStr> = None;
		let mut choices = Vec::new();
		let mut first: Option<&Attribute> = None;

		for attr in attrs.iter().filter(|a| a.path().is_ident("xml")) {
			first.get_or_insert(attr);
			attr.parse_nested_meta(|meta| {
				if meta.path.is_ident("attribute") {
					attribute = true;
					set_tag(&meta, &mut tag)
				} else if meta.path.is_ident("element") {
					element = true;
					set_tag(&meta, &mut tag)
				} else if meta.path.is_ident("elements") {
					let before = choices.len();
					meta.parse_nested_meta(|choice| {
						let choice_tag: LitStr = choice.value()?.parse()?;
						choices.push((choice.path.clone(), choice_tag));
						Ok(())
					})?;
					if choices.len() == before {
						return Err(meta.error("`elements` needs at least one `Type = \"Tag\"` entry"));
					}
					Ok(())
				} else if meta.path.is_ident("base") {
					base = true;
					Ok(())
				} else if meta.path.is_ident("skip") {
					skip = true;
					Ok(())
				} else {
					Err(meta.error(
						"unknown xml field attribute; expected `attribute`, `element`, `elements`, `base` or `skip`",
					))
				}
			})?;
		}

		let Some(first) = first else {
			return Ok(Self {
				role: Role::Element,
				tag: None,
				choices,
			});
		};

		let declared = tag.is_some() || !choices.is_empty() || attribute || element;
		let role = if skip {
			if declared || base {
				return Err(Error::new_spanned(first, "`skip` cannot be combined with other xml attributes"));
			}
			Role::Skip
		} else if base {
			if declared {
				return Err(Error::new_spanned(first, "`base` cannot be combined with other xml attributes"));
			}
			Role::Base
		} else if attribute {
			if element || !choices.is_empty() {
				return Err(Error::new_spanned(first, "a field is either an attribute or an element"));
			}
			Role::Attribute
		} else {
			Role::Element
		};

		Ok(Self { role, tag, choices })
	}
}

/// Reads the optional `= "Tag"` of `attribute`/`element`.
fn set_tag(meta: &ParseNestedMeta<'_>, tag: &mut Option<LitStr>) -> Result<()> {
	if !meta.input.peek(Token![=]) {
		return Ok(());
	}
	if tag.is_some() {
		return Err(meta.error("tag declared twice"));
	}
	*tag = Some(meta.value()?.parse()?);
	Ok(())
}
