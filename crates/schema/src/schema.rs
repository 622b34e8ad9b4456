use core::any::{Any, TypeId};
use core::fmt;

use crate::value::{Field, Value};

/// Structural classification of a schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
	/// Type with named fields; traversed by the resolver.
	Complex,
	/// Enumeration; carries a schema but is treated as a simple leaf.
	Enumeration,
}

/// Static metadata table for one schema type.
///
/// Tables must live in `static` items: the resolver compares ancestor tables
/// by address and caches field layouts per table.
#[derive(Debug)]
pub struct TypeSchema {
	/// Type name used in diagnostics.
	pub name: &'static str,
	pub kind: TypeKind,
	/// Declared root tag, if the type may be the root of a document.
	pub root: Option<&'static str>,
	/// Own declared fields, in declaration order. Ancestor fields are not
	/// repeated here.
	pub fields: &'static [FieldSchema],
	/// Ancestor type, whose fields are searched after the own fields.
	pub base: Option<fn() -> &'static TypeSchema>,
}

impl TypeSchema {
	/// Creates a complex type table with no root tag and no ancestor.
	pub const fn complex(name: &'static str, fields: &'static [FieldSchema]) -> Self {
		Self {
			name,
			kind: TypeKind::Complex,
			root: None,
			fields,
			base: None,
		}
	}

	/// Creates an enumeration table.
	pub const fn enumeration(name: &'static str) -> Self {
		Self {
			name,
			kind: TypeKind::Enumeration,
			root: None,
			fields: &[],
			base: None,
		}
	}

	/// Declares the root tag.
	pub const fn with_root(mut self, tag: &'static str) -> Self {
		self.root = Some(tag);
		self
	}

	/// Declares the ancestor type.
	pub const fn with_base(mut self, base: fn() -> &'static TypeSchema) -> Self {
		self.base = Some(base);
		self
	}

	/// Iterates this table followed by each ancestor table, nearest first.
	pub fn ancestry(&'static self) -> impl Iterator<Item = &'static TypeSchema> {
		core::iter::successors(Some(self), |schema| schema.base.map(|base| base()))
	}
}

/// Whether a field maps to an XML attribute or an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
	Attribute,
	Element,
}

/// Static metadata for one declared field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
	/// Rust field name, used as the tag when nothing else is declared.
	pub name: &'static str,
	pub kind: FieldKind,
	/// Declared tag override. An empty tag falls back to the field name.
	pub tag: Option<&'static str>,
	/// Runtime type to tag mapping of a polymorphic field, in declaration order.
	pub choices: &'static [ElementChoice],
}

impl FieldSchema {
	/// An element field with no declared tag.
	pub const fn element(name: &'static str) -> Self {
		Self {
			name,
			kind: FieldKind::Element,
			tag: None,
			choices: &[],
		}
	}

	/// An attribute field with no declared tag.
	pub const fn attribute(name: &'static str) -> Self {
		Self {
			name,
			kind: FieldKind::Attribute,
			tag: None,
			choices: &[],
		}
	}

	/// Declares the tag override.
	pub const fn tagged(mut self, tag: &'static str) -> Self {
		self.tag = Some(tag);
		self
	}

	/// Declares the polymorphic element choices.
	pub const fn with_choices(mut self, choices: &'static [ElementChoice]) -> Self {
		self.choices = choices;
		self
	}

	pub fn is_attribute(&self) -> bool {
		self.kind == FieldKind::Attribute
	}

	pub fn is_polymorphic(&self) -> bool {
		!self.choices.is_empty()
	}

	/// Returns the tag used for this field before any runtime correction.
	///
	/// The declared tag wins; otherwise a polymorphic field defaults to its
	/// first choice. Schemas that keep lower-case element names often declare
	/// nothing, in which case the bare field name is the tag.
	pub fn default_tag(&self) -> &'static str {
		let declared = match self.tag {
			Some(tag) => Some(tag),
			None => self.choices.first().map(|choice| choice.tag),
		};
		match declared {
			Some(tag) if !tag.is_empty() => tag,
			_ => self.name,
		}
	}

	/// Returns the choice configured for the runtime type `type_id`.
	pub fn choice_for(&self, type_id: TypeId) -> Option<&'static ElementChoice> {
		self.choices.iter().find(|choice| choice.runtime_type() == type_id)
	}
}

/// One runtime type to tag mapping of a polymorphic field.
#[derive(Clone, Copy)]
pub struct ElementChoice {
	pub tag: &'static str,
	type_id: fn() -> TypeId,
	type_name: fn() -> &'static str,
}

impl ElementChoice {
	/// Maps elements of runtime type `T` to `tag`.
	pub const fn of<T: Any>(tag: &'static str) -> Self {
		Self {
			tag,
			type_id: TypeId::of::<T>,
			type_name: core::any::type_name::<T>,
		}
	}

	pub fn runtime_type(&self) -> TypeId {
		(self.type_id)()
	}

	pub fn type_name(&self) -> &'static str {
		(self.type_name)()
	}
}

impl fmt::Debug for ElementChoice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ElementChoice")
			.field("tag", &self.tag)
			.field("type", &self.type_name())
			.finish()
	}
}

/// A schema-annotated value with named fields.
///
/// Field indices refer to [`TypeSchema::fields`] of the type that declares
/// them; inherited fields are read from the instance returned by
/// [`Node::base`].
pub trait Node: Field {
	/// Returns the static table of this type.
	fn type_schema() -> &'static TypeSchema
	where
		Self: Sized;

	/// Returns the static table of the runtime type.
	fn schema(&self) -> &'static TypeSchema;

	/// Reads the own declared field at `index`.
	///
	/// `None` means the field cannot be read, which the resolver reports as a
	/// broken schema rather than a missing value.
	fn field(&self, index: usize) -> Option<Value<'_>>;

	/// Returns the part of this value that holds the ancestor type's fields.
	fn base(&self) -> Option<&dyn Node> {
		None
	}
}
