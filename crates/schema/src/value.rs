use core::any::{Any, TypeId};
use core::fmt;
use core::ptr;
use std::borrow::Cow;
use std::sync::Arc;

use crate::schema::{Node, TypeKind};

/// A value that can be stored in a schema-bound tree.
///
/// Implemented for the common scalar types, strings, [`Option`], [`Box`],
/// [`Arc`], [`Vec`] and [`crate::Element`]. Schema types get their impl from
/// `#[derive(XmlSchema)]`.
pub trait Field: Any + Sync {
	/// Returns the structural view of this value.
	fn value(&self) -> Value<'_>;

	/// Returns the Rust type name, used in diagnostics.
	fn type_name(&self) -> &'static str {
		core::any::type_name::<Self>()
	}
}

/// An ordered, repeatable field.
pub trait Sequence: Field {
	/// Number of items.
	fn len(&self) -> usize;

	/// Returns the item at `index`, or [`Value::Null`] past the end.
	fn item(&self, index: usize) -> Value<'_>;

	/// Returns `true` if the sequence holds no items.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl dyn Sequence + '_ {
	/// Iterates the items in order.
	pub fn items(&self) -> impl Iterator<Item = Value<'_>> {
		(0..self.len()).map(|index| self.item(index))
	}
}

/// A runtime pairing of a tag name with a payload.
///
/// The tag of a wrapped element overrides every statically declared tag of the
/// field or type it stands in for.
pub trait Wrapped: Field {
	/// The runtime tag (local name).
	fn tag(&self) -> &str;

	/// The wrapped payload.
	fn payload(&self) -> Value<'_>;
}

/// Structural view of a field value.
#[derive(Clone, Copy)]
pub enum Value<'a> {
	/// Absent value (`None`).
	Null,
	/// Leaf value, only ever compared by identity.
	Simple(&'a dyn Field),
	/// Schema-annotated value. Enumerations also land here but are not
	/// traversed; see [`Value::as_node`].
	Node(&'a dyn Node),
	/// Wrapped element.
	Wrapped(&'a dyn Wrapped),
	/// Sequence of values.
	Sequence(&'a dyn Sequence),
}

impl<'a> Value<'a> {
	/// Returns the identity of the referenced value, or `None` for [`Value::Null`].
	pub fn identity(self) -> Option<Identity> {
		match self {
			Self::Null => None,
			Self::Simple(value) => Some(Identity::of(value)),
			Self::Node(node) => Some(Identity::of(node)),
			Self::Wrapped(wrapper) => Some(Identity::of(wrapper)),
			Self::Sequence(seq) => Some(Identity::of(seq)),
		}
	}

	/// Returns the runtime type of the referenced value.
	pub fn runtime_type(self) -> Option<TypeId> {
		self.identity().map(Identity::runtime_type)
	}

	/// Returns the Rust type name of the referenced value.
	pub fn type_name(self) -> &'static str {
		match self {
			Self::Null => "None",
			Self::Simple(value) => value.type_name(),
			Self::Node(node) => node.type_name(),
			Self::Wrapped(wrapper) => wrapper.type_name(),
			Self::Sequence(seq) => seq.type_name(),
		}
	}

	/// Returns the traversable node behind this value.
	///
	/// Enumerations carry a schema but are leaves, so they yield `None`.
	/// Wrapped elements are classified by their payload.
	pub fn as_node(self) -> Option<&'a dyn Node> {
		match self {
			Self::Node(node) if node.schema().kind == TypeKind::Complex => Some(node),
			Self::Wrapped(wrapper) => wrapper.payload().as_node(),
			_ => None,
		}
	}

	/// Returns `true` if [`Value::as_node`] yields a node.
	pub fn is_node(self) -> bool {
		self.as_node().is_some()
	}

	pub fn is_null(self) -> bool {
		matches!(self, Self::Null)
	}

	/// Returns `true` if the referenced value occupies no memory.
	///
	/// Such values share their address with their neighbours, so their
	/// [`Identity`] does not single them out.
	pub fn is_zero_sized(self) -> bool {
		let size = match self {
			Self::Null => return false,
			Self::Simple(value) => size_of_val(value),
			Self::Node(node) => size_of_val(node),
			Self::Wrapped(wrapper) => size_of_val(wrapper),
			Self::Sequence(seq) => size_of_val(seq),
		};
		size == 0
	}
}

impl fmt::Debug for Value<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => write!(f, "Null"),
			Self::Simple(value) => write!(f, "Simple({})", value.type_name()),
			Self::Node(node) => write!(f, "Node({})", node.schema().name),
			Self::Wrapped(wrapper) => write!(f, "Wrapped({})", wrapper.tag()),
			Self::Sequence(seq) => write!(f, "Sequence({}; len={})", seq.type_name(), seq.len()),
		}
	}
}

/// Reference identity of a value inside a tree.
///
/// Pairs the address with the runtime type: a struct and its first field share
/// an address but never a type. Zero-sized values have no stable address and
/// cannot be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
	addr: usize,
	type_id: TypeId,
}

impl Identity {
	/// Returns the identity of `value`.
	pub fn of(value: &dyn Field) -> Self {
		let any: &dyn Any = value;
		Self {
			addr: ptr::from_ref(any).cast::<()>().addr(),
			type_id: <dyn Any>::type_id(any),
		}
	}

	pub fn addr(self) -> usize {
		self.addr
	}

	pub fn runtime_type(self) -> TypeId {
		self.type_id
	}
}

macro_rules! simple_fields {
	($($ty:ty),* $(,)?) => {
		$(
			impl Field for $ty {
				fn value(&self) -> Value<'_> {
					Value::Simple(self)
				}
			}
		)*
	};
}

simple_fields!(
	bool,
	char,
	i8,
	i16,
	i32,
	i64,
	i128,
	isize,
	u8,
	u16,
	u32,
	u64,
	u128,
	usize,
	f32,
	f64,
	String,
	&'static str,
	Cow<'static, str>,
);

impl<T: Field> Field for Option<T> {
	fn value(&self) -> Value<'_> {
		match self {
			Some(inner) => inner.value(),
			None => Value::Null,
		}
	}
}

impl<T: Field> Field for Box<T> {
	fn value(&self) -> Value<'_> {
		(**self).value()
	}
}

impl<T: Field + Send> Field for Arc<T> {
	fn value(&self) -> Value<'_> {
		(**self).value()
	}
}

impl<T: Field> Field for Vec<T> {
	fn value(&self) -> Value<'_> {
		Value::Sequence(self)
	}
}

impl<T: Field> Sequence for Vec<T> {
	fn len(&self) -> usize {
		Vec::len(self)
	}

	fn item(&self, index: usize) -> Value<'_> {
		self.get(index).map_or(Value::Null, |item| item.value())
	}
}
