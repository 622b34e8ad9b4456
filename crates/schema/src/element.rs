use crate::value::{Field, Value, Wrapped};

/// An element whose tag is decided at runtime.
///
/// Used where the schema allows several element names for one field (or one
/// document root) and the chosen name only exists on the instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element<T> {
	namespace: Option<String>,
	local: String,
	inner: T,
}

impl<T> Element<T> {
	/// Creates an element without a namespace.
	pub fn new(local: impl Into<String>, inner: T) -> Self {
		Self {
			namespace: None,
			local: local.into(),
			inner,
		}
	}

	/// Creates a namespace-qualified element.
	pub fn qualified(namespace: impl Into<String>, local: impl Into<String>, inner: T) -> Self {
		Self {
			namespace: Some(namespace.into()),
			local: local.into(),
			inner,
		}
	}

	pub fn local_name(&self) -> &str {
		&self.local
	}

	pub fn namespace(&self) -> Option<&str> {
		self.namespace.as_deref()
	}

	pub fn inner(&self) -> &T {
		&self.inner
	}

	pub fn inner_mut(&mut self) -> &mut T {
		&mut self.inner
	}

	pub fn into_inner(self) -> T {
		self.inner
	}
}

impl<T: Field> Field for Element<T> {
	fn value(&self) -> Value<'_> {
		Value::Wrapped(self)
	}
}

impl<T: Field> Wrapped for Element<T> {
	/// Tags never carry the namespace; paths use local names only.
	fn tag(&self) -> &str {
		&self.local
	}

	fn payload(&self) -> Value<'_> {
		self.inner.value()
	}
}
