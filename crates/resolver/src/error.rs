use tagpath_schema::ElementChoice;

/// Fatal path resolution errors.
///
/// These point at a caller or schema definition mistake. A target that simply
/// is not under the root is not an error; see [`crate::XmlPath::resolve`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum PathError {
	/// The narrowing target is a simple value.
	#[error("cannot locate non-node value of type {found} within tree rooted at {root}")]
	NotANode { found: &'static str, root: &'static str },

	/// The target occupies no memory and cannot be located by identity.
	#[error("cannot locate zero-sized value of type {found}; give the type at least one field")]
	ZeroSizedTarget { found: &'static str },

	/// The root is neither a wrapped element nor a type with a root tag.
	#[error("root value of type {found} must declare a root tag")]
	NotRoot { found: &'static str },

	/// A declared field cannot be read from the instance.
	#[error("cannot read field `{field}` (index {index}) of {owner}")]
	FieldAccess {
		field: &'static str,
		index: usize,
		owner: &'static str,
	},

	/// The ancestor part of an instance does not match its declared base type.
	#[error("base part of {owner} is {found}, expected {expected}")]
	BaseMismatch {
		owner: &'static str,
		expected: &'static str,
		found: &'static str,
	},

	/// A sequence holds a `None` element.
	#[error("unexpected null element at position {position} of field `{field}` in {owner}")]
	NullElement {
		field: &'static str,
		position: usize,
		owner: &'static str,
	},

	/// A polymorphic sequence holds an element of an unconfigured type.
	#[error("unable to determine tag for {found} in field `{field}` of {owner}:{}", list_choices(.choices))]
	UnmappedElementType {
		found: &'static str,
		field: &'static str,
		owner: &'static str,
		choices: &'static [ElementChoice],
	},
}

fn list_choices(choices: &[ElementChoice]) -> String {
	choices
		.iter()
		.map(|choice| format!("\n  {}: {}", choice.tag, choice.type_name()))
		.collect()
}
