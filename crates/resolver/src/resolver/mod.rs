//! Path resolution from a document root.
//!
//! The [`XmlPath`] resolver is bound to a root, then narrowed to the value of
//! interest:
//!
//! 1. No narrowing: the root's own tag
//! 2. [`XmlPath::for_node`]: the path to a node or sequence
//! 3. [`XmlPath::for_field`]: the path to a node, then one step further to one
//!    of its field values
//!
//! The search is depth-first over the declared fields, own type before
//! ancestor types, and stops at the first identity match.

use core::fmt;

use tagpath_schema::{Field, Value};

use crate::error::PathError;
use crate::path::{Segment, TagPath};

mod search;


use search::{Reach, Search};

/// Default bound on the number of nested nodes a search descends through.
///
/// The search recurses once per nested node; the bound keeps very deep trees
/// from exhausting the stack. Targets nested deeper resolve to absent. Raise
/// it with [`XmlPath::with_max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Resolves the tag path from a root to a node or field value.
///
/// The search depth is capped at [`DEFAULT_MAX_DEPTH`] nested nodes unless
/// configured otherwise. This is a stack-safety limit: a target nested below
/// the cap is reported as absent even though the tree itself is valid.
///
/// Resolvers are cheap immutable values: narrowing returns a new resolver and
/// leaves the receiver untouched, so one root-bound resolver can be shared and
/// narrowed independently.
///
/// # Example
///
/// ```ignore
/// let root = XmlPath::new(&pnr);
/// assert_eq!(root.resolve()?.as_deref(), Some("PNR"));
///
/// let doc = &pnr.passengers[1].document;
/// assert_eq!(
///     root.for_field(doc, &doc.number).resolve()?.as_deref(),
///     Some("PNR/Passenger[2]/Document/Number"),
/// );
/// ```
#[derive(Clone, Copy)]
pub struct XmlPath<'a> {
	root: &'a dyn Field,
	target: Option<Target<'a>>,
	max_depth: usize,
}

#[derive(Clone, Copy)]
struct Target<'a> {
	node: &'a dyn Field,
	field: Option<&'a dyn Field>,
}

impl<'a> XmlPath<'a> {
	/// Binds a resolver to `root`. No search happens until [`Self::resolve`].
	pub fn new(root: &'a dyn Field) -> Self {
		Self {
			root,
			target: None,
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}

	/// Bounds how many nested nodes a search descends through.
	///
	/// Subtrees below the bound are treated as not containing the target.
	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	/// Returns a resolver for the path to `node`.
	///
	/// `node` must be a schema node or a sequence, possibly wrapped in an
	/// element. Simple values can occur in many places with equal content and
	/// are rejected by [`Self::resolve`], as are zero-sized values, which share
	/// their address with their neighbours.
	pub fn for_node(&self, node: &'a dyn Field) -> Self {
		Self {
			target: Some(Target { node, field: None }),
			..*self
		}
	}

	/// Returns a resolver for the path to `field`, a value held directly by
	/// `node`.
	///
	/// If `node` is reachable but `field` is not one of its field values, the
	/// path to `node` is returned on its own.
	pub fn for_field(&self, node: &'a dyn Field, field: &'a dyn Field) -> Self {
		Self {
			target: Some(Target {
				node,
				field: Some(field),
			}),
			..*self
		}
	}

	/// Resolves the path as a string.
	///
	/// Returns `Ok(None)` when the target is not under the root. That is a
	/// caller mistake too, but reporting an error without a path beats losing
	/// the error being reported.
	pub fn resolve(&self) -> Result<Option<String>, PathError> {
		Ok(self.resolve_path()?.map(|path| path.to_string()))
	}

	/// Resolves the path as structured segments.
	pub fn resolve_path(&self) -> Result<Option<TagPath>, PathError> {
		tracing::trace!(root = self.root.type_name(), "resolving tag path");

		let Some(target) = self.target else {
			let (tag, _) = self.root_parts()?;
			return Ok(Some(TagPath::root(tag)));
		};

		let Some(mut path) = self.path_to_node(target.node)? else {
			tracing::debug!(
				domain = "tagpath",
				root = self.root.type_name(),
				target = target.node.type_name(),
				"target not reachable from root",
			);
			return Ok(None);
		};

		let Some(field) = target.field else {
			return Ok(Some(path));
		};

		match self.field_trail(target.node, field)? {
			Some(trail) => path.extend_from_trail(trail),
			None => tracing::debug!(
				domain = "tagpath",
				node = target.node.type_name(),
				field = field.type_name(),
				"field not held by node; using node path",
			),
		}
		Ok(Some(path))
	}

	/// Returns the root tag and the value searched below it.
	fn root_parts(&self) -> Result<(&'a str, Value<'a>), PathError> {
		match self.root.value() {
			Value::Wrapped(wrapper) => Ok((wrapper.tag(), wrapper.payload())),
			value @ Value::Node(node) if value.is_node() => node
				.schema()
				.root
				.map(|tag| (tag, value))
				.ok_or(PathError::NotRoot { found: node.type_name() }),
			_ => Err(PathError::NotRoot {
				found: self.root.type_name(),
			}),
		}
	}

	fn path_to_node(&self, node: &'a dyn Field) -> Result<Option<TagPath>, PathError> {
		let value = node.value();
		let target = match value {
			Value::Sequence(_) => value.identity(),
			Value::Wrapped(wrapper) if matches!(wrapper.payload(), Value::Sequence(_)) => value.identity(),
			_ if value.is_node() => value.identity(),
			_ => None,
		}
		.ok_or(PathError::NotANode {
			found: node.type_name(),
			root: self.root.type_name(),
		})?;
		if value.is_zero_sized() {
			return Err(PathError::ZeroSizedTarget {
				found: value.type_name(),
			});
		}

		let (tag, below) = self.root_parts()?;
		let root = self.root.value().identity();
		if root == Some(target) || below.identity() == Some(target) {
			return Ok(Some(TagPath::root(tag)));
		}

		let Some(start) = below.as_node() else {
			return Ok(None);
		};
		let search = Search::new(target, self.max_depth);
		Ok(search.node(start, Reach::Deep(0))?.map(|trail| {
			let mut path = TagPath::root(tag);
			path.extend_from_trail(trail);
			path
		}))
	}

	/// Looks for `field` among the direct field values of `node`.
	fn field_trail(
		&self,
		node: &'a dyn Field,
		field: &'a dyn Field,
	) -> Result<Option<Vec<Segment>>, PathError> {
		let value = field.value();
		if value.is_zero_sized() {
			return Err(PathError::ZeroSizedTarget {
				found: value.type_name(),
			});
		}
		let (Some(target), Some(owner)) = (value.identity(), node.value().as_node()) else {
			return Ok(None);
		};
		Search::new(target, self.max_depth).node(owner, Reach::Shallow)
	}
}

impl fmt::Debug for XmlPath<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let target = self.target.map(|target| target.node.type_name());
		let field = self.target.and_then(|target| target.field).map(|field| field.type_name());
		f.debug_struct("XmlPath")
			.field("root", &self.root.type_name())
			.field("node", &target)
			.field("field", &field)
			.field("max_depth", &self.max_depth)
			.finish()
	}
}
