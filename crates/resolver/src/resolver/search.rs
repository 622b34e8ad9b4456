//! Depth-first identity search over declared fields.

use core::ptr;

use smallvec::SmallVec;
use tagpath_schema::{FieldSchema, Identity, Node, Sequence, Value};

use crate::error::PathError;
use crate::path::Segment;

/// Segments collected leaf-first while the search unwinds.
type Trail = Vec<Segment>;

/// How far below the starting node a search may go.
#[derive(Debug, Clone, Copy)]
pub(super) enum Reach {
	/// Recurse into nested nodes; carries the current nesting depth.
	Deep(usize),
	/// Only the starting node's own field values and their sequence items.
	Shallow,
}

pub(super) struct Search {
	target: Identity,
	max_depth: usize,
}

impl Search {
	pub(super) fn new(target: Identity, max_depth: usize) -> Self {
		Self { target, max_depth }
	}

	/// Searches the fields of `node`, own type first, then its ancestors.
	pub(super) fn node(&self, node: &dyn Node, reach: Reach) -> Result<Option<Trail>, PathError> {
		if let Reach::Deep(depth) = reach
			&& depth >= self.max_depth
		{
			tracing::warn!(
				domain = "tagpath",
				node = node.schema().name,
				depth,
				max_depth = self.max_depth,
				"search depth limit reached; skipping subtree",
			);
			return Ok(None);
		}

		let parts = parts(node)?;
		let lineage = node.schema().lineage();
		for slot in lineage.iter() {
			let Some(&owner) = parts.get(slot.depth) else {
				return Err(PathError::FieldAccess {
					field: slot.field.name,
					index: slot.index,
					owner: node.type_name(),
				});
			};
			let value = owner.field(slot.index).ok_or(PathError::FieldAccess {
				field: slot.field.name,
				index: slot.index,
				owner: owner.type_name(),
			})?;
			if let Some(trail) = self.field(owner, slot.field, value, reach)? {
				return Ok(Some(trail));
			}
		}
		Ok(None)
	}

	fn field<'v>(
		&self,
		owner: &dyn Node,
		field: &'static FieldSchema,
		value: Value<'v>,
		reach: Reach,
	) -> Result<Option<Trail>, PathError> {
		let mut tag: &'v str = field.default_tag();
		if let Value::Wrapped(wrapper) = value {
			if wrapper.payload().identity() == Some(self.target) {
				return Ok(Some(vec![Segment::element(wrapper.tag())]));
			}
			tag = wrapper.tag();
		}

		if value.identity() == Some(self.target) {
			let segment = if field.is_attribute() {
				Segment::attribute(tag)
			} else {
				Segment::element(tag)
			};
			return Ok(Some(vec![segment]));
		}

		if field.is_attribute() {
			return Ok(None);
		}

		if let Value::Sequence(seq) = value {
			return self.sequence(owner, field, tag, seq, reach);
		}

		let (Some(child), Reach::Deep(depth)) = (value.as_node(), reach) else {
			return Ok(None);
		};
		Ok(self.node(child, Reach::Deep(depth + 1))?.map(|mut trail| {
			trail.push(Segment::element(tag));
			trail
		}))
	}

	fn sequence(
		&self,
		owner: &dyn Node,
		field: &'static FieldSchema,
		tag: &str,
		seq: &dyn Sequence,
		reach: Reach,
	) -> Result<Option<Trail>, PathError> {
		for (index, item) in seq.items().enumerate() {
			if item.is_null() {
				return Err(PathError::NullElement {
					field: field.name,
					position: index + 1,
					owner: owner.type_name(),
				});
			}

			if self.is_target(item) {
				return Ok(Some(vec![item_segment(owner, field, tag, seq, index)?]));
			}

			if let (Some(child), Reach::Deep(depth)) = (item.as_node(), reach)
				&& let Some(mut trail) = self.node(child, Reach::Deep(depth + 1))?
			{
				trail.push(item_segment(owner, field, tag, seq, index)?);
				return Ok(Some(trail));
			}
		}
		Ok(None)
	}

	/// Sequence items match by themselves or, when wrapped, by their payload.
	fn is_target(&self, item: Value<'_>) -> bool {
		item.identity() == Some(self.target)
			|| matches!(item, Value::Wrapped(wrapper) if wrapper.payload().identity() == Some(self.target))
	}
}

/// Returns the instance parts holding each ancestor's fields, nearest first.
fn parts(node: &dyn Node) -> Result<SmallVec<[&dyn Node; 4]>, PathError> {
	let mut parts = SmallVec::new();
	let mut current = Some(node);
	for expected in node.schema().ancestry() {
		let Some(part) = current else {
			return Err(PathError::BaseMismatch {
				owner: node.type_name(),
				expected: expected.name,
				found: "nothing",
			});
		};
		if !ptr::eq(part.schema(), expected) {
			return Err(PathError::BaseMismatch {
				owner: node.type_name(),
				expected: expected.name,
				found: part.schema().name,
			});
		}
		parts.push(part);
		current = part.base();
	}
	Ok(parts)
}

/// Names the sequence item at `index`.
///
/// Plain sequences count every item. Polymorphic sequences name the item by
/// its runtime type and count only items of that type; wrapped items are
/// named by their own tag and counted per tag.
fn item_segment(
	owner: &dyn Node,
	field: &'static FieldSchema,
	tag: &str,
	seq: &dyn Sequence,
	index: usize,
) -> Result<Segment, PathError> {
	let item = seq.item(index);
	let preceding = seq.items().take(index + 1);

	if let Value::Wrapped(wrapper) = item {
		let occurrence = preceding
			.filter(|other| matches!(other, Value::Wrapped(w) if w.tag() == wrapper.tag()))
			.count();
		return Ok(Segment::indexed(wrapper.tag(), occurrence));
	}

	if !field.is_polymorphic() {
		return Ok(Segment::indexed(tag, index + 1));
	}

	let type_id = item.runtime_type();
	let choice = type_id
		.and_then(|type_id| field.choice_for(type_id))
		.ok_or(PathError::UnmappedElementType {
			found: item.type_name(),
			field: field.name,
			owner: owner.type_name(),
			choices: field.choices,
		})?;
	let occurrence = preceding.filter(|other| other.runtime_type() == type_id).count();
	Ok(Segment::indexed(choice.tag, occurrence))
}
