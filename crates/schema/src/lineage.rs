//! Flattened field layouts.
//!
//! The resolver visits own fields first, then each ancestor's fields. That
//! order only depends on the static tables, so it is computed once per type and
//! shared afterwards.

use core::ptr;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;

use crate::schema::{FieldSchema, TypeSchema};

/// Position of one field in a flattened layout.
#[derive(Debug, Clone, Copy)]
pub struct FieldSlot {
	/// Ancestor distance of the declaring type (0 = the type itself).
	pub depth: usize,
	/// Index into the declaring type's [`TypeSchema::fields`].
	pub index: usize,
	pub field: &'static FieldSchema,
}

static LINEAGES: LazyLock<RwLock<HashMap<usize, Arc<[FieldSlot]>>>> =
	LazyLock::new(|| RwLock::new(HashMap::default()));

impl TypeSchema {
	/// Returns own fields followed by ancestor fields, in search order.
	pub fn lineage(&'static self) -> Arc<[FieldSlot]> {
		let key = ptr::from_ref(self).addr();
		if let Some(slots) = LINEAGES.read().get(&key) {
			return Arc::clone(slots);
		}

		let slots: Arc<[FieldSlot]> = self
			.ancestry()
			.enumerate()
			.flat_map(|(depth, schema)| {
				schema
					.fields
					.iter()
					.enumerate()
					.map(move |(index, field)| FieldSlot { depth, index, field })
			})
			.collect();

		Arc::clone(LINEAGES.write().entry(key).or_insert(slots))
	}
}
