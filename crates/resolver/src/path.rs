//! Structured tag paths.

use core::fmt;


/// One step of a [`TagPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
	name: String,
	attribute: bool,
	occurrence: Option<usize>,
}

impl Segment {
	/// An element step (`Name`).
	pub fn element(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			attribute: false,
			occurrence: None,
		}
	}

	/// An attribute step (`@Name`).
	pub fn attribute(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			attribute: true,
			occurrence: None,
		}
	}

	/// A repeated element step (`Name[occurrence]`), 1-based.
	pub fn indexed(name: impl Into<String>, occurrence: usize) -> Self {
		Self {
			name: name.into(),
			attribute: false,
			occurrence: Some(occurrence),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn is_attribute(&self) -> bool {
		self.attribute
	}

	pub fn occurrence(&self) -> Option<usize> {
		self.occurrence
	}
}

impl fmt::Display for Segment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.attribute {
			f.write_str("@")?;
		}
		f.write_str(&self.name)?;
		if let Some(occurrence) = self.occurrence {
			write!(f, "[{occurrence}]")?;
		}
		Ok(())
	}
}

/// A path from a document root, rendered as `Root/Child[2]/@attr`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagPath {
	segments: Vec<Segment>,
}

impl TagPath {
	/// A path holding only the root tag.
	pub fn root(tag: impl Into<String>) -> Self {
		Self {
			segments: vec![Segment::element(tag)],
		}
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// The last step.
	pub fn leaf(&self) -> Option<&Segment> {
		self.segments.last()
	}

	pub fn push(&mut self, segment: Segment) {
		self.segments.push(segment);
	}

	/// Appends a trail collected leaf-first while unwinding a search.
	pub(crate) fn extend_from_trail(&mut self, trail: Vec<Segment>) {
		self.segments.extend(trail.into_iter().rev());
	}
}

impl fmt::Display for TagPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, segment) in self.segments.iter().enumerate() {
			if i > 0 {
				f.write_str("/")?;
			}
			write!(f, "{segment}")?;
		}
		Ok(())
	}
}
