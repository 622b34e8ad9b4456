//! Structural metadata for schema-bound trees.
//!
//! Every type that takes part in a tag path exposes two things:
//! * a static [`TypeSchema`] table describing its tag names, attributes,
//!   polymorphic element choices and ancestor type
//! * a [`Value`] view of each instance, which the path resolver walks
//!
//! Tables are normally generated by `#[derive(XmlSchema)]`, but can be written
//! by hand as `static` items:
//!
//! ```ignore
//! static DOCUMENT_FIELDS: [FieldSchema; 2] = [
//!     FieldSchema::attribute("kind").tagged("Type"),
//!     FieldSchema::element("number").tagged("Number"),
//! ];
//! static DOCUMENT: TypeSchema = TypeSchema::complex("Document", &DOCUMENT_FIELDS);
//! ```

mod element;
mod lineage;
mod schema;
mod value;


pub use element::Element;
pub use lineage::FieldSlot;
pub use schema::{ElementChoice, FieldKind, FieldSchema, Node, TypeKind, TypeSchema};
pub use value::{Field, Identity, Sequence, Value, Wrapped};
