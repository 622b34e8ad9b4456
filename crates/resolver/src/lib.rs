//! Tag paths for schema-bound trees.
//!
//! Error-reporting code often needs to say *where* in a document a problem
//! sits (`PNR/Passenger[2]/Document/@Type`). [`XmlPath`] computes that path
//! from the root of a typed tree to a node (or a field of a node) by walking
//! the tree's static metadata and comparing values by identity.
//!
//! ```ignore
//! use tagpath::{XmlPath, XmlSchema};
//!
//! let path = XmlPath::new(&pnr)
//!     .for_field(&pnr.passengers[1], &pnr.passengers[1].surname)
//!     .resolve()?;
//! assert_eq!(path.as_deref(), Some("PNR/Passenger[2]/Surname"));
//! ```
//!
//! Resolution is strictly by identity: pass the value that actually lives in
//! the tree, not an equal copy. Two equal scalars inside the same node cannot
//! be told apart by value, which is why a field is always located through its
//! containing node.

extern crate self as tagpath;

mod error;
mod path;
mod resolver;

pub use error::PathError;
pub use path::{Segment, TagPath};
pub use resolver::{DEFAULT_MAX_DEPTH, XmlPath};
pub use tagpath_macros::XmlSchema;
pub use tagpath_schema as schema;
pub use tagpath_schema::{Element, Field, Node};
