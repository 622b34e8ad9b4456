//! Procedural macros for tagpath.
//!
//! Provides `#[derive(XmlSchema)]`, which generates the static metadata table
//! and the `Field`/`Node` impls the path resolver walks.

use proc_macro::TokenStream;

/// `#[xml(...)]` attribute parsing.
mod attrs;
/// Derive expansion.
mod schema;

/// Derives structural metadata for a schema type.
///
/// ```ignore
/// #[derive(XmlSchema)]
/// #[xml(root = "PNR")]
/// pub struct Pnr {
///     #[xml(attribute = "Locator")]
///     locator: String,
///     #[xml(element = "Passenger")]
///     passengers: Vec<Passenger>,
///     #[xml(elements(Flight = "Flight", Arnk = "ARNK"))]
///     segments: Vec<Segment>,
///     #[xml(base)]
///     header: MessageHeader,
/// }
/// ```
///
/// Three shapes are accepted:
/// * structs with named fields: complex types, traversed field by field
/// * enums with unit variants only: enumerations, treated as leaves
/// * enums whose variants each hold one value: choices, which delegate to the
///   held value so that its runtime type decides the polymorphic tag
///
/// Container attributes:
/// * `root = "Tag"` - declared root tag (structs only)
///
/// Field attributes:
/// * `attribute` / `attribute = "Tag"` - XML attribute
/// * `element` / `element = "Tag"` - XML element (the default)
/// * `elements(Type = "Tag", ...)` - polymorphic element choices
/// * `base` - field holding the ancestor type's part (at most one)
/// * `skip` - not part of the schema
#[proc_macro_derive(XmlSchema, attributes(xml))]
pub fn derive_xml_schema(input: TokenStream) -> TokenStream {
	schema::derive_xml_schema(input)
}
