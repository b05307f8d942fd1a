//! Reference string codec for wiki markup links.
//!
//! Wiki markup embeds compact references to other resources inside link
//! syntax. This crate converts between the structured form — a target plus
//! named parts such as anchor and query string — and the single canonical
//! wire string, in both directions, such that the two conversions invert
//! each other.
//!
//! The document wire format is `TARGET? ('#' ANCHOR)? ('?' QUERY)?` with
//! `\` as the escape character:
//!
//! ```
//! use wikiref_engine::codec::doc;
//! use wikiref_engine::{ResourceReference, ResourceType};
//!
//! let reference = ResourceReference::new(ResourceType::Document, "A#B")
//!     .with_query_string("x=1");
//! let wire = doc::serialize(&reference);
//! assert_eq!(wire, "A\\#B?x=1");
//! assert_eq!(doc::parse(&wire), reference);
//! ```
//!
//! URI-flavored references (`unc`, `url`, `mailto`) pass their text through
//! verbatim; the [`registry`] maps short type tokens to the matching codec.

pub mod codec;
pub mod escaping;
pub mod reference;
pub mod registry;

// Re-export key types for easier usage
pub use escaping::EscapeRules;
pub use reference::{Parameters, ResourceReference, ResourceType};
pub use registry::{
    DocumentReferenceCodec, ReferenceTypeCodec, TypeRegistry, UnknownTypeToken, default_registry,
};
