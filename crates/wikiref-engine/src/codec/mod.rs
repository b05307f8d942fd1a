//! Wire-format codecs for reference strings.
//!
//! The document codec ([`doc`]) implements the
//! `TARGET? ('#' ANCHOR)? ('?' QUERY)?` form with `\` as the escape
//! character. The URI codecs ([`uri`]) carry their text verbatim.

pub mod doc;
pub mod uri;

/// Escape character: neutralizes the next character.
pub const ESCAPE_CHAR: char = '\\';
/// Separator introducing the anchor part.
pub const SEPARATOR_ANCHOR: char = '#';
/// Separator introducing the query-string part.
pub const SEPARATOR_QUERY_STRING: char = '?';
/// Reserved separator marking a cross-wiki reference segment. The document
/// codec escapes it but never splits on it.
pub const SEPARATOR_INTERWIKI: char = '@';
