//! Codec for document references: `TARGET? ('#' ANCHOR)? ('?' QUERY)?`.
//!
//! The target context escapes only the three separator characters. The
//! anchor and query contexts additionally escape the escape character
//! itself, since `\` has no other reading there. Parsing splits on the
//! leftmost unescaped separator, in whichever order the separators occur,
//! and never fails: malformed escape sequences read as literal characters.

use std::sync::LazyLock;

use crate::escaping::EscapeRules;
use crate::reference::{ResourceReference, ResourceType};

use super::{ESCAPE_CHAR, SEPARATOR_ANCHOR, SEPARATOR_INTERWIKI, SEPARATOR_QUERY_STRING};

fn escaped(c: char) -> String {
    format!("{ESCAPE_CHAR}{c}")
}

/// Escapes applied to the target part: the separators only.
pub static TARGET_ESCAPES: LazyLock<EscapeRules> = LazyLock::new(|| {
    EscapeRules::new([
        (SEPARATOR_QUERY_STRING.to_string(), escaped(SEPARATOR_QUERY_STRING)),
        (SEPARATOR_INTERWIKI.to_string(), escaped(SEPARATOR_INTERWIKI)),
        (SEPARATOR_ANCHOR.to_string(), escaped(SEPARATOR_ANCHOR)),
    ])
});

/// Escapes applied to the anchor and query parts: the separators plus the
/// escape character itself.
pub static EXTRA_ESCAPES: LazyLock<EscapeRules> = LazyLock::new(|| {
    EscapeRules::new([
        (SEPARATOR_QUERY_STRING.to_string(), escaped(SEPARATOR_QUERY_STRING)),
        (SEPARATOR_INTERWIKI.to_string(), escaped(SEPARATOR_INTERWIKI)),
        (SEPARATOR_ANCHOR.to_string(), escaped(SEPARATOR_ANCHOR)),
        (ESCAPE_CHAR.to_string(), escaped(ESCAPE_CHAR)),
    ])
});

static TARGET_UNESCAPES: LazyLock<EscapeRules> = LazyLock::new(|| TARGET_ESCAPES.inverted());
static EXTRA_UNESCAPES: LazyLock<EscapeRules> = LazyLock::new(|| EXTRA_ESCAPES.inverted());

/// Composes a document reference into its canonical wire string.
///
/// Emission order is fixed: target, then anchor, then query string. The
/// parameter map's insertion order does not influence the output, so every
/// reference has exactly one serialization.
pub fn serialize(reference: &ResourceReference) -> String {
    let mut out = String::new();

    if !reference.target().is_empty() {
        out.push_str(&TARGET_ESCAPES.apply(reference.target()));
    }
    if let Some(anchor) = reference.anchor() {
        out.push(SEPARATOR_ANCHOR);
        out.push_str(&EXTRA_ESCAPES.apply(anchor));
    }
    if let Some(query_string) = reference.query_string() {
        out.push(SEPARATOR_QUERY_STRING);
        out.push_str(&EXTRA_ESCAPES.apply(query_string));
    }

    out
}

/// Decomposes a wire string into a document reference.
///
/// A separator is a boundary only when preceded by an even number of
/// consecutive escape characters. The leftmost unescaped separator of
/// either kind ends the target; the remainder is re-scanned for the other
/// separator, so `a#x?q` and `a?q#x` both yield anchor `x` and query `q`.
/// Parsing never fails: a trailing unpaired escape character reads as a
/// literal backslash.
pub fn parse(text: &str) -> ResourceReference {
    let anchor_at = find_unescaped(text, SEPARATOR_ANCHOR);
    let query_at = find_unescaped(text, SEPARATOR_QUERY_STRING);

    let target_raw;
    let mut anchor_raw = None;
    let mut query_raw = None;

    match (anchor_at, query_at) {
        (None, None) => {
            target_raw = text;
        }
        (Some(a), None) => {
            target_raw = &text[..a];
            anchor_raw = Some(&text[a + 1..]);
        }
        (None, Some(q)) => {
            target_raw = &text[..q];
            query_raw = Some(&text[q + 1..]);
        }
        (Some(a), Some(q)) if a < q => {
            target_raw = &text[..a];
            let rest = &text[a + 1..];
            match find_unescaped(rest, SEPARATOR_QUERY_STRING) {
                Some(q) => {
                    anchor_raw = Some(&rest[..q]);
                    query_raw = Some(&rest[q + 1..]);
                }
                None => anchor_raw = Some(rest),
            }
        }
        (Some(_), Some(q)) => {
            target_raw = &text[..q];
            let rest = &text[q + 1..];
            match find_unescaped(rest, SEPARATOR_ANCHOR) {
                Some(a) => {
                    query_raw = Some(&rest[..a]);
                    anchor_raw = Some(&rest[a + 1..]);
                }
                None => query_raw = Some(rest),
            }
        }
    }

    let mut reference =
        ResourceReference::new(ResourceType::Document, TARGET_UNESCAPES.apply(target_raw));
    if let Some(anchor) = anchor_raw {
        reference.set_anchor(EXTRA_UNESCAPES.apply(anchor));
    }
    if let Some(query_string) = query_raw {
        reference.set_query_string(EXTRA_UNESCAPES.apply(query_string));
    }

    reference
}

/// Byte offset of the leftmost occurrence of `separator` not neutralized by
/// an escape character.
///
/// Each escape character consumes exactly the next character, so a run of
/// escapes pairs up from the left: an even-length run leaves the following
/// character unescaped. All wire characters are ASCII, so a byte match is
/// always a character boundary.
fn find_unescaped(text: &str, separator: char) -> Option<usize> {
    let bytes = text.as_bytes();
    let separator = separator as u8;
    let escape = ESCAPE_CHAR as u8;

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == escape {
            // Skip the escape and the character it neutralizes. A trailing
            // escape with nothing after it simply ends the scan.
            i += 2;
        } else if bytes[i] == separator {
            return Some(i);
        } else {
            i += 1;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc(target: &str) -> ResourceReference {
        ResourceReference::new(ResourceType::Document, target)
    }

    #[test]
    fn plain_target_round_trips() {
        assert_eq!(serialize(&doc("WebHome")), "WebHome");
        assert_eq!(parse("WebHome"), doc("WebHome"));
    }

    #[test]
    fn separator_in_target_is_escaped() {
        assert_eq!(serialize(&doc("A#B")), "A\\#B");
        assert_eq!(parse("A\\#B"), doc("A#B"));
    }

    #[test]
    fn anchor_and_query_are_escaped_with_the_extra_table() {
        let reference = doc("Doc").with_anchor("sec?1").with_query_string("a=b#c");
        assert_eq!(serialize(&reference), "Doc#sec\\?1?a=b\\#c");
        assert_eq!(parse("Doc#sec\\?1?a=b\\#c"), reference);
    }

    #[test]
    fn empty_target_with_query_only() {
        let reference = doc("").with_query_string("x=1");
        assert_eq!(serialize(&reference), "?x=1");
        assert_eq!(parse("?x=1"), reference);
    }

    #[test]
    fn backslash_in_anchor_self_escapes() {
        let reference = doc("Doc").with_anchor("C:\\Path");
        assert_eq!(serialize(&reference), "Doc#C:\\\\Path");
        assert_eq!(parse("Doc#C:\\\\Path"), reference);
    }

    #[test]
    fn interwiki_separator_is_escaped_but_never_splits() {
        let reference = doc("user@host").with_anchor("a@b");
        assert_eq!(serialize(&reference), "user\\@host#a\\@b");
        assert_eq!(parse("user\\@host#a\\@b"), reference);
    }

    #[test]
    fn anchor_before_query_is_canonical_regardless_of_insertion_order() {
        let mut reference = doc("Doc");
        reference.set_query_string("q");
        reference.set_anchor("x");
        assert_eq!(serialize(&reference), "Doc#x?q");
    }

    #[test]
    fn query_before_anchor_in_input_parses_the_same_parts() {
        let reference = parse("Doc?q#x");
        assert_eq!(reference.target(), "Doc");
        assert_eq!(reference.anchor(), Some("x"));
        assert_eq!(reference.query_string(), Some("q"));
    }

    #[test]
    fn empty_input_is_an_empty_target() {
        assert_eq!(parse(""), doc(""));
        assert_eq!(serialize(&doc("")), "");
    }

    #[test]
    fn lone_separator_yields_an_empty_part() {
        let reference = parse("#");
        assert_eq!(reference.target(), "");
        assert_eq!(reference.anchor(), Some(""));
        assert_eq!(reference.query_string(), None);
        assert_eq!(serialize(&reference), "#");
    }

    #[test]
    fn doubled_escape_leaves_the_separator_live() {
        // `\\` is one literal backslash; the following `#` still splits.
        let reference = parse("a\\\\#x");
        assert_eq!(reference.anchor(), Some("x"));
    }

    #[test]
    fn escaped_separator_does_not_split() {
        let reference = parse("a\\#b");
        assert_eq!(reference, doc("a#b"));
    }

    #[test]
    fn trailing_unpaired_escape_reads_as_a_literal() {
        let reference = parse("Doc#a\\");
        assert_eq!(reference.anchor(), Some("a\\"));
    }

    #[test]
    fn unknown_escape_sequence_reads_as_written() {
        // `\x` matches no unescape rule; both characters copy through.
        assert_eq!(parse("a\\xb"), doc("a\\xb"));
    }

    #[test]
    fn find_unescaped_counts_escape_parity() {
        assert_eq!(find_unescaped("#", '#'), Some(0));
        assert_eq!(find_unescaped("\\#", '#'), None);
        assert_eq!(find_unescaped("\\\\#", '#'), Some(2));
        assert_eq!(find_unescaped("\\\\\\#", '#'), None);
        assert_eq!(find_unescaped("a\\", '#'), None);
    }

    #[test]
    fn parse_shape() {
        insta::assert_debug_snapshot!(parse("Doc#sec\\?1?a=b\\#c"), @r#"
        ResourceReference {
            resource_type: Document,
            target: "Doc",
            parameters: Parameters(
                [
                    (
                        "anchor",
                        "sec?1",
                    ),
                    (
                        "queryString",
                        "a=b#c",
                    ),
                ],
            ),
        }
        "#);
    }
}
