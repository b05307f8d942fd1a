//! Simultaneous multi-pattern literal substitution.
//!
//! A single left-to-right pass over the input tests an ordered table of
//! literal patterns at every position and substitutes the first match.
//! Replacement text is never re-scanned, so a freshly inserted escape
//! sequence cannot be escaped again or mistaken for a delimiter. Escaping
//! and unescaping share this one algorithm: the unescape direction is the
//! same table with search and replacement swapped ([`EscapeRules::inverted`]).

/// An ordered table of `(search, replacement)` literal string pairs.
///
/// Rule order is significant: at each input position the first matching
/// `search` wins. If one pattern is a prefix of another, the longer pattern
/// must come first or it could never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeRules {
    rules: Vec<(String, String)>,
}

impl EscapeRules {
    /// Builds a rule table from `(search, replacement)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if any `search` pattern is empty, or if an earlier pattern is
    /// a proper prefix of a later one. Rule tables are process-wide
    /// constants built once at startup, so either is a programming error
    /// caught immediately rather than a runtime condition.
    pub fn new<S: Into<String>>(pairs: impl IntoIterator<Item = (S, S)>) -> Self {
        let rules: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(search, replacement)| (search.into(), replacement.into()))
            .collect();

        for (i, (search, _)) in rules.iter().enumerate() {
            assert!(!search.is_empty(), "empty search pattern at rule {i}");
            for (later, _) in &rules[i + 1..] {
                assert!(
                    !(later.len() > search.len() && later.starts_with(search.as_str())),
                    "pattern {search:?} shadows the longer pattern {later:?}; \
                     longer patterns must come first"
                );
            }
        }

        Self { rules }
    }

    /// The same table with each search and replacement swapped, turning an
    /// escaping table into its matching unescaping table.
    pub fn inverted(&self) -> Self {
        Self::new(
            self.rules
                .iter()
                .map(|(search, replacement)| (replacement.clone(), search.clone())),
        )
    }

    /// Applies the table to `text` in a single left-to-right pass.
    ///
    /// At each position the first matching rule is substituted and the
    /// cursor advances past the matched input. On no match a single
    /// character is copied through. Empty input yields empty output.
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        'scan: while !rest.is_empty() {
            for (search, replacement) in &self.rules {
                if rest.starts_with(search.as_str()) {
                    out.push_str(replacement);
                    rest = &rest[search.len()..];
                    continue 'scan;
                }
            }
            let mut chars = rest.chars();
            if let Some(ch) = chars.next() {
                out.push(ch);
            }
            rest = chars.as_str();
        }

        out
    }
}
