//! Structured resource references.
//!
//! A [`ResourceReference`] is the decomposed form of a link reference: the
//! flavor of resource it addresses, the target identifier, and an ordered
//! map of named parts such as the anchor and query string. It is a plain
//! immutable value, built by callers or by a parser and consumed by a
//! serializer.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// The flavor of resource a reference addresses.
///
/// Each variant has a stable short token used as its key in the
/// [`TypeRegistry`](crate::registry::TypeRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceType {
    /// A wiki document, addressed by name.
    #[serde(rename = "doc")]
    Document,
    /// A UNC path such as `\\server\share\file`.
    #[serde(rename = "unc")]
    Unc,
    /// A URL.
    #[serde(rename = "url")]
    Url,
    /// A mail address.
    #[serde(rename = "mailto")]
    Mailto,
}

impl ResourceType {
    /// The registry token for this type.
    pub fn token(&self) -> &'static str {
        match self {
            ResourceType::Document => "doc",
            ResourceType::Unc => "unc",
            ResourceType::Url => "url",
            ResourceType::Mailto => "mailto",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// An ordered name → value map for the named parts of a reference.
///
/// Insertion order is preserved and each name holds at most one value;
/// setting an existing name replaces its value in place. Absence of a name
/// means "omit that part entirely", which is distinct from an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters(Vec<(String, String)>);

impl Parameters {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Looks a value up by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Sets `name` to `value`, replacing any existing value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Removes `name`, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.0.iter().position(|(n, _)| n == name)?;
        Some(self.0.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A structured reference to a resource, decomposed into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceReference {
    resource_type: ResourceType,
    target: String,
    parameters: Parameters,
}

impl ResourceReference {
    /// Parameter name holding the in-document fragment identifier.
    pub const ANCHOR: &'static str = "anchor";
    /// Parameter name holding the query string.
    pub const QUERY_STRING: &'static str = "queryString";

    /// Creates a reference to `target` with no named parts.
    ///
    /// The target may be empty (a reference to the current document); it is
    /// never a sentinel.
    pub fn new(resource_type: ResourceType, target: impl Into<String>) -> Self {
        Self {
            resource_type,
            target: target.into(),
            parameters: Parameters::new(),
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Looks a named part up by parameter name.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name)
    }

    /// Sets a named part, replacing any existing value.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters.set(name, value);
    }

    /// Removes a named part, returning its value if it was present.
    pub fn remove_parameter(&mut self, name: &str) -> Option<String> {
        self.parameters.remove(name)
    }

    pub fn anchor(&self) -> Option<&str> {
        self.parameter(Self::ANCHOR)
    }

    pub fn set_anchor(&mut self, anchor: impl Into<String>) {
        self.set_parameter(Self::ANCHOR, anchor);
    }

    pub fn query_string(&self) -> Option<&str> {
        self.parameter(Self::QUERY_STRING)
    }

    pub fn set_query_string(&mut self, query_string: impl Into<String>) {
        self.set_parameter(Self::QUERY_STRING, query_string);
    }

    /// Builder-style [`set_anchor`](Self::set_anchor).
    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.set_anchor(anchor);
        self
    }

    /// Builder-style [`set_query_string`](Self::set_query_string).
    pub fn with_query_string(mut self, query_string: impl Into<String>) -> Self {
        self.set_query_string(query_string);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_preserve_insertion_order() {
        let mut params = Parameters::new();
        params.set("b", "1");
        params.set("a", "2");
        let names: Vec<&str> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn set_replaces_in_place() {
        let mut params = Parameters::new();
        params.set("anchor", "old");
        params.set("queryString", "q");
        params.set("anchor", "new");
        assert_eq!(params.get("anchor"), Some("new"));
        assert_eq!(params.len(), 2);
        let names: Vec<&str> = params.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["anchor", "queryString"]);
    }

    #[test]
    fn absent_parameter_is_not_an_empty_one() {
        let mut reference = ResourceReference::new(ResourceType::Document, "Doc");
        assert_eq!(reference.anchor(), None);
        reference.set_anchor("");
        assert_eq!(reference.anchor(), Some(""));
    }

    #[test]
    fn remove_returns_the_old_value() {
        let mut reference = ResourceReference::new(ResourceType::Document, "Doc")
            .with_query_string("x=1");
        assert_eq!(
            reference.remove_parameter(ResourceReference::QUERY_STRING),
            Some("x=1".to_string())
        );
        assert_eq!(reference.query_string(), None);
    }

    #[test]
    fn resource_type_tokens_are_stable() {
        assert_eq!(ResourceType::Document.token(), "doc");
        assert_eq!(ResourceType::Unc.to_string(), "unc");
        assert_eq!(ResourceType::Url.to_string(), "url");
        assert_eq!(ResourceType::Mailto.to_string(), "mailto");
    }
}
