//! Passthrough codecs for URI-flavored references.
//!
//! UNC paths, URLs and mail addresses carry their reference text verbatim.
//! In particular a UNC path's backslashes are path characters, not escape
//! characters, so neither direction touches the text.

use crate::reference::{ResourceReference, ResourceType};

/// Codec for reference flavors whose wire form is the target itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UriReferenceCodec {
    resource_type: ResourceType,
}

impl UriReferenceCodec {
    pub const fn new(resource_type: ResourceType) -> Self {
        Self { resource_type }
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    /// Emits the target byte-for-byte.
    pub fn serialize(&self, reference: &ResourceReference) -> String {
        reference.target().to_string()
    }

    /// Wraps the whole text as the target, with no parameters.
    pub fn parse(&self, text: &str) -> ResourceReference {
        ResourceReference::new(self.resource_type, text)
    }
}
