//! Token-keyed lookup of reference codecs.
//!
//! The registry is an explicit, immutable map from short type tokens
//! (`"doc"`, `"unc"`, `"url"`, `"mailto"`) to codec implementations,
//! populated once at startup. There is no registration after construction;
//! the process-wide instance behind [`default_registry`] is shared across
//! threads without locking.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::codec::doc;
use crate::codec::uri::UriReferenceCodec;
use crate::reference::{ResourceReference, ResourceType};

/// A serializer/parser pair for one reference flavor.
pub trait ReferenceTypeCodec: Send + Sync + std::fmt::Debug {
    /// The flavor this codec handles.
    fn resource_type(&self) -> ResourceType;

    /// Composes the canonical wire string for `reference`.
    fn serialize(&self, reference: &ResourceReference) -> String;

    /// Decomposes `text` into a structured reference. Never fails;
    /// malformed escape sequences read as literal characters.
    fn parse(&self, text: &str) -> ResourceReference;
}

/// The document flavor: escape-aware target/anchor/query codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentReferenceCodec;

impl ReferenceTypeCodec for DocumentReferenceCodec {
    fn resource_type(&self) -> ResourceType {
        ResourceType::Document
    }

    fn serialize(&self, reference: &ResourceReference) -> String {
        doc::serialize(reference)
    }

    fn parse(&self, text: &str) -> ResourceReference {
        doc::parse(text)
    }
}

impl ReferenceTypeCodec for UriReferenceCodec {
    fn resource_type(&self) -> ResourceType {
        UriReferenceCodec::resource_type(self)
    }

    fn serialize(&self, reference: &ResourceReference) -> String {
        UriReferenceCodec::serialize(self, reference)
    }

    fn parse(&self, text: &str) -> ResourceReference {
        UriReferenceCodec::parse(self, text)
    }
}

/// Lookup failure for a type token with no registered codec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no codec registered for reference type token '{token}'")]
pub struct UnknownTypeToken {
    pub token: String,
}

/// Immutable map from short type tokens to reference codecs.
pub struct TypeRegistry {
    codecs: HashMap<&'static str, Box<dyn ReferenceTypeCodec>>,
}

impl TypeRegistry {
    /// Registry holding the built-in flavors: `doc`, `unc`, `url`, `mailto`.
    pub fn with_defaults() -> Self {
        let mut codecs: HashMap<&'static str, Box<dyn ReferenceTypeCodec>> = HashMap::new();
        codecs.insert(
            ResourceType::Document.token(),
            Box::new(DocumentReferenceCodec),
        );
        for resource_type in [ResourceType::Unc, ResourceType::Url, ResourceType::Mailto] {
            codecs.insert(
                resource_type.token(),
                Box::new(UriReferenceCodec::new(resource_type)),
            );
        }
        Self { codecs }
    }

    /// Looks a codec up by its type token.
    pub fn get(&self, token: &str) -> Result<&dyn ReferenceTypeCodec, UnknownTypeToken> {
        self.codecs
            .get(token)
            .map(Box::as_ref)
            .ok_or_else(|| UnknownTypeToken {
                token: token.to_string(),
            })
    }

    /// The registered tokens, in no particular order.
    pub fn tokens(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.codecs.keys().copied()
    }
}

/// The process-wide registry of built-in codecs.
pub fn default_registry() -> &'static TypeRegistry {
    static REGISTRY: LazyLock<TypeRegistry> = LazyLock::new(TypeRegistry::with_defaults);
    &REGISTRY
}
