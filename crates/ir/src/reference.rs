//! `$ref` resolution.

use crate::document::{
    IrDocument, PARAMETERS_PREFIX, REQUEST_BODIES_PREFIX, SCHEMAS_PREFIX, unescape_pointer,
};
use crate::node::SchemaNode;

/// A `$ref` that does not point at anything in the document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("reference {reference} does not resolve to any schema")]
pub struct DanglingReference {
    /// The `$ref` string as written.
    pub reference: String,
}

/// Looks up the schema a `$ref` string points at.
pub trait ResolveRef {
    /// The node `reference` points at.
    fn resolve(&self, reference: &str) -> Result<&SchemaNode, DanglingReference>;
}

impl ResolveRef for IrDocument {
    fn resolve(&self, reference: &str) -> Result<&SchemaNode, DanglingReference> {
        let components = &self.components;
        let found = if let Some(name) = reference.strip_prefix(SCHEMAS_PREFIX) {
            components.schemas.get(&unescape_pointer(name))
        } else if let Some(name) = reference.strip_prefix(PARAMETERS_PREFIX) {
            components
                .parameters
                .get(&unescape_pointer(name))
                .map(|parameter| &parameter.schema)
        } else if let Some(name) = reference.strip_prefix(REQUEST_BODIES_PREFIX) {
            components
                .request_bodies
                .get(&unescape_pointer(name))
                .map(|body| &body.schema)
        } else {
            None
        };

        found.ok_or_else(|| DanglingReference {
            reference: reference.to_owned(),
        })
    }
}

/// The human-facing base name of a `$ref`: its last pointer segment.
///
/// `#/components/schemas/Pet` becomes `Pet`.
pub fn ref_to_name(reference: &str) -> String {
    let last = reference.rsplit('/').next().unwrap_or(reference);
    unescape_pointer(last)
}
