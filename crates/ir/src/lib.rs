//! Normalized intermediate representation consumed by the schema compiler.
//!
//! The IR is document-agnostic: raw OpenAPI / JSON-Schema parsing happens
//! upstream and produces an [`IrDocument`] serialized as JSON. This crate owns:
//!
//! - `node`: the [`SchemaNode`] graph and its kind/operator/scope enums
//! - `document`: components, operations, and [`IrDocument::events`]
//! - `reference`: `$ref` resolution via the [`ResolveRef`] trait
//! - `dedup`: structural deduplication of composed schemas

mod dedup;
mod document;
mod node;
mod reference;

pub use dedup::deduplicate;
pub use document::{
    Components, Event, EventKind, IrDocument, Operation, Parameter, ParameterLocation,
    RequestBody,
};
pub use node::{AccessScope, LogicalOperator, SchemaKind, SchemaNode};
pub use reference::{DanglingReference, ResolveRef, ref_to_name};
