//! IR schema node definitions for serde deserialization.
//!
//! A [`SchemaNode`] is either kinded (`type` present), a pure reference
//! (`$ref` present), or a logical composition (`items` without `type`).
//! Anything else is treated as `unknown` by consumers.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Kind of a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    /// Homogeneous list; the element schema is in `items`.
    Array,
    /// `true` or `false`.
    Boolean,
    /// One of the literal values listed in `items`.
    Enum,
    /// Whole number, optionally narrowed by `format`.
    Integer,
    /// Matches nothing.
    Never,
    /// Only `null`.
    Null,
    /// Any number.
    Number,
    /// Keyed record with `properties` and `additionalProperties`.
    Object,
    /// Text, optionally refined by `format`, `pattern` and lengths.
    String,
    /// Fixed-position list; one schema per position in `items`.
    Tuple,
    /// Only `undefined`.
    Undefined,
    /// Matches anything.
    Unknown,
    /// No value.
    Void,
}

/// Composition operator for nodes whose `items` are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOperator {
    /// Intersection: every item must match.
    And,
    /// Union: at least one item must match.
    Or,
}

/// Access scope of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessScope {
    /// Output-only field.
    Read,
    /// Input-only field.
    Write,
}

/// A normalized schema node.
///
/// Equality is structural (deep), which is what deduplication relies on.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// The kind of the schema, absent for references and logical compositions.
    #[serde(rename = "type")]
    pub kind: Option<SchemaKind>,

    /// Reference to another named schema node.
    #[serde(rename = "$ref")]
    pub reference: Option<String>,

    /// Child schemas for arrays, tuples, enums and logical compositions.
    pub items: Option<Vec<SchemaNode>>,

    /// Distinguishes intersection from union when `items` are composed.
    pub logical_operator: Option<LogicalOperator>,

    /// Properties for object kinds, in declaration order.
    pub properties: Option<IndexMap<String, SchemaNode>>,

    /// Required property names for object kinds.
    pub required: Option<Vec<String>>,

    /// Catch-all value schema for object kinds.
    pub additional_properties: Option<Box<SchemaNode>>,

    /// Format hint (e.g., date-time, uuid, int64).
    pub format: Option<String>,

    /// Regex pattern for strings.
    pub pattern: Option<String>,

    /// Minimum length for strings.
    pub min_length: Option<u64>,

    /// Maximum length for strings.
    pub max_length: Option<u64>,

    /// Minimum value for numbers.
    pub minimum: Option<f64>,

    /// Maximum value for numbers.
    pub maximum: Option<f64>,

    /// Exclusive minimum value for numbers.
    pub exclusive_minimum: Option<f64>,

    /// Exclusive maximum value for numbers.
    pub exclusive_maximum: Option<f64>,

    /// Minimum items for arrays and tuples.
    pub min_items: Option<u64>,

    /// Maximum items for arrays and tuples.
    pub max_items: Option<u64>,

    /// Constant value. An explicit `null` is kept as `Some(Value::Null)`.
    #[serde(rename = "const", default, deserialize_with = "deserialize_present")]
    pub const_value: Option<Value>,

    /// Default value. An explicit `null` is kept as `Some(Value::Null)`.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub default: Option<Value>,

    /// Short human-readable name.
    pub title: Option<String>,

    /// Free-form description, emitted as a doc comment or metadata.
    pub description: Option<String>,

    /// Marks the schema as deprecated.
    pub deprecated: Option<bool>,

    /// `read` marks an output-only field.
    pub access_scope: Option<AccessScope>,
}

/// Keep an explicit JSON `null` distinct from an absent key.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl SchemaNode {
    /// Shorthand for a node of the given kind with nothing else set.
    pub fn of_kind(kind: SchemaKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Shorthand for a pure reference node.
    pub fn reference(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Self::default()
        }
    }

    /// True when this node only points at another schema.
    pub fn is_reference(&self) -> bool {
        self.reference.is_some() && self.kind.is_none()
    }

    /// True when this node composes its `items` with a logical operator.
    pub fn is_composition(&self) -> bool {
        self.kind.is_none()
            && self.reference.is_none()
            && self.items.as_ref().is_some_and(|items| !items.is_empty())
    }

    /// Whether `name` is listed in `required`.
    pub fn is_required(&self, name: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|required| required.iter().any(|r| r == name))
    }

    /// Bring a single surviving composition member up into this node.
    ///
    /// Fields set on `child` win; anything the child leaves unset is taken
    /// from `self`. The composition itself (`items`, `logicalOperator`) is
    /// replaced by whatever the child carries.
    pub fn lift(&self, child: &SchemaNode) -> SchemaNode {
        let parent = self.clone();
        let child = child.clone();
        SchemaNode {
            kind: child.kind.or(parent.kind),
            reference: child.reference.or(parent.reference),
            items: child.items,
            logical_operator: child.logical_operator,
            properties: child.properties.or(parent.properties),
            required: child.required.or(parent.required),
            additional_properties: child.additional_properties.or(parent.additional_properties),
            format: child.format.or(parent.format),
            pattern: child.pattern.or(parent.pattern),
            min_length: child.min_length.or(parent.min_length),
            max_length: child.max_length.or(parent.max_length),
            minimum: child.minimum.or(parent.minimum),
            maximum: child.maximum.or(parent.maximum),
            exclusive_minimum: child.exclusive_minimum.or(parent.exclusive_minimum),
            exclusive_maximum: child.exclusive_maximum.or(parent.exclusive_maximum),
            min_items: child.min_items.or(parent.min_items),
            max_items: child.max_items.or(parent.max_items),
            const_value: child.const_value.or(parent.const_value),
            default: child.default.or(parent.default),
            title: child.title.or(parent.title),
            description: child.description.or(parent.description),
            deprecated: child.deprecated.or(parent.deprecated),
            access_scope: child.access_scope.or(parent.access_scope),
        }
    }
}
