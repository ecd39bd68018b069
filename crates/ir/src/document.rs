//! IR document: reusable components, operations, and the event source.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::node::SchemaNode;

/// Root of a normalized API description.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IrDocument {
    /// Named, reusable schemas, parameters and request bodies.
    #[serde(default)]
    pub components: Components,
    /// Endpoints, in document order.
    #[serde(default)]
    pub operations: Vec<Operation>,
}

/// Reusable, named IR nodes. Maps keep document order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    /// `#/components/schemas/<name>`
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaNode>,
    /// `#/components/parameters/<name>`
    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,
    /// `#/components/requestBodies/<name>`
    #[serde(default)]
    pub request_bodies: IndexMap<String, RequestBody>,
}

/// Where a parameter lives in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Templated segment of the URL path.
    Path,
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Cookie value.
    Cookie,
}

/// A request parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    /// Wire name, used verbatim as an object key.
    pub name: String,
    /// Where the parameter is sent.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether a request must carry the parameter.
    #[serde(default)]
    pub required: bool,
    /// Value schema.
    #[serde(default)]
    pub schema: SchemaNode,
}

/// A request body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    /// Whether a request must carry a body.
    #[serde(default)]
    pub required: bool,
    /// Body schema.
    #[serde(default)]
    pub schema: SchemaNode,
}

/// An API operation (endpoint).
#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    /// Unique operation identifier, used to name per-operation declarations.
    pub id: String,
    /// HTTP method, lowercase.
    pub method: String,
    /// URL path template, e.g. `/pets/{petId}`.
    pub path: String,
    /// One-line summary.
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Marks the operation as deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Inline and resolved parameters.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Request body, when the operation takes one.
    pub body: Option<RequestBody>,
    /// Success response schema.
    pub response: Option<SchemaNode>,
}

/// Discriminant of an [`Event`], used to subscribe to a subset of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// [`Event::Operation`]
    Operation,
    /// [`Event::Parameter`]
    Parameter,
    /// [`Event::RequestBody`]
    RequestBody,
    /// [`Event::Schema`]
    Schema,
}

/// One unit of work handed to plugin handlers.
///
/// `reference` is present whenever the event corresponds to a named,
/// reusable component.
#[derive(Debug, Clone)]
pub enum Event<'a> {
    /// An endpoint.
    Operation {
        /// The operation itself.
        operation: &'a Operation,
    },
    /// A component parameter.
    Parameter {
        /// `#/components/parameters/<name>`
        reference: String,
        /// The parameter itself.
        parameter: &'a Parameter,
    },
    /// A component request body.
    RequestBody {
        /// `#/components/requestBodies/<name>`
        reference: String,
        /// The request body itself.
        request_body: &'a RequestBody,
    },
    /// A component schema.
    Schema {
        /// `#/components/schemas/<name>`
        reference: String,
        /// The schema itself.
        schema: &'a SchemaNode,
    },
}

impl Event<'_> {
    /// Discriminant of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Operation { .. } => EventKind::Operation,
            Event::Parameter { .. } => EventKind::Parameter,
            Event::RequestBody { .. } => EventKind::RequestBody,
            Event::Schema { .. } => EventKind::Schema,
        }
    }

    /// The `$ref` of the component this event describes, if any.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Event::Operation { .. } => None,
            Event::Parameter { reference, .. }
            | Event::RequestBody { reference, .. }
            | Event::Schema { reference, .. } => Some(reference),
        }
    }
}

/// Pointer prefix of component schemas.
pub const SCHEMAS_PREFIX: &str = "#/components/schemas/";
/// Pointer prefix of component parameters.
pub const PARAMETERS_PREFIX: &str = "#/components/parameters/";
/// Pointer prefix of component request bodies.
pub const REQUEST_BODIES_PREFIX: &str = "#/components/requestBodies/";

/// Escape a component name for use as a JSON-pointer segment.
pub fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Undo [`escape_pointer`].
pub fn unescape_pointer(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

impl IrDocument {
    /// Parse an IR document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// All events in document order: component schemas, component
    /// parameters, component request bodies, then operations.
    pub fn events(&self) -> impl Iterator<Item = Event<'_>> + '_ {
        let components = &self.components;

        let schemas = components.schemas.iter().map(|(name, schema)| Event::Schema {
            reference: format!("{SCHEMAS_PREFIX}{}", escape_pointer(name)),
            schema,
        });
        let parameters = components
            .parameters
            .iter()
            .map(|(name, parameter)| Event::Parameter {
                reference: format!("{PARAMETERS_PREFIX}{}", escape_pointer(name)),
                parameter,
            });
        let request_bodies =
            components
                .request_bodies
                .iter()
                .map(|(name, request_body)| Event::RequestBody {
                    reference: format!("{REQUEST_BODIES_PREFIX}{}", escape_pointer(name)),
                    request_body,
                });
        let operations = self
            .operations
            .iter()
            .map(|operation| Event::Operation { operation });

        schemas
            .chain(parameters)
            .chain(request_bodies)
            .chain(operations)
    }
}
