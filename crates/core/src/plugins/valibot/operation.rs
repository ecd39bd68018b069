//! Per-operation request and response declarations.

use indexmap::IndexMap;
use schemac_ir::{Operation, ParameterLocation, SchemaKind, SchemaNode};
use tracing::debug;

use super::schema::{CompileContext, SchemaCompiler, State};
use crate::config::NamingConfig;
use crate::error::Result;

/// Pseudo-references naming the synthesized per-operation schemas.
const DATA_PREFIX: &str = "#/operations/data/";
const RESPONSE_PREFIX: &str = "#/operations/response/";

/// Request sections built from parameters, keyed by property name.
const SECTIONS: [(&str, ParameterLocation); 3] = [
    ("headers", ParameterLocation::Header),
    ("path", ParameterLocation::Path),
    ("query", ParameterLocation::Query),
];

/// Everything a request carries, as one object schema.
///
/// `body`, `path` and `query` are always present and default to `never`;
/// `headers` appears only when the operation has header parameters. A
/// section is required when anything in it is required.
fn request_schema(operation: &Operation) -> SchemaNode {
    let mut properties = IndexMap::new();
    let mut required = Vec::new();

    properties.insert("body".to_string(), SchemaNode::of_kind(SchemaKind::Never));
    properties.insert("path".to_string(), SchemaNode::of_kind(SchemaKind::Never));
    properties.insert("query".to_string(), SchemaNode::of_kind(SchemaKind::Never));

    if let Some(body) = &operation.body {
        properties.insert("body".to_string(), body.schema.clone());
        if body.required {
            required.push("body".to_string());
        }
    }

    for (section, location) in SECTIONS {
        let parameters: Vec<_> = operation
            .parameters
            .iter()
            .filter(|parameter| parameter.location == location)
            .collect();
        if parameters.is_empty() {
            continue;
        }

        let mut fields = IndexMap::new();
        let mut required_fields = Vec::new();
        for parameter in parameters {
            fields.insert(parameter.name.clone(), parameter.schema.clone());
            if parameter.required {
                required_fields.push(parameter.name.clone());
            }
        }

        if !required_fields.is_empty() {
            required.push(section.to_string());
        }
        properties.insert(
            section.to_string(),
            SchemaNode {
                kind: Some(SchemaKind::Object),
                properties: Some(fields),
                required: Some(required_fields),
                ..SchemaNode::default()
            },
        );
    }

    SchemaNode {
        kind: Some(SchemaKind::Object),
        properties: Some(properties),
        required: Some(required),
        ..SchemaNode::default()
    }
}

impl SchemaCompiler<'_, '_> {
    /// Emit `<requests name>` and, when the operation has a response,
    /// `<responses name>` for one operation.
    pub fn compile_operation(&mut self, operation: &Operation) -> Result<()> {
        let config = self.config;

        if config.requests.enabled {
            let reference = format!("{DATA_PREFIX}{}", operation.id);
            self.compile_named(&reference, &request_schema(operation), &config.requests)?;
        }

        if config.responses.enabled
            && let Some(response) = &operation.response
        {
            let reference = format!("{RESPONSE_PREFIX}{}", operation.id);
            self.compile_named(&reference, response, &config.responses)?;
        } else {
            debug!(operation = %operation.id, "no response declaration");
        }

        Ok(())
    }

    fn compile_named(&mut self, reference: &str, node: &SchemaNode, naming: &NamingConfig) -> Result<()> {
        let identifier = self.file.identifier(reference, naming.case, &naming.name, true);
        if !identifier.created {
            debug!(reference, "declaration already emitted");
            return Ok(());
        }
        // references inside still resolve through the definitions naming
        let mut state = State::new(&self.config.definitions);
        let context = CompileContext {
            reference: Some(reference),
            identifier: Some(identifier),
            ..CompileContext::default()
        };
        self.compile(node, context, &mut state)?;
        Ok(())
    }
}
