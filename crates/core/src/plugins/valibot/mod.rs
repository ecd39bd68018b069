//! Valibot validator plugin.
//!
//! Emits one `export const` per reusable component and, per operation, a
//! request and a response schema, all into `valibot.ts`.

pub mod config;
mod number;
pub mod operation;
pub mod schema;

use schemac_ir::{Event, EventKind};
use serde_json::Value;

use self::config::{ValibotConfig, ValibotUserConfig};
use self::schema::{SchemaCompiler, State};
use crate::dialect;
use crate::error::{GenerateError, Result};
use crate::plugin::{Plugin, PluginContext, PluginDescriptor};

/// Plugin name, also the default output key.
pub const NAME: &str = "valibot";

/// Valibot schema generator.
#[derive(Debug)]
pub struct ValibotPlugin {
    descriptor: PluginDescriptor,
    config: ValibotConfig,
}

impl ValibotPlugin {
    /// Plugin over already-resolved options.
    pub fn new(config: ValibotConfig) -> Self {
        Self {
            descriptor: PluginDescriptor {
                name: NAME.to_string(),
                dependencies: Vec::new(),
                output: config.output.clone(),
            },
            config,
        }
    }

    /// Build from the user's JSON options, `None` meaning all defaults.
    pub fn from_json(value: Option<Value>) -> Result<Self> {
        let user = value
            .map(serde_json::from_value::<ValibotUserConfig>)
            .transpose()
            .map_err(|err| GenerateError::Config(format!("{NAME}: {err}")))?;
        Ok(Self::new(ValibotConfig::resolve(user)))
    }

    /// Resolved options.
    pub fn config(&self) -> &ValibotConfig {
        &self.config
    }
}

impl Plugin for ValibotPlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }

    fn handle(&self, context: &mut PluginContext<'_>) -> Result<()> {
        context.file().import(dialect::import());

        let document = context.document();
        let config = &self.config;
        let kinds = [
            EventKind::Operation,
            EventKind::Parameter,
            EventKind::RequestBody,
            EventKind::Schema,
        ];

        context.for_each(&kinds, |file, event| {
            let mut compiler = SchemaCompiler::new(file, document, config);
            match event {
                Event::Operation { operation } => compiler.compile_operation(operation),
                Event::Parameter {
                    reference,
                    parameter,
                } => {
                    let mut state = State::new(&config.definitions);
                    compiler.compile_declaration(reference, &parameter.schema, &mut state)
                }
                Event::RequestBody {
                    reference,
                    request_body,
                } => {
                    let mut state = State::new(&config.definitions);
                    compiler.compile_declaration(reference, &request_body.schema, &mut state)
                }
                Event::Schema { reference, schema } => {
                    let mut state = State::new(&config.definitions);
                    compiler.compile_declaration(reference, schema, &mut state)
                }
            }
        })
    }
}
