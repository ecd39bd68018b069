//! TypeScript type declaration plugin.
//!
//! One `export interface` or `export type` per reusable component, written
//! to `types.ts`. Runs independently of the validator plugins.

use schemac_ir::{
    AccessScope, Event, EventKind, LogicalOperator, ResolveRef, SchemaKind, SchemaNode, deduplicate,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::case::StringCase;
use crate::config::{
    ConfigValue, Configurable, Mappers, NamingConfig, NamingPatch, merge_field, value_to_object,
};
use crate::error::{GenerateError, Result};
use crate::file::GeneratedFile;
use crate::plugin::{Plugin, PluginContext, PluginDescriptor};
use crate::ts::utils::{escape_comment, make_string_record, make_unknown_record, value_to_type};
use crate::ts::{TsLiteral, TsPrimitive, TsProp, TsStmt, TsType, TsTypeDef, TypeDefKind};

/// Plugin name.
pub const NAME: &str = "typescript";

/// Resolved options.
#[derive(Debug, Clone)]
pub struct TypeScriptConfig {
    /// Emit JSDoc comments from titles and descriptions.
    pub comments: bool,
    /// Output key; the file is `<output>.ts`.
    pub output: String,
    /// Names of the emitted types.
    pub definitions: NamingConfig,
}

impl Default for TypeScriptConfig {
    fn default() -> Self {
        Self {
            comments: true,
            output: "types".to_string(),
            definitions: NamingConfig::new(StringCase::PascalCase, "{{name}}"),
        }
    }
}

/// Options as written by the user.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypeScriptUserConfig {
    /// See [`TypeScriptConfig::comments`].
    pub comments: Option<bool>,
    /// See [`TypeScriptConfig::output`].
    pub output: Option<String>,
    /// See [`TypeScriptConfig::definitions`].
    pub definitions: Option<ConfigValue<NamingPatch>>,
}

impl Configurable for TypeScriptConfig {
    type Patch = TypeScriptUserConfig;

    fn apply_patch(&mut self, patch: TypeScriptUserConfig) {
        merge_field(&mut self.comments, patch.comments);
        merge_field(&mut self.output, patch.output);
        self.definitions = self.definitions.resolve(patch.definitions);
    }
}

/// TypeScript type generator.
#[derive(Debug)]
pub struct TypeScriptPlugin {
    descriptor: PluginDescriptor,
    config: TypeScriptConfig,
}

impl TypeScriptPlugin {
    /// Plugin over already-resolved options.
    pub fn new(config: TypeScriptConfig) -> Self {
        Self {
            descriptor: PluginDescriptor {
                name: NAME.to_string(),
                dependencies: Vec::new(),
                output: config.output.clone(),
            },
            config,
        }
    }

    /// Build from the user's JSON options.
    pub fn from_json(value: Option<Value>) -> Result<Self> {
        let user = value
            .map(serde_json::from_value::<TypeScriptUserConfig>)
            .transpose()
            .map_err(|err| GenerateError::Config(format!("{NAME}: {err}")))?;
        let config = value_to_object(
            &TypeScriptConfig::default(),
            user.map(ConfigValue::Object),
            &Mappers::default(),
        );
        Ok(Self::new(config))
    }
}

impl Plugin for TypeScriptPlugin {
    fn descriptor(&self) -> &PluginDescriptor {
        &self.descriptor
    }

    fn handle(&self, context: &mut PluginContext<'_>) -> Result<()> {
        let document = context.document();
        let config = &self.config;
        let kinds = [EventKind::Schema, EventKind::Parameter, EventKind::RequestBody];

        context.for_each(&kinds, |file, event| {
            let (reference, schema) = match event {
                Event::Schema { reference, schema } => (reference, *schema),
                Event::Parameter {
                    reference,
                    parameter,
                } => (reference, &parameter.schema),
                Event::RequestBody {
                    reference,
                    request_body,
                } => (reference, &request_body.schema),
                Event::Operation { .. } => return Ok(()),
            };

            let type_def = TypeConverter {
                file: &mut *file,
                resolver: document,
                naming: &config.definitions,
            }
            .type_def(reference, schema)?;

            if config.comments {
                let doc = comment(schema);
                if !doc.is_empty() {
                    file.add(TsStmt::Doc(doc));
                }
            }
            debug!(name = %type_def.name, "emitting type");
            file.add(TsStmt::TypeDef(type_def));
            Ok(())
        })
    }
}

/// Converts IR nodes to TypeScript types, naming referenced components
/// through the file's identifier table.
struct TypeConverter<'a, 'f> {
    file: &'f mut GeneratedFile,
    resolver: &'a dyn ResolveRef,
    naming: &'a NamingConfig,
}

impl TypeConverter<'_, '_> {
    fn name(&mut self, reference: &str) -> String {
        let identifier = self
            .file
            .identifier(reference, self.naming.case, &self.naming.name, true);
        identifier.name.unwrap_or_default()
    }

    fn type_def(&mut self, reference: &str, schema: &SchemaNode) -> Result<TsTypeDef> {
        let name = self.name(reference);

        // Plain objects become interfaces
        if schema.kind == Some(SchemaKind::Object)
            && schema.const_value.is_none()
            && schema.additional_properties.is_none()
            && let Some(properties) = &schema.properties
            && !properties.is_empty()
        {
            let properties = self.properties(schema)?;
            return Ok(TsTypeDef {
                name,
                kind: TypeDefKind::Interface { properties },
            });
        }

        let ty = self.ts_type(schema)?;
        Ok(TsTypeDef {
            name,
            kind: TypeDefKind::TypeAlias { ty },
        })
    }

    fn ts_type(&mut self, schema: &SchemaNode) -> Result<TsType> {
        if let Some(reference) = schema.reference.as_deref()
            && schema.is_reference()
        {
            self.resolver.resolve(reference)?;
            return Ok(TsType::Ref(self.name(reference)));
        }

        if let Some(value) = &schema.const_value {
            return Ok(value_to_type(value));
        }

        if schema.is_composition() {
            let deduped = deduplicate(schema);
            if !deduped.is_composition() {
                return self.ts_type(&deduped);
            }
            let mut types = Vec::new();
            for item in deduped.items.iter().flatten() {
                types.push(self.ts_type(item)?);
            }
            return Ok(match deduped.logical_operator {
                Some(LogicalOperator::And) => TsType::Intersection(types),
                _ => TsType::Union(types),
            });
        }

        let ty = match schema.kind {
            None | Some(SchemaKind::Unknown) => TsType::Primitive(TsPrimitive::Unknown),
            Some(SchemaKind::Array) => {
                let deduped = deduplicate(schema);
                let item = match deduped.items.as_deref() {
                    Some([only]) => self.ts_type(only)?,
                    _ => TsType::Primitive(TsPrimitive::Unknown),
                };
                TsType::Array(Box::new(item))
            }
            Some(SchemaKind::Boolean) => TsType::Primitive(TsPrimitive::Boolean),
            Some(SchemaKind::Enum) => enum_type(schema),
            Some(SchemaKind::Integer | SchemaKind::Number) => TsType::Primitive(TsPrimitive::Number),
            Some(SchemaKind::Never) => TsType::Primitive(TsPrimitive::Never),
            Some(SchemaKind::Null) => TsType::Primitive(TsPrimitive::Null),
            Some(SchemaKind::Object) => self.object_type(schema)?,
            Some(SchemaKind::String) => TsType::Primitive(TsPrimitive::String),
            Some(SchemaKind::Tuple) => {
                let mut types = Vec::new();
                for item in schema.items.iter().flatten() {
                    types.push(self.ts_type(item)?);
                }
                TsType::Tuple(types)
            }
            Some(SchemaKind::Undefined) => TsType::Primitive(TsPrimitive::Undefined),
            Some(SchemaKind::Void) => TsType::Primitive(TsPrimitive::Void),
        };
        Ok(ty)
    }

    fn properties(&mut self, schema: &SchemaNode) -> Result<Vec<TsProp>> {
        let mut props = Vec::new();
        for (name, property) in schema.properties.iter().flatten() {
            props.push(TsProp {
                name: name.clone(),
                ty: self.ts_type(property)?,
                optional: !schema.is_required(name),
                readonly: property.access_scope == Some(AccessScope::Read),
            });
        }
        Ok(props)
    }

    fn object_type(&mut self, schema: &SchemaNode) -> Result<TsType> {
        let has_properties = schema.properties.as_ref().is_some_and(|p| !p.is_empty());

        match (has_properties, schema.additional_properties.as_deref()) {
            (true, Some(additional)) => {
                let props = self.properties(schema)?;
                let value = self.ts_type(additional)?;
                Ok(TsType::Intersection(vec![
                    TsType::Object(props),
                    make_string_record(value),
                ]))
            }
            (true, None) => Ok(TsType::Object(self.properties(schema)?)),
            (false, Some(additional)) => Ok(make_string_record(self.ts_type(additional)?)),
            (false, None) => Ok(make_unknown_record()),
        }
    }
}

/// Literal union of an enum's members; `null` members stay `null`.
fn enum_type(schema: &SchemaNode) -> TsType {
    let mut types = Vec::new();
    for item in schema.items.iter().flatten() {
        let ty = match (&item.const_value, item.kind) {
            (Some(value), _) => value_to_type(value),
            (None, Some(SchemaKind::Null)) => TsType::Literal(TsLiteral::Null),
            (None, _) => continue,
        };
        if !types.contains(&ty) {
            types.push(ty);
        }
    }
    match types.len() {
        0 => TsType::Primitive(TsPrimitive::Unknown),
        1 => types.remove(0),
        _ => TsType::Union(types),
    }
}

fn comment(schema: &SchemaNode) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(description) = &schema.description {
        lines.push(escape_comment(description));
    }
    if schema.deprecated == Some(true) {
        lines.push("@deprecated".to_string());
    }
    lines
}
