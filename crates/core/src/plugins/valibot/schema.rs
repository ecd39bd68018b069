//! IR schema node → Valibot expression compiler.
//!
//! [`SchemaCompiler::compile`] returns the pipe sequence for a node: a base
//! schema followed by refinements. When the node is compiled under a
//! reference whose name is minted by that very call, the result is emitted
//! as an exported declaration instead and the returned sequence is empty.
//!
//! Recursive schemas are handled with a per-event tracker of references
//! currently being compiled. A reference met while it is still on the
//! tracker is wrapped in `v.lazy(() => name)` and the enclosing declaration
//! gets the explicit `v.GenericSchema` annotation.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::ops::{Deref, DerefMut};

use schemac_ir::{AccessScope, LogicalOperator, ResolveRef, SchemaKind, SchemaNode, deduplicate};
use serde_json::Value;
use tracing::{debug, warn};

use super::config::ValibotConfig;
use super::number::{bound, integer_format, needs_big_int, number_literal_expr, number_value};
use crate::case::{StringCase, StringName};
use crate::config::NamingConfig;
use crate::dialect::{self, Action, Schema, action, pipe, schema, unknown};
use crate::error::Result;
use crate::file::{GeneratedFile, Identifier};
use crate::ts::utils::{escape_comment, object_key, value_to_expr};
use crate::ts::{PropKey, TsExpr, TsLiteral, TsParam, TsStmt};

/// Mutable state for one event.
#[derive(Debug)]
pub struct State {
    circular_reference_tracker: HashSet<String>,
    /// Set once a lazy reference is emitted; read by the declaration that
    /// closes the event.
    pub has_circular_reference: bool,
    /// Case for names minted while following references.
    pub name_case: StringCase,
    /// Transform for names minted while following references.
    pub name_transformer: StringName,
}

impl State {
    /// Fresh state naming references through `naming`.
    pub fn new(naming: &NamingConfig) -> Self {
        Self {
            circular_reference_tracker: HashSet::new(),
            has_circular_reference: false,
            name_case: naming.case,
            name_transformer: naming.name.clone(),
        }
    }

    /// True while `reference` is being compiled further up the stack.
    pub fn is_tracking(&self, reference: &str) -> bool {
        self.circular_reference_tracker.contains(reference)
    }
}

/// Keeps `reference` on the tracker for as long as it lives, including
/// early returns through `?`.
struct Tracked<'s> {
    state: &'s mut State,
    reference: Option<String>,
}

impl<'s> Tracked<'s> {
    fn enter(state: &'s mut State, reference: Option<&str>) -> Self {
        let reference = reference
            .filter(|reference| state.circular_reference_tracker.insert((*reference).to_string()))
            .map(str::to_string);
        Self { state, reference }
    }
}

impl Deref for Tracked<'_> {
    type Target = State;

    fn deref(&self) -> &State {
        self.state
    }
}

impl DerefMut for Tracked<'_> {
    fn deref_mut(&mut self) -> &mut State {
        self.state
    }
}

impl Drop for Tracked<'_> {
    fn drop(&mut self) {
        if let Some(reference) = self.reference.take() {
            self.state.circular_reference_tracker.remove(&reference);
        }
    }
}

/// Per-call options for [`SchemaCompiler::compile`].
#[derive(Debug, Default)]
pub struct CompileContext<'c> {
    /// Wrap the result in `v.optional(...)`.
    pub optional: bool,
    /// Compile as the declaration for this reference.
    pub reference: Option<&'c str>,
    /// Name already looked up for `reference`.
    pub identifier: Option<Identifier>,
}

impl<'c> CompileContext<'c> {
    /// Context that emits `reference` as a named declaration.
    pub fn declaration(reference: &'c str) -> Self {
        Self {
            reference: Some(reference),
            ..Self::default()
        }
    }

    fn optional(optional: bool) -> Self {
        Self {
            optional,
            ..Self::default()
        }
    }
}

/// Compiles IR nodes into `file`, resolving references through `resolver`.
pub struct SchemaCompiler<'a, 'f> {
    pub(super) file: &'f mut GeneratedFile,
    pub(super) resolver: &'a dyn ResolveRef,
    pub(super) config: &'a ValibotConfig,
}

impl fmt::Debug for SchemaCompiler<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaCompiler")
            .field("file", &self.file.id())
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

impl<'a, 'f> SchemaCompiler<'a, 'f> {
    /// Compiler writing declarations into `file`.
    pub fn new(file: &'f mut GeneratedFile, resolver: &'a dyn ResolveRef, config: &'a ValibotConfig) -> Self {
        Self {
            file,
            resolver,
            config,
        }
    }

    /// Compile a reusable component into its named declaration. A component
    /// already emitted while resolving an earlier reference is skipped.
    pub fn compile_declaration(
        &mut self,
        reference: &str,
        node: &SchemaNode,
        state: &mut State,
    ) -> Result<()> {
        let identifier =
            self.file
                .identifier(reference, state.name_case, &state.name_transformer, true);
        if !identifier.created {
            debug!(reference, "already emitted");
            return Ok(());
        }
        let context = CompileContext {
            reference: Some(reference),
            identifier: Some(identifier),
            ..CompileContext::default()
        };
        self.compile(node, context, state)?;
        Ok(())
    }

    /// Pipe sequence for `node`, or nothing when `node` was emitted as a
    /// declaration under `context.reference`.
    pub fn compile(
        &mut self,
        node: &SchemaNode,
        context: CompileContext<'_>,
        state: &mut State,
    ) -> Result<Vec<TsExpr>> {
        let identifier = match (context.reference, context.identifier) {
            (Some(reference), None) => Some(self.file.identifier(
                reference,
                state.name_case,
                &state.name_transformer,
                true,
            )),
            (_, identifier) => identifier,
        };

        let (mut pipes, node) = {
            let mut tracked = Tracked::enter(state, context.reference);
            self.dispatch(node, &mut tracked)?
        };

        if !pipes.is_empty() {
            if self.config.metadata
                && let Some(description) = &node.description
            {
                pipes.push(action(
                    Action::Metadata,
                    vec![TsExpr::Object(vec![(
                        PropKey::Ident("description".to_string()),
                        TsExpr::string(description.as_str()),
                    )])],
                ));
            }

            if node.access_scope == Some(AccessScope::Read) {
                pipes.push(action(Action::Readonly, Vec::new()));
            }

            if let Some(default) = &node.default {
                pipes = vec![schema(Schema::Optional, vec![pipe(pipes), default_literal(&node, default)])];
            } else if context.optional {
                pipes = vec![schema(Schema::Optional, vec![pipe(pipes)])];
            }
        }

        if let Some(Identifier {
            name: Some(name),
            created: true,
        }) = identifier
        {
            if self.config.comments {
                let doc = schema_comment(&node);
                if !doc.is_empty() {
                    self.file.add(TsStmt::Doc(doc));
                }
            }
            debug!(name = %name, lazy = state.has_circular_reference, "emitting schema");
            self.file.add(TsStmt::Const {
                export: true,
                name,
                ty: state.has_circular_reference.then(dialect::top_type),
                init: pipe(pipes),
            });
            return Ok(Vec::new());
        }

        Ok(pipes)
    }

    /// Base schema and node-specific refinements, plus the node the
    /// remaining refinements should read from.
    fn dispatch<'n>(
        &mut self,
        node: &'n SchemaNode,
        state: &mut State,
    ) -> Result<(Vec<TsExpr>, Cow<'n, SchemaNode>)> {
        if let Some(reference) = node.reference.as_deref()
            && node.is_reference()
        {
            return Ok((self.reference(reference, state)?, Cow::Borrowed(node)));
        }

        if let Some(kind) = node.kind {
            return Ok((vec![self.kinded(node, kind, state)?], Cow::Borrowed(node)));
        }

        if node.is_composition() {
            let mut current = deduplicate(node);
            loop {
                if !current.is_composition() {
                    let (pipes, lifted) = self.dispatch(&current, state)?;
                    return Ok((pipes, Cow::Owned(lifted.into_owned())));
                }
                let next = deduplicate(&current);
                if next == current {
                    break;
                }
                current = next;
            }

            let mut members = Vec::new();
            for item in current.items.iter().flatten() {
                members.push(pipe(self.compile(item, CompileContext::default(), state)?));
            }
            let combined = match current.logical_operator {
                Some(LogicalOperator::And) => schema(Schema::Intersect, vec![TsExpr::Array(members)]),
                _ => schema(Schema::Union, vec![TsExpr::Array(members)]),
            };
            return Ok((vec![combined], Cow::Owned(current)));
        }

        Ok((vec![unknown()], Cow::Borrowed(node)))
    }

    fn reference(&mut self, reference: &str, state: &mut State) -> Result<Vec<TsExpr>> {
        let is_circular = state.is_tracking(reference);
        let mut pipes = Vec::new();

        let mut identifier =
            self.file
                .identifier(reference, state.name_case, &state.name_transformer, false);
        if identifier.name.is_none() {
            let resolver = self.resolver;
            let target = resolver.resolve(reference)?;
            pipes.extend(self.compile(target, CompileContext::declaration(reference), state)?);
            identifier =
                self.file
                    .identifier(reference, state.name_case, &state.name_transformer, false);
        }

        if let Some(name) = identifier.name {
            if is_circular {
                pipes.push(schema(Schema::Lazy, vec![TsExpr::thunk(TsExpr::ident(name))]));
                state.has_circular_reference = true;
            } else {
                pipes.push(TsExpr::ident(name));
            }
        }
        Ok(pipes)
    }

    fn kinded(&mut self, node: &SchemaNode, kind: SchemaKind, state: &mut State) -> Result<TsExpr> {
        if let Some(literal) = const_literal(node, kind) {
            return Ok(literal);
        }

        Ok(match kind {
            SchemaKind::Array => self.array(node, state)?,
            SchemaKind::Boolean => schema(Schema::Boolean, Vec::new()),
            SchemaKind::Enum => enumeration(node),
            SchemaKind::Integer | SchemaKind::Number => number(node, kind),
            SchemaKind::Never => schema(Schema::Never, Vec::new()),
            SchemaKind::Null => schema(Schema::Null, Vec::new()),
            SchemaKind::Object => self.object(node, state)?,
            SchemaKind::String if needs_big_int(node.format.as_deref()) => number(node, SchemaKind::Integer),
            SchemaKind::String => string(node),
            SchemaKind::Tuple => self.tuple(node, state)?,
            SchemaKind::Undefined => schema(Schema::Undefined, Vec::new()),
            SchemaKind::Unknown => unknown(),
            SchemaKind::Void => schema(Schema::Void, Vec::new()),
        })
    }

    fn array(&mut self, node: &SchemaNode, state: &mut State) -> Result<TsExpr> {
        let mut pipes = Vec::new();

        let element = match node.items.as_deref() {
            None | Some([]) => unknown(),
            Some(_) => {
                let deduped = deduplicate(node);
                let mut members = Vec::new();
                for item in deduped.items.iter().flatten() {
                    members.push(pipe(self.compile(item, CompileContext::default(), state)?));
                }
                if members.len() == 1 {
                    members.remove(0)
                } else {
                    debug!(items = members.len(), "array with several item schemas accepts any element");
                    unknown()
                }
            }
        };
        pipes.push(schema(Schema::Array, vec![element]));
        pipes.extend(length_actions(node.min_items, node.max_items));

        Ok(pipe(pipes))
    }

    fn object(&mut self, node: &SchemaNode, state: &mut State) -> Result<TsExpr> {
        let mut properties = Vec::new();
        for (name, property) in node.properties.iter().flatten() {
            let compiled = self.compile(property, CompileContext::optional(!node.is_required(name)), state)?;
            properties.push((object_key(name), pipe(compiled)));
        }

        if properties.is_empty()
            && let Some(additional) = node.additional_properties.as_deref()
            && additional.kind == Some(SchemaKind::Object)
        {
            let value = pipe(self.compile(additional, CompileContext::default(), state)?);
            return Ok(schema(
                Schema::Record,
                vec![schema(Schema::String, Vec::new()), value],
            ));
        }

        Ok(schema(Schema::Object, vec![TsExpr::Object(properties)]))
    }

    fn tuple(&mut self, node: &SchemaNode, state: &mut State) -> Result<TsExpr> {
        let Some(items) = node.items.as_ref() else {
            return Ok(unknown());
        };
        let mut members = Vec::with_capacity(items.len());
        for item in items {
            members.push(pipe(self.compile(item, CompileContext::default(), state)?));
        }
        Ok(schema(Schema::Tuple, vec![TsExpr::Array(members)]))
    }
}

/// A `const` on a kind that honours it replaces every other constraint.
fn const_literal(node: &SchemaNode, kind: SchemaKind) -> Option<TsExpr> {
    let value = node.const_value.as_ref()?;
    let format = node.format.as_deref();
    let literal = |expr| schema(Schema::Literal, vec![expr]);

    match (kind, value) {
        (SchemaKind::Boolean, Value::Bool(b)) => Some(literal(TsExpr::Literal(TsLiteral::Bool(*b)))),
        (SchemaKind::Integer | SchemaKind::Number, value) if !value.is_null() => {
            Some(literal(number_literal_expr(value, format)))
        }
        (SchemaKind::String, value) if needs_big_int(format) && !value.is_null() => {
            Some(literal(number_literal_expr(value, format)))
        }
        (SchemaKind::String, Value::String(s)) => Some(literal(TsExpr::string(s.as_str()))),
        (SchemaKind::Array | SchemaKind::Tuple, Value::Array(values)) => Some(schema(
            Schema::Tuple,
            vec![TsExpr::Array(
                values.iter().map(|value| literal(value_to_expr(value))).collect(),
            )],
        )),
        _ => None,
    }
}

fn default_literal(node: &SchemaNode, value: &Value) -> TsExpr {
    let format = node.format.as_deref();
    let numeric = matches!(node.kind, Some(SchemaKind::Integer | SchemaKind::Number))
        || (node.kind == Some(SchemaKind::String) && needs_big_int(format));
    if numeric {
        number_literal_expr(value, format)
    } else {
        value_to_expr(value)
    }
}

fn enumeration(node: &SchemaNode) -> TsExpr {
    let mut members = Vec::new();
    let mut nullable = false;

    for item in node.items.iter().flatten() {
        match (item.kind, item.const_value.as_ref()) {
            (Some(SchemaKind::String), Some(Value::String(value))) => {
                members.push(TsExpr::string(value.as_str()));
            }
            (Some(SchemaKind::Null), _) | (_, Some(Value::Null)) => nullable = true,
            _ => {}
        }
    }

    if members.is_empty() {
        warn!("enum without string members accepts any value");
        return unknown();
    }

    let picklist = schema(Schema::Picklist, vec![TsExpr::Array(members)]);
    if nullable {
        schema(Schema::Nullable, vec![picklist])
    } else {
        picklist
    }
}

fn number(node: &SchemaNode, kind: SchemaKind) -> TsExpr {
    let format = node.format.as_deref();
    let big = needs_big_int(format);
    let mut pipes = Vec::new();

    if big {
        pipes.push(schema(
            Schema::Union,
            vec![TsExpr::Array(vec![
                schema(Schema::Number, Vec::new()),
                schema(Schema::String, Vec::new()),
                schema(Schema::BigInt, Vec::new()),
            ])],
        ));
        pipes.push(action(
            Action::Transform,
            vec![TsExpr::Arrow {
                params: vec![TsParam::named("x")],
                body: Box::new(TsExpr::call(TsExpr::ident("BigInt"), vec![TsExpr::ident("x")])),
            }],
        ));
    } else {
        pipes.push(schema(Schema::Number, Vec::new()));
        if kind == SchemaKind::Integer {
            pipes.push(action(Action::Integer, Vec::new()));
        }
    }

    if let Some(range) = format.and_then(integer_format) {
        pipes.push(action(
            Action::MinValue,
            vec![bound(range.min, big), TsExpr::string(range.min_error)],
        ));
        pipes.push(action(
            Action::MaxValue,
            vec![bound(range.max, big), TsExpr::string(range.max_error)],
        ));
    }

    if let Some(value) = node.exclusive_minimum {
        pipes.push(action(Action::GtValue, vec![number_value(value, big)]));
    } else if let Some(value) = node.minimum {
        pipes.push(action(Action::MinValue, vec![number_value(value, big)]));
    }

    if let Some(value) = node.exclusive_maximum {
        pipes.push(action(Action::LtValue, vec![number_value(value, big)]));
    } else if let Some(value) = node.maximum {
        pipes.push(action(Action::MaxValue, vec![number_value(value, big)]));
    }

    pipe(pipes)
}

fn string(node: &SchemaNode) -> TsExpr {
    let mut pipes = vec![schema(Schema::String, Vec::new())];

    if let Some(format) = node.format.as_deref()
        && let Some(refinement) = Action::for_string_format(format)
    {
        pipes.push(action(refinement, Vec::new()));
    }

    pipes.extend(length_actions(node.min_length, node.max_length));

    if let Some(pattern) = node.pattern.as_deref().filter(|p| !p.is_empty()) {
        pipes.push(action(Action::Regex, vec![TsExpr::Regex(pattern.to_owned())]));
    }

    pipe(pipes)
}

/// Equal bounds collapse into an exact length.
fn length_actions(min: Option<u64>, max: Option<u64>) -> Vec<TsExpr> {
    let count = |n: u64| TsExpr::Literal(TsLiteral::Number(n as f64));
    match (min, max) {
        (Some(min), Some(max)) if min == max => vec![action(Action::Length, vec![count(min)])],
        (min, max) => min
            .map(|n| action(Action::MinLength, vec![count(n)]))
            .into_iter()
            .chain(max.map(|n| action(Action::MaxLength, vec![count(n)])))
            .collect(),
    }
}

/// JSDoc lines for a declaration: title, description, deprecation.
fn schema_comment(node: &SchemaNode) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(title) = &node.title {
        lines.push(escape_comment(title));
    }
    if let Some(description) = &node.description {
        lines.extend(escape_comment(description).lines().map(str::to_string));
    }
    if node.deprecated == Some(true) {
        lines.push("@deprecated".to_string());
    }
    lines
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ts::Emit;
    use schemac_ir::IrDocument;
    use serde_json::json;

    fn document(schemas: Value) -> IrDocument {
        serde_json::from_value(json!({ "components": { "schemas": schemas } })).unwrap()
    }

    fn node(value: Value) -> SchemaNode {
        serde_json::from_value(value).unwrap()
    }

    /// Compile every schema component, as the plugin does, and render the body.
    fn render(document: &IrDocument, config: &ValibotConfig) -> String {
        let mut file = GeneratedFile::new("valibot");
        for (name, schema) in &document.components.schemas {
            let mut state = State::new(&config.definitions);
            let mut compiler = SchemaCompiler::new(&mut file, document, config);
            compiler
                .compile_declaration(&format!("#/components/schemas/{name}"), schema, &mut state)
                .unwrap();
        }
        file.statements().iter().map(Emit::emit).collect::<Vec<_>>().join("")
    }

    /// Compile an anonymous node to a single expression.
    fn inline(value: Value) -> String {
        let document = IrDocument::default();
        let config = ValibotConfig::default();
        inline_with(&document, &config, value)
    }

    fn inline_with(document: &IrDocument, config: &ValibotConfig, value: Value) -> String {
        let mut file = GeneratedFile::new("valibot");
        let mut state = State::new(&config.definitions);
        let mut compiler = SchemaCompiler::new(&mut file, document, config);
        let pipes = compiler
            .compile(&node(value), CompileContext::default(), &mut state)
            .unwrap();
        pipe(pipes).emit()
    }

    #[test]
    fn test_declaration_and_reference() {
        let document = document(json!({
            "Pet": {
                "type": "object",
                "properties": { "name": { "type": "string" } },
                "required": ["name"]
            },
            "Owner": {
                "type": "object",
                "properties": { "pet": { "$ref": "#/components/schemas/Pet" } }
            }
        }));
        assert_eq!(
            render(&document, &ValibotConfig::default()),
            "export const vPet = v.object({ name: v.string() });\n\
             export const vOwner = v.object({ pet: v.optional(vPet) });\n"
        );
    }

    #[test]
    fn test_forward_reference_is_emitted_first_and_once() {
        let document = document(json!({
            "Owner": {
                "type": "object",
                "properties": { "pet": { "$ref": "#/components/schemas/Pet" } },
                "required": ["pet"]
            },
            "Pet": { "type": "string" }
        }));
        assert_eq!(
            render(&document, &ValibotConfig::default()),
            "export const vPet = v.string();\n\
             export const vOwner = v.object({ pet: vPet });\n"
        );
    }

    #[test]
    fn test_self_reference_is_lazy() {
        let document = document(json!({
            "A": {
                "type": "object",
                "properties": { "child": { "$ref": "#/components/schemas/A" } }
            }
        }));
        assert_eq!(
            render(&document, &ValibotConfig::default()),
            "export const vA: v.GenericSchema = v.object({ child: v.optional(v.lazy(() => vA)) });\n"
        );
    }

    #[test]
    fn test_mutual_reference() {
        let document = document(json!({
            "A": {
                "type": "object",
                "properties": { "b": { "$ref": "#/components/schemas/B" } }
            },
            "B": {
                "type": "object",
                "properties": { "a": { "$ref": "#/components/schemas/A" } }
            }
        }));
        let output = render(&document, &ValibotConfig::default());
        assert_eq!(
            output,
            "export const vB: v.GenericSchema = v.object({ a: v.optional(v.lazy(() => vA)) });\n\
             export const vA: v.GenericSchema = v.object({ b: v.optional(vB) });\n"
        );
        assert_eq!(output.matches("export const vB").count(), 1);
    }

    #[test]
    fn test_longer_cycle_terminates() {
        let document = document(json!({
            "A": { "type": "object", "properties": { "b": { "$ref": "#/components/schemas/B" } } },
            "B": { "type": "array", "items": [{ "$ref": "#/components/schemas/C" }] },
            "C": {
                "items": [{ "$ref": "#/components/schemas/A" }, { "type": "null" }],
                "logicalOperator": "or"
            }
        }));
        let config = ValibotConfig::default();
        let mut file = GeneratedFile::new("valibot");
        let mut state = State::new(&config.definitions);
        SchemaCompiler::new(&mut file, &document, &config)
            .compile_declaration(
                "#/components/schemas/A",
                &document.components.schemas["A"],
                &mut state,
            )
            .unwrap();

        assert!(state.has_circular_reference);
        let output: String = file.statements().iter().map(Emit::emit).collect();
        assert_eq!(
            output,
            "export const vC: v.GenericSchema = v.union([v.lazy(() => vA), v.null()]);\n\
             export const vB: v.GenericSchema = v.array(vC);\n\
             export const vA: v.GenericSchema = v.object({ b: v.optional(vB) });\n"
        );
    }

    #[test]
    fn test_dangling_reference_is_fatal() {
        let document = document(json!({
            "A": { "type": "array", "items": [{ "$ref": "#/components/schemas/Missing" }] }
        }));
        let config = ValibotConfig::default();
        let mut file = GeneratedFile::new("valibot");
        let mut state = State::new(&config.definitions);
        let mut compiler = SchemaCompiler::new(&mut file, &document, &config);
        let err = compiler
            .compile_declaration(
                "#/components/schemas/A",
                &document.components.schemas["A"],
                &mut state,
            )
            .unwrap_err();
        assert!(err.to_string().contains("#/components/schemas/Missing"));
        assert!(!state.is_tracking("#/components/schemas/A"));
    }

    #[test]
    fn test_duplicate_union_members_collapse() {
        assert_eq!(
            inline(json!({
                "items": [{ "type": "string" }, { "type": "string" }],
                "logicalOperator": "or"
            })),
            "v.string()"
        );
        assert_eq!(
            inline(json!({
                "items": [{ "type": "string" }, { "type": "number" }, { "type": "string" }],
                "logicalOperator": "or"
            })),
            "v.union([v.string(), v.number()])"
        );
        assert_eq!(
            inline(json!({
                "items": [{ "type": "object" }, { "type": "null" }],
                "logicalOperator": "and"
            })),
            "v.intersect([v.object({}), v.null()])"
        );
    }

    #[test]
    fn test_duplicate_nested_members_collapse() {
        let nullable = json!({
            "items": [{ "type": "string" }, { "type": "null" }],
            "logicalOperator": "or"
        });
        assert_eq!(
            inline(json!({ "items": [nullable.clone(), nullable], "logicalOperator": "or" })),
            "v.union([v.string(), v.null()])"
        );

        let single = json!({ "type": "tuple", "items": [{ "type": "string" }] });
        assert_eq!(
            inline(json!({ "items": [single.clone(), single], "logicalOperator": "or" })),
            "v.tuple([v.string()])"
        );
    }

    #[test]
    fn test_lifted_member_keeps_outer_default() {
        assert_eq!(
            inline(json!({
                "items": [{ "type": "string" }],
                "default": "x"
            })),
            "v.optional(v.string(), \"x\")"
        );
    }

    #[test]
    fn test_const_dominates_constraints() {
        assert_eq!(
            inline(json!({ "type": "string", "const": "x", "minLength": 3, "format": "email" })),
            "v.literal(\"x\")"
        );
        assert_eq!(
            inline(json!({ "type": "integer", "const": 5, "minimum": 10 })),
            "v.literal(5)"
        );
        assert_eq!(inline(json!({ "type": "boolean", "const": true })), "v.literal(true)");
        assert_eq!(
            inline(json!({ "type": "tuple", "const": ["a", 1] })),
            "v.tuple([v.literal(\"a\"), v.literal(1)])"
        );
        assert_eq!(
            inline(json!({ "type": "integer", "format": "int64", "const": 7 })),
            "v.literal(BigInt(\"7\"))"
        );
    }

    #[test]
    fn test_int64_property() {
        let document = document(json!({
            "Item": {
                "type": "object",
                "properties": { "id": { "type": "integer", "format": "int64" } },
                "required": ["id"]
            }
        }));
        assert_eq!(
            render(&document, &ValibotConfig::default()),
            "export const vItem = v.object({ id: v.pipe(v.union([v.number(), v.string(), v.bigInt()]), \
             v.transform((x) => BigInt(x)), \
             v.minValue(BigInt(\"-9223372036854775808\"), \"Invalid value: Expected int64 to be >= -2^63\"), \
             v.maxValue(BigInt(\"9223372036854775807\"), \"Invalid value: Expected int64 to be <= 2^63-1\")) });\n"
        );
    }

    #[test]
    fn test_integer_bounds() {
        assert_eq!(
            inline(json!({ "type": "integer", "format": "int32" })),
            "v.pipe(v.number(), v.integer(), \
             v.minValue(-2147483648, \"Invalid value: Expected int32 to be >= -2^31\"), \
             v.maxValue(2147483647, \"Invalid value: Expected int32 to be <= 2^31-1\"))"
        );
        assert_eq!(
            inline(json!({ "type": "number", "exclusiveMinimum": 0, "minimum": 5, "maximum": 10.5 })),
            "v.pipe(v.number(), v.gtValue(0), v.maxValue(10.5))"
        );
    }

    #[test]
    fn test_fractional_bound_on_wide_integer() {
        assert_eq!(
            inline(json!({ "type": "integer", "format": "int64", "exclusiveMinimum": 0.5, "maximum": 100 })),
            "v.pipe(v.union([v.number(), v.string(), v.bigInt()]), \
             v.transform((x) => BigInt(x)), \
             v.minValue(BigInt(\"-9223372036854775808\"), \"Invalid value: Expected int64 to be >= -2^63\"), \
             v.maxValue(BigInt(\"9223372036854775807\"), \"Invalid value: Expected int64 to be <= 2^63-1\"), \
             v.gtValue(0.5), v.maxValue(BigInt(\"100\")))"
        );
    }

    #[test]
    fn test_string_refinements() {
        assert_eq!(
            inline(json!({ "type": "string", "minLength": 5, "maxLength": 5 })),
            "v.pipe(v.string(), v.length(5))"
        );
        assert_eq!(
            inline(json!({ "type": "string", "format": "uuid", "minLength": 1, "pattern": "^a/b$" })),
            "v.pipe(v.string(), v.uuid(), v.minLength(1), v.regex(/^a\\/b$/))"
        );
        assert_eq!(inline(json!({ "type": "string", "pattern": "" })), "v.string()");
        assert_eq!(
            inline(json!({ "type": "string", "format": "uint64" })),
            "v.pipe(v.union([v.number(), v.string(), v.bigInt()]), \
             v.transform((x) => BigInt(x)), \
             v.minValue(BigInt(\"0\"), \"Invalid value: Expected uint64 to be >= 0\"), \
             v.maxValue(BigInt(\"18446744073709551615\"), \"Invalid value: Expected uint64 to be <= 2^64-1\"))"
        );
    }

    #[test]
    fn test_arrays() {
        assert_eq!(inline(json!({ "type": "array" })), "v.array(v.unknown())");
        assert_eq!(
            inline(json!({
                "type": "array",
                "items": [{ "type": "string" }, { "type": "string" }],
                "minItems": 1
            })),
            "v.pipe(v.array(v.string()), v.minLength(1))"
        );
        assert_eq!(
            inline(json!({ "type": "array", "items": [{ "type": "string" }, { "type": "number" }] })),
            "v.array(v.unknown())"
        );
    }

    #[test]
    fn test_enums() {
        assert_eq!(
            inline(json!({
                "type": "enum",
                "items": [
                    { "type": "string", "const": "a" },
                    { "type": "null", "const": null }
                ]
            })),
            "v.nullable(v.picklist([\"a\"]))"
        );
        assert_eq!(
            inline(json!({ "type": "enum", "items": [{ "type": "number", "const": 1 }] })),
            "v.unknown()"
        );
    }

    #[test]
    fn test_objects() {
        assert_eq!(
            inline(json!({
                "type": "object",
                "additionalProperties": { "type": "object" }
            })),
            "v.record(v.string(), v.object({}))"
        );
        assert_eq!(
            inline(json!({
                "type": "object",
                "properties": {
                    "my-key": { "type": "string", "accessScope": "read" },
                    "200": { "type": "boolean", "default": false }
                }
            })),
            "v.object({ \"my-key\": v.optional(v.pipe(v.string(), v.readonly())), 200: v.optional(v.boolean(), false) })"
        );
    }

    #[test]
    fn test_primitives() {
        assert_eq!(inline(json!({ "type": "null" })), "v.null()");
        assert_eq!(inline(json!({ "type": "never" })), "v.never()");
        assert_eq!(inline(json!({ "type": "void" })), "v.void()");
        assert_eq!(inline(json!({ "type": "undefined" })), "v.undefined()");
        assert_eq!(inline(json!({})), "v.unknown()");
        assert_eq!(inline(json!({ "type": "tuple" })), "v.unknown()");
        assert_eq!(
            inline(json!({ "type": "tuple", "items": [{ "type": "string" }, { "type": "string" }] })),
            "v.tuple([v.string(), v.string()])"
        );
    }

    #[test]
    fn test_metadata_and_comments() {
        let config = ValibotConfig {
            metadata: true,
            ..ValibotConfig::default()
        };
        let document = document(json!({
            "Tag": {
                "type": "string",
                "title": "Tag",
                "description": "A tag */ name",
                "deprecated": true
            }
        }));
        assert_eq!(
            render(&document, &config),
            "/**\n * Tag\n * A tag *\\/ name\n * @deprecated\n */\n\
             export const vTag = v.pipe(v.string(), v.metadata({ description: \"A tag */ name\" }));\n"
        );

        let quiet = ValibotConfig {
            comments: false,
            ..ValibotConfig::default()
        };
        assert_eq!(render(&document, &quiet), "export const vTag = v.string();\n");
    }

    #[test]
    fn test_default_uses_number_rules() {
        assert_eq!(
            inline(json!({ "type": "integer", "format": "int64", "default": 3 })),
            "v.optional(v.pipe(v.union([v.number(), v.string(), v.bigInt()]), \
             v.transform((x) => BigInt(x)), \
             v.minValue(BigInt(\"-9223372036854775808\"), \"Invalid value: Expected int64 to be >= -2^63\"), \
             v.maxValue(BigInt(\"9223372036854775807\"), \"Invalid value: Expected int64 to be <= 2^63-1\")), BigInt(\"3\"))"
        );
    }
}
