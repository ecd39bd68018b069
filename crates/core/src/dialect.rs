//! Valibot primitive table.
//!
//! Maps the abstract schema-construction operations the compiler uses onto
//! Valibot constructor and action names. Pure data plus call builders.

use crate::ts::{ImportBinding, TsExpr, TsImport, TsType};

/// Module the generated file imports.
pub const MODULE: &str = "valibot";

/// Namespace alias every call goes through (`v.string()`).
pub const NAMESPACE: &str = "v";

/// Type used for declarations whose exact type cannot be inferred.
pub const TOP_TYPE: &str = "GenericSchema";

/// Schema constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// `v.array`
    Array,
    /// `v.bigInt`
    BigInt,
    /// `v.boolean`
    Boolean,
    /// `v.intersect`
    Intersect,
    /// `v.lazy`
    Lazy,
    /// `v.literal`
    Literal,
    /// `v.never`
    Never,
    /// `v.null`
    Null,
    /// `v.nullable`
    Nullable,
    /// `v.number`
    Number,
    /// `v.object`
    Object,
    /// `v.optional`
    Optional,
    /// `v.picklist`
    Picklist,
    /// `v.record`
    Record,
    /// `v.string`
    String,
    /// `v.tuple`
    Tuple,
    /// `v.undefined`
    Undefined,
    /// `v.union`
    Union,
    /// `v.unknown`
    Unknown,
    /// `v.void`
    Void,
}

impl Schema {
    /// Constructor name under the `v` namespace.
    pub const fn name(self) -> &'static str {
        match self {
            Schema::Array => "array",
            Schema::BigInt => "bigInt",
            Schema::Boolean => "boolean",
            Schema::Intersect => "intersect",
            Schema::Lazy => "lazy",
            Schema::Literal => "literal",
            Schema::Never => "never",
            Schema::Null => "null",
            Schema::Nullable => "nullable",
            Schema::Number => "number",
            Schema::Object => "object",
            Schema::Optional => "optional",
            Schema::Picklist => "picklist",
            Schema::Record => "record",
            Schema::String => "string",
            Schema::Tuple => "tuple",
            Schema::Undefined => "undefined",
            Schema::Union => "union",
            Schema::Unknown => "unknown",
            Schema::Void => "void",
        }
    }
}

/// Refinements and the pipe combinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `v.email`
    Email,
    /// `v.gtValue`
    GtValue,
    /// `v.integer`
    Integer,
    /// `v.ip`
    Ip,
    /// `v.isoDate`
    IsoDate,
    /// `v.isoTimestamp`
    IsoTimestamp,
    /// `v.length`
    Length,
    /// `v.ltValue`
    LtValue,
    /// `v.maxLength`
    MaxLength,
    /// `v.maxValue`
    MaxValue,
    /// `v.metadata`
    Metadata,
    /// `v.minLength`
    MinLength,
    /// `v.minValue`
    MinValue,
    /// `v.pipe`
    Pipe,
    /// `v.readonly`
    Readonly,
    /// `v.regex`
    Regex,
    /// `v.time`
    Time,
    /// `v.transform`
    Transform,
    /// `v.url`
    Url,
    /// `v.uuid`
    Uuid,
}

impl Action {
    /// Action name under the `v` namespace.
    pub const fn name(self) -> &'static str {
        match self {
            Action::Email => "email",
            Action::GtValue => "gtValue",
            Action::Integer => "integer",
            Action::Ip => "ip",
            Action::IsoDate => "isoDate",
            Action::IsoTimestamp => "isoTimestamp",
            Action::Length => "length",
            Action::LtValue => "ltValue",
            Action::MaxLength => "maxLength",
            Action::MaxValue => "maxValue",
            Action::Metadata => "metadata",
            Action::MinLength => "minLength",
            Action::MinValue => "minValue",
            Action::Pipe => "pipe",
            Action::Readonly => "readonly",
            Action::Regex => "regex",
            Action::Time => "time",
            Action::Transform => "transform",
            Action::Url => "url",
            Action::Uuid => "uuid",
        }
    }

    /// The refinement a string `format` maps to, if any.
    pub fn for_string_format(format: &str) -> Option<Self> {
        match format {
            "date" => Some(Action::IsoDate),
            "date-time" => Some(Action::IsoTimestamp),
            "ipv4" | "ipv6" => Some(Action::Ip),
            "uri" => Some(Action::Url),
            "email" => Some(Action::Email),
            "time" => Some(Action::Time),
            "uuid" => Some(Action::Uuid),
            _ => None,
        }
    }
}

fn namespaced(name: &str, args: Vec<TsExpr>) -> TsExpr {
    TsExpr::call(TsExpr::member(TsExpr::ident(NAMESPACE), name), args)
}

/// `v.<schema>(args)`
pub fn schema(schema: Schema, args: Vec<TsExpr>) -> TsExpr {
    namespaced(schema.name(), args)
}

/// `v.<action>(args)`
pub fn action(action: Action, args: Vec<TsExpr>) -> TsExpr {
    namespaced(action.name(), args)
}

/// The universal acceptor, `v.unknown()`.
pub fn unknown() -> TsExpr {
    schema(Schema::Unknown, Vec::new())
}

/// Combine a base schema and its refinements. A single expression is
/// returned as-is; an empty sequence accepts anything.
pub fn pipe(mut pipes: Vec<TsExpr>) -> TsExpr {
    match pipes.len() {
        0 => unknown(),
        1 => pipes.remove(0),
        _ => action(Action::Pipe, pipes),
    }
}

/// `v.GenericSchema`
pub fn top_type() -> TsType {
    TsType::Ref(format!("{NAMESPACE}.{TOP_TYPE}"))
}

/// `import * as v from "valibot";`
pub fn import() -> TsImport {
    TsImport {
        binding: ImportBinding::Namespace(NAMESPACE.to_string()),
        from: MODULE.to_string(),
        type_only: false,
    }
}
