//! The slice of TypeScript the plugins produce.
//!
//! Types ([`TsType`]) describe the `typescript` plugin's declarations,
//! expressions ([`TsExpr`]) carry the validator calls, and statements
//! ([`TsStmt`]) are what a [`GeneratedFile`](crate::file::GeneratedFile) holds.

/// A type expression, as used by the `typescript` plugin.
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// Built-in keyword type.
    Primitive(TsPrimitive),
    /// `T[]`
    Array(Box<TsType>),
    /// `[A, B]`
    Tuple(Vec<TsType>),
    /// `A | B`
    Union(Vec<TsType>),
    /// `A & B`
    Intersection(Vec<TsType>),
    /// Inline object type, `{ a: A; b?: B }`.
    Object(Vec<TsProp>),
    /// `Record<K, V>`
    Record {
        /// Key type.
        key: Box<TsType>,
        /// Value type.
        value: Box<TsType>,
    },
    /// Literal type such as `"a"` or `1`.
    Literal(TsLiteral),
    /// A declared name, printed as-is.
    Ref(String),
}

/// Keyword types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    /// `string`
    String,
    /// `number`
    Number,
    /// `bigint`
    BigInt,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
    /// `undefined`
    Undefined,
    /// `never`
    Never,
    /// `void`
    Void,
    /// `unknown`
    Unknown,
}

/// A property of an interface or inline object type.
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    /// Property name as written in the schema; quoted on output when needed.
    pub name: String,
    /// Property type.
    pub ty: TsType,
    /// Printed with `?`.
    pub optional: bool,
    /// Printed with `readonly`.
    pub readonly: bool,
}

/// Scalar literal, shared by types and expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum TsLiteral {
    /// Double-quoted, escaped string.
    String(String),
    /// Float, printed in its shortest form.
    Number(f64),
    /// Integer, printed without a fraction.
    Int(i64),
    /// `true` / `false`
    Bool(bool),
    /// `null`
    Null,
}

/// Key of an object literal property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropKey {
    /// Bare identifier: `foo`
    Ident(String),
    /// Quoted string: `"foo-bar"`
    Str(String),
    /// Numeric literal: `42`
    Num(String),
}

/// A value expression. Validator schemas are built from these.
#[derive(Debug, Clone, PartialEq)]
pub enum TsExpr {
    /// Bare name.
    Ident(String),
    /// Scalar literal.
    Literal(TsLiteral),
    /// `callee(args...)`
    Call {
        /// Called expression.
        callee: Box<TsExpr>,
        /// Arguments in order.
        args: Vec<TsExpr>,
    },
    /// `(params) => body`
    Arrow {
        /// Parameter list.
        params: Vec<TsParam>,
        /// Expression body.
        body: Box<TsExpr>,
    },
    /// Object literal; keys keep insertion order.
    Object(Vec<(PropKey, TsExpr)>),
    /// `object.prop`
    Member {
        /// Receiver.
        object: Box<TsExpr>,
        /// Property name.
        prop: String,
    },
    /// `[a, b]`
    Array(Vec<TsExpr>),
    /// Regex literal body, without the slashes or flags.
    Regex(String),
}

impl TsExpr {
    /// [`TsExpr::Ident`] from any string.
    pub fn ident(name: impl Into<String>) -> Self {
        TsExpr::Ident(name.into())
    }

    /// String literal expression.
    pub fn string(value: impl Into<String>) -> Self {
        TsExpr::Literal(TsLiteral::String(value.into()))
    }

    /// `callee(args...)`
    pub fn call(callee: TsExpr, args: Vec<TsExpr>) -> Self {
        TsExpr::Call {
            callee: Box::new(callee),
            args,
        }
    }

    /// `object.prop`
    pub fn member(object: TsExpr, prop: impl Into<String>) -> Self {
        TsExpr::Member {
            object: Box::new(object),
            prop: prop.into(),
        }
    }

    /// `() => body`
    pub fn thunk(body: TsExpr) -> Self {
        TsExpr::Arrow {
            params: Vec::new(),
            body: Box::new(body),
        }
    }
}

/// Arrow-function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct TsParam {
    /// Parameter name.
    pub name: String,
    /// Annotation, if any.
    pub ty: Option<TsType>,
    /// Printed with `?`.
    pub optional: bool,
}

impl TsParam {
    /// An untyped, required parameter.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            optional: false,
        }
    }
}

/// What an import statement binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportBinding {
    /// import * as alias from "module"
    Namespace(String),
    /// import { a, b as c } from "module"
    Named(Vec<ImportItem>),
}

/// `import ... from "module";`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsImport {
    /// What gets bound.
    pub binding: ImportBinding,
    /// Module specifier.
    pub from: String,
    /// `import type ...`
    pub type_only: bool,
}

/// One name in a named import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportItem {
    /// Exported name.
    pub name: String,
    /// Local alias.
    pub alias: Option<String>,
}

/// Body of a [`TsTypeDef`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefKind {
    /// `export interface Name { ... }`
    Interface {
        /// Members in order.
        properties: Vec<TsProp>,
    },
    /// `export type Name = ty;`
    TypeAlias {
        /// Aliased type.
        ty: TsType,
    },
}

/// An exported `interface` or `type` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TsTypeDef {
    /// Declared name.
    pub name: String,
    /// Interface or alias.
    pub kind: TypeDefKind,
}

/// Top-level statement
#[derive(Debug, Clone, PartialEq)]
pub enum TsStmt {
    /// `const name: ty = init;`
    Const {
        /// Prefixed with `export`.
        export: bool,
        /// Binding name.
        name: String,
        /// Annotation, if any.
        ty: Option<TsType>,
        /// Initializer.
        init: TsExpr,
    },
    /// Exported type or interface
    TypeDef(TsTypeDef),
    /// JSDoc block attached to the next statement
    Doc(Vec<String>),
}

/// A whole output file: imports first, then the body in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TsModule {
    /// Import statements, printed first.
    pub imports: Vec<TsImport>,
    /// Statements in order.
    pub body: Vec<TsStmt>,
}
