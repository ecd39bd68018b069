//! Minimal TypeScript AST and printer shared by all generators.

pub mod emit;
pub mod types;
pub mod utils;

pub use emit::Emit;
pub use types::{
    ImportBinding, ImportItem, PropKey, TsExpr, TsImport, TsLiteral, TsModule, TsParam,
    TsPrimitive, TsProp, TsStmt, TsType, TsTypeDef, TypeDefKind,
};
