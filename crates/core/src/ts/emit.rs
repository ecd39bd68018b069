//! Printer for the `ts` tree.
//!
//! Output is deterministic and single-line per expression: generated files
//! are meant to be run through the project's formatter, not read raw.

use super::types::{
    ImportBinding, ImportItem, PropKey, TsExpr, TsImport, TsLiteral, TsModule, TsParam,
    TsPrimitive, TsProp, TsStmt, TsType, TsTypeDef, TypeDefKind,
};
use super::utils::{escape_js_string, quote_if_needed};

/// Render a node as TypeScript source.
pub trait Emit {
    /// The source text.
    fn emit(&self) -> String;
}

fn join<T: Emit>(items: &[T], separator: &str) -> String {
    items.iter().map(Emit::emit).collect::<Vec<_>>().join(separator)
}

/// Parenthesize `ty` when it would bind looser than the surrounding operator.
fn grouped(ty: &TsType, loose: fn(&TsType) -> bool) -> String {
    if loose(ty) {
        format!("({})", ty.emit())
    } else {
        ty.emit()
    }
}

impl TsPrimitive {
    /// The keyword spelling, e.g. `bigint`.
    pub const fn keyword(self) -> &'static str {
        match self {
            TsPrimitive::String => "string",
            TsPrimitive::Number => "number",
            TsPrimitive::BigInt => "bigint",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::Null => "null",
            TsPrimitive::Undefined => "undefined",
            TsPrimitive::Never => "never",
            TsPrimitive::Void => "void",
            TsPrimitive::Unknown => "unknown",
        }
    }
}

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        self.keyword().to_string()
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(value) => format!("\"{}\"", escape_js_string(value)),
            TsLiteral::Number(value) => value.to_string(),
            TsLiteral::Int(value) => value.to_string(),
            TsLiteral::Bool(value) => value.to_string(),
            TsLiteral::Null => String::from("null"),
        }
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(primitive) => primitive.emit(),
            TsType::Literal(literal) => literal.emit(),
            TsType::Ref(name) => name.clone(),
            TsType::Array(element) => {
                let element = grouped(element, |t| {
                    matches!(t, TsType::Union(_) | TsType::Intersection(_))
                });
                format!("{element}[]")
            }
            TsType::Tuple(elements) => format!("[{}]", join(elements, ", ")),
            TsType::Union(members) => join(members, " | "),
            TsType::Intersection(members) => members
                .iter()
                .map(|member| grouped(member, |t| matches!(t, TsType::Union(_))))
                .collect::<Vec<_>>()
                .join(" & "),
            TsType::Object(props) if props.is_empty() => String::from("{}"),
            TsType::Object(props) => format!("{{ {} }}", join(props, "; ")),
            TsType::Record { key, value } => format!("Record<{}, {}>", key.emit(), value.emit()),
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        format!(
            "{}{}{}: {}",
            if self.readonly { "readonly " } else { "" },
            quote_if_needed(&self.name),
            if self.optional { "?" } else { "" },
            self.ty.emit()
        )
    }
}

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        match &self.kind {
            TypeDefKind::TypeAlias { ty } => format!("export type {} = {};\n", self.name, ty.emit()),
            TypeDefKind::Interface { properties } => {
                let body: String = properties
                    .iter()
                    .map(|prop| format!("  {};\n", prop.emit()))
                    .collect();
                format!("export interface {} {{\n{body}}}\n", self.name)
            }
        }
    }
}

impl Emit for PropKey {
    fn emit(&self) -> String {
        match self {
            PropKey::Ident(name) | PropKey::Num(name) => name.clone(),
            PropKey::Str(name) => format!("\"{}\"", escape_js_string(name)),
        }
    }
}

/// Escape unescaped forward slashes so the pattern fits between `/` delimiters.
fn escape_regex_body(pattern: &str) -> String {
    let mut output = String::with_capacity(pattern.len());
    let mut escaped = false;
    for c in pattern.chars() {
        if c == '/' && !escaped {
            output.push('\\');
        }
        escaped = c == '\\' && !escaped;
        output.push(c);
    }
    output
}

impl Emit for TsExpr {
    fn emit(&self) -> String {
        match self {
            TsExpr::Ident(name) => name.clone(),
            TsExpr::Literal(literal) => literal.emit(),
            TsExpr::Regex(pattern) => format!("/{}/", escape_regex_body(pattern)),
            TsExpr::Member { object, prop } => format!("{}.{prop}", object.emit()),
            TsExpr::Call { callee, args } => format!("{}({})", callee.emit(), join(args, ", ")),
            TsExpr::Array(items) => format!("[{}]", join(items, ", ")),
            TsExpr::Object(entries) if entries.is_empty() => String::from("{}"),
            TsExpr::Object(entries) => {
                let entries: Vec<_> = entries
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key.emit(), value.emit()))
                    .collect();
                format!("{{ {} }}", entries.join(", "))
            }
            TsExpr::Arrow { params, body } => {
                // `() => {}` would be a block, not an object
                let body = match **body {
                    TsExpr::Object(_) => format!("({})", body.emit()),
                    _ => body.emit(),
                };
                format!("({}) => {body}", join(params, ", "))
            }
        }
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let optional = if self.optional { "?" } else { "" };
        let annotation = self
            .ty
            .as_ref()
            .map(|ty| format!(": {}", ty.emit()))
            .unwrap_or_default();
        format!("{}{optional}{annotation}", self.name)
    }
}

impl Emit for TsStmt {
    fn emit(&self) -> String {
        match self {
            TsStmt::Const {
                export,
                name,
                ty,
                init,
            } => {
                let export = if *export { "export " } else { "" };
                let annotation = ty
                    .as_ref()
                    .map(|ty| format!(": {}", ty.emit()))
                    .unwrap_or_default();
                format!("{export}const {name}{annotation} = {};\n", init.emit())
            }
            TsStmt::TypeDef(def) => def.emit(),
            TsStmt::Doc(lines) => {
                let body: String = lines
                    .iter()
                    .flat_map(|line| line.lines())
                    .map(|part| {
                        if part.is_empty() {
                            String::from(" *\n")
                        } else {
                            format!(" * {part}\n")
                        }
                    })
                    .collect();
                format!("/**\n{body} */\n")
            }
        }
    }
}

impl Emit for ImportItem {
    fn emit(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} as {alias}", self.name),
            None => self.name.clone(),
        }
    }
}

impl Emit for TsImport {
    fn emit(&self) -> String {
        let clause = match &self.binding {
            ImportBinding::Namespace(alias) => format!("* as {alias}"),
            ImportBinding::Named(items) => format!("{{ {} }}", join(items, ", ")),
        };
        let type_only = if self.type_only { "type " } else { "" };
        format!("import {type_only}{clause} from \"{}\";\n", self.from)
    }
}

impl Emit for TsModule {
    fn emit(&self) -> String {
        let mut output: String = self.imports.iter().map(Emit::emit).collect();
        if !self.imports.is_empty() {
            output.push('\n');
        }

        // declarations are separated by a blank line; a doc block sticks to
        // the statement after it
        for (index, stmt) in self.body.iter().enumerate() {
            output.push_str(&stmt.emit());
            let last = index + 1 == self.body.len();
            if !last && !matches!(stmt, TsStmt::Doc(_)) {
                output.push('\n');
            }
        }
        output
    }
}
