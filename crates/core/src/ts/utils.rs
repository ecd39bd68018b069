//! Identifier, key and literal helpers shared by the plugins and the printer.

use serde_json::Value;

use super::types::{PropKey, TsExpr, TsLiteral, TsPrimitive, TsType};

/// Words that cannot be bound as names. Sorted, for `binary_search`.
const RESERVED_WORDS: [&str; 47] = [
    "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for",
    "function", "if", "implements", "import", "in", "instanceof", "interface", "let", "new",
    "null", "package", "private", "protected", "public", "return", "static", "super", "switch",
    "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.binary_search(&name).is_ok()
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Whether `name` must be quoted to be used as a property name.
pub fn needs_quotes(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => !is_identifier_start(first) || !chars.all(is_identifier_char),
        None => true,
    }
}

/// Escape a string for use in JavaScript/TypeScript string literals.
/// Escapes backslashes, double quotes and line breaks.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Quote a string if needed for use as a property key.
pub fn quote_if_needed(name: &str) -> String {
    if needs_quotes(name) {
        format!("\"{}\"", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// Make `name` usable as a binding name.
/// - Replaces characters that cannot appear in an identifier with `_`
/// - Prepends `_` if starts with digit
/// - Escapes reserved words with `_` prefix
pub fn ensure_valid_identifier(name: &str) -> String {
    let mut result: String = name
        .chars()
        .map(|c| if is_identifier_char(c) { c } else { '_' })
        .collect();

    if result.is_empty() {
        return "_empty".to_string();
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result = format!("_{result}");
    }

    if is_reserved(&result) {
        result = format!("_{result}");
    }

    result
}

/// Neutralize `*/` so text can sit inside a block comment.
pub fn escape_comment(text: &str) -> String {
    text.replace("*/", "*\\/")
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// `^-?\d+(\.\d+)?$`
fn is_numeric_name(name: &str) -> bool {
    let unsigned = name.strip_prefix('-').unwrap_or(name);
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    digits(int) && frac.is_none_or(digits)
}

/// Choose how an object-literal key is written.
///
/// Numeric names become numeric keys, except negative ones which would parse
/// as a unary minus. Names starting with a digit followed by non-digits, or
/// containing non-word characters, are quoted.
pub fn object_key(name: &str) -> PropKey {
    let starts_with_digit = name.starts_with(|c: char| c.is_ascii_digit());
    let has_non_digit = name.chars().any(|c| !c.is_ascii_digit());
    let has_non_word = name.chars().any(|c| !(c.is_ascii_alphanumeric() || c == '_'));

    if (starts_with_digit && has_non_digit) || has_non_word {
        PropKey::Str(name.to_string())
    } else if is_numeric_name(name) {
        PropKey::Num(name.to_string())
    } else {
        PropKey::Ident(name.to_string())
    }
}

/// Convert a JSON number to the closest TypeScript literal.
pub fn number_literal(n: &serde_json::Number) -> TsLiteral {
    match n.as_i64() {
        Some(i) => TsLiteral::Int(i),
        None => TsLiteral::Number(n.as_f64().unwrap_or_default()),
    }
}

/// Convert a JSON value to the expression that reconstructs it.
pub fn value_to_expr(value: &Value) -> TsExpr {
    match value {
        Value::Null => TsExpr::Literal(TsLiteral::Null),
        Value::Bool(b) => TsExpr::Literal(TsLiteral::Bool(*b)),
        Value::Number(n) => TsExpr::Literal(number_literal(n)),
        Value::String(s) => TsExpr::string(s.as_str()),
        Value::Array(items) => TsExpr::Array(items.iter().map(value_to_expr).collect()),
        Value::Object(map) => TsExpr::Object(
            map.iter()
                .map(|(key, value)| (object_key(key), value_to_expr(value)))
                .collect(),
        ),
    }
}

/// Convert a JSON value to a literal type, or `unknown` for compound values.
pub fn value_to_type(value: &Value) -> TsType {
    match value {
        Value::Null => TsType::Literal(TsLiteral::Null),
        Value::Bool(b) => TsType::Literal(TsLiteral::Bool(*b)),
        Value::Number(n) => TsType::Literal(number_literal(n)),
        Value::String(s) => TsType::Literal(TsLiteral::String(s.clone())),
        Value::Array(items) => TsType::Tuple(items.iter().map(value_to_type).collect()),
        Value::Object(_) => TsType::Primitive(TsPrimitive::Unknown),
    }
}

/// Create a `Record<string, T>` type.
pub fn make_string_record(value_type: TsType) -> TsType {
    TsType::Record {
        key: Box::new(TsType::Primitive(TsPrimitive::String)),
        value: Box::new(value_type),
    }
}

/// Create a `Record<string, unknown>` type.
pub fn make_unknown_record() -> TsType {
    make_string_record(TsType::Primitive(TsPrimitive::Unknown))
}
