//! Numeric formats: integer bounds and wide-integer literals.

use serde_json::Value;

use crate::ts::utils::{number_literal, value_to_expr};
use crate::ts::{TsExpr, TsLiteral};

/// Value range of a fixed-width integer format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerFormat {
    /// Smallest value, as decimal digits.
    pub min: &'static str,
    /// Largest value, as decimal digits.
    pub max: &'static str,
    /// Message when the value is below `min`.
    pub min_error: &'static str,
    /// Message when the value is above `max`.
    pub max_error: &'static str,
}

/// Range of `format`, when it names a fixed-width integer.
pub fn integer_format(format: &str) -> Option<IntegerFormat> {
    let (min, max, min_error, max_error) = match format {
        "int8" => (
            "-128",
            "127",
            "Invalid value: Expected int8 to be >= -2^7",
            "Invalid value: Expected int8 to be <= 2^7-1",
        ),
        "int16" => (
            "-32768",
            "32767",
            "Invalid value: Expected int16 to be >= -2^15",
            "Invalid value: Expected int16 to be <= 2^15-1",
        ),
        "int32" => (
            "-2147483648",
            "2147483647",
            "Invalid value: Expected int32 to be >= -2^31",
            "Invalid value: Expected int32 to be <= 2^31-1",
        ),
        "int64" => (
            "-9223372036854775808",
            "9223372036854775807",
            "Invalid value: Expected int64 to be >= -2^63",
            "Invalid value: Expected int64 to be <= 2^63-1",
        ),
        "uint8" => (
            "0",
            "255",
            "Invalid value: Expected uint8 to be >= 0",
            "Invalid value: Expected uint8 to be <= 2^8-1",
        ),
        "uint16" => (
            "0",
            "65535",
            "Invalid value: Expected uint16 to be >= 0",
            "Invalid value: Expected uint16 to be <= 2^16-1",
        ),
        "uint32" => (
            "0",
            "4294967295",
            "Invalid value: Expected uint32 to be >= 0",
            "Invalid value: Expected uint32 to be <= 2^32-1",
        ),
        "uint64" => (
            "0",
            "18446744073709551615",
            "Invalid value: Expected uint64 to be >= 0",
            "Invalid value: Expected uint64 to be <= 2^64-1",
        ),
        _ => return None,
    };
    Some(IntegerFormat {
        min,
        max,
        min_error,
        max_error,
    })
}

/// Formats whose values do not fit a JavaScript number.
pub fn needs_big_int(format: Option<&str>) -> bool {
    matches!(format, Some("int64" | "uint64"))
}

/// `BigInt("<digits>")`
pub fn big_int(digits: &str) -> TsExpr {
    TsExpr::call(TsExpr::ident("BigInt"), vec![TsExpr::string(digits)])
}

/// A bound from the format table.
pub fn bound(text: &'static str, big: bool) -> TsExpr {
    if big {
        return big_int(text);
    }
    match text.parse::<i64>() {
        Ok(value) => TsExpr::Literal(TsLiteral::Int(value)),
        Err(_) => TsExpr::ident(text),
    }
}

/// A user-supplied bound such as `minimum`.
///
/// `BigInt` rejects fractions, so a fractional bound on a wide format stays
/// a plain number. JavaScript compares the two kinds directly.
pub fn number_value(value: f64, big: bool) -> TsExpr {
    if big && value.fract() == 0.0 {
        big_int(&value.to_string())
    } else {
        TsExpr::Literal(TsLiteral::Number(value))
    }
}

/// Literal for a numeric `const` or `default`.
///
/// Wide formats get a `BigInt(...)` construction, dropping a trailing `n`
/// from textual values. Everything else is reconstructed as-is.
pub fn number_literal_expr(value: &Value, format: Option<&str>) -> TsExpr {
    let big = needs_big_int(format);
    match value {
        Value::Number(n) if big && (n.is_i64() || n.is_u64()) => big_int(&n.to_string()),
        Value::Number(n) => TsExpr::Literal(number_literal(n)),
        Value::String(s) if big => big_int(s.strip_suffix('n').unwrap_or(s)),
        other => value_to_expr(other),
    }
}
