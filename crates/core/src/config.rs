//! Config normalizer.
//!
//! User config values come in several shapes (a boolean, a number, a string,
//! a callback, or a partial object). [`value_to_object`] collapses any of them
//! into the canonical config object using per-shape [`Mappers`].
//!
//! Merge rule: a patch field that is absent or an empty string leaves the
//! default untouched. `false` and `0` are real values and do override.

use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::case::{NameFn, StringCase, StringName};

/// A config value of variable shape. `P` is the partial (patch) form of the
/// canonical config object.
#[derive(Clone)]
pub enum ConfigValue<P> {
    /// `true` / `false` shorthand.
    Bool(bool),
    /// Numeric shorthand.
    Number(f64),
    /// String shorthand, usually a name template.
    String(String),
    /// Only constructible programmatically.
    Function(NameFn),
    /// Partial config object.
    Object(P),
}

impl<P: fmt::Debug> fmt::Debug for ConfigValue<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            ConfigValue::Number(value) => f.debug_tuple("Number").field(value).finish(),
            ConfigValue::String(value) => f.debug_tuple("String").field(value).finish(),
            ConfigValue::Function(_) => f.write_str("Function(..)"),
            ConfigValue::Object(value) => f.debug_tuple("Object").field(value).finish(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Shape<P> {
    Bool(bool),
    Number(f64),
    String(String),
    Object(P),
}

impl<'de, P: Deserialize<'de>> Deserialize<'de> for ConfigValue<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Shape::<P>::deserialize(deserializer)? {
            Shape::Bool(value) => ConfigValue::Bool(value),
            Shape::Number(value) => ConfigValue::Number(value),
            Shape::String(value) => ConfigValue::String(value),
            Shape::Object(value) => ConfigValue::Object(value),
        })
    }
}

/// A patch field value. Blank values never override a default.
pub trait PatchValue {
    /// True when the value should be treated as absent.
    fn is_blank(&self) -> bool {
        false
    }
}

impl PatchValue for bool {}
impl PatchValue for f64 {}
impl PatchValue for StringCase {}

impl PatchValue for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl PatchValue for StringName {
    fn is_blank(&self) -> bool {
        matches!(self, StringName::Template(template) if template.is_empty())
    }
}

/// Overwrite `target` with `patch` unless the patch is absent or blank.
pub fn merge_field<V: PatchValue>(target: &mut V, patch: Option<V>) {
    if let Some(value) = patch
        && !value.is_blank()
    {
        *target = value;
    }
}

/// A canonical config object that accepts partial patches.
pub trait Configurable: Clone {
    /// Partial form where every field is optional.
    type Patch;

    /// Merge `patch` into `self` field by field.
    fn apply_patch(&mut self, patch: Self::Patch);
}

/// Per-shape conversions from a user value to a patch.
pub struct Mappers<T: Configurable> {
    /// For [`ConfigValue::Bool`].
    pub boolean: Option<fn(bool) -> T::Patch>,
    /// For [`ConfigValue::Number`].
    pub number: Option<fn(f64) -> T::Patch>,
    /// For [`ConfigValue::String`].
    pub string: Option<fn(&str) -> T::Patch>,
    /// For [`ConfigValue::Function`].
    pub function: Option<fn(NameFn) -> T::Patch>,
    /// Receives the user object and the default.
    pub object: Option<fn(T::Patch, &T) -> T::Patch>,
}

impl<T: Configurable> Default for Mappers<T> {
    fn default() -> Self {
        Self {
            boolean: None,
            number: None,
            string: None,
            function: None,
            object: None,
        }
    }
}

impl<T: Configurable> fmt::Debug for Mappers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mappers")
            .field("boolean", &self.boolean.is_some())
            .field("number", &self.number.is_some())
            .field("string", &self.string.is_some())
            .field("function", &self.function.is_some())
            .field("object", &self.object.is_some())
            .finish()
    }
}

/// Collapse `value` into a canonical object, starting from `default`.
///
/// A shape without a mapper leaves the default unchanged, except objects,
/// which merge directly. Never fails.
pub fn value_to_object<T: Configurable>(
    default: &T,
    value: Option<ConfigValue<T::Patch>>,
    mappers: &Mappers<T>,
) -> T {
    let patch = match value {
        None => None,
        Some(ConfigValue::Bool(value)) => mappers.boolean.map(|map| map(value)),
        Some(ConfigValue::Number(value)) => mappers.number.map(|map| map(value)),
        Some(ConfigValue::String(value)) => mappers.string.map(|map| map(&value)),
        Some(ConfigValue::Function(value)) => mappers.function.map(|map| map(value)),
        Some(ConfigValue::Object(value)) => Some(match mappers.object {
            Some(map) => map(value, default),
            None => value,
        }),
    };

    let mut result = default.clone();
    if let Some(patch) = patch {
        result.apply_patch(patch);
    }
    result
}

/// Naming options for one family of generated declarations.
#[derive(Debug, Clone)]
pub struct NamingConfig {
    /// Whether declarations of this family are generated at all.
    pub enabled: bool,
    /// Casing applied after the name transform.
    pub case: StringCase,
    /// Template or callback producing the name.
    pub name: StringName,
}

impl NamingConfig {
    /// Enabled family named by `template` in `case`.
    pub fn new(case: StringCase, template: &str) -> Self {
        Self {
            enabled: true,
            case,
            name: StringName::template(template),
        }
    }

    /// Mappers for the usual shorthands: `false` disables, a string or a
    /// function replaces the name.
    pub fn mappers() -> Mappers<Self> {
        Mappers {
            boolean: Some(|enabled| NamingPatch {
                enabled: Some(enabled),
                ..NamingPatch::default()
            }),
            string: Some(|name| NamingPatch {
                name: Some(StringName::template(name)),
                ..NamingPatch::default()
            }),
            function: Some(|f| NamingPatch {
                name: Some(StringName::Function(f)),
                ..NamingPatch::default()
            }),
            ..Mappers::default()
        }
    }

    /// Resolve a user value against `self` as the default.
    pub fn resolve(&self, value: Option<ConfigValue<NamingPatch>>) -> Self {
        value_to_object(self, value, &Self::mappers())
    }
}

/// User-facing, partial form of [`NamingConfig`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamingPatch {
    /// Overrides [`NamingConfig::enabled`].
    pub enabled: Option<bool>,
    /// Overrides [`NamingConfig::case`].
    pub case: Option<StringCase>,
    /// Overrides [`NamingConfig::name`].
    pub name: Option<StringName>,
}

impl Configurable for NamingConfig {
    type Patch = NamingPatch;

    fn apply_patch(&mut self, patch: NamingPatch) {
        merge_field(&mut self.enabled, patch.enabled);
        merge_field(&mut self.case, patch.case);
        merge_field(&mut self.name, patch.name);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn default_naming() -> NamingConfig {
        NamingConfig::new(StringCase::CamelCase, "v{{name}}")
    }

    fn rendered(config: &NamingConfig) -> String {
        config.name.render("Pet", config.case)
    }

    #[test]
    fn test_merge_field_skip_rule() {
        let mut name = String::from("default");
        merge_field(&mut name, None);
        assert_eq!(name, "default");
        merge_field(&mut name, Some(String::new()));
        assert_eq!(name, "default");
        merge_field(&mut name, Some("set".to_string()));
        assert_eq!(name, "set");

        let mut flag = true;
        merge_field(&mut flag, Some(false));
        assert!(!flag);

        let mut count = 5.0;
        merge_field(&mut count, Some(0.0));
        assert_eq!(count, 0.0);
    }

    #[test]
    fn test_object_patch_skips_blank_and_absent_fields() {
        let patch = NamingPatch {
            enabled: Some(false),
            case: None,
            name: Some(StringName::template("")),
        };
        let resolved = default_naming().resolve(Some(ConfigValue::Object(patch)));

        assert!(!resolved.enabled);
        assert_eq!(resolved.case, StringCase::CamelCase);
        assert_eq!(rendered(&resolved), "vPet");
    }

    #[test]
    fn test_shapes_with_mappers() {
        let default = default_naming();

        let disabled = default.resolve(Some(ConfigValue::Bool(false)));
        assert!(!disabled.enabled);

        let renamed = default.resolve(Some(ConfigValue::String("z{{name}}".into())));
        assert_eq!(rendered(&renamed), "zPet");

        let function = default.resolve(Some(ConfigValue::Function(Arc::new(|name: &str| {
            format!("{name}Schema")
        }))));
        assert_eq!(rendered(&function), "petSchema");
    }

    #[test]
    fn test_shape_without_mapper_keeps_default() {
        let resolved = default_naming().resolve(Some(ConfigValue::Number(3.0)));
        assert!(resolved.enabled);
        assert_eq!(rendered(&resolved), "vPet");

        let empty = default_naming().resolve(Some(ConfigValue::String(String::new())));
        assert_eq!(rendered(&empty), "vPet");

        let absent = default_naming().resolve(None);
        assert_eq!(rendered(&absent), "vPet");
    }

    #[test]
    fn test_deserialize_shapes() {
        let value: ConfigValue<NamingPatch> = serde_json::from_str("true").unwrap();
        assert!(matches!(value, ConfigValue::Bool(true)));

        let value: ConfigValue<NamingPatch> = serde_json::from_str("\"x{{name}}\"").unwrap();
        assert!(matches!(value, ConfigValue::String(ref s) if s == "x{{name}}"));

        let value: ConfigValue<NamingPatch> =
            serde_json::from_str(r#"{ "case": "PascalCase" }"#).unwrap();
        let patch = match value {
            ConfigValue::Object(patch) => patch,
            other => unreachable!("expected object shape, got {other:?}"),
        };
        assert_eq!(patch.case, Some(StringCase::PascalCase));
        assert!(patch.name.is_none());
    }
}
