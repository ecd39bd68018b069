//! Naming policy: string casing and name templates.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::ts::utils::{capitalize_first, ensure_valid_identifier};

/// Placeholder substituted by [`StringName::Template`].
pub const NAME_PLACEHOLDER: &str = "{{name}}";

/// User-supplied naming callback.
pub type NameFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Casing applied to generated names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum StringCase {
    /// `petOwner`
    #[default]
    #[serde(rename = "camelCase")]
    CamelCase,
    /// `PetOwner`
    #[serde(rename = "PascalCase")]
    PascalCase,
    /// `pet_owner`
    #[serde(rename = "snake_case")]
    SnakeCase,
    /// `PET_OWNER`
    #[serde(rename = "SCREAMING_SNAKE_CASE")]
    ScreamingSnakeCase,
    /// Leave the name as written.
    #[serde(rename = "preserve")]
    Preserve,
}

/// Split into words on separators, lower→upper transitions and the end of
/// an acronym (`HTTPServer` → `HTTP`, `Server`).
fn words(value: &str) -> Vec<String> {
    let chars: Vec<char> = value.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(&prev) = i.checked_sub(1).and_then(|p| chars.get(p))
            && !current.is_empty()
        {
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = ((prev.is_lowercase() || prev.is_ascii_digit()) && c.is_uppercase())
                || (prev.is_uppercase() && c.is_uppercase() && next_is_lower);
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

impl StringCase {
    /// Re-case `value`, splitting it into words first.
    pub fn apply(self, value: &str) -> String {
        let words = words(value);
        match self {
            StringCase::Preserve => value.to_string(),
            StringCase::CamelCase => words
                .iter()
                .enumerate()
                .map(|(i, word)| {
                    let lower = word.to_lowercase();
                    if i == 0 { lower } else { capitalize_first(&lower) }
                })
                .collect(),
            StringCase::PascalCase => words
                .iter()
                .map(|word| capitalize_first(&word.to_lowercase()))
                .collect(),
            StringCase::SnakeCase => words
                .iter()
                .map(|word| word.to_lowercase())
                .collect::<Vec<_>>()
                .join("_"),
            StringCase::ScreamingSnakeCase => words
                .iter()
                .map(|word| word.to_uppercase())
                .collect::<Vec<_>>()
                .join("_"),
        }
    }
}

/// Turns a base name (e.g. a component name) into the emitted name.
#[derive(Clone)]
pub enum StringName {
    /// `{{name}}` is replaced with the base name.
    Template(String),
    /// Called with the base name.
    Function(NameFn),
}

impl fmt::Debug for StringName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringName::Template(template) => f.debug_tuple("Template").field(template).finish(),
            StringName::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl<'de> Deserialize<'de> for StringName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(StringName::Template)
    }
}

impl StringName {
    /// [`StringName::Template`] from any string.
    pub fn template(template: impl Into<String>) -> Self {
        StringName::Template(template.into())
    }

    /// [`StringName::Function`] from a closure.
    pub fn function(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        StringName::Function(Arc::new(f))
    }

    /// Transform `base`, apply `case` to the result and make it a legal identifier.
    ///
    /// Template text around the placeholder counts as separate words, so
    /// `v{{name}}Data` over `listPets` in camelCase gives `vListPetsData`.
    pub fn render(&self, base: &str, case: StringCase) -> String {
        let raw = match self {
            StringName::Template(template) if case == StringCase::Preserve => {
                template.replace(NAME_PLACEHOLDER, base)
            }
            StringName::Template(template) => {
                template.replace(NAME_PLACEHOLDER, &format!(" {base} "))
            }
            StringName::Function(f) => f(base),
        };
        ensure_valid_identifier(&case.apply(&raw))
    }
}
