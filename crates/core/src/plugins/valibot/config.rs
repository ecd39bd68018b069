//! Valibot plugin options.

use serde::Deserialize;

use crate::case::StringCase;
use crate::config::{ConfigValue, Configurable, Mappers, NamingConfig, NamingPatch, merge_field, value_to_object};

/// Resolved options.
#[derive(Debug, Clone)]
pub struct ValibotConfig {
    /// Emit JSDoc comments from titles and descriptions.
    pub comments: bool,
    /// Attach `v.metadata({ description })` refinements.
    pub metadata: bool,
    /// Default case for all naming families.
    pub case: StringCase,
    /// Output key; the file is `<output>.ts`.
    pub output: String,
    /// Names of reusable schema declarations.
    pub definitions: NamingConfig,
    /// Names of per-operation request declarations.
    pub requests: NamingConfig,
    /// Names of per-operation response declarations.
    pub responses: NamingConfig,
}

impl Default for ValibotConfig {
    fn default() -> Self {
        let case = StringCase::CamelCase;
        Self {
            comments: true,
            metadata: false,
            case,
            output: super::NAME.to_string(),
            definitions: NamingConfig::new(case, "v{{name}}"),
            requests: NamingConfig::new(case, "v{{name}}Data"),
            responses: NamingConfig::new(case, "v{{name}}Response"),
        }
    }
}

/// Options as written by the user. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ValibotUserConfig {
    /// See [`ValibotConfig::comments`].
    pub comments: Option<bool>,
    /// See [`ValibotConfig::metadata`].
    pub metadata: Option<bool>,
    /// See [`ValibotConfig::case`].
    pub case: Option<StringCase>,
    /// See [`ValibotConfig::output`].
    pub output: Option<String>,
    /// Name template, callback or object. `false` is ignored.
    pub definitions: Option<ConfigValue<NamingPatch>>,
    /// Name template, callback or object. `false` disables.
    pub requests: Option<ConfigValue<NamingPatch>>,
    /// Name template, callback or object. `false` disables.
    pub responses: Option<ConfigValue<NamingPatch>>,
}

/// Definitions are always generated, so `false` has no meaning for them.
fn definition_mappers() -> Mappers<NamingConfig> {
    Mappers {
        boolean: None,
        ..NamingConfig::mappers()
    }
}

impl Configurable for ValibotConfig {
    type Patch = ValibotUserConfig;

    fn apply_patch(&mut self, patch: ValibotUserConfig) {
        merge_field(&mut self.comments, patch.comments);
        merge_field(&mut self.metadata, patch.metadata);
        merge_field(&mut self.case, patch.case);
        merge_field(&mut self.output, patch.output);

        // the top-level case seeds each family's default
        self.definitions.case = self.case;
        self.requests.case = self.case;
        self.responses.case = self.case;

        self.definitions = value_to_object(&self.definitions, patch.definitions, &definition_mappers());
        self.requests = self.requests.resolve(patch.requests);
        self.responses = self.responses.resolve(patch.responses);
    }
}

impl ValibotConfig {
    /// Defaults patched with the user's options.
    pub fn resolve(user: Option<ValibotUserConfig>) -> Self {
        value_to_object(&Self::default(), user.map(ConfigValue::Object), &Mappers::default())
    }
}
