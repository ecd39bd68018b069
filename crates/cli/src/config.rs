//! `schemac.toml` project configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::CliError;

/// Plugins run when neither the command line nor the config names any.
pub const DEFAULT_PLUGINS: &[&str] = &["typescript", "valibot"];

/// Output directory used when none is configured.
pub const DEFAULT_OUTPUT: &str = "generated";

/// Contents of `schemac.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Directory generated files are written to.
    pub output: Option<PathBuf>,
    /// Plugins to run, in order.
    #[serde(default)]
    pub plugins: Vec<PluginEntry>,
}

/// A plugin by name, or a table with `name` plus that plugin's options.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PluginEntry {
    /// `"valibot"`
    Name(String),
    /// `{ name = "valibot", metadata = true }`
    Table {
        /// Plugin name.
        name: String,
        /// Every other key, handed to the plugin.
        #[serde(flatten)]
        options: toml::Table,
    },
}

impl PluginEntry {
    /// Plugin name in either form.
    pub fn name(&self) -> &str {
        match self {
            PluginEntry::Name(name) | PluginEntry::Table { name, .. } => name,
        }
    }

    /// Options as the JSON the plugin factory accepts.
    pub fn options(&self) -> Result<Option<serde_json::Value>, CliError> {
        match self {
            PluginEntry::Table { options, .. } if !options.is_empty() => {
                Ok(Some(serde_json::to_value(options)?))
            }
            _ => Ok(None),
        }
    }
}

impl ProjectConfig {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// Plugins to run. Names given on the command line win; a name that
    /// also has a table in the config keeps that table's options.
    pub fn select_plugins(&self, names: &[String]) -> Vec<PluginEntry> {
        if names.is_empty() {
            if self.plugins.is_empty() {
                return DEFAULT_PLUGINS
                    .iter()
                    .map(|name| PluginEntry::Name((*name).to_string()))
                    .collect();
            }
            return self.plugins.clone();
        }

        names
            .iter()
            .map(|name| {
                self.plugins
                    .iter()
                    .find(|entry| entry.name() == name)
                    .cloned()
                    .unwrap_or_else(|| PluginEntry::Name(name.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(text: &str) -> ProjectConfig {
        toml::from_str(text).unwrap()
    }

    fn names(entries: &[PluginEntry]) -> Vec<&str> {
        entries.iter().map(PluginEntry::name).collect()
    }

    #[test]
    fn test_plugin_entries() {
        let config = parse(
            r#"
            output = "src/client"
            plugins = ["typescript", { name = "valibot", metadata = true, definitions = "z{{name}}" }]
            "#,
        );
        assert_eq!(config.output, Some(PathBuf::from("src/client")));
        assert_eq!(names(&config.plugins), ["typescript", "valibot"]);
        assert_eq!(config.plugins[0].options().unwrap(), None);
        assert_eq!(
            config.plugins[1].options().unwrap(),
            Some(json!({ "metadata": true, "definitions": "z{{name}}" }))
        );
    }

    #[test]
    fn test_select_plugins() {
        let empty = ProjectConfig::default();
        assert_eq!(names(&empty.select_plugins(&[])), DEFAULT_PLUGINS);

        let config = parse(r#"plugins = [{ name = "valibot", comments = false }]"#);
        assert_eq!(names(&config.select_plugins(&[])), ["valibot"]);

        let selected = config.select_plugins(&["typescript".to_string(), "valibot".to_string()]);
        assert_eq!(names(&selected), ["typescript", "valibot"]);
        assert_eq!(selected[1].options().unwrap(), Some(json!({ "comments": false })));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(toml::from_str::<ProjectConfig>("outptu = \"x\"").is_err());
    }
}
