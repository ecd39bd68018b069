//! Generation run: schedule plugins, run them, write their files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use schemac_ir::IrDocument;
use tracing::info;

use crate::error::{GenerateError, Result};
use crate::file::GeneratedFile;
use crate::plugin::{Plugin, PluginContext, PluginDescriptor, resolve_order};

/// Run `plugins` over `document`, dependencies first.
///
/// Returns one file per plugin, in execution order. Nothing is written.
pub fn generate(document: &IrDocument, plugins: &[Box<dyn Plugin>]) -> Result<Vec<GeneratedFile>> {
    let descriptors: Vec<PluginDescriptor> = plugins.iter().map(|p| p.descriptor().clone()).collect();

    let mut outputs = HashSet::new();
    for descriptor in &descriptors {
        if !outputs.insert(descriptor.output.as_str()) {
            return Err(GenerateError::Config(format!(
                "plugin `{}` writes to `{}`, which another plugin already uses",
                descriptor.name, descriptor.output
            )));
        }
    }

    let order = resolve_order(&descriptors)?;
    let mut produced: Vec<(String, GeneratedFile)> = Vec::with_capacity(order.len());
    for index in order {
        let plugin = &plugins[index];
        let descriptor = plugin.descriptor();
        info!(plugin = %descriptor.name, output = %descriptor.output, "running plugin");

        let file = GeneratedFile::new(descriptor.output.as_str());
        let mut context = PluginContext::with_produced(document, file, &produced);
        plugin.handle(&mut context)?;
        let file = context.into_file();
        produced.push((descriptor.name.clone(), file));
    }
    Ok(produced.into_iter().map(|(_, file)| file).collect())
}

/// Write each file to `dir/<output>.ts`, creating `dir` if needed.
pub fn write_files(dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|source| GenerateError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(file.path());
        fs::write(&path, file.render()).map_err(|source| GenerateError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "wrote file");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::plugin::instantiate_plugin;
    use crate::ts::{TsExpr, TsStmt};
    use schemac_ir::EventKind;
    use serde_json::json;

    fn document() -> IrDocument {
        serde_json::from_value(json!({
            "components": {
                "schemas": {
                    "Pet": {
                        "type": "object",
                        "properties": { "name": { "type": "string" } },
                        "required": ["name"]
                    }
                }
            },
            "operations": [{
                "id": "getPet",
                "method": "get",
                "path": "/pet",
                "response": { "$ref": "#/components/schemas/Pet" }
            }]
        }))
        .unwrap()
    }

    fn plugins(names: &[&str]) -> Vec<Box<dyn Plugin>> {
        names.iter().map(|name| instantiate_plugin(name, None).unwrap()).collect()
    }

    #[test]
    fn test_generate_all_plugins() {
        let files = generate(&document(), &plugins(&["typescript", "valibot"])).unwrap();
        let ids: Vec<_> = files.iter().map(GeneratedFile::id).collect();
        assert_eq!(ids, ["types", "valibot"]);

        assert_eq!(files[0].render(), "export interface Pet {\n  name: string;\n}\n");
        assert_eq!(
            files[1].render(),
            "import * as v from \"valibot\";\n\n\
             export const vPet = v.object({ name: v.string() });\n\n\
             export const vGetPetData = v.object({ body: v.optional(v.never()), \
             path: v.optional(v.never()), query: v.optional(v.never()) });\n\n\
             export const vGetPetResponse = vPet;\n"
        );
    }

    /// Re-exports every schema validator under a second name, reading the
    /// validator names from the valibot output.
    #[derive(Debug)]
    struct AliasPlugin {
        descriptor: PluginDescriptor,
    }

    impl AliasPlugin {
        fn new() -> Self {
            Self {
                descriptor: PluginDescriptor {
                    name: "aliases".to_string(),
                    dependencies: vec!["valibot".to_string()],
                    output: "aliases".to_string(),
                },
            }
        }
    }

    impl Plugin for AliasPlugin {
        fn descriptor(&self) -> &PluginDescriptor {
            &self.descriptor
        }

        fn handle(&self, context: &mut PluginContext<'_>) -> Result<()> {
            let validators = context
                .file_of("valibot")
                .ok_or_else(|| GenerateError::Config("valibot did not run".to_string()))?;
            context.for_each(&[EventKind::Schema], |file, event| {
                if let Some(name) = event.reference().and_then(|r| validators.name_of(r)) {
                    file.add(TsStmt::Const {
                        export: true,
                        name: format!("{name}Alias"),
                        ty: None,
                        init: TsExpr::ident(name),
                    });
                }
                Ok(())
            })
        }
    }

    #[test]
    fn test_plugin_reads_dependency_output() {
        let mut active: Vec<Box<dyn Plugin>> = vec![Box::new(AliasPlugin::new())];
        active.extend(plugins(&["valibot"]));

        let files = generate(&document(), &active).unwrap();
        let ids: Vec<_> = files.iter().map(GeneratedFile::id).collect();
        assert_eq!(ids, ["valibot", "aliases"]);
        assert_eq!(files[1].render(), "export const vPetAlias = vPet;\n");
    }

    #[test]
    fn test_file_of_without_earlier_plugins() {
        let document = document();
        let context = PluginContext::new(&document, GeneratedFile::new("alone"));
        assert!(context.file_of("valibot").is_none());
    }

    #[test]
    fn test_shared_output_is_rejected() {
        let plugins: Vec<Box<dyn Plugin>> = vec![
            instantiate_plugin("typescript", Some(json!({ "output": "out" }))).unwrap(),
            instantiate_plugin("valibot", Some(json!({ "output": "out" }))).unwrap(),
        ];
        let err = generate(&document(), &plugins).unwrap_err();
        assert!(matches!(err, GenerateError::Config(_)));
    }

    #[test]
    fn test_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("generated");
        let files = generate(&document(), &plugins(&["valibot"])).unwrap();

        let written = write_files(&target, &files).unwrap();
        assert_eq!(written, [target.join("valibot.ts")]);
        let text = fs::read_to_string(&written[0]).unwrap();
        assert!(text.starts_with("import * as v from \"valibot\";"));
        assert!(text.contains("export const vPet = "));
    }
}
