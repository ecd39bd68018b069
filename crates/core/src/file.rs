//! Generated output file: statements, imports and the identifier table.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use schemac_ir::ref_to_name;
use tracing::debug;

use crate::case::{StringCase, StringName};
use crate::ts::{Emit, TsImport, TsModule, TsStmt};

/// Result of an identifier lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// Assigned name, absent when none was assigned and none was requested.
    pub name: Option<String>,
    /// True only on the call that minted the name.
    pub created: bool,
}

/// One output module. Owns everything added to it.
#[derive(Debug)]
pub struct GeneratedFile {
    id: String,
    imports: Vec<TsImport>,
    body: Vec<TsStmt>,
    identifiers: HashMap<String, String>,
    names: HashSet<String>,
}

impl GeneratedFile {
    /// Empty file for output key `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            imports: Vec::new(),
            body: Vec::new(),
            identifiers: HashMap::new(),
            names: HashSet::new(),
        }
    }

    /// The output key this file was created for.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Path relative to the output directory.
    pub fn path(&self) -> PathBuf {
        PathBuf::from(format!("{}.ts", self.id))
    }

    /// Append a statement. Statements render in call order.
    pub fn add(&mut self, stmt: TsStmt) {
        self.body.push(stmt);
    }

    /// Register an import, once per module and binding.
    pub fn import(&mut self, import: TsImport) {
        let exists = self
            .imports
            .iter()
            .any(|existing| existing.from == import.from && existing.binding == import.binding);
        if !exists {
            self.imports.push(import);
        }
    }

    /// Body statements in order.
    pub fn statements(&self) -> &[TsStmt] {
        &self.body
    }

    /// True when no statement was added. Imports do not count.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Look up, or with `create` mint, the name for `reference`.
    ///
    /// Idempotent: once minted, the same name comes back with
    /// `created = false`. Minted names are unique within the file.
    pub fn identifier(
        &mut self,
        reference: &str,
        case: StringCase,
        transformer: &StringName,
        create: bool,
    ) -> Identifier {
        if let Some(name) = self.identifiers.get(reference) {
            return Identifier {
                name: Some(name.clone()),
                created: false,
            };
        }

        if !create {
            return Identifier {
                name: None,
                created: false,
            };
        }

        let base = transformer.render(&ref_to_name(reference), case);
        let mut name = base.clone();
        let mut suffix = 2;
        while self.names.contains(&name) {
            name = format!("{base}{suffix}");
            suffix += 1;
        }

        debug!(reference, name = %name, file = %self.id, "assigned identifier");
        self.names.insert(name.clone());
        self.identifiers.insert(reference.to_string(), name.clone());
        Identifier {
            name: Some(name),
            created: true,
        }
    }

    /// Name already minted for `reference`, without minting one.
    pub fn name_of(&self, reference: &str) -> Option<&str> {
        self.identifiers.get(reference).map(String::as_str)
    }

    /// Snapshot of the file as a [`TsModule`].
    pub fn to_module(&self) -> TsModule {
        TsModule {
            imports: self.imports.clone(),
            body: self.body.clone(),
        }
    }

    /// Render the module text.
    pub fn render(&self) -> String {
        self.to_module().emit()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::dialect;
    use crate::ts::{ImportBinding, ImportItem};

    fn template() -> StringName {
        StringName::template("v{{name}}")
    }

    #[test]
    fn test_identifier_is_idempotent() {
        let mut file = GeneratedFile::new("valibot");
        let reference = "#/components/schemas/Pet";

        let missing = file.identifier(reference, StringCase::CamelCase, &template(), false);
        assert_eq!(missing, Identifier { name: None, created: false });

        let first = file.identifier(reference, StringCase::CamelCase, &template(), true);
        assert_eq!(first.name.as_deref(), Some("vPet"));
        assert!(first.created);

        let second = file.identifier(reference, StringCase::CamelCase, &template(), true);
        assert_eq!(second.name.as_deref(), Some("vPet"));
        assert!(!second.created);

        let lookup = file.identifier(reference, StringCase::CamelCase, &template(), false);
        assert_eq!(lookup.name.as_deref(), Some("vPet"));
        assert_eq!(file.name_of(reference), Some("vPet"));
        assert_eq!(file.name_of("#/components/schemas/Owner"), None);
    }

    #[test]
    fn test_colliding_names_get_suffix() {
        let mut file = GeneratedFile::new("valibot");
        let a = file.identifier("#/components/schemas/pet", StringCase::CamelCase, &template(), true);
        let b = file.identifier("#/components/schemas/Pet", StringCase::CamelCase, &template(), true);
        assert_eq!(a.name.as_deref(), Some("vPet"));
        assert_eq!(b.name.as_deref(), Some("vPet2"));
    }

    #[test]
    fn test_imports_are_deduplicated() {
        let mut file = GeneratedFile::new("valibot");
        file.import(dialect::import());
        file.import(dialect::import());
        file.import(TsImport {
            binding: ImportBinding::Named(vec![ImportItem {
                name: "GenericSchema".into(),
                alias: None,
            }]),
            from: "valibot".into(),
            type_only: true,
        });

        assert_eq!(
            file.render(),
            "import * as v from \"valibot\";\nimport type { GenericSchema } from \"valibot\";\n\n"
        );
        assert!(file.is_empty());
        assert_eq!(file.path(), PathBuf::from("valibot.ts"));
    }
}
