//! Plugin descriptors, dependency scheduling and event dispatch.

use std::collections::{HashMap, HashSet};
use std::fmt;

use schemac_ir::{Event, EventKind, IrDocument, ResolveRef, SchemaNode};
use tracing::debug;

use crate::error::{GenerateError, Result};
use crate::file::GeneratedFile;
use crate::plugins::{typescript, valibot};

/// Static description of a plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDescriptor {
    /// Unique name within a run.
    pub name: String,
    /// Plugins that must run first. Names not in the active set are ignored.
    pub dependencies: Vec<String>,
    /// Output key; the generated file is `<output>.ts`.
    pub output: String,
}

/// A configured plugin instance, alive for one generation run.
pub trait Plugin: fmt::Debug {
    /// Name, dependencies and output key.
    fn descriptor(&self) -> &PluginDescriptor;

    /// Fill the plugin's output file.
    fn handle(&self, context: &mut PluginContext<'_>) -> Result<()>;
}

/// What a plugin sees while it runs: the document, its own output file, and
/// the files of the plugins that already ran.
#[derive(Debug)]
pub struct PluginContext<'a> {
    document: &'a IrDocument,
    file: GeneratedFile,
    produced: &'a [(String, GeneratedFile)],
}

impl<'a> PluginContext<'a> {
    /// Context for a plugin with no earlier outputs to read.
    pub fn new(document: &'a IrDocument, file: GeneratedFile) -> Self {
        Self::with_produced(document, file, &[])
    }

    /// Context that can read `produced`, the `(plugin name, file)` pairs of
    /// every plugin that ran before this one.
    pub fn with_produced(
        document: &'a IrDocument,
        file: GeneratedFile,
        produced: &'a [(String, GeneratedFile)],
    ) -> Self {
        Self {
            document,
            file,
            produced,
        }
    }

    /// The document being compiled.
    pub fn document(&self) -> &'a IrDocument {
        self.document
    }

    /// This plugin's output file.
    pub fn file(&mut self) -> &mut GeneratedFile {
        &mut self.file
    }

    /// The finished file of the plugin named `plugin`, when it already ran.
    pub fn file_of(&self, plugin: &str) -> Option<&'a GeneratedFile> {
        self.produced
            .iter()
            .find(|(name, _)| name == plugin)
            .map(|(_, file)| file)
    }

    /// Follow a `$ref` in the document.
    pub fn resolve(&self, reference: &str) -> Result<&'a SchemaNode> {
        Ok(self.document.resolve(reference)?)
    }

    /// Walk the document's events in order, calling `handler` for every
    /// event whose kind is in `kinds`. The first error stops the walk.
    pub fn for_each<F>(&mut self, kinds: &[EventKind], mut handler: F) -> Result<()>
    where
        F: FnMut(&mut GeneratedFile, &Event<'a>) -> Result<()>,
    {
        let document = self.document;
        for event in document.events() {
            if !kinds.contains(&event.kind()) {
                continue;
            }
            debug!(kind = ?event.kind(), reference = ?event.reference(), "dispatching event");
            handler(&mut self.file, &event)?;
        }
        Ok(())
    }

    /// Hand back the finished output file.
    pub fn into_file(self) -> GeneratedFile {
        self.file
    }
}

/// Order plugins so every plugin runs after its dependencies.
///
/// Depth-first in declaration order: each plugin is scheduled right after
/// its not-yet-scheduled dependencies, so unrelated plugins keep their
/// declared order. Returns indices into `descriptors`.
pub fn resolve_order(descriptors: &[PluginDescriptor]) -> Result<Vec<usize>> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(descriptors.len());
    for (i, descriptor) in descriptors.iter().enumerate() {
        if index.insert(descriptor.name.as_str(), i).is_some() {
            return Err(GenerateError::DuplicatePlugin {
                name: descriptor.name.clone(),
            });
        }
    }

    struct Walk<'d> {
        descriptors: &'d [PluginDescriptor],
        index: HashMap<&'d str, usize>,
        done: HashSet<usize>,
        stack: Vec<usize>,
        order: Vec<usize>,
    }

    impl Walk<'_> {
        fn visit(&mut self, i: usize) -> Result<()> {
            if self.done.contains(&i) {
                return Ok(());
            }
            if let Some(start) = self.stack.iter().position(|&s| s == i) {
                let mut plugins: Vec<String> = self.stack[start..]
                    .iter()
                    .map(|&s| self.descriptors[s].name.clone())
                    .collect();
                plugins.push(self.descriptors[i].name.clone());
                return Err(GenerateError::PluginCycle { plugins });
            }

            self.stack.push(i);
            let descriptors = self.descriptors;
            for dependency in &descriptors[i].dependencies {
                if let Some(&d) = self.index.get(dependency.as_str()) {
                    self.visit(d)?;
                }
            }
            self.stack.pop();

            self.done.insert(i);
            self.order.push(i);
            Ok(())
        }
    }

    let mut walk = Walk {
        descriptors,
        index,
        done: HashSet::new(),
        stack: Vec::new(),
        order: Vec::with_capacity(descriptors.len()),
    };
    for i in 0..descriptors.len() {
        walk.visit(i)?;
    }
    Ok(walk.order)
}

/// Names accepted by [`instantiate_plugin`].
pub const BUILTIN_PLUGINS: &[&str] = &[typescript::NAME, valibot::NAME];

/// Build a plugin from its name and optional user config.
pub fn instantiate_plugin(name: &str, config: Option<serde_json::Value>) -> Result<Box<dyn Plugin>> {
    match name {
        typescript::NAME => Ok(Box::new(typescript::TypeScriptPlugin::from_json(config)?)),
        valibot::NAME => Ok(Box::new(valibot::ValibotPlugin::from_json(config)?)),
        _ => Err(GenerateError::UnknownPlugin {
            name: name.to_string(),
            available: BUILTIN_PLUGINS.join(", "),
        }),
    }
}
