#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
//! Schema compiler core: turns an [`IrDocument`](schemac_ir::IrDocument) into
//! generated TypeScript files by running an ordered set of plugins over the
//! document's events.

pub mod case;
pub mod config;
pub mod dialect;
pub mod error;
pub mod file;
pub mod generate;
pub mod plugin;
pub mod plugins;
pub mod ts;

pub use error::{GenerateError, Result};
pub use file::{GeneratedFile, Identifier};
pub use generate::{generate, write_files};
pub use plugin::{BUILTIN_PLUGINS, Plugin, PluginContext, PluginDescriptor, instantiate_plugin};
