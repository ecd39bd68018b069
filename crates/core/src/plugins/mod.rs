//! Built-in plugins.

pub mod typescript;
pub mod valibot;
