//! `schemac plugins`

use schemac_core::{BUILTIN_PLUGINS, instantiate_plugin};

/// Print one line per built-in plugin: name, output file, dependencies.
pub fn run() -> i32 {
    for name in BUILTIN_PLUGINS {
        match instantiate_plugin(name, None) {
            Ok(plugin) => {
                let descriptor = plugin.descriptor();
                let dependencies = if descriptor.dependencies.is_empty() {
                    "-".to_string()
                } else {
                    descriptor.dependencies.join(", ")
                };
                println!("{name}\t{}.ts\tdepends on: {dependencies}", descriptor.output);
            }
            Err(err) => {
                eprintln!("{err}");
                return 1;
            }
        }
    }
    0
}
