#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
//! `schemac` command line: compile an IR document with the built-in plugins.

use std::ffi::OsString;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod cli;
mod config;
mod error;

#[derive(Parser)]
#[command(
    name = "schemac",
    version,
    about = "Compile normalized API schemas into TypeScript types and Valibot validators"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate TypeScript files from an IR document
    Generate(cli::generate::GenerateArgs),
    /// List the built-in plugins
    Plugins,
}

fn main() {
    init_tracing();
    std::process::exit(run_cli(std::env::args_os()));
}

fn run_cli<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Some(Commands::Generate(args)) => cli::generate::run(&args),
            Some(Commands::Plugins) => cli::plugins::run(),
            None => {
                let mut cmd = Cli::command();
                let _ = cmd.print_help();
                println!();
                0
            }
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

fn init_tracing() {
    // Directive targets match by prefix, so this also covers the
    // schemac_core and schemac_ir crates.
    let crate_root = "schemac";

    // SCHEMAC_LOG controls log level: "trace", "debug", "info", "warn", "error"
    // or a full tracing filter spec like "schemac_core=debug"
    let filter = match std::env::var("SCHEMAC_LOG") {
        Ok(level) if is_plain_level(&level) => format!("{crate_root}={level}"),
        Ok(spec) => spec,
        Err(_) => format!("{crate_root}=info"),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_levels() {
        assert!(is_plain_level("debug"));
        assert!(is_plain_level("WARN"));
        assert!(!is_plain_level("schemac_core=debug"));
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "schemac",
            "generate",
            "--input",
            "ir.json",
            "--plugin",
            "valibot",
            "--plugin",
            "typescript",
        ])
        .unwrap();
        let Some(Commands::Generate(args)) = cli.command else {
            unreachable!("expected the generate command");
        };
        assert_eq!(args.input, std::path::PathBuf::from("ir.json"));
        assert_eq!(args.plugins, ["valibot", "typescript"]);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_missing_input_is_a_usage_error() {
        assert_eq!(run_cli(["schemac", "generate"]), 2);
    }
}
