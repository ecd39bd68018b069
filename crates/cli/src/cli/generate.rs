//! `schemac generate`

use std::fs;
use std::path::PathBuf;

use clap::Args;
use schemac_core::{Plugin, instantiate_plugin, write_files};
use schemac_ir::IrDocument;
use tracing::info;

use crate::config::{DEFAULT_OUTPUT, ProjectConfig};
use crate::error::CliError;

/// Arguments of `schemac generate`.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(long, short = 'i', value_name = "IR_JSON", help = "The IR document to compile")]
    pub input: PathBuf,
    #[arg(long, short = 'c', value_name = "CONFIG", help = "Path to a schemac.toml")]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        short = 'o',
        value_name = "DIR",
        help = "Output directory. Defaults to the config's `output`, then `generated`"
    )]
    pub output: Option<PathBuf>,
    #[arg(
        long = "plugin",
        short = 'p',
        value_name = "NAME",
        help = "Plugin to run; repeatable. Defaults to the config's plugins, then all built-ins"
    )]
    pub plugins: Vec<String>,
}

/// Run the command and return the process exit code.
pub fn run(args: &GenerateArgs) -> i32 {
    match generate(args) {
        Ok(paths) => {
            for path in paths {
                println!("{}", path.display());
            }
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn generate(args: &GenerateArgs) -> Result<Vec<PathBuf>, CliError> {
    let config = match &args.config {
        Some(path) => ProjectConfig::load(path)?,
        None => ProjectConfig::default(),
    };

    let mut plugins: Vec<Box<dyn Plugin>> = Vec::new();
    for entry in config.select_plugins(&args.plugins) {
        plugins.push(instantiate_plugin(entry.name(), entry.options()?)?);
    }

    let text = fs::read_to_string(&args.input).map_err(|source| CliError::Read {
        path: args.input.clone(),
        source,
    })?;
    let document = IrDocument::from_json(&text)?;
    info!(
        input = %args.input.display(),
        schemas = document.components.schemas.len(),
        operations = document.operations.len(),
        "loaded IR document"
    );

    let files = schemac_core::generate(&document, &plugins)?;

    let output = args
        .output
        .clone()
        .or(config.output)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    Ok(write_files(&output, &files)?)
}
