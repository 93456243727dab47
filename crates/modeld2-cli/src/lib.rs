//! CLI logic for the modeld2 diagram tool.
//!
//! This module reads a registry snapshot, applies the configuration layers
//! and returns the D2 document that the binary prints to stdout.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use log::info;

use modeld2::{
    DiagramBuilder, ModelD2Error,
    config::{AppConfig, ExportConfig},
};

/// Run the modeld2 CLI application
///
/// This function reads the snapshot from the input path (or stdin), processes
/// it through the modeld2 pipeline and returns the D2 document.
///
/// # Errors
///
/// Returns `ModelD2Error` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed snapshots
pub fn run(args: &Args) -> Result<String, ModelD2Error> {
    info!(
        input_path:? = args.input,
        config_path:? = args.config;
        "Processing registry snapshot"
    );

    let app_config = resolve_config(args)?;
    let source = read_source(args.input.as_deref())?;

    let builder = DiagramBuilder::new(app_config);
    let output = builder.generate(&source)?;

    info!(bytes = output.len(); "D2 document generated");

    Ok(output)
}

/// Loads the configuration file and layers the command-line options on top.
fn resolve_config(args: &Args) -> Result<AppConfig, ModelD2Error> {
    let app_config = config::load_config(args.config.as_ref())?;
    let export = apply_overrides(app_config.export().clone(), args);
    Ok(app_config.with_export(export))
}

fn apply_overrides(mut export: ExportConfig, args: &Args) -> ExportConfig {
    if let Some(user_apps_only) = args.user_apps_only {
        export = export.with_user_apps_only(user_apps_only);
    }
    if let Some(apps) = &args.exclude_apps {
        export = export.with_exclude_apps(apps.iter().cloned());
    }
    if let Some(show_ref) = args.show_ref {
        export = export.with_show_ref(show_ref);
    }
    if let Some(depth) = args.abstract_models_depth {
        export = export.with_abstract_models_depth(depth);
    }
    export
}

/// Reads the snapshot from `path`, or from stdin when it is absent or `-`.
fn read_source(path: Option<&Path>) -> Result<String, ModelD2Error> {
    match path {
        Some(path) if path != Path::new("-") => Ok(fs::read_to_string(path)?),
        _ => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}
