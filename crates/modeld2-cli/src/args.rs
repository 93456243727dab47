//! Command-line argument definitions for the modeld2 CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Export options given here override the configuration
//! file; options left out keep the configured value.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Command-line arguments for the modeld2 diagram tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate a D2 diagram of ORM models from a registry snapshot",
    long_about = None
)]
pub struct Args {
    /// Path to the registry snapshot (JSON); reads stdin when omitted or `-`
    pub input: Option<PathBuf>,

    /// Determines if third-party app models are excluded
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    pub user_apps_only: Option<bool>,

    /// App names to omit from the diagram
    #[arg(long, num_args = 1.., value_name = "APP")]
    pub exclude_apps: Option<Vec<String>>,

    /// Keep relations to models outside the diagram, e.g. from excluded apps
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    pub show_ref: Option<bool>,

    /// How deep in the inheritance tree abstract models get their own node
    #[arg(long, value_name = "DEPTH")]
    pub abstract_models_depth: Option<usize>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_leave_options_unset() {
        let args = Args::try_parse_from(["modeld2"]).unwrap();
        assert!(args.input.is_none());
        assert!(args.user_apps_only.is_none());
        assert!(args.exclude_apps.is_none());
        assert!(args.show_ref.is_none());
        assert!(args.abstract_models_depth.is_none());
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_all_options() {
        let args = Args::try_parse_from([
            "modeld2",
            "registry.json",
            "--user-apps-only",
            "false",
            "--show-ref",
            "false",
            "--abstract-models-depth",
            "2",
            "--exclude-apps",
            "admin",
            "sessions",
        ])
        .unwrap();

        assert_eq!(args.input, Some(PathBuf::from("registry.json")));
        assert_eq!(args.user_apps_only, Some(false));
        assert_eq!(args.show_ref, Some(false));
        assert_eq!(args.abstract_models_depth, Some(2));
        assert_eq!(
            args.exclude_apps,
            Some(vec!["admin".to_string(), "sessions".to_string()])
        );
    }

    #[test]
    fn test_invalid_bool_is_rejected() {
        assert!(Args::try_parse_from(["modeld2", "--show-ref", "maybe"]).is_err());
    }

    #[test]
    fn test_negative_depth_is_rejected() {
        assert!(Args::try_parse_from(["modeld2", "--abstract-models-depth", "-1"]).is_err());
    }
}
