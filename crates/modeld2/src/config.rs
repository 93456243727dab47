//! Configuration types for diagram generation.
//!
//! This module provides the configuration structures that control which
//! entities are exported and how apps are classified. All types implement
//! [`serde::Deserialize`] with every field defaulted, so a partial
//! configuration file only overrides what it names.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining export and origin settings.
//! - [`ExportConfig`] - Which apps and entities end up in the diagram.
//! - [`OriginConfig`] - How third-party apps are recognised.
//!
//! # Example
//!
//! ```
//! # use modeld2::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.export().user_apps_only());
//! assert!(config.export().show_ref());
//! assert_eq!(config.export().abstract_models_depth(), 1);
//! ```

use serde::Deserialize;

use modeld2_core::origin::{DEFAULT_VENDOR_MARKER, VendorPathPredicate};

/// Top-level configuration combining export and origin settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Export configuration section.
    #[serde(default)]
    export: ExportConfig,

    /// Origin configuration section.
    #[serde(default)]
    origin: OriginConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(export: ExportConfig, origin: OriginConfig) -> Self {
        Self { export, origin }
    }

    /// Returns the export configuration.
    pub fn export(&self) -> &ExportConfig {
        &self.export
    }

    /// Returns the origin configuration.
    pub fn origin(&self) -> &OriginConfig {
        &self.origin
    }

    /// Replaces the export configuration.
    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }
}

/// Selection and inheritance settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Restrict the diagram to locally authored apps.
    user_apps_only: bool,

    /// Apps omitted entirely.
    exclude_apps: Vec<String>,

    /// Keep relations whose target is not part of the diagram.
    show_ref: bool,

    /// How many levels of abstract ancestors are split into their own nodes.
    abstract_models_depth: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            user_apps_only: true,
            exclude_apps: Vec::new(),
            show_ref: true,
            abstract_models_depth: 1,
        }
    }
}

impl ExportConfig {
    pub fn user_apps_only(&self) -> bool {
        self.user_apps_only
    }

    pub fn exclude_apps(&self) -> &[String] {
        &self.exclude_apps
    }

    pub fn show_ref(&self) -> bool {
        self.show_ref
    }

    pub fn abstract_models_depth(&self) -> usize {
        self.abstract_models_depth
    }

    /// Returns `true` if `app_name` is in the exclusion list.
    pub fn is_excluded(&self, app_name: &str) -> bool {
        self.exclude_apps.iter().any(|excluded| excluded == app_name)
    }

    pub fn with_user_apps_only(mut self, user_apps_only: bool) -> Self {
        self.user_apps_only = user_apps_only;
        self
    }

    pub fn with_exclude_apps<I, S>(mut self, apps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_apps = apps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_show_ref(mut self, show_ref: bool) -> Self {
        self.show_ref = show_ref;
        self
    }

    pub fn with_abstract_models_depth(mut self, depth: usize) -> Self {
        self.abstract_models_depth = depth;
        self
    }
}

/// Settings for telling local apps from installed packages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OriginConfig {
    /// Path fragments that mark a module as an installed package.
    vendor_markers: Vec<String>,
}

impl Default for OriginConfig {
    fn default() -> Self {
        Self {
            vendor_markers: vec![DEFAULT_VENDOR_MARKER.to_string()],
        }
    }
}

impl OriginConfig {
    pub fn vendor_markers(&self) -> &[String] {
        &self.vendor_markers
    }

    /// Builds the origin predicate described by this configuration.
    pub fn predicate(&self) -> VendorPathPredicate {
        VendorPathPredicate::new(self.vendor_markers.iter().cloned())
    }
}
