//! Deciding which apps and entities are exported.

use log::debug;

use modeld2_core::{
    origin::OriginPredicate,
    registry::{Entity, Registry},
};

use crate::config::ExportConfig;

/// Pure predicates over the export configuration and registry metadata.
pub struct ModelSelector<'a> {
    config: &'a ExportConfig,
    origin: &'a dyn OriginPredicate,
    registry: &'a Registry,
}

impl<'a> ModelSelector<'a> {
    pub fn new(
        config: &'a ExportConfig,
        origin: &'a dyn OriginPredicate,
        registry: &'a Registry,
    ) -> Self {
        Self {
            config,
            origin,
            registry,
        }
    }

    /// An app is exported unless it is excluded by name or, when only user
    /// apps are wanted, its module is not local.
    ///
    /// Apps missing from the registry have no module and are therefore
    /// never local.
    pub fn should_export_app(&self, app_name: &str) -> bool {
        if self.config.is_excluded(app_name) {
            return false;
        }
        if !self.config.user_apps_only() {
            return true;
        }
        self.registry
            .app_module(app_name)
            .is_some_and(|module| self.origin.is_local(module))
    }

    /// Abstract entities are never exported on their own.
    pub fn should_export_model(&self, entity: &Entity<'_>) -> bool {
        !entity.is_abstract()
    }

    /// Collects the exportable entities of all exportable apps, in registry
    /// order.
    pub fn selected_entities(&self) -> Vec<Entity<'a>> {
        let mut selected = Vec::new();
        for (app_name, app) in self.registry.apps() {
            if !self.should_export_app(app_name) {
                debug!(app = app_name; "Skipping app");
                continue;
            }
            selected.extend(
                app.entities(app_name)
                    .filter(|entity| self.should_export_model(entity)),
            );
        }
        selected
    }
}
