//! Read-only snapshot of the host framework's model registry.
//!
//! The registry maps app names to the entities they declare, both in
//! declaration order. It is always handed to consumers as a value; nothing in
//! modeld2 reads a global registry.
//!
//! # Example
//!
//! ```
//! use modeld2_core::{
//!     field::FieldDecl,
//!     label::EntityLabel,
//!     registry::{AppDecl, AppModule, EntityDecl, Registry},
//! };
//!
//! let registry = Registry::new().with_app(
//!     "chat",
//!     AppDecl::new(AppModule::at("/srv/project/apps/chat/__init__.py")).with_entity(
//!         "Chat",
//!         EntityDecl::new(vec![FieldDecl::plain("name", "CharField")]),
//!     ),
//! );
//!
//! let chat = registry.entity(&EntityLabel::new("chat", "Chat")).unwrap();
//! assert_eq!(chat.fields().len(), 1);
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{field::FieldDecl, label::EntityLabel};

/// Snapshot of every app and entity known to the host framework.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Registry {
    #[serde(default)]
    apps: IndexMap<String, AppDecl>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an app, replacing any previous app with the same name.
    pub fn with_app(mut self, name: impl Into<String>, app: AppDecl) -> Self {
        self.apps.insert(name.into(), app);
        self
    }

    /// Iterates over apps in registry order.
    pub fn apps(&self) -> impl Iterator<Item = (&str, &AppDecl)> {
        self.apps.iter().map(|(name, app)| (name.as_str(), app))
    }

    /// Returns the module descriptor of an app.
    pub fn app_module(&self, name: &str) -> Option<&AppModule> {
        self.apps.get(name).map(AppDecl::module)
    }

    /// Looks up an entity by label across all apps, abstract ones included.
    pub fn entity(&self, label: &EntityLabel) -> Option<Entity<'_>> {
        self.apps
            .get(label.app())?
            .models
            .get(label.name())
            .map(|decl| Entity::new(label.clone(), decl))
    }

    /// Iterates over every entity of every app in registry order.
    pub fn entities(&self) -> impl Iterator<Item = Entity<'_>> {
        self.apps
            .iter()
            .flat_map(|(app_name, app)| app.entities(app_name))
    }

    pub fn apps_count(&self) -> usize {
        self.apps.len()
    }
}

/// Descriptor of the module an app is defined in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppModule {
    /// Dotted module name, e.g. `apps.chat`.
    #[serde(default)]
    name: Option<String>,

    /// Source path of the module, if the host could determine it.
    #[serde(default)]
    path: Option<PathBuf>,
}

impl AppModule {
    /// Creates a module descriptor located at `path`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            name: None,
            path: Some(path.into()),
        }
    }

    /// Sets the dotted module name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// An app and the entities it declares.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppDecl {
    #[serde(default)]
    module: AppModule,

    #[serde(default)]
    models: IndexMap<String, EntityDecl>,
}

impl AppDecl {
    pub fn new(module: AppModule) -> Self {
        Self {
            module,
            models: IndexMap::new(),
        }
    }

    /// Adds an entity, replacing any previous entity with the same name.
    pub fn with_entity(mut self, name: impl Into<String>, entity: EntityDecl) -> Self {
        self.models.insert(name.into(), entity);
        self
    }

    pub fn module(&self) -> &AppModule {
        &self.module
    }

    /// Iterates over this app's entities in declaration order.
    ///
    /// The app does not know its own name, so the caller supplies it to build
    /// the labels.
    pub fn entities<'a>(&'a self, app_name: &'a str) -> impl Iterator<Item = Entity<'a>> {
        self.models
            .iter()
            .map(move |(name, decl)| Entity::new(EntityLabel::new(app_name, name), decl))
    }
}

/// Declaration of a single entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EntityDecl {
    #[serde(rename = "abstract", default)]
    is_abstract: bool,

    /// Raw references to the declared direct base types.
    #[serde(default)]
    bases: Vec<String>,

    /// Full ordered field list, inherited fields included.
    #[serde(default)]
    fields: Vec<FieldDecl>,
}

impl EntityDecl {
    /// Creates a concrete entity declaration.
    pub fn new(fields: Vec<FieldDecl>) -> Self {
        Self {
            is_abstract: false,
            bases: Vec::new(),
            fields,
        }
    }

    /// Creates an abstract entity declaration.
    pub fn new_abstract(fields: Vec<FieldDecl>) -> Self {
        Self {
            is_abstract: true,
            ..Self::new(fields)
        }
    }

    /// Appends a declared base reference.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.bases.push(base.into());
        self
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn bases(&self) -> &[String] {
        &self.bases
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }
}

/// An entity declaration together with its label.
#[derive(Debug, Clone)]
pub struct Entity<'a> {
    label: EntityLabel,
    decl: &'a EntityDecl,
}

impl<'a> Entity<'a> {
    pub fn new(label: EntityLabel, decl: &'a EntityDecl) -> Self {
        Self { label, decl }
    }

    pub fn label(&self) -> &EntityLabel {
        &self.label
    }

    pub fn decl(&self) -> &'a EntityDecl {
        self.decl
    }

    pub fn fields(&self) -> &'a [FieldDecl] {
        self.decl.fields()
    }

    pub fn is_abstract(&self) -> bool {
        self.decl.is_abstract()
    }

    /// Returns the direct abstract ancestors of this entity.
    ///
    /// Bases that resolve to no registry entity (such as the framework's root
    /// model type), to a concrete entity, or to the entity itself are skipped.
    /// Each ancestor is reported once, in declaration order.
    pub fn abstract_bases(&self, registry: &'a Registry) -> Vec<Entity<'a>> {
        let mut ancestors: Vec<Entity<'a>> = Vec::new();
        for raw in self.decl.bases() {
            let Some(label) = EntityLabel::resolve_reference(raw, &self.label) else {
                continue;
            };
            if label == self.label || ancestors.iter().any(|a| a.label == label) {
                continue;
            }
            match registry.entity(&label) {
                Some(base) if base.is_abstract() => ancestors.push(base),
                _ => {}
            }
        }
        ancestors
    }
}
