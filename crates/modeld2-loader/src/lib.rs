//! # modeld2 Loader
//!
//! Reads a registry snapshot document into a [`Registry`].
//!
//! The snapshot is a JSON document exported from the host framework:
//!
//! ```json
//! {
//!   "apps": {
//!     "chat": {
//!       "module": {"name": "apps.chat", "path": "/srv/project/apps/chat/__init__.py"},
//!       "models": {
//!         "Chat": {"fields": [{"name": "id", "type": "AutoField"}]}
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Loading runs in two steps:
//!
//! 1. **Deserialize** - Parse the JSON and map it onto the registry types
//! 2. **Validate** - Reject structurally broken declarations and collect
//!    warnings for references that do not resolve
//!
//! ## Usage
//!
//! ```
//! # use modeld2_loader::{load, error::LoadError};
//!
//! fn main() -> Result<(), LoadError> {
//!     let source = r#"{"apps": {"chat": {"models": {"Chat": {"fields": [{"name": "id"}]}}}}}"#;
//!     let loaded = load(source)?;
//!     assert_eq!(loaded.registry().apps_count(), 1);
//!     assert!(loaded.warnings().is_empty());
//!     Ok(())
//! }
//! ```

pub mod error;

mod locate;
mod span;
mod validate;

pub use span::Span;

use log::{debug, trace};

use modeld2_core::registry::Registry;

use error::{Diagnostic, ErrorCode, LoadError};

/// A successfully loaded snapshot.
#[derive(Debug)]
pub struct Loaded {
    registry: Registry,
    warnings: Vec<Diagnostic>,
}

impl Loaded {
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Non-fatal problems found while validating the snapshot.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Splits the result into the registry and its warnings.
    pub fn into_parts(self) -> (Registry, Vec<Diagnostic>) {
        (self.registry, self.warnings)
    }
}

/// Load a registry snapshot from JSON source text.
///
/// # Errors
///
/// Returns a [`LoadError`] when the document is not valid JSON, does not have
/// the snapshot shape, or declares duplicate or empty names.
pub fn load(source: &str) -> Result<Loaded, LoadError> {
    let registry: Registry =
        serde_json::from_str(source).map_err(|err| document_diagnostic(&err, source))?;
    debug!(apps = registry.apps_count(); "Snapshot deserialized");

    let warnings = validate::validate(&registry, source)?;
    trace!(warnings = warnings.len(); "Snapshot validated");

    Ok(Loaded { registry, warnings })
}

/// Convert a JSON error into a diagnostic pointing at the failure position.
fn document_diagnostic(err: &serde_json::Error, source: &str) -> Diagnostic {
    let span = Span::from_line_column(source, err.line(), err.column());
    let message = err.to_string();
    // serde_json appends the position, which the label already shows
    let message = match message.rfind(" at line ") {
        Some(pos) => message[..pos].to_string(),
        None => message,
    };

    if err.is_data() {
        Diagnostic::new(
            ErrorCode::E101,
            format!("snapshot does not describe a registry: {message}"),
        )
        .with_label(span, "unexpected value")
        .with_help("expected {\"apps\": {<app>: {\"module\": {...}, \"models\": {...}}}}")
    } else {
        Diagnostic::new(ErrorCode::E100, format!("malformed snapshot: {message}"))
            .with_label(span, "here")
    }
}
