//! Deciding whether an app is authored locally or installed as a dependency.
//!
//! The decision is injected through the [`OriginPredicate`] trait. The
//! default [`VendorPathPredicate`] inspects the module path for directory
//! markers of installed packages.

use crate::registry::AppModule;

/// Directory marker of packages installed by the host's package manager.
pub const DEFAULT_VENDOR_MARKER: &str = "site-packages";

/// Classifies an app module as locally authored or third-party.
pub trait OriginPredicate {
    /// Returns `true` if the module belongs to the project itself.
    fn is_local(&self, module: &AppModule) -> bool;
}

impl<F> OriginPredicate for F
where
    F: Fn(&AppModule) -> bool,
{
    fn is_local(&self, module: &AppModule) -> bool {
        self(module)
    }
}

/// Treats a module as local when its path contains no vendor marker.
///
/// Modules without a known path are never local.
///
/// # Examples
///
/// ```
/// use modeld2_core::{origin::{OriginPredicate, VendorPathPredicate}, registry::AppModule};
///
/// let predicate = VendorPathPredicate::default();
/// assert!(predicate.is_local(&AppModule::at("/srv/project/apps/chat/__init__.py")));
/// assert!(!predicate.is_local(&AppModule::at(
///     "/usr/lib/python3/site-packages/django/contrib/auth/__init__.py"
/// )));
/// assert!(!predicate.is_local(&AppModule::default()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorPathPredicate {
    markers: Vec<String>,
}

impl VendorPathPredicate {
    /// Creates a predicate with custom vendor markers.
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }
}

impl Default for VendorPathPredicate {
    fn default() -> Self {
        Self::new([DEFAULT_VENDOR_MARKER])
    }
}

impl OriginPredicate for VendorPathPredicate {
    fn is_local(&self, module: &AppModule) -> bool {
        let Some(path) = module.path() else {
            return false;
        };
        let path = path.to_string_lossy();
        !self
            .markers
            .iter()
            .filter(|marker| !marker.is_empty())
            .any(|marker| path.contains(marker.as_str()))
    }
}
