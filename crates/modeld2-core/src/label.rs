//! Entity labels and resolution of raw entity references.
//!
//! Every entity in a registry is addressed by an [`EntityLabel`] of the form
//! `"<app>.<Entity>"`. Declarations refer to other entities through raw
//! reference strings which are resolved relative to the declaring entity.

use std::fmt;

/// Reference keyword pointing back at the declaring entity.
const SELF_REFERENCE: &str = "self";

/// Unique, app-qualified name of an entity.
///
/// # Examples
///
/// ```
/// use modeld2_core::label::EntityLabel;
///
/// let label = EntityLabel::new("chat", "Message");
/// assert_eq!(label.to_string(), "chat.Message");
/// assert_eq!(label.app(), "chat");
/// assert_eq!(label.name(), "Message");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityLabel {
    app: String,
    name: String,
}

impl EntityLabel {
    /// Creates a label from an app name and an entity name.
    pub fn new(app: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            name: name.into(),
        }
    }

    /// Parses a fully qualified `"<app>.<Entity>"` label.
    ///
    /// The app part is everything before the first dot. Returns `None` when
    /// either part is empty or there is no dot at all.
    pub fn parse(qualified: &str) -> Option<Self> {
        let (app, name) = qualified.split_once('.')?;
        if app.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self::new(app, name))
    }

    /// Resolves a raw reference as written on a declaration of `owner`.
    ///
    /// - `"self"` resolves to `owner`
    /// - `"app.Entity"` resolves to that label
    /// - a bare `"Entity"` resolves within the owner's app
    /// - an empty reference does not resolve
    ///
    /// # Examples
    ///
    /// ```
    /// use modeld2_core::label::EntityLabel;
    ///
    /// let owner = EntityLabel::new("chat", "Reply");
    /// assert_eq!(
    ///     EntityLabel::resolve_reference("Message", &owner),
    ///     Some(EntityLabel::new("chat", "Message"))
    /// );
    /// assert_eq!(EntityLabel::resolve_reference("self", &owner), Some(owner.clone()));
    /// assert_eq!(EntityLabel::resolve_reference("", &owner), None);
    /// ```
    pub fn resolve_reference(raw: &str, owner: &EntityLabel) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw == SELF_REFERENCE {
            return Some(owner.clone());
        }
        if raw.contains('.') {
            return Self::parse(raw);
        }
        Some(Self::new(owner.app(), raw))
    }

    /// Returns the app part of the label.
    pub fn app(&self) -> &str {
        &self.app
    }

    /// Returns the entity part of the label.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app, self.name)
    }
}
