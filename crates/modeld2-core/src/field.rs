//! Field declarations and field-kind classification.
//!
//! A [`FieldDecl`] records what the host framework reports for a single
//! field. [`FieldDecl::kind`] classifies it into a [`FieldKind`], and
//! [`FieldKind::relation_kind`] narrows association kinds down to the
//! [`RelationKind`]s that produce arrows in a diagram.

use std::fmt;

use serde::Deserialize;

use crate::label::EntityLabel;

/// Declared type name of a foreign-key field.
pub const FOREIGN_KEY_TYPE: &str = "ForeignKey";
/// Declared type name of a one-to-one field.
pub const ONE_TO_ONE_TYPE: &str = "OneToOneField";
/// Declared type name of a many-to-many field.
pub const MANY_TO_MANY_TYPE: &str = "ManyToManyField";

/// A field as declared on an entity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldDecl {
    /// Field name, unique within its entity.
    name: String,

    /// Declared class name of the field, e.g. `CharField` or
    /// `django.db.models.ForeignKey`.
    #[serde(rename = "type", default)]
    type_name: String,

    /// Raw reference to the target entity of an association.
    #[serde(default)]
    to: Option<String>,

    /// Whether the column accepts nulls.
    #[serde(default)]
    null: bool,
}

impl FieldDecl {
    /// Creates a non-association field.
    pub fn plain(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            to: None,
            null: false,
        }
    }

    /// Creates an association field pointing at the raw reference `to`.
    pub fn association(
        name: impl Into<String>,
        type_name: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            to: Some(to.into()),
            null: false,
        }
    }

    /// Sets the nullability flag.
    pub fn with_null(mut self, null: bool) -> Self {
        self.null = null;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the raw target reference, if any.
    pub fn target_reference(&self) -> Option<&str> {
        self.to.as_deref()
    }

    pub fn is_nullable(&self) -> bool {
        self.null
    }

    /// Classifies the field by its declared type.
    ///
    /// Only the last dotted segment of the type name is considered and it
    /// must match exactly; subclasses of association types are reported as
    /// [`FieldKind::UnrecognizedAssociation`].
    ///
    /// # Examples
    ///
    /// ```
    /// use modeld2_core::field::{FieldDecl, FieldKind};
    ///
    /// let fk = FieldDecl::association("chat", "django.db.models.ForeignKey", "chat.Chat");
    /// assert_eq!(fk.kind(), FieldKind::ForeignKey);
    ///
    /// let tree = FieldDecl::association("parent", "TreeForeignKey", "self");
    /// assert_eq!(tree.kind(), FieldKind::UnrecognizedAssociation);
    ///
    /// assert_eq!(FieldDecl::plain("name", "CharField").kind(), FieldKind::Plain);
    /// ```
    pub fn kind(&self) -> FieldKind {
        let short_name = self
            .type_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.type_name);

        match short_name {
            FOREIGN_KEY_TYPE => FieldKind::ForeignKey,
            ONE_TO_ONE_TYPE => FieldKind::OneToOne,
            MANY_TO_MANY_TYPE => FieldKind::ManyToMany,
            _ if self.to.is_some() => FieldKind::UnrecognizedAssociation,
            _ => FieldKind::Plain,
        }
    }

    /// Resolves the target reference relative to the declaring entity.
    pub fn target_label(&self, owner: &EntityLabel) -> Option<EntityLabel> {
        self.to
            .as_deref()
            .and_then(|raw| EntityLabel::resolve_reference(raw, owner))
    }
}

/// Classification of a field declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// A regular column.
    Plain,
    /// Many-to-one association.
    ForeignKey,
    /// One-to-one association.
    OneToOne,
    /// Many-to-many association.
    ManyToMany,
    /// An association whose declared type is not in the known mapping.
    UnrecognizedAssociation,
}

impl FieldKind {
    /// Returns the relation kind for association kinds that produce arrows.
    pub fn relation_kind(self) -> Option<RelationKind> {
        match self {
            FieldKind::ForeignKey => Some(RelationKind::ForeignKey),
            FieldKind::OneToOne => Some(RelationKind::OneToOne),
            FieldKind::ManyToMany => Some(RelationKind::ManyToMany),
            FieldKind::Plain | FieldKind::UnrecognizedAssociation => None,
        }
    }

    /// Returns `true` for every kind that references another entity.
    pub fn is_association(self) -> bool {
        !matches!(self, FieldKind::Plain)
    }
}

/// Kind of relation drawn between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    ForeignKey,
    OneToOne,
    ManyToMany,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::ForeignKey => write!(f, "fk"),
            RelationKind::OneToOne => write!(f, "o2o"),
            RelationKind::ManyToMany => write!(f, "m2m"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        let owner = "chat.Chat";
        assert_eq!(
            FieldDecl::association("a", "ForeignKey", owner).kind(),
            FieldKind::ForeignKey
        );
        assert_eq!(
            FieldDecl::association("b", "OneToOneField", owner).kind(),
            FieldKind::OneToOne
        );
        assert_eq!(
            FieldDecl::association("c", "ManyToManyField", owner).kind(),
            FieldKind::ManyToMany
        );
        assert_eq!(
            FieldDecl::association("d", "GenericRelation", owner).kind(),
            FieldKind::UnrecognizedAssociation
        );
        assert_eq!(
            FieldDecl::plain("e", "TextField").kind(),
            FieldKind::Plain
        );
    }

    #[test]
    fn test_foreign_key_without_target_is_still_foreign_key() {
        let field = FieldDecl::plain("owner", "ForeignKey");
        assert_eq!(field.kind(), FieldKind::ForeignKey);
        assert_eq!(field.target_label(&EntityLabel::new("a", "B")), None);
    }

    #[test]
    fn test_relation_kind_only_for_known_associations() {
        assert_eq!(FieldKind::Plain.relation_kind(), None);
        assert_eq!(FieldKind::UnrecognizedAssociation.relation_kind(), None);
        assert_eq!(
            FieldKind::ManyToMany.relation_kind(),
            Some(RelationKind::ManyToMany)
        );
        assert!(FieldKind::UnrecognizedAssociation.is_association());
        assert!(!FieldKind::Plain.is_association());
    }

    #[test]
    fn test_target_label_resolves_relative_to_owner() {
        let owner = EntityLabel::new("chat", "Reply");
        let field = FieldDecl::association("parent_message", "ForeignKey", "Message");
        assert_eq!(
            field.target_label(&owner),
            Some(EntityLabel::new("chat", "Message"))
        );
    }

    #[test]
    fn test_deserialize_defaults() {
        let field: FieldDecl =
            serde_json::from_str(r#"{"name": "user", "type": "ForeignKey", "to": "users.User", "null": true}"#)
                .unwrap();
        assert_eq!(field.name(), "user");
        assert_eq!(field.target_reference(), Some("users.User"));
        assert!(field.is_nullable());

        let plain: FieldDecl = serde_json::from_str(r#"{"name": "message"}"#).unwrap();
        assert_eq!(plain.type_name(), "");
        assert!(!plain.is_nullable());
        assert_eq!(plain.kind(), FieldKind::Plain);
    }
}
