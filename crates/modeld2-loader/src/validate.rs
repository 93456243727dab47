//! Semantic validation of a deserialized registry.
//!
//! Structural problems that make the snapshot meaningless are errors.
//! Reference gaps are warnings only: diagram generation degrades around
//! them, so they must not reject the snapshot.

use std::collections::HashMap;

use modeld2_core::{
    field::FieldDecl,
    label::EntityLabel,
    registry::{Entity, Registry},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, LoadError},
    locate::Locator,
    span::Span,
};

/// Base references naming the framework's root model type.
const ROOT_MODEL_REFERENCES: &[&str] = &[
    "django.db.models.Model",
    "django.db.models.base.Model",
    "models.Model",
    "Model",
];

/// Validates `registry` against the document it was read from.
///
/// Returns the warnings when no error was found.
pub(crate) fn validate(registry: &Registry, source: &str) -> Result<Vec<Diagnostic>, LoadError> {
    let locator = Locator::new(source);
    let mut collector = DiagnosticCollector::new();

    for (app_name, app) in registry.apps() {
        if app_name.trim().is_empty() {
            collector.emit(
                Diagnostic::new(ErrorCode::E201, "app name is empty")
                    .with_label(locator.app(app_name), "empty app name"),
            );
        }

        for entity in app.entities(app_name) {
            let entity_span = locator.entity(app_name, entity.label().name());

            if entity.label().name().trim().is_empty() {
                collector.emit(
                    Diagnostic::new(
                        ErrorCode::E201,
                        format!("entity name in app `{app_name}` is empty"),
                    )
                    .with_label(entity_span, "empty entity name"),
                );
            }

            check_bases(&mut collector, &locator, registry, &entity, entity_span);
            check_fields(&mut collector, &locator, registry, &entity, entity_span);
        }
    }

    collector.finish()
}

fn check_bases(
    collector: &mut DiagnosticCollector,
    locator: &Locator<'_>,
    registry: &Registry,
    entity: &Entity<'_>,
    entity_span: Span,
) {
    for raw in entity.decl().bases() {
        if ROOT_MODEL_REFERENCES.contains(&raw.trim()) {
            continue;
        }

        let resolved = EntityLabel::resolve_reference(raw, entity.label())
            .filter(|label| registry.entity(label).is_some());
        if resolved.is_none() {
            collector.emit(
                Diagnostic::new(
                    ErrorCode::E300,
                    format!("base `{raw}` of `{}` is not in the registry", entity.label()),
                )
                .with_label(locator.find_nth_quoted(raw, entity_span, 0), "unknown base")
                .with_help("fields inherited from this base stay on the entity itself"),
            );
        }
    }
}

fn check_fields(
    collector: &mut DiagnosticCollector,
    locator: &Locator<'_>,
    registry: &Registry,
    entity: &Entity<'_>,
    entity_span: Span,
) {
    // Field name -> number of occurrences seen so far
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for field in entity.fields() {
        let name = field.name();
        let occurrence = seen.get(name).copied().unwrap_or(0);
        seen.insert(name, occurrence + 1);

        if name.trim().is_empty() {
            collector.emit(
                Diagnostic::new(
                    ErrorCode::E201,
                    format!("`{}` declares a field without a name", entity.label()),
                )
                .with_label(entity_span, "entity with unnamed field"),
            );
            continue;
        }

        if occurrence > 0 {
            collector.emit(
                Diagnostic::new(
                    ErrorCode::E200,
                    format!(
                        "field `{name}` is declared more than once on `{}`",
                        entity.label()
                    ),
                )
                .with_label(
                    locator.find_nth_quoted(name, entity_span, occurrence),
                    "duplicate field",
                )
                .with_secondary_label(
                    locator.find_nth_quoted(name, entity_span, 0),
                    "first declared here",
                )
                .with_help("field names must be unique within an entity"),
            );
            continue;
        }

        check_target(collector, locator, registry, entity, field, entity_span);
    }
}

fn check_target(
    collector: &mut DiagnosticCollector,
    locator: &Locator<'_>,
    registry: &Registry,
    entity: &Entity<'_>,
    field: &FieldDecl,
    entity_span: Span,
) {
    if !field.kind().is_association() {
        return;
    }

    let field_span = locator.find_nth_quoted(field.name(), entity_span, 0);
    match field.target_label(entity.label()) {
        None => collector.emit(
            Diagnostic::new(
                ErrorCode::E301,
                format!(
                    "association `{}` of `{}` has no target",
                    field.name(),
                    entity.label()
                ),
            )
            .with_label(field_span, "missing target")
            .with_help("add a `to` reference naming the target entity"),
        ),
        Some(target) if registry.entity(&target).is_none() => collector.emit(
            Diagnostic::new(
                ErrorCode::E301,
                format!(
                    "association `{}` of `{}` targets unknown entity `{target}`",
                    field.name(),
                    entity.label()
                ),
            )
            .with_label(field_span, "unresolved target")
            .with_help("include the target's app in the snapshot or fix the reference"),
        ),
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> Result<Vec<Diagnostic>, LoadError> {
        let registry: Registry = serde_json::from_str(source).unwrap();
        validate(&registry, source)
    }

    #[test]
    fn test_clean_registry_has_no_diagnostics() {
        let warnings = run(
            r#"{"apps": {"chat": {"models": {
                "Chat": {"fields": [{"name": "id", "type": "AutoField"}]},
                "Message": {"bases": ["django.db.models.Model"], "fields": [
                    {"name": "chat", "type": "ForeignKey", "to": "Chat"}
                ]}
            }}}}"#,
        )
        .unwrap();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn test_duplicate_field_is_an_error() {
        let source = r#"{"apps": {"chat": {"models": {"Vote": {"fields": [
            {"name": "user"}, {"name": "user"}
        ]}}}}}"#;
        let err = run(source).unwrap_err();

        assert_eq!(err.diagnostics().len(), 1);
        let diag = &err.diagnostics()[0];
        assert_eq!(diag.code(), ErrorCode::E200);
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].span().start() > diag.labels()[1].span().start());
    }

    #[test]
    fn test_empty_field_name_is_an_error() {
        let err = run(r#"{"apps": {"chat": {"models": {"Vote": {"fields": [{"name": ""}]}}}}}"#)
            .unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), ErrorCode::E201);
    }

    #[test]
    fn test_reference_gaps_are_warnings() {
        let warnings = run(
            r#"{"apps": {"shop": {"models": {"Order": {
                "bases": ["core.TimeStamped"],
                "fields": [
                    {"name": "owner", "type": "ForeignKey", "to": "auth.User"},
                    {"name": "coupon", "type": "ForeignKey"},
                    {"name": "tags", "type": "TaggableManager", "to": "taggit.Tag"}
                ]
            }}}}}"#,
        )
        .unwrap();

        let codes: Vec<_> = warnings.iter().map(|d| d.code()).collect();
        assert_eq!(
            codes,
            vec![
                ErrorCode::E300,
                ErrorCode::E301,
                ErrorCode::E301,
                ErrorCode::E301,
            ]
        );
        assert!(warnings.iter().all(|d| d.severity().is_warning()));
    }
}
