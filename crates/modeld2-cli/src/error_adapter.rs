//! Rendering [`ModelD2Error`] through miette.
//!
//! Snapshot diagnostics become one report each, with the snapshot as source
//! code so labels show up as annotated snippets. Other errors become a single
//! report with a `modeld2::*` code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use modeld2::ModelD2Error;
use modeld2_loader::error::{Diagnostic, Label, Severity};

/// One report for the terminal.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A snapshot diagnostic together with the snapshot it points into.
    Snapshot { diag: &'a Diagnostic, src: &'a str },
    /// An error without source location.
    Error(&'a ModelD2Error),
}

/// Splits an error into the reports to render, one per snapshot diagnostic.
pub fn to_reportables(err: &ModelD2Error) -> Vec<Reportable<'_>> {
    match err {
        ModelD2Error::Load { err: load_err, src } => load_err
            .diagnostics()
            .iter()
            .map(|diag| Reportable::Snapshot { diag, src })
            .collect(),
        _ => vec![Reportable::Error(err)],
    }
}

fn labeled_span(label: &Label) -> LabeledSpan {
    let span = label.span();
    let span = SourceSpan::new(span.start().into(), span.len());
    let message = Some(label.message().to_string());
    if label.is_primary() {
        LabeledSpan::new_primary_with_span(message, span)
    } else {
        LabeledSpan::new_with_span(message, span)
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Snapshot { diag, .. } => f.write_str(diag.message()),
            Reportable::Error(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Snapshot { .. } => None,
            Reportable::Error(err) => std::error::Error::source(*err),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code: Box<dyn fmt::Display> = match self {
            Reportable::Snapshot { diag, .. } => Box::new(diag.code()),
            Reportable::Error(ModelD2Error::Io(_)) => Box::new("modeld2::io"),
            Reportable::Error(ModelD2Error::Config(_)) => Box::new("modeld2::config"),
            Reportable::Error(ModelD2Error::Load { .. }) => return None,
        };
        Some(code)
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Snapshot { diag, .. } => Some(match diag.severity() {
                Severity::Error => miette::Severity::Error,
                Severity::Warning => miette::Severity::Warning,
            }),
            Reportable::Error(_) => None,
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Snapshot { diag, .. } => diag
                .help()
                .map(|help| Box::new(help) as Box<dyn fmt::Display + 'a>),
            Reportable::Error(_) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Snapshot { src, .. } => Some(src as &dyn miette::SourceCode),
            Reportable::Error(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Snapshot { diag, .. } if !diag.labels().is_empty() => {
                Some(Box::new(diag.labels().iter().map(labeled_span)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use modeld2_loader::{
        Span,
        error::{ErrorCode, LoadError},
    };

    use super::*;

    fn duplicate_field_error() -> ModelD2Error {
        let diags = vec![
            Diagnostic::new(ErrorCode::E200, "field `user` is declared more than once")
                .with_label(Span::new(10..14), "duplicate field")
                .with_secondary_label(Span::new(2..6), "first declared here")
                .with_help("field names must be unique within an entity"),
            Diagnostic::new(ErrorCode::E301, "association `chat` has no target"),
        ];
        ModelD2Error::new_load_error(LoadError::new(diags), "0123456789abcdef")
    }

    #[test]
    fn test_one_report_per_snapshot_diagnostic() {
        let err = duplicate_field_error();
        let reports = to_reportables(&err);

        let codes: Vec<String> = reports
            .iter()
            .map(|r| r.code().unwrap().to_string())
            .collect();
        assert_eq!(codes, vec!["E200", "E301"]);
        assert_eq!(reports[0].severity(), Some(miette::Severity::Error));
        assert_eq!(reports[1].severity(), Some(miette::Severity::Warning));
        assert!(reports[1].labels().is_none());
    }

    #[test]
    fn test_snapshot_labels_and_help() {
        let err = duplicate_field_error();
        let reports = to_reportables(&err);

        let labels: Vec<LabeledSpan> = reports[0].labels().unwrap().collect();
        assert!(labels[0].primary());
        assert_eq!((labels[1].offset(), labels[1].len()), (2, 4));
        assert_eq!(
            reports[0].help().unwrap().to_string(),
            "field names must be unique within an entity"
        );
        assert!(reports[0].source_code().is_some());
    }

    #[test]
    fn test_io_and_config_errors() {
        let io_err = ModelD2Error::Io(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let reports = to_reportables(&io_err);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].code().unwrap().to_string(), "modeld2::io");
        assert!(reports[0].source_code().is_none());

        let config_err = ModelD2Error::Config("bad value".to_string());
        let reports = to_reportables(&config_err);
        assert_eq!(reports[0].code().unwrap().to_string(), "modeld2::config");
        assert_eq!(reports[0].to_string(), "Configuration error: bad value");
    }
}
