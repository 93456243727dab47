//! Error codes for the loader diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Document errors
//! - `E2xx` - Declaration errors
//! - `E3xx` - Reference warnings

use std::fmt;

use crate::error::Severity;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document Errors (E1xx)
    // =========================================================================
    /// Malformed JSON.
    ///
    /// The snapshot is not syntactically valid JSON.
    E100,

    /// Unexpected document shape.
    ///
    /// The JSON is valid but does not describe a registry, e.g. a field
    /// list where an object was expected.
    E101,

    // =========================================================================
    // Declaration Errors (E2xx)
    // =========================================================================
    /// Duplicate field.
    ///
    /// The same field name appears twice in one entity's field list.
    E200,

    /// Empty name.
    ///
    /// An app, entity, or field has an empty name.
    E201,

    // =========================================================================
    // Reference Warnings (E3xx)
    // =========================================================================
    /// Unknown base.
    ///
    /// A declared base resolves to no entity in the registry.
    E300,

    /// Unresolvable association target.
    ///
    /// An association field has no target, or its target resolves to no
    /// entity in the registry.
    E301,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
        }
    }

    /// Reference gaps (`E3xx`) are warnings; everything else rejects the
    /// snapshot.
    pub fn severity(&self) -> Severity {
        match self {
            ErrorCode::E300 | ErrorCode::E301 => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "malformed snapshot",
            ErrorCode::E101 => "unexpected snapshot shape",
            ErrorCode::E200 => "duplicate field",
            ErrorCode::E201 => "empty name",
            ErrorCode::E300 => "unknown base",
            ErrorCode::E301 => "unresolvable association target",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_as_str() {
        for code in [
            ErrorCode::E100,
            ErrorCode::E101,
            ErrorCode::E200,
            ErrorCode::E201,
            ErrorCode::E300,
            ErrorCode::E301,
        ] {
            assert_eq!(code.to_string(), code.as_str());
            assert!(!code.description().is_empty());
        }
    }

    #[test]
    fn test_only_reference_codes_are_warnings() {
        assert!(ErrorCode::E100.severity().is_error());
        assert!(ErrorCode::E201.severity().is_error());
        assert!(ErrorCode::E300.severity().is_warning());
        assert!(ErrorCode::E301.severity().is_warning());
    }
}
