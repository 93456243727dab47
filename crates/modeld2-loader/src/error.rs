//! Error and diagnostic system for the snapshot loader.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Multiple labeled spans for rich error context
//! - Severity levels
//! - Diagnostic collector for accumulating multiple errors
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type: an
//! [`ErrorCode`], a message, labeled source locations and optional help text.
//! The code determines the [`Severity`]. Fatal diagnostics are wrapped in
//! [`LoadError`]; warnings are handed back alongside the loaded registry.
//!
//! # Example
//!
//! ```
//! # use modeld2_loader::error::{Diagnostic, ErrorCode};
//! # use modeld2_loader::Span;
//!
//! let diag = Diagnostic::new(
//!     ErrorCode::E200,
//!     "field `user` is declared more than once on `chat.Vote`",
//! )
//! .with_label(Span::new(120..126), "duplicate field")
//! .with_secondary_label(Span::new(80..86), "first declared here")
//! .with_help("field names must be unique within an entity");
//! assert!(diag.severity().is_error());
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod load_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use load_error::LoadError;
pub use severity::Severity;
