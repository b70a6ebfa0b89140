// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Error diagnostics rendering using miette.
//!
//! Converts easycode-core lexer errors and parser diagnostics into
//! miette-formatted reports with:
//! - Source code context
//! - Arrows pointing to the error location
//! - Diagnostic codes for easy reference
//! - Support for multiple errors and warnings

// Suppress unused_assignments for struct fields used by derive macros
#![allow(unused_assignments)]

use easycode_core::source_analysis::{Diagnostic as CoreDiagnostic, LexError, Severity, Span};
use miette::{Diagnostic, SourceSpan};

/// A front-end diagnostic with rich formatting.
#[derive(Debug, Diagnostic, thiserror::Error)]
#[error("{message}")]
#[diagnostic(code(easycode::syntax))]
pub struct ReportDiagnostic {
    /// Error or warning.
    pub severity: Severity,
    /// Human-readable error message.
    pub message: String,
    /// Source code for context.
    #[source_code]
    pub src: miette::NamedSource<String>,
    /// Location of the error.
    #[label("{label}")]
    pub span: SourceSpan,
    /// Label for the error span (interpolated by the derive macro).
    pub label: String,
}

impl ReportDiagnostic {
    fn new(
        severity: Severity,
        message: String,
        span: Span,
        source_path: &str,
        source: &str,
    ) -> Self {
        let label = match severity {
            Severity::Error => "error here",
            Severity::Warning => "warning here",
        };
        Self {
            severity,
            message,
            src: miette::NamedSource::new(source_path, source.to_string()),
            span: span.into(),
            label: label.to_string(),
        }
    }

    /// Creates a report from a parser diagnostic.
    pub fn from_parse_diagnostic(
        diagnostic: &CoreDiagnostic,
        source_path: &str,
        source: &str,
    ) -> Self {
        Self::new(
            diagnostic.severity,
            diagnostic.message.to_string(),
            diagnostic.span,
            source_path,
            source,
        )
    }

    /// Creates a report from a lexer error.
    pub fn from_lex_error(error: &LexError, source_path: &str, source: &str) -> Self {
        Self::new(
            Severity::Error,
            error.to_string(),
            error.span,
            source_path,
            source,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parse_diagnostic_error() {
        let core = CoreDiagnostic::error("Expected expression", Span::new(10, 15));
        let source = "start x = ; end";
        let report = ReportDiagnostic::from_parse_diagnostic(&core, "test.ec", source);

        assert_eq!(report.severity, Severity::Error);
        assert_eq!(report.message, "Expected expression");
        assert_eq!(report.span.offset(), 10);
        assert_eq!(report.span.len(), 5);
        assert_eq!(report.label, "error here");
    }

    #[test]
    fn from_parse_diagnostic_warning() {
        let core = CoreDiagnostic::warning("Unused variable", Span::new(5, 8));
        let report = ReportDiagnostic::from_parse_diagnostic(&core, "test.ec", "start end");

        assert_eq!(report.severity, Severity::Warning);
        assert_eq!(report.label, "warning here");
    }

    #[test]
    fn from_lex_error() {
        use easycode_core::source_analysis::LexErrorKind;

        let error = LexError::new(LexErrorKind::UnterminatedString, Span::new(6, 11));
        let report = ReportDiagnostic::from_lex_error(&error, "test.ec", "start \"oops end");

        assert_eq!(report.severity, Severity::Error);
        assert_eq!(report.message, "missing closing quote for string literal");
        assert_eq!(report.span.offset(), 6);
    }

    #[test]
    fn zero_length_span() {
        let core = CoreDiagnostic::error("Unexpected end of input", Span::new(10, 10));
        let report = ReportDiagnostic::from_parse_diagnostic(&core, "test.ec", "start end.");
        assert_eq!(report.span.len(), 0);
    }
}
