//! Diagnostic reporting for the export pipeline.
//!
//! Pipeline stages never print. They push `Diagnostic`s into a `Reporter`
//! handed to them by the caller; the CLI passes a `Printer`, tests pass a
//! `Collector`.

use std::cell::RefCell;
use std::fmt;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single non-fatal observation made while exporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Machine-readable code (e.g. "nextile::map::missing-tile").
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Create an info diagnostic.
    pub fn info(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Sink for pipeline diagnostics.
pub trait Reporter {
    fn report(&self, diagnostic: Diagnostic);

    fn info(&self, code: &str, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.report(Diagnostic::info(code, message));
    }

    fn warning(&self, code: &str, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.report(Diagnostic::warning(code, message));
    }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Reporter for Silent {
    fn report(&self, _diagnostic: Diagnostic) {}
}

/// Keeps every diagnostic in memory, in arrival order.
#[derive(Debug, Default)]
pub struct Collector {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check whether any diagnostic carries the given code.
    pub fn has_code(&self, code: &str) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.code == code)
    }

    /// Take the collected diagnostics, leaving the collector empty.
    pub fn take(&self) -> Vec<Diagnostic> {
        self.diagnostics.take()
    }
}

impl Reporter for Collector {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}
