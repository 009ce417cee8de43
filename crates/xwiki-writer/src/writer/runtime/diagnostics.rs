//! Translation diagnostics.
//!
//! Structural problems met during translation (unbalanced groups, nested
//! paragraphs, unknown constructs) never stop rendering. They are reported
//! through a [`DiagnosticSink`] and mirrored to `log`.

use std::cell::RefCell;
use std::rc::Rc;

use ecow::EcoString;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    /// The output may not reflect the document faithfully.
    Warning,
    /// A construct was rendered with a fallback rule.
    Info,
}

/// A non-fatal problem met while translating a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity of the diagnostic.
    pub severity: DiagnosticSeverity,
    /// Human-readable message, including a dump of the node when known.
    pub message: EcoString,
    /// Tag of the construct the diagnostic is about.
    pub tag: Option<EcoString>,
}

impl Diagnostic {
    /// A warning not tied to a construct.
    pub fn warning(message: impl Into<EcoString>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            message: message.into(),
            tag: None,
        }
    }

    /// An informational note not tied to a construct.
    pub fn info(message: impl Into<EcoString>) -> Self {
        Self {
            severity: DiagnosticSeverity::Info,
            message: message.into(),
            tag: None,
        }
    }

    /// Attaches the tag of the construct involved.
    pub fn with_tag(mut self, tag: impl Into<EcoString>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// Receives the diagnostics of a translation.
pub trait DiagnosticSink {
    /// Record one diagnostic.
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Drops everything. The translator's default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&mut self, _: Diagnostic) {}
}

/// Keeps every diagnostic. Clones share the same storage, so a clone can be
/// handed to the translator and the original read afterwards.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    diagnostics: Rc<RefCell<Vec<Diagnostic>>>,
}

impl CollectingSink {
    /// Removes and returns the diagnostics collected so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }
}

/// Totals collected by a [`CountingSink`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticCount {
    /// Number of warnings.
    pub warnings: usize,
    /// Number of informational notes.
    pub infos: usize,
}

/// Counts diagnostics by severity without keeping the messages.
#[derive(Debug, Default, Clone)]
pub struct CountingSink {
    counter: Rc<RefCell<DiagnosticCount>>,
}

impl CountingSink {
    /// Current totals.
    pub fn count(&self) -> DiagnosticCount {
        *self.counter.borrow()
    }
}

impl DiagnosticSink for CountingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        let mut counter = self.counter.borrow_mut();
        match diagnostic.severity {
            DiagnosticSeverity::Warning => counter.warnings += 1,
            DiagnosticSeverity::Info => counter.infos += 1,
        }
    }
}
