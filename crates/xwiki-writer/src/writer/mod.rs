//! Writer backends.
//!
//! This module provides the traversal runtime and the XWiki translator
//! built on it.

pub mod runtime;
mod xwiki;

pub use self::runtime::diagnostics::{
    CollectingSink, CountingSink, Diagnostic, DiagnosticCount, DiagnosticSeverity, DiagnosticSink,
    NullSink,
};
pub use self::runtime::visitor::{walkabout, NodeVisitor, Visit};
pub use self::xwiki::links::{image_source, resolve_internal_link};
pub use self::xwiki::{to_xwiki, XWikiTranslator, XWikiWriter};
