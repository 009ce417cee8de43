//! XWiki 2.1 translator.
//!
//! The translator walks the tree once and routes every piece of text to the
//! innermost open destination: a paragraph buffer, the top of the group
//! stack, or the document body. Groups defer constructs such as list items,
//! cells and admonition bodies until their children are rendered.

mod blocks;
mod core;
mod inline;
pub mod links;
mod syntax;


pub use self::core::XWikiTranslator;

use ecow::EcoString;

use crate::ast::Doctree;
use crate::options::WriterOptions;

/// Renders whole documents, one fresh translator per call.
#[derive(Debug, Clone, Default)]
pub struct XWikiWriter {
    /// Writer options.
    pub options: WriterOptions,
}

impl XWikiWriter {
    /// Create a writer with the given options.
    pub fn new(options: WriterOptions) -> Self {
        Self { options }
    }

    /// Render `tree` as XWiki markup.
    pub fn write(&self, tree: &Doctree) -> EcoString {
        let mut translator = XWikiTranslator::new(tree, self.options.clone());
        translator.translate();
        translator.into_text()
    }
}

/// Render `tree` as XWiki markup with `options`.
pub fn to_xwiki(tree: &Doctree, options: &WriterOptions) -> EcoString {
    XWikiWriter::new(options.clone()).write(tree)
}
