//! XWiki writer options.

use ecow::EcoString;

/// Host configuration consumed by the translator.
///
/// Only link resolution depends on it.
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Wiki page under which every converted document is nested. Empty when
    /// documents are linked relative to the current page.
    pub root_page: EcoString,
    /// Page name of the document set's index page. Links to it resolve to
    /// the root page itself.
    pub index_page: EcoString,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            root_page: EcoString::new(),
            index_page: "Index".into(),
        }
    }
}

impl WriterOptions {
    /// Whether a root page is configured.
    pub fn has_root_page(&self) -> bool {
        !self.root_page.is_empty()
    }
}

/// Builder for WriterOptions
pub struct WriterOptionsBuilder {
    options: WriterOptions,
}

impl WriterOptionsBuilder {
    /// Create a new WriterOptionsBuilder with default options
    pub fn new() -> Self {
        Self {
            options: WriterOptions::default(),
        }
    }

    /// Set the root page documents are nested under
    pub fn root_page(mut self, root_page: impl Into<EcoString>) -> Self {
        self.options.root_page = root_page.into();
        self
    }

    /// Set the page name of the index page
    pub fn index_page(mut self, index_page: impl Into<EcoString>) -> Self {
        let index_page = index_page.into();
        if !index_page.is_empty() {
            self.options.index_page = index_page;
        }
        self
    }

    /// Build the WriterOptions
    pub fn build(self) -> WriterOptions {
        self.options
    }
}

impl Default for WriterOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
