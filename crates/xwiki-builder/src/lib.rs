#![doc = include_str!("../README.md")]

pub mod config;
pub mod discovery;
pub mod naming;
pub mod template;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;
use xwiki_writer::writer::{CountingSink, DiagnosticCount};
use xwiki_writer::{Doctree, WriterOptions, XWikiTranslator};

pub use crate::config::BuildConfig;
pub use crate::discovery::Document;
pub use crate::naming::snake2camel;
pub use crate::template::{PageContext, PageTemplate};

/// Writes one XWiki page per document tree of a source directory.
#[derive(Debug)]
pub struct Builder {
    config: BuildConfig,
    options: WriterOptions,
    template: Option<PageTemplate>,
}

/// Outcome of writing a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    /// Name of the document.
    pub docname: String,
    /// File the page was written to.
    pub output: PathBuf,
    /// Non-fatal problems met while translating.
    pub diagnostics: DiagnosticCount,
}

/// Outcome of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Number of documents found in the source directory.
    pub found: usize,
    /// Pages written, in document order.
    pub pages: Vec<PageReport>,
}

impl BuildSummary {
    /// Total number of translation warnings.
    pub fn warnings(&self) -> usize {
        self.pages.iter().map(|page| page.diagnostics.warnings).sum()
    }

    /// Number of documents left untouched because they were up to date.
    pub fn skipped(&self) -> usize {
        self.found - self.pages.len()
    }
}

impl Builder {
    /// Prepares a build. Fails when the configured page template is missing.
    pub fn new(config: BuildConfig) -> anyhow::Result<Self> {
        let template = config
            .page_template
            .as_deref()
            .map(PageTemplate::load)
            .transpose()?;

        Ok(Self {
            options: config.writer_options(),
            config,
            template,
        })
    }

    /// The configuration of the build.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Where the page of `docname` is written.
    pub fn output_path(&self, docname: &str) -> PathBuf {
        self.config
            .out_dir
            .join(naming::page_file_name(docname, &self.config.page_name_overrides))
    }

    /// Documents whose page is missing or older than their tree, or all of
    /// them when the build is forced.
    pub fn outdated_documents(&self, documents: &[Document]) -> Vec<Document> {
        documents
            .iter()
            .filter(|doc| {
                self.config.force || discovery::is_outdated(&doc.source, &self.output_path(&doc.docname))
            })
            .cloned()
            .collect()
    }

    /// Runs the build. Documents are translated in parallel, each with its
    /// own translator.
    pub fn build(&self) -> anyhow::Result<BuildSummary> {
        let source_dir = &self.config.source_dir;
        let documents = discovery::find_documents(source_dir)?;
        let outdated = self.outdated_documents(&documents);
        log::info!(
            "found {} document(s) in {}, {} outdated",
            documents.len(),
            source_dir.display(),
            outdated.len()
        );

        std::fs::create_dir_all(&self.config.out_dir).with_context(|| {
            format!("failed to create output directory {}", self.config.out_dir.display())
        })?;

        let pages = outdated
            .par_iter()
            .map(|doc| self.write_doc(doc))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let summary = BuildSummary {
            found: documents.len(),
            pages,
        };
        log::info!(
            "XWiki output built to {} ({} written, {} up to date, {} warning(s))",
            self.config.out_dir.display(),
            summary.pages.len(),
            summary.skipped(),
            summary.warnings()
        );
        Ok(summary)
    }

    /// Translates one document and writes its page.
    pub fn write_doc(&self, doc: &Document) -> anyhow::Result<PageReport> {
        let input = std::fs::read_to_string(&doc.source)
            .with_context(|| format!("failed to read {}", doc.source.display()))?;
        let tree = Doctree::from_json_str(&input)
            .with_context(|| format!("failed to parse document tree {}", doc.source.display()))?;

        let (page, diagnostics) = self.render(&doc.docname, &tree)?;

        let output = self.output_path(&doc.docname);
        write_page(&output, &page)?;
        log::debug!("wrote {} to {}", doc.docname, output.display());

        Ok(PageReport {
            docname: doc.docname.clone(),
            output,
            diagnostics,
        })
    }

    /// Renders the page of a document, template included.
    pub fn render(&self, docname: &str, tree: &Doctree) -> anyhow::Result<(String, DiagnosticCount)> {
        let sink = CountingSink::default();
        let mut translator =
            XWikiTranslator::new(tree, self.options.clone()).with_diagnostic_sink(Box::new(sink.clone()));
        translator.translate();

        let page = match &self.template {
            Some(template) => template.render(&PageContext {
                docname,
                page_contents: translator.astext(),
                keywords: translator.keywords(),
            })?,
            None => translator.astext().to_owned(),
        };
        Ok((page, sink.count()))
    }
}

fn write_page(output: &Path, page: &str) -> anyhow::Result<()> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(output, page).with_context(|| format!("failed to write {}", output.display()))
}
