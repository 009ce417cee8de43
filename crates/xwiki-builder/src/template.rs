//! Page templates.
//!
//! Templates are Jinja templates whose delimiters are moved out of the way of
//! XWiki syntax, which already gives meaning to `{{` and `{%`:
//!
//! - `<< docname >>` prints a value,
//! - `<% if keywords %> ... <% endif %>` is a statement,
//! - `<# ... #>` is a comment.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use minijinja::syntax::SyntaxConfig;
use minijinja::{AutoEscape, Environment};
use serde::Serialize;

/// Values a page template can refer to.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageContext<'a> {
    /// Name of the document, e.g. `guide/install`.
    pub docname: &'a str,
    /// The translated page.
    pub page_contents: &'a str,
    /// Keywords declared by the document.
    pub keywords: &'a [ecow::EcoString],
}

/// A loaded page template.
#[derive(Debug, Clone)]
pub struct PageTemplate {
    name: String,
    source: String,
    env: Environment<'static>,
}

impl PageTemplate {
    /// Reads a template file. A missing file is a configuration error.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            bail!(
                "couldn't find a template file at the path: {}\n\
                 make sure that either that file exists, or that you remove \
                 `page_template` from the configuration",
                path.display()
            );
        }

        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display()))?;
        Self::new(path, source)
    }

    /// Creates a template from its text, rejecting syntax errors. `path` is
    /// only used in messages.
    pub fn new(path: impl Into<PathBuf>, source: impl Into<String>) -> anyhow::Result<Self> {
        let syntax = SyntaxConfig::builder()
            .block_delimiters("<%", "%>")
            .variable_delimiters("<<", ">>")
            .comment_delimiters("<#", "#>")
            .build()
            .context("invalid template delimiters")?;

        let mut env = Environment::new();
        env.set_syntax(syntax);
        // Pages are wiki markup, never HTML.
        env.set_auto_escape_callback(|_| AutoEscape::None);

        let template = Self {
            name: path.into().display().to_string(),
            source: source.into(),
            env,
        };
        template
            .env
            .template_from_named_str(&template.name, &template.source)
            .with_context(|| format!("invalid template {}", template.name))?;
        Ok(template)
    }

    /// Renders the page. Undefined values render empty.
    pub fn render(&self, context: &PageContext<'_>) -> anyhow::Result<String> {
        let template = self
            .env
            .template_from_named_str(&self.name, &self.source)
            .with_context(|| format!("invalid template {}", self.name))?;
        template.render(context).with_context(|| {
            format!("failed to render template {} for {}", self.name, context.docname)
        })
    }
}

#[cfg(test)]
mod tests {
    use ecow::EcoString;

    use super::*;

    fn context<'a>(contents: &'a str, keywords: &'a [EcoString]) -> PageContext<'a> {
        PageContext {
            docname: "guide/install",
            page_contents: contents,
            keywords,
        }
    }

    fn render(source: &str, contents: &str, keywords: &[EcoString]) -> String {
        PageTemplate::new("page.tmpl", source)
            .unwrap()
            .render(&context(contents, keywords))
            .unwrap()
    }

    #[test]
    fn values_are_substituted() {
        let keywords = [EcoString::from("install"), EcoString::from("setup")];
        let page = render(
            "{{toc/}}\n<# generated #>\n<<page_contents>>\n\n(% class=\"footer\" %)\nSource: << docname >> [<< keywords|join(\", \") >>]<<missing>>",
            "= Install =",
            &keywords,
        );

        insta::assert_snapshot!(page, @r#"
        {{toc/}}

        = Install =

        (% class="footer" %)
        Source: guide/install [install, setup]
        "#);
    }

    #[test]
    fn statements_use_angle_percent_delimiters() {
        let source = "<% if keywords %>KW: << keywords|join(\", \") >>\n<% endif %>\
                      <% for keyword in keywords %>* << keyword >>\n<% endfor %><< page_contents >>";
        let keywords = [EcoString::from("a"), EcoString::from("b")];

        assert_eq!(render(source, "body", &keywords), "KW: a, b\n* a\n* b\nbody");
        assert_eq!(render(source, "body", &[]), "body");
    }

    #[test]
    fn page_markup_is_not_rescanned() {
        let page = "literal <<docname>> {{velocity}}<% x %>{{/velocity}} stays";

        assert_eq!(render("<<page_contents>>", page, &[]), page);
    }

    #[test]
    fn syntax_errors_are_reported_on_load() {
        let err = PageTemplate::new("page.tmpl", "<% if keywords %>unclosed").unwrap_err();

        assert!(format!("{err:#}").contains("page.tmpl"));
    }

    #[test]
    fn missing_templates_are_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = PageTemplate::load(&dir.path().join("absent.tmpl")).unwrap_err();

        assert!(err.to_string().contains("couldn't find a template file"));
    }
}
