//! Build configuration, read from `xwiki.toml`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use ecow::EcoString;
use indexmap::IndexMap;
use serde::Deserialize;
use xwiki_writer::{WriterOptions, WriterOptionsBuilder};

/// Default name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "xwiki.toml";

/// Configuration of a build.
///
/// ```toml
/// root_page = "Docs"
/// page_template = "page.tmpl"
/// source_dir = "_build/doctrees"
/// out_dir = "_build/xwiki"
///
/// [page_name_overrides]
/// index = "WebHome.xwiki"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Wiki page every document is nested under. Links to the index page
    /// resolve to it.
    pub root_page: EcoString,
    /// Name of the index document, `Index` unless set.
    pub index_page: Option<EcoString>,
    /// Template every page is passed through before being written.
    pub page_template: Option<PathBuf>,
    /// Output file names of specific documents, keyed by docname.
    pub page_name_overrides: IndexMap<EcoString, EcoString>,
    /// Directory searched for document trees.
    pub source_dir: PathBuf,
    /// Directory pages are written to.
    pub out_dir: PathBuf,
    /// Rebuild every document, even those that are up to date.
    pub force: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            root_page: EcoString::new(),
            index_page: None,
            page_template: None,
            page_name_overrides: IndexMap::new(),
            source_dir: PathBuf::from("."),
            out_dir: PathBuf::from("_build/xwiki"),
            force: false,
        }
    }
}

impl BuildConfig {
    /// Parses a configuration from TOML. Relative paths are kept as is.
    pub fn from_toml_str(input: &str) -> anyhow::Result<Self> {
        toml::from_str(input).context("invalid build configuration")
    }

    /// Reads a configuration file. Relative paths in it are resolved against
    /// the directory holding the file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        let mut config = Self::from_toml_str(&input)
            .with_context(|| format!("failed to load configuration {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        log::debug!("loaded configuration from {}: {config:?}", path.display());
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };

        resolve(&mut self.source_dir);
        resolve(&mut self.out_dir);
        if let Some(template) = self.page_template.as_mut() {
            resolve(template);
        }
    }

    /// Options handed to the translator.
    pub fn writer_options(&self) -> WriterOptions {
        let builder = WriterOptionsBuilder::new().root_page(self.root_page.clone());
        match &self.index_page {
            Some(index_page) => builder.index_page(index_page.clone()).build(),
            None => builder.build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config = BuildConfig::from_toml_str("root_page = \"Docs\"").unwrap();
        assert_eq!(
            config,
            BuildConfig {
                root_page: "Docs".into(),
                ..BuildConfig::default()
            }
        );
        assert_eq!(config.writer_options().root_page, "Docs");
        assert_eq!(config.writer_options().index_page, "Index");
    }

    #[test]
    fn overrides_keep_their_order() {
        let config = BuildConfig::from_toml_str(
            r#"
            index_page = "Home"
            force = true

            [page_name_overrides]
            index = "WebHome.xwiki"
            about = "About.xwiki"
            "#,
        )
        .unwrap();

        assert!(config.force);
        assert_eq!(config.writer_options().index_page, "Home");
        let names: Vec<_> = config.page_name_overrides.keys().map(EcoString::as_str).collect();
        assert_eq!(names, ["index", "about"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(BuildConfig::from_toml_str("xwiki_root = \"Docs\"").is_err());
    }

    #[test]
    fn relative_paths_follow_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            "source_dir = \"trees\"\npage_template = \"page.tmpl\"\nout_dir = \"/abs/out\"\n",
        )
        .unwrap();

        let config = BuildConfig::load(&path).unwrap();
        assert_eq!(config.source_dir, dir.path().join("trees"));
        assert_eq!(config.page_template, Some(dir.path().join("page.tmpl")));
        assert_eq!(config.out_dir, PathBuf::from("/abs/out"));
    }
}
