//! Command line interface of the XWiki builder.

use std::path::{Path, PathBuf};

use clap::Parser;
use log::LevelFilter;
use xwiki_builder::config::CONFIG_FILE_NAME;
use xwiki_builder::{BuildConfig, Builder};

/// Builds XWiki pages from serialized document trees.
#[derive(Debug, Clone, Parser)]
#[clap(name = "xwiki-build", version)]
struct Args {
    /// Directory searched for document trees (`*.json`).
    #[clap(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Directory the pages are written to.
    #[clap(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Configuration file. Defaults to `xwiki.toml` when present.
    #[clap(long, short, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Wiki page every document is nested under.
    #[clap(long, value_name = "PAGE")]
    root_page: Option<String>,

    /// Template every page is rendered through.
    #[clap(long, value_name = "FILE")]
    template: Option<PathBuf>,

    /// Rebuild every document, even those that are up to date.
    #[clap(long, short)]
    force: bool,

    /// Print per-page progress.
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = env_logger::builder()
        .filter_module("xwiki_builder", level)
        .filter_module("xwiki_writer", LevelFilter::Warn)
        .try_init();

    let config = resolve_config(args)?;
    let summary = Builder::new(config)?.build()?;
    if summary.warnings() > 0 {
        log::warn!("{} warning(s) while translating", summary.warnings());
    }

    Ok(())
}

/// Loads the configuration file and applies the command line over it.
fn resolve_config(args: Args) -> anyhow::Result<BuildConfig> {
    let mut config = match &args.config {
        Some(path) => BuildConfig::load(path)?,
        None if Path::new(CONFIG_FILE_NAME).exists() => BuildConfig::load(Path::new(CONFIG_FILE_NAME))?,
        None => BuildConfig::default(),
    };

    if let Some(source) = args.source {
        config.source_dir = source;
    }
    if let Some(output) = args.output {
        config.out_dir = output;
    }
    if let Some(root_page) = args.root_page {
        config.root_page = root_page.into();
    }
    if let Some(template) = args.template {
        config.page_template = Some(template);
    }
    config.force |= args.force;

    Ok(config)
}
