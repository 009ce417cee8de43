//! Link and image target resolution.

use std::sync::LazyLock;

use ecow::{eco_format, EcoString};
use regex::Regex;

use super::syntax::anchor_qualifier;
use crate::options::WriterOptions;

/// Rewrites an internal link target into the wiki's hierarchical page names.
///
/// `page#anchor` becomes `Root.page||anchor="anchor"`. A link to the index
/// page resolves to the root page itself when one is configured.
pub fn resolve_internal_link(refuri: &str, options: &WriterOptions) -> EcoString {
    let (page, anchor) = match refuri.split_once('#') {
        Some((page, anchor)) => (page, Some(anchor)),
        None => (refuri, None),
    };

    let mut target = if page.is_empty() {
        // Same-page anchor.
        EcoString::new()
    } else if options.has_root_page() && page == options.index_page {
        options.root_page.clone()
    } else {
        eco_format!("{}.{page}", options.root_page)
    };

    if let Some(anchor) = anchor {
        target.push_str(&anchor_qualifier(anchor));
    }
    target
}

/// Reduces a local image path to its file name. Network addresses are kept.
pub fn image_source(uri: &str) -> &str {
    static NETWORK_URI: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://").unwrap());

    if NETWORK_URI.is_match(uri) {
        return uri;
    }

    uri.rsplit(['/', '\\']).next().unwrap_or(uri)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::WriterOptionsBuilder;

    fn docs() -> WriterOptions {
        WriterOptionsBuilder::new().root_page("Docs").build()
    }

    #[test]
    fn internal_links_become_child_pages() {
        assert_eq!(
            resolve_internal_link("intro#setup", &docs()),
            "Docs.intro||anchor=\"setup\""
        );
        assert_eq!(resolve_internal_link("intro", &docs()), "Docs.intro");
    }

    #[test]
    fn index_page_is_the_root_page() {
        assert_eq!(resolve_internal_link("Index", &docs()), "Docs");
        assert_eq!(
            resolve_internal_link("Index#top", &docs()),
            "Docs||anchor=\"top\""
        );
    }

    #[test]
    fn without_root_page_links_stay_relative() {
        let options = WriterOptions::default();
        assert_eq!(resolve_internal_link("Index", &options), ".Index");
        assert_eq!(resolve_internal_link("#here", &options), "||anchor=\"here\"");
    }

    #[test]
    fn local_images_lose_their_directories() {
        assert_eq!(image_source("_images/diagram.png"), "diagram.png");
        assert_eq!(image_source("plain.png"), "plain.png");
        assert_eq!(
            image_source("https://example.com/img/logo.png"),
            "https://example.com/img/logo.png"
        );
        assert_eq!(image_source("http://example.com/a.png"), "http://example.com/a.png");
    }
}
