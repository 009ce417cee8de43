//! Concrete tokens of the XWiki 2.1 markup grammar.

use ecow::{eco_format, EcoString};

use crate::ast::NodeKind;

pub(crate) const GROUP_OPEN: &str = "((( ";
pub(crate) const GROUP_CLOSE: &str = " )))";
/// Blocks ending in one of these already terminate their own line.
pub(crate) const CLOSING_TOKENS: [&str; 2] = [")))", "%)"];

pub(crate) const EMPHASIS: &str = "//";
pub(crate) const STRONG: &str = "**";
pub(crate) const SUBSCRIPT: &str = ",,";
pub(crate) const SUPERSCRIPT: &str = "^^";
pub(crate) const MONOSPACE: &str = "##";

pub(crate) const HEADING_MARKER: &str = "=";
pub(crate) const TRANSITION: &str = "----\n\n";

pub(crate) const BULLET_GLYPH: &str = "* ";
pub(crate) const ENUMERATED_GLYPH: &str = "1. ";
pub(crate) const TERM_PREFIX: &str = "; ";
pub(crate) const DEFINITION_PREFIX: &str = ": ";

pub(crate) const HEADER_CELL: &str = "|= ";
pub(crate) const BODY_CELL: &str = "| ";

pub(crate) const LINK_OPEN: &str = "[[";
pub(crate) const LINK_CLOSE: &str = "]]";
pub(crate) const LINK_TARGET: &str = ">>";

pub(crate) const CODE_OPEN: &str = "{{{\n";
pub(crate) const CODE_CLOSE: &str = "\n}}}\n\n";

pub(crate) const CODE_STYLE: &str = "background:gainsboro;margin:16px;padding:16px";
pub(crate) const BLOCK_QUOTE_STYLE: &str =
    "border-left:solid gainsboro 8px;margin:16px;padding:16px 16px 8px 16px";
const TOPIC_STYLE: &str =
    "border-style:solid;border-color:gray;border-width:2px;margin:16px;padding:16px 16px 8px 16px";
const LOCAL_CONTENTS_STYLE: &str = "border-style:solid;background-color:white;border-color:gray;\
     border-width:2px;margin:16px;padding:16px 16px 8px 16px;float:right;clear:right;";

/// Whether `text` ends with a group or styling-macro closing token.
pub(crate) fn ends_with_closing_token(text: &str) -> bool {
    CLOSING_TOKENS.iter().any(|token| text.ends_with(token))
}

/// A styling macro line, `(% class="..." style="..." %)`.
pub(crate) fn style_macro(class: Option<&str>, style: &str) -> EcoString {
    match class {
        Some(class) => eco_format!("(% class=\"{class}\" style=\"{style}\" %)"),
        None => eco_format!("(% style=\"{style}\" %)"),
    }
}

/// An anchor marker that makes the following heading addressable by `id`.
pub(crate) fn anchor_marker(id: &str) -> EcoString {
    eco_format!("\n(% id=\"{id}\" %)\n")
}

/// A same-page or cross-page anchor qualifier appended to a link target.
pub(crate) fn anchor_qualifier(id: &str) -> EcoString {
    eco_format!("||anchor=\"{id}\"")
}

/// Heading markers for the given nesting depth. A title outside any section
/// gets none.
pub(crate) fn heading_markers(level: usize) -> EcoString {
    HEADING_MARKER.repeat(level).into()
}

/// Title and border color of the dedicated admonition constructs.
pub(crate) fn admonition_style(kind: &NodeKind) -> Option<(&'static str, &'static str)> {
    match kind {
        NodeKind::Note => Some(("Note", "blue")),
        NodeKind::Warning => Some(("Warning", "orange")),
        NodeKind::Tip => Some(("Tip", "green")),
        NodeKind::Hint => Some(("Hint", "green")),
        NodeKind::Important => Some(("Important", "red")),
        _ => None,
    }
}

/// Border color of admonitions that carry their own title.
pub(crate) const GENERIC_ADMONITION_COLOR: &str = "blue";

/// Header line of an admonition box.
pub(crate) fn admonition_macro(title: &str, color: &str) -> EcoString {
    let class = eco_format!("admonition {}", title.to_lowercase());
    let style = eco_format!(
        "border-style:solid;border-color:{color};border-width:2px 2px 2px 8px;\
         margin:16px;padding:16px 16px 8px 16px"
    );
    style_macro(Some(&class), &style)
}

/// Header line of a topic box, keyed by the topic's classes.
pub(crate) fn topic_macro(classes: &str) -> EcoString {
    if classes.contains("contents local") {
        style_macro(Some(classes), LOCAL_CONTENTS_STYLE)
    } else if classes.is_empty() {
        style_macro(Some("topic "), TOPIC_STYLE)
    } else {
        style_macro(Some(classes), TOPIC_STYLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admonition_colors() {
        let colors: Vec<_> = [
            NodeKind::Note,
            NodeKind::Warning,
            NodeKind::Tip,
            NodeKind::Hint,
            NodeKind::Important,
        ]
        .iter()
        .map(|kind| admonition_style(kind).unwrap().1)
        .collect();
        assert_eq!(colors, ["blue", "orange", "green", "green", "red"]);
    }

    #[test]
    fn closing_tokens() {
        assert!(ends_with_closing_token("* ((( a )))"));
        assert!(ends_with_closing_token("(% style=\"x\" %)"));
        assert!(!ends_with_closing_token("plain"));
    }

    #[test]
    fn heading_markers_match_section_depth() {
        assert_eq!(heading_markers(0), "");
        assert_eq!(heading_markers(1), "=");
        assert_eq!(heading_markers(3), "===");
    }
}
