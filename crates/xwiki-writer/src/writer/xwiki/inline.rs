//! Inline rules: text, styled spans, literals, links and images.

use ecow::{eco_format, EcoString};

use super::core::XWikiTranslator;
use super::links::{image_source, resolve_internal_link};
use super::syntax::*;
use crate::ast::{NodeKind, NodeRef};
use crate::writer::runtime::visitor::Visit;

/// Markup token placed on both sides of a styled span, if any.
pub(crate) fn inline_token(node: NodeRef<'_>) -> Option<&'static str> {
    match node.kind() {
        NodeKind::Emphasis | NodeKind::TitleReference => Some(EMPHASIS),
        NodeKind::Strong => Some(STRONG),
        NodeKind::Subscript => Some(SUBSCRIPT),
        NodeKind::Superscript => Some(SUPERSCRIPT),
        NodeKind::Inline => role_token(node.attributes().list("classes")),
        _ => None,
    }
}

/// Interface labels and menu paths are bold, cross-references italic.
fn role_token(classes: &[EcoString]) -> Option<&'static str> {
    let has = |name: &str| classes.iter().any(|class| class.as_str() == name);

    if has("guilabel") || has("menuselection") {
        Some(STRONG)
    } else if has("std-ref") || has("doc") {
        Some(EMPHASIS)
    } else {
        None
    }
}

impl XWikiTranslator<'_> {
    pub(super) fn visit_text(&mut self, node: NodeRef<'_>) -> Visit {
        let text = node.text();
        if node.parent_is(&NodeKind::Paragraph) && text.contains('\n') {
            self.emit(&text.replace('\n', " "));
        } else {
            self.emit(text);
        }
        Visit::Continue
    }

    pub(super) fn visit_inline_style(&mut self, node: NodeRef<'_>) -> Visit {
        if let Some(token) = inline_token(node) {
            self.emit(token);
        }
        Visit::Continue
    }

    pub(super) fn depart_inline_style(&mut self, node: NodeRef<'_>) {
        if let Some(token) = inline_token(node) {
            self.emit(token);
        }
    }

    /// Literal content is never scanned for markup.
    pub(super) fn visit_literal(&mut self, node: NodeRef<'_>) -> Visit {
        let text = node.astext();
        let rendered = match node.kind() {
            NodeKind::LiteralStrong => eco_format!("{STRONG}{MONOSPACE}{text}{MONOSPACE}{STRONG}"),
            _ => eco_format!("{MONOSPACE}{text}{MONOSPACE}"),
        };
        self.emit(&rendered);
        Visit::SkipNode
    }

    pub(super) fn visit_reference(&mut self) -> Visit {
        self.begin_force_inline();
        self.emit(LINK_OPEN);
        Visit::Continue
    }

    pub(super) fn depart_reference(&mut self, node: NodeRef<'_>) {
        let attributes = node.attributes();

        let closing = if let Some(refuri) = attributes.str("refuri") {
            let target = if attributes.flag("internal") {
                resolve_internal_link(refuri, &self.options)
            } else {
                refuri.into()
            };

            // The link text already names the target.
            if target == node.astext() {
                EcoString::from(LINK_CLOSE)
            } else {
                eco_format!("{LINK_TARGET}{target}{LINK_CLOSE}")
            }
        } else if let Some(refid) = attributes.str("refid") {
            eco_format!("{LINK_TARGET}{}{LINK_CLOSE}", anchor_qualifier(refid))
        } else {
            self.warn_node("reference without a target", node);
            EcoString::from(LINK_CLOSE)
        };

        self.emit(&closing);
        self.end_force_inline();
    }

    /// Images inside running text (or a link) stay inline, others are
    /// blocks of their own.
    fn image_is_inline(&self, node: NodeRef<'_>) -> bool {
        self.force_inline || node.parent_is(&NodeKind::Paragraph)
    }

    fn add_image(&mut self, uri: &str, alt: &str, caption: Option<&str>, inline: bool) {
        let source = image_source(uri);
        let mut text = match caption {
            Some(caption) => eco_format!("[[image:{source}||alt=\"{alt}\" title=\"{caption}\"]]"),
            None => eco_format!("[[image:{source}||alt=\"{alt}\"]]"),
        };
        if !inline {
            text.push_str("\n\n");
        }
        self.emit(&text);
    }

    pub(super) fn visit_image(&mut self, node: NodeRef<'_>) -> Visit {
        let uri = node.attr("uri").unwrap_or_default();
        let alt = node.attr("alt").unwrap_or_default();
        let inline = self.image_is_inline(node);
        self.add_image(uri, alt, None, inline);
        Visit::SkipNode
    }

    /// A figure renders as its image with the caption as title.
    pub(super) fn visit_figure(&mut self, node: NodeRef<'_>) -> Visit {
        let mut caption = EcoString::new();
        let mut image = None;
        for child in node.children() {
            match child.kind() {
                NodeKind::Caption => caption = child.astext(),
                NodeKind::Image => image = Some(child),
                _ => {}
            }
        }

        let uri = image.and_then(|image| image.attr("uri")).unwrap_or_default();
        let alt = image.and_then(|image| image.attr("alt")).unwrap_or_default();
        let caption = (!caption.is_empty()).then_some(caption.as_str());
        let inline = self.image_is_inline(node);
        self.add_image(uri, alt, caption, inline);
        Visit::SkipNode
    }
}
