//! Block-level rules: sections, paragraphs, lists, tables and boxed
//! constructs.

use ecow::{eco_format, EcoString};

use super::core::{TableState, XWikiTranslator};
use super::syntax::*;
use crate::ast::{NodeKind, NodeRef};
use crate::writer::runtime::visitor::Visit;

impl XWikiTranslator<'_> {
    pub(super) fn visit_paragraph(&mut self, node: NodeRef<'_>) -> Visit {
        self.begin_inline(node);
        Visit::Continue
    }

    pub(super) fn depart_paragraph(&mut self) {
        let text = self.end_inline();
        if self.para_level > 0 {
            self.emit(&text);
        } else {
            self.emit(&eco_format!("{text}\n\n"));
        }
    }

    /// A compact paragraph directly inside a compound only groups its
    /// children. Anywhere else it is a real paragraph.
    pub(super) fn visit_compact_paragraph(&mut self, node: NodeRef<'_>) -> Visit {
        if node.parent_is(&NodeKind::Compound) {
            self.push_group(node, "");
            Visit::Continue
        } else {
            self.visit_paragraph(node)
        }
    }

    pub(super) fn depart_compact_paragraph(&mut self, node: NodeRef<'_>) {
        if node.parent_is(&NodeKind::Compound) {
            self.pop_group_of(node, "");
        } else {
            self.depart_paragraph();
        }
    }

    pub(super) fn visit_section(&mut self, node: NodeRef<'_>) -> Visit {
        self.section_level += 1;
        // One marker per id, so every id addresses the heading that follows.
        for id in node.attributes().list("ids") {
            self.emit(&anchor_marker(id));
        }
        Visit::Continue
    }

    pub(super) fn visit_title(&mut self, node: NodeRef<'_>) -> Visit {
        let parent = node.parent();
        match parent.map(|parent| parent.kind()) {
            Some(NodeKind::Topic) => {
                self.emit(&eco_format!("{STRONG}{}{STRONG}", node.astext()));
                Visit::SkipNode
            }
            Some(NodeKind::Admonition) => {
                if let Some(parent) = parent {
                    let title = node.astext();
                    self.start_admonition(parent, &title, GENERIC_ADMONITION_COLOR);
                }
                Visit::SkipNode
            }
            _ => {
                self.begin_inline(node);
                Visit::Continue
            }
        }
    }

    pub(super) fn depart_title(&mut self) {
        let text = self.end_inline();
        let markers = heading_markers(self.section_level);
        self.emit(&eco_format!("{markers} {text} {markers}\n\n"));
    }

    pub(super) fn visit_transition(&mut self) -> Visit {
        self.emit(TRANSITION);
        Visit::SkipNode
    }

    pub(super) fn visit_meta(&mut self, node: NodeRef<'_>) -> Visit {
        match node.attr("name") {
            Some("keywords") => {
                let content = node.attr("content").unwrap_or_default();
                self.keywords.extend(
                    content
                        .split(", ")
                        .map(str::trim)
                        .filter(|keyword| !keyword.is_empty())
                        .map(EcoString::from),
                );
            }
            Some("description") => {}
            _ => self.warn_node("Unknown meta", node),
        }
        Visit::SkipNode
    }

    /// Raw content passes through untouched, fenced by a `{{format}}` macro
    /// when the format is known.
    pub(super) fn visit_raw(&mut self, node: NodeRef<'_>) -> Visit {
        let content = node.astext();
        match node.attr("format") {
            Some(format) => self.emit(&eco_format!("\n{{{{{format}}}}}\n{content}\n{{{{/{format}}}}}\n\n")),
            None => self.emit(&content),
        }
        Visit::SkipNode
    }

    pub(super) fn visit_block_quote(&mut self, node: NodeRef<'_>) -> Visit {
        self.emit(&eco_format!("{}\n", style_macro(None, BLOCK_QUOTE_STYLE)));
        self.push_group(node, "");
        Visit::Continue
    }

    pub(super) fn visit_topic(&mut self, node: NodeRef<'_>) -> Visit {
        let classes: Vec<_> = node.attributes().list("classes").iter().map(EcoString::as_str).collect();
        let classes = classes.join(" ");
        self.emit(&eco_format!("{}\n", topic_macro(classes.trim())));
        self.push_group(node, "");
        Visit::Continue
    }

    pub(super) fn visit_literal_block(&mut self, node: NodeRef<'_>) -> Visit {
        let classes = node.attributes().list("classes");
        let language = if classes.iter().any(|class| class.as_str() == "code") {
            classes.iter().find(|class| class.as_str() != "code").map(EcoString::as_str)
        } else {
            node.attr("language")
        };

        let class = language.map(|language| eco_format!("code {language}"));
        self.emit(&eco_format!("{}\n", style_macro(class.as_deref(), CODE_STYLE)));
        self.emit(&eco_format!("{CODE_OPEN}{}{CODE_CLOSE}", node.astext()));
        Visit::SkipNode
    }

    // Lists

    pub(super) fn visit_list(&mut self, node: NodeRef<'_>) -> Visit {
        let glyph = match node.kind() {
            NodeKind::EnumeratedList => ENUMERATED_GLYPH,
            _ => BULLET_GLYPH,
        };
        self.list_glyphs.push(glyph);
        Visit::Continue
    }

    pub(super) fn depart_list(&mut self) {
        self.list_glyphs.pop();
        self.emit("\n");
    }

    pub(super) fn visit_list_item(&mut self, node: NodeRef<'_>) -> Visit {
        let glyph = match self.list_glyphs.last() {
            Some(glyph) => *glyph,
            None => {
                self.warn_node("list item outside of a list", node);
                BULLET_GLYPH
            }
        };
        self.push_group(node, glyph);
        Visit::Continue
    }

    pub(super) fn visit_term(&mut self, node: NodeRef<'_>) -> Visit {
        self.begin_inline(node);
        Visit::Continue
    }

    pub(super) fn depart_term(&mut self) {
        let text = self.end_inline();
        self.emit(&eco_format!("{TERM_PREFIX}{text}\n"));
    }

    // Tables

    pub(super) fn visit_table(&mut self) -> Visit {
        self.tables.push(TableState::default());
        Visit::Continue
    }

    /// Emits the collected rows as one unit, so a table nested in a group
    /// stays one block.
    pub(super) fn depart_table(&mut self) {
        if let Some(table) = self.tables.pop() {
            log::debug!(
                "rendered table with {} declared columns, widths {:?}",
                table.cols,
                table.col_widths
            );
            self.emit(&eco_format!("{}\n\n", table.text));
        }
    }

    pub(super) fn visit_tgroup(&mut self, node: NodeRef<'_>) -> Visit {
        let cols = node.attributes().int("cols").unwrap_or(0).max(0) as usize;
        match self.tables.last_mut() {
            Some(table) => {
                table.cols = cols;
                table.col_widths = Vec::with_capacity(cols);
                table.stub_cols = Vec::with_capacity(cols);
                table.in_thead = false;
            }
            None => self.warn_node("table group outside of a table", node),
        }
        Visit::Continue
    }

    pub(super) fn visit_colspec(&mut self, node: NodeRef<'_>) -> Visit {
        let attributes = node.attributes();
        if let Some(table) = self.tables.last_mut() {
            table.col_widths.push(attributes.int("colwidth").unwrap_or(0));
            table.stub_cols.push(attributes.flag("stub"));
        }
        Visit::Continue
    }

    pub(super) fn set_in_thead(&mut self, in_thead: bool) {
        if let Some(table) = self.tables.last_mut() {
            table.in_thead = in_thead;
        }
    }

    pub(super) fn visit_row(&mut self) -> Visit {
        if let Some(table) = self.tables.last_mut() {
            table.next_col = 0;
        }
        Visit::Continue
    }

    pub(super) fn depart_row(&mut self) {
        match self.tables.last_mut() {
            Some(table) => table.text.push('\n'),
            None => self.emit("\n"),
        }
    }

    /// A horizontal list is a single-row table whose columns are cells.
    pub(super) fn visit_hlist(&mut self) -> Visit {
        self.visit_table();
        self.visit_row()
    }

    pub(super) fn depart_hlist(&mut self) {
        self.depart_row();
        self.depart_table();
    }

    pub(super) fn visit_entry(&mut self, node: NodeRef<'_>) -> Visit {
        let span = node.attributes().int("morecols").unwrap_or(0).max(0) as usize;
        let header = match self.tables.last_mut() {
            Some(table) => {
                let stub = table.stub_cols.get(table.next_col).copied().unwrap_or(false);
                table.next_col += 1 + span;
                table.in_thead || stub
            }
            None => false,
        };

        let prefix = if header { HEADER_CELL } else { BODY_CELL };
        self.push_group(node, prefix);
        Visit::Continue
    }

    /// Cells concatenate left to right on the row's line. Single-line cells
    /// render bare, the others keep the group wrapper.
    pub(super) fn depart_entry(&mut self, node: NodeRef<'_>) {
        let popped = self.take_group(" ", true).map(|(id, text)| {
            match self.tables.last_mut() {
                Some(table) => table.text.push_str(&text),
                None => self.emit(&text),
            }
            id
        });
        self.check_popped(node, popped);
    }

    // Admonitions

    pub(super) fn visit_admonition(&mut self, node: NodeRef<'_>) -> Visit {
        if let Some((title, color)) = admonition_style(node.kind()) {
            self.start_admonition(node, title, color);
        }
        Visit::Continue
    }

    /// Emits the box header and opens the body group, `owner` being the
    /// admonition node that will close it.
    fn start_admonition(&mut self, owner: NodeRef<'_>, title: &str, color: &str) {
        self.emit(&admonition_macro(title, color));
        self.push_group(owner, "");
        self.emit(&eco_format!("{STRONG}{title}{STRONG}\n"));
    }
}
