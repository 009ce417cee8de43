use std::fmt;

use ecow::{eco_format, EcoString};

use super::syntax::{ends_with_closing_token, GROUP_CLOSE, GROUP_OPEN};
use crate::ast::{Doctree, NodeId, NodeKind, NodeRef};
use crate::options::WriterOptions;
use crate::writer::runtime::diagnostics::{Diagnostic, DiagnosticSink, NullSink};
use crate::writer::runtime::visitor::{walkabout, NodeVisitor, Visit};

/// A construct whose rendering is deferred until all its children have been
/// rendered, such as a list item, a table cell or an admonition body.
#[derive(Debug)]
pub(crate) struct Group {
    /// Node that pushed the group.
    pub node: NodeId,
    /// Text placed before the opening token.
    pub prefix: EcoString,
    /// Finished child blocks, trimmed and non-empty.
    pub blocks: Vec<EcoString>,
}

impl Group {
    fn push_block(&mut self, text: &str) {
        let text = text.trim();
        if !text.is_empty() {
            self.blocks.push(text.into());
        }
    }

    /// Renders `PREFIX((( block1\n\nblock2 )))POSTFIX`.
    fn render(&self, postfix: &str) -> EcoString {
        let mut text = self.prefix.clone();
        text.push_str(GROUP_OPEN);

        let last = self.blocks.len().saturating_sub(1);
        for (idx, block) in self.blocks.iter().enumerate() {
            text.push_str(block);
            // A block that closes a nested group or a styling macro only
            // needs a line break.
            if ends_with_closing_token(&text) {
                text.push('\n');
            } else if idx != last {
                text.push_str("\n\n");
            }
        }

        text.push_str(GROUP_CLOSE);
        text.push_str(postfix);
        text
    }

    /// Renders single-line content without the grouping tokens.
    fn render_compact(&self, postfix: &str) -> Option<EcoString> {
        match self.blocks.as_slice() {
            [] => Some(eco_format!("{}{postfix}", self.prefix)),
            [block] if !block.contains('\n') && !block.contains(GROUP_OPEN.trim_end()) => {
                Some(eco_format!("{}{block}{postfix}", self.prefix))
            }
            _ => None,
        }
    }
}

/// State of one table being rendered. Tables nest, so the translator keeps
/// a stack of these.
#[derive(Debug, Default)]
pub(crate) struct TableState {
    /// Declared column count.
    pub cols: usize,
    /// Width hint of each column.
    pub col_widths: Vec<i64>,
    /// Whether each column is a stub (header-like) column.
    pub stub_cols: Vec<bool>,
    /// Whether the current row belongs to the table header.
    pub in_thead: bool,
    /// Column of the next cell in the current row.
    pub next_col: usize,
    /// Finished rows, each terminated by a newline.
    pub text: EcoString,
}

/// Translates a [`Doctree`] into XWiki 2.1 markup.
///
/// A translator holds the state of one traversal. [`translate`] resets it
/// before walking, so no state leaks from one run into the next, but one
/// instance must not be shared between concurrent callers.
///
/// [`translate`]: XWikiTranslator::translate
pub struct XWikiTranslator<'a> {
    tree: &'a Doctree,
    /// Writer options.
    pub options: WriterOptions,
    /// Finished top-level output.
    pub(crate) body: EcoString,
    /// Inline text of the paragraph-like construct being rendered.
    pub(crate) para_text: EcoString,
    /// Nesting depth of paragraph-like constructs.
    pub(crate) para_level: usize,
    /// Deferred constructs, innermost last.
    pub(crate) groups: Vec<Group>,
    /// Item markers of the open lists, innermost last.
    pub(crate) list_glyphs: Vec<&'static str>,
    /// Section nesting depth.
    pub(crate) section_level: usize,
    /// Open tables, innermost last.
    pub(crate) tables: Vec<TableState>,
    /// Set while inside a link, keeping its pieces on one line.
    pub(crate) force_inline: bool,
    /// Link text collected while `force_inline` is set inside a group.
    pub(crate) inline_run: Option<EcoString>,
    /// Keywords declared by `meta` nodes.
    pub(crate) keywords: Vec<EcoString>,
    translated: bool,
    /// Sink for collecting non-fatal diagnostics during rendering.
    diagnostics: Box<dyn DiagnosticSink + 'static>,
}

impl fmt::Debug for XWikiTranslator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XWikiTranslator")
            .field("options", &self.options)
            .field("body", &self.body)
            .field("groups", &self.groups)
            .field("section_level", &self.section_level)
            .finish()
    }
}

impl<'a> XWikiTranslator<'a> {
    /// Create a translator for `tree`.
    pub fn new(tree: &'a Doctree, options: WriterOptions) -> Self {
        Self {
            tree,
            options,
            body: EcoString::new(),
            para_text: EcoString::new(),
            para_level: 0,
            groups: Vec::new(),
            list_glyphs: Vec::new(),
            section_level: 0,
            tables: Vec::new(),
            force_inline: false,
            inline_run: None,
            keywords: Vec::new(),
            translated: false,
            diagnostics: Box::new(NullSink),
        }
    }

    /// Replace the diagnostic sink used to capture non-fatal issues.
    pub fn with_diagnostic_sink(mut self, sink: Box<dyn DiagnosticSink + 'static>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Walk the whole tree, replacing any previous output.
    pub fn translate(&mut self) {
        self.reset();

        let tree = self.tree;
        walkabout(self, tree.root());

        if !self.groups.is_empty() {
            self.emit_warning(eco_format!(
                "{} group(s) left open at the end of the document",
                self.groups.len()
            ));
        }
        self.translated = true;
    }

    /// The translated document. Empty until [`translate`] has run.
    ///
    /// [`translate`]: XWikiTranslator::translate
    pub fn astext(&self) -> &str {
        if !self.translated {
            log::debug!("astext called before translate");
        }
        &self.body
    }

    /// Take the translated document out of the translator.
    pub fn into_text(self) -> EcoString {
        self.body
    }

    /// Keywords declared by the document's `meta` nodes.
    pub fn keywords(&self) -> &[EcoString] {
        &self.keywords
    }

    fn reset(&mut self) {
        self.body.clear();
        self.para_text.clear();
        self.para_level = 0;
        self.groups.clear();
        self.list_glyphs.clear();
        self.section_level = 0;
        self.tables.clear();
        self.force_inline = false;
        self.inline_run = None;
        self.keywords.clear();
        self.translated = false;
    }

    /// Route `text` to the innermost open destination: the paragraph being
    /// built, the top group, or the document body.
    pub(crate) fn emit(&mut self, text: &str) {
        if self.para_level > 0 {
            self.para_text.push_str(text);
        } else if let Some(run) = self.inline_run.as_mut() {
            run.push_str(text);
        } else if let Some(group) = self.groups.last_mut() {
            group.push_block(text);
        } else {
            self.body.push_str(text);
        }
    }

    /// Start collecting inline text for a paragraph-like construct.
    pub(crate) fn begin_inline(&mut self, node: NodeRef<'_>) {
        self.para_level += 1;
        if self.para_level > 1 {
            let parent = node
                .parent()
                .map(|parent| parent.to_string())
                .unwrap_or_default();
            self.emit_warning(eco_format!(
                "nested paragraph!\n  node: {node}\n  parent: {parent}"
            ));
        }
    }

    /// Finish the innermost paragraph-like construct and take its text.
    pub(crate) fn end_inline(&mut self) -> EcoString {
        self.para_level = self.para_level.saturating_sub(1);
        std::mem::take(&mut self.para_text)
    }

    /// Keep link pieces together as one block when inside a group.
    pub(crate) fn begin_force_inline(&mut self) {
        self.force_inline = true;
        if self.para_level == 0 && !self.groups.is_empty() && self.inline_run.is_none() {
            self.inline_run = Some(EcoString::new());
        }
    }

    pub(crate) fn end_force_inline(&mut self) {
        self.force_inline = false;
        if let Some(run) = self.inline_run.take() {
            self.emit(&run);
        }
    }

    /// Start a new group owned by `node`.
    pub(crate) fn push_group(&mut self, node: NodeRef<'_>, prefix: &str) {
        self.groups.push(Group {
            node: node.id(),
            prefix: prefix.into(),
            blocks: Vec::new(),
        });
    }

    /// Close the top group and return its owner with its rendering. With
    /// `compact`, single-line content is rendered without grouping tokens.
    pub(crate) fn take_group(&mut self, postfix: &str, compact: bool) -> Option<(NodeId, EcoString)> {
        let Some(group) = self.groups.pop() else {
            self.emit_warning("tried to close a group, but none is open");
            return None;
        };

        let text = match compact {
            true => group.render_compact(postfix),
            false => None,
        };
        let text = text.unwrap_or_else(|| group.render(postfix));
        Some((group.node, text))
    }

    /// Close the top group, emit its rendering and return its owner.
    pub(crate) fn pop_group(&mut self, postfix: &str) -> Option<NodeId> {
        let (node, text) = self.take_group(postfix, false)?;
        self.emit(&text);
        Some(node)
    }

    /// Close the group pushed by `node`, complaining if another one is on top.
    pub(crate) fn pop_group_of(&mut self, node: NodeRef<'_>, postfix: &str) {
        let popped = self.pop_group(postfix);
        self.check_popped(node, popped);
    }

    /// Complain when the popped group was not pushed by `expected`.
    pub(crate) fn check_popped(&mut self, expected: NodeRef<'_>, popped: Option<NodeId>) {
        if popped == Some(expected.id()) {
            return;
        }

        let popped = popped
            .and_then(|id| self.tree.get(id))
            .map(|node| node.to_string())
            .unwrap_or_else(|| "nothing".into());
        self.emit_warning(eco_format!(
            "A different group node was popped than expected!\nexpected: {expected}\npopped: {popped}"
        ));
    }

    /// Emit a warning through the diagnostic sink and logger.
    pub(crate) fn emit_warning<S: Into<EcoString>>(&mut self, message: S) {
        let message = message.into();
        log::warn!("{message}");
        self.diagnostics.emit(Diagnostic::warning(message));
    }

    /// Emit a warning about `node` through the diagnostic sink and logger.
    pub(crate) fn warn_node(&mut self, message: &str, node: NodeRef<'_>) {
        let message = eco_format!("{message}\n  node: {node}");
        log::warn!("{message}");
        self.diagnostics
            .emit(Diagnostic::warning(message).with_tag(node.kind().tag()));
    }

    /// Emit an informational message through the diagnostic sink and logger.
    pub(crate) fn emit_info<S: Into<EcoString>>(&mut self, message: S) {
        let message = message.into();
        log::info!("{message}");
        self.diagnostics.emit(Diagnostic::info(message));
    }
}

impl NodeVisitor for XWikiTranslator<'_> {
    fn visit(&mut self, node: NodeRef<'_>) -> Visit {
        use NodeKind::*;

        match node.kind() {
            Document | Target | TBody | DefinitionList | DefinitionListItem | Line => {
                Visit::Continue
            }
            Text => self.visit_text(node),
            Problematic => {
                self.warn_node("found problematic node!", node);
                Visit::Continue
            }

            Paragraph | Caption => self.visit_paragraph(node),
            Rubric => {
                self.emit_info(eco_format!("rendering rubric as a paragraph\n  node: {node}"));
                self.visit_paragraph(node)
            }
            CompactParagraph => self.visit_compact_paragraph(node),
            Section => self.visit_section(node),
            Title => self.visit_title(node),
            Transition => self.visit_transition(),
            Meta => self.visit_meta(node),
            Raw => self.visit_raw(node),
            Comment | SubstitutionDefinition => Visit::SkipNode,

            Compound | LineBlock => {
                self.push_group(node, "");
                Visit::Continue
            }
            BlockQuote => self.visit_block_quote(node),
            Topic => self.visit_topic(node),

            BulletList | EnumeratedList => self.visit_list(node),
            ListItem => self.visit_list_item(node),
            Term => self.visit_term(node),
            Definition => {
                self.push_group(node, super::syntax::DEFINITION_PREFIX);
                Visit::Continue
            }

            Table => self.visit_table(),
            TGroup => self.visit_tgroup(node),
            ColSpec => self.visit_colspec(node),
            THead => {
                self.set_in_thead(true);
                Visit::Continue
            }
            Row => self.visit_row(),
            HList => self.visit_hlist(),
            Entry | HListCol => self.visit_entry(node),

            Admonition => Visit::Continue,
            Note | Warning | Tip | Hint | Important => self.visit_admonition(node),

            LiteralBlock => self.visit_literal_block(node),
            Literal | LiteralStrong => self.visit_literal(node),
            Emphasis | Strong | Subscript | Superscript | TitleReference | Inline => {
                self.visit_inline_style(node)
            }
            Reference => self.visit_reference(),
            Image => self.visit_image(node),
            Figure => self.visit_figure(node),

            Unknown(..) => self.unknown_visit(node),
        }
    }

    fn depart(&mut self, node: NodeRef<'_>) {
        use NodeKind::*;

        match node.kind() {
            Document | Target | TBody | DefinitionList | TGroup | ColSpec | Text | Problematic => {}

            Paragraph | Caption | Rubric => self.depart_paragraph(),
            CompactParagraph => self.depart_compact_paragraph(node),
            Section => self.section_level = self.section_level.saturating_sub(1),
            Title => self.depart_title(),
            Line => self.emit("\n"),

            Compound | LineBlock | Definition => self.pop_group_of(node, ""),
            BlockQuote | Topic => self.pop_group_of(node, "\n\n"),

            BulletList | EnumeratedList => self.depart_list(),
            ListItem => self.pop_group_of(node, "\n"),
            DefinitionListItem => self.emit("\n\n"),
            Term => self.depart_term(),

            Table => self.depart_table(),
            THead => self.set_in_thead(false),
            Row => self.depart_row(),
            HList => self.depart_hlist(),
            Entry | HListCol => self.depart_entry(node),

            Admonition | Note | Warning | Tip | Hint | Important => self.pop_group_of(node, "\n\n"),

            Emphasis | Strong | Subscript | Superscript | TitleReference | Inline => {
                self.depart_inline_style(node)
            }
            Reference => self.depart_reference(node),

            // Rendered whole on entry.
            Transition | Meta | Raw | Comment | SubstitutionDefinition | LiteralBlock | Literal
            | LiteralStrong | Image | Figure => {}

            Unknown(..) => self.unknown_departure(node),
        }
    }

    fn unknown_visit(&mut self, node: NodeRef<'_>) -> Visit {
        self.warn_node("WARNING:: Visiting unknown node!", node);
        Visit::Continue
    }

    fn unknown_departure(&mut self, node: NodeRef<'_>) {
        self.warn_node("WARNING:: Departing unknown node!", node);
    }
}
