//! Construct kinds of document tree nodes.

use ecow::EcoString;
use strum::{EnumIter, IntoEnumIterator};

/// The construct a node represents, keyed by the tag names used by
/// docutils-style document trees.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumIter)]
pub enum NodeKind {
    // Structure
    /// Root of every tree.
    Document,
    /// A titled section; nesting sets the heading weight.
    Section,
    /// Title of a section, topic or generic admonition.
    Title,
    /// A horizontal rule between sections.
    Transition,
    /// A boxed side topic, including local tables of contents.
    Topic,
    /// Page metadata such as keywords.
    Meta,

    // Paragraph-like
    /// A paragraph of running text.
    Paragraph,
    /// A paragraph produced by compact list rendering.
    CompactParagraph,
    /// Caption of a figure.
    Caption,
    /// An informal heading that does not start a section.
    Rubric,

    // Groups
    /// Paragraphs that belong together.
    Compound,
    /// Lines whose breaks are significant.
    LineBlock,
    /// One line of a line block.
    Line,
    /// A quoted block.
    BlockQuote,

    // Lists
    /// An unordered list.
    BulletList,
    /// An ordered list.
    EnumeratedList,
    /// An item of a bullet or enumerated list.
    ListItem,
    /// A list of terms and their definitions.
    DefinitionList,
    /// A term with its definition.
    DefinitionListItem,
    /// The defined term.
    Term,
    /// Body of a definition list item.
    Definition,

    // Tables
    /// A table.
    Table,
    /// Column layout of a table.
    TGroup,
    /// Width and stub hints of one column.
    ColSpec,
    /// Header rows of a table.
    THead,
    /// Body rows of a table.
    TBody,
    /// A table row.
    Row,
    /// A table cell.
    Entry,
    /// A horizontal list, laid out as a one-row table.
    HList,
    /// One column of a horizontal list.
    HListCol,

    // Links and media
    /// A link, internal or external.
    Reference,
    /// A link target; carries no output.
    Target,
    /// A standalone or inline image.
    Image,
    /// An image with a caption.
    Figure,

    // Code
    /// Inline code.
    Literal,
    /// Inline code rendered bold.
    LiteralStrong,
    /// A code block.
    LiteralBlock,
    /// Content passed through in a named format.
    Raw,

    // Inline styling
    /// Emphasized text.
    Emphasis,
    /// Strongly emphasized text.
    Strong,
    /// Subscript text.
    Subscript,
    /// Superscript text.
    Superscript,
    /// An inline span styled by its role classes.
    Inline,
    /// Title of a cited work.
    TitleReference,

    // Admonitions
    /// An admonition with its own title.
    Admonition,
    /// A `note` admonition.
    Note,
    /// A `warning` admonition.
    Warning,
    /// A `tip` admonition.
    Tip,
    /// A `hint` admonition.
    Hint,
    /// An `important` admonition.
    Important,

    // Ignored or diagnostic-only constructs
    /// A source comment; never rendered.
    Comment,
    /// A substitution definition; never rendered.
    SubstitutionDefinition,
    /// Content the parser flagged as malformed.
    Problematic,

    /// A text leaf.
    Text,
    /// Any tag without a dedicated variant.
    Unknown(EcoString),
}

impl NodeKind {
    /// Resolves a tag name. Unrecognized names become [`NodeKind::Unknown`].
    pub fn from_tag(tag: &str) -> Self {
        NodeKind::iter()
            .filter(|kind| !matches!(kind, NodeKind::Unknown(..)))
            .find(|kind| kind.tag() == tag)
            .unwrap_or_else(|| NodeKind::Unknown(tag.into()))
    }

    /// The tag name of the construct.
    pub fn tag(&self) -> &str {
        use NodeKind::*;

        match self {
            Document => "document",
            Section => "section",
            Title => "title",
            Transition => "transition",
            Topic => "topic",
            Meta => "meta",
            Paragraph => "paragraph",
            CompactParagraph => "compact_paragraph",
            Caption => "caption",
            Rubric => "rubric",
            Compound => "compound",
            LineBlock => "line_block",
            Line => "line",
            BlockQuote => "block_quote",
            BulletList => "bullet_list",
            EnumeratedList => "enumerated_list",
            ListItem => "list_item",
            DefinitionList => "definition_list",
            DefinitionListItem => "definition_list_item",
            Term => "term",
            Definition => "definition",
            Table => "table",
            TGroup => "tgroup",
            ColSpec => "colspec",
            THead => "thead",
            TBody => "tbody",
            Row => "row",
            Entry => "entry",
            HList => "hlist",
            HListCol => "hlistcol",
            Reference => "reference",
            Target => "target",
            Image => "image",
            Figure => "figure",
            Literal => "literal",
            LiteralStrong => "literal_strong",
            LiteralBlock => "literal_block",
            Raw => "raw",
            Emphasis => "emphasis",
            Strong => "strong",
            Subscript => "subscript",
            Superscript => "superscript",
            Inline => "inline",
            TitleReference => "title_reference",
            Admonition => "admonition",
            Note => "note",
            Warning => "warning",
            Tip => "tip",
            Hint => "hint",
            Important => "important",
            Comment => "comment",
            SubstitutionDefinition => "substitution_definition",
            Problematic => "problematic",
            Text => "#text",
            Unknown(tag) => tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_resolve_to_their_kind() {
        for kind in NodeKind::iter().filter(|kind| !matches!(kind, NodeKind::Unknown(..))) {
            assert_eq!(NodeKind::from_tag(kind.tag()), kind);
        }
    }

    #[test]
    fn unrecognized_tags_are_kept() {
        let kind = NodeKind::from_tag("sidebar");
        assert_eq!(kind, NodeKind::Unknown("sidebar".into()));
        assert_eq!(kind.tag(), "sidebar");
    }
}
