//! JSON input for document trees.
//!
//! An element is `{"tag": "paragraph", "attributes": {...}, "children": [...]}`
//! and a text leaf is either `{"text": "..."}` or a bare JSON string.

use ecow::EcoString;
use serde::Deserialize;

use super::attributes::Attributes;
use super::kind::NodeKind;
use super::tree::{Doctree, DoctreeBuilder};
use crate::error::TreeResult;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonNode {
    Bare(EcoString),
    Element {
        tag: EcoString,
        #[serde(default)]
        attributes: Attributes,
        #[serde(default)]
        children: Vec<JsonNode>,
    },
    Text {
        text: EcoString,
    },
}

impl Doctree {
    /// Parses a document tree from its JSON form.
    ///
    /// A root that is not a `document` element is wrapped in one.
    pub fn from_json_str(input: &str) -> TreeResult<Self> {
        let root: JsonNode = serde_json::from_str(input)?;
        Self::from_json_node(root)
    }

    /// Builds a document tree from an already parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> TreeResult<Self> {
        let root: JsonNode = serde_json::from_value(value)?;
        Self::from_json_node(root)
    }

    fn from_json_node(root: JsonNode) -> TreeResult<Self> {
        let mut builder = DoctreeBuilder::new();
        match root {
            JsonNode::Element {
                tag,
                attributes,
                children,
            } if tag.as_str() == "document" => {
                builder.set_root(NodeKind::Document, attributes);
                for child in children {
                    push_node(&mut builder, child);
                }
            }
            other => push_node(&mut builder, other),
        }

        debug_assert!(builder.at_root());
        builder.finish()
    }
}

fn push_node(builder: &mut DoctreeBuilder, node: JsonNode) {
    match node {
        JsonNode::Bare(text) | JsonNode::Text { text } => {
            builder.text(text);
        }
        JsonNode::Element {
            tag,
            attributes,
            children,
        } => {
            builder.open(NodeKind::from_tag(&tag));
            for (key, value) in attributes.iter() {
                builder.attr(key.clone(), value.clone());
            }
            for child in children {
                push_node(builder, child);
            }
            builder.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TreeError;

    #[test]
    fn parses_elements_and_text() {
        let tree = Doctree::from_json_str(
            r#"{
                "tag": "document",
                "children": [
                    {"tag": "paragraph", "attributes": {"classes": ["lead"]}, "children": [
                        "Plain ",
                        {"tag": "strong", "children": [{"text": "bold"}]}
                    ]}
                ]
            }"#,
        )
        .unwrap();

        let para = tree.root().children().next().unwrap();
        assert_eq!(para.kind(), &NodeKind::Paragraph);
        assert_eq!(para.attributes().list("classes"), [EcoString::from("lead")]);
        assert_eq!(para.astext(), "Plain bold");
        assert_eq!(para.parent(), Some(tree.root()));
    }

    #[test]
    fn wraps_non_document_roots() {
        let tree = Doctree::from_json_str(r#"{"tag": "paragraph", "children": ["x"]}"#).unwrap();
        assert_eq!(tree.root().kind(), &NodeKind::Document);
        assert_eq!(tree.root().children().len(), 1);
    }

    #[test]
    fn unknown_tags_survive() {
        let tree = Doctree::from_json_str(r#"{"tag": "sidebar"}"#).unwrap();
        let sidebar = tree.root().children().next().unwrap();
        assert_eq!(sidebar.kind(), &NodeKind::Unknown("sidebar".into()));
    }

    #[test]
    fn null_and_fractional_attributes_are_accepted() {
        let tree = Doctree::from_json_str(
            r#"{"tag": "document", "attributes": {"title": null}, "children": [
                {"tag": "colspec", "attributes": {"colwidth": 33.3, "stub": null}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(tree.root().attr("title"), None);
        let colspec = tree.root().children().next().unwrap();
        assert_eq!(colspec.attributes().int("colwidth"), Some(33));
        assert!(!colspec.attributes().flag("stub"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Doctree::from_json_str("{\"tag\": "),
            Err(TreeError::Json(..))
        ));
    }
}
