//! Document tree consumed by the writers.
//!
//! This module defines the typed, ordered node tree produced by an external
//! parser, including construct kinds, attribute maps and the JSON input form.

mod attributes;
mod json;
mod kind;
mod tree;

pub use self::attributes::{AttrValue, Attributes};
pub use self::kind::NodeKind;
pub use self::tree::{Doctree, DoctreeBuilder, NodeId, NodeRef};
