#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

// Tree model exports
pub use crate::ast::{AttrValue, Attributes, Doctree, DoctreeBuilder, NodeId, NodeKind, NodeRef};

// Error types
pub use crate::error::{TreeError, TreeResult};

// Options
pub use crate::options::{WriterOptions, WriterOptionsBuilder};

// XWiki writer
pub use crate::writer::{to_xwiki, XWikiTranslator, XWikiWriter};

pub mod ast;
pub mod error;
pub mod options;
pub mod writer;
