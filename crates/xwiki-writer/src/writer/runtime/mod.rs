//! Runtime utilities shared between writer backends.

pub mod diagnostics;
pub mod visitor;
