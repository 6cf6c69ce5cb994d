//! srcweave_core: Core utilities shared by the srcweave source analysis crates.
//!
//! Provides the byte ranges recorded for parsed constructs (call sites,
//! import declarations) and the line index that reports them as
//! `line:column`.

pub mod location;
pub mod text;

pub use location::{LineIndex, SourceLocation};
pub use text::{TextPos, TextRange};
