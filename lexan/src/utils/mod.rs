//! Shared primitive types used across the lexer and its collaborators.

pub mod span;

pub use span::{Position, SourceMap, Span, Spanned};
