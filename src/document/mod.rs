//! Markdown preview rendering.
//!
//! This module handles:
//! - Parsing markdown with comrak
//! - Laying the AST out as wrapped, styled lines for the preview pane

mod parser;
mod types;

pub use parser::{DEFAULT_WIDTH, render};
pub use types::{Document, HeadingRef, InlineSpan, InlineStyle, LineType, RenderedLine};
