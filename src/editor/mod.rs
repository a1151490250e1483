//! Rope-backed text buffer for the editor pane.
//!
//! Holds the document text and the cursor. The session wraps every
//! mutation so the preview can be refreshed afterwards.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};
