//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - the screen layout shared by rendering and mouse hit-testing
//! - [`style`]: Theming and colors
//! - menu bar, panes, status bar and modal overlays

pub mod style;

mod overlays;
mod render;
mod status;

pub use overlays::{dialog_list_area, file_dialog_rect, menu_dropdown_rect};
pub use render::{
    ScreenLayout, editor_hscroll, file_menu_label_rect, line_number_width, pane_inner,
    preview_content_width, render, screen_layout,
};

/// Columns of blank space left of the preview text.
pub const PREVIEW_LEFT_PADDING: u16 = 1;
pub const EDITOR_WIDTH_PERCENT: u16 = 50;
pub const PREVIEW_WIDTH_PERCENT: u16 = 50;

#[cfg(test)]
mod tests;
