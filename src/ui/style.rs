//! Theming and color definitions.
//!
//! Styles for rendered markdown elements and for the editor chrome. Both
//! palettes use indexed ANSI colors so they follow the terminal's palette.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeMode;
use crate::document::{InlineStyle, LineType};

/// Theme configuration for the entire application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Heading level 1 style
    pub h1: Style,
    /// Heading level 2 style
    pub h2: Style,
    /// Heading level 3 style
    pub h3: Style,
    /// Heading level 4+ style
    pub h4: Style,
    /// Code block style
    pub code: Style,
    /// Inline code style
    pub inline_code: Style,
    /// Block quote style
    pub quote: Style,
    /// Link style
    pub link: Style,
    /// Image placeholder style
    pub image: Style,
    /// Horizontal rule style
    pub hr: Style,
    /// Editor line numbers
    pub gutter: Style,
    /// Cell under the editor cursor
    pub cursor: Style,
    /// Menu bar and dropdown
    pub menu: Style,
    /// Highlighted dropdown row
    pub menu_highlight: Style,
    /// Disabled dropdown row
    pub menu_disabled: Style,
    /// Modal popups
    pub popup: Style,
    /// Status bar background
    pub status_bg: Color,
    /// Status bar foreground
    pub status_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Create a theme optimized for dark terminals.
    pub const fn dark() -> Self {
        Self {
            h1: Style::new()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD.union(Modifier::UNDERLINED)),
            h2: Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
            h3: Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            h4: Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD),
            code: Style::new().fg(Color::Indexed(245)),
            inline_code: Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
            quote: Style::new().fg(Color::Blue).add_modifier(Modifier::ITALIC),
            link: Style::new()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
            image: Style::new().fg(Color::Magenta).add_modifier(Modifier::ITALIC),
            hr: Style::new().fg(Color::Indexed(240)),
            gutter: Style::new().fg(Color::DarkGray),
            cursor: Style::new().bg(Color::White).fg(Color::Black),
            menu: Style::new().bg(Color::Indexed(236)).fg(Color::Indexed(252)),
            menu_highlight: Style::new().bg(Color::Blue).fg(Color::White),
            menu_disabled: Style::new().bg(Color::Indexed(236)).fg(Color::Indexed(242)),
            popup: Style::new().bg(Color::Black).fg(Color::White),
            status_bg: Color::Indexed(236),
            status_fg: Color::Indexed(252),
        }
    }

    /// Create a theme optimized for light terminals.
    pub const fn light() -> Self {
        Self {
            h1: Style::new()
                .fg(Color::Indexed(31))
                .add_modifier(Modifier::BOLD.union(Modifier::UNDERLINED)),
            h2: Style::new().fg(Color::Indexed(28)).add_modifier(Modifier::BOLD),
            h3: Style::new().fg(Color::Indexed(136)).add_modifier(Modifier::BOLD),
            h4: Style::new().fg(Color::Indexed(25)).add_modifier(Modifier::BOLD),
            code: Style::new().fg(Color::Indexed(240)),
            inline_code: Style::new().fg(Color::Indexed(124)).add_modifier(Modifier::BOLD),
            quote: Style::new().fg(Color::Indexed(25)).add_modifier(Modifier::ITALIC),
            link: Style::new()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            image: Style::new().fg(Color::Indexed(90)).add_modifier(Modifier::ITALIC),
            hr: Style::new().fg(Color::Indexed(245)),
            gutter: Style::new().fg(Color::Indexed(246)),
            cursor: Style::new().bg(Color::Black).fg(Color::White),
            menu: Style::new().bg(Color::Indexed(252)).fg(Color::Indexed(235)),
            menu_highlight: Style::new().bg(Color::Indexed(25)).fg(Color::White),
            menu_disabled: Style::new().bg(Color::Indexed(252)).fg(Color::Indexed(246)),
            popup: Style::new().bg(Color::White).fg(Color::Black),
            status_bg: Color::Indexed(252),
            status_fg: Color::Indexed(235),
        }
    }

    pub const fn status(&self) -> Style {
        Style::new().bg(self.status_bg).fg(self.status_fg)
    }
}

/// Get the style for a given line type.
pub fn style_for_line_type(theme: &Theme, line_type: &LineType) -> Style {
    match line_type {
        LineType::Heading(1) => theme.h1,
        LineType::Heading(2) => theme.h2,
        LineType::Heading(3) => theme.h3,
        LineType::Heading(_) => theme.h4,
        LineType::CodeBlock => theme.code,
        LineType::BlockQuote => theme.quote,
        LineType::HorizontalRule => theme.hr.add_modifier(Modifier::DIM),
        LineType::Image => theme.image,
        LineType::ListItem(_) | LineType::Table | LineType::Paragraph | LineType::Empty => {
            Style::default()
        }
    }
}

/// Get the style for an inline span, merged with a base line style.
pub fn style_for_inline(theme: &Theme, base: Style, inline: InlineStyle) -> Style {
    let mut style = base;

    if inline.emphasis {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if inline.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.strikethrough {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    if inline.link {
        style = style.patch(theme.link);
    }
    if inline.code {
        style = style.patch(theme.inline_code).remove_modifier(Modifier::DIM);
    }

    style
}
