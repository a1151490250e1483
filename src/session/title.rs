/// Application name, used as the base window title.
pub const APP_NAME: &str = "Markedly";

/// How the window title changes when a file is associated.
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitleMode {
    /// `Markedly - <name>`, rebuilt on every association.
    #[default]
    Replace,
    /// Keep appending ` - <name>` to whatever the title already is.
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowTitle {
    mode: TitleMode,
    text: String,
}

impl WindowTitle {
    pub fn new(mode: TitleMode) -> Self {
        Self {
            mode,
            text: APP_NAME.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub const fn mode(&self) -> TitleMode {
        self.mode
    }

    /// Record that the document is now associated with `name`.
    pub fn associate(&mut self, name: &str) {
        self.text = match self.mode {
            TitleMode::Replace => format!("{APP_NAME} - {name}"),
            TitleMode::Append => format!("{} - {name}", self.text),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_starts_as_app_name() {
        assert_eq!(WindowTitle::new(TitleMode::Replace).as_str(), "Markedly");
    }

    #[test]
    fn test_replace_mode_sets_title_once_per_association() {
        let mut title = WindowTitle::new(TitleMode::Replace);
        title.associate("a.md");
        title.associate("b.md");
        assert_eq!(title.as_str(), "Markedly - b.md");
    }

    #[test]
    fn test_append_mode_accumulates() {
        let mut title = WindowTitle::new(TitleMode::Append);
        title.associate("a.md");
        title.associate("a.md");
        assert_eq!(title.as_str(), "Markedly - a.md - a.md");
    }
}
