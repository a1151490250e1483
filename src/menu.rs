//! The `File` menu: its items and the highlight state of the dropdown.

/// A command reachable from the `File` menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCommand {
    Open,
    Save,
    SaveAs,
}

impl FileCommand {
    /// Menu order.
    pub const ALL: [Self; 3] = [Self::Open, Self::Save, Self::SaveAs];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open...",
            Self::Save => "Save",
            Self::SaveAs => "Save As..",
        }
    }

    pub const fn shortcut(self) -> &'static str {
        match self {
            Self::Open => "Ctrl+O",
            Self::Save => "Ctrl+S",
            Self::SaveAs => "F12",
        }
    }

    /// `Save` is only offered once the session has a file to write to.
    pub const fn is_enabled(self, save_enabled: bool) -> bool {
        match self {
            Self::Save => save_enabled,
            Self::Open | Self::SaveAs => true,
        }
    }
}

/// Open/closed state and highlighted row of the `File` dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileMenu {
    open: bool,
    highlighted: usize,
}

impl FileMenu {
    pub const LABEL: &'static str = "File";

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn open(&mut self) {
        self.open = true;
        self.highlighted = 0;
    }

    pub const fn close(&mut self) {
        self.open = false;
    }

    pub const fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    pub const fn highlighted(&self) -> FileCommand {
        FileCommand::ALL[self.highlighted]
    }

    /// Move the highlight to the next enabled item, if any.
    pub fn move_down(&mut self, save_enabled: bool) {
        if let Some(next) = (self.highlighted + 1..FileCommand::ALL.len())
            .find(|&i| FileCommand::ALL[i].is_enabled(save_enabled))
        {
            self.highlighted = next;
        }
    }

    /// Move the highlight to the previous enabled item, if any.
    pub fn move_up(&mut self, save_enabled: bool) {
        if let Some(prev) = (0..self.highlighted)
            .rev()
            .find(|&i| FileCommand::ALL[i].is_enabled(save_enabled))
        {
            self.highlighted = prev;
        }
    }

    /// The command Enter would run, or `None` when the highlighted item is
    /// disabled.
    pub const fn activation(&self, save_enabled: bool) -> Option<FileCommand> {
        let command = self.highlighted();
        if command.is_enabled(save_enabled) {
            Some(command)
        } else {
            None
        }
    }

    /// The command behind a click on dropdown row `index`.
    pub fn item_at(index: usize, save_enabled: bool) -> Option<FileCommand> {
        FileCommand::ALL
            .get(index)
            .copied()
            .filter(|command| command.is_enabled(save_enabled))
    }
}
