use std::fmt;
use std::path::{Path, PathBuf};

/// Default name offered by the Save-As dialog.
pub const DEFAULT_FILE_NAME: &str = "untitled.md";

/// The location a document was last loaded from or saved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    path: PathBuf,
}

impl FileRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, as shown in the title and status bar.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().to_string())
    }

    /// Directory containing the file, if the path has one.
    pub fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

impl fmt::Display for FileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// File-name suffix filter shared by the dialogs and Save-As validation.
///
/// Suffixes are compared with ASCII case folded, so listing `.md` and `.MD`
/// also admits `.Md`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    suffixes: Vec<String>,
}

impl ExtensionFilter {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    /// The markdown filter used by every file command.
    pub fn markdown() -> Self {
        Self::new([".md", ".MD"])
    }

    /// Whether `name` ends with one of the suffixes.
    pub fn matches(&self, name: &str) -> bool {
        self.suffixes.iter().any(|suffix| {
            name.len()
                .checked_sub(suffix.len())
                .and_then(|start| name.get(start..))
                .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
        })
    }

    pub fn matches_path(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| self.matches(&name.to_string_lossy()))
    }

    /// Human-readable list for dialog hints, e.g. `.md, .MD`.
    pub fn describe(&self) -> String {
        self.suffixes.join(", ")
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::markdown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_ref_name_is_last_component() {
        let file = FileRef::new("/tmp/docs/notes.md");
        assert_eq!(file.name(), "notes.md");
        assert_eq!(file.parent_dir(), Some(Path::new("/tmp/docs")));
    }

    #[test]
    fn test_file_ref_without_parent() {
        let file = FileRef::new("notes.md");
        assert_eq!(file.parent_dir(), None);
    }

    #[test]
    fn test_markdown_filter_folds_case() {
        let filter = ExtensionFilter::markdown();
        assert!(filter.matches("notes.md"));
        assert!(filter.matches("NOTES.MD"));
        assert!(filter.matches("mixed.Md"));
        assert!(!filter.matches("notes.markdown"));
        assert!(!filter.matches("notes.txt"));
        assert!(!filter.matches("untitled"));
    }

    #[test]
    fn test_bare_suffix_is_a_match() {
        let filter = ExtensionFilter::markdown();
        assert!(filter.matches(".md"));
        assert!(filter.matches(".MD"));
        assert!(!filter.matches("md"));
    }

    #[test]
    fn test_filter_handles_multibyte_names() {
        let filter = ExtensionFilter::markdown();
        assert!(filter.matches("ノート.md"));
        assert!(!filter.matches("é"));
    }

    #[test]
    fn test_describe_lists_suffixes() {
        assert_eq!(ExtensionFilter::markdown().describe(), ".md, .MD");
    }
}
