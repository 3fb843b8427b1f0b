//! Document model - the styled buffer and its file state

use std::path::{Path, PathBuf};

use super::buffer::StyledBuffer;
use crate::highlight::TextStyle;

/// Whether highlighting applies to a file at `path` (`.md`, any case)
pub fn is_markdown_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Document state - the text buffer and associated file metadata
#[derive(Debug, Clone)]
pub struct Document {
    pub buffer: StyledBuffer,
    /// Path to the file on disk (None for untitled buffers)
    pub file_path: Option<PathBuf>,
    /// Markdown highlighting applies to this document
    pub markdown: bool,
    /// Incremented on each text edit
    pub revision: u64,
}

impl Document {
    /// Empty untitled document
    pub fn new(base: TextStyle) -> Self {
        Self::with_text("", base)
    }

    /// Untitled document with initial text. Untitled buffers count as Markdown.
    pub fn with_text(text: &str, base: TextStyle) -> Self {
        Self {
            buffer: StyledBuffer::new(text, base),
            file_path: None,
            markdown: true,
            revision: 0,
        }
    }

    /// Load a document from a file
    pub fn from_file(path: PathBuf, base: TextStyle) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(&path)?;
        Ok(Self::from_content(path, &content, base))
    }

    /// Document for `path` with already-loaded content
    pub fn from_content(path: PathBuf, content: &str, base: TextStyle) -> Self {
        Self {
            buffer: StyledBuffer::new(content, base),
            markdown: is_markdown_path(&path),
            file_path: Some(path),
            revision: 0,
        }
    }

    /// File name, or "Untitled"
    pub fn display_name(&self) -> String {
        self.file_path
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::MarkdownPalette;

    fn base() -> TextStyle {
        MarkdownPalette::default().base
    }

    #[test]
    fn test_markdown_extension_is_case_insensitive() {
        assert!(is_markdown_path(Path::new("notes.md")));
        assert!(is_markdown_path(Path::new("README.MD")));
        assert!(is_markdown_path(Path::new("dir/Doc.Md")));
        assert!(!is_markdown_path(Path::new("notes.markdown")));
        assert!(!is_markdown_path(Path::new("main.rs")));
        assert!(!is_markdown_path(Path::new("md")));
    }

    #[test]
    fn test_untitled_document_is_markdown() {
        let doc = Document::new(base());
        assert!(doc.markdown);
        assert_eq!(doc.display_name(), "Untitled");
    }

    #[test]
    fn test_from_content_detects_markdown() {
        let doc = Document::from_content(PathBuf::from("a/b.txt"), "# x", base());
        assert!(!doc.markdown);
        assert_eq!(doc.display_name(), "b.txt");
    }
}
