//! The text buffer being edited

use std::path::{Path, PathBuf};

/// Characters that separate words in addition to whitespace
const WORD_SEPARATORS: &[char] = &['\n', ',', '.', ':', ';', '"', '\'', '?', '!'];

/// Label used for a buffer that has never been saved
pub const UNTITLED: &str = "New Text File";

/// A plain-text document
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Document content
    pub content: String,
    /// File the content was loaded from or last saved to
    path: Option<PathBuf>,
    /// Whether editing is in progress (unsaved changes)
    modified: bool,
    /// Bumped on every edit
    revision: u64,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from text read from `path`
    pub fn from_file(path: PathBuf, content: String) -> Self {
        Self {
            content,
            path: Some(path),
            modified: false,
            revision: 0,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Record that the content changed
    pub fn mark_edited(&mut self) {
        self.revision += 1;
        self.modified = true;
    }

    /// Clear the modified flag if nothing changed since `revision` was taken.
    /// Returns whether the document is now clean.
    pub fn mark_saved(&mut self, revision: u64) -> bool {
        if self.revision == revision {
            self.modified = false;
        }
        !self.modified
    }

    /// Path for display, or the untitled label
    pub fn display_name(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| UNTITLED.to_string())
    }

    pub fn line_count(&self) -> usize {
        line_count(&self.content)
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.content)
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Number of lines as a text box reports them: none for empty text.
pub fn line_count(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.matches('\n').count() + 1
    }
}

pub fn word_count(text: &str) -> usize {
    text.split(|c: char| c.is_whitespace() || WORD_SEPARATORS.contains(&c))
        .filter(|word| !word.is_empty())
        .count()
}
