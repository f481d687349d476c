//! Document model - represents the text buffer and file state

use ropey::Rope;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

/// Language id reported for documents whose extension is not recognised
pub const PLAIN_TEXT: &str = "plaintext";

/// Map a file extension to the language id an editor host would declare
pub fn language_from_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "ts" | "mts" | "cts" => "typescript",
        "tsx" => "typescriptreact",
        "js" | "mjs" | "cjs" => "javascript",
        "jsx" => "javascriptreact",
        "html" | "htm" => "html",
        _ => PLAIN_TEXT,
    }
}

/// Detect the language id from a file path
pub fn language_from_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(language_from_extension)
        .unwrap_or(PLAIN_TEXT)
}

/// Document state - the text buffer and associated file metadata
#[derive(Debug, Clone)]
pub struct Document {
    /// The text buffer
    pub buffer: Rope,
    /// Path to the file on disk (None for in-memory documents)
    pub file_path: Option<PathBuf>,
    /// Declared language id (e.g. "typescript")
    pub language: String,
    /// Whether the buffer has unsaved changes
    pub is_modified: bool,
    /// Document revision counter (incremented on each edit)
    pub revision: u64,
}

impl Document {
    /// Create a document with initial text
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            file_path: None,
            language: PLAIN_TEXT.to_string(),
            is_modified: false,
            revision: 0,
        }
    }

    /// Builder-style override of the declared language
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Load a document from a file path
    pub fn from_file(path: PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let language = language_from_path(&path).to_string();
        Ok(Self {
            buffer: Rope::from(content),
            file_path: Some(path),
            language,
            is_modified: false,
            revision: 0,
        })
    }

    /// Write the buffer back to its file
    pub fn save(&mut self) -> anyhow::Result<()> {
        let path = self
            .file_path
            .as_ref()
            .context("Document has no file path")?;
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        self.buffer
            .write_to(&mut file)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        self.is_modified = false;
        tracing::info!("Saved {}", path.display());
        Ok(())
    }

    /// Get the number of lines in the document
    pub fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    /// Get line content as Cow<str>, avoiding allocation when possible
    ///
    /// Returns Cow::Borrowed if the line is stored contiguously in a single chunk,
    /// otherwise returns Cow::Owned with the line as a String.
    /// The trailing newline (LF or CRLF) is trimmed.
    pub fn get_line_cow(&self, line_idx: usize) -> Option<Cow<'_, str>> {
        if line_idx >= self.buffer.len_lines() {
            return None;
        }

        let line = self.buffer.line(line_idx);
        let len = line.len_chars();

        let trim_len = if len > 0 && line.char(len - 1) == '\n' {
            if len > 1 && line.char(len - 2) == '\r' {
                2
            } else {
                1
            }
        } else {
            0
        };

        let trimmed = line.slice(..len - trim_len);
        match trimmed.as_str() {
            Some(s) => Some(Cow::Borrowed(s)),
            None => Some(Cow::Owned(trimmed.to_string())),
        }
    }

    /// Get the length of a line in chars (excluding the line break)
    pub fn line_length(&self, line_idx: usize) -> usize {
        self.get_line_cow(line_idx)
            .map(|line| line.chars().count())
            .unwrap_or(0)
    }

    /// Convert a (line, column) position to a buffer offset
    /// Uses ropey's O(log n) line_to_char method instead of O(n) iteration
    pub fn cursor_to_offset(&self, line: usize, column: usize) -> usize {
        if line >= self.buffer.len_lines() {
            return self.buffer.len_chars();
        }
        let line_start = self.buffer.line_to_char(line);
        line_start + column.min(self.line_length(line))
    }

    /// Convert a buffer offset to (line, column) position
    pub fn offset_to_cursor(&self, offset: usize) -> (usize, usize) {
        let clamped = offset.min(self.buffer.len_chars());
        let line = self.buffer.char_to_line(clamped);
        let line_start = self.buffer.line_to_char(line);
        (line, clamped - line_start)
    }

    /// Insert text at a char offset
    pub fn insert(&mut self, offset: usize, text: &str) {
        self.buffer.insert(offset, text);
        self.mark_edited();
    }

    /// Remove the chars in `start..end`
    pub fn remove(&mut self, start: usize, end: usize) {
        if start < end {
            self.buffer.remove(start..end);
            self.mark_edited();
        }
    }

    fn mark_edited(&mut self) {
        self.is_modified = true;
        self.revision = self.revision.wrapping_add(1);
    }
}
