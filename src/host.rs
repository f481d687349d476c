//! Host editor interface
//!
//! The expansion engine never owns a text buffer. It reads lines, the
//! selection and indentation settings through these traits and hands edit
//! transactions back to whoever implements them (the bundled [`Editor`] model,
//! a language-server bridge, a test double, ...).
//!
//! [`Editor`]: crate::model::Editor

use std::borrow::Cow;

use crate::model::{Position, Selection};

/// Read-only line access, the only thing the line scanner needs.
pub trait TextSource {
    /// Number of lines (always >= 1 for a real document)
    fn line_count(&self) -> usize;

    /// Line content without its trailing newline, `None` past the end
    fn line(&self, line: usize) -> Option<Cow<'_, str>>;
}

/// Indentation settings of the host document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentOptions {
    /// Width of one indentation level in columns
    pub width: usize,
    /// Indent with spaces (`true`) or tab characters (`false`)
    pub use_spaces: bool,
}

impl IndentOptions {
    pub const fn spaces(width: usize) -> Self {
        Self {
            width,
            use_spaces: true,
        }
    }

    pub const fn tabs(width: usize) -> Self {
        Self {
            width,
            use_spaces: false,
        }
    }

    /// The character a single indentation column is made of
    pub fn indent_char(&self) -> char {
        if self.use_spaces {
            ' '
        } else {
            '\t'
        }
    }
}

impl Default for IndentOptions {
    fn default() -> Self {
        Self::spaces(4)
    }
}

/// A single edit inside a transaction.
///
/// Positions refer to the document as it was before the transaction started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    /// Remove the text between two positions (end exclusive)
    Delete { start: Position, end: Position },
    /// Insert text at a position
    Insert { at: Position, text: String },
}

impl TextEdit {
    pub fn is_delete(&self) -> bool {
        matches!(self, TextEdit::Delete { .. })
    }
}

/// Full host surface: reads plus scoped, all-or-nothing edit transactions.
pub trait EditorHost: TextSource {
    /// Current primary selection
    fn selection(&self) -> Selection;

    /// Indentation settings for the active document
    fn indent(&self) -> IndentOptions;

    /// Declared language of the active document (e.g. `"typescript"`)
    fn language_id(&self) -> &str;

    /// Apply every edit as one transaction.
    ///
    /// Returns once the transaction is committed. On error nothing was applied.
    fn apply_edits(&mut self, edits: &[TextEdit]) -> anyhow::Result<()>;
}
