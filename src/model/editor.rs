//! Editor state - positions, selections and the editor host model

use std::borrow::Cow;

use anyhow::{bail, Context as _};
use serde::{Deserialize, Serialize};

use super::document::Document;
use crate::host::{EditorHost, IndentOptions, TextEdit, TextSource};

/// A position in the document (line and column)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed, in chars)
    pub column: usize,
}

impl Position {
    /// Create a new position
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A text selection with anchor (start) and head (cursor end)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: Position,
    /// Where the cursor is (moving point)
    pub head: Position,
}

impl Selection {
    /// Create a new empty selection at a position
    pub fn new(pos: Position) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    /// Create a selection from anchor to head
    pub fn from_anchor_head(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// Check if selection is empty (cursor without selection)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Get the start of the selection (smaller position)
    pub fn start(&self) -> Position {
        self.anchor.min(self.head)
    }

    /// Get the end of the selection (larger position)
    pub fn end(&self) -> Position {
        self.anchor.max(self.head)
    }

    /// Number of line boundaries crossed (0 for a single-line selection)
    pub fn line_span(&self) -> usize {
        self.end().line - self.start().line
    }
}

/// A document plus the selection and indentation settings of its view.
///
/// This is the crate's own [`EditorHost`]: the CLI and the tests drive the
/// expansion engine through it.
#[derive(Debug, Clone)]
pub struct Editor {
    pub document: Document,
    pub selection: Selection,
    pub indent: IndentOptions,
}

impl Editor {
    pub fn new(document: Document, indent: IndentOptions) -> Self {
        Self {
            document,
            selection: Selection::default(),
            indent,
        }
    }

    /// Place an empty selection (a cursor) at a position
    pub fn set_cursor(&mut self, line: usize, column: usize) {
        self.selection = Selection::new(Position::new(line, column));
    }

    /// Select from anchor to head
    pub fn set_selection(&mut self, anchor: Position, head: Position) {
        self.selection = Selection::from_anchor_head(anchor, head);
    }

    /// Pull both selection ends back inside the document
    pub fn clamp_selection(&mut self) {
        let clamp = |pos: Position| {
            let line = pos.line.min(self.document.line_count().saturating_sub(1));
            Position::new(line, pos.column.min(self.document.line_length(line)))
        };
        self.selection = Selection::from_anchor_head(
            clamp(self.selection.anchor),
            clamp(self.selection.head),
        );
    }

    /// Full buffer content
    pub fn text(&self) -> String {
        self.document.buffer.to_string()
    }

    fn check_position(&self, pos: Position) -> anyhow::Result<()> {
        if pos.line >= self.document.line_count() {
            bail!(
                "line {} out of range (document has {} lines)",
                pos.line,
                self.document.line_count()
            );
        }
        let len = self.document.line_length(pos.line);
        if pos.column > len {
            bail!(
                "column {} out of range on line {} (length {})",
                pos.column,
                pos.line,
                len
            );
        }
        Ok(())
    }
}

/// Edit resolved to char offsets in the pre-transaction buffer
enum ResolvedEdit<'a> {
    Delete { start: usize, end: usize },
    Insert { at: usize, text: &'a str },
}

impl ResolvedEdit<'_> {
    fn offset(&self) -> usize {
        match self {
            ResolvedEdit::Delete { start, .. } => *start,
            ResolvedEdit::Insert { at, .. } => *at,
        }
    }

    /// Shift a buffer offset past this edit
    fn map_offset(&self, offset: usize) -> usize {
        match *self {
            ResolvedEdit::Delete { start, end } => {
                if offset >= end {
                    offset - (end - start)
                } else if offset > start {
                    start
                } else {
                    offset
                }
            }
            ResolvedEdit::Insert { at, text } => {
                if offset >= at {
                    offset + text.chars().count()
                } else {
                    offset
                }
            }
        }
    }
}

impl TextSource for Editor {
    fn line_count(&self) -> usize {
        self.document.line_count()
    }

    fn line(&self, line: usize) -> Option<Cow<'_, str>> {
        self.document.get_line_cow(line)
    }
}

impl EditorHost for Editor {
    fn selection(&self) -> Selection {
        self.selection
    }

    fn indent(&self) -> IndentOptions {
        self.indent
    }

    fn language_id(&self) -> &str {
        &self.document.language
    }

    fn apply_edits(&mut self, edits: &[TextEdit]) -> anyhow::Result<()> {
        // Validate everything before touching the buffer so a bad edit
        // leaves the document untouched.
        let mut resolved = Vec::with_capacity(edits.len());
        for edit in edits {
            match edit {
                TextEdit::Delete { start, end } => {
                    self.check_position(*start)
                        .context("invalid delete start")?;
                    self.check_position(*end).context("invalid delete end")?;
                    if end < start {
                        bail!("delete range ends before it starts");
                    }
                    resolved.push(ResolvedEdit::Delete {
                        start: self.document.cursor_to_offset(start.line, start.column),
                        end: self.document.cursor_to_offset(end.line, end.column),
                    });
                }
                TextEdit::Insert { at, text } => {
                    self.check_position(*at).context("invalid insert position")?;
                    resolved.push(ResolvedEdit::Insert {
                        at: self.document.cursor_to_offset(at.line, at.column),
                        text,
                    });
                }
            }
        }

        // Apply back to front; at equal offsets the delete goes first so an
        // insert at the start of a deleted range survives.
        resolved.sort_by(|a, b| {
            b.offset().cmp(&a.offset()).then_with(|| {
                let rank = |e: &ResolvedEdit| matches!(e, ResolvedEdit::Insert { .. }) as u8;
                rank(a).cmp(&rank(b))
            })
        });

        let mut anchor = self
            .document
            .cursor_to_offset(self.selection.anchor.line, self.selection.anchor.column);
        let mut head = self
            .document
            .cursor_to_offset(self.selection.head.line, self.selection.head.column);

        for edit in &resolved {
            match *edit {
                ResolvedEdit::Delete { start, end } => self.document.remove(start, end),
                ResolvedEdit::Insert { at, text } => self.document.insert(at, text),
            }
            anchor = edit.map_offset(anchor);
            head = edit.map_offset(head);
        }

        let (anchor_line, anchor_col) = self.document.offset_to_cursor(anchor);
        let (head_line, head_col) = self.document.offset_to_cursor(head);
        self.selection = Selection::from_anchor_head(
            Position::new(anchor_line, anchor_col),
            Position::new(head_line, head_col),
        );

        tracing::debug!(
            edits = edits.len(),
            revision = self.document.revision,
            "applied edit transaction"
        );
        Ok(())
    }
}
