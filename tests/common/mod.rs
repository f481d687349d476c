//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::borrow::Cow;
use std::path::PathBuf;

use ng_emmet::expand::{ExpandOptions, ExpansionError};
use ng_emmet::model::{Document, Editor, Position, Selection};
use ng_emmet::{EditorHost, IndentOptions, TextEdit, TextSource};

/// Path of a file under `tests/fixtures/`
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Contents of a fixture file
pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap()
}

/// TypeScript editor with a cursor at (line, column), 4-space indentation
pub fn ts_editor(text: &str, line: usize, column: usize) -> Editor {
    let document = Document::with_text(text).with_language("typescript");
    let mut editor = Editor::new(document, IndentOptions::spaces(4));
    editor.set_cursor(line, column);
    editor
}

/// TypeScript editor with a selection from anchor to head
pub fn ts_editor_with_selection(
    text: &str,
    anchor: (usize, usize),
    head: (usize, usize),
) -> Editor {
    let mut editor = ts_editor(text, anchor.0, anchor.1);
    editor.set_selection(
        Position::new(anchor.0, anchor.1),
        Position::new(head.0, head.1),
    );
    editor
}

/// Expander that rejects everything
pub fn failing_expander(_: &str, _: &ExpandOptions) -> Result<String, ExpansionError> {
    Err(ExpansionError::Empty)
}

/// Host wrapper recording every transaction it is asked to apply
pub struct RecordingHost {
    pub editor: Editor,
    pub transactions: Vec<Vec<TextEdit>>,
    /// Reject every transaction instead of applying it
    pub fail: bool,
}

impl RecordingHost {
    pub fn new(editor: Editor) -> Self {
        Self {
            editor,
            transactions: Vec::new(),
            fail: false,
        }
    }

    pub fn failing(editor: Editor) -> Self {
        Self {
            fail: true,
            ..Self::new(editor)
        }
    }

    pub fn deletes(&self) -> Vec<&TextEdit> {
        self.transactions
            .iter()
            .flatten()
            .filter(|edit| edit.is_delete())
            .collect()
    }
}

impl TextSource for RecordingHost {
    fn line_count(&self) -> usize {
        self.editor.line_count()
    }

    fn line(&self, line: usize) -> Option<Cow<'_, str>> {
        self.editor.line(line)
    }
}

impl EditorHost for RecordingHost {
    fn selection(&self) -> Selection {
        self.editor.selection()
    }

    fn indent(&self) -> IndentOptions {
        self.editor.indent()
    }

    fn language_id(&self) -> &str {
        self.editor.language_id()
    }

    fn apply_edits(&mut self, edits: &[TextEdit]) -> anyhow::Result<()> {
        self.transactions.push(edits.to_vec());
        if self.fail {
            anyhow::bail!("host is read-only");
        }
        self.editor.apply_edits(edits)
    }
}
