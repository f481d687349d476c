//! Edit application - the two transactions a cycle can end with

use anyhow::Context as _;

use crate::context::LineInfo;
use crate::host::{EditorHost, TextEdit};
use crate::model::Position;
use crate::reformat::indent_unit;

/// Edits replacing the abbreviation in front of the cursor with `content`.
///
/// Returns `None` when `info` carries no abbreviation.
pub fn expansion_edits(content: &str, info: &LineInfo) -> Option<Vec<TextEdit>> {
    let start_column = info.abbreviation_start()?;
    let cursor = info.cursor();
    let start = Position::new(cursor.line, start_column);
    Some(vec![
        TextEdit::Delete { start, end: cursor },
        TextEdit::Insert {
            at: start,
            text: content.to_string(),
        },
    ])
}

/// Edits inserting one indentation unit: at column 0 of every selected line
/// when the selection crosses a line boundary, at the cursor otherwise.
pub fn indent_edits(unit: &str, info: &LineInfo) -> Vec<TextEdit> {
    let selection = info.selection();
    if info.is_multiline() {
        (selection.start().line..=selection.end().line)
            .map(|line| TextEdit::Insert {
                at: Position::new(line, 0),
                text: unit.to_string(),
            })
            .collect()
    } else {
        vec![TextEdit::Insert {
            at: selection.start(),
            text: unit.to_string(),
        }]
    }
}

/// Replace the abbreviation with its reformatted expansion.
pub fn apply_expansion<H: EditorHost + ?Sized>(
    host: &mut H,
    content: &str,
    info: &LineInfo,
) -> anyhow::Result<()> {
    let edits = expansion_edits(content, info).context("no abbreviation to replace")?;
    host.apply_edits(&edits)
        .context("host rejected the expansion edit")?;
    tracing::info!(
        line = info.cursor().line,
        abbreviation = info.abbreviation().unwrap_or(""),
        "expanded abbreviation"
    );
    Ok(())
}

/// Insert one indentation unit (the plain Tab behaviour).
pub fn insert_indent_unit<H: EditorHost + ?Sized>(
    host: &mut H,
    info: &LineInfo,
) -> anyhow::Result<()> {
    let unit = indent_unit(host.indent());
    let edits = indent_edits(&unit, info);
    host.apply_edits(&edits)
        .context("host rejected the indentation edit")?;
    tracing::debug!(lines = edits.len(), "inserted indentation unit");
    Ok(())
}
