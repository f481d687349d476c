//! Trigger entry point - one full analysis and edit cycle per event

use crate::config::EditorConfig;
use crate::context::{line_info, LineInfo};
use crate::edit::{apply_expansion, insert_indent_unit};
use crate::expand::{resolve_tabstops, ExpandOptions, Expander};
use crate::host::{EditorHost, IndentOptions};
use crate::messages::{Msg, Outcome};
use crate::reformat::reformat;

/// Run one cycle for `msg` against the host's active document and selection.
///
/// `ExpandAbbreviation` always ends in exactly one edit: the expansion, or an
/// indentation unit when there is nothing to expand or expansion fails.
/// `DocumentChanged` only acts on documents in the configured language and
/// only ever expands; inserting the fallback there would raise another change.
///
/// Errors are host edit failures; they are not retried.
pub fn update<H, E>(
    host: &mut H,
    expander: &E,
    config: &EditorConfig,
    msg: Msg,
) -> anyhow::Result<Outcome>
where
    H: EditorHost + ?Sized,
    E: Expander + ?Sized,
{
    let _span = tracing::debug_span!("cycle", ?msg, language = host.language_id()).entered();

    let language_matches = host.language_id() == config.language;
    if msg == Msg::DocumentChanged && !language_matches {
        tracing::trace!(language = host.language_id(), "ignoring change in other language");
        return Ok(Outcome::Ignored);
    }

    let info = line_info(&*host, host.selection(), config.match_policy);
    let expansion = if language_matches {
        expansion_for(&info, expander, host.indent())
    } else {
        None
    };

    match (expansion, msg) {
        (Some(content), _) => {
            apply_expansion(host, &content, &info)?;
            Ok(Outcome::Expanded {
                abbreviation: info.abbreviation().unwrap_or_default().to_string(),
            })
        }
        (None, Msg::ExpandAbbreviation) => {
            insert_indent_unit(host, &info)?;
            Ok(Outcome::Indented)
        }
        (None, Msg::DocumentChanged) => Ok(Outcome::Ignored),
    }
}

/// Expanded, tab-stop free and reformatted markup for the abbreviation in
/// `info`, or `None` when there is none or the expander rejects it.
pub fn expansion_for<E: Expander + ?Sized>(
    info: &LineInfo,
    expander: &E,
    indent: IndentOptions,
) -> Option<String> {
    let abbreviation = info.abbreviation()?;
    match expander.expand(abbreviation, &ExpandOptions::HTML) {
        Ok(markup) => Some(reformat(&resolve_tabstops(&markup), info, indent)),
        Err(e) => {
            tracing::debug!(abbreviation, error = %e, "expansion failed, falling back to indent");
            None
        }
    }
}
