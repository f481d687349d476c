//! Command-line argument parsing
//!
//! Runs a single expansion cycle against a file, the way an editor would on a
//! Tab key press with the cursor at `--line`/`--column`.

use clap::Parser;
use std::path::PathBuf;

use crate::config::EditorConfig;
use crate::host::IndentOptions;
use crate::messages::Msg;
use crate::model::{Position, Selection};

/// Expand markup abbreviations inside component templates
#[derive(Parser, Debug)]
#[command(
    name = "ng-emmet",
    version,
    about = "Expand markup abbreviations inside inline component templates"
)]
pub struct CliArgs {
    /// Source file to edit
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Cursor line (1-indexed)
    #[arg(short, long, value_name = "N")]
    pub line: usize,

    /// Cursor column (1-indexed)
    #[arg(short, long, value_name = "N")]
    pub column: usize,

    /// Selection end line (1-indexed); the cursor is the selection start
    #[arg(long, value_name = "N")]
    pub end_line: Option<usize>,

    /// Selection end column (1-indexed, used with --end-line)
    #[arg(long, value_name = "N")]
    pub end_column: Option<usize>,

    /// Indentation width (overrides config)
    #[arg(long, value_name = "N")]
    pub tab_size: Option<usize>,

    /// Indent with tabs instead of spaces (overrides config)
    #[arg(long)]
    pub use_tabs: bool,

    /// Language id of the file (default: detected from the extension)
    #[arg(long, value_name = "ID")]
    pub language: Option<String>,

    /// Treat the run as a document-change notification instead of the command
    #[arg(long)]
    pub on_change: bool,

    /// Write the result back to FILE instead of printing it
    #[arg(short, long)]
    pub write: bool,

    /// Print the detected context as JSON and leave the file alone
    #[arg(long, conflicts_with = "write")]
    pub inspect: bool,
}

/// What to do, derived from CLI arguments and the loaded config
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub path: PathBuf,
    /// 0-indexed selection
    pub selection: Selection,
    pub indent: IndentOptions,
    pub language: Option<String>,
    pub msg: Msg,
    pub write: bool,
    pub inspect: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_run(self, config: &EditorConfig) -> Result<RunConfig, String> {
        if self.line == 0 || self.column == 0 {
            return Err("--line and --column are 1-indexed".to_string());
        }
        if self.end_column.is_some() && self.end_line.is_none() {
            return Err("--end-column requires --end-line".to_string());
        }
        if self.tab_size == Some(0) {
            return Err("--tab-size must be at least 1".to_string());
        }

        // Convert from 1-indexed (user input) to 0-indexed (internal)
        let anchor = Position::new(self.line - 1, self.column - 1);
        let head = match self.end_line {
            Some(line) => Position::new(
                line.saturating_sub(1),
                self.end_column.unwrap_or(1).saturating_sub(1),
            ),
            None => anchor,
        };

        let mut indent = config.indent();
        if let Some(width) = self.tab_size {
            indent.width = width;
        }
        if self.use_tabs {
            indent.use_spaces = false;
        }

        Ok(RunConfig {
            path: self.path,
            selection: Selection::from_anchor_head(anchor, head),
            indent,
            language: self.language,
            msg: if self.on_change {
                Msg::DocumentChanged
            } else {
                Msg::ExpandAbbreviation
            },
            write: self.write,
            inspect: self.inspect,
        })
    }
}
