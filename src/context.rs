//! Context analyzer - is the cursor inside a component template?
//!
//! Detection is a coarse, parser-free heuristic built on the line scanner:
//! the nearest `@Component` above the cursor, the first `template` marker after
//! it, the first quote after that marker and the matching closing quote. It
//! cannot tell two decorators apart or spot "template" inside an unrelated
//! value, and it is not meant to.

use serde::Serialize;

use crate::abbreviation::{has_unmatched_edge_quote, sanitize};
use crate::host::TextSource;
use crate::model::{Position, Selection};
use crate::scanner::{Direction, LineScanner, MatchPolicy, SearchResult};
use crate::util::prefix_chars;

/// Token opening a component declaration
pub const DECLARATION_MARKER: &str = "@Component";

/// Token naming the inline template property
pub const TEMPLATE_MARKER: &str = "template";

/// Delimiters a template value may use
const DELIMITERS: [&str; 3] = ["`", "'", "\""];

/// What the analyzer learned about the cursor's surroundings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentContext {
    /// Cursor sits inside a component's template value
    pub inside_declaration: bool,
    /// The template value is a backtick literal (only meaningful when inside)
    pub is_template_literal: bool,
    /// Sanitized abbreviation left of the cursor, if any
    pub abbreviation: Option<String>,
}

impl ComponentContext {
    fn outside() -> Self {
        Self::default()
    }
}

/// Per-query result bundle handed to the reformatter and the edit step.
///
/// `abbreviation_start` is set exactly when `context.abbreviation` is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineInfo {
    selection: Selection,
    abbreviation_start: Option<usize>,
    context: ComponentContext,
}

impl LineInfo {
    /// Bundle a context with its selection, deriving the abbreviation start
    /// column. An abbreviation longer than the cursor column is dropped.
    pub fn new(selection: Selection, mut context: ComponentContext) -> Self {
        let cursor = selection.end();
        let abbreviation_start = match &context.abbreviation {
            Some(abbr) => cursor.column.checked_sub(abbr.chars().count()),
            None => None,
        };
        if abbreviation_start.is_none() {
            context.abbreviation = None;
        }
        Self {
            selection,
            abbreviation_start,
            context,
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Position the abbreviation ends at (the selection end)
    pub fn cursor(&self) -> Position {
        self.selection.end()
    }

    pub fn abbreviation(&self) -> Option<&str> {
        self.context.abbreviation.as_deref()
    }

    /// Column the abbreviation starts at on the cursor line
    pub fn abbreviation_start(&self) -> Option<usize> {
        self.abbreviation_start
    }

    pub fn context(&self) -> &ComponentContext {
        &self.context
    }

    pub fn is_template_literal(&self) -> bool {
        self.context.inside_declaration && self.context.is_template_literal
    }

    pub fn is_multiline(&self) -> bool {
        self.selection.line_span() >= 1
    }
}

/// Analyze the cursor context and bundle it into a [`LineInfo`]
pub fn line_info<S: TextSource + ?Sized>(
    source: &S,
    selection: Selection,
    policy: MatchPolicy,
) -> LineInfo {
    LineInfo::new(selection, analyze_context(source, selection, policy))
}

/// Decide whether `selection` sits inside a component template and extract
/// the abbreviation in front of it.
pub fn analyze_context<S: TextSource + ?Sized>(
    source: &S,
    selection: Selection,
    policy: MatchPolicy,
) -> ComponentContext {
    let start = selection.start();
    let end = selection.end();

    if end.line - start.line > 1 {
        tracing::debug!(
            start = start.line,
            end = end.line,
            "multi-line selection, skipping detection"
        );
        return ComponentContext::outside();
    }

    // The scanner (and its line cache) only lives for this query
    let mut scanner = LineScanner::new(source, start.line, policy);
    let Some(region) = locate_template(&mut scanner, start) else {
        return ComponentContext::outside();
    };

    let is_template_literal = region.open.token == "`";
    let abbreviation = extract_abbreviation(&mut scanner, start, end, &region.open);
    tracing::debug!(
        declaration = region.declaration.line,
        template = region.template.line,
        open = region.open.line,
        close = region.close.line,
        is_template_literal,
        abbreviation = abbreviation.as_deref().unwrap_or(""),
        "cursor inside component template"
    );

    ComponentContext {
        inside_declaration: true,
        is_template_literal,
        abbreviation,
    }
}

/// Landmarks of the template value enclosing the cursor
struct TemplateRegion {
    declaration: SearchResult,
    template: SearchResult,
    open: SearchResult,
    close: SearchResult,
}

fn locate_template<S: TextSource + ?Sized>(
    scanner: &mut LineScanner<'_, S>,
    cursor: Position,
) -> Option<TemplateRegion> {
    let declaration = scanner.find_token(&[DECLARATION_MARKER], Direction::Backward, None, None);
    let Some(declaration) = declaration else {
        tracing::debug!("no {} above cursor", DECLARATION_MARKER);
        return None;
    };

    let template = scanner.find_token(
        &[TEMPLATE_MARKER],
        Direction::Forward,
        Some(declaration.line),
        Some(declaration.end_column()),
    )?;

    let open = scanner.find_token(
        &DELIMITERS,
        Direction::Forward,
        Some(template.line),
        Some(template.end_column()),
    )?;

    let close = scanner.find_token(
        &[open.token.as_str()],
        Direction::Forward,
        Some(open.line),
        Some(open.end_column()),
    )?;

    let inside = declaration.line < cursor.line
        && cursor.line <= close.line
        && cursor.line >= template.line
        && (cursor.line != open.line || cursor.column > open.column)
        && (cursor.line != close.line || cursor.column <= close.column);

    if !inside {
        tracing::debug!(
            line = cursor.line,
            column = cursor.column,
            "cursor outside template value"
        );
        return None;
    }

    Some(TemplateRegion {
        declaration,
        template,
        open,
        close,
    })
}

/// Text from column 0 of the start line through the selection end, sanitized.
/// On the line of the opening delimiter only the text after it is taken.
fn extract_abbreviation<S: TextSource + ?Sized>(
    scanner: &mut LineScanner<'_, S>,
    start: Position,
    end: Position,
    open: &SearchResult,
) -> Option<String> {
    let mut raw = String::new();
    for line in start.line..=end.line {
        let text = scanner.line(line)?;
        let text = if line == end.line {
            prefix_chars(text, end.column)
        } else {
            text
        };
        let skip = if line == open.line { open.end_column() } else { 0 };
        raw.extend(text.chars().skip(skip));
        if line != end.line {
            raw.push('\n');
        }
    }

    let abbr = sanitize(&raw);
    if abbr.is_empty() || has_unmatched_edge_quote(&abbr) {
        return None;
    }

    // The edit deletes exactly the chars in front of the cursor, so they
    // have to be the abbreviation itself.
    let before_cursor = scanner.line(end.line).map(|text| prefix_chars(text, end.column))?;
    if !before_cursor.ends_with(abbr.as_str()) {
        tracing::debug!(abbreviation = %abbr, "abbreviation is not contiguous with the cursor");
        return None;
    }

    Some(abbr)
}
