//! Line scanner - cached, directional token search over document lines
//!
//! A scanner lives for exactly one analysis query. Lines are read from the
//! host on first access and memoized, so the several passes the context
//! analyzer makes over the same region only hit the host once per line.
//! Dropping the scanner drops the cache; nothing survives into the next query.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::host::TextSource;
use crate::util::find_from;

/// Which way a search walks through the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the first line
    Backward,
    /// Toward the last line
    Forward,
}

/// How to pick the match when several tokens occur on the same line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Lowest column wins; equal columns go to the token listed first
    #[default]
    Leftmost,
    /// The last listed token present on the line wins, wherever it sits.
    /// The tie-break older releases used.
    LastListed,
}

/// A token found by [`LineScanner::find_token`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Line index of the match
    pub line: usize,
    /// Char column of the match within the full line
    pub column: usize,
    /// The token that matched
    pub token: String,
    /// Full text of the matching line
    pub text: String,
}

impl SearchResult {
    /// Column just past the matched token
    pub fn end_column(&self) -> usize {
        self.column + self.token.chars().count()
    }
}

/// Lazily filled `line index -> text` map for one query
#[derive(Debug, Default)]
pub struct LineCache {
    lines: HashMap<usize, String>,
}

impl LineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached line text, reading it from `source` on first access
    pub fn get<'c, S: TextSource + ?Sized>(&'c mut self, source: &S, line: usize) -> Option<&'c str> {
        if !self.lines.contains_key(&line) {
            let text = source.line(line)?.into_owned();
            self.lines.insert(line, text);
        }
        self.lines.get(&line).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Directional token search over a [`TextSource`]
pub struct LineScanner<'a, S: TextSource + ?Sized> {
    source: &'a S,
    origin_line: usize,
    policy: MatchPolicy,
    cache: LineCache,
}

impl<'a, S: TextSource + ?Sized> LineScanner<'a, S> {
    /// Start a query. `origin_line` is the default starting line of every
    /// search (the selection start line).
    pub fn new(source: &'a S, origin_line: usize, policy: MatchPolicy) -> Self {
        Self {
            source,
            origin_line,
            policy,
            cache: LineCache::new(),
        }
    }

    /// Forget every cached line
    pub fn reset(&mut self) {
        self.cache.clear();
    }

    /// Number of distinct lines read so far in this query
    pub fn cached_lines(&self) -> usize {
        self.cache.len()
    }

    /// Cached text of one line
    pub fn line(&mut self, line: usize) -> Option<&str> {
        self.cache.get(self.source, line)
    }

    /// Search line by line for any of `tokens`.
    ///
    /// Starts at `start_line` (default: the origin line). On the starting line
    /// only text from `start_offset` onward is searched. Returns the match on
    /// the first line, in scan order, that contains any token.
    pub fn find_token(
        &mut self,
        tokens: &[&str],
        direction: Direction,
        start_line: Option<usize>,
        start_offset: Option<usize>,
    ) -> Option<SearchResult> {
        let line_count = self.source.line_count();
        let first = start_line.unwrap_or(self.origin_line);
        if first >= line_count {
            return None;
        }

        let lines: Box<dyn Iterator<Item = usize>> = match direction {
            Direction::Backward => Box::new((0..=first).rev()),
            Direction::Forward => Box::new(first..line_count),
        };

        let policy = self.policy;
        for idx in lines {
            let from = if idx == first {
                start_offset.unwrap_or(0)
            } else {
                0
            };
            let Some(text) = self.cache.get(self.source, idx) else {
                continue;
            };
            if let Some((column, token)) = match_on_line(text, tokens, from, policy) {
                tracing::trace!(line = idx, column, token, "scanner match");
                return Some(SearchResult {
                    line: idx,
                    column,
                    token: token.to_string(),
                    text: text.to_string(),
                });
            }
        }
        None
    }
}

/// Pick the match on a single line according to `policy`
fn match_on_line<'t>(
    text: &str,
    tokens: &[&'t str],
    from: usize,
    policy: MatchPolicy,
) -> Option<(usize, &'t str)> {
    let found = tokens
        .iter()
        .filter_map(|token| find_from(text, token, from).map(|column| (column, *token)));

    match policy {
        // min_by_key keeps the first of equal minima, i.e. the earlier token
        MatchPolicy::Leftmost => found.min_by_key(|(column, _)| *column),
        MatchPolicy::LastListed => found.last(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::cell::Cell;

    /// Line source that counts host reads
    struct CountingSource {
        lines: Vec<&'static str>,
        reads: Cell<usize>,
    }

    impl CountingSource {
        fn new(text: &'static str) -> Self {
            Self {
                lines: text.split('\n').collect(),
                reads: Cell::new(0),
            }
        }
    }

    impl TextSource for CountingSource {
        fn line_count(&self) -> usize {
            self.lines.len()
        }

        fn line(&self, line: usize) -> Option<Cow<'_, str>> {
            self.reads.set(self.reads.get() + 1);
            self.lines.get(line).map(|l| Cow::Borrowed(*l))
        }
    }

    const SOURCE: &str = "zero\n@Component({\n  template: `\n    div\n  `\n})";

    #[test]
    fn test_backward_search_finds_nearest_line() {
        let src = CountingSource::new(SOURCE);
        let mut scanner = LineScanner::new(&src, 3, MatchPolicy::Leftmost);

        let found = scanner
            .find_token(&["@Component"], Direction::Backward, None, None)
            .unwrap();
        assert_eq!(found.line, 1);
        assert_eq!(found.column, 0);
        assert_eq!(found.text, "@Component({");
    }

    #[test]
    fn test_forward_search_from_offset_reports_absolute_column() {
        let src = CountingSource::new(SOURCE);
        let mut scanner = LineScanner::new(&src, 0, MatchPolicy::Leftmost);

        let open = scanner
            .find_token(&["`"], Direction::Forward, Some(2), None)
            .unwrap();
        assert_eq!((open.line, open.column), (2, 12));

        let close = scanner
            .find_token(&["`"], Direction::Forward, Some(open.line), Some(open.end_column()))
            .unwrap();
        assert_eq!((close.line, close.column), (4, 2));
    }

    #[test]
    fn test_missing_token_returns_none() {
        let src = CountingSource::new(SOURCE);
        let mut scanner = LineScanner::new(&src, 5, MatchPolicy::Leftmost);
        assert!(scanner
            .find_token(&["@Directive"], Direction::Backward, None, None)
            .is_none());
        assert!(scanner
            .find_token(&["x"], Direction::Forward, Some(99), None)
            .is_none());
    }

    #[test]
    fn test_lines_are_read_once_per_query() {
        let src = CountingSource::new(SOURCE);
        let mut scanner = LineScanner::new(&src, 5, MatchPolicy::Leftmost);

        scanner.find_token(&["@Component"], Direction::Backward, None, None);
        let after_first = src.reads.get();
        scanner.find_token(&["template"], Direction::Forward, Some(1), None);
        assert_eq!(src.reads.get(), after_first);
        assert_eq!(scanner.cached_lines(), 5);

        scanner.reset();
        assert_eq!(scanner.cached_lines(), 0);
        scanner.find_token(&["template"], Direction::Forward, Some(1), None);
        assert!(src.reads.get() > after_first);
    }

    #[test]
    fn test_leftmost_policy_prefers_lowest_column() {
        let src = CountingSource::new("a = \"x\" + 'y' + `z`");
        let mut scanner = LineScanner::new(&src, 0, MatchPolicy::Leftmost);
        let found = scanner
            .find_token(&["'", "\"", "`"], Direction::Forward, None, None)
            .unwrap();
        assert_eq!(found.token, "\"");
        assert_eq!(found.column, 4);
    }

    #[test]
    fn test_last_listed_policy_ignores_columns() {
        let src = CountingSource::new("a = \"x\" + 'y' + `z`");
        let mut scanner = LineScanner::new(&src, 0, MatchPolicy::LastListed);
        let found = scanner
            .find_token(&["'", "\"", "`"], Direction::Forward, None, None)
            .unwrap();
        assert_eq!(found.token, "`");
        assert_eq!(found.column, 16);
    }

    #[test]
    fn test_leftmost_tie_goes_to_first_listed_token() {
        let src = CountingSource::new("template: x");
        let mut scanner = LineScanner::new(&src, 0, MatchPolicy::Leftmost);
        let found = scanner
            .find_token(&["templ", "template"], Direction::Forward, None, None)
            .unwrap();
        assert_eq!(found.token, "templ");
    }
}
