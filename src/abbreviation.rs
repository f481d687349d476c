//! Abbreviation sanitization
//!
//! The analyzer captures everything left of the cursor on its line, so the raw
//! candidate often carries leftovers: the `template:` property itself, the
//! opening quote, half-typed tags. `sanitize` strips those down to something
//! the expander can take.

use regex::Regex;
use std::sync::LazyLock;

/// `template:` property prefix, including any opening quotes
static TEMPLATE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\btemplate\s*:\s*[`'"]*"#).unwrap());

/// Malformed `< text <` residue
static ANGLE_RESIDUE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"< [^>]+<").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// One `>`-separated step of an abbreviation
static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[A-Za-z0-9.,+\-@^*()#\[\]=$\{\}'"_]+$"#).unwrap());

/// Quote characters that can delimit a template value
pub const QUOTES: [char; 3] = ['`', '\'', '"'];

/// Clean a raw candidate into an abbreviation. An empty result means there is
/// no abbreviation.
///
/// `sanitize(sanitize(x)) == sanitize(x)` for every input.
pub fn sanitize(raw: &str) -> String {
    let mut abbr = raw.to_string();

    // Each removal can expose another match, so run to a fixed point
    loop {
        let next = clean_once(&abbr);
        if next == abbr {
            break;
        }
        abbr = next;
    }

    if abbr.contains('>') {
        abbr = trailing_valid_segments(&abbr);
    }
    abbr
}

fn clean_once(text: &str) -> String {
    let text = WHITESPACE_RE.replace_all(text, " ");
    let text = TEMPLATE_PREFIX_RE.replace_all(&text, "");
    let text = ANGLE_RESIDUE_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Keep the trailing run of `>`-segments that look like abbreviation syntax.
///
/// Walks from the last segment backwards and stops at the first one that
/// fails, so already-typed markup in front of the abbreviation is dropped.
/// When the failing segment holds a space, the word after its last space
/// still counts (`<p>hi</p> ul>li` keeps `ul>li`).
fn trailing_valid_segments(abbr: &str) -> String {
    let segments: Vec<&str> = abbr.split('>').collect();
    let keep = segments
        .iter()
        .rev()
        .take_while(|segment| SEGMENT_RE.is_match(segment))
        .count();

    let mut kept = segments[segments.len() - keep..].to_vec();
    if let Some(failed) = segments.len().checked_sub(keep + 1).map(|i| segments[i]) {
        let last_word = failed.rsplit(' ').next().filter(|_| failed.contains(' '));
        if let Some(word) = last_word.filter(|word| SEGMENT_RE.is_match(word)) {
            kept.insert(0, word);
        }
    }
    kept.join(">")
}

/// True when `abbr` starts or ends with a quote character that has no
/// partner inside it, i.e. a delimiter of the surrounding string value.
pub fn has_unmatched_edge_quote(abbr: &str) -> bool {
    let unmatched = |quote: char| abbr.chars().filter(|c| *c == quote).count() % 2 == 1;

    let first = abbr.chars().next();
    let last = abbr.chars().last();
    [first, last]
        .into_iter()
        .flatten()
        .any(|c| QUOTES.contains(&c) && unmatched(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(sanitize("        ul>li*3"), "ul>li*3");
        assert_eq!(sanitize("\tdiv.item  "), "div.item");
    }

    #[test]
    fn test_removes_template_property_prefix() {
        assert_eq!(sanitize("    template: `ul>li"), "ul>li");
        assert_eq!(sanitize("template :'p.lead"), "p.lead");
        assert_eq!(sanitize(r#"template:"h1"#), "h1");
    }

    #[test]
    fn test_removes_angle_bracket_residue() {
        assert_eq!(sanitize("< span <p"), "p");
        assert_eq!(sanitize("a < b c <  d"), "a d");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(sanitize("p{hello    world}"), "p{hello world}");
        assert_eq!(sanitize("a \t\n b"), "a b");
    }

    #[test]
    fn test_keeps_trailing_valid_segments() {
        assert_eq!(sanitize("<div>ul>li*3"), "ul>li*3");
        assert_eq!(sanitize("<b>text</b>nav>ul>li"), "nav>ul>li");
        assert_eq!(sanitize("(.one>h1)+(.two>h1)"), "(.one>h1)+(.two>h1)");
        assert_eq!(sanitize("a[href=\"x\"]>span{$}"), "a[href=\"x\"]>span{$}");
    }

    #[test]
    fn test_word_after_space_starts_the_abbreviation() {
        assert_eq!(sanitize("<p>hi</p> ul>li"), "ul>li");
        assert_eq!(sanitize("some text nav>ul>li*2"), "nav>ul>li*2");
        // a trailing space leaves nothing to keep from that segment
        assert_eq!(sanitize("<p>hi </p>li"), "li");
    }

    #[test]
    fn test_segment_filter_stops_at_first_invalid_segment() {
        // only the word after the space in "x y" survives
        assert_eq!(sanitize("ul>x y>li"), "y>li");
        assert_eq!(sanitize("ul>x y:>li"), "li");
        // a trailing separator leaves an empty last segment
        assert_eq!(sanitize("ul>li>"), "");
        assert_eq!(sanitize("ul>li:hover"), "");
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("   \t "), "");
        assert_eq!(sanitize("template: `"), "");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let inputs = [
            "",
            "   ul>li*3  ",
            "    template: `ul>li",
            "templ< a<ate: 'x",
            "<  a<b>c",
            "< x< y<",
            "<div>foo</div> ul>li",
            "a >  b",
            "ul>>li",
            "p{a   b}>span",
            "template: template: \"div",
            "'div",
            "\t`\n",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_unmatched_edge_quote() {
        assert!(has_unmatched_edge_quote("'div"));
        assert!(has_unmatched_edge_quote("ul>li`"));
        assert!(has_unmatched_edge_quote("\"a\"\""));
        assert!(!has_unmatched_edge_quote("div"));
        assert!(!has_unmatched_edge_quote("'div'"));
        assert!(!has_unmatched_edge_quote("a[title='x']"));
        assert!(!has_unmatched_edge_quote(""));
    }
}
