//! Tab-stop post-processing
//!
//! Expanded markup marks editable spots as `${N}` or `${N:placeholder}`.
//! Without snippet support on the receiving end they are replaced by their
//! placeholder text, or removed when there is none.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static TABSTOP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{\d+(?::([^}]*))?\}").unwrap());

/// Replace every tab stop with its placeholder (or nothing)
pub fn resolve_tabstops(text: &str) -> String {
    TABSTOP_RE
        .replace_all(text, |caps: &Captures| {
            caps.get(1)
                .map(|placeholder| placeholder.as_str().to_string())
                .unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_tabstops_are_removed() {
        assert_eq!(resolve_tabstops("<li>${1}</li><li>${12}</li>"), "<li></li><li></li>");
    }

    #[test]
    fn test_placeholders_are_kept() {
        assert_eq!(
            resolve_tabstops("<a href=\"${1:#}\">${2:link}</a>"),
            "<a href=\"#\">link</a>"
        );
        assert_eq!(resolve_tabstops("<p>${3:}</p>"), "<p></p>");
    }

    #[test]
    fn test_other_dollar_text_untouched() {
        assert_eq!(resolve_tabstops("cost $5 ${name}"), "cost $5 ${name}");
    }
}
