//! Output reformatting - fit expanded markup to the document's indentation

use crate::context::LineInfo;
use crate::host::IndentOptions;

/// One level of indentation: `width` spaces, or a single tab
pub fn indent_unit(indent: IndentOptions) -> String {
    if indent.use_spaces {
        " ".repeat(indent.width)
    } else {
        "\t".to_string()
    }
}

/// Indentation inserted after every newline of an expansion that starts at
/// `start_column`: `width * floor(start_column / width) - width` indent chars,
/// never negative.
pub fn line_prefix(start_column: usize, indent: IndentOptions) -> String {
    let width = indent.width.max(1);
    let depth = start_column / width;
    let len = (width * depth).saturating_sub(width);
    std::iter::repeat(indent.indent_char()).take(len).collect()
}

/// Shape expanded markup for insertion at the abbreviation's position.
///
/// Quoted (non-backtick) values cannot span lines, so line breaks and tabs
/// are dropped. Backtick literals keep the expansion's layout, shifted by
/// [`line_prefix`], with tabs turned into indentation units when the document
/// indents with spaces.
pub fn reformat(expanded: &str, info: &LineInfo, indent: IndentOptions) -> String {
    if !info.is_template_literal() {
        return expanded.replace(['\n', '\t'], "");
    }

    let prefix = line_prefix(info.abbreviation_start().unwrap_or(0), indent);
    let result = expanded.replace('\n', &format!("\n{}", prefix));

    if indent.use_spaces {
        result.replace('\t', &indent_unit(indent))
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ComponentContext;
    use crate::model::{Position, Selection};

    const EXPANDED: &str = "<ul>\n\t<li></li>\n\t<li></li>\n</ul>";

    fn info(column: usize, abbr: &str, template_literal: bool) -> LineInfo {
        LineInfo::new(
            Selection::new(Position::new(3, column)),
            ComponentContext {
                inside_declaration: true,
                is_template_literal: template_literal,
                abbreviation: Some(abbr.to_string()),
            },
        )
    }

    #[test]
    fn test_indent_unit() {
        assert_eq!(indent_unit(IndentOptions::spaces(4)), "    ");
        assert_eq!(indent_unit(IndentOptions::spaces(2)), "  ");
        assert_eq!(indent_unit(IndentOptions::tabs(4)), "\t");
    }

    #[test]
    fn test_quoted_value_collapses_to_one_line() {
        let out = reformat(EXPANDED, &info(20, "ul>li*2", false), IndentOptions::spaces(4));
        assert_eq!(out, "<ul><li></li><li></li></ul>");
    }

    #[test]
    fn test_backtick_literal_is_reindented() {
        // abbreviation starts at column 12: depth 3, prefix 8
        let out = reformat(EXPANDED, &info(19, "ul>li*2", true), IndentOptions::spaces(4));
        assert_eq!(
            out,
            "<ul>\n            <li></li>\n            <li></li>\n        </ul>"
        );
        assert!(!out.contains('\t'));
    }

    #[test]
    fn test_tab_indented_document_keeps_tabs() {
        // column 8 with width 4: depth 2, prefix of 4 tab chars
        let out = reformat(EXPANDED, &info(15, "ul>li*2", true), IndentOptions::tabs(4));
        assert_eq!(out, "<ul>\n\t\t\t\t\t<li></li>\n\t\t\t\t\t<li></li>\n\t\t\t\t</ul>");
    }

    #[test]
    fn test_prefix_length_formula() {
        for width in [2usize, 3, 4, 8] {
            for start in 0..40 {
                let expected = (width * (start / width)).saturating_sub(width);
                let prefix = line_prefix(start, IndentOptions::spaces(width));
                assert_eq!(prefix.len(), expected, "width {} start {}", width, start);
                assert_eq!(prefix, line_prefix(start, IndentOptions::spaces(width)));
            }
        }
    }

    #[test]
    fn test_shallow_start_gets_no_prefix() {
        let out = reformat("<p>\n\tx\n</p>", &info(3, "p", true), IndentOptions::spaces(4));
        assert_eq!(out, "<p>\n    x\n</p>");
    }
}
