//! HTML output for a parsed abbreviation
//!
//! Block content goes on its own lines, one `\t` per nesting level; short
//! runs of inline elements stay on one line. Empty bodies and empty attribute
//! values get numbered `${N}` tab stops.

use super::parser::{Abbreviation, Element, NodeKind};

/// Elements written without a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "button", "cite", "code", "del", "dfn", "em", "i",
    "img", "input", "ins", "kbd", "label", "mark", "q", "s", "samp", "select", "small", "span",
    "strong", "sub", "sup", "textarea", "time", "u", "var",
];

/// Number of inline siblings that forces one-per-line output
const INLINE_BREAK: usize = 3;

/// Attributes an element gets even when the abbreviation names none
fn default_attributes(tag: &str) -> &'static [(&'static str, Option<&'static str>)] {
    match tag {
        "a" => &[("href", None)],
        "img" => &[("src", None), ("alt", None)],
        "input" => &[("type", Some("text"))],
        "link" => &[("rel", Some("stylesheet")), ("href", None)],
        "form" => &[("action", None)],
        "label" => &[("for", None)],
        _ => &[],
    }
}

/// Tag used when the abbreviation omits the name
fn implicit_tag(parent: Option<&str>) -> &'static str {
    match parent {
        Some("ul" | "ol") => "li",
        Some("table" | "tbody" | "thead" | "tfoot") => "tr",
        Some("tr") => "td",
        Some("select" | "optgroup") => "option",
        _ => "div",
    }
}

fn is_inline(tag: &str) -> bool {
    INLINE_ELEMENTS.contains(&tag)
}

/// Replace each run of `$` with `index`, zero-padded to the run length
fn number(text: &str, index: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }
        let mut width = 1;
        while chars.peek() == Some(&'$') {
            chars.next();
            width += 1;
        }
        out.push_str(&format!("{:0width$}", index, width = width));
    }
    out
}

/// One rendered element (possibly spanning several lines)
struct Piece {
    inline: bool,
    text: String,
}

/// Render a parsed abbreviation to HTML with tab stops
pub fn render(tree: &Abbreviation) -> String {
    let mut renderer = Renderer {
        tree,
        next_tabstop: 1,
    };
    let pieces = renderer.expand(&tree.roots, None, 1);
    join(&pieces).0
}

struct Renderer<'a> {
    tree: &'a Abbreviation,
    next_tabstop: usize,
}

impl<'a> Renderer<'a> {
    fn tabstop(&mut self) -> String {
        let stop = format!("${{{}}}", self.next_tabstop);
        self.next_tabstop += 1;
        stop
    }

    /// Render `ids` (repeating as written) under the element named `parent`
    fn expand(&mut self, ids: &[usize], parent: Option<&str>, index: usize) -> Vec<Piece> {
        let tree = self.tree;
        let mut pieces = Vec::new();
        for &id in ids {
            let node = tree.node(id);
            let copies = node.repeat.unwrap_or(1);
            for copy in 1..=copies {
                let index = if node.repeat.is_some() { copy } else { index };
                match &node.kind {
                    NodeKind::Group => {
                        pieces.extend(self.expand(&node.children, parent, index));
                    }
                    NodeKind::Element(element) => {
                        pieces.push(self.element(element, &node.children, parent, index));
                    }
                }
            }
        }
        pieces
    }

    fn element(
        &mut self,
        element: &Element,
        children: &[usize],
        parent: Option<&str>,
        index: usize,
    ) -> Piece {
        let tag = match &element.name {
            Some(name) => number(name, index),
            None => implicit_tag(parent).to_string(),
        };

        let mut open = format!("<{}", tag);
        if let Some(id) = &element.id {
            open.push_str(&format!(" id=\"{}\"", number(id, index)));
        }
        if !element.classes.is_empty() {
            let classes: Vec<String> = element.classes.iter().map(|c| number(c, index)).collect();
            open.push_str(&format!(" class=\"{}\"", classes.join(" ")));
        }
        for (name, value) in default_attributes(&tag) {
            if element.attributes.iter().any(|a| a.name == *name) {
                continue;
            }
            let value = match value {
                Some(v) => v.to_string(),
                None => self.tabstop(),
            };
            open.push_str(&format!(" {}=\"{}\"", name, value));
        }
        for attribute in &element.attributes {
            let value = match &attribute.value {
                // bare boolean attribute
                None => {
                    open.push_str(&format!(" {}", attribute.name));
                    continue;
                }
                Some(v) if !v.is_empty() => number(v, index),
                Some(_) => self.tabstop(),
            };
            open.push_str(&format!(" {}=\"{}\"", attribute.name, value));
        }
        open.push('>');

        let inline = is_inline(&tag);
        if VOID_ELEMENTS.contains(&tag.as_str()) {
            return Piece { inline, text: open };
        }

        let text = element.text.as_ref().map(|t| number(t, index));
        let body = self.expand(children, Some(&tag), index);
        let close = format!("</{}>", tag);

        let rendered = if body.is_empty() {
            let content = match text {
                Some(text) => text,
                None => self.tabstop(),
            };
            format!("{}{}{}", open, content, close)
        } else {
            let (content, multiline) = join(&body);
            let text = text.unwrap_or_default();
            if multiline {
                let indented = content.replace('\n', "\n\t");
                format!("{}{}\n\t{}\n{}", open, text, indented, close)
            } else {
                format!("{}{}{}{}", open, text, content, close)
            }
        };

        Piece {
            inline,
            text: rendered,
        }
    }
}

/// Join sibling pieces; returns the text and whether it is laid out on lines
fn join(pieces: &[Piece]) -> (String, bool) {
    let inline_run = pieces.len() < INLINE_BREAK
        && pieces
            .iter()
            .all(|piece| piece.inline && !piece.text.contains('\n'));

    let texts: Vec<&str> = pieces.iter().map(|piece| piece.text.as_str()).collect();
    if inline_run {
        (texts.concat(), false)
    } else {
        (texts.join("\n"), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expand::parser::parse;

    fn html(abbr: &str) -> String {
        render(&parse(abbr).unwrap())
    }

    #[test]
    fn test_list_items_on_their_own_lines() {
        assert_eq!(
            html("ul>li*3"),
            "<ul>\n\t<li>${1}</li>\n\t<li>${2}</li>\n\t<li>${3}</li>\n</ul>"
        );
    }

    #[test]
    fn test_implicit_tags_follow_parent() {
        assert_eq!(html(".box"), "<div class=\"box\">${1}</div>");
        assert_eq!(html("ol>.item"), "<ol>\n\t<li class=\"item\">${1}</li>\n</ol>");
        assert_eq!(
            html("table>.row>.cell"),
            "<table>\n\t<tr class=\"row\">\n\t\t<td class=\"cell\">${1}</td>\n\t</tr>\n</table>"
        );
    }

    #[test]
    fn test_inline_child_stays_on_line() {
        assert_eq!(html("p>a"), "<p><a href=\"${1}\">${2}</a></p>");
        assert_eq!(html("p>span*2"), "<p><span>${1}</span><span>${2}</span></p>");
        assert_eq!(
            html("p>span*3"),
            "<p>\n\t<span>${1}</span>\n\t<span>${2}</span>\n\t<span>${3}</span>\n</p>"
        );
    }

    #[test]
    fn test_groups_and_siblings() {
        assert_eq!(
            html("(.one>h1)+(.two>h1)"),
            "<div class=\"one\">\n\t<h1>${1}</h1>\n</div>\n<div class=\"two\">\n\t<h1>${2}</h1>\n</div>"
        );
    }

    #[test]
    fn test_numbering() {
        assert_eq!(
            html("li.item$$*2{Item $}"),
            "<li class=\"item01\">Item 1</li>\n<li class=\"item02\">Item 2</li>"
        );
        assert_eq!(
            html("ul>li*2>a{$}"),
            "<ul>\n\t<li><a href=\"${1}\">1</a></li>\n\t<li><a href=\"${2}\">2</a></li>\n</ul>"
        );
    }

    #[test]
    fn test_void_elements_and_attributes() {
        assert_eq!(html("br"), "<br>");
        assert_eq!(html("img"), "<img src=\"${1}\" alt=\"${2}\">");
        assert_eq!(
            html("input#email[type=email required]"),
            "<input id=\"email\" type=\"email\" required>"
        );
        assert_eq!(
            html("input[disabled title=]"),
            "<input type=\"text\" disabled title=\"${1}\">"
        );
    }

    #[test]
    fn test_text_before_children() {
        assert_eq!(html("p{Hi }>b{there}"), "<p>Hi <b>there</b></p>");
    }
}
