//! Abbreviation parser
//!
//! Builds an arena tree from abbreviation syntax:
//!
//! ```text
//! sequence := term (('>' | '+' | '^'+) term)*
//! term     := '(' sequence ')' repeat? | element
//! element  := name? ('#' ident | '.' ident | '[' attrs ']' | '{' text '}' | repeat)*
//! repeat   := '*' digits
//! ```

use super::ExpansionError;

/// Most elements one abbreviation may expand to, counting repeats
pub const MAX_ELEMENTS: usize = 1000;

/// An `[name=value]` attribute; `value` is `None` for bare names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

/// Tag with everything written on it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Explicit tag name, `None` for implicit tags (`.box`, `#main`)
    pub name: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<Attribute>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    /// Parenthesized group, transparent in the output
    Group,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// `*N` multiplier, if one was written
    pub repeat: Option<usize>,
    pub children: Vec<usize>,
}

/// Parsed abbreviation; nodes refer to each other by index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Abbreviation {
    pub nodes: Vec<Node>,
    pub roots: Vec<usize>,
}

impl Abbreviation {
    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }
}

/// Parse an abbreviation into a tree
pub fn parse(abbreviation: &str) -> Result<Abbreviation, ExpansionError> {
    if abbreviation.trim().is_empty() {
        return Err(ExpansionError::Empty);
    }

    let mut parser = Parser {
        chars: abbreviation.chars().collect(),
        pos: 0,
        tree: Abbreviation::default(),
        repeat_at: Vec::new(),
    };
    let roots = parser.sequence()?;
    if let Some(ch) = parser.peek() {
        // only a stray ')' can stop the top-level sequence early
        return Err(ExpansionError::UnexpectedChar {
            ch,
            position: parser.pos,
        });
    }
    parser.tree.roots = roots;
    parser.check_size()?;
    Ok(parser.tree)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    tree: Abbreviation,
    /// Position of each node's `*`, indexed like `tree.nodes`
    repeat_at: Vec<Option<usize>>,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        Some(ch)
    }

    fn push(
        &mut self,
        kind: NodeKind,
        repeat: Option<(usize, usize)>,
        children: Vec<usize>,
    ) -> usize {
        self.tree.nodes.push(Node {
            kind,
            repeat: repeat.map(|(count, _)| count),
            children,
        });
        self.repeat_at.push(repeat.map(|(_, position)| position));
        self.tree.nodes.len() - 1
    }

    /// Reject trees whose repeats would render more than [`MAX_ELEMENTS`]
    /// elements. Reports the multiplier whose subtree crosses the limit, or
    /// the last one when only the sum of several does.
    fn check_size(&self) -> Result<(), ExpansionError> {
        let Some(last) = self.repeat_at.iter().flatten().max().copied() else {
            return Ok(());
        };
        let mut total = 0usize;
        for &root in &self.tree.roots {
            total = total.saturating_add(self.subtree_size(root)?);
        }
        if total > MAX_ELEMENTS {
            return Err(ExpansionError::InvalidMultiplier { position: last });
        }
        Ok(())
    }

    fn subtree_size(&self, id: usize) -> Result<usize, ExpansionError> {
        let node = &self.tree.nodes[id];
        let mut size = match node.kind {
            NodeKind::Element(_) => 1usize,
            NodeKind::Group => 0,
        };
        for &child in &node.children {
            size = size.saturating_add(self.subtree_size(child)?);
        }

        let Some(count) = node.repeat else {
            return Ok(size);
        };
        match size.checked_mul(count) {
            Some(total) if total <= MAX_ELEMENTS => Ok(total),
            _ => Err(ExpansionError::InvalidMultiplier {
                position: self.repeat_at[id].unwrap_or(0),
            }),
        }
    }

    fn unexpected(&self) -> ExpansionError {
        match self.peek() {
            Some(ch) => ExpansionError::UnexpectedChar {
                ch,
                position: self.pos,
            },
            None => ExpansionError::UnexpectedEnd,
        }
    }

    /// Terms joined by operators, up to `)` or the end of input
    fn sequence(&mut self) -> Result<Vec<usize>, ExpansionError> {
        let mut roots = Vec::new();
        // Open parents; empty means the sequence's own top level
        let mut parents: Vec<usize> = Vec::new();

        loop {
            let id = self.term()?;
            match parents.last() {
                Some(&parent) => self.tree.nodes[parent].children.push(id),
                None => roots.push(id),
            }

            match self.peek() {
                Some('>') => {
                    self.bump();
                    parents.push(id);
                }
                Some('+') => {
                    self.bump();
                }
                Some('^') => {
                    while self.peek() == Some('^') {
                        self.bump();
                        parents.pop();
                    }
                }
                Some(')') | None => return Ok(roots),
                Some(_) => return Err(self.unexpected()),
            }
        }
    }

    fn term(&mut self) -> Result<usize, ExpansionError> {
        if self.peek() != Some('(') {
            return self.element();
        }

        let open = self.pos;
        self.bump();
        let children = self.sequence()?;
        if self.bump() != Some(')') {
            return Err(ExpansionError::UnclosedGroup { position: open });
        }
        let repeat = if self.peek() == Some('*') {
            Some(self.repeat()?)
        } else {
            None
        };
        Ok(self.push(NodeKind::Group, repeat, children))
    }

    fn element(&mut self) -> Result<usize, ExpansionError> {
        let start = self.pos;
        let mut element = Element::default();
        let mut repeat = None;

        let name = self.ident(is_name_char);
        if !name.is_empty() {
            element.name = Some(name);
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    element.id = Some(self.required_ident()?);
                }
                Some('.') => {
                    self.bump();
                    let class = self.required_ident()?;
                    element.classes.push(class);
                }
                Some('[') => self.attributes(&mut element.attributes)?,
                Some('{') => element.text = Some(self.text()?),
                Some('*') => repeat = Some(self.repeat()?),
                _ => break,
            }
        }

        if self.pos == start {
            return Err(self.unexpected());
        }
        Ok(self.push(NodeKind::Element(element), repeat, Vec::new()))
    }

    fn ident(&mut self, accept: fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(ch) = self.peek().filter(|c| accept(*c)) {
            out.push(ch);
            self.pos += 1;
        }
        out
    }

    fn required_ident(&mut self) -> Result<String, ExpansionError> {
        let ident = self.ident(is_name_char);
        if ident.is_empty() {
            return Err(self.unexpected());
        }
        Ok(ident)
    }

    /// `*N`, returned with the position of the `*`
    fn repeat(&mut self) -> Result<(usize, usize), ExpansionError> {
        let position = self.pos;
        self.bump(); // '*'
        let digits = self.ident(|c| c.is_ascii_digit());
        match digits.parse::<usize>() {
            Ok(count) if (1..=MAX_ELEMENTS).contains(&count) => Ok((count, position)),
            _ => Err(ExpansionError::InvalidMultiplier { position }),
        }
    }

    fn text(&mut self) -> Result<String, ExpansionError> {
        let open = self.pos;
        self.bump(); // '{'
        let mut text = String::new();
        loop {
            match self.bump() {
                Some('}') => return Ok(text),
                Some(ch) => text.push(ch),
                None => return Err(ExpansionError::UnclosedText { position: open }),
            }
        }
    }

    fn attributes(&mut self, into: &mut Vec<Attribute>) -> Result<(), ExpansionError> {
        let open = self.pos;
        self.bump(); // '['
        loop {
            self.skip_spaces();
            match self.peek() {
                Some(']') => {
                    self.bump();
                    return Ok(());
                }
                None => return Err(ExpansionError::UnclosedAttributes { position: open }),
                Some(_) => {}
            }

            let name = self.ident(|c| !c.is_whitespace() && !matches!(c, '=' | ']' | '[' | '"' | '\''));
            if name.is_empty() {
                return Err(self.unexpected());
            }
            let value = if self.peek() == Some('=') {
                self.bump();
                Some(self.attribute_value(open)?)
            } else {
                None
            };
            into.push(Attribute { name, value });
        }
    }

    fn attribute_value(&mut self, open: usize) -> Result<String, ExpansionError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let mut value = String::new();
                loop {
                    match self.bump() {
                        Some(ch) if ch == quote => return Ok(value),
                        Some(ch) => value.push(ch),
                        None => return Err(ExpansionError::UnclosedAttributes { position: open }),
                    }
                }
            }
            _ => Ok(self.ident(|c| !c.is_whitespace() && c != ']')),
        }
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '-' | '_' | ':' | '$' | '@')
}
