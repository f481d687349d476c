//! Abbreviation expansion
//!
//! The engine only depends on the [`Expander`] trait. [`HtmlExpander`] is the
//! bundled implementation covering the common subset of the abbreviation
//! language: tags, `#id`, `.class`, `[attributes]`, `{text}`, `>`, `+`, `^`,
//! `(groups)`, `*N` and `$` numbering.

pub mod parser;
pub mod render;
pub mod tabstops;

pub use tabstops::resolve_tabstops;

/// Output syntax requested from the expander
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Syntax {
    #[default]
    Html,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandOptions {
    pub syntax: Syntax,
}

impl ExpandOptions {
    pub const HTML: ExpandOptions = ExpandOptions {
        syntax: Syntax::Html,
    };
}

/// Why an abbreviation could not be expanded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpansionError {
    #[error("empty abbreviation")]
    Empty,

    #[error("unexpected '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("abbreviation ends unexpectedly")]
    UnexpectedEnd,

    #[error("group opened at position {position} is never closed")]
    UnclosedGroup { position: usize },

    #[error("attribute list opened at position {position} is never closed")]
    UnclosedAttributes { position: usize },

    #[error("text opened at position {position} is never closed")]
    UnclosedText { position: usize },

    #[error("invalid multiplier at position {position}")]
    InvalidMultiplier { position: usize },
}

/// Turns an abbreviation into markup
pub trait Expander {
    fn expand(&self, abbreviation: &str, options: &ExpandOptions)
        -> Result<String, ExpansionError>;
}

/// Any matching closure is an expander
impl<F> Expander for F
where
    F: Fn(&str, &ExpandOptions) -> Result<String, ExpansionError>,
{
    fn expand(
        &self,
        abbreviation: &str,
        options: &ExpandOptions,
    ) -> Result<String, ExpansionError> {
        self(abbreviation, options)
    }
}

/// Built-in HTML expander
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExpander;

impl Expander for HtmlExpander {
    fn expand(
        &self,
        abbreviation: &str,
        options: &ExpandOptions,
    ) -> Result<String, ExpansionError> {
        match options.syntax {
            Syntax::Html => {
                let tree = parser::parse(abbreviation)?;
                Ok(render::render(&tree))
            }
        }
    }
}
