//! ng-emmet - markup abbreviation expansion inside component templates
//!
//! Given a document and a cursor, the engine decides whether the cursor sits
//! inside the inline template of an `@Component` declaration, pulls out the
//! abbreviation in front of it, expands it and reindents the result to fit
//! the surrounding code. Anywhere else the cycle falls back to inserting one
//! indentation unit, so a Tab key bound to it never does nothing.
//!
//! The host editor and the expander are traits ([`EditorHost`],
//! [`Expander`]); [`model::Editor`] and [`HtmlExpander`] are the bundled
//! implementations.

pub mod abbreviation;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod context;
pub mod edit;
pub mod expand;
pub mod host;
pub mod messages;
pub mod model;
pub mod reformat;
pub mod scanner;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use config::EditorConfig;
pub use context::{ComponentContext, LineInfo};
pub use expand::{ExpansionError, Expander, HtmlExpander};
pub use host::{EditorHost, IndentOptions, TextEdit, TextSource};
pub use messages::{Msg, Outcome};
pub use scanner::{LineScanner, MatchPolicy};
