//! Model module - the in-memory editor host
//!
//! A rope-backed document plus the selection and indentation settings of the
//! view that edits it.

pub mod document;
pub mod editor;

pub use document::Document;
pub use editor::{Editor, Position, Selection};
