//! Utility modules

pub mod text;

pub use text::{find_from, prefix_chars};
