//! Message types for the trigger surface
//!
//! Every event that can start an expansion cycle is one of these.

/// Events the host forwards to [`update`](crate::update::update)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    /// The expand command (bound to Tab), run on the active document/cursor
    ExpandAbbreviation,
    /// The active document changed
    DocumentChanged,
}

/// What a cycle ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The abbreviation was replaced by its expansion
    Expanded { abbreviation: String },
    /// A plain indentation unit was inserted
    Indented,
    /// Nothing was done (change notification with nothing to expand)
    Ignored,
}
