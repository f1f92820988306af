//! Error types for markup parsing, configuration, and menu construction.

/// Errors from parsing host page markup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    #[error("unexpected </{found}> at byte {offset}, expected </{expected}>")]
    UnexpectedCloseTag {
        expected: String,
        found: String,
        offset: usize,
    },
    #[error("unmatched </{found}> at byte {offset}")]
    StrayCloseTag { found: String, offset: usize },
    #[error("<{0}> is never closed")]
    UnclosedTag(String),
    #[error("unexpected input at byte {offset}: {snippet:?}")]
    UnexpectedInput { offset: usize, snippet: String },
}

/// Errors from configuring or constructing a mega menu.
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("invalid menu options: {0}")]
    Options(#[from] serde_json::Error),
    #[error("menu root is not an element of this document")]
    UnknownRoot,
    #[error("menu item {item} has no anchor to use as its trigger")]
    MissingTrigger { item: usize },
    #[error(transparent)]
    Markup(#[from] MarkupError),
}
