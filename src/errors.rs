use thiserror::Error; // Import the `Error` derive macro from the `thiserror` crate

// Everything that can go wrong while turning a display option string into a label
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    // Open and close counts for one bracket kind differ; the whole fragment is dropped
    #[error("{open}{close} count mismatch: {expected} '{open}' vs {found} '{close}'")]
    StructuralImbalance {
        open: char,
        close: char,
        expected: usize,
        found: usize,
    },

    // A group opened at the scan position never closes
    #[error("unmatched '{open}'")]
    UnmatchedGroup { open: char },

    // Fallback nesting went deeper than the configured guard
    #[error("nesting deeper than {limit} levels")]
    DepthExceeded { limit: usize },

    // An `attr(...)` filter item with stray or doubled parentheses
    #[error("malformed attribute filter: {0}")]
    MalformedAttributeFilter(String),

    // The attribute snapshot handed to the CLI is not a JSON object
    #[error("invalid attributes: {0}")]
    InvalidAttributes(String),
}

// Type alias for results that use `EvalError` as the error type
pub type Result<T> = std::result::Result<T, EvalError>;
