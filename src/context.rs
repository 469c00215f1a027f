use serde::{Deserialize, Serialize};

/// Fallback groups nested deeper than this are refused.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Evaluation knobs shared by the parser, resolver and compiler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    /// Maximum nesting of `[...]` fallback groups.
    pub max_depth: usize,
    /// Join a street number and the street that follows it with a single space.
    pub street_spacing: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            street_spacing: true,
        }
    }
}

impl Context {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_street_spacing(mut self, street_spacing: bool) -> Self {
        self.street_spacing = street_spacing;
        self
    }
}
