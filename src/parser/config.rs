use serde::{Deserialize, Serialize};

/// Configuration for parser behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum nesting depth across block recursion (lists, blockquotes)
    /// and inline recursion (emphasis, link text). Windows that would
    /// nest deeper degrade to literal text instead of recursing, keeping
    /// stack growth bounded on pathological input.
    pub max_nesting_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: 64,
        }
    }
}
