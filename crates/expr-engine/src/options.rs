use serde::{Deserialize, Serialize};

/// Default nesting limit shared by the parser and the evaluator.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Tunables for [`Engine`](crate::Engine).
///
/// Deserializes with every field optional, so a host configuration file only
/// needs to name the settings it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Maximum recursion depth for parsing and for evaluation, lambda calls
    /// included.
    pub max_depth: usize,
    /// Reject unterminated string literals instead of reading to end of input.
    pub strict_strings: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            strict_strings: false,
        }
    }
}

impl EngineOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_strict_strings(mut self, strict: bool) -> Self {
        self.strict_strings = strict;
        self
    }
}
