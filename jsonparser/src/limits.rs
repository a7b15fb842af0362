// SPDX-License-Identifier: Apache-2.0

/// Default maximum nesting of arrays and objects.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 128;

/// Parser configuration.
///
/// The parser recurses once per nested array or object, so the nesting limit
/// also bounds stack usage on hostile input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Deepest allowed array/object nesting; a top-level `[]` is depth 1.
    pub max_nesting_depth: usize,
}

impl Limits {
    pub const fn new() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }

    pub const fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new()
    }
}
