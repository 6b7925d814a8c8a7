//! Resource limits for type walks.

/// Limits applied while walking a type expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkLimits {
    /// Maximum nesting depth (default: 512).
    pub(crate) recursion_limit: u32,
}

impl Default for WalkLimits {
    fn default() -> Self {
        Self {
            recursion_limit: 512,
        }
    }
}

impl WalkLimits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth. The root sits at depth 0.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}
