//! Terminal palette for slot traces.
//!
//! A trace line colors its flag by value: green for `true` (a `dynamic`
//! leaf), dim for `false`. Type names are blue, and slot indices and
//! container kinds are dim.

/// Escape codes used by the trace printer; all empty when color is off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub green: &'static str,
    pub blue: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        green: "\x1b[32m",
        blue: "\x1b[34m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        green: "",
        blue: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }

    /// Color for a flag value.
    pub fn flag(&self, flag: bool) -> &'static str {
        if flag { self.green } else { self.dim }
    }
}
