//! Marker attribute forms.
//!
//! A metadata writer emits no marker when nothing is dynamic, the
//! zero-argument marker when the whole type is a single `dynamic` slot, and
//! the full flag array otherwise. A reader treats the zero-argument marker
//! on an `object` as "this is `dynamic`".

use serde::Serialize;

/// How a flag array is stored as an attribute.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    /// No attribute: every slot is `false`.
    Absent,
    /// Zero-argument attribute, equivalent to `[true]`.
    Bare,
    /// Attribute with an explicit `bool[]` argument.
    Flags(Vec<bool>),
}

impl Marker {
    /// Pick the storage form for an encoded flag array.
    pub fn from_flags(flags: Vec<bool>) -> Self {
        if !flags.contains(&true) {
            Self::Absent
        } else if flags == [true] {
            Self::Bare
        } else {
            Self::Flags(flags)
        }
    }

    /// Whether an attribute is emitted at all.
    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// The flags this marker stands for. `Absent` has none.
    pub fn flags(&self) -> Option<Vec<bool>> {
        match self {
            Self::Absent => None,
            Self::Bare => Some(vec![true]),
            Self::Flags(flags) => Some(flags.clone()),
        }
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Absent => f.write_str("none"),
            Self::Bare => f.write_str("[Dynamic]"),
            Self::Flags(flags) => {
                f.write_str("[Dynamic(new[] { ")?;
                for (i, flag) in flags.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{flag}")?;
                }
                f.write_str(" })]")
            }
        }
    }
}
