//! Codec errors.

/// Errors from encoding or decoding dynamic transform flags.
///
/// There is no partial success: when any of these is returned, no flags were
/// produced or no type was rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The flag array does not have one flag per slot.
    #[error("flag count mismatch: type has {expected} slots, marker has {actual} flags")]
    FlagCountMismatch { expected: usize, actual: usize },

    /// A slot that cannot be dynamic is flagged `true`.
    #[error("slot {slot} is flagged dynamic but `{found}` cannot be dynamic")]
    ShapeMismatch { slot: usize, found: String },

    /// Type nested deeper than the walk limits allow.
    #[error("recursion limit exceeded (limit: {limit})")]
    RecursionLimitExceeded { limit: u32 },
}

impl CodecError {
    /// Whether the error describes malformed flags (as opposed to a resource
    /// limit). Only these are forgiven by the lenient decode policy.
    pub fn is_malformed_flags(&self) -> bool {
        matches!(
            self,
            Self::FlagCountMismatch { .. } | Self::ShapeMismatch { .. }
        )
    }

    /// Shift slot positions by `prefix` leading slots.
    pub(crate) fn offset_by(self, prefix: usize) -> Self {
        match self {
            Self::FlagCountMismatch { expected, actual } => Self::FlagCountMismatch {
                expected: expected + prefix,
                actual: actual + prefix,
            },
            Self::ShapeMismatch { slot, found } => Self::ShapeMismatch {
                slot: slot + prefix,
                found,
            },
            other => other,
        }
    }
}
