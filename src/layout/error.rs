use std::fmt;

/// Which categorical axis a bracket reference points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    Category,
    Subgroup,
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisKind::Category => f.write_str("category"),
            AxisKind::Subgroup => f.write_str("subgroup"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("bracket {index} is malformed: {reason}")]
    MalformedBracket { index: usize, reason: String },
    #[error("bracket {index} references {axis} `{reference}` which is not on the axis ({available} available)")]
    OutOfRange {
        index: usize,
        axis: AxisKind,
        reference: String,
        available: usize,
    },
    #[error("cannot lay out brackets: {0}")]
    PrerequisiteState(String),
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f32 },
}

impl LayoutError {
    pub(crate) fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedBracket {
            index,
            reason: reason.into(),
        }
    }

    /// Re-labels a bracket-scoped error with its position in the caller's list.
    pub(crate) fn at_index(self, index: usize) -> Self {
        match self {
            Self::MalformedBracket { reason, .. } => Self::MalformedBracket { index, reason },
            Self::OutOfRange {
                axis,
                reference,
                available,
                ..
            } => Self::OutOfRange {
                index,
                axis,
                reference,
                available,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Rejects non-finite and non-positive scalars before they reach the stacking loop.
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(LayoutError::InvalidParameter { name, value })
    }
}
