use std::fmt;

/// Precondition violations reported by [`SegmentTree`](crate::SegmentTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeError {
    /// A tree must cover at least one element.
    Empty,
    /// The range `[left, right]` is empty or reaches past the last element.
    InvalidRange {
        left: usize,
        right: usize,
        len: usize,
    },
    /// Positions are 1-based, so both `0` and anything above `len` are rejected.
    PositionOutOfBounds { pos: usize, len: usize },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "cannot build a tree over zero elements"),
            Self::InvalidRange { left, right, len } => write!(
                f,
                "invalid range [{left}, {right}] for {len} elements (expected 1 <= l <= r <= {len})"
            ),
            Self::PositionOutOfBounds { pos, len } => {
                write!(f, "position {pos} is outside 1..={len}")
            }
        }
    }
}

impl std::error::Error for TreeError {}
