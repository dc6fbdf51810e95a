//! Error type for the integer matrix operations.

use std::error::Error;
use std::fmt;

/// Errors from the vector/matrix operations in [`crate::matrix`].
///
/// Both variants indicate a programming error in the caller (a bad
/// transition index or an inconsistent topology), never a runtime
/// condition of the simulated net.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixError {
    /// A transition index outside `[0, len)` was passed to
    /// [`unit`](crate::matrix::unit) or reached the firing path.
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The exclusive upper bound it violated.
        len: usize,
    },
    /// Operand dimensions do not agree.
    DimMismatch {
        /// Length (or column count) of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
    },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "transition index {index} out of range (len {len})")
            }
            Self::DimMismatch { left, right } => {
                write!(f, "dimension mismatch: {left} != {right}")
            }
        }
    }
}

impl Error for MatrixError {}
