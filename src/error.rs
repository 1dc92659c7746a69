//! Filepath: src/error.rs
//!
//! Errors reported by [`crate::NumberAssigner::assign`].
//!
//! Both variants are caller contract violations detected up front, before
//! any element is written. Once the snapshot is taken the rewrite itself
//! cannot fail.

use std::fmt as StdFmt;

// ============================================================================
//  AssignError
// ============================================================================

/// Errors that can occur before a renumbering pass starts writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    /// The input iterator reported one length and yielded another.
    ///
    /// Nothing has been written when this is returned.
    LengthMismatch {
        /// Length reported by [`ExactSizeIterator::len`].
        reported: usize,
        /// Number of elements the iterator actually yielded.
        actual: usize,
    },

    /// The collection is too large for its ranks to fit in a [`crate::Number`].
    TooManyElements {
        /// Number of elements supplied.
        len: usize,
    },
}

impl StdFmt::Display for AssignError {
    fn fmt(&self, f: &mut StdFmt::Formatter<'_>) -> StdFmt::Result {
        match self {
            Self::LengthMismatch { reported, actual } => {
                write!(
                    f,
                    "element iterator reported {reported} elements but yielded {actual}"
                )
            }

            Self::TooManyElements { len } => {
                write!(f, "{len} elements cannot be ranked with 64-bit numbers")
            }
        }
    }
}

impl std::error::Error for AssignError {}
