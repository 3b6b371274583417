//! Error type shared by every transform in the crate.

use thiserror::Error;

/// Errors reported by the transforms and by result validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FftError {
    /// The transform size cannot be handled (zero, odd where an even split is needed,
    /// incompatible radix, ...).
    #[error("invalid transform size {size}: {reason}")]
    InvalidSize {
        /// The offending size.
        size: usize,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Two quantities that must agree do not (batch counts, vector lengths, matrix shapes).
    #[error("size mismatch in {what}: expected {expected}, found {found}")]
    SizeMismatch {
        /// Which quantity disagrees.
        what: &'static str,
        /// The size implied by the other operand.
        expected: usize,
        /// The size actually supplied.
        found: usize,
    },

    /// A computed result deviates from a trusted reference.
    ///
    /// Only produced when validating results, never by a transform itself.
    #[error(
        "value at index {index} is {actual}, expected {expected} (tolerance {tolerance})"
    )]
    ToleranceExceeded {
        /// Position of the first deviating element.
        index: usize,
        /// The computed value.
        actual: f64,
        /// The reference value.
        expected: f64,
        /// The allowed deviation at this element.
        tolerance: f64,
    },
}

impl FftError {
    pub(crate) const fn invalid_size(size: usize, reason: &'static str) -> Self {
        Self::InvalidSize { size, reason }
    }

    pub(crate) const fn mismatch(what: &'static str, expected: usize, found: usize) -> Self {
        Self::SizeMismatch {
            what,
            expected,
            found,
        }
    }
}

/// Return [`FftError::SizeMismatch`] unless both lengths agree.
pub(crate) fn ensure_same_len(what: &'static str, expected: usize, found: usize) -> Result<(), FftError> {
    if expected == found {
        Ok(())
    } else {
        Err(FftError::mismatch(what, expected, found))
    }
}
