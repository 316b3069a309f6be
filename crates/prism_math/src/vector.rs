//! Checked normalization for `Vector3`.
//!
//! glam's own `normalize` silently produces NaN for a zero vector. Everything
//! in the parser and tracer goes through these helpers instead, so a degenerate
//! direction shows up as an error at the point where it was built.

use thiserror::Error;

/// Three-component double precision vector.
pub type Vector3 = glam::DVec3;

/// Errors produced by vector arithmetic.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("cannot normalize a zero-length vector")]
    DivideByZero,
}

/// Result type for math operations.
pub type MathResult<T> = Result<T, MathError>;

/// Normalization that fails on zero-length input.
pub trait Normalize: Sized {
    /// Return a unit-length copy.
    fn try_normalized(self) -> MathResult<Self>;

    /// Normalize in place. The vector is left untouched on failure.
    fn try_normalize_mut(&mut self) -> MathResult<()>;
}

impl Normalize for Vector3 {
    fn try_normalized(self) -> MathResult<Self> {
        let length = self.length();
        if length == 0.0 || !length.is_finite() {
            return Err(MathError::DivideByZero);
        }
        Ok(self / length)
    }

    fn try_normalize_mut(&mut self) -> MathResult<()> {
        *self = self.try_normalized()?;
        Ok(())
    }
}
