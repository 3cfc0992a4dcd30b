//! Numeric tolerance used by the intersection preprocessor and the classifier.

use crate::{fsize, Point2D};

/// Default relative tolerance, a few ulps of slack for the
/// intersection arithmetic.
pub const DEFAULT_EPSILON: fsize = 8.0 * fsize::EPSILON;

/// Configuration of a boolean operation.
///
/// ```rust
/// use polyweave::ClipConfig;
///
/// let cfg = ClipConfig::default();
/// assert!(cfg.epsilon > 0.0);
///
/// let loose = ClipConfig::new(1.0e-6);
/// assert!(loose.approx_eq(1.0, 1.0 + 1.0e-7));
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClipConfig {
    /// Relative tolerance. Two values `a`, `b` are considered equal when
    /// `|a - b| <= epsilon * max(1, |a|, |b|)`
    pub epsilon: fsize,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self { epsilon: DEFAULT_EPSILON }
    }
}

impl ClipConfig {

    /// # Panics
    ///
    /// If `epsilon` is not a finite, positive number
    pub fn new(epsilon: fsize) -> Self {
        assert!(epsilon.is_finite() && epsilon > 0.0, "epsilon must be finite and positive, got {}", epsilon);
        Self { epsilon }
    }

    #[inline]
    pub fn approx_eq(&self, a: fsize, b: fsize) -> bool {
        (a - b).abs() <= self.epsilon * a.abs().max(b.abs()).max(1.0)
    }

    /// Per-axis tolerant comparison of two points
    #[inline]
    pub fn approx_eq_point(&self, a: &Point2D, b: &Point2D) -> bool {
        self.approx_eq(a.x, b.x) && self.approx_eq(a.y, b.y)
    }

    /// Tolerance of a parameter in [0, 1]
    #[inline]
    pub fn approx_eq_param(&self, a: fsize, b: fsize) -> bool {
        (a - b).abs() <= self.epsilon
    }
}
