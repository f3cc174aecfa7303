use std::fmt::{Debug, Display};

use num_traits::{Float, FloatConst};

use crate::CoreError;

/// Floating point type the physics core is generic over.
///
/// Implemented for `f32` and `f64`. Constants are written as `f64` literals
/// and converted with [`Real::lit`], so one implementation serves both
/// precisions.
pub trait Real: Float + FloatConst + Default + Debug + Display + Send + Sync + 'static {
    /// Short name used in logs and run summaries.
    const NAME: &'static str;

    /// Convert an `f64` literal into this precision.
    fn lit(v: f64) -> Self;

    /// Widen to `f64`.
    fn as_f64(self) -> f64;

    /// Comparison tolerances appropriate for this precision.
    fn default_tolerances() -> Tolerances;
}

impl Real for f32 {
    const NAME: &'static str = "f32";

    #[inline]
    fn lit(v: f64) -> Self {
        v as f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }

    fn default_tolerances() -> Tolerances {
        Tolerances {
            abs: 1e-6,
            rel: 1e-5,
        }
    }
}

impl Real for f64 {
    const NAME: &'static str = "f64";

    #[inline]
    fn lit(v: f64) -> Self {
        v
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }

    fn default_tolerances() -> Tolerances {
        Tolerances::default()
    }
}

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal<T: Real>(a: T, b: T, tol: Tolerances) -> bool {
    let (a, b) = (a.as_f64(), b.as_f64());
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite<T: Real>(v: T, what: &'static str) -> Result<T, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite {
            what,
            value: v.as_f64(),
        })
    }
}

/// True when every element is neither infinite nor NaN.
pub fn all_finite<T: Real>(values: &[T]) -> bool {
    values.iter().all(|v| v.is_finite())
}
