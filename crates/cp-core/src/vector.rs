//! Elementwise fused multiply-add over fixed-length numeric buffers.
//!
//! The slice forms check every operand length before touching `dest` and
//! return [`CoreError::ShapeMismatch`] on disagreement, so a failed call never
//! leaves `dest` partially written. The array forms carry the length in the
//! type and cannot fail.

use crate::{CoreError, CoreResult, Real};

/// `dest[i] = multiplicand[i] * factor + addend[i]`, rounded once per element.
pub fn fused_multiply_add<T: Real>(
    dest: &mut [T],
    addend: &[T],
    multiplicand: &[T],
    factor: T,
) -> CoreResult<()> {
    check_len("addend", dest.len(), addend.len())?;
    check_len("multiplicand", dest.len(), multiplicand.len())?;
    for ((d, &a), &m) in dest.iter_mut().zip(addend).zip(multiplicand) {
        *d = m.mul_add(factor, a);
    }
    Ok(())
}

/// `dest[i] = multiplicand[i] * factor + dest[i]`, rounded once per element.
pub fn fused_multiply_add_assign<T: Real>(
    dest: &mut [T],
    multiplicand: &[T],
    factor: T,
) -> CoreResult<()> {
    check_len("multiplicand", dest.len(), multiplicand.len())?;
    for (d, &m) in dest.iter_mut().zip(multiplicand) {
        *d = m.mul_add(factor, *d);
    }
    Ok(())
}

/// Fixed-length form of [`fused_multiply_add`].
#[inline]
pub fn fused_multiply_add_array<T: Real, const N: usize>(
    dest: &mut [T; N],
    addend: &[T; N],
    multiplicand: &[T; N],
    factor: T,
) {
    for i in 0..N {
        dest[i] = multiplicand[i].mul_add(factor, addend[i]);
    }
}

/// Fixed-length form of [`fused_multiply_add_assign`].
#[inline]
pub fn fused_multiply_add_assign_array<T: Real, const N: usize>(
    dest: &mut [T; N],
    multiplicand: &[T; N],
    factor: T,
) {
    for i in 0..N {
        dest[i] = multiplicand[i].mul_add(factor, dest[i]);
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> CoreResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(CoreError::ShapeMismatch {
            what,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fma_writes_scaled_sum() {
        let mut dest = [0.0f64; 4];
        fused_multiply_add(&mut dest, &[1.0, 2.0, 3.0, 4.0], &[1.0, -1.0, 0.5, 0.0], 2.0)
            .unwrap();
        assert_eq!(dest, [3.0, 0.0, 4.0, 4.0]);
    }

    #[test]
    fn fma_assign_accumulates() {
        let mut dest = [1.0f32, 1.0, 1.0];
        fused_multiply_add_assign(&mut dest, &[2.0, 0.0, -4.0], 0.25).unwrap();
        assert_eq!(dest, [1.5, 1.0, 0.0]);
    }

    #[test]
    fn short_addend_is_rejected_without_partial_write() {
        let mut dest = [9.0f64; 4];
        let err = fused_multiply_add(&mut dest, &[1.0, 2.0, 3.0], &[1.0; 4], 1.0).unwrap_err();
        assert_eq!(
            err,
            CoreError::ShapeMismatch {
                what: "addend",
                expected: 4,
                actual: 3,
            }
        );
        assert_eq!(dest, [9.0; 4]);
    }

    #[test]
    fn long_multiplicand_is_rejected() {
        let mut dest = [0.0f64; 2];
        let err = fused_multiply_add_assign(&mut dest, &[1.0, 2.0, 3.0], 1.0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("multiplicand"));
        assert!(msg.contains("expected 2"));
        assert_eq!(dest, [0.0; 2]);
    }

    #[test]
    fn array_forms_match_slice_forms() {
        let addend = [0.1f64, -0.2, 0.3, 1e-3, 5.0, -7.0];
        let mult = [1.5f64, 2.5, -3.5, 4.5, 0.0, 1.0];
        let mut a = [0.0; 6];
        let mut b = [0.0; 6];
        fused_multiply_add_array(&mut a, &addend, &mult, 0.01);
        fused_multiply_add(&mut b, &addend, &mult, 0.01).unwrap();
        assert_eq!(a, b);

        fused_multiply_add_assign_array(&mut a, &mult, -0.5);
        fused_multiply_add_assign(&mut b, &mult, -0.5).unwrap();
        assert_eq!(a, b);
    }
}
