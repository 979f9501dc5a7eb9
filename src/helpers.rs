// This file implements the polynomial helpers shared by the norm evaluator, the transform
// engine and the key generator: negacyclic correlation/rotation, lifting and inversion mod q.

use crate::error::BlissError;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Neg;


/// If the condition is not met, return the given error. Borrowed from the `anyhow` crate.
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err);
        }
    };
}

pub(crate) use ensure; // make available throughout crate


/// Largest coefficient magnitude accepted by the public polynomial helpers.
pub(crate) const MAX_COEFF: u32 = 1 << 15;

/// Longest polynomial accepted by the public polynomial helpers.
pub(crate) const MAX_DEGREE: usize = 1 << 16;


/// Checks that `x` and `y` have the same length, at most `2^16`, and that every coefficient
/// has magnitude at most `2^15`. Within these bounds all correlations fit an `i64` exactly.
pub(crate) fn check_operands(x: &[i32], y: &[i32]) -> Result<(), BlissError> {
    ensure!(x.len() == y.len(), BlissError::Configuration("polynomial lengths differ"));
    ensure!(x.len() <= MAX_DEGREE, BlissError::Configuration("polynomial degree too large"));
    ensure!(
        x.iter().chain(y).all(|c| c.unsigned_abs() <= MAX_COEFF),
        BlissError::Configuration("polynomial coefficient too large")
    );
    Ok(())
}


/// Computes the scalar product of `x` with the negatively wrapped `y` rotated by `shift`:
/// `sum_{i<n-shift} x[i]·y[i+shift] − sum_{i>=n-shift} x[i]·y[i+shift−n]`.
///
/// With `x == y` and `shift == 0` this is the sum of squares of `x`.
///
/// **Input**: equal-length signed polynomials `x`, `y` and `shift ∈ [0, n)`. <br>
/// **Output**: the negacyclic correlation of `x` and `y` at rotation `shift`.
///
/// # Errors
/// Returns a configuration error when the lengths differ, `shift >= n`, `n > 2^16` or a
/// coefficient magnitude exceeds `2^15`.
pub fn wrapped_product(x: &[i32], y: &[i32], shift: usize) -> Result<i64, BlissError> {
    check_operands(x, y)?;
    ensure!(shift < x.len(), BlissError::Configuration("rotation out of range"));
    Ok(correlate(x, y, shift))
}


/// As `wrapped_product()`, for operands already known to be within bounds.
pub(crate) fn correlate(x: &[i32], y: &[i32], shift: usize) -> i64 {
    debug_assert_eq!(x.len(), y.len(), "correlate: length mismatch");
    debug_assert!(shift < x.len().max(1), "correlate: shift out of range");
    let dot = |a: &[i32], b: &[i32]| -> i64 {
        a.iter().zip(b).map(|(&a, &b)| i64::from(a) * i64::from(b)).sum()
    };
    let n = x.len();
    dot(&x[..n - shift], &y[shift..]) - dot(&x[n - shift..], &y[..shift])
}


/// Applies a negative wrapped rotation by `shift` positions to `x`: entries rotating past the
/// end are negated and re-enter at the front.
///
/// # Errors
/// Returns a configuration error when `shift >= n`, `n > 2^16` or a coefficient magnitude
/// exceeds `2^15`.
pub fn wrap(x: &[i32], shift: usize) -> Result<Vec<i32>, BlissError> {
    check_operands(x, x)?;
    ensure!(shift < x.len(), BlissError::Configuration("rotation out of range"));
    let mut x_wrapped = vec![0i32; x.len()];
    wrap_into(x, shift, &mut x_wrapped);
    Ok(x_wrapped)
}


/// As `wrap()`, writing into a caller-owned buffer so rotation loops do not allocate.
pub(crate) fn wrap_into<T: Copy + Neg<Output = T>>(x: &[T], shift: usize, x_wrapped: &mut [T]) {
    debug_assert_eq!(x.len(), x_wrapped.len(), "wrap: length mismatch");
    debug_assert!(shift < x.len().max(1), "wrap: shift out of range");
    let n = x.len();
    x_wrapped[shift..].copy_from_slice(&x[..n - shift]);
    for (out, &v) in x_wrapped[..shift].iter_mut().zip(&x[n - shift..]) {
        *out = -v;
    }
}


/// Lifts a signed coefficient into the unsigned residue domain `[0, q)`.
#[must_use]
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)] // q < 2^31 and result non-negative
pub fn lift(v: i32, q: u32) -> u32 {
    v.rem_euclid(q as i32) as u32
}


/// Computes the inverse of `x` modulo the prime `q` as `x^(q−2) mod q`.
///
/// Square-and-multiply over the bits of `q − 2`, bounded by its most significant set bit,
/// keeping an accumulator and a running square.
///
/// # Errors
/// Returns `NonInvertible` when `x ≡ 0 (mod q)`, and a configuration error for `q < 3`.
#[allow(clippy::cast_possible_truncation)] // result < q
pub fn invert(x: u32, q: u32) -> Result<u32, BlissError> {
    ensure!(q >= 3, BlissError::Configuration("modulus too small for inversion"));
    let qq = u64::from(q);
    let x = u64::from(x) % qq;
    ensure!(x != 0, BlissError::NonInvertible);

    let q2 = q - 2;
    let i_max = 31 - q2.leading_zeros();
    let mut x1 = if q2 & 1 == 1 { x } else { 1 };
    let mut x2 = x;
    for i in 1..=i_max {
        x2 = (x2 * x2) % qq;
        if (q2 >> i) & 1 == 1 {
            x1 = (x1 * x2) % qq;
        }
    }
    Ok(x1 as u32)
}


/// HAC Algorithm 14.76 Right-to-left binary exponentiation mod q.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // result < q
pub(crate) const fn pow_mod(g: u32, e: usize, q: u32) -> u32 {
    let q = q as u64;
    let mut result = 1u64;
    let mut s = g as u64 % q;
    let mut e = e;
    while e != 0 {
        if e & 1 != 0 {
            result = (result * s) % q;
        };
        e >>= 1;
        if e != 0 {
            s = (s * s) % q;
        };
    }
    result as u32
}


/// Reverses the lowest `bits` bits of `k`.
#[must_use]
pub(crate) const fn bit_rev(k: usize, bits: u32) -> usize {
    k.reverse_bits() >> (usize::BITS - bits)
}
