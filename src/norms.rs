// This file implements the secret-key norms used to accept or reject candidate keys

use crate::error::BlissError;
use crate::helpers::{check_operands, correlate, wrap_into};
use alloc::vec;
use alloc::vec::Vec;
use zeroize::Zeroizing;


/// Squared Euclidean norm of `S = (s1, s2)`.
///
/// # Errors
/// Returns a configuration error when the lengths differ, `n > 2^16` or a coefficient
/// magnitude exceeds `2^15`.
pub fn l2_norm(s1: &[i32], s2: &[i32]) -> Result<u32, BlissError> {
    check_operands(s1, s2)?;
    Ok(norm_l2(s1, s2))
}


#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to u32 range
pub(crate) fn norm_l2(s1: &[i32], s2: &[i32]) -> u32 {
    let l2 = correlate(s1, s1, 0) + correlate(s2, s2, 0);
    l2.clamp(0, i64::from(u32::MAX)) as u32
}


/// Computes the `Nk(S)` norm of `S = (s1, s2)`, the rotation-worst-case bound BLISS uses to
/// reject structurally weak secrets.
///
/// For every rotation `i`, `t[i]` is the negacyclic self-correlation of `s1` plus that of `s2`.
/// Each negacyclic rotation of `t` contributes the sum of its `kappa` largest entries, and
/// `Nk(S)` is the sum of the `kappa` largest such contributions. `kappa` is clamped to `n`.
///
/// # Errors
/// Returns a configuration error when the lengths differ, `n > 2^16` or a coefficient
/// magnitude exceeds `2^15`.
pub fn nks_norm(s1: &[i32], s2: &[i32], kappa: usize) -> Result<u32, BlissError> {
    check_operands(s1, s2)?;
    Ok(norm_nks(s1, s2, kappa))
}


#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to u32 range
pub(crate) fn norm_nks(s1: &[i32], s2: &[i32], kappa: usize) -> u32 {
    debug_assert_eq!(s1.len(), s2.len(), "nks_norm: length mismatch");
    let n = s1.len();
    let kappa = kappa.min(n);

    let t: Zeroizing<Vec<i64>> =
        Zeroizing::new((0..n).map(|i| correlate(s1, s1, i) + correlate(s2, s2, i)).collect());
    let mut t_wrapped = Zeroizing::new(vec![0i64; n]);
    let mut max_kappa: Zeroizing<Vec<i128>> = Zeroizing::new(Vec::with_capacity(n));

    for i in 0..n {
        wrap_into(&t, i, &mut t_wrapped);
        t_wrapped.sort_unstable();
        max_kappa.push(t_wrapped[n - kappa..].iter().map(|&v| i128::from(v)).sum());
    }
    max_kappa.sort_unstable();

    let nks: i128 = max_kappa[n - kappa..].iter().sum();
    nks.clamp(0, i128::from(u32::MAX)) as u32
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l2_norm() {
        assert_eq!(l2_norm(&[0; 8], &[0; 8]), Ok(0));
        assert_eq!(l2_norm(&[1, -1, 0, 2], &[3, 0, 0, -1]), Ok(1 + 1 + 4 + 9 + 1));
    }

    #[test]
    fn test_nks_single_term() {
        // s1 = 1, s2 = 0: t = (1, 0, ..., 0) and every rotation of t holds a single +1
        let mut s1 = [0i32; 8];
        s1[0] = 1;
        let s2 = [0i32; 8];
        assert_eq!(nks_norm(&s1, &s2, 1), Ok(1));
        assert_eq!(nks_norm(&s1, &s2, 2), Ok(2));
        // kappa larger than n is clamped
        assert_eq!(nks_norm(&s1, &s2, 100), Ok(8));
    }

    #[test]
    fn test_nks_deterministic() {
        let s1 = [1, 0, -1, 1, 0, 0, 2, -1];
        let s2 = [3, 0, 2, 0, -2, 0, 0, 2];
        assert_eq!(l2_norm(&s1, &s2), Ok(29));
        assert_eq!(nks_norm(&s1, &s2, 3), Ok(122));
        assert_eq!(nks_norm(&s1, &s2, 3), nks_norm(&s1, &s2, 3));
    }

    #[test]
    fn test_norms_reject_bad_operands() {
        let mismatch = BlissError::Configuration("polynomial lengths differ");
        assert_eq!(nks_norm(&[1, 0, 0, 0], &[1, 0], 1), Err(mismatch));
        assert_eq!(l2_norm(&[1, 0, 0, 0], &[1, 0]), Err(mismatch));
        assert!(nks_norm(&[i32::MAX; 4], &[0; 4], 2).is_err());
        assert!(l2_norm(&[0; 4], &[i32::MIN; 4]).is_err());
        assert_eq!(nks_norm(&[], &[], 3), Ok(0));
        assert_eq!(l2_norm(&[], &[]), Ok(0));
    }

    #[test]
    fn test_norms_at_coefficient_limit() {
        // t = (2^30, 0, ..., 0) and every rotation keeps that single entry
        let s = [1 << 15; 8];
        let mut s1 = [0i32; 8];
        s1[0] = 1 << 15;
        assert_eq!(l2_norm(&s1, &s1), Ok(1 << 31));
        assert_eq!(l2_norm(&s, &s), Ok(u32::MAX));
        assert_eq!(nks_norm(&s1, &[0; 8], 1), Ok(1 << 30));
    }
}
