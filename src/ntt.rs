// This file implements the forward and inverse number-theoretic transform over Z_q[x]/(x^n+1)

use crate::error::BlissError;
use crate::helpers::{bit_rev, ensure, invert, pow_mod};
use crate::params::TransformParams;
use alloc::vec;
use alloc::vec::Vec;
use zeroize::{Zeroize, ZeroizeOnDrop};


/// Negacyclic number-theoretic transform engine for one `(n, q)` configuration.
///
/// The forward transform takes coefficients in normal order and produces evaluations at the
/// odd powers of `psi` in bit-reversed order; the inverse undoes it including the `n^{-1}`
/// scaling. Pointwise products in the transform domain are negacyclic convolutions in the
/// coefficient domain. All state (the twiddle table and the scratch buffer) belongs to this
/// instance and is wiped when it is dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Ntt {
    n: usize,
    q: u32,
    n_inv: u32,
    zetas: Vec<u32>,
    scratch: Vec<u32>,
}


impl Ntt {
    /// Builds a transform engine for ring degree `n` and modulus `q` from `params`.
    ///
    /// # Errors
    /// Returns a configuration error when `params` do not describe `(n, q)`, `n` is not a
    /// power of two, `q ≢ 1 (mod 2n)` or `psi` is not a primitive `2n`-th root of unity.
    pub fn new(params: &TransformParams, n: usize, q: u32) -> Result<Self, BlissError> {
        ensure!(
            params.n == n && params.q == q,
            BlissError::Configuration("transform parameters do not match ring degree/modulus")
        );
        ensure!(n >= 2 && n.is_power_of_two(), BlissError::Configuration("n must be a power of two"));
        ensure!(
            q >= 3 && u64::from(q - 1) % (2 * n as u64) == 0,
            BlissError::Configuration("q must be 1 mod 2n")
        );
        ensure!(
            pow_mod(params.psi, n, q) == q - 1,
            BlissError::Configuration("psi is not a primitive 2n-th root of unity")
        );

        // zeta[k] ← psi^{brv(k)} mod q
        let bits = n.trailing_zeros();
        let zetas = (0..n).map(|k| pow_mod(params.psi, bit_rev(k, bits), q)).collect();
        #[allow(clippy::cast_possible_truncation)] // n < q
        let n_inv = invert(n as u32, q)?;

        Ok(Ntt { n, q, n_inv, zetas, scratch: vec![0u32; n] })
    }


    /// Transform length.
    #[must_use]
    pub fn len(&self) -> usize { self.n }


    /// Always `false`; an engine has at least two points.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.n == 0 }


    /// Modulus.
    #[must_use]
    pub fn modulus(&self) -> u32 { self.q }


    /// Transforms `input` into `output`; forward when `inverse` is `false`.
    ///
    /// Inputs are reduced modulo `q` first, outputs lie in `[0, q)`.
    ///
    /// # Errors
    /// Returns a configuration error when either slice is not `n` long.
    pub fn transform(
        &mut self, input: &[u32], output: &mut [u32], inverse: bool,
    ) -> Result<(), BlissError> {
        ensure!(
            input.len() == self.n && output.len() == self.n,
            BlissError::Configuration("polynomial length does not match transform size")
        );
        output.copy_from_slice(input);
        self.transform_in_place(output, inverse)
    }


    /// Transforms `w` in place; forward when `inverse` is `false`.
    ///
    /// # Errors
    /// Returns a configuration error when `w` is not `n` long.
    pub fn transform_in_place(&mut self, w: &mut [u32], inverse: bool) -> Result<(), BlissError> {
        ensure!(
            w.len() == self.n,
            BlissError::Configuration("polynomial length does not match transform size")
        );
        let q = self.q;
        w.iter_mut().for_each(|c| *c %= q);
        if inverse {
            inv_ntt(w, &self.zetas, q, self.n_inv);
        } else {
            ntt(w, &self.zetas, q);
        }
        Ok(())
    }


    /// Negacyclic product `x·y mod (x^n+1, q)` of two unsigned polynomials.
    ///
    /// # Errors
    /// Returns a configuration error when either polynomial is not `n` long.
    #[allow(clippy::cast_possible_truncation)] // reduced mod q
    pub fn multiply(&mut self, x: &[u32], y: &[u32]) -> Result<Vec<u32>, BlissError> {
        let mut product = vec![0u32; self.n];
        self.transform(x, &mut product, false)?;
        let mut y_hat = core::mem::take(&mut self.scratch);
        let result = self.transform(y, &mut y_hat, false);
        if result.is_ok() {
            let q = u64::from(self.q);
            for (p, y) in product.iter_mut().zip(&y_hat) {
                *p = (u64::from(*p) * u64::from(*y) % q) as u32;
            }
        }
        y_hat.as_mut_slice().zeroize();
        self.scratch = y_hat;
        result?;
        self.transform_in_place(&mut product, true)?;
        Ok(product)
    }
}


/// Cooley-Tukey forward transform; normal order in, bit-reversed order out.
#[allow(clippy::cast_possible_truncation)] // reduced mod q
fn ntt(w: &mut [u32], zetas: &[u32], q: u32) {
    let n = w.len();
    let q = u64::from(q);
    let mut m = 0;
    let mut len = n / 2;
    while len >= 1 {
        let mut start = 0;
        while start < n {
            m += 1;
            let zeta = u64::from(zetas[m]);
            for j in start..(start + len) {
                let t = zeta * u64::from(w[j + len]) % q;
                let u = u64::from(w[j]);
                w[j + len] = ((u + q - t) % q) as u32;
                w[j] = ((u + t) % q) as u32;
            }
            start += 2 * len;
        }
        len >>= 1;
    }
}


/// Gentleman-Sande inverse transform; bit-reversed order in, normal order out, scaled by `n^{-1}`.
#[allow(clippy::cast_possible_truncation)] // reduced mod q
fn inv_ntt(w: &mut [u32], zetas: &[u32], q: u32, n_inv: u32) {
    let n = w.len();
    let q = u64::from(q);
    let mut m = n;
    let mut len = 1;
    while len < n {
        let mut start = 0;
        while start < n {
            m -= 1;
            let zeta = q - u64::from(zetas[m]);
            for j in start..(start + len) {
                let t = u64::from(w[j]);
                let u = u64::from(w[j + len]);
                w[j] = ((t + u) % q) as u32;
                w[j + len] = (zeta * ((t + q - u) % q) % q) as u32;
            }
            start += 2 * len;
        }
        len <<= 1;
    }
    let n_inv = u64::from(n_inv);
    for c in w.iter_mut() {
        *c = (u64::from(*c) * n_inv % q) as u32;
    }
}
