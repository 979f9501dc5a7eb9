// This file implements sampling of the short secret polynomials and the SHAKE256-based
// generator used for deterministic key generation from a seed

use crate::error::BlissError;
use crate::helpers::ensure;
use crate::params::ParameterSet;
use alloc::vec;
use alloc::vec::Vec;
use rand_core::{CryptoRng, CryptoRngCore, RngCore};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake256, Shake256Reader};


/// Source of candidate secret pairs `(f, g)` for the key generator.
///
/// Implementations must return two signed polynomials of length `params.n` with coefficients
/// in `[-2, 2]`. The key generator evaluates and may reject every candidate, so a sampler
/// need not enforce the norm bounds itself.
pub trait SecretSampler {
    /// Draws one candidate pair.
    /// # Errors
    /// Returns an error when the random number generator fails.
    fn try_sample(
        &mut self, params: &ParameterSet, rng: &mut impl CryptoRngCore,
    ) -> Result<(Vec<i32>, Vec<i32>), BlissError>;
}


/// The BLISS secret distribution: each polynomial has exactly `nz2` coefficients in `{±2}` and
/// `nz1` coefficients in `{±1}` at uniformly random distinct positions, with uniform signs.
#[derive(Clone, Copy, Debug, Default)]
pub struct SparseTernarySampler;


impl SecretSampler for SparseTernarySampler {
    fn try_sample(
        &mut self, params: &ParameterSet, rng: &mut impl CryptoRngCore,
    ) -> Result<(Vec<i32>, Vec<i32>), BlissError> {
        let f = sparse_poly(params, rng)?;
        let g = sparse_poly(params, rng)?;
        Ok((f, g))
    }
}


fn sparse_poly(params: &ParameterSet, rng: &mut impl CryptoRngCore) -> Result<Vec<i32>, BlissError> {
    let mut poly = vec![0i32; params.n];
    place(&mut poly, params.nz2, 2, rng)?;
    place(&mut poly, params.nz1, 1, rng)?;
    Ok(poly)
}


/// Sets `count` currently-zero coefficients of `poly` to `±magnitude`. Positions come from
/// the low bits of 32-bit draws, which is unbiased because `n` is a power of two.
fn place(
    poly: &mut [i32], count: usize, magnitude: i32, rng: &mut impl CryptoRngCore,
) -> Result<(), BlissError> {
    let n = poly.len();
    debug_assert!(n.is_power_of_two(), "place: n must be a power of two");
    ensure!(
        poly.iter().filter(|&&c| c == 0).count() >= count,
        BlissError::Configuration("secret density exceeds ring degree")
    );

    // A working generator fills the slots long before this bound
    let mut draws = 64 * n;
    let mut placed = 0;
    let mut buf = [0u8; 4];
    while placed < count {
        ensure!(draws > 0, BlissError::Rng);
        draws -= 1;
        rng.try_fill_bytes(&mut buf).map_err(|_| BlissError::Rng)?;
        let r = u32::from_le_bytes(buf);
        let idx = (r >> 1) as usize & (n - 1);
        if poly[idx] != 0 {
            continue;
        }
        poly[idx] = if r & 1 == 1 { -magnitude } else { magnitude };
        placed += 1;
    }
    Ok(())
}


/// Cryptographic random number generator backed by the SHAKE256 output stream of a seed.
/// Two instances absorbing the same inputs produce identical streams.
pub struct XofRng(Shake256Reader);


impl XofRng {
    /// Absorbs the concatenation of `parts` and positions the reader at the first output byte.
    #[must_use]
    pub fn new(parts: &[&[u8]]) -> Self {
        let mut hasher = Shake256::default();
        parts.iter().for_each(|b| hasher.update(b));
        XofRng(hasher.finalize_xof())
    }
}


impl RngCore for XofRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.0.read(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.0.read(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) { self.0.read(dest); }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for XofRng {}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{BLISS_I, BLISS_IV};
    use rand_chacha::rand_core::SeedableRng;

    struct StuckRng;

    impl RngCore for StuckRng {
        fn next_u32(&mut self) -> u32 { 0 }

        fn next_u64(&mut self) -> u64 { 0 }

        fn fill_bytes(&mut self, dest: &mut [u8]) { dest.fill(0); }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for StuckRng {}

    fn profile(poly: &[i32]) -> (usize, usize) {
        let ones = poly.iter().filter(|c| c.abs() == 1).count();
        let twos = poly.iter().filter(|c| c.abs() == 2).count();
        (ones, twos)
    }

    #[test]
    fn test_sparse_profile() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
        for params in [&BLISS_I, &BLISS_IV] {
            for _ in 0..8 {
                let (f, g) = SparseTernarySampler.try_sample(params, &mut rng).unwrap();
                assert_eq!(f.len(), params.n);
                assert_eq!(g.len(), params.n);
                assert_eq!(profile(&f), (params.nz1, params.nz2));
                assert_eq!(profile(&g), (params.nz1, params.nz2));
                assert!(f.iter().chain(&g).all(|c| c.abs() <= 2));
            }
        }
    }

    #[test]
    fn test_stuck_rng_is_reported() {
        assert_eq!(SparseTernarySampler.try_sample(&BLISS_I, &mut StuckRng), Err(BlissError::Rng));
    }

    #[test]
    fn test_xof_rng_deterministic() {
        let mut a = XofRng::new(&[b"seed", &[1]]);
        let mut b = XofRng::new(&[b"seed", &[1]]);
        let mut c = XofRng::new(&[b"seed", &[4]]);
        let (x, y, z) = (a.next_u64(), b.next_u64(), c.next_u64());
        assert_eq!(x, y);
        assert_ne!(x, z);
        assert_eq!(
            SparseTernarySampler.try_sample(&BLISS_IV, &mut a).unwrap(),
            SparseTernarySampler.try_sample(&BLISS_IV, &mut b).unwrap()
        );
    }
}
