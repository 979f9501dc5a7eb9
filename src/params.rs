// This file implements the static BLISS parameter set table and its lookup

use crate::error::BlissError;
use crate::helpers::{ensure, pow_mod};
use core::fmt;


/// Identifiers of the supported BLISS parameter sets, as carried in key encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParameterSetId {
    /// BLISS-I, 128-bit security.
    BlissI = 1,
    /// BLISS-IV, 192-bit security.
    BlissIv = 4,
}

impl ParameterSetId {
    /// The one-byte identifier used in encodings.
    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            ParameterSetId::BlissI => 1,
            ParameterSetId::BlissIv => 4,
        }
    }
}

impl fmt::Display for ParameterSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterSetId::BlissI => f.write_str("BLISS-I"),
            ParameterSetId::BlissIv => f.write_str("BLISS-IV"),
        }
    }
}


/// Configuration of a number-theoretic transform over `Z_q[x]/(x^n+1)`.
#[derive(Debug, PartialEq, Eq)]
pub struct TransformParams {
    /// Transform length; a power of two.
    pub n: usize,
    /// Prime modulus with `q ≡ 1 mod 2n`.
    pub q: u32,
    /// Primitive `2n`-th root of unity modulo `q`.
    pub psi: u32,
}

/// Transform for `n = 512`, `q = 12289`; 49 has multiplicative order 1024 modulo 12289.
pub static NTT_12289_512: TransformParams = TransformParams { n: 512, q: 12289, psi: 49 };


/// A BLISS parameter set.
///
/// `nz1`/`nz2` give the number of secret coefficients of magnitude 1 and 2 respectively, and
/// `l2_max = 5·nz1 + 20·nz2 + 9` is the largest `‖f‖² + ‖2g+1‖²` such a pair can reach.
#[derive(Debug, PartialEq, Eq)]
pub struct ParameterSet {
    /// Parameter set identifier.
    pub id: ParameterSetId,
    /// Security strength in bits, reported as the key size.
    pub strength: u32,
    /// Ring degree; a power of two.
    pub n: usize,
    /// Prime modulus with `q ≡ 1 mod 2n`.
    pub q: u32,
    /// Number of largest values summed in the `Nk(S)` norm.
    pub kappa: usize,
    /// Upper bound on `Nk(S)` for an accepted secret.
    pub nks_max: u32,
    /// Upper bound on the squared Euclidean norm of an accepted secret.
    pub l2_max: u32,
    /// Number of secret coefficients in `{-1, +1}`.
    pub nz1: usize,
    /// Number of secret coefficients in `{-2, +2}`.
    pub nz2: usize,
    /// Matching transform configuration.
    pub transform: &'static TransformParams,
}


/// BLISS-I parameter set.
pub static BLISS_I: ParameterSet = ParameterSet {
    id: ParameterSetId::BlissI,
    strength: 128,
    n: 512,
    q: 12289,
    kappa: 23,
    nks_max: 46479,
    l2_max: 779,
    nz1: 154,
    nz2: 0,
    transform: &NTT_12289_512,
};

/// BLISS-IV parameter set.
pub static BLISS_IV: ParameterSet = ParameterSet {
    id: ParameterSetId::BlissIv,
    strength: 192,
    n: 512,
    q: 12289,
    kappa: 39,
    nks_max: 244_669,
    l2_max: 1784,
    nz1: 231,
    nz2: 31,
    transform: &NTT_12289_512,
};

static PARAMETER_SETS: [&ParameterSet; 2] = [&BLISS_I, &BLISS_IV];


impl ParameterSet {
    /// Resolves a requested strength to its parameter set. Both the BLISS level identifier
    /// (1, 4) and the security strength in bits (128, 192) are accepted.
    ///
    /// # Errors
    /// Returns `UnsupportedParameter` when no parameter set matches.
    pub fn lookup(strength: u32) -> Result<&'static ParameterSet, BlissError> {
        PARAMETER_SETS
            .iter()
            .copied()
            .find(|set| u32::from(set.id.as_u8()) == strength || set.strength == strength)
            .ok_or(BlissError::UnsupportedParameter(strength))
    }


    /// Resolves the one-byte identifier found in an encoding.
    ///
    /// # Errors
    /// Returns `UnsupportedParameter` for an unknown identifier.
    pub fn from_id(id: u8) -> Result<&'static ParameterSet, BlissError> {
        PARAMETER_SETS
            .iter()
            .copied()
            .find(|set| set.id.as_u8() == id)
            .ok_or(BlissError::UnsupportedParameter(u32::from(id)))
    }


    /// Checks that the transform configuration agrees with the ring parameters and that the
    /// remaining constants are usable by the key generator.
    ///
    /// # Errors
    /// Returns a configuration error describing the first inconsistency found.
    pub fn check(&self) -> Result<(), BlissError> {
        ensure!(
            self.transform.n == self.n && self.transform.q == self.q,
            BlissError::Configuration("transform parameters do not match BLISS parameters")
        );
        ensure!(
            self.n >= 2 && self.n.is_power_of_two(),
            BlissError::Configuration("ring degree must be a power of two")
        );
        ensure!(
            u64::from(self.q - 1) % (2 * self.n as u64) == 0,
            BlissError::Configuration("modulus is not 1 mod 2n")
        );
        ensure!(self.q <= u32::from(u16::MAX), BlissError::Configuration("modulus exceeds 16 bits"));
        ensure!(
            self.kappa >= 1 && self.kappa <= self.n,
            BlissError::Configuration("kappa out of range")
        );
        ensure!(self.nz1 + self.nz2 <= self.n, BlissError::Configuration("secret density too high"));
        ensure!(
            pow_mod(self.transform.psi, self.n, self.q) == self.q - 1,
            BlissError::Configuration("psi is not a primitive 2n-th root of unity")
        );
        Ok(())
    }


    /// Length in bytes of an encoded private key.
    #[must_use]
    pub fn private_key_len(&self) -> usize { 1 + 4 * self.n }


    /// Length in bytes of an encoded public key.
    #[must_use]
    pub fn public_key_len(&self) -> usize { 1 + 2 * self.n }
}
