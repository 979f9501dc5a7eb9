#![no_std]
#![deny(clippy::pedantic, warnings, missing_docs, unsafe_code)]
// Almost all of the 'allow' category...
#![deny(absolute_paths_not_starting_with_crate, dead_code)]
#![deny(elided_lifetimes_in_paths, explicit_outlives_requirements, keyword_idents)]
#![deny(let_underscore_drop, macro_use_extern_crate, meta_variable_misuse, missing_abi)]
#![deny(non_ascii_idents, rust_2021_incompatible_closure_captures)]
#![deny(rust_2021_incompatible_or_patterns, rust_2021_prefixes_incompatible_syntax)]
#![deny(rust_2021_prelude_collisions, single_use_lifetimes, trivial_casts)]
#![deny(trivial_numeric_casts, unreachable_pub, unsafe_op_in_unsafe_fn, unstable_features)]
#![deny(unused_extern_crates, unused_import_braces, unused_lifetimes, unused_macro_rules)]
#![deny(unused_qualifications, unused_results, variant_size_differences)]
#![allow(clippy::module_name_repetitions)]
//
#![doc = include_str!("../README.md")]


// Implements BLISS (Bimodal Lattice Signature Scheme) key-pair generation over
// Z_q[x]/(x^n+1) with n = 512, q = 12289. See <https://eprint.iacr.org/2013/383>

// Functionality map
//
// Parameter set table and lookup                           --> params.rs
// Negacyclic NTT (forward/inverse) and ring product        --> ntt.rs
// wrapped_product / wrap / lift / modular inversion        --> helpers.rs
// L2 norm and Nk(S) norm                                   --> norms.rs
// Secret sampling and SHAKE256 seed expansion              --> sampling.rs
// Key generation, loading, key capabilities                --> bliss.rs
// Private/public key encodings                             --> encodings.rs
// Key handles, algorithm/scheme identifiers                --> types.rs
// Errors                                                   --> error.rs

// Note that debug_assert! statements enforce correct program construction and are not involved
// in any operational dataflow. The ensure! statements implement conservative dataflow
// validation and do not panic.

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// The `rand_core` types are re-exported so that users of bliss-keygen do not
/// have to worry about using the exact correct version of `rand_core`.
pub use rand_core::{CryptoRng, Error as RngError, RngCore};

mod bliss;
mod encodings;
mod error;
mod helpers;
mod norms;
mod ntt;
mod params;
mod sampling;
mod types;

/// All functionality is covered by traits, such that consumers can utilize trait objects as desired.
pub mod traits;

pub use crate::bliss::{KeyGenConfig, MAX_KEYGEN_ATTEMPTS};
pub use crate::error::BlissError;
pub use crate::helpers::{invert, lift, wrap, wrapped_product};
pub use crate::norms::{l2_norm, nks_norm};
pub use crate::ntt::Ntt;
pub use crate::params::{
    ParameterSet, ParameterSetId, TransformParams, BLISS_I, BLISS_IV, NTT_12289_512,
};
pub use crate::sampling::{SecretSampler, SparseTernarySampler, XofRng};
pub use crate::types::{
    BlissPrivateKey, BlissPublicKey, EncodingType, EncryptionScheme, KeyType, SignatureScheme,
};

use rand_core::CryptoRngCore;


/// Generates a BLISS key pair of the requested strength using the OS random number generator.
///
/// `strength` is either the BLISS level (1, 4) or the security strength in bits (128, 192).
///
/// # Errors
/// Returns `UnsupportedParameter` for an unknown strength, `Rng` when the random number
/// generator fails and `KeyGenerationExhausted` when every candidate is rejected.
///
/// # Examples
/// ```rust
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use bliss_keygen::traits::PrivateKey;
///
/// let sk = bliss_keygen::generate(192)?;
/// assert_eq!(sk.get_keysize(), 192);
/// assert!(bliss_keygen::generate(256).is_err());
/// # Ok(())}
/// ```
#[cfg(feature = "default-rng")]
pub fn generate(strength: u32) -> Result<BlissPrivateKey, BlissError> {
    generate_with_rng(strength, &mut rand_core::OsRng)
}


/// Generates a BLISS key pair of the requested strength using the supplied random number
/// generator and the [`SparseTernarySampler`].
///
/// # Errors
/// Returns `UnsupportedParameter` for an unknown strength, `Rng` when the random number
/// generator fails and `KeyGenerationExhausted` when every candidate is rejected.
pub fn generate_with_rng(
    strength: u32, rng: &mut impl CryptoRngCore,
) -> Result<BlissPrivateKey, BlissError> {
    generate_with(strength, &mut SparseTernarySampler, rng, &KeyGenConfig::default())
}


/// Generates a BLISS key pair with a caller-supplied secret sampler and retry configuration.
///
/// # Errors
/// Returns `UnsupportedParameter` for an unknown strength, `Configuration` for inconsistent
/// parameters or a sampler producing malformed candidates, `Rng` when the random number
/// generator fails and `KeyGenerationExhausted` when every candidate is rejected.
pub fn generate_with(
    strength: u32, sampler: &mut impl SecretSampler, rng: &mut impl CryptoRngCore,
    config: &KeyGenConfig,
) -> Result<BlissPrivateKey, BlissError> {
    let params = ParameterSet::lookup(strength)?;
    bliss::key_gen(params, sampler, rng, config)
}


/// Deterministically generates a BLISS key pair from a 32-byte seed.
///
/// # Errors
/// Returns `UnsupportedParameter` for an unknown strength and `KeyGenerationExhausted` when
/// every candidate is rejected.
pub fn keygen_from_seed(strength: u32, seed: &[u8; 32]) -> Result<BlissPrivateKey, BlissError> {
    let params = ParameterSet::lookup(strength)?;
    bliss::key_gen_from_seed(params, &mut SparseTernarySampler, seed, &KeyGenConfig::default())
}


/// Loads a private key from its [`EncodingType::PrivateKey`] encoding, validating its layout,
/// coefficient ranges and the relation between the secret and public polynomials.
///
/// # Errors
/// Returns `UnsupportedParameter` for an unknown parameter set identifier and `Decoding` for
/// any malformed or inconsistent blob.
pub fn load(blob: &[u8]) -> Result<BlissPrivateKey, BlissError> { bliss::load(blob) }


/// Loads a public key from its [`EncodingType::PublicKey`] encoding.
///
/// # Errors
/// Returns `UnsupportedParameter` for an unknown parameter set identifier and `Decoding` for
/// a malformed blob.
pub fn load_public(blob: &[u8]) -> Result<BlissPublicKey, BlissError> { bliss::load_public(blob) }


// This common functionality is injected into each security parameter set namespace, and is
// a lightweight wrapper into the bliss functions.
macro_rules! functionality {
    () => {
        use crate::bliss;
        use crate::sampling::SparseTernarySampler;
        use crate::traits::KeyGen;
        use crate::types::BlissPrivateKey;
        use crate::{BlissError, KeyGenConfig};
        use rand_core::CryptoRngCore;
        use zeroize::{Zeroize, ZeroizeOnDrop};


        /// Empty struct to enable `KeyGen` trait objects across security parameter
        /// sets. Implements the [`crate::traits::KeyGen`] trait.
        #[derive(Zeroize, ZeroizeOnDrop)]
        pub struct KG();


        /// Generates a key pair specific to this security parameter set using the default OS
        /// random number generator.
        ///
        /// # Errors
        /// Returns an error when the random number generator fails or every candidate within
        /// the retry bound is rejected.
        #[cfg(feature = "default-rng")]
        pub fn try_keygen() -> Result<BlissPrivateKey, BlissError> { KG::try_keygen() }


        /// Generates a key pair specific to this security parameter set using the provided
        /// random number generator.
        ///
        /// # Errors
        /// Returns an error when the random number generator fails or every candidate within
        /// the retry bound is rejected.
        pub fn try_keygen_with_rng(rng: &mut impl CryptoRngCore) -> Result<BlissPrivateKey, BlissError> {
            KG::try_keygen_with_rng(rng)
        }


        impl KeyGen for KG {
            type PrivateKey = BlissPrivateKey;

            fn try_keygen_with_rng(rng: &mut impl CryptoRngCore) -> Result<BlissPrivateKey, BlissError> {
                bliss::key_gen(PARAMS, &mut SparseTernarySampler, rng, &KeyGenConfig::default())
            }

            fn keygen_from_seed(seed: &[u8; 32]) -> Result<BlissPrivateKey, BlissError> {
                bliss::key_gen_from_seed(PARAMS, &mut SparseTernarySampler, seed, &KeyGenConfig::default())
            }
        }


    };
}


/// # Functionality for the **BLISS-I** security parameter set.
///
/// Ring degree 512, modulus 12289, ternary secrets with 154 non-zero coefficients, claimed
/// 128-bit security. Start with [`bliss_i::try_keygen`] to obtain a [`BlissPrivateKey`]; its
/// [`traits::PrivateKey`] implementation provides encodings, fingerprints and the public key.
#[cfg(feature = "bliss-i")]
pub mod bliss_i {
    use crate::params::ParameterSet;

    /// The BLISS-I parameter set.
    pub static PARAMS: &ParameterSet = &crate::params::BLISS_I;

    functionality!();
}


/// # Functionality for the **BLISS-IV** security parameter set.
///
/// Ring degree 512, modulus 12289, secrets with 231 coefficients in `{±1}` and 31 in `{±2}`,
/// claimed 192-bit security. Start with [`bliss_iv::try_keygen`] to obtain a
/// [`BlissPrivateKey`]; its [`traits::PrivateKey`] implementation provides encodings,
/// fingerprints and the public key.
#[cfg(feature = "bliss-iv")]
pub mod bliss_iv {
    use crate::params::ParameterSet;

    /// The BLISS-IV parameter set.
    pub static PARAMS: &ParameterSet = &crate::params::BLISS_IV;

    functionality!();
}
