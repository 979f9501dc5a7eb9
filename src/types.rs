use crate::params::ParameterSet;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};


/// Key algorithms known to the private/public key capability traits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum KeyType {
    /// Bimodal Lattice Signature Scheme.
    Bliss,
}


/// Signature schemes a caller may request from a private key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SignatureScheme {
    /// BLISS-I with SHA-256.
    BlissISha256,
    /// BLISS-IV with SHA-384.
    BlissIvSha384,
    /// RSA EMSA-PKCS1 v1.5 with SHA-256.
    RsaEmsaPkcs1Sha256,
    /// ECDSA with SHA-256, DER-encoded signature.
    EcdsaWithSha256Der,
    /// Ed25519.
    Ed25519,
}


/// Encryption schemes a caller may request from a private key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum EncryptionScheme {
    /// RSA PKCS#1 v1.5.
    RsaPkcs1,
    /// RSA OAEP with SHA-256.
    RsaOaepSha256,
}


/// Key encodings produced by `get_encoding()` and hashed by `get_fingerprint()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EncodingType {
    /// `id || f || g || a`: the parameter set identifier, both secret polynomials as `i8`
    /// and the public polynomial as little-endian `u16`.
    PrivateKey,
    /// `id || a`.
    PublicKey,
}


/// An accepted BLISS key pair: secret polynomials `f`, `g` and the public polynomial `a`
/// satisfying `f·a ≡ 2g + 1 (mod q, x^n + 1)`. Immutable once built.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct Keypair {
    pub(crate) f: Vec<i8>,
    pub(crate) g: Vec<i8>,
    pub(crate) a: Vec<u16>,
    #[zeroize(skip)]
    pub(crate) params: &'static ParameterSet,
}


/// Reference-counted handle to a BLISS key pair.
///
/// Handles are cheap to clone and share across threads; the key pair is wiped and freed
/// when the last handle is released. Implements the [`crate::traits::PrivateKey`] trait.
#[derive(Clone)]
pub struct BlissPrivateKey(pub(crate) Arc<Keypair>);


impl BlissPrivateKey {
    pub(crate) fn new(keypair: Keypair) -> Self { BlissPrivateKey(Arc::new(keypair)) }


    /// The parameter set this key was generated for.
    #[must_use]
    pub fn parameter_set(&self) -> &'static ParameterSet { self.0.params }


    /// Secret polynomial `f`.
    #[must_use]
    pub fn f(&self) -> &[i8] { &self.0.f }


    /// Secret polynomial `g`.
    #[must_use]
    pub fn g(&self) -> &[i8] { &self.0.g }


    /// Public polynomial `a = (2g + 1)/f` with coefficients in `[0, q)`.
    #[must_use]
    pub fn a(&self) -> &[u16] { &self.0.a }


    /// Acquires another reference to the same key pair.
    #[must_use]
    pub fn acquire_reference(&self) -> Self { BlissPrivateKey(Arc::clone(&self.0)) }


    /// Releases this reference; the key pair is destroyed with the last one.
    pub fn release(self) { drop(self); }


    /// Number of live references to the key pair.
    #[must_use]
    pub fn ref_count(&self) -> usize { Arc::strong_count(&self.0) }
}


impl fmt::Debug for BlissPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlissPrivateKey").field("parameter_set", &self.0.params.id).finish_non_exhaustive()
    }
}


/// A BLISS public key: the polynomial `a` and its parameter set.
/// Implements the [`crate::traits::PublicKey`] trait.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlissPublicKey {
    pub(crate) a: Vec<u16>,
    pub(crate) params: &'static ParameterSet,
}


impl BlissPublicKey {
    /// The parameter set this key belongs to.
    #[must_use]
    pub fn parameter_set(&self) -> &'static ParameterSet { self.params }


    /// Public polynomial `a` with coefficients in `[0, q)`.
    #[must_use]
    pub fn a(&self) -> &[u16] { &self.a }
}
