use crate::error::BlissError;
use crate::types::{EncodingType, EncryptionScheme, KeyType, SignatureScheme};
use alloc::vec::Vec;
use rand_core::CryptoRngCore;
#[cfg(feature = "default-rng")]
use rand_core::OsRng;


/// The `KeyGen` trait is defined to allow trait objects.
pub trait KeyGen {
    /// A private key specific to the chosen security parameter set, e.g., bliss-i or bliss-iv
    type PrivateKey;

    /// Generates a key pair specific to this security parameter set. <br>
    /// This function utilizes the OS default random number generator.
    /// # Errors
    /// Returns an error when the random number generator fails or every candidate within the
    /// retry bound is rejected.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use bliss_keygen::bliss_i; // Could also be bliss_iv.
    /// use bliss_keygen::traits::{KeyGen, PrivateKey};
    ///
    /// let sk = bliss_i::KG::try_keygen()?;
    /// assert_eq!(sk.get_keysize(), 128);
    /// # Ok(())}
    /// ```
    #[cfg(feature = "default-rng")]
    fn try_keygen() -> Result<Self::PrivateKey, BlissError> { Self::try_keygen_with_rng(&mut OsRng) }

    /// Generates a key pair specific to this security parameter set. <br>
    /// This function utilizes a supplied random number generator.
    /// # Errors
    /// Returns an error when the random number generator fails or every candidate within the
    /// retry bound is rejected.
    /// # Examples
    /// ```rust
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use bliss_keygen::bliss_iv; // Could also be bliss_i.
    /// use bliss_keygen::traits::{KeyGen, PrivateKey};
    /// use rand_chacha::rand_core::SeedableRng;
    ///
    /// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
    /// let sk = bliss_iv::KG::try_keygen_with_rng(&mut rng)?;
    /// assert_eq!(sk.get_keysize(), 192);
    /// # Ok(())}
    /// ```
    fn try_keygen_with_rng(rng: &mut impl CryptoRngCore) -> Result<Self::PrivateKey, BlissError>;

    /// Deterministically generates a key pair from a 32-byte seed, expanded with SHAKE256.
    /// # Errors
    /// Returns an error when every candidate within the retry bound is rejected.
    fn keygen_from_seed(seed: &[u8; 32]) -> Result<Self::PrivateKey, BlissError>;
}


/// The capabilities every private key exposes to the surrounding credential layer. Operations
/// a key algorithm does not provide fail explicitly.
pub trait PrivateKey {
    /// Matching public key type.
    type PublicKey: PublicKey;

    /// Key algorithm.
    fn get_type(&self) -> KeyType;

    /// Security strength in bits.
    fn get_keysize(&self) -> u32;

    /// Signs a message digest.
    /// # Errors
    /// Returns `UnsupportedScheme` for schemes the key cannot produce.
    fn sign(&self, scheme: SignatureScheme, digest: &[u8]) -> Result<Vec<u8>, BlissError>;

    /// Decrypts a ciphertext.
    /// # Errors
    /// Returns `UnsupportedOperation` for key types that cannot decrypt.
    fn decrypt(&self, scheme: EncryptionScheme, crypto: &[u8]) -> Result<Vec<u8>, BlissError>;

    /// Derives the matching public key, when available.
    fn get_public_key(&self) -> Option<Self::PublicKey>;

    /// Serializes the key in the requested encoding.
    /// # Errors
    /// Returns an error when the encoding is not available for this key.
    fn get_encoding(&self, encoding: EncodingType) -> Result<Vec<u8>, BlissError>;

    /// SHA-256 fingerprint of the requested encoding.
    /// # Errors
    /// Returns an error when the encoding is not available for this key.
    fn get_fingerprint(&self, encoding: EncodingType) -> Result<[u8; 32], BlissError>;

    /// Compares two private keys by their private-key encoding.
    fn equals(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        match (self.get_encoding(EncodingType::PrivateKey), other.get_encoding(EncodingType::PrivateKey)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Checks whether `public` is the public half of this key.
    fn belongs_to(&self, public: &Self::PublicKey) -> bool {
        match (self.get_fingerprint(EncodingType::PublicKey), public.get_fingerprint(EncodingType::PublicKey)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Checks whether `fingerprint` matches any encoding of this key.
    fn has_fingerprint(&self, fingerprint: &[u8]) -> bool {
        [EncodingType::PublicKey, EncodingType::PrivateKey]
            .iter()
            .filter_map(|&encoding| self.get_fingerprint(encoding).ok())
            .any(|fp| fp[..] == *fingerprint)
    }
}


/// The capabilities every public key exposes to the surrounding credential layer.
pub trait PublicKey {
    /// Key algorithm.
    fn get_type(&self) -> KeyType;

    /// Security strength in bits.
    fn get_keysize(&self) -> u32;

    /// Serializes the key in the requested encoding.
    /// # Errors
    /// Returns an error when the encoding is not available for a public key.
    fn get_encoding(&self, encoding: EncodingType) -> Result<Vec<u8>, BlissError>;

    /// SHA-256 fingerprint of the requested encoding.
    /// # Errors
    /// Returns an error when the encoding is not available for a public key.
    fn get_fingerprint(&self, encoding: EncodingType) -> Result<[u8; 32], BlissError>;
}
