// This file implements the error taxonomy shared by key generation, loading and the key handles

use crate::types::SignatureScheme;
use core::fmt;


/// Errors reported by key generation, key loading and the private/public key capabilities.
///
/// Candidate rejections (`NormBoundExceeded`, `NonInvertible`) are recovered internally by
/// resampling; callers only see them when a caller-supplied candidate is evaluated directly,
/// or wrapped up as `KeyGenerationExhausted` once the retry bound is hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum BlissError {
    /// The requested strength does not select any parameter set.
    UnsupportedParameter(u32),

    /// A parameter set and its transform parameters disagree, or an engine was
    /// driven with polynomials of the wrong size.
    Configuration(&'static str),

    /// A value (or a transformed candidate coefficient) is zero modulo `q`.
    NonInvertible,

    /// A candidate secret exceeds the L2 or `Nk(S)` bound of its parameter set.
    NormBoundExceeded {
        /// Squared Euclidean norm of `(f, 2g+1)`.
        l2: u32,
        /// `Nk(S)` norm of `(f, 2g+1)`.
        nks: u32,
    },

    /// Every candidate was rejected before the retry bound was reached.
    KeyGenerationExhausted {
        /// Number of candidates that were sampled and rejected.
        attempts: u32,
    },

    /// Signing was requested with a scheme this key type does not provide.
    UnsupportedScheme(SignatureScheme),

    /// The operation is never available for this key type.
    UnsupportedOperation(&'static str),

    /// An encoded key blob is malformed or internally inconsistent.
    Decoding(&'static str),

    /// The random number generator failed.
    Rng,
}


impl BlissError {
    /// Returns `true` for the errors the key generator answers with a resample.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, BlissError::NonInvertible | BlissError::NormBoundExceeded { .. })
    }
}


impl fmt::Display for BlissError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlissError::UnsupportedParameter(strength) => {
                write!(f, "BLISS parameter set {strength} not supported")
            }
            BlissError::Configuration(reason) => write!(f, "configuration error: {reason}"),
            BlissError::NonInvertible => write!(f, "value is not invertible modulo q"),
            BlissError::NormBoundExceeded { l2, nks } => {
                write!(f, "candidate norm out of bounds (L2: {l2}, Nk(S): {nks})")
            }
            BlissError::KeyGenerationExhausted { attempts } => {
                write!(f, "key generation failed after {attempts} attempts")
            }
            BlissError::UnsupportedScheme(scheme) => {
                write!(f, "signature scheme {scheme:?} not supported with BLISS")
            }
            BlissError::UnsupportedOperation(op) => write!(f, "{op} not supported with BLISS"),
            BlissError::Decoding(reason) => write!(f, "decoding error: {reason}"),
            BlissError::Rng => write!(f, "random number generator failed"),
        }
    }
}


#[cfg(feature = "std")]
impl std::error::Error for BlissError {}
