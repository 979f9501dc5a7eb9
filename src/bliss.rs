// This file implements BLISS key generation, key loading and the key capability traits

use crate::encodings::{pk_decode, pk_encode, sk_decode, sk_encode, SECRET_BOUND};
use crate::error::BlissError;
use crate::helpers::{ensure, invert, lift};
use crate::norms::{norm_l2, norm_nks};
use crate::ntt::Ntt;
use crate::params::ParameterSet;
use crate::sampling::{SecretSampler, XofRng};
use crate::traits;
use crate::types::{
    BlissPrivateKey, BlissPublicKey, EncodingType, EncryptionScheme, KeyType, Keypair,
    SignatureScheme,
};
use alloc::vec::Vec;
use log::{debug, trace, warn};
use rand_core::CryptoRngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;


/// Default number of candidates sampled before key generation gives up.
///
/// Roughly one candidate in four or five passes both norm gates, so the default bound makes
/// exhaustion with a working sampler vanishingly unlikely.
pub const MAX_KEYGEN_ATTEMPTS: u32 = 128;


/// Runtime knobs of the key generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyGenConfig {
    /// Number of candidates sampled before failing with `KeyGenerationExhausted`.
    pub max_attempts: u32,
}

impl Default for KeyGenConfig {
    fn default() -> Self { KeyGenConfig { max_attempts: MAX_KEYGEN_ATTEMPTS } }
}


/// Generates a BLISS key pair for `params`, drawing candidate secrets from `sampler` until one
/// passes the norm gates and has an invertible `f`.
///
/// **Input**: parameter set, secret sampler, random number generator, retry configuration. <br>
/// **Output**: reference-counted private key holding `(f, g, a)` with `f·a ≡ 2g + 1`.
///
/// # Errors
/// Returns `Configuration` for inconsistent parameters or a misbehaving sampler, `Rng` when
/// the random number generator fails and `KeyGenerationExhausted` when every candidate within
/// the retry bound is rejected.
pub(crate) fn key_gen(
    params: &'static ParameterSet, sampler: &mut impl SecretSampler, rng: &mut impl CryptoRngCore,
    config: &KeyGenConfig,
) -> Result<BlissPrivateKey, BlissError> {
    //
    // 1: check the parameter set and bring up its transform engine
    params.check()?;
    ensure!(config.max_attempts > 0, BlissError::Configuration("retry bound must be positive"));
    let mut ntt = Ntt::new(params.transform, params.n, params.q)?;

    for attempt in 1..=config.max_attempts {
        //
        // 2: (f, g) ← sampler
        let (f, g) = sampler.try_sample(params, rng)?;
        let (f, g) = (Zeroizing::new(f), Zeroizing::new(g));
        ensure!(
            in_profile(params, &f) && in_profile(params, &g),
            BlissError::Configuration("sampler returned a malformed candidate")
        );

        // 3-6: norm gates, a ← (2g + 1)/f
        match derive_public(params, &mut ntt, &f, &g) {
            Ok(a) => {
                // 7: package (f, g, a); coefficients were range checked above
                #[allow(clippy::cast_possible_truncation)]
                let keypair = Keypair {
                    f: f.iter().map(|&c| c as i8).collect(),
                    g: g.iter().map(|&c| c as i8).collect(),
                    a,
                    params,
                };
                debug!("{} key generated after {attempt} attempt(s)", params.id);
                trace!("{} public key a = {:?}", params.id, keypair.a);
                return Ok(BlissPrivateKey::new(keypair));
            }
            Err(err) if err.is_rejection() => {
                debug!("{} candidate {attempt} rejected: {err}", params.id);
            }
            Err(err) => return Err(err),
        }
    }

    warn!("{} key generation exhausted after {} attempts", params.id, config.max_attempts);
    Err(BlissError::KeyGenerationExhausted { attempts: config.max_attempts })
}


/// Deterministic key generation: the 32-byte seed is expanded with SHAKE256, domain separated
/// by the parameter set identifier, and drives `sampler`.
pub(crate) fn key_gen_from_seed(
    params: &'static ParameterSet, sampler: &mut impl SecretSampler, seed: &[u8; 32],
    config: &KeyGenConfig,
) -> Result<BlissPrivateKey, BlissError> {
    let mut rng = XofRng::new(&[b"BLISS key generation", &[params.id.as_u8()], seed]);
    key_gen(params, sampler, &mut rng, config)
}


/// Evaluates one candidate: rejects it when `(f, 2g + 1)` exceeds a norm bound or `f` is not
/// invertible, otherwise returns the public polynomial `a = (2g + 1)/f`.
///
/// # Errors
/// Returns `NormBoundExceeded` or `NonInvertible` for a rejected candidate.
pub(crate) fn derive_public(
    params: &ParameterSet, ntt: &mut Ntt, f: &[i32], g: &[i32],
) -> Result<Vec<u16>, BlissError> {
    let q = params.q;

    // g' ← 2g + 1
    let mut g1: Zeroizing<Vec<i32>> = Zeroizing::new(g.iter().map(|&c| 2 * c).collect());
    g1[0] += 1;

    // 3: reject secrets outside the L2 and Nk(S) bounds
    let l2 = norm_l2(f, &g1);
    let nks = norm_nks(f, &g1, params.kappa);
    ensure!(l2 <= params.l2_max && nks <= params.nks_max, BlissError::NormBoundExceeded { l2, nks });

    // 4: F ← NTT(f), A ← NTT(g')
    let mut f_hat: Zeroizing<Vec<u32>> = Zeroizing::new(f.iter().map(|&c| lift(c, q)).collect());
    let mut a_hat: Zeroizing<Vec<u32>> = Zeroizing::new(g1.iter().map(|&c| lift(c, q)).collect());
    ntt.transform_in_place(&mut f_hat, false)?;
    ntt.transform_in_place(&mut a_hat, false)?;

    // 5: A[i] ← A[i]·F[i]^{-1}, rejecting f with a zero evaluation
    for (a, &f_i) in a_hat.iter_mut().zip(f_hat.iter()) {
        let f_inv = invert(f_i, q)?;
        *a = mul_mod(*a, f_inv, q);
    }

    // 6: a ← NTT^{-1}(A)
    ntt.transform_in_place(&mut a_hat, true)?;
    #[allow(clippy::cast_possible_truncation)] // q fits in 16 bits
    let a = a_hat.iter().map(|&c| c as u16).collect();
    debug!("{} candidate accepted (L2: {l2}, Nk(S): {nks})", params.id);
    Ok(a)
}


/// Loads a private key from its `EncodingType::PrivateKey` encoding.
///
/// Beyond the layout checks of the decoder, the secret must pass the same L2 and `Nk(S)` gates
/// as a freshly generated one and the public polynomial must satisfy `f·a ≡ 2g + 1`.
pub(crate) fn load(blob: &[u8]) -> Result<BlissPrivateKey, BlissError> {
    let keypair = sk_decode(blob)?;
    let params = keypair.params;
    let q = params.q;

    let f: Zeroizing<Vec<i32>> = Zeroizing::new(keypair.f.iter().map(|&c| i32::from(c)).collect());
    let mut g1: Zeroizing<Vec<i32>> =
        Zeroizing::new(keypair.g.iter().map(|&c| 2 * i32::from(c)).collect());
    g1[0] += 1;
    ensure!(
        norm_l2(&f, &g1) <= params.l2_max && norm_nks(&f, &g1, params.kappa) <= params.nks_max,
        BlissError::Decoding("secret key norm out of bounds")
    );

    let mut ntt = Ntt::new(params.transform, params.n, q)?;
    let f_lifted: Zeroizing<Vec<u32>> = Zeroizing::new(f.iter().map(|&c| lift(c, q)).collect());
    let a: Vec<u32> = keypair.a.iter().map(|&c| u32::from(c)).collect();
    let fa = Zeroizing::new(ntt.multiply(&f_lifted, &a)?);
    ensure!(
        fa.iter().zip(g1.iter()).all(|(&x, &y)| x == lift(y, q)),
        BlissError::Decoding("public key does not match secret key")
    );

    debug!("{} private key loaded", params.id);
    Ok(BlissPrivateKey::new(keypair))
}


/// Loads a public key from its `EncodingType::PublicKey` encoding.
pub(crate) fn load_public(blob: &[u8]) -> Result<BlissPublicKey, BlissError> { pk_decode(blob) }


fn in_profile(params: &ParameterSet, poly: &[i32]) -> bool {
    let bound = i32::from(SECRET_BOUND);
    poly.len() == params.n && poly.iter().all(|c| (-bound..=bound).contains(c))
}


#[allow(clippy::cast_possible_truncation)] // reduced mod q
fn mul_mod(x: u32, y: u32, q: u32) -> u32 { (u64::from(x) * u64::from(y) % u64::from(q)) as u32 }


fn fingerprint(encoding: &[u8]) -> [u8; 32] { Sha256::digest(encoding).into() }


impl traits::PrivateKey for BlissPrivateKey {
    type PublicKey = BlissPublicKey;

    fn get_type(&self) -> KeyType { KeyType::Bliss }

    fn get_keysize(&self) -> u32 { self.0.params.strength }

    fn sign(&self, scheme: SignatureScheme, _digest: &[u8]) -> Result<Vec<u8>, BlissError> {
        warn!("signature scheme {scheme:?} not supported with BLISS");
        Err(BlissError::UnsupportedScheme(scheme))
    }

    fn decrypt(&self, _scheme: EncryptionScheme, _crypto: &[u8]) -> Result<Vec<u8>, BlissError> {
        warn!("encryption scheme not supported");
        Err(BlissError::UnsupportedOperation("decryption"))
    }

    fn get_public_key(&self) -> Option<BlissPublicKey> {
        Some(BlissPublicKey { a: self.0.a.clone(), params: self.0.params })
    }

    fn get_encoding(&self, encoding: EncodingType) -> Result<Vec<u8>, BlissError> {
        Ok(match encoding {
            EncodingType::PrivateKey => sk_encode(&self.0),
            EncodingType::PublicKey => pk_encode(self.0.params, &self.0.a),
        })
    }

    fn get_fingerprint(&self, encoding: EncodingType) -> Result<[u8; 32], BlissError> {
        let encoded = Zeroizing::new(self.get_encoding(encoding)?);
        Ok(fingerprint(&encoded))
    }
}


impl traits::PublicKey for BlissPublicKey {
    fn get_type(&self) -> KeyType { KeyType::Bliss }

    fn get_keysize(&self) -> u32 { self.params.strength }

    fn get_encoding(&self, encoding: EncodingType) -> Result<Vec<u8>, BlissError> {
        match encoding {
            EncodingType::PublicKey => Ok(pk_encode(self.params, &self.a)),
            EncodingType::PrivateKey => {
                Err(BlissError::UnsupportedOperation("private key encoding of a public key"))
            }
        }
    }

    fn get_fingerprint(&self, encoding: EncodingType) -> Result<[u8; 32], BlissError> {
        Ok(fingerprint(&self.get_encoding(encoding)?))
    }
}
