// This file implements the private and public key encodings
//
// private key: id (1 byte) || f (n × i8) || g (n × i8) || a (n × u16 little-endian)
// public key:  id (1 byte) || a (n × u16 little-endian)

use crate::error::BlissError;
use crate::helpers::ensure;
use crate::params::ParameterSet;
use crate::types::{BlissPublicKey, Keypair};
use alloc::vec::Vec;


/// Largest magnitude of a coefficient of `f` or `g`.
pub(crate) const SECRET_BOUND: i8 = 2;


/// Encodes a key pair. The output holds secret material; callers wipe it when done.
pub(crate) fn sk_encode(kp: &Keypair) -> Vec<u8> {
    let n = kp.params.n;
    debug_assert!(kp.f.len() == n && kp.g.len() == n && kp.a.len() == n, "sk_encode: bad sizes");
    let mut sk = Vec::with_capacity(kp.params.private_key_len());
    sk.push(kp.params.id.as_u8());
    sk.extend(kp.f.iter().chain(&kp.g).map(|c| c.to_le_bytes()[0]));
    sk.extend(kp.a.iter().flat_map(|c| c.to_le_bytes()));
    sk
}


/// Encodes a public polynomial under its parameter set identifier.
pub(crate) fn pk_encode(params: &ParameterSet, a: &[u16]) -> Vec<u8> {
    debug_assert_eq!(a.len(), params.n, "pk_encode: bad size");
    let mut pk = Vec::with_capacity(params.public_key_len());
    pk.push(params.id.as_u8());
    pk.extend(a.iter().flat_map(|c| c.to_le_bytes()));
    pk
}


/// Decodes a private key blob into a key pair, checking identifier, length and coefficient
/// ranges. The algebraic relation between the polynomials is checked by the caller.
///
/// # Errors
/// Returns `UnsupportedParameter` for an unknown identifier and `Decoding` otherwise.
pub(crate) fn sk_decode(sk: &[u8]) -> Result<Keypair, BlissError> {
    let (&id, body) = sk.split_first().ok_or(BlissError::Decoding("empty private key"))?;
    let params = ParameterSet::from_id(id)?;
    let n = params.n;
    ensure!(sk.len() == params.private_key_len(), BlissError::Decoding("private key length mismatch"));

    let (f, rest) = body.split_at(n);
    let (g, a) = rest.split_at(n);
    // `a` is public; secrets are copied out only once the key pair owns them and wipes them on drop
    let a = decode_public(params, a)?;
    let kp = Keypair {
        f: f.iter().map(|&b| i8::from_le_bytes([b])).collect(),
        g: g.iter().map(|&b| i8::from_le_bytes([b])).collect(),
        a,
        params,
    };
    ensure!(
        kp.f.iter().chain(&kp.g).all(|c| (-SECRET_BOUND..=SECRET_BOUND).contains(c)),
        BlissError::Decoding("secret coefficient out of range")
    );
    Ok(kp)
}


/// Decodes a public key blob.
///
/// # Errors
/// Returns `UnsupportedParameter` for an unknown identifier and `Decoding` otherwise.
pub(crate) fn pk_decode(pk: &[u8]) -> Result<BlissPublicKey, BlissError> {
    let (&id, body) = pk.split_first().ok_or(BlissError::Decoding("empty public key"))?;
    let params = ParameterSet::from_id(id)?;
    ensure!(pk.len() == params.public_key_len(), BlissError::Decoding("public key length mismatch"));
    Ok(BlissPublicKey { a: decode_public(params, body)?, params })
}


fn decode_public(params: &ParameterSet, bytes: &[u8]) -> Result<Vec<u16>, BlissError> {
    debug_assert_eq!(bytes.len(), 2 * params.n, "decode_public: bad size");
    let a: Vec<u16> = bytes.chunks_exact(2).map(|c| u16::from_le_bytes([c[0], c[1]])).collect();
    ensure!(
        a.iter().all(|&c| u32::from(c) < params.q),
        BlissError::Decoding("public coefficient not below modulus")
    );
    Ok(a)
}
