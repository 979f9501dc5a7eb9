#![no_main]
use bliss_keygen::traits::{PrivateKey, PublicKey};
use bliss_keygen::EncodingType;
use libfuzzer_sys::fuzz_target;


fuzz_target!(|data: &[u8]| {
    // Arbitrary blobs must never panic; whatever loads must re-encode to the same bytes
    if let Ok(sk) = bliss_keygen::load(data) {
        assert_eq!(sk.get_encoding(EncodingType::PrivateKey).unwrap(), data);
        let pk = sk.get_public_key().unwrap();
        assert!(sk.belongs_to(&pk));
    }
    if let Ok(pk) = bliss_keygen::load_public(data) {
        assert_eq!(pk.get_encoding(EncodingType::PublicKey).unwrap(), data);
    }

    // Mutate a valid key with the fuzz input; the result either loads consistently or fails
    let sk = bliss_keygen::keygen_from_seed(1, &[42u8; 32]).unwrap();
    let mut blob = sk.get_encoding(EncodingType::PrivateKey).unwrap();
    for (i, &b) in data.iter().enumerate().take(16) {
        let idx = (usize::from(b) * 131 + i * 127) % blob.len();
        blob[idx] ^= b;
    }
    if let Ok(loaded) = bliss_keygen::load(&blob) {
        assert_eq!(loaded.get_encoding(EncodingType::PrivateKey).unwrap(), blob);
    }
});
