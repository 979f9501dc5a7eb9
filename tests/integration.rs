use bliss_keygen::traits::{KeyGen, PrivateKey, PublicKey};
use bliss_keygen::{
    bliss_i, bliss_iv, l2_norm, lift, nks_norm, BlissError, BlissPrivateKey, EncodingType,
    KeyGenConfig, Ntt, ParameterSet, SecretSampler, SparseTernarySampler, NTT_12289_512,
};
use rand_chacha::rand_core::SeedableRng;
use rand_core::{CryptoRngCore, RngCore};
use serde_json::Value;
use std::thread;

const FIXTURES: &str = include_str!("vectors/fixtures.json");

struct Fixture {
    strength: u32,
    kappa: usize,
    f: Vec<i32>,
    g: Vec<i32>,
    a: Vec<u16>,
    l2: u32,
    nks: u32,
    pk_fingerprint: String,
    sk_fingerprint: String,
}

fn fixture(name: &str) -> Fixture {
    let root: Value = serde_json::from_str(FIXTURES).unwrap();
    let v = &root[name];
    let ints = |key: &str| -> Vec<i64> {
        v[key].as_array().unwrap().iter().map(|x| x.as_i64().unwrap()).collect()
    };
    Fixture {
        strength: v["strength"].as_u64().unwrap() as u32,
        kappa: v["kappa"].as_u64().unwrap() as usize,
        f: ints("f").into_iter().map(|x| x as i32).collect(),
        g: ints("g").into_iter().map(|x| x as i32).collect(),
        a: ints("a").into_iter().map(|x| x as u16).collect(),
        l2: v["l2_norm"].as_u64().unwrap() as u32,
        nks: v["nks_norm"].as_u64().unwrap() as u32,
        pk_fingerprint: v["pk_fingerprint"].as_str().unwrap().to_string(),
        sk_fingerprint: v["sk_fingerprint"].as_str().unwrap().to_string(),
    }
}

fn g_prime(g: &[i32]) -> Vec<i32> {
    let mut g1: Vec<i32> = g.iter().map(|c| 2 * c).collect();
    g1[0] += 1;
    g1
}

/// Hands out a fixed list of candidates, in order.
struct FixedSampler {
    candidates: Vec<(Vec<i32>, Vec<i32>)>,
    calls: usize,
}

impl SecretSampler for FixedSampler {
    fn try_sample(
        &mut self, params: &ParameterSet, _rng: &mut impl CryptoRngCore,
    ) -> Result<(Vec<i32>, Vec<i32>), BlissError> {
        let idx = self.calls.min(self.candidates.len() - 1);
        self.calls += 1;
        assert_eq!(self.candidates[idx].0.len(), params.n);
        Ok(self.candidates[idx].clone())
    }
}

fn rng() -> rand_chacha::ChaCha8Rng { rand_chacha::ChaCha8Rng::seed_from_u64(123) }


#[test]
fn test_fixture_norms() {
    for (name, params) in [("bliss_i", bliss_i::PARAMS), ("bliss_iv", bliss_iv::PARAMS)] {
        let fx = fixture(name);
        assert_eq!(fx.kappa, params.kappa);
        let g1 = g_prime(&fx.g);
        assert_eq!(l2_norm(&fx.f, &g1), Ok(fx.l2), "{name}");
        assert_eq!(nks_norm(&fx.f, &g1, fx.kappa), Ok(fx.nks), "{name}");
        assert!(fx.l2 <= params.l2_max && fx.nks <= params.nks_max, "{name}");
    }
}


#[test]
fn test_fixture_keygen() {
    for name in ["bliss_i", "bliss_iv"] {
        let fx = fixture(name);
        let mut sampler = FixedSampler { candidates: vec![(fx.f.clone(), fx.g.clone())], calls: 0 };
        let sk = bliss_keygen::generate_with(fx.strength, &mut sampler, &mut rng(), &KeyGenConfig::default())
            .unwrap();
        assert_eq!(sampler.calls, 1);
        assert_eq!(sk.a(), &fx.a[..], "{name}");

        let fp = sk.get_fingerprint(EncodingType::PublicKey).unwrap();
        assert_eq!(hex::encode(fp), fx.pk_fingerprint, "{name}");
        let fp = sk.get_fingerprint(EncodingType::PrivateKey).unwrap();
        assert_eq!(hex::encode(fp), fx.sk_fingerprint, "{name}");
        assert!(sk.has_fingerprint(&hex::decode(&fx.pk_fingerprint).unwrap()));
        assert!(!sk.has_fingerprint(&[0u8; 32]));

        let pk = sk.get_public_key().unwrap();
        assert_eq!(hex::encode(pk.get_fingerprint(EncodingType::PublicKey).unwrap()), fx.pk_fingerprint);
    }
}


#[test]
fn test_rejected_candidate_is_resampled() {
    let fx = fixture("bliss_i");
    // f = 0 is never invertible; the second candidate is the fixture
    let zero = (vec![0; 512], vec![0; 512]);
    let mut sampler = FixedSampler { candidates: vec![zero, (fx.f.clone(), fx.g.clone())], calls: 0 };
    let sk = bliss_keygen::generate_with(1, &mut sampler, &mut rng(), &KeyGenConfig::default()).unwrap();
    assert_eq!(sampler.calls, 2);
    assert_eq!(sk.a(), &fx.a[..]);
}


#[test]
fn test_public_key_relation() {
    let q = 12289;
    let mut ntt = Ntt::new(&NTT_12289_512, 512, q).unwrap();
    let mut rng = rng();
    for strength in [128, 192] {
        for _ in 0..4 {
            let sk = bliss_keygen::generate_with_rng(strength, &mut rng).unwrap();
            let f: Vec<u32> = sk.f().iter().map(|&c| lift(i32::from(c), q)).collect();
            let a: Vec<u32> = sk.a().iter().map(|&c| u32::from(c)).collect();
            let g: Vec<i32> = sk.g().iter().map(|&c| i32::from(c)).collect();
            let expected: Vec<u32> = g_prime(&g).iter().map(|&c| lift(c, q)).collect();
            assert_eq!(ntt.multiply(&f, &a).unwrap(), expected);

            let params = sk.parameter_set();
            let f: Vec<i32> = sk.f().iter().map(|&c| i32::from(c)).collect();
            assert!(l2_norm(&f, &g_prime(&g)).unwrap() <= params.l2_max);
            assert!(nks_norm(&f, &g_prime(&g), params.kappa).unwrap() <= params.nks_max);
        }
    }
}


#[test]
fn test_unsupported_strength() {
    for bad in [0, 2, 3, 256, 999] {
        let res = bliss_keygen::generate_with_rng(bad, &mut rng());
        assert_eq!(res.map(|_| ()), Err(BlissError::UnsupportedParameter(bad)));
    }
    assert_eq!(
        bliss_keygen::keygen_from_seed(999, &[0u8; 32]).map(|_| ()),
        Err(BlissError::UnsupportedParameter(999))
    );
}


#[test]
fn test_exhaustion() {
    let zero = (vec![0; 512], vec![0; 512]);
    let mut sampler = FixedSampler { candidates: vec![zero], calls: 0 };
    let config = KeyGenConfig { max_attempts: 7 };
    let res = bliss_keygen::generate_with(4, &mut sampler, &mut rng(), &config);
    assert_eq!(res.map(|_| ()), Err(BlissError::KeyGenerationExhausted { attempts: 7 }));
    assert_eq!(sampler.calls, 7);
}


#[test]
fn test_encode_load() {
    let mut rng = rng();
    for strength in [1, 4] {
        let sk = bliss_keygen::generate_with_rng(strength, &mut rng).unwrap();
        let blob = sk.get_encoding(EncodingType::PrivateKey).unwrap();
        let loaded = bliss_keygen::load(&blob).unwrap();
        assert!(loaded.equals(&sk));
        assert_eq!(
            loaded.get_fingerprint(EncodingType::PrivateKey).unwrap(),
            sk.get_fingerprint(EncodingType::PrivateKey).unwrap()
        );

        let pk_blob = sk.get_encoding(EncodingType::PublicKey).unwrap();
        let pk = bliss_keygen::load_public(&pk_blob).unwrap();
        assert!(sk.belongs_to(&pk));
        assert_eq!(pk.get_keysize(), sk.get_keysize());

        // truncated, unknown parameter set, secret out of range, public out of range
        assert!(bliss_keygen::load(&blob[..blob.len() - 1]).is_err());
        let mut bad = blob.clone();
        bad[0] = 9;
        assert_eq!(bliss_keygen::load(&bad).map(|_| ()), Err(BlissError::UnsupportedParameter(9)));
        let mut bad = blob.clone();
        bad[1] = 5;
        assert!(matches!(bliss_keygen::load(&bad), Err(BlissError::Decoding(_))));
        let mut bad = blob.clone();
        bad[1025] = 0xff;
        bad[1026] = 0xff;
        assert!(matches!(bliss_keygen::load(&bad), Err(BlissError::Decoding(_))));
        // swapping f and g breaks f·a = 2g + 1
        let mut bad = blob.clone();
        bad[1..1025].rotate_left(512);
        assert!(matches!(bliss_keygen::load(&bad), Err(BlissError::Decoding(_))));
    }
    assert!(bliss_keygen::load(&[]).is_err());
}


#[test]
fn test_distinct_keys() {
    let mut rng = rng();
    let sk1 = bliss_i::KG::try_keygen_with_rng(&mut rng).unwrap();
    let sk2 = bliss_i::KG::try_keygen_with_rng(&mut rng).unwrap();
    assert!(!sk1.equals(&sk2));
    assert!(!sk1.belongs_to(&sk2.get_public_key().unwrap()));
    assert!(sk1.equals(&sk1.acquire_reference()));
}


#[test]
fn test_reference_counting() {
    let sk = bliss_iv::KG::keygen_from_seed(&[3u8; 32]).unwrap();
    let fp = sk.get_fingerprint(EncodingType::PrivateKey).unwrap();
    assert_eq!(sk.ref_count(), 1);

    let handles: Vec<thread::JoinHandle<[u8; 32]>> = (0..4)
        .map(|_| {
            let r: BlissPrivateKey = sk.acquire_reference();
            thread::spawn(move || {
                let fp = r.get_fingerprint(EncodingType::PrivateKey).unwrap();
                r.release();
                fp
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), fp);
    }
    assert_eq!(sk.ref_count(), 1);

    let extra = sk.clone();
    assert_eq!(sk.ref_count(), 2);
    extra.release();
    assert_eq!(sk.ref_count(), 1);
}


#[test]
fn test_seed_determinism() {
    let seed = [0x42u8; 32];
    let sk1 = bliss_keygen::keygen_from_seed(128, &seed).unwrap();
    let sk2 = bliss_i::KG::keygen_from_seed(&seed).unwrap();
    assert!(sk1.equals(&sk2));

    // the parameter set takes part in seed expansion
    let sk3 = bliss_keygen::keygen_from_seed(192, &seed).unwrap();
    assert_ne!(sk1.f(), sk3.f());

    let sk4 = bliss_keygen::keygen_from_seed(128, &[0x43u8; 32]).unwrap();
    assert!(!sk1.equals(&sk4));
}


#[test]
fn test_ntt_round_trip() {
    let mut rng = rand::thread_rng();
    let mut ntt = Ntt::new(&NTT_12289_512, 512, 12289).unwrap();
    for _ in 0..32 {
        let x: Vec<u32> = (0..512).map(|_| rng.next_u32() % 12289).collect();
        let mut x_hat = vec![0u32; 512];
        let mut x_back = vec![0u32; 512];
        ntt.transform(&x, &mut x_hat, false).unwrap();
        ntt.transform(&x_hat, &mut x_back, true).unwrap();
        assert_eq!(x, x_back);
    }
}


#[test]
fn test_sampler_profile_through_api() {
    let mut rng = rng();
    let mut sampler = SparseTernarySampler;
    let config = KeyGenConfig { max_attempts: bliss_keygen::MAX_KEYGEN_ATTEMPTS };
    let sk = bliss_keygen::generate_with(192, &mut sampler, &mut rng, &config).unwrap();
    let params = sk.parameter_set();
    for poly in [sk.f(), sk.g()] {
        assert_eq!(poly.iter().filter(|c| c.abs() == 1).count(), params.nz1);
        assert_eq!(poly.iter().filter(|c| c.abs() == 2).count(), params.nz2);
    }
}
