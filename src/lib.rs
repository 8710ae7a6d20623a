/*
    ElGamal digital signatures over a prime-order multiplicative group.

    DomainParameters (p, g)
        |
    SignatureEngine<H: MessageHash, R: RandomSource>
        generate_keys  ->  KeyPair { x, y = g^x mod p }
        sign(m)        ->  Signature { r, s }
        verify(m, sig) ->  bool

    Everything that is not signature math lives in `collab`: the hash that
    turns message bytes into an integer digest and the text encoding of keys
    and signatures. Randomness is injected through `RandomSource`, so any
    CryptoRng works and tests can replay fixed values.
*/

pub mod arith;
pub mod collab;
pub mod engine;
pub mod error;
pub mod params;
pub mod random;

pub use collab::hash::{DigestHash, Md4Hash, MessageDigest, MessageHash, Sha256Hash};
pub use engine::{KeyPair, Signature, SignatureEngine, DEFAULT_NONCE_ATTEMPTS};
pub use error::{KeyRole, Result, SignatureError};
pub use params::DomainParameters;
pub use random::{FixedSequence, RandomSource};

#[test]
fn test_sign_export_import_verify() {
    use collab::armor;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    let document = b"line one\nline two\nline three\n";

    let mut signer = SignatureEngine::new(
        DomainParameters::ffdhe2048(),
        Md4Hash::new(),
        ChaCha20Rng::seed_from_u64(6),
    );
    let keys = signer.generate_keys().unwrap();
    let signature = signer.sign(document).unwrap();

    let public_text = armor::encode_public_key(&keys.public_key, signer.params());
    let private_text = armor::encode_private_key(&keys.private_key);
    let signature_text = armor::encode_signature(&signature);

    assert_eq!(armor::decode_private_key(&private_text).unwrap(), keys.private_key);

    let (public_key, params) = armor::decode_public_key(&public_text).unwrap();
    let verifier = SignatureEngine::new(params, Md4Hash::new(), ChaCha20Rng::seed_from_u64(0))
        .with_public_key(public_key)
        .unwrap();
    let decoded = armor::decode_signature(&signature_text).unwrap();

    assert!(verifier.verify(document, &decoded).unwrap());
    assert!(!verifier.verify(b"line one\nline two\n", &decoded).unwrap());
}
