/*
    ElGamal signatures over Z_p^*, n = p - 1.

    keygen:  x <- [2, p - 2],   y = g^x mod p
    sign:    h = H(m)
             k <- [2, n - 1] with gcd(k, n) = 1
             r = g^k mod p
             s = (h - x*r) * k^-1 mod n          (redraw k if s = 0)
    verify:  0 < r < p, 0 < s < n
             g^h == y^r * r^s (mod p)

    correctness: y^r * r^s = g^(xr) * g^(k * (h - xr) * k^-1) = g^h, since
    exponents live mod n and the order of g divides n.
*/

use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::arith::{is_coprime, mod_inverse, mod_pow, sub_mul_mod};
use crate::collab::hash::MessageHash;
use crate::error::{KeyRole, Result, SignatureError};
use crate::params::DomainParameters;
use crate::random::RandomSource;

pub const DEFAULT_NONCE_ATTEMPTS: usize = 1000;

#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub private_key: BigUint,
    pub public_key: BigUint,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key", &format_args!("<{} bits>", self.private_key.bits()))
            .field("public_key", &self.public_key)
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub r: BigUint,
    pub s: BigUint,
}

impl Signature {
    pub fn new(r: BigUint, s: BigUint) -> Self {
        Self { r, s }
    }

    /// `0 < r < p` and `0 < s < p - 1`.
    pub fn is_within_bounds(&self, params: &DomainParameters) -> bool {
        !self.r.is_zero() && &self.r < params.p() && !self.s.is_zero() && &self.s < params.order()
    }
}

/// Signs and verifies messages under one set of domain parameters.
///
/// Key material is set at most once, either generated or imported; there is
/// no way to replace it afterwards.
pub struct SignatureEngine<H, R> {
    params: DomainParameters,
    hash: H,
    rng: R,
    private_key: Option<BigUint>,
    public_key: Option<BigUint>,
    nonce_attempts: usize,
}

impl<H: MessageHash, R: RandomSource> SignatureEngine<H, R> {
    pub fn new(params: DomainParameters, hash: H, rng: R) -> Self {
        Self {
            params,
            hash,
            rng,
            private_key: None,
            public_key: None,
            nonce_attempts: DEFAULT_NONCE_ATTEMPTS,
        }
    }

    pub fn with_nonce_attempts(mut self, attempts: usize) -> Self {
        self.nonce_attempts = attempts;
        self
    }

    /// Imports an existing key pair, checking `2 <= x <= p - 2` and `y = g^x mod p`.
    pub fn with_key_pair(mut self, keys: KeyPair) -> Result<Self> {
        self.ensure_no_keys()?;

        let max = self.params.p() - 2u32;
        if keys.private_key < BigUint::from(2u32) || keys.private_key > max {
            return Err(SignatureError::InvalidKeyMaterial(
                "private key outside [2, p - 2]".to_string(),
            ));
        }
        if mod_pow(self.params.g(), &keys.private_key, self.params.p()) != keys.public_key {
            return Err(SignatureError::InvalidKeyMaterial(
                "public key does not match private key".to_string(),
            ));
        }

        self.private_key = Some(keys.private_key);
        self.public_key = Some(keys.public_key);
        Ok(self)
    }

    /// Imports a public key only, producing a verify-only engine.
    pub fn with_public_key(mut self, public_key: BigUint) -> Result<Self> {
        self.ensure_no_keys()?;

        if public_key.is_zero() || &public_key >= self.params.p() {
            return Err(SignatureError::InvalidKeyMaterial(
                "public key outside [1, p)".to_string(),
            ));
        }

        self.public_key = Some(public_key);
        Ok(self)
    }

    pub fn params(&self) -> &DomainParameters {
        &self.params
    }

    pub fn public_key(&self) -> Option<&BigUint> {
        self.public_key.as_ref()
    }

    pub fn generate_keys(&mut self) -> Result<KeyPair> {
        self.ensure_no_keys()?;
        log::debug!(
            "generating key pair: p = {} bits, g = {}",
            self.params.bits(),
            self.params.g()
        );

        let low = BigUint::from(2u32);
        let high = self.params.p() - 2u32;
        let private_key = self.rng.sample_range(&low, &high)?;
        let public_key = mod_pow(self.params.g(), &private_key, self.params.p());

        log::debug!(
            "key pair ready: x = {} bits, y = {} bits",
            private_key.bits(),
            public_key.bits()
        );

        self.private_key = Some(private_key.clone());
        self.public_key = Some(public_key.clone());
        Ok(KeyPair {
            private_key,
            public_key,
        })
    }

    pub fn sign(&mut self, message: &[u8]) -> Result<Signature> {
        let digest = self.hash.digest(message);
        log::debug!(
            "signing {} byte message, digest {}",
            message.len(),
            digest.hex
        );
        self.sign_digest(&digest.value)
    }

    /// Signs an already-hashed message.
    pub fn sign_digest(&mut self, digest: &BigUint) -> Result<Signature> {
        let x = self
            .private_key
            .as_ref()
            .ok_or(SignatureError::MissingKeyMaterial(KeyRole::Private))?;
        let n = self.params.order();
        let low = BigUint::from(2u32);
        let high = n - 1u32;

        for attempt in 1..=self.nonce_attempts {
            let k = self.rng.sample_range(&low, &high)?;
            if !is_coprime(&k, n) {
                log::trace!("nonce attempt {}: gcd(k, p - 1) != 1", attempt);
                continue;
            }

            let signature = sign_with_nonce(&self.params, x, digest, &k)?;
            if signature.s.is_zero() {
                log::trace!("nonce attempt {}: s = 0", attempt);
                continue;
            }

            log::debug!(
                "signature ready after {} nonce draw(s): r = {} bits, s = {} bits",
                attempt,
                signature.r.bits(),
                signature.s.bits()
            );
            return Ok(signature);
        }

        Err(SignatureError::NonceGenerationExhausted {
            attempts: self.nonce_attempts,
        })
    }

    /// `Ok(false)` for a signature that is out of bounds or does not satisfy
    /// the verification equation; `Err` only when no public key is set.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<bool> {
        let digest = self.hash.digest(message);
        log::debug!(
            "verifying {} byte message, digest {}",
            message.len(),
            digest.hex
        );
        self.verify_digest(&digest.value, signature)
    }

    pub fn verify_digest(&self, digest: &BigUint, signature: &Signature) -> Result<bool> {
        let y = self
            .public_key
            .as_ref()
            .ok_or(SignatureError::MissingKeyMaterial(KeyRole::Public))?;
        Ok(verify_with_public_key(&self.params, y, digest, signature))
    }

    fn ensure_no_keys(&self) -> Result<()> {
        if self.private_key.is_some() || self.public_key.is_some() {
            return Err(SignatureError::KeyMaterialAlreadySet);
        }
        Ok(())
    }
}

/// One signing round with a caller-chosen nonce. `k` must be invertible mod `p - 1`.
pub(crate) fn sign_with_nonce(
    params: &DomainParameters,
    private_key: &BigUint,
    digest: &BigUint,
    k: &BigUint,
) -> Result<Signature> {
    let n = params.order();
    let r = mod_pow(params.g(), k, params.p());
    let k_inv = mod_inverse(k, n)?;

    let t = sub_mul_mod(digest, private_key, &r, n);
    let s = (t * k_inv) % n;

    Ok(Signature { r, s })
}

pub(crate) fn verify_with_public_key(
    params: &DomainParameters,
    public_key: &BigUint,
    digest: &BigUint,
    signature: &Signature,
) -> bool {
    if !signature.is_within_bounds(params) {
        log::warn!("signature rejected: (r, s) out of bounds");
        return false;
    }

    let p = params.p();
    let left = mod_pow(params.g(), digest, p);
    let right = (mod_pow(public_key, &signature.r, p) * mod_pow(&signature.r, &signature.s, p)) % p;

    let valid = left == right;
    if !valid {
        log::warn!("signature rejected: g^h != y^r * r^s (mod p)");
    }
    valid
}
