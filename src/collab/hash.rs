use std::fmt;
use std::marker::PhantomData;

use md4::Md4;
use num_bigint::BigUint;
use sha2::{Digest, Sha256};

/// Integer form of a message hash together with its hex rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageDigest {
    pub value: BigUint,
    pub hex: String,
}

impl MessageDigest {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            value: BigUint::from_bytes_be(bytes),
            hex: hex::encode(bytes),
        }
    }
}

/// Deterministic map from message bytes to a fixed-width digest.
pub trait MessageHash {
    fn digest(&self, message: &[u8]) -> MessageDigest;

    /// Digest width in bits.
    fn output_bits(&self) -> usize;
}

/// Adapts any RustCrypto hash to [`MessageHash`], reading the output
/// big-endian.
pub struct DigestHash<D> {
    _marker: PhantomData<D>,
}

impl<D> DigestHash<D> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<D> Default for DigestHash<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> Clone for DigestHash<D> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<D> fmt::Debug for DigestHash<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestHash")
            .field("algorithm", &std::any::type_name::<D>())
            .finish()
    }
}

impl<D: Digest> MessageHash for DigestHash<D> {
    fn digest(&self, message: &[u8]) -> MessageDigest {
        MessageDigest::from_bytes(&D::digest(message))
    }

    fn output_bits(&self) -> usize {
        <D as Digest>::output_size() * 8
    }
}

/// MD4 over the raw message bytes, the NTLM-style digest.
pub type Md4Hash = DigestHash<Md4>;
pub type Sha256Hash = DigestHash<Sha256>;

impl<H: MessageHash + ?Sized> MessageHash for &H {
    fn digest(&self, message: &[u8]) -> MessageDigest {
        (**self).digest(message)
    }

    fn output_bits(&self) -> usize {
        (**self).output_bits()
    }
}
