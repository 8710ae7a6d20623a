use std::fmt;

use thiserror::Error;

/// Which half of a key pair an operation needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Private,
    Public,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRole::Private => f.write_str("private"),
            KeyRole::Public => f.write_str("public"),
        }
    }
}

/// Errors surfaced by the signature engine and its collaborators.
///
/// A signature that fails verification is not an error: `verify` reports it
/// as `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("invalid domain parameters: {0}")]
    InvalidDomainParameters(String),

    #[error("{0} key is required for this operation")]
    MissingKeyMaterial(KeyRole),
    #[error("key material is already set and cannot be replaced")]
    KeyMaterialAlreadySet,
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("no nonce coprime to p - 1 found after {attempts} attempts")]
    NonceGenerationExhausted { attempts: usize },
    #[error("modular inverse does not exist")]
    ModularInverseUndefined,
    #[error("random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    #[error("malformed encoding: {0}")]
    MalformedEncoding(String),
}

pub type Result<T> = std::result::Result<T, SignatureError>;
