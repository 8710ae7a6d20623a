//! Collaborators that sit outside the signature math: message hashing and
//! the text encoding of keys and signatures.

pub mod armor;
pub mod hash;
