use num_bigint::BigUint;
use num_traits::One;

use crate::error::{Result, SignatureError};

/// RFC 7919 ffdhe2048 safe prime, `2^2048 - 2^1984 + (floor(2^1918 * e) + 560316) * 2^64 - 1`.
const FFDHE2048_P: &str = "0x\
    FFFFFFFFFFFFFFFFADF85458A2BB4A9AAFDC5620273D3CF1D8B9C583CE2D3695\
    A9E13641146433FBCC939DCE249B3EF97D2FE363630C75D8F681B202AEC4617A\
    D3DF1ED5D5FD65612433F51F5F066ED0856365553DED1AF3B557135E7F57C935\
    984F0C70E0E68B77E2A689DAF3EFE8721DF158A136ADE73530ACCA4F483A797A\
    BC0AB182B324FB61D108A94BB2C8E3FBB96ADAB760D7F4681D4F42A3DE394DF4\
    AE56EDE76372BB190B07A7C8EE0A6D709E02FCE1CDF7E2ECC03404CD28342F61\
    9172FE9CE98583FF8E4F1232EEF28183C3FE3B1B4C6FAD733BB5FCBC2EC22005\
    C58EF1837D1683B2C6F34A26C1B2EFFA886B423861285C97FFFFFFFFFFFFFFFF";
const FFDHE2048_G: u32 = 2;

/// The group `(p, g)` all keys and signatures of an engine live in.
///
/// `p` is trusted to be prime; only `p > 3` and `1 < g < p` are checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainParameters {
    p: BigUint,
    g: BigUint,
    // p - 1, the modulus for exponents
    n: BigUint,
}

impl DomainParameters {
    pub fn new(p: BigUint, g: BigUint) -> Result<Self> {
        if p <= BigUint::from(3u32) {
            return Err(SignatureError::InvalidDomainParameters(format!(
                "modulus {} is too small to hold keys in [2, p - 2]",
                p
            )));
        }
        if g <= BigUint::one() || g >= p {
            return Err(SignatureError::InvalidDomainParameters(
                "generator must lie in (1, p)".to_string(),
            ));
        }

        let n = &p - 1u32;
        Ok(Self { p, g, n })
    }

    /// Parses `p` and `g` from decimal or `0x`-prefixed hex literals.
    /// Whitespace and `_` separators are ignored.
    pub fn from_literals(p: &str, g: &str) -> Result<Self> {
        Self::new(parse_literal(p)?, parse_literal(g)?)
    }

    /// The 2048-bit ffdhe2048 group with generator 2.
    pub fn ffdhe2048() -> Self {
        let p = parse_literal(FFDHE2048_P).expect("ffdhe2048 literal is valid hex");
        Self::new(p, BigUint::from(FFDHE2048_G)).expect("ffdhe2048 parameters are valid")
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// `p - 1`.
    pub fn order(&self) -> &BigUint {
        &self.n
    }

    pub fn bits(&self) -> u64 {
        self.p.bits()
    }
}

pub(crate) fn parse_literal(literal: &str) -> Result<BigUint> {
    let cleaned: String = literal
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect();

    let (digits, radix) = match cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (cleaned.as_str(), 10),
    };

    BigUint::parse_bytes(digits.as_bytes(), radix).ok_or_else(|| {
        SignatureError::InvalidDomainParameters(format!("cannot parse integer literal {:?}", literal))
    })
}
