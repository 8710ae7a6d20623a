/*
    Modular arithmetic over BigUint.

    Exponentiation is plain left-to-right square-and-multiply; every product is
    reduced with a single div_rem against the modulus, so intermediates never
    grow past 2 * bits(modulus).

    x^13 mod n, 13 = 0b1101:
        acc = 1
        bit 1: acc = acc^2 * x      = x
        bit 1: acc = acc^2 * x      = x^3
        bit 0: acc = acc^2          = x^6
        bit 1: acc = acc^2 * x      = x^13
*/

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Result, SignatureError};

struct ModMul<'a> {
    n: &'a BigUint,
}

impl<'a> ModMul<'a> {
    fn new(n: &'a BigUint) -> Self {
        Self { n }
    }

    fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let ab = a * b;
        let (_, r) = ab.div_rem(self.n);
        r
    }

    fn square(&self, a: &BigUint) -> BigUint {
        self.mul(a, a)
    }
}

/// `base^exponent mod modulus`.
///
/// The modulus must be non-zero; every caller passes a validated `p` or `p - 1`.
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    debug_assert!(!modulus.is_zero(), "modulus must be positive");
    if modulus.is_one() {
        return BigUint::zero();
    }

    let ctx = ModMul::new(modulus);
    let (_, base) = base.div_rem(modulus);

    let mut acc = BigUint::one();
    for i in (0..exponent.bits()).rev() {
        acc = ctx.square(&acc);
        if exponent.bit(i) {
            acc = ctx.mul(&acc, &base);
        }
    }

    acc
}

/// The unique `a^-1` in `[0, m)` with `a * a^-1 = 1 (mod m)`, via the
/// extended Euclidean algorithm.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    if m.is_zero() {
        return Err(SignatureError::ModularInverseUndefined);
    }

    let a = BigInt::from_biguint(Sign::Plus, a.clone());
    let m = BigInt::from_biguint(Sign::Plus, m.clone());

    let egcd = a.extended_gcd(&m);
    if !egcd.gcd.is_one() {
        return Err(SignatureError::ModularInverseUndefined);
    }

    // x may be negative; mod_floor lands it in [0, m)
    egcd.x
        .mod_floor(&m)
        .to_biguint()
        .ok_or(SignatureError::ModularInverseUndefined)
}

pub fn is_coprime(a: &BigUint, m: &BigUint) -> bool {
    a.gcd(m).is_one()
}

/// `(minuend - a * b) mod modulus`, normalised into `[0, modulus)` even when
/// the difference is negative.
pub(crate) fn sub_mul_mod(
    minuend: &BigUint,
    a: &BigUint,
    b: &BigUint,
    modulus: &BigUint,
) -> BigUint {
    let diff = BigInt::from_biguint(Sign::Plus, minuend.clone())
        - BigInt::from_biguint(Sign::Plus, a * b);
    let m = BigInt::from_biguint(Sign::Plus, modulus.clone());

    // mod_floor against a positive modulus is never negative
    diff.mod_floor(&m).magnitude().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_pow_small() {
        let n = BigUint::from(467u32);
        assert_eq!(
            mod_pow(&BigUint::from(2u32), &BigUint::from(127u32), &n),
            BigUint::from(132u32)
        );
        assert_eq!(
            mod_pow(&BigUint::from(2u32), &BigUint::from(213u32), &n),
            BigUint::from(29u32)
        );
        assert_eq!(
            mod_pow(&BigUint::from(5u32), &BigUint::zero(), &n),
            BigUint::one()
        );
        assert_eq!(
            mod_pow(&BigUint::from(5u32), &BigUint::from(3u32), &BigUint::one()),
            BigUint::zero()
        );
    }

    #[test]
    fn test_mod_pow_matches_num_bigint() {
        let n = BigUint::parse_bytes(
            b"ffffffffffffffffadf85458a2bb4a9aafdc5620273d3cf1d8b9c583ce2d3695",
            16,
        )
        .unwrap();
        let base = BigUint::parse_bytes(b"1234567890abcdef1234567890abcdef", 16).unwrap();
        let exp = BigUint::parse_bytes(b"fedcba0987654321fedcba0987654321ffff", 16).unwrap();

        assert_eq!(mod_pow(&base, &exp, &n), base.modpow(&exp, &n));
        // base larger than the modulus is reduced first
        let big_base = &base * &n + BigUint::from(7u32);
        assert_eq!(mod_pow(&big_base, &exp, &n), big_base.modpow(&exp, &n));
    }

    #[test]
    fn test_mod_inverse() {
        let m = BigUint::from(466u32);
        let inv = mod_inverse(&BigUint::from(213u32), &m).unwrap();
        assert_eq!(inv, BigUint::from(431u32));

        for a in (1u32..466).filter(|a| is_coprime(&BigUint::from(*a), &m)) {
            let a = BigUint::from(a);
            let inv = mod_inverse(&a, &m).unwrap();
            assert!(inv < m);
            assert_eq!((&a * &inv) % &m, BigUint::one());
        }
    }

    #[test]
    fn test_mod_inverse_undefined() {
        let m = BigUint::from(466u32);
        assert_eq!(
            mod_inverse(&BigUint::from(2u32), &m),
            Err(SignatureError::ModularInverseUndefined)
        );
        assert_eq!(
            mod_inverse(&BigUint::from(233u32), &m),
            Err(SignatureError::ModularInverseUndefined)
        );
        assert_eq!(
            mod_inverse(&BigUint::from(3u32), &BigUint::zero()),
            Err(SignatureError::ModularInverseUndefined)
        );
    }

    #[test]
    fn test_sub_mul_mod_negative_difference() {
        let n = BigUint::from(466u32);
        // 100 - 127 * 29 = -3583 = 145 (mod 466)
        let out = sub_mul_mod(
            &BigUint::from(100u32),
            &BigUint::from(127u32),
            &BigUint::from(29u32),
            &n,
        );
        assert_eq!(out, BigUint::from(145u32));

        let out = sub_mul_mod(
            &BigUint::from(1000u32),
            &BigUint::from(2u32),
            &BigUint::from(3u32),
            &n,
        );
        assert_eq!(out, BigUint::from(62u32));
    }
}
