/*
    Text encoding of keys and signatures.

    private key:                public key:                 signature:
        ElGamal Private Key (x)     ElGamal Public Key (y)      ElGamal Signature
        ======...                   ======...                   ======...
        Decimal: <x>                Decimal: <y>                r (decimal):
        Hex: 0x<x>                  Hex: 0x<y>                  <r>

                                    Domain Parameters:          r (hex):
                                    p = <p>                     0x<r>
                                    g = <g>
                                                                s (decimal):
                                                                <s>

                                                                s (hex):
                                                                0x<s>

    Parsers only read the decimal fields; hex lines are for humans.
*/

use num_bigint::BigUint;

use crate::engine::Signature;
use crate::error::{Result, SignatureError};
use crate::params::DomainParameters;

const RULE_WIDTH: usize = 70;

const PRIVATE_KEY_TITLE: &str = "ElGamal Private Key (x)";
const PUBLIC_KEY_TITLE: &str = "ElGamal Public Key (y)";
const SIGNATURE_TITLE: &str = "ElGamal Signature";

fn header(title: &str) -> String {
    format!("{}\n{}\n", title, "=".repeat(RULE_WIDTH))
}

pub fn encode_private_key(private_key: &BigUint) -> String {
    let mut out = header(PRIVATE_KEY_TITLE);
    out.push_str(&format!("Decimal: {}\n", private_key));
    out.push_str(&format!("Hex: {:#x}\n", private_key));
    out
}

pub fn encode_public_key(public_key: &BigUint, params: &DomainParameters) -> String {
    let mut out = header(PUBLIC_KEY_TITLE);
    out.push_str(&format!("Decimal: {}\n", public_key));
    out.push_str(&format!("Hex: {:#x}\n", public_key));
    out.push_str("\nDomain Parameters:\n");
    out.push_str(&format!("p = {}\n", params.p()));
    out.push_str(&format!("g = {}\n", params.g()));
    out
}

pub fn encode_signature(signature: &Signature) -> String {
    let mut out = header(SIGNATURE_TITLE);
    out.push_str(&format!("r (decimal):\n{}\n\n", signature.r));
    out.push_str(&format!("r (hex):\n{:#x}\n\n", signature.r));
    out.push_str(&format!("s (decimal):\n{}\n\n", signature.s));
    out.push_str(&format!("s (hex):\n{:#x}\n", signature.s));
    out
}

pub fn decode_private_key(text: &str) -> Result<BigUint> {
    decimal_field(text, "Decimal:")
}

pub fn decode_public_key(text: &str) -> Result<(BigUint, DomainParameters)> {
    let public_key = decimal_field(text, "Decimal:")?;
    let p = decimal_field(text, "p =")?;
    let g = decimal_field(text, "g =")?;
    let params = DomainParameters::new(p, g)
        .map_err(|e| SignatureError::MalformedEncoding(e.to_string()))?;
    Ok((public_key, params))
}

pub fn decode_signature(text: &str) -> Result<Signature> {
    let mut r = None;
    let mut s = None;

    let mut lines = text.lines();
    while let Some(line) = lines.next() {
        let slot = if line.starts_with("r (decimal):") {
            &mut r
        } else if line.starts_with("s (decimal):") {
            &mut s
        } else {
            continue;
        };
        let value = lines
            .next()
            .ok_or_else(|| SignatureError::MalformedEncoding(format!("no value after {:?}", line)))?;
        *slot = Some(parse_decimal(value)?);
    }

    match (r, s) {
        (Some(r), Some(s)) => Ok(Signature { r, s }),
        _ => Err(SignatureError::MalformedEncoding(
            "signature needs both r and s".to_string(),
        )),
    }
}

fn decimal_field(text: &str, prefix: &str) -> Result<BigUint> {
    let line = text
        .lines()
        .find(|line| line.starts_with(prefix))
        .ok_or_else(|| SignatureError::MalformedEncoding(format!("missing {:?} line", prefix)))?;
    parse_decimal(&line[prefix.len()..])
}

fn parse_decimal(value: &str) -> Result<BigUint> {
    let value = value.trim();
    BigUint::parse_bytes(value.as_bytes(), 10)
        .ok_or_else(|| SignatureError::MalformedEncoding(format!("not a decimal integer: {:?}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> DomainParameters {
        DomainParameters::from_literals("467", "2").unwrap()
    }

    #[test]
    fn test_private_key_layout() {
        let text = encode_private_key(&BigUint::from(127u32));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ElGamal Private Key (x)");
        assert_eq!(lines[1], "=".repeat(70));
        assert_eq!(lines[2], "Decimal: 127");
        assert_eq!(lines[3], "Hex: 0x7f");
        assert_eq!(decode_private_key(&text).unwrap(), BigUint::from(127u32));
    }

    #[test]
    fn test_public_key_carries_parameters() {
        let text = encode_public_key(&BigUint::from(132u32), &params());
        assert!(text.contains("\nDomain Parameters:\np = 467\ng = 2\n"));

        let (y, decoded) = decode_public_key(&text).unwrap();
        assert_eq!(y, BigUint::from(132u32));
        assert_eq!(decoded, params());
    }

    #[test]
    fn test_signature_layout() {
        let sig = Signature::new(BigUint::from(29u32), BigUint::from(51u32));
        let text = encode_signature(&sig);
        assert_eq!(
            text,
            format!(
                "ElGamal Signature\n{}\nr (decimal):\n29\n\nr (hex):\n0x1d\n\ns (decimal):\n51\n\ns (hex):\n0x33\n",
                "=".repeat(70)
            )
        );
        assert_eq!(decode_signature(&text).unwrap(), sig);
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            decode_private_key("ElGamal Private Key (x)\nHex: 0x7f\n"),
            Err(SignatureError::MalformedEncoding(_))
        ));
        assert!(matches!(
            decode_signature("r (decimal):\n29\n"),
            Err(SignatureError::MalformedEncoding(_))
        ));
        assert!(matches!(
            decode_signature("r (decimal):\n29\n\ns (decimal):\n0x33\n"),
            Err(SignatureError::MalformedEncoding(_))
        ));
        assert!(matches!(
            decode_signature("r (decimal):"),
            Err(SignatureError::MalformedEncoding(_))
        ));
        assert!(matches!(
            decode_public_key("Decimal: 5\np = 467\ng = 467\n"),
            Err(SignatureError::MalformedEncoding(_))
        ));
    }
}
