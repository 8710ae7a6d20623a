use std::collections::VecDeque;

use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::{CryptoRng, RngCore};

use crate::error::{Result, SignatureError};

/// Draws allowed per `sample_below` call before the source is declared broken.
/// Each draw lands below the bound with probability at least 1/2.
const MAX_REJECTIONS: usize = 128;

/// Capability to draw uniform integers for keys and nonces.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`.
    fn sample_below(&mut self, bound: &BigUint) -> Result<BigUint>;

    /// Uniform integer in `[low, high]`.
    fn sample_range(&mut self, low: &BigUint, high: &BigUint) -> Result<BigUint> {
        if low > high {
            return Err(SignatureError::RandomSourceUnavailable(format!(
                "empty sampling range [{}, {}]",
                low, high
            )));
        }
        let width = high - low + 1u32;
        Ok(low + self.sample_below(&width)?)
    }
}

/// Rejection sampling against the smallest power of two covering `bound`:
/// fill `ceil(bits / 8)` bytes, clear the bits above `bits(bound)`, retry
/// while the candidate is `>= bound`. No modulo reduction, so no bias.
impl<R: RngCore + CryptoRng> RandomSource for R {
    fn sample_below(&mut self, bound: &BigUint) -> Result<BigUint> {
        if bound.is_zero() {
            return Err(SignatureError::RandomSourceUnavailable(
                "cannot sample below zero".to_string(),
            ));
        }

        let bits = bound.bits();
        let len = ((bits + 7) / 8) as usize;
        let excess = (len as u64 * 8 - bits) as u32;
        let mut buf = vec![0u8; len];

        for attempt in 0..MAX_REJECTIONS {
            self.try_fill_bytes(&mut buf)
                .map_err(|e| SignatureError::RandomSourceUnavailable(e.to_string()))?;
            buf[0] &= 0xffu8 >> excess;

            let candidate = BigUint::from_bytes_be(&buf);
            if &candidate < bound {
                return Ok(candidate);
            }
            log::trace!("rejected {}-bit candidate (draw {})", bits, attempt + 1);
        }

        Err(SignatureError::RandomSourceUnavailable(format!(
            "no sample below a {}-bit bound after {} draws",
            bits, MAX_REJECTIONS
        )))
    }
}

/// Replays a fixed list of values, for known-answer tests.
///
/// Values are returned as-is when they fall in the requested range and
/// skipped otherwise, the way a rejection sampler would discard them.
#[derive(Debug, Clone, Default)]
pub struct FixedSequence {
    values: VecDeque<BigUint>,
}

impl FixedSequence {
    pub fn new<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<BigUint>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    fn next_matching(&mut self, accept: impl Fn(&BigUint) -> bool) -> Result<BigUint> {
        while let Some(value) = self.values.pop_front() {
            if accept(&value) {
                return Ok(value);
            }
        }
        Err(SignatureError::RandomSourceUnavailable(
            "fixed sequence exhausted".to_string(),
        ))
    }
}

impl RandomSource for FixedSequence {
    fn sample_below(&mut self, bound: &BigUint) -> Result<BigUint> {
        self.next_matching(|v| v < bound)
    }

    fn sample_range(&mut self, low: &BigUint, high: &BigUint) -> Result<BigUint> {
        self.next_matching(|v| v >= low && v <= high)
    }
}
