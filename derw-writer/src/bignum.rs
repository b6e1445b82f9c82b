//! Arbitrary-precision integer seam
//!
//! The writer does no big number arithmetic. It only needs to ask a value
//! for its sign, its magnitude size, its most significant byte, and its
//! big-endian magnitude. Any bignum backend can be plugged in by
//! implementing [`BigNumber`].

/// Read-only view of an arbitrary-precision integer
pub trait BigNumber {
    /// Check the sign
    fn is_negative(&self) -> bool;

    /// Check for zero
    fn is_zero(&self) -> bool;

    /// Number of bytes in the minimal big-endian magnitude (0 for zero)
    fn num_bytes(&self) -> usize;

    /// Most significant magnitude byte, read from the internal representation
    ///
    /// Must not be derived from [`BigNumber::write_be`]; the writer uses it to
    /// cross-check serialized output.
    fn top_byte(&self) -> u8;

    /// Write the magnitude big-endian into `out`, which is `num_bytes()` long
    fn write_be(&self, out: &mut [u8]);
}

const LIMB_BYTES: usize = 8;

/// Sign-magnitude integer stored as little-endian 64-bit limbs
///
/// Limbs are kept normalized: no zero limb at the most significant end, and
/// zero is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LimbInteger {
    negative: bool,
    limbs: Vec<u64>,
}

impl LimbInteger {
    /// Zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build a non-negative value from little-endian limbs
    pub fn from_limbs(limbs: Vec<u64>) -> Self {
        let mut value = Self {
            negative: false,
            limbs,
        };
        value.normalize();
        value
    }

    /// Build a non-negative value from a big-endian magnitude
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let limbs = bytes
            .rchunks(LIMB_BYTES)
            .map(|chunk| chunk.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
            .collect();
        Self::from_limbs(limbs)
    }

    /// Flip the sign (zero stays non-negative)
    pub fn negated(mut self) -> Self {
        self.negative = !self.negative;
        self.normalize();
        self
    }

    /// Little-endian limbs of the magnitude
    pub fn limbs(&self) -> &[u64] {
        &self.limbs
    }

    fn normalize(&mut self) {
        while self.limbs.last() == Some(&0) {
            self.limbs.pop();
        }
        if self.limbs.is_empty() {
            self.negative = false;
        }
    }
}

impl From<u64> for LimbInteger {
    fn from(value: u64) -> Self {
        Self::from_limbs(vec![value])
    }
}

impl From<u128> for LimbInteger {
    fn from(value: u128) -> Self {
        Self::from_limbs(vec![value as u64, (value >> 64) as u64])
    }
}

impl From<i64> for LimbInteger {
    fn from(value: i64) -> Self {
        let magnitude = Self::from(value.unsigned_abs());
        if value < 0 { magnitude.negated() } else { magnitude }
    }
}

impl BigNumber for LimbInteger {
    fn is_negative(&self) -> bool {
        self.negative
    }

    fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    fn num_bytes(&self) -> usize {
        match self.limbs.last() {
            None => 0,
            Some(top) => {
                let top_bytes = (64 - top.leading_zeros() as usize).div_ceil(8);
                (self.limbs.len() - 1) * LIMB_BYTES + top_bytes
            }
        }
    }

    fn top_byte(&self) -> u8 {
        let n = self.num_bytes();
        if n == 0 {
            return 0;
        }
        let word = self.limbs[(n - 1) / LIMB_BYTES];
        ((word >> (8 * ((n - 1) % LIMB_BYTES))) & 0xFF) as u8
    }

    fn write_be(&self, out: &mut [u8]) {
        for (i, byte) in out.iter_mut().rev().enumerate() {
            let limb = self.limbs.get(i / LIMB_BYTES).copied().unwrap_or(0);
            *byte = (limb >> (8 * (i % LIMB_BYTES))) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        let zero = LimbInteger::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());
        assert_eq!(zero.num_bytes(), 0);
        assert!(!LimbInteger::zero().negated().is_negative());
    }

    #[test]
    fn test_num_bytes_and_top_byte() {
        let v = LimbInteger::from(0x01_2345u64);
        assert_eq!(v.num_bytes(), 3);
        assert_eq!(v.top_byte(), 0x01);

        let v = LimbInteger::from(0x80u128 << 64);
        assert_eq!(v.num_bytes(), 9);
        assert_eq!(v.top_byte(), 0x80);
    }

    #[test]
    fn test_from_be_bytes() {
        let bytes = [0x00, 0x00, 0xFF, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        let v = LimbInteger::from_be_bytes(&bytes);
        assert_eq!(v.limbs(), &[0x0102_0304_0506_0708, 0xFF]);
        assert_eq!(v.num_bytes(), 9);

        let mut out = vec![0u8; v.num_bytes()];
        v.write_be(&mut out);
        assert_eq!(out, &bytes[2..]);
    }

    #[test]
    fn test_from_i64() {
        let v = LimbInteger::from(-5i64);
        assert!(v.is_negative());
        assert_eq!(v.limbs(), &[5]);
        assert!(!LimbInteger::from(5i64).is_negative());
    }
}
