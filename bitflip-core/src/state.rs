//! Fixed-length bit vectors used for environment states and goals

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::{BitFlipError, Result};

/// A fixed-length ordered sequence of bits.
///
/// The length is chosen at construction; the only in-place mutation is
/// [`BitVector::flip`], which never changes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BitVector {
    bits: Vec<bool>,
}

impl BitVector {
    /// All-zero vector of length `n`
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self {
            bits: vec![false; n],
        }
    }

    /// Number of bits
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the vector has no bits
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit at `index`, if in range
    #[must_use]
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Iterate over the bits in order
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Negate the bit at `index` in place and return its new value.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn flip(&mut self, index: usize) -> bool {
        let bit = &mut self.bits[index];
        *bit = !*bit;
        *bit
    }

    /// Number of positions in which `self` and `other` differ
    pub fn hamming(&self, other: &Self) -> Result<usize> {
        self.check_len(other.len())?;
        Ok(self
            .bits
            .iter()
            .zip(&other.bits)
            .filter(|(a, b)| a != b)
            .count())
    }

    /// `self` followed by `other`
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        self.iter().chain(other.iter()).collect()
    }

    /// The first `len` bits (all of them if `len` exceeds the length)
    #[must_use]
    pub fn truncated(&self, len: usize) -> Self {
        self.iter().take(len).collect()
    }

    /// Fail with `DimensionMismatch` unless the vector has `expected` bits
    pub fn check_len(&self, expected: usize) -> Result<()> {
        if self.len() == expected {
            Ok(())
        } else {
            Err(BitFlipError::DimensionMismatch {
                expected,
                actual: self.len(),
            })
        }
    }
}

impl From<Vec<bool>> for BitVector {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl FromIterator<bool> for BitVector {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}

impl Index<usize> for BitVector {
    type Output = bool;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bits[index]
    }
}

// Renders like `[0 1 1 0]`.
impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, bit) in self.bits.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        f.write_str("]")
    }
}
