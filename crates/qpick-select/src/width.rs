//! Bit-width sizing and the bias of modulo reduction.

use serde::Serialize;

use crate::error::{SelectError, SelectResult};

/// Number of random bits drawn for one selection.
///
/// For a collection of `n` items this is `max(1, ceil(log2 n))`: the smallest
/// `k >= 1` with `2^k >= n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BitWidth(u32);

impl BitWidth {
    /// Widest sample representable as a raw index.
    pub const MAX_BITS: u32 = u64::BITS;

    /// Width needed to index a collection of `len` items.
    pub fn for_len(len: usize) -> SelectResult<Self> {
        match len {
            0 => Err(SelectError::empty_collection()),
            1 => Ok(Self(1)),
            n => Ok(Self(usize::BITS - (n - 1).leading_zeros())),
        }
    }

    /// An explicit width in `1..=64`.
    pub fn new(bits: u32) -> SelectResult<Self> {
        if (1..=Self::MAX_BITS).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(SelectError::InvalidArgument(format!(
                "bit width must be between 1 and {}, got {bits}",
                Self::MAX_BITS
            )))
        }
    }

    /// Number of bits.
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Number of distinct raw indices, `2^k`.
    pub fn range(self) -> u128 {
        1u128 << self.0
    }

    /// Largest raw index, `2^k - 1`.
    pub fn max_raw_index(self) -> u64 {
        u64::MAX >> (u64::BITS - self.0)
    }
}

impl std::fmt::Display for BitWidth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} bits", self.0)
    }
}

/// How raw indices distribute over a collection under `raw mod len`.
///
/// When `len` is not a power of two the first `2^k mod len` indices receive
/// one extra raw value each and are selected slightly more often. That bias
/// is a known property of modulo reduction and is kept as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BiasProfile {
    /// Collection length.
    pub len: usize,
    /// Sample width for this length.
    pub width: BitWidth,
    /// Raw values mapping to each of the lighter indices.
    pub base_weight: u64,
    /// Count of leading indices that get `base_weight + 1` raw values.
    pub heavy: usize,
}

impl BiasProfile {
    /// Profile for a collection of `len` items.
    pub fn for_len(len: usize) -> SelectResult<Self> {
        let width = BitWidth::for_len(len)?;
        let outcomes = width.range();
        let n = len as u128;

        // Both fit: for len >= 2 the quotient is at most 2^63, and the
        // remainder is below len.
        let base_weight = u64::try_from(outcomes / n)
            .map_err(|_| SelectError::InvalidArgument(format!("collection too large: {len}")))?;
        let heavy = usize::try_from(outcomes % n)
            .map_err(|_| SelectError::InvalidArgument(format!("collection too large: {len}")))?;

        Ok(Self {
            len,
            width,
            base_weight,
            heavy,
        })
    }

    /// Number of raw indices that select `index`, or zero when out of range.
    pub fn weight(&self, index: usize) -> u64 {
        if index >= self.len {
            0
        } else if index < self.heavy {
            self.base_weight + 1
        } else {
            self.base_weight
        }
    }

    /// Whether every index is equally likely.
    pub fn is_uniform(&self) -> bool {
        self.heavy == 0
    }

    /// Probability of selecting `index`.
    pub fn probability(&self, index: usize) -> f64 {
        self.weight(index) as f64 / self.width.range() as f64
    }

    /// Ratio between the most and least likely index (1.0 when uniform).
    pub fn max_ratio(&self) -> f64 {
        if self.is_uniform() {
            1.0
        } else {
            (self.base_weight + 1) as f64 / self.base_weight as f64
        }
    }

    /// Per-index weights, in index order.
    pub fn weights(&self) -> Vec<u64> {
        (0..self.len).map(|i| self.weight(i)).collect()
    }
}

/// Number of raw indices mapping to each index of a `len`-item collection.
///
/// Empty for an empty collection.
pub fn selection_weights(len: usize) -> Vec<u64> {
    BiasProfile::for_len(len)
        .map(|profile| profile.weights())
        .unwrap_or_default()
}
