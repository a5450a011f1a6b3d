//! Raw samples and their reduction to an index.

use std::num::NonZeroUsize;

use serde::Serialize;

use crate::error::{SelectError, SelectResult};
use crate::width::BitWidth;

/// A validated bitstring returned by an oracle.
///
/// The string is read big-endian: the leftmost character is the most
/// significant bit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawSample {
    bits: String,
    width: BitWidth,
    raw_index: u64,
}

impl RawSample {
    /// Check that `bits` is exactly `width` characters of `0`/`1` and decode it.
    pub fn parse(bits: &str, width: BitWidth) -> SelectResult<Self> {
        let expected = width.bits() as usize;
        if bits.len() != expected {
            return Err(SelectError::ProtocolError(format!(
                "expected {expected}-bit sample, got {} characters: {bits:?}",
                bits.len()
            )));
        }
        if let Some(bad) = bits.chars().find(|c| !matches!(c, '0' | '1')) {
            return Err(SelectError::ProtocolError(format!(
                "invalid character {bad:?} in sample {bits:?}"
            )));
        }

        let raw_index = bits
            .bytes()
            .fold(0u64, |acc, b| (acc << 1) | u64::from(b - b'0'));

        Ok(Self {
            bits: bits.to_string(),
            width,
            raw_index,
        })
    }

    /// Sample for a known raw index, formatted at `width` bits.
    pub fn from_raw_index(raw_index: u64, width: BitWidth) -> SelectResult<Self> {
        if raw_index > width.max_raw_index() {
            return Err(SelectError::InvalidArgument(format!(
                "raw index {raw_index} does not fit in {width}"
            )));
        }
        let bits = format!("{raw_index:0w$b}", w = width.bits() as usize);
        Ok(Self {
            bits,
            width,
            raw_index,
        })
    }

    /// The bitstring as received.
    pub fn bits(&self) -> &str {
        &self.bits
    }

    /// Width the sample was validated against.
    pub fn width(&self) -> BitWidth {
        self.width
    }

    /// Unsigned big-endian value of the bitstring.
    pub fn raw_index(&self) -> u64 {
        self.raw_index
    }
}

impl std::fmt::Display for RawSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.bits)
    }
}

/// Map a raw index onto `0..len`.
pub fn reduce(raw_index: u64, len: NonZeroUsize) -> usize {
    // raw % len < len, so the narrowing is lossless.
    (u128::from(raw_index) % len.get() as u128) as usize
}

/// Select from `items` with an already drawn sample.
///
/// The result is a pure function of the sample and the collection. The
/// sample must have the width [`BitWidth::for_len`] gives for `items.len()`.
pub fn pick<'a, T>(items: &'a [T], sample: &RawSample) -> SelectResult<(usize, &'a T)> {
    let len = NonZeroUsize::new(items.len()).ok_or_else(SelectError::empty_collection)?;
    let width = BitWidth::for_len(len.get())?;
    if sample.width() != width {
        return Err(SelectError::InvalidArgument(format!(
            "sample is {} wide but {} items need {}",
            sample.width(),
            len,
            width
        )));
    }

    let index = reduce(sample.raw_index(), len);
    items
        .get(index)
        .map(|item| (index, item))
        .ok_or_else(|| SelectError::InvalidArgument(format!("index {index} out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(bits: u32) -> BitWidth {
        BitWidth::new(bits).unwrap()
    }

    fn n(len: usize) -> NonZeroUsize {
        NonZeroUsize::new(len).unwrap()
    }

    #[test]
    fn test_parse_extremes() {
        assert_eq!(RawSample::parse("000000", w(6)).unwrap().raw_index(), 0);
        assert_eq!(RawSample::parse("111111", w(6)).unwrap().raw_index(), 63);
        assert_eq!(RawSample::parse("100000", w(6)).unwrap().raw_index(), 32);
        assert_eq!(RawSample::parse("000001", w(6)).unwrap().raw_index(), 1);
    }

    #[test]
    fn test_parse_full_width() {
        let ones = "1".repeat(64);
        assert_eq!(RawSample::parse(&ones, w(64)).unwrap().raw_index(), u64::MAX);
    }

    #[test]
    fn test_parse_wrong_length() {
        let err = RawSample::parse("10", w(6)).unwrap_err();
        assert!(matches!(err, SelectError::ProtocolError(_)));

        let err = RawSample::parse("1010101", w(6)).unwrap_err();
        assert!(matches!(err, SelectError::ProtocolError(_)));

        let err = RawSample::parse("", w(1)).unwrap_err();
        assert!(matches!(err, SelectError::ProtocolError(_)));
    }

    #[test]
    fn test_parse_bad_characters() {
        for bad in ["10201", "1010 ", "0b101", "11x11"] {
            let err = RawSample::parse(bad, w(5)).unwrap_err();
            assert!(matches!(err, SelectError::ProtocolError(_)), "{bad}");
        }
    }

    #[test]
    fn test_from_raw_index() {
        let sample = RawSample::from_raw_index(5, w(4)).unwrap();
        assert_eq!(sample.bits(), "0101");
        assert_eq!(sample.to_string(), "0101");
        assert!(RawSample::from_raw_index(16, w(4)).is_err());
    }

    #[test]
    fn test_reduce_three() {
        let got: Vec<usize> = (0..4).map(|raw| reduce(raw, n(3))).collect();
        assert_eq!(got, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_reduce_large_len() {
        assert_eq!(reduce(u64::MAX, n(usize::MAX)), (u64::MAX as u128 % usize::MAX as u128) as usize);
        assert_eq!(reduce(7, n(1)), 0);
    }

    #[test]
    fn test_pick_last_of_sixty_four() {
        let items: Vec<u32> = (0..64).collect();
        let sample = RawSample::parse("111111", w(6)).unwrap();
        let (index, item) = pick(&items, &sample).unwrap();
        assert_eq!(index, 63);
        assert_eq!(*item, 63);
    }

    #[test]
    fn test_pick_first_of_sixty_four() {
        let items: Vec<u32> = (0..64).collect();
        let sample = RawSample::parse("000000", w(6)).unwrap();
        assert_eq!(pick(&items, &sample).unwrap(), (0, &0));
    }

    #[test]
    fn test_pick_single_item() {
        let items = ["only"];
        for bits in ["0", "1"] {
            let sample = RawSample::parse(bits, w(1)).unwrap();
            assert_eq!(pick(&items, &sample).unwrap(), (0, &"only"));
        }
    }

    #[test]
    fn test_pick_width_mismatch() {
        let items = [1, 2, 3];
        let sample = RawSample::parse("101", w(3)).unwrap();
        assert!(matches!(
            pick(&items, &sample),
            Err(SelectError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_pick_empty() {
        let items: [u8; 0] = [];
        let sample = RawSample::parse("0", w(1)).unwrap();
        assert!(matches!(
            pick(&items, &sample),
            Err(SelectError::InvalidArgument(_))
        ));
    }
}
