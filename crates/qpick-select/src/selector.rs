//! The selector itself.

use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{SelectError, SelectResult};
use crate::oracle::RandomnessOracle;
use crate::sample::{self, RawSample};
use crate::width::BitWidth;

/// Outcome of one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection<T> {
    /// The chosen element.
    pub item: T,
    /// The bitstring the oracle returned.
    pub sample: RawSample,
    /// Position of `item` in the collection.
    pub index: usize,
    /// Collection length at the time of selection.
    pub len: usize,
    /// Name of the oracle that produced `sample`.
    pub oracle: String,
}

impl<T> Selection<T> {
    /// Raw value of the sample before reduction.
    pub fn raw_index(&self) -> u64 {
        self.sample.raw_index()
    }

    /// Replace the item, keeping the draw.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Selection<U> {
        Selection {
            item: f(self.item),
            sample: self.sample,
            index: self.index,
            len: self.len,
            oracle: self.oracle,
        }
    }
}

impl<T: Clone> Selection<&T> {
    /// Detach the selection from the borrowed collection.
    pub fn cloned(self) -> Selection<T> {
        self.map(Clone::clone)
    }
}

/// Picks elements of a collection with bits drawn from a [`RandomnessOracle`].
///
/// Every call makes exactly one oracle request, except for an empty
/// collection, which fails before the oracle is touched. The selector keeps
/// no state between calls and can be shared across tasks.
#[derive(Debug, Clone)]
pub struct RandomIndexSelector<O> {
    oracle: O,
}

impl<O: RandomnessOracle> RandomIndexSelector<O> {
    /// Create a selector over `oracle`.
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// The underlying oracle.
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Choose one element of `items`.
    pub async fn select<'a, T>(&self, items: &'a [T]) -> SelectResult<Selection<&'a T>> {
        let (sample, index) = self.draw(items.len()).await?;
        let item = items
            .get(index)
            .ok_or_else(|| SelectError::InvalidArgument(format!("index {index} out of range")))?;

        Ok(Selection {
            item,
            sample,
            index,
            len: items.len(),
            oracle: self.oracle.name().to_string(),
        })
    }

    /// Choose an index in `0..len` without a backing collection.
    pub async fn select_index(&self, len: usize) -> SelectResult<Selection<usize>> {
        let (sample, index) = self.draw(len).await?;
        Ok(Selection {
            item: index,
            sample,
            index,
            len,
            oracle: self.oracle.name().to_string(),
        })
    }

    async fn draw(&self, len: usize) -> SelectResult<(RawSample, usize)> {
        let len = NonZeroUsize::new(len).ok_or_else(SelectError::empty_collection)?;
        let width = BitWidth::for_len(len.get())?;

        debug!(oracle = self.oracle.name(), len = len.get(), bits = width.bits(), "requesting sample");
        let bits = self.oracle.sample_bits(width).await?;
        let sample = RawSample::parse(&bits, width)?;
        let index = sample::reduce(sample.raw_index(), len);

        info!(
            oracle = self.oracle.name(),
            sample = sample.bits(),
            raw = sample.raw_index(),
            index,
            "selected"
        );
        Ok((sample, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Oracle that always answers with the same bits.
    struct FixedOracle {
        bits: String,
        calls: AtomicUsize,
        widths: std::sync::Mutex<Vec<u32>>,
    }

    impl FixedOracle {
        fn new(bits: &str) -> Self {
            Self {
                bits: bits.into(),
                calls: AtomicUsize::new(0),
                widths: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RandomnessOracle for FixedOracle {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn sample_bits(&self, width: BitWidth) -> SelectResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.widths.lock().unwrap().push(width.bits());
            Ok(self.bits.clone())
        }
    }

    /// Oracle that always fails as unreachable.
    struct DownOracle;

    #[async_trait]
    impl RandomnessOracle for DownOracle {
        fn name(&self) -> &str {
            "down"
        }

        async fn sample_bits(&self, _width: BitWidth) -> SelectResult<String> {
            Err(SelectError::OracleUnavailable(
                qpick_hal::HalError::BackendUnavailable("offline".into()),
            ))
        }
    }

    fn animals() -> Vec<&'static str> {
        crate::catalog::ANIMALS.to_vec()
    }

    #[tokio::test]
    async fn test_all_zeros_picks_first() {
        let selector = RandomIndexSelector::new(FixedOracle::new("000000"));
        let items = animals();

        let selection = selector.select(&items).await.unwrap();
        assert_eq!(*selection.item, "Lion");
        assert_eq!(selection.index, 0);
        assert_eq!(selection.raw_index(), 0);
        assert_eq!(selection.sample.bits(), "000000");
        assert_eq!(selection.len, 64);
        assert_eq!(selection.oracle, "fixed");
    }

    #[tokio::test]
    async fn test_all_ones_picks_last() {
        let selector = RandomIndexSelector::new(FixedOracle::new("111111"));
        let items = animals();

        let selection = selector.select(&items).await.unwrap();
        assert_eq!(selection.index, 63);
        assert_eq!(*selection.item, "Firefly");
    }

    #[tokio::test]
    async fn test_wraps_around_for_three_items() {
        let items = ["a", "b", "c"];
        for (bits, expected) in [("00", "a"), ("01", "b"), ("10", "c"), ("11", "a")] {
            let selector = RandomIndexSelector::new(FixedOracle::new(bits));
            let selection = selector.select(&items).await.unwrap();
            assert_eq!(*selection.item, expected, "bits {bits}");
        }
    }

    #[tokio::test]
    async fn test_requests_width_for_len() {
        let oracle = FixedOracle::new("0000000");
        let selector = RandomIndexSelector::new(oracle);
        let items: Vec<u32> = (0..65).collect();

        selector.select(&items).await.unwrap();
        assert_eq!(*selector.oracle().widths.lock().unwrap(), vec![7]);
    }

    #[tokio::test]
    async fn test_single_item() {
        for bits in ["0", "1"] {
            let selector = RandomIndexSelector::new(FixedOracle::new(bits));
            let selection = selector.select(&["solo"]).await.unwrap();
            assert_eq!(*selection.item, "solo");
            assert_eq!(selection.index, 0);
            assert_eq!(selector.oracle().calls(), 1);
        }
    }

    #[tokio::test]
    async fn test_empty_makes_no_oracle_call() {
        let selector = RandomIndexSelector::new(FixedOracle::new("0"));
        let items: Vec<String> = Vec::new();

        let err = selector.select(&items).await.unwrap_err();
        assert!(matches!(err, SelectError::InvalidArgument(_)));
        assert_eq!(selector.oracle().calls(), 0);

        let err = selector.select_index(0).await.unwrap_err();
        assert!(matches!(err, SelectError::InvalidArgument(_)));
        assert_eq!(selector.oracle().calls(), 0);
    }

    #[tokio::test]
    async fn test_short_sample_is_protocol_error() {
        let selector = RandomIndexSelector::new(FixedOracle::new("10"));
        let items = animals();

        let err = selector.select(&items).await.unwrap_err();
        assert!(matches!(err, SelectError::ProtocolError(_)));
        assert_eq!(selector.oracle().calls(), 1);
    }

    #[tokio::test]
    async fn test_non_binary_sample_is_protocol_error() {
        let selector = RandomIndexSelector::new(FixedOracle::new("1O1"));
        let err = selector.select(&[1, 2, 3, 4, 5]).await.unwrap_err();
        assert!(matches!(err, SelectError::ProtocolError(_)));
    }

    #[tokio::test]
    async fn test_oracle_failure_propagates() {
        let selector = RandomIndexSelector::new(DownOracle);
        let err = selector.select(&[1, 2]).await.unwrap_err();
        assert!(matches!(err, SelectError::OracleUnavailable(_)));
    }

    #[tokio::test]
    async fn test_same_sample_same_choice() {
        let items = animals();
        let first = RandomIndexSelector::new(FixedOracle::new("101010"))
            .select(&items)
            .await
            .unwrap();
        let second = RandomIndexSelector::new(FixedOracle::new("101010"))
            .select(&items)
            .await
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first.index, 42);
    }

    #[tokio::test]
    async fn test_select_index() {
        let selector = RandomIndexSelector::new(FixedOracle::new("110"));
        let selection = selector.select_index(5).await.unwrap();
        assert_eq!(selection.raw_index(), 6);
        assert_eq!(selection.item, 1);
        assert_eq!(selection.index, 1);
    }

    #[tokio::test]
    async fn test_cloned_and_serialized() {
        let selector = RandomIndexSelector::new(FixedOracle::new("01"));
        let items = vec!["x".to_string(), "y".to_string(), "z".to_string()];

        let selection = selector.select(&items).await.unwrap().cloned();
        assert_eq!(selection.item, "y");

        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json["item"], "y");
        assert_eq!(json["index"], 1);
        assert_eq!(json["sample"]["bits"], "01");
        assert_eq!(json["sample"]["raw_index"], 1);
        assert_eq!(json["oracle"], "fixed");
    }
}
