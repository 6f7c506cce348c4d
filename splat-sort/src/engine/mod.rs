//! Interchangeable depth-ordering algorithms behind a common interface.
//!
//! Every algorithm receives a slice of depth keys and a parallel slice of
//! splat indices and leaves the indices ordered by ascending key. Tie order
//! is unspecified and differs between algorithms.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generic `(key, index)` sort by key.
pub mod comparator;

/// Linear-time bucketed sort over a fixed number of uniform depth bins.
pub mod counting;

/// In-place Hoare-partition quicksort over the key and index slices.
pub mod quicksort;

pub use comparator::ComparatorSort;
pub use counting::{BucketQuantizer, CountingSort};
pub use quicksort::QuickSort;

/// Runtime-selectable sorting strategy.
///
/// Any strategy is a visually correct substitute for any other; they differ
/// only in throughput and tie precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAlgorithm {
    #[serde(alias = "Array.sort")]
    Comparator,
    #[serde(alias = "quick sort")]
    QuickSort,
    #[default]
    #[serde(alias = "count sort")]
    CountingSort,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 3] = [
        SortAlgorithm::CountingSort,
        SortAlgorithm::QuickSort,
        SortAlgorithm::Comparator,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SortAlgorithm::Comparator => "comparator",
            SortAlgorithm::QuickSort => "quick_sort",
            SortAlgorithm::CountingSort => "counting_sort",
        }
    }

    /// Parse a strategy from its snake_case name or its legacy display name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "comparator" | "Array.sort" => Some(SortAlgorithm::Comparator),
            "quick_sort" | "quick sort" => Some(SortAlgorithm::QuickSort),
            "counting_sort" | "count sort" => Some(SortAlgorithm::CountingSort),
            _ => None,
        }
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Orders a pair of parallel key/index slices by ascending key.
pub trait DepthSort {
    /// `keys` and `indices` have equal length. On return `indices` is a
    /// permutation of its input ordered by ascending key, and `keys[j]` is the
    /// key that belongs to `indices[j]`.
    fn sort(&mut self, keys: &mut [f32], indices: &mut [u32]);
}

/// Owns one instance of every strategy along with its scratch memory, so
/// switching strategies between cycles never reallocates.
#[derive(Debug, Default)]
pub struct SortEngine {
    comparator: ComparatorSort,
    quicksort: QuickSort,
    counting: CountingSort,
}

impl SortEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size scratch buffers for up to `capacity` splats.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            comparator: ComparatorSort::with_capacity(capacity),
            quicksort: QuickSort,
            counting: CountingSort::with_capacity(capacity),
        }
    }

    pub fn sorter(&mut self, algorithm: SortAlgorithm) -> &mut dyn DepthSort {
        match algorithm {
            SortAlgorithm::Comparator => &mut self.comparator,
            SortAlgorithm::QuickSort => &mut self.quicksort,
            SortAlgorithm::CountingSort => &mut self.counting,
        }
    }

    pub fn sort(&mut self, algorithm: SortAlgorithm, keys: &mut [f32], indices: &mut [u32]) {
        assert_eq!(
            keys.len(),
            indices.len(),
            "depth keys and indices must be parallel"
        );
        self.sorter(algorithm).sort(keys, indices);
    }
}

/// Reset `indices` to the identity permutation `[0, n)`.
pub fn reset_indices(indices: &mut [u32]) {
    for (i, index) in indices.iter_mut().enumerate() {
        *index = i as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_names_deserialise() {
        let parsed: Vec<SortAlgorithm> =
            serde_json::from_str(r#"["Array.sort", "quick sort", "count sort", "quick_sort"]"#)
                .unwrap();

        assert_eq!(
            parsed,
            vec![
                SortAlgorithm::Comparator,
                SortAlgorithm::QuickSort,
                SortAlgorithm::CountingSort,
                SortAlgorithm::QuickSort,
            ]
        );
    }

    #[test]
    fn names_round_trip_through_from_name() {
        for algorithm in SortAlgorithm::ALL {
            assert_eq!(SortAlgorithm::from_name(algorithm.name()), Some(algorithm));
        }
        assert_eq!(SortAlgorithm::from_name("radix"), None);
    }

    #[test]
    fn engine_dispatches_each_strategy() {
        let mut engine = SortEngine::with_capacity(4);

        for algorithm in SortAlgorithm::ALL {
            let mut keys = [3.0, -1.0, 2.0, 0.0];
            let mut indices = [0, 1, 2, 3];
            engine.sort(algorithm, &mut keys, &mut indices);
            assert_eq!(indices, [1, 3, 2, 0], "{algorithm}");
            assert_eq!(keys, [-1.0, 0.0, 2.0, 3.0], "{algorithm}");
        }
    }

    #[test]
    fn reset_indices_builds_identity() {
        let mut indices = [9, 9, 9];
        reset_indices(&mut indices);
        assert_eq!(indices, [0, 1, 2]);
    }
}
