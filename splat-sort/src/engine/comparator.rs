use rayon::prelude::*;

use super::DepthSort;

/// Sorts `(key, index)` pairs by key with the library's unstable parallel sort.
#[derive(Debug, Default)]
pub struct ComparatorSort {
    pairs: Vec<(f32, u32)>,
}

impl ComparatorSort {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(capacity),
        }
    }
}

impl DepthSort for ComparatorSort {
    fn sort(&mut self, keys: &mut [f32], indices: &mut [u32]) {
        self.pairs.clear();
        self.pairs
            .extend(keys.iter().copied().zip(indices.iter().copied()));

        self.pairs.par_sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

        for ((key, index), &(sorted_key, sorted_index)) in
            keys.iter_mut().zip(indices.iter_mut()).zip(&self.pairs)
        {
            *key = sorted_key;
            *index = sorted_index;
        }
    }
}
