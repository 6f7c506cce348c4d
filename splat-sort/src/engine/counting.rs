use constants::sorting::COUNTING_SORT_BUCKETS;

use super::DepthSort;

/// Maps depth keys onto `COUNTING_SORT_BUCKETS` uniform bins spanning
/// `[min_key, max_key]`.
///
/// A zero-width or non-finite range sends every key to bucket 0, and the
/// maximum key is clamped into the last bucket. The range is taken in f64 so
/// finite keys at opposite ends of the f32 range still spread out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketQuantizer {
    min: f64,
    scale: f64,
}

impl BucketQuantizer {
    pub fn from_keys(keys: &[f32]) -> Self {
        let (min, max) = keys
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &key| {
                (min.min(key), max.max(key))
            });

        let (min, max) = (f64::from(min), f64::from(max));
        let range = max - min;
        let scale = if range > 0.0 && range.is_finite() {
            COUNTING_SORT_BUCKETS as f64 / range
        } else {
            0.0
        };

        Self { min, scale }
    }

    #[inline]
    pub fn bucket(&self, key: f32) -> usize {
        if self.scale == 0.0 {
            return 0;
        }
        // Float-to-int casts saturate and map NaN to 0.
        let bucket = ((f64::from(key) - self.min) * self.scale) as usize;
        bucket.min(COUNTING_SORT_BUCKETS - 1)
    }
}

/// Single-pass 16-bit counting sort.
///
/// Keys are quantised, bucket occupancy is counted, bucket starts are
/// prefix-summed and indices are scattered into their slots in one linear
/// pass. Within a bucket the input order is kept, so precision is bounded by
/// the bucket width.
#[derive(Debug)]
pub struct CountingSort {
    buckets: Vec<u32>,
    starts: Vec<u32>,
    scattered_keys: Vec<f32>,
    scattered_indices: Vec<u32>,
}

impl Default for CountingSort {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl CountingSort {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buckets: Vec::with_capacity(capacity),
            starts: vec![0; COUNTING_SORT_BUCKETS],
            scattered_keys: Vec::with_capacity(capacity),
            scattered_indices: Vec::with_capacity(capacity),
        }
    }
}

impl DepthSort for CountingSort {
    fn sort(&mut self, keys: &mut [f32], indices: &mut [u32]) {
        let count = keys.len();
        if count < 2 {
            return;
        }

        let quantizer = BucketQuantizer::from_keys(keys);

        self.buckets.clear();
        self.buckets
            .extend(keys.iter().map(|&key| quantizer.bucket(key) as u32));

        self.starts.fill(0);
        for &bucket in &self.buckets {
            self.starts[bucket as usize] += 1;
        }

        let mut running = 0;
        for start in self.starts.iter_mut() {
            let occupancy = *start;
            *start = running;
            running += occupancy;
        }

        self.scattered_keys.resize(count, 0.0);
        self.scattered_indices.resize(count, 0);
        for (i, &bucket) in self.buckets.iter().enumerate() {
            let slot = &mut self.starts[bucket as usize];
            let destination = *slot as usize;
            *slot += 1;

            self.scattered_keys[destination] = keys[i];
            self.scattered_indices[destination] = indices[i];
        }

        keys.copy_from_slice(&self.scattered_keys[..count]);
        indices.copy_from_slice(&self.scattered_indices[..count]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut keys: Vec<f32>) -> Vec<u32> {
        let mut indices: Vec<u32> = (0..keys.len() as u32).collect();
        CountingSort::default().sort(&mut keys, &mut indices);
        indices
    }

    #[test]
    fn sorts_scenario_keys() {
        assert_eq!(sorted(vec![0.0, 1.0, 2.0, -1.0, 0.5]), vec![3, 0, 4, 1, 2]);
    }

    #[test]
    fn equal_keys_fall_back_to_bucket_zero() {
        let keys = [7.25; 5];
        let quantizer = BucketQuantizer::from_keys(&keys);
        assert_eq!(quantizer.bucket(7.25), 0);

        assert_eq!(sorted(keys.to_vec()), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn max_key_lands_in_last_bucket() {
        let quantizer = BucketQuantizer::from_keys(&[-2.0, 6.0]);
        assert_eq!(quantizer.bucket(-2.0), 0);
        assert_eq!(quantizer.bucket(6.0), COUNTING_SORT_BUCKETS - 1);
    }

    #[test]
    fn non_finite_range_does_not_panic() {
        let mut indices = sorted(vec![f32::INFINITY, 1.0, f32::NEG_INFINITY, f32::NAN]);
        indices.sort_unstable();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn keys_spanning_the_whole_f32_range_are_ordered() {
        let mut keys = vec![3e38, -3e38, 0.0, 1e38];
        let mut indices: Vec<u32> = (0..4).collect();
        CountingSort::default().sort(&mut keys, &mut indices);

        assert_eq!(indices, vec![1, 2, 3, 0]);
        assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]), "{keys:?}");
    }

    #[test]
    fn ties_within_a_bucket_keep_input_order() {
        // 1e-9 apart is far below one bucket width for this range.
        assert_eq!(sorted(vec![10.0, 0.0, 1e-9, 0.0]), vec![1, 2, 3, 0]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let keys: Vec<f32> = (0..500).map(|i| ((i * 7919) % 1013) as f32 * 0.37).collect();
        let mut sorter = CountingSort::default();

        let mut first_keys = keys.clone();
        let mut first: Vec<u32> = (0..500).collect();
        sorter.sort(&mut first_keys, &mut first);

        let mut second_keys = keys.clone();
        let mut second: Vec<u32> = (0..500).collect();
        sorter.sort(&mut second_keys, &mut second);

        assert_eq!(first, second);
    }
}
