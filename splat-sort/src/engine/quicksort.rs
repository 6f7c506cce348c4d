use super::DepthSort;

/// Hoare-partition quicksort with a middle-element pivot.
///
/// Keys and indices are swapped together so they stay synchronised. Average
/// cost is O(n log n); adversarial key distributions degrade to O(n²). The
/// smaller partition is recursed into and the larger one is looped over, so
/// stack depth stays logarithmic even in the worst case.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuickSort;

impl DepthSort for QuickSort {
    fn sort(&mut self, keys: &mut [f32], indices: &mut [u32]) {
        if keys.len() > 1 {
            quicksort(keys, indices, 0, keys.len() - 1);
        }
    }
}

fn quicksort(keys: &mut [f32], indices: &mut [u32], mut lo: usize, mut hi: usize) {
    while lo < hi {
        let p = partition(keys, indices, lo, hi);

        if p - lo + 1 < hi - p {
            quicksort(keys, indices, lo, p);
            lo = p + 1;
        } else {
            quicksort(keys, indices, p + 1, hi);
            hi = p;
        }
    }
}

/// Partition `[lo, hi]` around the middle key. Returns `p` with `lo <= p < hi`
/// such that every key in `[lo, p]` is `<=` every key in `[p + 1, hi]`.
fn partition(keys: &mut [f32], indices: &mut [u32], lo: usize, hi: usize) -> usize {
    let pivot = keys[lo + (hi - lo) / 2];
    let mut i = lo;
    let mut j = hi;

    loop {
        while keys[i] < pivot {
            i += 1;
        }
        while keys[j] > pivot {
            j -= 1;
        }

        if i >= j {
            return j;
        }

        keys.swap(i, j);
        indices.swap(i, j);
        i += 1;
        j -= 1;
    }
}
