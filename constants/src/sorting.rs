/// Number of uniform buckets used by the counting sort (`256 * 256`).
pub const COUNTING_SORT_BUCKETS: usize = 256 * 256;

/// Tolerance on `|dot - 1|` between the forward rows of two view-projection
/// matrices before the draw order is considered stale.
pub const VIEW_DIRTY_THRESHOLD: f32 = 0.01;

/// Default cap on the number of splats sorted and drawn each cycle.
pub const DEFAULT_MAX_SPLATS: usize = 1_000_000;

/// Name given to the background sorting thread on native targets.
pub const SORT_WORKER_THREAD_NAME: &str = "splat-sort-worker";
