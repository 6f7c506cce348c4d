/// Errors raised while assembling an element set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplatError {
    #[error("{attribute} holds {actual} values, expected {expected} for {count} splats")]
    AttributeLength {
        attribute: &'static str,
        expected: usize,
        actual: usize,
        count: usize,
    },
}

/// Errors crossing the producer/worker boundary.
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("failed to spawn sort worker: {0}")]
    SpawnFailed(#[from] std::io::Error),

    #[error("sort worker disconnected")]
    Disconnected,
}
