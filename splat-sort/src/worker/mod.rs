//! The background side of depth sorting.
//!
//! The worker owns the full element set after load and answers sort
//! requests with depth-ordered attribute buffers. It is reached only
//! through messages, so the producer never shares mutable memory with it.

/// Messages exchanged between the producer and the worker.
pub mod protocol;

/// Worker state: the loaded element set, reusable scratch and the sort cycle.
pub mod sort_worker;

/// Transport to a worker running on its own thread, or inline where threads are unavailable.
pub mod handle;

pub use handle::SortWorkerHandle;
pub use protocol::{SortRequest, SortResult, WorkerRequest};
pub use sort_worker::SortWorker;
