//! Producer-side scheduling of sort work.
//!
//! The coordinator runs next to the camera. Each frame it learns the current
//! view, decides whether the draw order has gone stale, and dispatches at
//! most one request to the worker. Requests arriving while a sort is in
//! flight are coalesced into the next dispatch, never queued.

/// At-most-one-in-flight gate.
pub mod gate;

/// Detects view rotations large enough to invalidate the draw order.
pub mod view_tracker;

/// Dirty tracking plus single-flight dispatch.
pub mod sort_coordinator;

/// Coordinator paired with a worker transport.
pub mod service;

pub use gate::SingleFlight;
pub use service::SortService;
pub use sort_coordinator::SortCoordinator;
pub use view_tracker::ViewChangeTracker;
