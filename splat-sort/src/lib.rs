//! Background depth ordering for view-dependent splat rendering.
//!
//! Alpha-blended splats must be drawn in depth order relative to the current
//! camera. This crate keeps that order fresh without blocking the frame loop:
//!
//! - [`depth`] projects each splat onto the view's forward axis.
//! - [`engine`] orders the resulting keys with one of three interchangeable
//!   algorithms ([`SortAlgorithm`]).
//! - [`worker`] owns the element set on a background context and reorders the
//!   attribute buffers into depth order.
//! - [`coordinator`] decides on the producer side when the view has changed
//!   enough to re-sort, and keeps at most one request in flight.
//!
//! ```
//! use glam::Mat4;
//! use splat_sort::{SortAlgorithm, SortService, SplatCloud, SortWorkerHandle};
//!
//! let cloud = SplatCloud::new(
//!     vec![0.0, 0.0, 2.0, 0.0, 0.0, 1.0],
//!     vec![1.0; 6],
//!     vec![1.0; 2],
//!     vec![0.0; 12],
//!     2,
//! )
//! .unwrap();
//!
//! let mut service = SortService::new(SortWorkerHandle::inline());
//! service.load(cloud).unwrap();
//! service.observe_view(Mat4::IDENTITY);
//! service.dispatch(Mat4::IDENTITY, 2, SortAlgorithm::QuickSort).unwrap();
//!
//! let result = service.poll().unwrap().expect("inline worker answers immediately");
//! assert_eq!(result.order, vec![1, 0]);
//! ```

mod clock;
pub mod cloud;
pub mod coordinator;
pub mod depth;
pub mod engine;
mod error;
pub mod worker;

pub use cloud::SplatCloud;
pub use coordinator::{SingleFlight, SortCoordinator, SortService, ViewChangeTracker};
pub use engine::{DepthSort, SortAlgorithm, SortEngine};
pub use error::{SplatError, WorkerError};
pub use worker::{SortRequest, SortResult, SortWorker, SortWorkerHandle, WorkerRequest};
