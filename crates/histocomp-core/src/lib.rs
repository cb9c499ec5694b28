//! Core types for the histocomp binning engine
//!
//! This crate provides the shared vocabulary of the workspace:
//!
//! - [`Dataset`]: scalar values plus the attribute row of every object
//! - [`BinSet`] / [`Bin`]: an ordered partition of a dataset with its boundaries
//! - [`ValuePartitioner`]: splits a flat value stream into datasets
//! - [`CancellationToken`]: cooperative cancellation for long runs
//! - [`Error`] / [`Result`]: the error type used by every histocomp crate
//!
//! # Example
//!
//! ```rust
//! use histocomp_core::{BinSet, ValuePartitioner};
//!
//! let partitioner = ValuePartitioner::new(vec![3, 3]);
//! let datasets = partitioner
//!     .partition_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 10.0])
//!     .unwrap();
//!
//! let bins = BinSet::from_dataset(&datasets[1], vec![4.0, 7.0, 10.0]).unwrap();
//! assert_eq!(bins.counts(), vec![2, 1]);
//! ```

pub mod bins;
pub mod cancel;
pub mod dataset;
pub mod error;
pub mod partition;

#[cfg(feature = "test-utils")]
pub mod test_data;

pub use bins::{locate, Bin, BinSet};
pub use cancel::{check_cancelled, CancellationToken};
pub use dataset::{Dataset, ObjectRow, ValueRange};
pub use error::{Error, Result};
pub use partition::ValuePartitioner;
