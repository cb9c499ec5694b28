//! Kernel density curves for comparative histograms
//!
//! Fits a Gaussian kernel density estimate per dataset, samples it at evenly
//! spaced points over the dataset's range and re-buckets the samples by a
//! bin set's boundaries so a curve can be drawn inside each histogram bin.
//!
//! ```rust
//! use histocomp_density::{GaussianKde, KernelDensityEstimator};
//!
//! let curve = GaussianKde::new()
//!     .with_sample_count(100)
//!     .estimate(&[1.0, 2.0, 2.5, 3.0, 8.0])
//!     .unwrap();
//! assert_eq!(curve.len(), 100);
//!
//! let binned = curve.bucket(&[1.0, 4.0, 8.0]);
//! assert_eq!(binned.point_count(), 100);
//! ```

pub mod curve;
pub mod kde;
pub mod set;

pub use curve::{BinnedCurve, DensityCurve, DensityPoint};
pub use kde::{Bandwidth, GaussianKde, KernelDensityEstimator, DEFAULT_SAMPLE_COUNT};
pub use set::DensitySet;

pub use histocomp_core::Result;
