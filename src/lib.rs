//! Binning and statistics engine for comparative multi-dataset histograms
//!
//! This crate re-exports the histocomp workspace:
//!
//! - [`types`]: datasets, bins, bin sets, errors and cancellation
//! - [`binning`]: uniform, Bayesian Blocks and natural breaks binning
//! - [`density`]: Gaussian kernel density curves bucketed by bin boundaries
//! - [`similarity`]: chi-squared similarity ordering and silhouettes
//! - [`table`]: the histogram table model with drill-down zoom
//!
//! # Example
//!
//! ```rust
//! use histocomp::prelude::*;
//!
//! let values = [1.0, 1.2, 1.4, 9.0, 9.5, 2.0, 2.1, 8.8];
//! let model = HistogramTableModel::from_flat(
//!     &values,
//!     values.iter().map(|&v| vec![v]).collect(),
//!     vec![5, 3],
//!     ModelConfig::default().with_sample_count(64),
//! )
//! .unwrap();
//!
//! let order = model
//!     .similarity_order(MethodKind::Uniform, &SimilarityReference::Row(0))
//!     .unwrap();
//! assert_eq!(order[0], 0);
//! ```

pub use histocomp_binning as binning;
pub use histocomp_core as types;
pub use histocomp_density as density;
pub use histocomp_similarity as similarity;
pub use histocomp_table as table;

pub use histocomp_core::{Error, Result};

/// Common imports
pub mod prelude {
    pub use histocomp_binning::{
        compute, BinningContext, BinningMethod, BinningStrategy, MethodKind,
    };
    pub use histocomp_core::{
        Bin, BinSet, CancellationToken, Dataset, Error, ObjectRow, Result, ValuePartitioner,
        ValueRange,
    };
    pub use histocomp_density::{Bandwidth, GaussianKde, KernelDensityEstimator};
    pub use histocomp_similarity::{ObjectCountOrder, SimilarityReference};
    pub use histocomp_table::{Cell, HistogramTableModel, ModelConfig, ZoomOutcome, ZoomedBin};
}
