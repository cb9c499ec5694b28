//! Binning strategies for comparative histograms
//!
//! Three ways of partitioning one dataset's values into bins, all producing a
//! [`histocomp_core::BinSet`]:
//!
//! - **Uniform**: equal-width bins over a range shared by all datasets
//! - **Bayesian Blocks**: adaptive changepoints (Scargle et al.)
//! - **Natural breaks**: Jenks–Fisher optimal classes, class count chosen by
//!   goodness of variance fit
//!
//! Every strategy implements [`BinningStrategy`]; [`BinningMethod`] is the
//! closed enum used to select one at runtime.
//!
//! # Examples
//!
//! ```rust
//! use histocomp_binning::{BinningContext, BinningStrategy, UniformBinning};
//! use histocomp_core::Dataset;
//!
//! let data = Dataset::from_values(vec![1.0, 2.0, 3.0, 4.0, 5.0, 10.0]).unwrap();
//! let bins = UniformBinning::new(3).bin(&data, &BinningContext::new()).unwrap();
//! assert_eq!(bins.counts(), vec![3, 2, 1]);
//! ```
//!
//! ```rust
//! use histocomp_binning::{compute, BinningContext, BinningMethod, MethodKind};
//! use histocomp_core::Dataset;
//!
//! let data = Dataset::from_values(vec![4.0, 5.0, 9.0, 10.0]).unwrap();
//! let method = BinningMethod::default_for(MethodKind::NaturalBreaks);
//! let bins = compute(&data, &method, &BinningContext::new()).unwrap();
//! assert_eq!(bins.total_count(), 4);
//! ```

pub mod bayesian_blocks;
pub mod method;
pub mod natural_breaks;
pub mod traits;
pub mod uniform;

pub use bayesian_blocks::{blocks, blocks_weighted, BayesianBlocksBinning};
pub use method::{compute, compute_all, BinningMethod, MethodKind};
pub use natural_breaks::{
    goodness_of_variance_fit, jenks_fisher, NaturalBreaksBinning, NaturalBreaksReport,
};
pub use traits::{BinningContext, BinningStrategy};
pub use uniform::UniformBinning;

pub use histocomp_core::Result;
