//! Histogram table model for comparing many datasets side by side
//!
//! [`HistogramTableModel`] bins every dataset with uniform, Bayesian Blocks
//! and natural breaks binning, buckets a density curve per dataset into each
//! bin set, and serves the queries a table view needs:
//!
//! - bin boundaries, counts, members and the largest bin population
//! - linear zoom of the uniform bin count
//! - drill-down re-binning of selected cells, falling back to a
//!   [`PointRepresentation`] past the bin-count ceiling
//! - similarity ordering, object-count ordering and silhouettes
//!
//! # Example
//!
//! ```rust
//! use histocomp_binning::MethodKind;
//! use histocomp_core::Dataset;
//! use histocomp_table::{Cell, HistogramTableModel, ModelConfig};
//!
//! let datasets = vec![
//!     Dataset::from_values(vec![1.0, 2.0, 3.0, 4.0, 5.0, 10.0]).unwrap(),
//!     Dataset::from_values(vec![2.0, 3.0, 9.0]).unwrap(),
//! ];
//! let config = ModelConfig::new()
//!     .with_bin_limits(3, 12)
//!     .with_uniform_bins(3)
//!     .with_zoom_min_bins(2)
//!     .with_sample_count(64);
//! let mut model = HistogramTableModel::new(datasets, config).unwrap();
//!
//! assert_eq!(model.objects_per_bin(0, MethodKind::Uniform).unwrap(), vec![3, 2, 1]);
//!
//! let outcome = model.zoom(MethodKind::Uniform, &[Cell::new(0, 0)], 2).unwrap();
//! let zoomed = outcome.cell(Cell::new(0, 0)).unwrap();
//! assert_eq!(zoomed.object_count(), 3);
//! ```

pub mod config;
pub mod model;
pub mod zoom;

pub use config::{BayesianBlocksParameters, DensityParameters, ModelConfig, NaturalBreaksParameters};
pub use model::{HistogramTableModel, MethodTable};
pub use zoom::{zoom_bin, Cell, PointRepresentation, ZoomOutcome, ZoomSelection, ZoomedBin};

pub use histocomp_core::Result;
