//! Similarity metrics over binned datasets
//!
//! - [`similarity_order`]: rank datasets by chi-squared distance of their bin
//!   counts from a reference row or a selection of its cells
//! - [`ObjectCountOrder`]: rank datasets by size
//! - [`silhouette`]: how well a binning separates a dataset's values

pub mod chi_squared;
pub mod silhouette;

pub use chi_squared::{
    chi_squared_distance, similarity_distances, similarity_order, ObjectCountOrder,
    SimilarityReference,
};
pub use silhouette::{object_silhouettes, silhouette, silhouettes};

pub use histocomp_core::Result;
