//! Chi-squared row distance and similarity ordering
//!
//! The distance is asymmetric: the reference row plays the role of the
//! expected distribution and every other dataset is scored against it.

use histocomp_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Chi-squared distance of `observed` from `expected`
///
/// `Σ (o - e)² / e`, with the term replaced by `o²` where `e == 0`.
pub fn chi_squared_distance(observed: &[f64], expected: &[f64]) -> Result<f64> {
    if observed.len() != expected.len() {
        return Err(Error::size_mismatch(
            expected.len(),
            observed.len(),
            "chi-squared bin counts",
        ));
    }
    let distance: f64 = observed
        .iter()
        .zip(expected)
        .map(|(&o, &e)| {
            let diff = o - e;
            if e == 0.0 {
                diff * diff
            } else {
                diff * diff / e
            }
        })
        .sum();
    Ok(if distance.is_nan() { 0.0 } else { distance })
}

/// What the datasets are compared against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityReference {
    /// A whole dataset row
    Row(usize),
    /// Picked bins of one dataset row; only those bins are compared
    Cells { dataset: usize, bins: Vec<usize> },
}

impl SimilarityReference {
    pub fn dataset(&self) -> usize {
        match self {
            SimilarityReference::Row(d) => *d,
            SimilarityReference::Cells { dataset, .. } => *dataset,
        }
    }
}

/// Distance of every dataset's bin counts from the reference
///
/// Rows of different length are compared as if padded with empty bins.
pub fn similarity_distances(counts: &[Vec<usize>], reference: &SimilarityReference) -> Result<Vec<f64>> {
    let ref_index = reference.dataset();
    let ref_row = counts
        .get(ref_index)
        .ok_or_else(|| Error::out_of_range("dataset", ref_index, counts.len()))?;

    let columns: Vec<usize> = match reference {
        SimilarityReference::Row(_) => {
            let width = counts.iter().map(Vec::len).max().unwrap_or(0);
            (0..width).collect()
        }
        SimilarityReference::Cells { bins, .. } => {
            if let Some(&b) = bins.iter().find(|&&b| b >= ref_row.len()) {
                return Err(Error::out_of_range("bin", b, ref_row.len()));
            }
            bins.clone()
        }
    };

    let pick = |row: &[usize]| -> Vec<f64> {
        columns
            .iter()
            .map(|&c| row.get(c).copied().unwrap_or(0) as f64)
            .collect()
    };
    let expected = pick(ref_row);

    counts
        .iter()
        .enumerate()
        .map(|(d, row)| {
            if d == ref_index {
                Ok(0.0)
            } else {
                chi_squared_distance(&pick(row), &expected)
            }
        })
        .collect()
}

/// Dataset indices ordered by similarity to the reference
///
/// The reference comes first; the rest follow by ascending distance, ties
/// keeping their original order.
pub fn similarity_order(counts: &[Vec<usize>], reference: &SimilarityReference) -> Result<Vec<usize>> {
    let distances = similarity_distances(counts, reference)?;
    let ref_index = reference.dataset();

    let mut order: Vec<usize> = (0..counts.len()).filter(|&d| d != ref_index).collect();
    order.sort_by(|&a, &b| distances[a].total_cmp(&distances[b]));
    order.insert(0, ref_index);

    debug!(reference = ref_index, ?order, "similarity order");
    Ok(order)
}

/// Ordering of datasets by their number of objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ObjectCountOrder {
    /// Input order
    #[default]
    Original,
    /// Fewest objects first
    Ascending,
    /// Most objects first
    Descending,
}

impl ObjectCountOrder {
    /// Dataset indices for the given per-dataset object counts, stable on ties
    pub fn order(&self, object_counts: &[usize]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..object_counts.len()).collect();
        match self {
            ObjectCountOrder::Original => {}
            ObjectCountOrder::Ascending => order.sort_by_key(|&d| object_counts[d]),
            ObjectCountOrder::Descending => {
                order.sort_by(|&a, &b| object_counts[b].cmp(&object_counts[a]))
            }
        }
        order
    }
}
