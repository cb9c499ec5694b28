//! Bins and bin sets
//!
//! A [`BinSet`] is the output of one binning run over one dataset: an ordered
//! partition of the dataset's values (and their object rows) plus the
//! `bins + 1` boundaries delimiting it. Bin sets are immutable once built;
//! recomputing produces a new one.

use crate::dataset::{Dataset, ObjectRow};
use crate::error::{Error, Result};

/// Members of one partition interval
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bin {
    values: Vec<f64>,
    rows: Vec<ObjectRow>,
}

impl Bin {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, value: f64, row: ObjectRow) {
        self.values.push(value);
        self.rows.push(row);
    }

    /// Member values, in dataset order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Object rows parallel to [`Bin::values`]
    pub fn rows(&self) -> &[ObjectRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mean member value, `None` for an empty bin
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
        }
    }

    pub fn min(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.values.iter().copied().reduce(f64::max)
    }

    /// Members as a standalone dataset, for drill-down
    pub fn to_dataset(&self) -> Dataset {
        // Members already passed dataset validation.
        Dataset::from_parts(self.values.clone(), self.rows.clone())
    }
}

/// Find the bin holding `value` for the given boundaries
///
/// Bins are half-open `[b_i, b_{i+1})` except the last, which also holds its
/// upper boundary. Values outside the boundaries clamp to the nearest end bin.
pub fn locate(boundaries: &[f64], value: f64) -> usize {
    let bins = boundaries.len().saturating_sub(1);
    if bins <= 1 {
        return 0;
    }
    let idx = boundaries.partition_point(|&b| b <= value);
    idx.saturating_sub(1).min(bins - 1)
}

/// Ordered bins and boundaries for one dataset under one binning method
#[derive(Debug, Clone, PartialEq)]
pub struct BinSet {
    bins: Vec<Bin>,
    boundaries: Vec<f64>,
}

impl BinSet {
    /// Bucket values by binary search against `boundaries`
    pub fn from_boundaries(
        values: &[f64],
        rows: &[ObjectRow],
        boundaries: Vec<f64>,
    ) -> Result<Self> {
        validate_boundaries(&boundaries)?;
        if values.len() != rows.len() {
            return Err(Error::size_mismatch(values.len(), rows.len(), "bin set rows"));
        }
        let mut bins = vec![Bin::new(); boundaries.len() - 1];
        for (&v, row) in values.iter().zip(rows) {
            bins[locate(&boundaries, v)].push(v, row.clone());
        }
        Ok(Self { bins, boundaries })
    }

    /// Bucket a whole dataset by binary search against `boundaries`
    pub fn from_dataset(dataset: &Dataset, boundaries: Vec<f64>) -> Result<Self> {
        Self::from_boundaries(dataset.values(), dataset.rows(), boundaries)
    }

    /// Bucket values by a precomputed bin index per value
    pub fn from_assignment(
        dataset: &Dataset,
        assignment: &[usize],
        boundaries: Vec<f64>,
    ) -> Result<Self> {
        validate_boundaries(&boundaries)?;
        if assignment.len() != dataset.len() {
            return Err(Error::size_mismatch(
                dataset.len(),
                assignment.len(),
                "bin assignment",
            ));
        }
        let n_bins = boundaries.len() - 1;
        let mut bins = vec![Bin::new(); n_bins];
        for ((v, row), &b) in dataset.iter().zip(assignment) {
            if b >= n_bins {
                return Err(Error::out_of_range("bin", b, n_bins));
            }
            bins[b].push(v, row.clone());
        }
        Ok(Self { bins, boundaries })
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn bin(&self, index: usize) -> Option<&Bin> {
        self.bins.get(index)
    }

    /// `bins + 1` boundaries, non-decreasing
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Member count per bin
    pub fn counts(&self) -> Vec<usize> {
        self.bins.iter().map(Bin::len).collect()
    }

    pub fn total_count(&self) -> usize {
        self.bins.iter().map(Bin::len).sum()
    }

    /// Largest bin population
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(Bin::len).max().unwrap_or(0)
    }

    /// Index of the bin that holds `value`
    pub fn locate(&self, value: f64) -> usize {
        locate(&self.boundaries, value)
    }
}

fn validate_boundaries(boundaries: &[f64]) -> Result<()> {
    if boundaries.len() < 2 {
        return Err(Error::InvalidParameter(format!(
            "a bin set needs at least 2 boundaries, got {}",
            boundaries.len()
        )));
    }
    if boundaries.iter().any(|b| !b.is_finite()) {
        return Err(Error::non_finite("bin boundaries"));
    }
    // A single degenerate bin [v, v] is the only non-strict case.
    let degenerate = boundaries.len() == 2 && boundaries[0] == boundaries[1];
    if !degenerate && boundaries.windows(2).any(|w| w[0] >= w[1]) {
        return Err(Error::InvalidParameter(
            "bin boundaries must be strictly increasing".to_string(),
        ));
    }
    Ok(())
}
