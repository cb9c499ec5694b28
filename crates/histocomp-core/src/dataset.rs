//! Datasets and value ranges

use crate::error::{Error, Result};
use std::sync::Arc;

/// Opaque per-object attribute row, shared between datasets and bins
pub type ObjectRow = Arc<[f64]>;

/// Closed interval `[min, max]` of scalar values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Create a range, swapping the bounds if given in reverse
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Range of a slice, `None` when empty
    pub fn of(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        Some(values.iter().fold(Self::new(first, first), |r, &v| Self {
            min: r.min.min(v),
            max: r.max.max(v),
        }))
    }

    /// Smallest range covering every input range
    pub fn union<I: IntoIterator<Item = ValueRange>>(ranges: I) -> Option<Self> {
        ranges.into_iter().reduce(|a, b| Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// `true` when the range collapses to a single value
    pub fn is_degenerate(&self) -> bool {
        self.span() <= 0.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One dataset: scalar values with the parallel attribute rows they came from
///
/// Values are the 1-D projection the binning strategies operate on; rows are
/// carried through every bin unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    values: Vec<f64>,
    rows: Vec<ObjectRow>,
}

impl Dataset {
    /// Create a dataset from values and their attribute rows
    pub fn new(values: Vec<f64>, rows: Vec<ObjectRow>) -> Result<Self> {
        if values.len() != rows.len() {
            return Err(Error::size_mismatch(values.len(), rows.len(), "dataset rows"));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("dataset"));
        }
        Ok(Self { values, rows })
    }

    pub(crate) fn from_parts(values: Vec<f64>, rows: Vec<ObjectRow>) -> Self {
        debug_assert_eq!(values.len(), rows.len());
        Self { values, rows }
    }

    /// Create a dataset whose attribute rows are just `[value]`
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        let rows = values.iter().map(|&v| ObjectRow::from(vec![v])).collect();
        Self::new(values, rows)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn rows(&self) -> &[ObjectRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value range, `None` for an empty dataset
    pub fn range(&self) -> Option<ValueRange> {
        ValueRange::of(&self.values)
    }

    /// Iterate `(value, row)` pairs in original order
    pub fn iter(&self) -> impl Iterator<Item = (f64, &ObjectRow)> + '_ {
        self.values.iter().copied().zip(self.rows.iter())
    }

    /// Number of distinct values
    pub fn distinct_count(&self) -> usize {
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        sorted.dedup();
        sorted.len()
    }
}
