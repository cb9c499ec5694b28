//! Splitting a flat value stream into per-dataset segments

use crate::dataset::{Dataset, ObjectRow};
use crate::error::{Error, Result};

/// Splits a flat value sequence into datasets by known object counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuePartitioner {
    counts: Vec<usize>,
}

impl ValuePartitioner {
    /// Create a partitioner for datasets of the given object counts
    pub fn new(counts: Vec<usize>) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of values expected across all datasets
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Split `values` and their parallel attribute rows, preserving order
    pub fn partition<R>(&self, values: &[f64], rows: Vec<R>) -> Result<Vec<Dataset>>
    where
        R: Into<ObjectRow>,
    {
        let total = self.total();
        if values.len() != total {
            return Err(Error::size_mismatch(total, values.len(), "value partition"));
        }
        if rows.len() != total {
            return Err(Error::size_mismatch(total, rows.len(), "row partition"));
        }

        let mut rows = rows.into_iter().map(|r| -> ObjectRow { r.into() });
        let mut offset = 0;
        let mut datasets = Vec::with_capacity(self.counts.len());
        for &count in &self.counts {
            let segment = values[offset..offset + count].to_vec();
            let segment_rows: Vec<ObjectRow> = rows.by_ref().take(count).collect();
            datasets.push(Dataset::new(segment, segment_rows)?);
            offset += count;
        }
        Ok(datasets)
    }

    /// Split values whose attribute rows are just the value itself
    pub fn partition_values(&self, values: &[f64]) -> Result<Vec<Dataset>> {
        let rows: Vec<Vec<f64>> = values.iter().map(|&v| vec![v]).collect();
        self.partition(values, rows)
    }

    /// Split a `(dataset index, value)` stream
    ///
    /// Tags must appear grouped in ascending dataset order and agree with the
    /// configured counts.
    pub fn partition_tagged<R>(&self, tagged: &[(usize, f64)], rows: Vec<R>) -> Result<Vec<Dataset>>
    where
        R: Into<ObjectRow>,
    {
        let mut seen = vec![0usize; self.counts.len()];
        let mut previous = 0;
        for &(tag, _) in tagged {
            if tag >= self.counts.len() {
                return Err(Error::out_of_range("dataset", tag, self.counts.len()));
            }
            if tag < previous {
                return Err(Error::InvalidInput(format!(
                    "dataset tags out of order: {tag} after {previous}"
                )));
            }
            previous = tag;
            seen[tag] += 1;
        }
        if let Some((i, (&expected, &actual))) = self
            .counts
            .iter()
            .zip(&seen)
            .enumerate()
            .find(|(_, (e, a))| e != a)
        {
            return Err(Error::size_mismatch(
                expected,
                actual,
                &format!("tagged partition of dataset {i}"),
            ));
        }

        let values: Vec<f64> = tagged.iter().map(|&(_, v)| v).collect();
        self.partition(&values, rows)
    }
}
