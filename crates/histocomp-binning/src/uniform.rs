//! Equal-width binning over a shared value range

use crate::traits::{BinningContext, BinningStrategy};
use histocomp_core::{BinSet, Dataset, Error, Result, ValueRange};
use tracing::trace;

/// Relative tolerance for placing the range maximum into the last bin
const MAX_TOLERANCE: f64 = 1e-12;

/// Equal-width binning
///
/// Divides `[min, max]` into `bins` intervals of equal width. When the
/// context carries a global range the bins are comparable across datasets;
/// otherwise the dataset's own range is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformBinning {
    bins: usize,
}

impl UniformBinning {
    /// Create a uniform binning with `bins` intervals (at least one)
    pub fn new(bins: usize) -> Self {
        Self { bins: bins.max(1) }
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    /// `bins + 1` boundaries over `range`
    ///
    /// A range too narrow to split into `bins` representable intervals gives
    /// the single bin `[min, max]`; a degenerate range gives `[v, v]`.
    pub fn boundaries(&self, range: ValueRange) -> Vec<f64> {
        match self.equal_width_edges(range) {
            Some(edges) => edges,
            None => vec![range.min, range.max],
        }
    }

    /// Bin index for `value` by the equal-width rule
    ///
    /// Consistent with [`boundaries`](Self::boundaries): a collapsed range
    /// puts every value into bin 0.
    pub fn bin_index(&self, range: ValueRange, value: f64) -> usize {
        if self.equal_width_edges(range).is_none() {
            return 0;
        }
        self.equal_width_index(range, value)
    }

    /// Strictly increasing edges, `None` when they collapse in floating point
    fn equal_width_edges(&self, range: ValueRange) -> Option<Vec<f64>> {
        if range.is_degenerate() {
            return None;
        }
        let width = range.span() / self.bins as f64;
        let mut edges: Vec<f64> = (0..self.bins)
            .map(|i| range.min + i as f64 * width)
            .collect();
        edges.push(range.max);
        edges.windows(2).all(|w| w[0] < w[1]).then_some(edges)
    }

    fn equal_width_index(&self, range: ValueRange, value: f64) -> usize {
        let last = self.bins - 1;
        // The true maximum can land a hair past the last interval.
        if (value - range.max).abs() <= MAX_TOLERANCE * range.span() {
            return last;
        }
        let width = range.span() / self.bins as f64;
        let raw = ((value - range.min) / width).floor();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(last)
        }
    }
}

impl Default for UniformBinning {
    fn default() -> Self {
        Self::new(10)
    }
}

impl BinningStrategy for UniformBinning {
    fn name(&self) -> &'static str {
        "uniform"
    }

    fn bin(&self, dataset: &Dataset, context: &BinningContext) -> Result<BinSet> {
        let range = context
            .range()
            .or_else(|| dataset.range())
            .ok_or_else(|| Error::empty_input("uniform binning without a range"))?;

        let boundaries = self.boundaries(range);
        let collapsed = boundaries.len() - 1 != self.bins;
        let assignment: Vec<usize> = dataset
            .values()
            .iter()
            .map(|&v| if collapsed { 0 } else { self.equal_width_index(range, v) })
            .collect();
        trace!(bins = boundaries.len() - 1, collapsed, n = dataset.len(), "uniform binning");
        BinSet::from_assignment(dataset, &assignment, boundaries)
    }

    fn target_bins(&self) -> Option<usize> {
        Some(self.bins)
    }
}
