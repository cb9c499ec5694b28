//! Core traits for binning strategies

use histocomp_core::{check_cancelled, BinSet, CancellationToken, Dataset, Result, ValueRange};

/// Inputs shared by every dataset of one binning run
#[derive(Debug, Clone, Default)]
pub struct BinningContext {
    range: Option<ValueRange>,
    cancel: Option<CancellationToken>,
}

impl BinningContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a range spanning all datasets so uniform bins line up across rows
    pub fn with_range(mut self, range: ValueRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Attach a cancellation token checked by the dynamic programs
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Global range, if one was set
    pub fn range(&self) -> Option<ValueRange> {
        self.range
    }

    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancel.as_ref()
    }

    /// `Err(Error::Cancelled)` once cancellation was requested
    pub fn check_cancelled(&self) -> Result<()> {
        check_cancelled(self.cancel.as_ref())
    }
}

/// Trait for partitioning one dataset into bins
pub trait BinningStrategy {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Partition the dataset's values and rows into a new bin set
    fn bin(&self, dataset: &Dataset, context: &BinningContext) -> Result<BinSet>;

    /// Get the target number of bins (if fixed in advance)
    fn target_bins(&self) -> Option<usize> {
        None
    }
}
