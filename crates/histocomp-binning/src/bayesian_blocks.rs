//! Bayesian Blocks changepoint binning
//!
//! Implements the optimal segmentation of Scargle et al. (2013) for event
//! data: duplicate values are collapsed into weighted points, every midpoint
//! between neighbouring distinct values is a candidate edge, and a dynamic
//! program picks the partition maximizing the summed cash statistic minus a
//! per-block prior penalty.
//!
//! The recurrence is O(N²) in the number of distinct values; prefix sums of
//! the weights keep each candidate evaluation O(1).

use crate::traits::{BinningContext, BinningStrategy};
use histocomp_core::{check_cancelled, BinSet, CancellationToken, Dataset, Error, Result};
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;
use tracing::debug;

/// Default false-positive rate for changepoint detection
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.01;

/// Bayesian Blocks binning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BayesianBlocksBinning {
    false_positive_rate: f64,
}

impl BayesianBlocksBinning {
    /// Create a binning with the given false-positive rate `p`
    pub fn new(false_positive_rate: f64) -> Self {
        Self {
            false_positive_rate,
        }
    }

    pub fn false_positive_rate(&self) -> f64 {
        self.false_positive_rate
    }
}

impl Default for BayesianBlocksBinning {
    fn default() -> Self {
        Self::new(DEFAULT_FALSE_POSITIVE_RATE)
    }
}

impl BinningStrategy for BayesianBlocksBinning {
    fn name(&self) -> &'static str {
        "bayesian_blocks"
    }

    fn bin(&self, dataset: &Dataset, context: &BinningContext) -> Result<BinSet> {
        let edges = blocks(dataset.values(), self.false_positive_rate, context.cancellation())?;
        debug!(
            blocks = edges.len() - 1,
            n = dataset.len(),
            p = self.false_positive_rate,
            "bayesian blocks"
        );
        BinSet::from_dataset(dataset, edges)
    }
}

/// Block edges for raw values, collapsing duplicates into weights
pub fn blocks(values: &[f64], p: f64, cancel: Option<&CancellationToken>) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(Error::empty_input("bayesian blocks"));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(Error::non_finite("bayesian blocks input"));
    }

    let mut counts: BTreeMap<OrderedFloat<f64>, f64> = BTreeMap::new();
    for &v in values {
        *counts.entry(OrderedFloat(v)).or_insert(0.0) += 1.0;
    }
    let (xs, ws): (Vec<f64>, Vec<f64>) = counts.into_iter().map(|(v, w)| (v.0, w)).unzip();
    segment(&xs, &ws, p, cancel)
}

/// Block edges for pre-collapsed `(value, weight)` pairs
///
/// Fails with a domain error for mismatched lengths or non-positive weights
/// and with an invalid-input error for empty input or repeated values.
pub fn blocks_weighted(
    values: &[f64],
    weights: &[f64],
    p: f64,
    cancel: Option<&CancellationToken>,
) -> Result<Vec<f64>> {
    if values.len() != weights.len() {
        return Err(Error::Domain(format!(
            "values and weights differ in length: {} vs {}",
            values.len(),
            weights.len()
        )));
    }
    if values.is_empty() {
        return Err(Error::empty_input("bayesian blocks"));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(Error::non_finite("bayesian blocks input"));
    }
    if let Some(w) = weights.iter().find(|w| !(**w > 0.0) || !w.is_finite()) {
        return Err(Error::Domain(format!("weights must be positive, got {w}")));
    }

    let mut pairs: Vec<(f64, f64)> = values.iter().copied().zip(weights.iter().copied()).collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    if pairs.windows(2).any(|w| w[0].0 == w[1].0) {
        return Err(Error::InvalidInput(
            "duplicate values; collapse them into weights first".to_string(),
        ));
    }
    let (xs, ws): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
    segment(&xs, &ws, p, cancel)
}

/// Prior penalty on the number of blocks
pub fn ncp_prior(n: usize, p: f64) -> f64 {
    (73.53 * p * (n as f64).powf(-0.478)).ln() - 4.0
}

/// Poisson log-likelihood of a block with `count` events over `width`
fn cash(count: f64, width: f64) -> f64 {
    count * (count / width).ln()
}

/// Run the recurrence over sorted, distinct, positively weighted values
fn segment(xs: &[f64], ws: &[f64], p: f64, cancel: Option<&CancellationToken>) -> Result<Vec<f64>> {
    if !(p > 0.0 && p < 1.0) {
        return Err(Error::InvalidParameter(format!(
            "false-positive rate must lie in (0, 1), got {p}"
        )));
    }
    let n = xs.len();
    if n == 1 {
        return Ok(vec![xs[0], xs[0]]);
    }

    let mut edges = Vec::with_capacity(n + 1);
    edges.push(xs[0]);
    edges.extend(xs.windows(2).map(|w| 0.5 * (w[0] + w[1])));
    edges.push(xs[n - 1]);
    // Neighbours one ulp apart put their midpoint onto one of them.
    if let Some(w) = edges.windows(2).find(|w| w[0] >= w[1]) {
        return Err(Error::Computation(format!(
            "candidate block edges collapse at {}; values are too close to split",
            w[0]
        )));
    }

    let mut cumulative = Vec::with_capacity(n + 1);
    cumulative.push(0.0);
    for &w in ws {
        let last = cumulative[cumulative.len() - 1];
        cumulative.push(last + w);
    }

    let prior = ncp_prior(n, p);
    let mut best = vec![0.0; n];
    let mut last = vec![0usize; n];

    for k in 0..n {
        check_cancelled(cancel)?;
        let mut best_fit = f64::NEG_INFINITY;
        let mut best_r = 0;
        for r in 0..=k {
            let count = cumulative[k + 1] - cumulative[r];
            let width = edges[k + 1] - edges[r];
            debug_assert!(count > 0.0 && width > 0.0);
            let previous = if r > 0 { best[r - 1] } else { 0.0 };
            let fit = cash(count, width) + prior + previous;
            if fit > best_fit {
                best_fit = fit;
                best_r = r;
            }
        }
        best[k] = best_fit;
        last[k] = best_r;
    }

    let mut change_points = Vec::new();
    let mut i = n;
    while i != 0 {
        change_points.push(i);
        i = last[i - 1];
    }
    change_points.push(0);
    change_points.reverse();

    Ok(change_points.into_iter().map(|c| edges[c]).collect())
}
