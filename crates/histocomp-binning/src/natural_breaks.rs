//! Jenks–Fisher natural breaks
//!
//! Fisher's exact optimal classification of sorted `(value, count)` pairs into
//! `k` classes, maximizing the between-class sum of squared means (which
//! minimizes within-class squared deviations). Each dynamic-programming row
//! is solved by divide and conquer over the monotone break positions, giving
//! O(k · m log m) for `m` distinct values.
//!
//! [`NaturalBreaksBinning`] searches the class count: starting at two it adds
//! a class until the goodness of variance fit reaches the threshold or the
//! distinct values run out, keeping the best fit seen.

use crate::traits::{BinningContext, BinningStrategy};
use histocomp_core::{check_cancelled, BinSet, CancellationToken, Dataset, Error, Result};
use tracing::{debug, warn};

/// Default goodness-of-variance-fit target
pub const DEFAULT_GVF_THRESHOLD: f64 = 0.99;

/// Sorted distinct values with their multiplicities
pub fn value_count_pairs(values: &[f64]) -> Vec<(f64, f64)> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mut pairs: Vec<(f64, f64)> = Vec::new();
    for v in sorted {
        match pairs.last_mut() {
            Some((last, count)) if *last == v => *count += 1.0,
            _ => pairs.push((v, 1.0)),
        }
    }
    pairs
}

/// Dynamic-programming state for one classification
struct JenksFisher {
    k: usize,
    buf_size: usize,
    cumul_weight: Vec<f64>,
    cumul_weighted_value: Vec<f64>,
    prev_ssm: Vec<f64>,
    curr_ssm: Vec<f64>,
    // One row of break indices per completed class count.
    breaks: Vec<usize>,
    row_offset: usize,
    completed_rows: usize,
}

impl JenksFisher {
    fn new(pairs: &[(f64, f64)], k: usize) -> Self {
        let m = pairs.len();
        debug_assert!(k >= 2 && k <= m);
        let buf_size = m - (k - 1);

        let mut cumul_weight = Vec::with_capacity(m);
        let mut cumul_weighted_value = Vec::with_capacity(m);
        let mut prev_ssm = vec![0.0; buf_size];
        let (mut cw, mut cwv) = (0.0, 0.0);
        for (i, &(value, weight)) in pairs.iter().enumerate() {
            cw += weight;
            cwv += weight * value;
            cumul_weight.push(cw);
            cumul_weighted_value.push(cwv);
            // Sum of squared means for a first class ending at i.
            if i < buf_size {
                prev_ssm[i] = cwv * cwv / cw;
            }
        }

        Self {
            k,
            buf_size,
            cumul_weight,
            cumul_weighted_value,
            prev_ssm,
            curr_ssm: vec![0.0; buf_size],
            breaks: vec![0; buf_size * (k - 1)],
            row_offset: 0,
            completed_rows: 0,
        }
    }

    fn weight(&self, b: usize, e: usize) -> f64 {
        let before = if b > 0 { self.cumul_weight[b - 1] } else { 0.0 };
        self.cumul_weight[e] - before
    }

    fn weighted_value(&self, b: usize, e: usize) -> f64 {
        let before = if b > 0 { self.cumul_weighted_value[b - 1] } else { 0.0 };
        self.cumul_weighted_value[e] - before
    }

    /// Squared mean times weight of the class `b..=e`
    fn ssm(&self, b: usize, e: usize) -> f64 {
        let wv = self.weighted_value(b, e);
        wv * wv / self.weight(b, e)
    }

    /// Best start of the last class ending at `i`, searching `bp..ep`
    fn find_max_break_index(&mut self, i: usize, bp: usize, ep: usize) -> usize {
        debug_assert!(bp < ep && bp <= i && ep <= i + 1 && i < self.buf_size);
        let rows = self.completed_rows;
        let mut max_ssm = self.prev_ssm[bp] + self.ssm(bp + rows, i + rows);
        let mut found = bp;
        for p in bp + 1..ep {
            let ssm = self.prev_ssm[p] + self.ssm(p + rows, i + rows);
            if ssm > max_ssm {
                max_ssm = ssm;
                found = p;
            }
        }
        self.curr_ssm[i] = max_ssm;
        found
    }

    /// Solve `bi..ei` knowing their optimal breaks lie in `bp..ep`
    fn calc_range(&mut self, bi: usize, ei: usize, bp: usize, ep: usize) {
        if bi == ei {
            return;
        }
        let mi = (bi + ei) / 2;
        let mp = self.find_max_break_index(mi, bp, ep.min(mi + 1));
        self.calc_range(bi, mi, bp, mi.min(mp + 1));
        self.breaks[self.row_offset + mi] = mp;
        self.calc_range(mi + 1, ei, mp, ep);
    }

    fn calc_all(&mut self, cancel: Option<&CancellationToken>) -> Result<()> {
        for rows in 1..self.k - 1 {
            check_cancelled(cancel)?;
            self.completed_rows = rows;
            self.calc_range(0, self.buf_size, 0, self.buf_size);
            std::mem::swap(&mut self.prev_ssm, &mut self.curr_ssm);
            self.row_offset += self.buf_size;
        }
        self.completed_rows = self.k - 1;
        Ok(())
    }

    /// Index of the first pair of every class
    fn class_starts(mut self, cancel: Option<&CancellationToken>) -> Result<Vec<usize>> {
        self.calc_all(cancel)?;
        let mut starts = vec![0; self.k];
        let mut last_break = self.find_max_break_index(self.buf_size - 1, 0, self.buf_size);
        let mut class = self.k - 1;
        while class > 0 {
            starts[class] = last_break + class;
            if class > 1 {
                self.row_offset -= self.buf_size;
                last_break = self.breaks[self.row_offset + last_break];
            }
            class -= 1;
        }
        debug_assert_eq!(self.row_offset, 0);
        debug_assert!(starts.windows(2).all(|w| w[0] < w[1]));
        Ok(starts)
    }
}

/// Start index of each of `k` optimal classes over value-count pairs
fn classify_pairs(
    pairs: &[(f64, f64)],
    k: usize,
    cancel: Option<&CancellationToken>,
) -> Result<Vec<usize>> {
    if k == 0 || k > pairs.len() {
        return Err(Error::InvalidParameter(format!(
            "class count {k} must lie in 1..={}",
            pairs.len()
        )));
    }
    if k == 1 {
        return Ok(vec![0]);
    }
    JenksFisher::new(pairs, k).class_starts(cancel)
}

/// Lower bound of each of `k` optimal classes
///
/// The first bound is the minimum of the data; `k` may not exceed the number
/// of distinct values.
pub fn jenks_fisher(values: &[f64], k: usize, cancel: Option<&CancellationToken>) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(Error::InsufficientData {
            expected: 1,
            actual: 0,
        });
    }
    let pairs = value_count_pairs(values);
    let starts = classify_pairs(&pairs, k, cancel)?;
    Ok(starts.into_iter().map(|s| pairs[s].0).collect())
}

/// Goodness of variance fit `(SDAM - SDCM) / SDAM` of a bin set, in `[0, 1]`
///
/// A set without spread fits perfectly.
pub fn goodness_of_variance_fit(set: &BinSet) -> f64 {
    let n = set.total_count();
    if n == 0 {
        return 1.0;
    }
    let mean = set.bins().iter().flat_map(|b| b.values()).sum::<f64>() / n as f64;
    let sdam: f64 = set
        .bins()
        .iter()
        .flat_map(|b| b.values())
        .map(|v| (v - mean).powi(2))
        .sum();
    if sdam <= 0.0 {
        return 1.0;
    }
    let sdcm: f64 = set
        .bins()
        .iter()
        .filter_map(|b| b.mean().map(|m| (b, m)))
        .map(|(b, m)| b.values().iter().map(|v| (v - m).powi(2)).sum::<f64>())
        .sum();
    ((sdam - sdcm) / sdam).clamp(0.0, 1.0)
}

/// Outcome of the class-count search
#[derive(Debug, Clone, PartialEq)]
pub struct NaturalBreaksReport {
    /// `(k, gvf)` for every class count tried, in order
    pub tried: Vec<(usize, f64)>,
    /// Class count of the returned bin set
    pub classes: usize,
    /// Fit of the returned bin set
    pub gvf: f64,
    /// Whether the threshold was met
    pub threshold_reached: bool,
}

/// Natural breaks binning with automatic class count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NaturalBreaksBinning {
    gvf_threshold: f64,
    max_classes: Option<usize>,
}

impl NaturalBreaksBinning {
    pub fn new(gvf_threshold: f64) -> Self {
        Self {
            gvf_threshold,
            max_classes: None,
        }
    }

    /// Cap the number of classes tried
    pub fn with_max_classes(mut self, max_classes: usize) -> Self {
        self.max_classes = Some(max_classes);
        self
    }

    pub fn gvf_threshold(&self) -> f64 {
        self.gvf_threshold
    }

    pub fn max_classes(&self) -> Option<usize> {
        self.max_classes
    }

    /// Bin the dataset and report the search
    pub fn classify(
        &self,
        dataset: &Dataset,
        cancel: Option<&CancellationToken>,
    ) -> Result<(BinSet, NaturalBreaksReport)> {
        if dataset.is_empty() {
            return Err(Error::InsufficientData {
                expected: 1,
                actual: 0,
            });
        }
        if !(self.gvf_threshold > 0.0 && self.gvf_threshold <= 1.0) {
            return Err(Error::InvalidParameter(format!(
                "GVF threshold must lie in (0, 1], got {}",
                self.gvf_threshold
            )));
        }
        if let Some(max) = self.max_classes.filter(|&m| m < 2) {
            return Err(Error::InvalidParameter(format!(
                "max_classes must be at least 2, got {max}"
            )));
        }

        let pairs = value_count_pairs(dataset.values());
        let distinct = pairs.len();
        if distinct < 2 {
            let v = pairs[0].0;
            let set = BinSet::from_dataset(dataset, vec![v, v])?;
            let report = NaturalBreaksReport {
                tried: Vec::new(),
                classes: 1,
                gvf: 1.0,
                threshold_reached: true,
            };
            return Ok((set, report));
        }

        let max_k = self.max_classes.map_or(distinct, |m| m.min(distinct));
        let mut tried = Vec::new();
        let mut best: Option<(BinSet, usize, f64)> = None;
        let mut k = 2;
        loop {
            check_cancelled(cancel)?;
            let starts = classify_pairs(&pairs, k, cancel)?;
            let set = BinSet::from_dataset(dataset, class_boundaries(&pairs, &starts))?;
            let gvf = goodness_of_variance_fit(&set);
            tried.push((k, gvf));

            // GVF need not grow with k; keep the best seen.
            if best.as_ref().map_or(true, |(_, _, g)| gvf > *g) {
                best = Some((set, k, gvf));
            }
            if gvf >= self.gvf_threshold || k >= max_k {
                break;
            }
            k += 1;
        }

        let (set, classes, gvf) = best.ok_or_else(|| {
            Error::Computation("natural breaks search produced no classification".to_string())
        })?;
        let threshold_reached = gvf >= self.gvf_threshold;
        if threshold_reached {
            debug!(classes, gvf, tried = tried.len(), "natural breaks");
        } else {
            warn!(
                classes,
                gvf,
                threshold = self.gvf_threshold,
                "natural breaks did not reach the GVF threshold"
            );
        }
        Ok((
            set,
            NaturalBreaksReport {
                tried,
                classes,
                gvf,
                threshold_reached,
            },
        ))
    }
}

impl Default for NaturalBreaksBinning {
    fn default() -> Self {
        Self::new(DEFAULT_GVF_THRESHOLD)
    }
}

impl BinningStrategy for NaturalBreaksBinning {
    fn name(&self) -> &'static str {
        "natural_breaks"
    }

    fn bin(&self, dataset: &Dataset, context: &BinningContext) -> Result<BinSet> {
        self.classify(dataset, context.cancellation()).map(|(set, _)| set)
    }
}

/// Boundaries between classes sit halfway between neighbouring members
fn class_boundaries(pairs: &[(f64, f64)], starts: &[usize]) -> Vec<f64> {
    let mut boundaries = Vec::with_capacity(starts.len() + 1);
    boundaries.push(pairs[0].0);
    for &s in &starts[1..] {
        boundaries.push(0.5 * (pairs[s - 1].0 + pairs[s].0));
    }
    boundaries.push(pairs[pairs.len() - 1].0);
    boundaries
}
