//! Configuration of a histogram table model
//!
//! Every knob the model reads lives here and is passed in explicitly. The
//! configuration serialises to JSON so a surrounding application can persist
//! user preferences; the cancellation token is runtime-only and never
//! serialised.

use histocomp_binning::bayesian_blocks::DEFAULT_FALSE_POSITIVE_RATE;
use histocomp_binning::natural_breaks::DEFAULT_GVF_THRESHOLD;
use histocomp_binning::{BinningContext, BinningMethod, MethodKind};
use histocomp_core::{CancellationToken, Error, Result, ValueRange};
use histocomp_density::{Bandwidth, GaussianKde, DEFAULT_SAMPLE_COUNT};
use serde::{Deserialize, Serialize};

/// Parameters of Bayesian Blocks binning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BayesianBlocksParameters {
    /// False-positive rate `p` of the changepoint prior
    pub false_positive_rate: f64,
}

impl Default for BayesianBlocksParameters {
    fn default() -> Self {
        Self {
            false_positive_rate: DEFAULT_FALSE_POSITIVE_RATE,
        }
    }
}

/// Parameters of natural breaks binning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NaturalBreaksParameters {
    /// Stop the class-count search once GVF reaches this value
    pub gvf_threshold: f64,
    /// Upper bound on the class count, `None` for the number of distinct values
    pub max_classes: Option<usize>,
}

impl Default for NaturalBreaksParameters {
    fn default() -> Self {
        Self {
            gvf_threshold: DEFAULT_GVF_THRESHOLD,
            max_classes: None,
        }
    }
}

/// Parameters of the density curves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityParameters {
    pub sample_count: usize,
    pub bandwidth: Bandwidth,
}

impl Default for DensityParameters {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            bandwidth: Bandwidth::default(),
        }
    }
}

/// Configuration for [`HistogramTableModel`](crate::HistogramTableModel)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Initial uniform bin count, clamped to `[min_bins, max_bins]`
    pub uniform_bins: usize,
    /// Lower bound of every uniform bin count
    pub min_bins: usize,
    /// Upper bound of every bin count; zooming past it yields point representation
    pub max_bins: usize,
    /// Lower bound and starting count of drill-down re-binning
    pub zoom_min_bins: usize,
    pub bayesian_blocks: BayesianBlocksParameters,
    pub natural_breaks: NaturalBreaksParameters,
    pub density: DensityParameters,
    /// Checked by the binning dynamic programs
    #[serde(skip)]
    pub cancellation: Option<CancellationToken>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            uniform_bins: 10,
            min_bins: 10,
            max_bins: 80,
            zoom_min_bins: 10,
            bayesian_blocks: BayesianBlocksParameters::default(),
            natural_breaks: NaturalBreaksParameters::default(),
            density: DensityParameters::default(),
            cancellation: None,
        }
    }
}

impl ModelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the uniform bin count bounds
    pub fn with_bin_limits(mut self, min_bins: usize, max_bins: usize) -> Self {
        self.min_bins = min_bins;
        self.max_bins = max_bins;
        self
    }

    pub fn with_uniform_bins(mut self, bins: usize) -> Self {
        self.uniform_bins = bins;
        self
    }

    pub fn with_zoom_min_bins(mut self, bins: usize) -> Self {
        self.zoom_min_bins = bins;
        self
    }

    pub fn with_false_positive_rate(mut self, p: f64) -> Self {
        self.bayesian_blocks.false_positive_rate = p;
        self
    }

    pub fn with_gvf_threshold(mut self, threshold: f64) -> Self {
        self.natural_breaks.gvf_threshold = threshold;
        self
    }

    pub fn with_max_classes(mut self, max_classes: usize) -> Self {
        self.natural_breaks.max_classes = Some(max_classes);
        self
    }

    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.density.sample_count = sample_count;
        self
    }

    pub fn with_bandwidth(mut self, bandwidth: Bandwidth) -> Self {
        self.density.bandwidth = bandwidth;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every parameter
    pub fn validate(&self) -> Result<()> {
        if self.min_bins == 0 {
            return Err(Error::InvalidParameter("min_bins must be positive".into()));
        }
        if self.min_bins > self.max_bins {
            return Err(Error::InvalidParameter(format!(
                "min_bins ({}) exceeds max_bins ({})",
                self.min_bins, self.max_bins
            )));
        }
        if self.zoom_min_bins == 0 || self.zoom_min_bins > self.max_bins {
            return Err(Error::InvalidParameter(format!(
                "zoom_min_bins must be in [1, {}], got {}",
                self.max_bins, self.zoom_min_bins
            )));
        }
        let p = self.bayesian_blocks.false_positive_rate;
        if !(p > 0.0 && p < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "false_positive_rate must be in (0, 1), got {p}"
            )));
        }
        let gvf = self.natural_breaks.gvf_threshold;
        if !(gvf > 0.0 && gvf <= 1.0) {
            return Err(Error::InvalidParameter(format!(
                "gvf_threshold must be in (0, 1], got {gvf}"
            )));
        }
        if self.density.sample_count < 2 {
            return Err(Error::InvalidParameter(format!(
                "sample_count must be at least 2, got {}",
                self.density.sample_count
            )));
        }
        if let Bandwidth::Fixed(h) = self.density.bandwidth {
            if !(h.is_finite() && h > 0.0) {
                return Err(Error::InvalidParameter(format!(
                    "fixed bandwidth must be positive, got {h}"
                )));
            }
        }
        Ok(())
    }

    /// Clamp a uniform bin count to `[min_bins, max_bins]`
    pub fn clamp_bins(&self, bins: usize) -> usize {
        bins.clamp(self.min_bins, self.max_bins)
    }

    /// Clamp a drill-down bin count to `[zoom_min_bins, max_bins]`
    pub fn clamp_zoom_bins(&self, bins: usize) -> usize {
        bins.clamp(self.zoom_min_bins, self.max_bins)
    }

    /// Configured method for a kind; uniform uses the clamped initial count
    pub fn method(&self, kind: MethodKind) -> BinningMethod {
        match kind {
            MethodKind::Uniform => BinningMethod::Uniform {
                bins: self.clamp_bins(self.uniform_bins),
            },
            MethodKind::BayesianBlocks => BinningMethod::BayesianBlocks {
                false_positive_rate: self.bayesian_blocks.false_positive_rate,
            },
            MethodKind::NaturalBreaks => BinningMethod::NaturalBreaks {
                gvf_threshold: self.natural_breaks.gvf_threshold,
                max_classes: self.natural_breaks.max_classes,
            },
        }
    }

    /// Binning context with the cancellation token and an optional global range
    pub fn context(&self, range: Option<ValueRange>) -> BinningContext {
        let mut context = BinningContext::new();
        if let Some(range) = range {
            context = context.with_range(range);
        }
        if let Some(token) = &self.cancellation {
            context = context.with_cancellation(token.clone());
        }
        context
    }

    /// Density estimator for the configured bandwidth and sample count
    pub fn kde(&self) -> GaussianKde {
        GaussianKde::new()
            .with_bandwidth(self.density.bandwidth)
            .with_sample_count(self.density.sample_count)
    }
}
