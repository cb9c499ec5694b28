//! Gaussian kernel density estimation

use crate::curve::{DensityCurve, DensityPoint};
use histocomp_core::{Dataset, Error, Result, ValueRange};
use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, Normal};
use statrs::statistics::{Data, OrderStatistics, Statistics};
use tracing::{debug, instrument};

/// Default number of evenly spaced samples per curve
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;

/// Bandwidth used when the data has no spread
const FALLBACK_BANDWIDTH: f64 = 1.0;

/// Kernel bandwidth selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Bandwidth {
    /// Silverman's rule of thumb, robust to heavy tails via the IQR
    #[default]
    Silverman,
    /// Scott's rule `1.06 σ n^(-1/5)`
    Scott,
    /// A fixed bandwidth
    Fixed(f64),
}

impl Bandwidth {
    /// Get the rule name
    pub fn name(&self) -> &'static str {
        match self {
            Bandwidth::Silverman => "silverman",
            Bandwidth::Scott => "scott",
            Bandwidth::Fixed(_) => "fixed",
        }
    }

    /// Bandwidth for `values`, falling back to 1.0 without spread
    pub fn select(&self, values: &[f64]) -> f64 {
        let n = values.len() as f64;
        let h = match *self {
            Bandwidth::Fixed(h) => h,
            Bandwidth::Scott => 1.06 * values.std_dev() * n.powf(-0.2),
            Bandwidth::Silverman => {
                let sd = values.std_dev();
                let iqr = Data::new(values.to_vec()).interquartile_range() / 1.34;
                let spread = match (sd > 0.0, iqr > 0.0) {
                    (true, true) => sd.min(iqr),
                    (true, false) => sd,
                    (false, true) => iqr,
                    (false, false) => 0.0,
                };
                0.9 * spread * n.powf(-0.2)
            }
        };
        if h.is_finite() && h > 0.0 {
            h
        } else {
            FALLBACK_BANDWIDTH
        }
    }
}

/// Trait for estimating a sampled density curve from one dataset
pub trait KernelDensityEstimator {
    /// Fit and sample the density of `values`
    fn estimate(&self, values: &[f64]) -> Result<DensityCurve>;

    /// Fit and sample the density of a dataset
    fn estimate_dataset(&self, dataset: &Dataset) -> Result<DensityCurve> {
        self.estimate(dataset.values())
    }
}

/// Gaussian kernel density estimator evaluated against every point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianKde {
    bandwidth: Bandwidth,
    sample_count: usize,
}

impl GaussianKde {
    pub fn new() -> Self {
        Self {
            bandwidth: Bandwidth::default(),
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }

    pub fn with_bandwidth(mut self, bandwidth: Bandwidth) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    /// Number of evenly spaced samples; at least two
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Density of the kernel mixture at `x`
    pub fn density_at(values: &[f64], bandwidth: f64, x: f64) -> Result<f64> {
        let kernel = standard_normal()?;
        Ok(density(&kernel, values, bandwidth, x))
    }

    fn validate(&self) -> Result<()> {
        if self.sample_count < 2 {
            return Err(Error::InvalidParameter(format!(
                "sample count must be at least 2, got {}",
                self.sample_count
            )));
        }
        if let Bandwidth::Fixed(h) = self.bandwidth {
            if !(h.is_finite() && h > 0.0) {
                return Err(Error::InvalidParameter(format!(
                    "fixed bandwidth must be positive, got {h}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for GaussianKde {
    fn default() -> Self {
        Self::new()
    }
}

impl KernelDensityEstimator for GaussianKde {
    #[instrument(skip(self, values), fields(n = values.len(), samples = self.sample_count))]
    fn estimate(&self, values: &[f64]) -> Result<DensityCurve> {
        self.validate()?;
        let range = ValueRange::of(values).ok_or(Error::InsufficientData {
            expected: 1,
            actual: 0,
        })?;
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("density input"));
        }

        let h = self.bandwidth.select(values);
        let kernel = standard_normal()?;
        let step = range.span() / (self.sample_count - 1) as f64;
        let last = self.sample_count - 1;
        let points = (0..self.sample_count)
            .map(|i| {
                let x = if i == last {
                    range.max
                } else {
                    range.min + i as f64 * step
                };
                DensityPoint {
                    x,
                    density: density(&kernel, values, h, x),
                }
            })
            .collect();

        debug!(bandwidth = h, rule = self.bandwidth.name(), "density curve");
        Ok(DensityCurve::new(points, h))
    }
}

fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| {
        Error::Computation(format!("Failed to create normal distribution: {}", e))
    })
}

fn density(kernel: &Normal, values: &[f64], h: f64, x: f64) -> f64 {
    let sum: f64 = values.iter().map(|&v| kernel.pdf((x - v) / h)).sum();
    sum / (values.len() as f64 * h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_curve_shape() {
        let values = [1.0, 2.0, 2.5, 4.0];
        let curve = GaussianKde::new().with_sample_count(50).estimate(&values).unwrap();
        assert_eq!(curve.len(), 50);
        assert_eq!(curve.points()[0].x, 1.0);
        assert_eq!(curve.points()[49].x, 4.0);
        assert!(curve.points().windows(2).all(|w| w[0].x < w[1].x));
        assert!(curve.points().iter().all(|p| p.density > 0.0));
    }

    #[test]
    fn test_single_point_density() {
        let d = GaussianKde::density_at(&[0.0], 1.0, 0.0).unwrap();
        assert_relative_eq!(d, 1.0 / (2.0 * std::f64::consts::PI).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_fixed_bandwidth_is_used() {
        let curve = GaussianKde::new()
            .with_bandwidth(Bandwidth::Fixed(0.25))
            .estimate(&[0.0, 1.0])
            .unwrap();
        assert_eq!(curve.bandwidth(), 0.25);
    }

    #[test]
    fn test_bandwidth_rules() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let silverman = Bandwidth::Silverman.select(&values);
        let scott = Bandwidth::Scott.select(&values);
        assert!(silverman > 0.0 && scott > 0.0);
        assert!(silverman < scott);
        assert_eq!(Bandwidth::Silverman.select(&[3.0, 3.0, 3.0]), 1.0);
        assert_eq!(Bandwidth::Scott.select(&[3.0]), 1.0);
    }

    #[test]
    fn test_degenerate_dataset() {
        let curve = GaussianKde::new().with_sample_count(10).estimate(&[2.0, 2.0]).unwrap();
        assert!(curve.points().iter().all(|p| p.x == 2.0));
        assert_relative_eq!(
            curve.points()[0].density,
            1.0 / (2.0 * std::f64::consts::PI).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(matches!(
            GaussianKde::new().estimate(&[]),
            Err(Error::InsufficientData { .. })
        ));
        assert!(GaussianKde::new().with_sample_count(1).estimate(&[1.0]).is_err());
        assert!(GaussianKde::new()
            .with_bandwidth(Bandwidth::Fixed(0.0))
            .estimate(&[1.0])
            .is_err());
    }
}
