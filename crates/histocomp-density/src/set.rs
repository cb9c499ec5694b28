//! Density curves for a whole collection of datasets

use crate::curve::DensityCurve;
use crate::kde::KernelDensityEstimator;
use histocomp_core::{Dataset, Result, ValueRange};

/// One curve per dataset plus the density range shared across them
#[derive(Debug, Clone, PartialEq)]
pub struct DensitySet {
    curves: Vec<DensityCurve>,
    density_range: Option<ValueRange>,
}

impl DensitySet {
    /// Estimate every dataset's curve with `estimator`
    pub fn estimate<E: KernelDensityEstimator + ?Sized>(
        estimator: &E,
        datasets: &[Dataset],
    ) -> Result<Self> {
        let curves = datasets
            .iter()
            .map(|d| estimator.estimate_dataset(d))
            .collect::<Result<Vec<_>>>()?;
        let density_range = ValueRange::union(curves.iter().filter_map(DensityCurve::density_range));
        Ok(Self {
            curves,
            density_range,
        })
    }

    pub fn curves(&self) -> &[DensityCurve] {
        &self.curves
    }

    pub fn curve(&self, dataset: usize) -> Option<&DensityCurve> {
        self.curves.get(dataset)
    }

    /// Global minimum and maximum density, for a shared colour scale
    pub fn density_range(&self) -> Option<ValueRange> {
        self.density_range
    }
}
