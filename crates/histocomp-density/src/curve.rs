//! Sampled density curves and their per-bin partitions

use histocomp_core::{locate, ValueRange};

/// One sample of a density curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityPoint {
    pub x: f64,
    pub density: f64,
}

/// Density sampled at evenly spaced points over one dataset's range
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    points: Vec<DensityPoint>,
    bandwidth: f64,
}

impl DensityCurve {
    pub fn new(points: Vec<DensityPoint>, bandwidth: f64) -> Self {
        Self { points, bandwidth }
    }

    pub fn points(&self) -> &[DensityPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Kernel bandwidth the curve was fitted with
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Smallest and largest sampled density
    pub fn density_range(&self) -> Option<ValueRange> {
        let densities: Vec<f64> = self.points.iter().map(|p| p.density).collect();
        ValueRange::of(&densities)
    }

    /// Partition the samples by bin boundaries
    ///
    /// A point goes to bin `b` when `boundary[b] <= x < boundary[b + 1]`, the
    /// last bin also taking its upper boundary. Points outside the boundaries
    /// belong to no bin and are dropped.
    pub fn bucket(&self, boundaries: &[f64]) -> BinnedCurve {
        let n_bins = boundaries.len().saturating_sub(1);
        let mut bins = vec![Vec::new(); n_bins];
        if n_bins == 0 {
            return BinnedCurve { bins };
        }
        let (lo, hi) = (boundaries[0], boundaries[n_bins]);
        for &p in &self.points {
            if p.x >= lo && p.x <= hi {
                bins[locate(boundaries, p.x)].push(p);
            }
        }
        BinnedCurve { bins }
    }
}

/// A density curve split into one point sequence per bin
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BinnedCurve {
    bins: Vec<Vec<DensityPoint>>,
}

impl BinnedCurve {
    pub fn bins(&self) -> &[Vec<DensityPoint>] {
        &self.bins
    }

    pub fn bin(&self, index: usize) -> Option<&[DensityPoint]> {
        self.bins.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Number of samples across all bins
    pub fn point_count(&self) -> usize {
        self.bins.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve(xs: &[f64]) -> DensityCurve {
        let points = xs
            .iter()
            .map(|&x| DensityPoint { x, density: x * 0.1 })
            .collect();
        DensityCurve::new(points, 1.0)
    }

    #[test]
    fn test_bucket_last_bin_inclusive() {
        let binned = curve(&[0.0, 0.5, 1.0, 1.5, 2.0]).bucket(&[0.0, 1.0, 2.0]);
        assert_eq!(binned.len(), 2);
        assert_eq!(binned.bin(0).unwrap().len(), 2);
        assert_eq!(binned.bin(1).unwrap().len(), 3);
        assert_eq!(binned.point_count(), 5);
    }

    #[test]
    fn test_bucket_drops_points_outside() {
        let binned = curve(&[-1.0, 0.0, 3.0, 5.0]).bucket(&[0.0, 2.0, 4.0]);
        assert_eq!(binned.point_count(), 2);
        assert_eq!(binned.bin(1).unwrap()[0].x, 3.0);
    }

    #[test]
    fn test_density_range() {
        let range = curve(&[1.0, 4.0, 2.0]).density_range().unwrap();
        assert!((range.min - 0.1).abs() < 1e-12);
        assert!((range.max - 0.4).abs() < 1e-12);
        assert!(DensityCurve::new(Vec::new(), 1.0).density_range().is_none());
    }

    #[test]
    fn test_bucket_degenerate_boundaries() {
        let binned = curve(&[3.0, 3.0]).bucket(&[3.0, 3.0]);
        assert_eq!(binned.bin(0).unwrap().len(), 2);
        assert!(curve(&[1.0]).bucket(&[1.0]).is_empty());
    }
}
