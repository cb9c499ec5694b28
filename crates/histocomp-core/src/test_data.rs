//! Test data generators for binning tests
//!
//! Standardized, seeded datasets shared by the unit tests, integration tests
//! and benchmarks of every histocomp crate.

use crate::dataset::Dataset;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, Uniform};

/// Standard test datasets
pub struct TestDatasets;

impl TestDatasets {
    /// `n` samples from N(mean, sd)
    pub fn normal(n: usize, mean: f64, sd: f64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(42);
        let normal = Normal::new(mean, sd).unwrap();
        (0..n).map(|_| normal.sample(&mut rng)).collect()
    }

    /// `n` samples split evenly between N(-3, 0.8) and N(3, 0.8)
    pub fn bimodal(n: usize) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(42);
        let left = Normal::new(-3.0, 0.8).unwrap();
        let right = Normal::new(3.0, 0.8).unwrap();
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    left.sample(&mut rng)
                } else {
                    right.sample(&mut rng)
                }
            })
            .collect()
    }

    /// `n` samples from U(low, high)
    pub fn uniform(n: usize, low: f64, high: f64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(42);
        let dist = Uniform::new(low, high);
        (0..n).map(|_| dist.sample(&mut rng)).collect()
    }

    /// `n` integer values in `0..=max`, so duplicates are frequent
    pub fn integer_valued(n: usize, max: u32) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(42);
        (0..n).map(|_| rng.gen_range(0..=max) as f64).collect()
    }

    /// Two tight, well separated clusters around 1.5 and 51
    pub fn two_clusters() -> Vec<f64> {
        let mut values = Vec::with_capacity(40);
        values.extend(std::iter::repeat(1.0).take(10));
        values.extend(std::iter::repeat(2.0).take(10));
        values.extend(std::iter::repeat(50.0).take(10));
        values.extend(std::iter::repeat(52.0).take(10));
        values
    }

    /// `count` datasets of `n` normal values with shifted means
    ///
    /// Each dataset gets its own ChaCha stream so adding datasets never
    /// perturbs the earlier ones.
    pub fn shifted_datasets(count: usize, n: usize) -> Vec<Dataset> {
        (0..count)
            .map(|i| {
                let mut rng = ChaCha8Rng::seed_from_u64(7 + i as u64);
                let normal = Normal::new(i as f64 * 0.5, 1.0 + i as f64 * 0.1).unwrap();
                let values: Vec<f64> = (0..n).map(|_| normal.sample(&mut rng)).collect();
                Dataset::from_values(values).unwrap()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generators_are_deterministic() {
        assert_eq!(TestDatasets::normal(50, 0.0, 1.0), TestDatasets::normal(50, 0.0, 1.0));
        assert_eq!(
            TestDatasets::shifted_datasets(3, 20),
            TestDatasets::shifted_datasets(3, 20)
        );
    }

    #[test]
    fn test_generator_shapes() {
        assert_eq!(TestDatasets::bimodal(100).len(), 100);
        assert!(TestDatasets::uniform(100, 2.0, 3.0)
            .iter()
            .all(|v| (2.0..3.0).contains(v)));
        assert!(TestDatasets::integer_valued(100, 5)
            .iter()
            .all(|v| v.fract() == 0.0 && *v <= 5.0));
        assert_eq!(TestDatasets::two_clusters().len(), 40);
    }
}
