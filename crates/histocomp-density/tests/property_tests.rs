//! Property-based tests for density curves

#[cfg(test)]
mod property_tests {
    use histocomp_density::*;
    use proptest::prelude::*;

    proptest! {
        // Property: curve has the configured length and spans exactly [min, max]
        #[test]
        fn prop_curve_spans_range(
            values in prop::collection::vec(-1e3..1e3f64, 1..80),
            samples in 2usize..300,
        ) {
            let curve = GaussianKde::new().with_sample_count(samples).estimate(&values).unwrap();
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            prop_assert_eq!(curve.len(), samples);
            prop_assert_eq!(curve.points()[0].x, min);
            prop_assert_eq!(curve.points()[samples - 1].x, max);
            prop_assert!(curve.points().iter().all(|p| p.x >= min && p.x <= max));
            prop_assert!(curve.points().iter().all(|p| p.density.is_finite() && p.density >= 0.0));
        }

        // Property: bucketing by boundaries over the data range keeps every sample
        #[test]
        fn prop_bucketing_keeps_samples(
            values in prop::collection::vec(0.0..100.0f64, 2..40),
            cuts in prop::collection::vec(0.01..0.99f64, 0..6),
        ) {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assume!(max > min);

            let mut boundaries: Vec<f64> = cuts.iter().map(|c| min + c * (max - min)).collect();
            boundaries.push(min);
            boundaries.push(max);
            boundaries.sort_by(f64::total_cmp);
            boundaries.dedup();

            let curve = GaussianKde::new().with_sample_count(64).estimate(&values).unwrap();
            let binned = curve.bucket(&boundaries);
            prop_assert_eq!(binned.len(), boundaries.len() - 1);
            prop_assert_eq!(binned.point_count(), 64);
            for (b, points) in binned.bins().iter().enumerate() {
                for p in points {
                    prop_assert!(p.x >= boundaries[b] && p.x <= boundaries[b + 1]);
                }
            }
        }
    }
}
