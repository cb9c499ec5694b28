//! Property-based tests shared by all binning methods

#[cfg(test)]
mod property_tests {
    use histocomp_binning::*;
    use histocomp_core::{Dataset, ValueRange};
    use proptest::prelude::*;

    fn methods() -> Vec<BinningMethod> {
        vec![
            BinningMethod::Uniform { bins: 7 },
            BinningMethod::default_for(MethodKind::BayesianBlocks),
            BinningMethod::default_for(MethodKind::NaturalBreaks),
        ]
    }

    // Integer-valued samples keep duplicates common, as in projected data.
    fn sample() -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec((-50i32..50).prop_map(|v| v as f64 * 0.5), 1..60)
    }

    proptest! {
        // Property: every value belongs to exactly one bin
        #[test]
        fn prop_partition(values in sample()) {
            let dataset = Dataset::from_values(values.clone()).unwrap();
            for method in methods() {
                let set = compute(&dataset, &method, &BinningContext::new()).unwrap();
                prop_assert_eq!(set.total_count(), values.len());

                let mut members: Vec<f64> = set.bins().iter().flat_map(|b| b.values().to_vec()).collect();
                let mut expected = values.clone();
                members.sort_by(f64::total_cmp);
                expected.sort_by(f64::total_cmp);
                prop_assert_eq!(members, expected);
            }
        }

        // Property: boundaries strictly increase and bracket the data
        #[test]
        fn prop_boundaries_monotonic(values in sample()) {
            let dataset = Dataset::from_values(values).unwrap();
            let range = dataset.range().unwrap();
            for method in methods() {
                let set = compute(&dataset, &method, &BinningContext::new()).unwrap();
                let b = set.boundaries();
                prop_assert_eq!(b.len(), set.len() + 1);
                prop_assert_eq!(b[0], range.min);
                prop_assert_eq!(b[b.len() - 1], range.max);
                if !range.is_degenerate() {
                    prop_assert!(b.windows(2).all(|w| w[0] < w[1]), "{:?}: {:?}", method, b);
                }
            }
        }

        // Property: identical input gives identical output
        #[test]
        fn prop_deterministic(values in sample()) {
            let dataset = Dataset::from_values(values).unwrap();
            let ctx = BinningContext::new();
            for method in methods() {
                prop_assert_eq!(
                    compute(&dataset, &method, &ctx).unwrap(),
                    compute(&dataset, &method, &ctx).unwrap()
                );
            }
        }

        // Property: GVF lies in [0, 1] for every class count tried
        #[test]
        fn prop_gvf_bounded(values in sample()) {
            let dataset = Dataset::from_values(values).unwrap();
            let (_, report) = NaturalBreaksBinning::default().classify(&dataset, None).unwrap();
            for (_, gvf) in &report.tried {
                prop_assert!((0.0..=1.0).contains(gvf));
            }
            prop_assert!(report.tried.iter().all(|(_, g)| *g <= report.gvf));
        }

        // Property: uniform bins share boundaries across datasets under a global range
        #[test]
        fn prop_uniform_global_range(a in sample(), b in sample(), bins in 1usize..30) {
            let da = Dataset::from_values(a).unwrap();
            let db = Dataset::from_values(b).unwrap();
            let range = ValueRange::union([da.range().unwrap(), db.range().unwrap()]).unwrap();
            let ctx = BinningContext::new().with_range(range);
            let method = BinningMethod::Uniform { bins };
            let sa = compute(&da, &method, &ctx).unwrap();
            let sb = compute(&db, &method, &ctx).unwrap();
            prop_assert_eq!(sa.boundaries(), sb.boundaries());
        }
    }
}
