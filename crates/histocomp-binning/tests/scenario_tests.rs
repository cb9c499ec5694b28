//! Concrete scenarios for each binning method

use approx::assert_relative_eq;
use histocomp_binning::*;
use histocomp_core::test_data::TestDatasets;
use histocomp_core::{CancellationToken, Dataset, Error};

fn dataset(values: &[f64]) -> Dataset {
    Dataset::from_values(values.to_vec()).unwrap()
}

/// Count per bin divided by bin width
fn densities(set: &histocomp_core::BinSet) -> Vec<f64> {
    set.bins()
        .iter()
        .zip(set.boundaries().windows(2))
        .map(|(bin, w)| bin.len() as f64 / (w[1] - w[0]))
        .collect()
}

#[test]
fn test_uniform_three_bins() {
    let set = compute(
        &dataset(&[1.0, 2.0, 3.0, 4.0, 5.0, 10.0]),
        &BinningMethod::Uniform { bins: 3 },
        &BinningContext::new(),
    )
    .unwrap();
    assert_eq!(set.boundaries(), &[1.0, 4.0, 7.0, 10.0]);
    assert_eq!(set.counts(), vec![3, 2, 1]);
    assert_eq!(set.bin(1).unwrap().values(), &[4.0, 5.0]);
}

#[test]
fn test_bayesian_blocks_sparse_clusters() {
    // With eight points the prior penalty outweighs any split at p = 0.01.
    let set = BayesianBlocksBinning::default()
        .bin(&dataset(&[1.0, 1.0, 2.0, 2.0, 2.0, 50.0, 51.0, 52.0]), &BinningContext::new())
        .unwrap();
    assert_eq!(set.boundaries(), &[1.0, 52.0]);
    assert_eq!(set.counts(), vec![8]);
}

#[test]
fn test_bayesian_blocks_dense_clusters() {
    let values = TestDatasets::two_clusters();
    let set = BayesianBlocksBinning::default()
        .bin(&dataset(&values), &BinningContext::new())
        .unwrap();
    assert_eq!(set.boundaries(), &[1.0, 1.5, 51.0, 52.0]);
    assert_eq!(set.total_count(), values.len());

    // The block spanning the gap is far sparser than the clusters around it.
    let d = densities(&set);
    assert!(d[1] < d[0] / 10.0);
    assert!(d[1] < d[2] / 10.0);
}

#[test]
fn test_bayesian_blocks_changepoints_fall_in_gap() {
    let values = [1.0, 1.0, 2.0, 2.0, 2.0, 3.0, 3.0, 50.0, 50.0, 51.0, 51.0, 52.0, 52.0];
    let set = BayesianBlocksBinning::default()
        .bin(&dataset(&values), &BinningContext::new())
        .unwrap();
    let b = set.boundaries();
    assert_eq!(b.len(), 4);
    assert!(b[1] > 2.0 && b[1] < 50.0);
    assert!(b[2] > 2.0 && b[2] < 51.0);
    assert_eq!(set.counts(), vec![5, 4, 4]);
}

#[test]
fn test_bayesian_blocks_many_points() {
    let values = TestDatasets::bimodal(400);
    let set = BayesianBlocksBinning::default()
        .bin(&dataset(&values), &BinningContext::new())
        .unwrap();
    assert!(set.len() >= 2);
    assert_eq!(set.total_count(), 400);
}

#[test]
fn test_bayesian_blocks_rejects_bad_input() {
    assert!(matches!(
        BayesianBlocksBinning::default().bin(&Dataset::default(), &BinningContext::new()),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        blocks_weighted(&[1.0, 2.0, 3.0], &[1.0, 0.0, 2.0], 0.01, None),
        Err(Error::Domain(_))
    ));
}

#[test]
fn test_natural_breaks_bimodal() {
    let values = TestDatasets::bimodal(300);
    let (set, report) = NaturalBreaksBinning::default()
        .classify(&dataset(&values), None)
        .unwrap();
    assert!(report.threshold_reached);
    assert!(report.gvf >= 0.99);
    assert_eq!(set.len(), report.classes);
    assert_eq!(set.total_count(), 300);
    // Class counts are tried in order from two upwards.
    for (i, (k, _)) in report.tried.iter().enumerate() {
        assert_eq!(*k, i + 2);
    }
}

#[test]
fn test_natural_breaks_integer_data_is_bounded() {
    let values = TestDatasets::integer_valued(200, 4);
    let ds = dataset(&values);
    let (set, report) = NaturalBreaksBinning::default().classify(&ds, None).unwrap();
    assert!(set.len() <= ds.distinct_count());
    assert!(report.tried.len() <= ds.distinct_count() - 1);
}

#[test]
fn test_gvf_of_two_classes() {
    let ds = dataset(&[4.0, 5.0, 9.0, 10.0]);
    let set = compute(
        &ds,
        &BinningMethod::NaturalBreaks {
            gvf_threshold: 0.5,
            max_classes: None,
        },
        &BinningContext::new(),
    )
    .unwrap();
    assert_relative_eq!(goodness_of_variance_fit(&set), 25.0 / 26.0, epsilon = 1e-12);
}

#[test]
fn test_cancelled_context_stops_dynamic_programs() {
    let token = CancellationToken::new();
    let ctx = BinningContext::new().with_cancellation(token.clone());
    let ds = dataset(&TestDatasets::normal(100, 0.0, 1.0));

    assert!(compute(&ds, &BinningMethod::default_for(MethodKind::BayesianBlocks), &ctx).is_ok());
    token.cancel();
    for kind in [MethodKind::BayesianBlocks, MethodKind::NaturalBreaks] {
        assert!(matches!(
            compute(&ds, &BinningMethod::default_for(kind), &ctx),
            Err(Error::Cancelled)
        ));
    }
    // Uniform binning has no dynamic program to interrupt.
    assert!(compute(&ds, &BinningMethod::default(), &ctx).is_ok());
}
