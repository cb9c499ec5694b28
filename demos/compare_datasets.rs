//! Compare a handful of synthetic datasets with every binning method
//!
//! Run with `RUST_LOG=histocomp=debug` to see the model's tracing output.

use anyhow::Result;
use histocomp::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// One dataset per spec; each object row holds the value and its dataset index
fn generate(specs: &[(usize, f64, f64)]) -> Result<(Vec<f64>, Vec<Vec<f64>>, Vec<usize>)> {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut values = Vec::new();
    let mut rows = Vec::new();
    let mut counts = Vec::new();
    for (d, &(n, mean, sd)) in specs.iter().enumerate() {
        let normal = Normal::new(mean, sd)?;
        for _ in 0..n {
            let v = normal.sample(&mut rng);
            values.push(v);
            rows.push(vec![v, d as f64]);
        }
        counts.push(n);
    }
    Ok((values, rows, counts))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let (values, rows, counts) = generate(&[(400, 0.0, 1.0), (250, 0.4, 1.1), (300, 3.0, 0.7)])?;
    let config = ModelConfig::default().with_sample_count(200);
    let mut model = HistogramTableModel::from_flat(&values, rows, counts, config)?;

    let range = model.global_range();
    info!(min = range.min, max = range.max, "global value range");

    for kind in MethodKind::ALL {
        let silhouettes = model.silhouette(kind)?;
        for d in 0..model.dataset_count() {
            info!(
                method = %kind,
                dataset = d,
                bins = model.bin_set(d, kind)?.len(),
                counts = ?model.objects_per_bin(d, kind)?,
                silhouette = format!("{:.3}", silhouettes[d]),
                "binned"
            );
        }
        info!(method = %kind, max = model.max_amount_in_any_bin(kind)?, "largest bin");
    }

    let order = model.similarity_order(MethodKind::Uniform, &SimilarityReference::Row(0))?;
    info!(?order, "datasets by similarity to dataset 0");
    info!(order = ?model.object_count_order(ObjectCountOrder::Descending), "datasets by size");

    let bins = model.zoom_in_uniform()?;
    info!(bins, "linear zoom");

    let busiest = model
        .objects_per_bin(2, MethodKind::BayesianBlocks)?
        .iter()
        .enumerate()
        .max_by_key(|&(_, count)| *count)
        .map(|(b, _)| b)
        .unwrap_or(0);
    let cell = Cell::new(2, busiest);
    let mut outcome = model.zoom(MethodKind::BayesianBlocks, &[cell], 10)?;
    while !outcome.is_point_representation() {
        if let Some(ZoomedBin::Rebinned(set)) = outcome.cell(cell) {
            info!(bins = set.len(), counts = ?set.counts(), "drill-down");
        }
        outcome = model.zoom_in_selection()?;
    }
    if let ZoomOutcome::PointRepresentation(points) = &outcome {
        info!(points = points.point_count(), "point representation");
    }

    Ok(())
}
