//! Shared helpers for the table model integration tests

#![allow(dead_code)]

use histocomp_core::Dataset;
use histocomp_table::{HistogramTableModel, ModelConfig};

/// Small limits and short curves so models build quickly
pub fn small_config() -> ModelConfig {
    ModelConfig::new()
        .with_bin_limits(2, 32)
        .with_uniform_bins(4)
        .with_zoom_min_bins(2)
        .with_sample_count(64)
}

pub fn dataset(values: &[f64]) -> Dataset {
    Dataset::from_values(values.to_vec()).unwrap()
}

pub fn model(rows: &[&[f64]], config: ModelConfig) -> HistogramTableModel {
    let datasets = rows.iter().map(|r| dataset(r)).collect();
    HistogramTableModel::new(datasets, config).unwrap()
}

/// Every value of a bin set, sorted
pub fn sorted_members(set: &histocomp_core::BinSet) -> Vec<f64> {
    let mut values: Vec<f64> = set.bins().iter().flat_map(|b| b.values().to_vec()).collect();
    values.sort_by(f64::total_cmp);
    values
}
