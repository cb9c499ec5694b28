//! Closed set of binning methods and their dispatch

use crate::bayesian_blocks::{BayesianBlocksBinning, DEFAULT_FALSE_POSITIVE_RATE};
use crate::natural_breaks::{NaturalBreaksBinning, DEFAULT_GVF_THRESHOLD};
use crate::traits::{BinningContext, BinningStrategy};
use crate::uniform::UniformBinning;
use histocomp_core::{BinSet, Dataset, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Which binning method a table column uses, without its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    Uniform,
    BayesianBlocks,
    NaturalBreaks,
}

impl MethodKind {
    /// Every method, in display order
    pub const ALL: [MethodKind; 3] = [
        MethodKind::Uniform,
        MethodKind::BayesianBlocks,
        MethodKind::NaturalBreaks,
    ];

    /// Get the method name
    pub fn name(&self) -> &'static str {
        match self {
            MethodKind::Uniform => "uniform",
            MethodKind::BayesianBlocks => "bayesian_blocks",
            MethodKind::NaturalBreaks => "natural_breaks",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A binning method with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum BinningMethod {
    /// Equal-width bins over the global range
    Uniform { bins: usize },
    /// Changepoint blocks with false-positive rate `p`
    BayesianBlocks { false_positive_rate: f64 },
    /// Jenks–Fisher classes chosen by goodness of variance fit
    NaturalBreaks {
        gvf_threshold: f64,
        max_classes: Option<usize>,
    },
}

impl Default for BinningMethod {
    fn default() -> Self {
        BinningMethod::Uniform { bins: 10 }
    }
}

impl BinningMethod {
    /// Default parameters for a method kind
    pub fn default_for(kind: MethodKind) -> Self {
        match kind {
            MethodKind::Uniform => BinningMethod::default(),
            MethodKind::BayesianBlocks => BinningMethod::BayesianBlocks {
                false_positive_rate: DEFAULT_FALSE_POSITIVE_RATE,
            },
            MethodKind::NaturalBreaks => BinningMethod::NaturalBreaks {
                gvf_threshold: DEFAULT_GVF_THRESHOLD,
                max_classes: None,
            },
        }
    }

    pub fn kind(&self) -> MethodKind {
        match self {
            BinningMethod::Uniform { .. } => MethodKind::Uniform,
            BinningMethod::BayesianBlocks { .. } => MethodKind::BayesianBlocks,
            BinningMethod::NaturalBreaks { .. } => MethodKind::NaturalBreaks,
        }
    }

    /// Bin one dataset with this method
    pub fn compute(&self, dataset: &Dataset, context: &BinningContext) -> Result<BinSet> {
        match *self {
            BinningMethod::Uniform { bins } => UniformBinning::new(bins).bin(dataset, context),
            BinningMethod::BayesianBlocks {
                false_positive_rate,
            } => BayesianBlocksBinning::new(false_positive_rate).bin(dataset, context),
            BinningMethod::NaturalBreaks {
                gvf_threshold,
                max_classes,
            } => {
                let mut strategy = NaturalBreaksBinning::new(gvf_threshold);
                if let Some(max) = max_classes {
                    strategy = strategy.with_max_classes(max);
                }
                strategy.bin(dataset, context)
            }
        }
    }
}

/// Bin one dataset with `method`
pub fn compute(dataset: &Dataset, method: &BinningMethod, context: &BinningContext) -> Result<BinSet> {
    method.compute(dataset, context)
}

/// Bin every dataset with `method`, in dataset order
#[cfg(not(feature = "parallel"))]
pub fn compute_all(
    datasets: &[Dataset],
    method: &BinningMethod,
    context: &BinningContext,
) -> Result<Vec<BinSet>> {
    datasets.iter().map(|d| method.compute(d, context)).collect()
}

/// Bin every dataset with `method`, in dataset order
#[cfg(feature = "parallel")]
pub fn compute_all(
    datasets: &[Dataset],
    method: &BinningMethod,
    context: &BinningContext,
) -> Result<Vec<BinSet>> {
    datasets.par_iter().map(|d| method.compute(d, context)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use histocomp_core::ValueRange;

    #[test]
    fn test_kind_round_trip() {
        for kind in MethodKind::ALL {
            assert_eq!(BinningMethod::default_for(kind).kind(), kind);
        }
        assert_eq!(MethodKind::NaturalBreaks.to_string(), "natural_breaks");
    }

    #[test]
    fn test_dispatch_matches_strategies() {
        let ds = Dataset::from_values(vec![1.0, 2.0, 3.0, 4.0, 5.0, 10.0]).unwrap();
        let ctx = BinningContext::new();

        let uniform = compute(&ds, &BinningMethod::Uniform { bins: 3 }, &ctx).unwrap();
        assert_eq!(uniform, UniformBinning::new(3).bin(&ds, &ctx).unwrap());

        let bb = BinningMethod::default_for(MethodKind::BayesianBlocks);
        assert_eq!(
            compute(&ds, &bb, &ctx).unwrap(),
            BayesianBlocksBinning::default().bin(&ds, &ctx).unwrap()
        );

        let nb = BinningMethod::NaturalBreaks {
            gvf_threshold: 0.99,
            max_classes: Some(2),
        };
        assert_eq!(compute(&ds, &nb, &ctx).unwrap().len(), 2);
    }

    #[test]
    fn test_compute_all_preserves_order() {
        let datasets = vec![
            Dataset::from_values(vec![0.0, 1.0]).unwrap(),
            Dataset::from_values(vec![8.0, 9.0, 10.0]).unwrap(),
        ];
        let ctx = BinningContext::new().with_range(ValueRange::new(0.0, 10.0));
        let sets = compute_all(&datasets, &BinningMethod::Uniform { bins: 2 }, &ctx).unwrap();
        assert_eq!(sets[0].counts(), vec![2, 0]);
        assert_eq!(sets[1].counts(), vec![0, 3]);
    }

    #[test]
    fn test_method_serde() {
        let method = BinningMethod::BayesianBlocks {
            false_positive_rate: 0.05,
        };
        let json = serde_json::to_string(&method).unwrap();
        assert_eq!(json, r#"{"method":"bayesian_blocks","false_positive_rate":0.05}"#);
        let back: BinningMethod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, method);
    }
}
