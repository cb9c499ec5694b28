//! Silhouette coefficient of a binning
//!
//! Treats each non-empty bin as a cluster of 1-D values. For an object `x`,
//! `a` is the mean distance to the other members of its bin and `b` the mean
//! distance to the members of the neighbouring bin, the neighbour being the
//! other non-empty bin whose centroid is closest to the centroid of `x`'s bin.
//! Mean absolute distances come from sorted prefix sums, so a whole bin set
//! costs O(n log n).

use histocomp_core::BinSet;

/// Sorted members of one bin with prefix sums
struct SortedBin {
    values: Vec<f64>,
    prefix: Vec<f64>,
    centroid: f64,
}

impl SortedBin {
    fn new(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mut prefix = Vec::with_capacity(sorted.len() + 1);
        prefix.push(0.0);
        for &v in &sorted {
            let last = prefix[prefix.len() - 1];
            prefix.push(last + v);
        }
        let centroid = prefix[sorted.len()] / sorted.len() as f64;
        Self {
            values: sorted,
            prefix,
            centroid,
        }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    /// Sum of `|x - y|` over all members `y`
    fn distance_sum(&self, x: f64) -> f64 {
        let n = self.values.len();
        let below = self.values.partition_point(|&y| y < x);
        let below_sum = self.prefix[below];
        let above_sum = self.prefix[n] - below_sum;
        let sum = (x * below as f64 - below_sum) + (above_sum - x * (n - below) as f64);
        sum.max(0.0)
    }
}

fn coefficient(a: f64, b: f64) -> f64 {
    let scale = a.max(b);
    if scale <= 0.0 {
        return 0.0;
    }
    let s = (b - a) / scale;
    if s.is_nan() {
        0.0
    } else {
        s.clamp(-1.0, 1.0)
    }
}

/// Silhouette of every object, grouped by bin in bin-member order
///
/// A singleton bin has `a = 0`; without any other non-empty bin every
/// coefficient is 0.
pub fn object_silhouettes(set: &BinSet) -> Vec<Vec<f64>> {
    let sorted: Vec<Option<SortedBin>> = set
        .bins()
        .iter()
        .map(|b| (!b.is_empty()).then(|| SortedBin::new(b.values())))
        .collect();

    let neighbour = |own: usize, centroid: f64| {
        sorted
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != own)
            .filter_map(|(_, b)| b.as_ref())
            .min_by(|x, y| {
                (x.centroid - centroid)
                    .abs()
                    .total_cmp(&(y.centroid - centroid).abs())
            })
    };

    set.bins()
        .iter()
        .enumerate()
        .map(|(i, bin)| {
            let Some(own) = sorted[i].as_ref() else {
                return Vec::new();
            };
            let Some(other) = neighbour(i, own.centroid) else {
                return vec![0.0; bin.len()];
            };
            bin.values()
                .iter()
                .map(|&x| {
                    let a = if own.len() > 1 {
                        own.distance_sum(x) / (own.len() - 1) as f64
                    } else {
                        0.0
                    };
                    let b = other.distance_sum(x) / other.len() as f64;
                    coefficient(a, b)
                })
                .collect()
        })
        .collect()
}

/// Mean silhouette over all objects of a bin set, 0 when it has none
pub fn silhouette(set: &BinSet) -> f64 {
    let scores = object_silhouettes(set);
    let n: usize = scores.iter().map(Vec::len).sum();
    if n == 0 {
        return 0.0;
    }
    scores.iter().flatten().sum::<f64>() / n as f64
}

/// Silhouette of each dataset's bin set
pub fn silhouettes(sets: &[BinSet]) -> Vec<f64> {
    sets.iter().map(silhouette).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use histocomp_core::Dataset;

    fn bin_set(values: &[f64], boundaries: &[f64]) -> BinSet {
        let ds = Dataset::from_values(values.to_vec()).unwrap();
        BinSet::from_dataset(&ds, boundaries.to_vec()).unwrap()
    }

    /// Direct O(n²) evaluation for comparison
    fn naive(set: &BinSet) -> f64 {
        fn centroid(b: &[f64]) -> f64 {
            b.iter().sum::<f64>() / b.len() as f64
        }
        let bins: Vec<&[f64]> = set.bins().iter().map(|b| b.values()).collect();
        let mut total = 0.0;
        let mut n = 0;
        for (i, bin) in bins.iter().enumerate() {
            if bin.is_empty() {
                continue;
            }
            let own_c = centroid(bin);
            let other = bins
                .iter()
                .enumerate()
                .filter(|(j, b)| *j != i && !b.is_empty())
                .min_by(|x, y| {
                    (centroid(x.1) - own_c)
                        .abs()
                        .total_cmp(&(centroid(y.1) - own_c).abs())
                })
                .map(|(_, b)| *b);
            for &x in bin.iter() {
                n += 1;
                let Some(other) = other else { continue };
                let a = if bin.len() > 1 {
                    bin.iter().map(|y| (x - y).abs()).sum::<f64>() / (bin.len() - 1) as f64
                } else {
                    0.0
                };
                let b = other.iter().map(|y| (x - y).abs()).sum::<f64>() / other.len() as f64;
                let m = a.max(b);
                total += if m > 0.0 { (b - a) / m } else { 0.0 };
            }
        }
        if n == 0 {
            0.0
        } else {
            total / n as f64
        }
    }

    #[test]
    fn test_well_separated_bins() {
        let set = bin_set(&[1.0, 2.0, 10.0, 11.0], &[0.0, 5.0, 12.0]);
        let scores = object_silhouettes(&set);
        // x = 1: a = 1, b = (9 + 10) / 2
        assert_relative_eq!(scores[0][0], 1.0 - 1.0 / 9.5, epsilon = 1e-12);
        assert!(silhouette(&set) > 0.85);
    }

    #[test]
    fn test_single_bin_is_zero() {
        let set = bin_set(&[1.0, 2.0, 3.0], &[0.0, 5.0, 10.0]);
        assert_eq!(silhouette(&set), 0.0);
        assert_eq!(object_silhouettes(&set)[1], Vec::<f64>::new());
    }

    #[test]
    fn test_identical_values_are_zero() {
        let set = bin_set(&[2.0, 2.0], &[2.0, 2.0]);
        assert_eq!(silhouette(&set), 0.0);
    }

    #[test]
    fn test_neighbour_by_centroid() {
        // Middle bin centroid 5 is closer to the right bin (centroid 8)
        // than the left (centroid 1).
        let set = bin_set(&[1.0, 4.0, 6.0, 8.0], &[0.0, 3.0, 7.0, 9.0]);
        let scores = object_silhouettes(&set);
        // x = 4: a = 2, b = |4 - 8| = 4
        assert_relative_eq!(scores[1][0], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_matches_naive_evaluation() {
        let values = [0.5, 1.0, 1.2, 3.3, 3.9, 4.0, 4.4, 7.0, 7.5, 9.9, 2.2, 6.1];
        let set = bin_set(&values, &[0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_relative_eq!(silhouette(&set), naive(&set), epsilon = 1e-12);
    }

    #[test]
    fn test_silhouettes_per_dataset() {
        let sets = vec![
            bin_set(&[1.0, 2.0, 10.0, 11.0], &[0.0, 5.0, 12.0]),
            bin_set(&[1.0, 2.0], &[0.0, 5.0]),
        ];
        let s = silhouettes(&sets);
        assert_eq!(s.len(), 2);
        assert_eq!(s[1], 0.0);
    }
}
