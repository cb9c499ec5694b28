//! Drill-down re-binning of selected table cells
//!
//! A zoom re-bins only the members of each selected bin into uniform sub-bins
//! spanning that bin's own value range. Past the bin-count ceiling the model
//! switches to a point representation that lists every member value instead.

use histocomp_binning::{BinningContext, BinningStrategy, MethodKind, UniformBinning};
use histocomp_core::{Bin, BinSet, ObjectRow, Result, ValueRange};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One table cell: a bin of one dataset row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub dataset: usize,
    pub bin: usize,
}

impl Cell {
    pub fn new(dataset: usize, bin: usize) -> Self {
        Self { dataset, bin }
    }
}

/// Drill-down result for one selected cell
#[derive(Debug, Clone, PartialEq)]
pub enum ZoomedBin {
    /// The bin is empty
    NotDrillable,
    /// The bin holds exactly one object
    SinglePoint { value: f64, row: ObjectRow },
    /// Uniform sub-bins over the bin's own members
    Rebinned(BinSet),
}

impl ZoomedBin {
    pub fn is_drillable(&self) -> bool {
        !matches!(self, ZoomedBin::NotDrillable)
    }

    /// Objects covered by this result
    pub fn object_count(&self) -> usize {
        match self {
            ZoomedBin::NotDrillable => 0,
            ZoomedBin::SinglePoint { .. } => 1,
            ZoomedBin::Rebinned(set) => set.total_count(),
        }
    }

    pub fn bin_set(&self) -> Option<&BinSet> {
        match self {
            ZoomedBin::Rebinned(set) => Some(set),
            _ => None,
        }
    }
}

/// Re-bin the members of `bin` into `bin_count` uniform sub-bins
///
/// The sub-bins span the members' own range; a bin whose members all share
/// one value yields a single degenerate sub-bin.
pub fn zoom_bin(bin: &Bin, bin_count: usize) -> Result<ZoomedBin> {
    match bin.len() {
        0 => Ok(ZoomedBin::NotDrillable),
        1 => Ok(ZoomedBin::SinglePoint {
            value: bin.values()[0],
            row: bin.rows()[0].clone(),
        }),
        _ => UniformBinning::new(bin_count)
            .bin(&bin.to_dataset(), &BinningContext::new())
            .map(ZoomedBin::Rebinned),
    }
}

/// Every member value of the selected cells, for rendering individual points
///
/// Cells sharing a bin index share a value range across datasets, so the same
/// bin in different rows is drawn on one scale.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointRepresentation {
    cells: BTreeMap<Cell, Vec<f64>>,
    bin_ranges: BTreeMap<usize, ValueRange>,
}

impl PointRepresentation {
    /// Collect member values of `(cell, bin)` pairs
    pub fn from_cells<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (Cell, &'a Bin)>,
    {
        let mut repr = Self::default();
        for (cell, bin) in cells {
            if let Some(range) = ValueRange::of(bin.values()) {
                repr.bin_ranges
                    .entry(cell.bin)
                    .and_modify(|r| *r = ValueRange::new(r.min.min(range.min), r.max.max(range.max)))
                    .or_insert(range);
            }
            repr.cells.insert(cell, bin.values().to_vec());
        }
        repr
    }

    pub fn cells(&self) -> &BTreeMap<Cell, Vec<f64>> {
        &self.cells
    }

    /// Member values of one cell
    pub fn values(&self, cell: Cell) -> Option<&[f64]> {
        self.cells.get(&cell).map(Vec::as_slice)
    }

    /// Shared range of a bin index across the selected datasets
    pub fn bin_range(&self, bin: usize) -> Option<ValueRange> {
        self.bin_ranges.get(&bin).copied()
    }

    /// Position of `value` within its bin index's shared range, in `[0, 1]`
    ///
    /// A degenerate range places every value at 0.5.
    pub fn relative_position(&self, cell: Cell, value: f64) -> Option<f64> {
        let range = self.bin_range(cell.bin)?;
        if range.is_degenerate() {
            return Some(0.5);
        }
        Some(((value - range.min) / range.span()).clamp(0.0, 1.0))
    }

    pub fn point_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }
}

/// What a zoom produced
#[derive(Debug, Clone, PartialEq)]
pub enum ZoomOutcome {
    /// Every selected cell re-binned with `bin_count` sub-bins
    Bins {
        bin_count: usize,
        cells: BTreeMap<Cell, ZoomedBin>,
    },
    /// The ceiling was passed; render individual values
    PointRepresentation(PointRepresentation),
}

impl ZoomOutcome {
    pub fn is_point_representation(&self) -> bool {
        matches!(self, ZoomOutcome::PointRepresentation(_))
    }

    /// Zoomed result of one cell, `None` in point representation
    pub fn cell(&self, cell: Cell) -> Option<&ZoomedBin> {
        match self {
            ZoomOutcome::Bins { cells, .. } => cells.get(&cell),
            ZoomOutcome::PointRepresentation(_) => None,
        }
    }
}

/// Transient drill-down state of one method's table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoomSelection {
    pub(crate) kind: MethodKind,
    pub(crate) cells: BTreeSet<Cell>,
    pub(crate) bin_count: usize,
    pub(crate) point_representation: bool,
}

impl ZoomSelection {
    pub fn kind(&self) -> MethodKind {
        self.kind
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    /// Current sub-bin count
    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    pub fn is_point_representation(&self) -> bool {
        self.point_representation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use histocomp_core::Dataset;

    fn single_bin(values: &[f64]) -> Bin {
        let ds = Dataset::from_values(values.to_vec()).unwrap();
        let range = ds.range().unwrap();
        let boundaries = if range.is_degenerate() {
            vec![range.min, range.min]
        } else {
            vec![range.min, range.max]
        };
        BinSet::from_dataset(&ds, boundaries).unwrap().bins()[0].clone()
    }

    #[test]
    fn test_zoom_reproduces_members() {
        let bin = single_bin(&[10.0, 20.0, 30.0, 30.0, 40.0]);
        let zoomed = zoom_bin(&bin, 2).unwrap();
        let set = zoomed.bin_set().unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.boundaries(), &[10.0, 25.0, 40.0]);

        let mut members: Vec<f64> = set.bins().iter().flat_map(|b| b.values().to_vec()).collect();
        members.sort_by(f64::total_cmp);
        assert_eq!(members, vec![10.0, 20.0, 30.0, 30.0, 40.0]);
        assert_eq!(zoomed.object_count(), 5);
    }

    #[test]
    fn test_zoom_carries_rows() {
        let ds = Dataset::new(
            vec![1.0, 2.0, 3.0],
            vec![
                ObjectRow::from(vec![1.0, 100.0]),
                ObjectRow::from(vec![2.0, 200.0]),
                ObjectRow::from(vec![3.0, 300.0]),
            ],
        )
        .unwrap();
        let bin = BinSet::from_dataset(&ds, vec![1.0, 3.0]).unwrap().bins()[0].clone();
        let set = zoom_bin(&bin, 2).unwrap().bin_set().unwrap().clone();
        assert_eq!(&*set.bins()[1].rows()[0], &[2.0, 200.0]);
    }

    #[test]
    fn test_empty_and_single_members() {
        assert_eq!(zoom_bin(&Bin::new(), 4).unwrap(), ZoomedBin::NotDrillable);
        assert!(!ZoomedBin::NotDrillable.is_drillable());

        match zoom_bin(&single_bin(&[7.5]), 4).unwrap() {
            ZoomedBin::SinglePoint { value, row } => {
                assert_eq!(value, 7.5);
                assert_eq!(&*row, &[7.5]);
            }
            other => panic!("expected a single point, got {other:?}"),
        }
    }

    #[test]
    fn test_identical_members_yield_one_sub_bin() {
        let zoomed = zoom_bin(&single_bin(&[3.0, 3.0, 3.0]), 8).unwrap();
        let set = zoomed.bin_set().unwrap();
        assert_eq!(set.counts(), vec![3]);
    }

    #[test]
    fn test_point_representation_shares_ranges() {
        let a = single_bin(&[1.0, 4.0]);
        let b = single_bin(&[2.0, 9.0]);
        let c = single_bin(&[50.0]);
        let repr = PointRepresentation::from_cells([
            (Cell::new(0, 3), &a),
            (Cell::new(1, 3), &b),
            (Cell::new(1, 5), &c),
        ]);
        assert_eq!(repr.point_count(), 5);
        assert_eq!(repr.bin_range(3), Some(ValueRange::new(1.0, 9.0)));
        assert_eq!(repr.values(Cell::new(1, 3)), Some(&[2.0, 9.0][..]));
        assert_eq!(repr.relative_position(Cell::new(0, 3), 5.0), Some(0.5));
        assert_eq!(repr.relative_position(Cell::new(1, 5), 50.0), Some(0.5));
        assert_eq!(repr.relative_position(Cell::new(0, 7), 1.0), None);
    }
}
