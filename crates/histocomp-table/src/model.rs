//! The histogram table model
//!
//! One row per dataset, one table per binning method. The model owns every
//! bin set, the bucketed density curves and the transient zoom state; all of
//! them are replaced wholesale on recomputation, never mutated in place.

use crate::config::ModelConfig;
use crate::zoom::{zoom_bin, Cell, PointRepresentation, ZoomOutcome, ZoomSelection};
use histocomp_binning::{compute_all, BinningContext, BinningMethod, MethodKind};
use histocomp_core::{Bin, BinSet, Dataset, Error, ObjectRow, Result, ValuePartitioner, ValueRange};
use histocomp_density::{BinnedCurve, DensityCurve, DensitySet};
use histocomp_similarity::{silhouettes, similarity_order, ObjectCountOrder, SimilarityReference};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

/// Bin sets of every dataset under one binning method
#[derive(Debug, Clone, PartialEq)]
pub struct MethodTable {
    method: BinningMethod,
    bin_sets: Vec<BinSet>,
    curves: Vec<BinnedCurve>,
    max_amount_in_any_bin: usize,
}

impl MethodTable {
    fn build(
        method: BinningMethod,
        datasets: &[Dataset],
        density: &DensitySet,
        context: &BinningContext,
    ) -> Result<Self> {
        let bin_sets = compute_all(datasets, &method, context)?;
        let curves = bin_sets
            .iter()
            .zip(density.curves())
            .map(|(set, curve)| curve.bucket(set.boundaries()))
            .collect();
        let max_amount_in_any_bin = bin_sets.iter().map(BinSet::max_count).max().unwrap_or(0);
        debug!(
            method = %method.kind(),
            max_amount_in_any_bin,
            bins = ?bin_sets.iter().map(BinSet::len).collect::<Vec<_>>(),
            "built method table"
        );
        Ok(Self {
            method,
            bin_sets,
            curves,
            max_amount_in_any_bin,
        })
    }

    pub fn method(&self) -> &BinningMethod {
        &self.method
    }

    pub fn bin_sets(&self) -> &[BinSet] {
        &self.bin_sets
    }

    /// Density curves bucketed by each dataset's boundaries
    pub fn curves(&self) -> &[BinnedCurve] {
        &self.curves
    }

    /// Largest bin population across all datasets, for a shared colour scale
    pub fn max_amount_in_any_bin(&self) -> usize {
        self.max_amount_in_any_bin
    }

    /// Bin counts of every dataset
    pub fn counts(&self) -> Vec<Vec<usize>> {
        self.bin_sets.iter().map(BinSet::counts).collect()
    }
}

/// Per-dataset, per-method histogram bins with drill-down and ranking
#[derive(Debug, Clone)]
pub struct HistogramTableModel {
    config: ModelConfig,
    datasets: Vec<Dataset>,
    global_range: ValueRange,
    density: DensitySet,
    tables: BTreeMap<MethodKind, MethodTable>,
    zoom: Option<ZoomSelection>,
}

impl HistogramTableModel {
    /// Bin every dataset with all three methods and estimate density curves
    #[instrument(skip(datasets, config), fields(n_datasets = datasets.len()))]
    pub fn new(datasets: Vec<Dataset>, config: ModelConfig) -> Result<Self> {
        config.validate()?;
        if datasets.is_empty() {
            return Err(Error::empty_input("histogram table"));
        }
        if let Some(i) = datasets.iter().position(Dataset::is_empty) {
            return Err(Error::InvalidInput(format!("dataset {i} has no objects")));
        }
        let global_range = ValueRange::union(datasets.iter().filter_map(Dataset::range))
            .ok_or_else(|| Error::empty_input("histogram table"))?;

        let density = DensitySet::estimate(&config.kde(), &datasets)?;
        let context = config.context(Some(global_range));
        let tables = MethodKind::ALL
            .iter()
            .map(|&kind| {
                MethodTable::build(config.method(kind), &datasets, &density, &context)
                    .map(|table| (kind, table))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        debug!(
            min = global_range.min,
            max = global_range.max,
            objects = datasets.iter().map(Dataset::len).sum::<usize>(),
            "histogram table ready"
        );
        Ok(Self {
            config,
            datasets,
            global_range,
            density,
            tables,
            zoom: None,
        })
    }

    /// Build from a flat value stream split by per-dataset object counts
    pub fn from_flat<R>(values: &[f64], rows: Vec<R>, counts: Vec<usize>, config: ModelConfig) -> Result<Self>
    where
        R: Into<ObjectRow>,
    {
        let datasets = ValuePartitioner::new(counts).partition(values, rows)?;
        Self::new(datasets, config)
    }

    /// Build from a `(dataset index, value)` stream
    pub fn from_tagged<R>(
        tagged: &[(usize, f64)],
        rows: Vec<R>,
        counts: Vec<usize>,
        config: ModelConfig,
    ) -> Result<Self>
    where
        R: Into<ObjectRow>,
    {
        let datasets = ValuePartitioner::new(counts).partition_tagged(tagged, rows)?;
        Self::new(datasets, config)
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    pub fn dataset(&self, index: usize) -> Result<&Dataset> {
        self.datasets
            .get(index)
            .ok_or_else(|| Error::out_of_range("dataset", index, self.datasets.len()))
    }

    /// Table of one binning method
    pub fn table(&self, kind: MethodKind) -> Result<&MethodTable> {
        self.tables
            .get(&kind)
            .ok_or_else(|| Error::InvalidParameter(format!("no table for method {kind}")))
    }

    /// Current uniform bin count
    pub fn uniform_bins(&self) -> usize {
        match self.tables.get(&MethodKind::Uniform).map(MethodTable::method) {
            Some(BinningMethod::Uniform { bins }) => *bins,
            _ => self.config.clamp_bins(self.config.uniform_bins),
        }
    }

    /// Re-bin one method's table over the full datasets
    ///
    /// Only uniform binning takes `bins`, clamped to `[min_bins, max_bins]`;
    /// the adaptive methods derive their own count and are simply re-run.
    /// Any zoom on that table is discarded.
    #[instrument(skip(self))]
    pub fn recalculate(&mut self, kind: MethodKind, bins: usize) -> Result<()> {
        let method = match kind {
            MethodKind::Uniform => BinningMethod::Uniform {
                bins: self.config.clamp_bins(bins),
            },
            _ => *self.table(kind)?.method(),
        };
        self.set_method(method)
    }

    /// Replace one table with a freshly computed one for `method`
    #[instrument(skip(self))]
    pub fn set_method(&mut self, method: BinningMethod) -> Result<()> {
        let method = match method {
            BinningMethod::Uniform { bins } => BinningMethod::Uniform {
                bins: self.config.clamp_bins(bins),
            },
            other => other,
        };
        let kind = method.kind();
        let context = self.config.context(Some(self.global_range));
        let table = MethodTable::build(method, &self.datasets, &self.density, &context)?;
        self.tables.insert(kind, table);
        if self.zoom.as_ref().is_some_and(|z| z.kind == kind) {
            debug!(method = %kind, "discarding zoom after recalculation");
            self.zoom = None;
        }
        Ok(())
    }

    /// Double the uniform bin count while it lies in `[min_bins, max_bins)`
    ///
    /// Returns the bin count in effect afterwards.
    pub fn zoom_in_uniform(&mut self) -> Result<usize> {
        let bins = self.uniform_bins();
        if bins >= self.config.min_bins && bins < self.config.max_bins {
            self.recalculate(MethodKind::Uniform, bins * 2)?;
        }
        Ok(self.uniform_bins())
    }

    /// Halve the uniform bin count while it lies in `(min_bins, max_bins]`
    pub fn zoom_out_uniform(&mut self) -> Result<usize> {
        let bins = self.uniform_bins();
        if bins > self.config.min_bins && bins <= self.config.max_bins {
            self.recalculate(MethodKind::Uniform, bins / 2)?;
        }
        Ok(self.uniform_bins())
    }

    /// Bin set of one dataset under one method
    pub fn bin_set(&self, dataset: usize, kind: MethodKind) -> Result<&BinSet> {
        let sets = self.table(kind)?.bin_sets();
        sets.get(dataset)
            .ok_or_else(|| Error::out_of_range("dataset", dataset, sets.len()))
    }

    pub fn bin_boundaries(&self, dataset: usize, kind: MethodKind) -> Result<&[f64]> {
        Ok(self.bin_set(dataset, kind)?.boundaries())
    }

    pub fn objects_per_bin(&self, dataset: usize, kind: MethodKind) -> Result<Vec<usize>> {
        Ok(self.bin_set(dataset, kind)?.counts())
    }

    /// Density samples of one dataset bucketed by the method's boundaries
    pub fn density_curve(&self, dataset: usize, kind: MethodKind) -> Result<&BinnedCurve> {
        let curves = self.table(kind)?.curves();
        curves
            .get(dataset)
            .ok_or_else(|| Error::out_of_range("dataset", dataset, curves.len()))
    }

    /// Unbucketed density samples of one dataset
    pub fn raw_density(&self, dataset: usize) -> Result<&DensityCurve> {
        self.density
            .curve(dataset)
            .ok_or_else(|| Error::out_of_range("dataset", dataset, self.datasets.len()))
    }

    pub fn max_amount_in_any_bin(&self, kind: MethodKind) -> Result<usize> {
        Ok(self.table(kind)?.max_amount_in_any_bin())
    }

    /// Smallest and largest value over all datasets
    pub fn global_range(&self) -> ValueRange {
        self.global_range
    }

    /// Smallest and largest sampled density over all datasets
    pub fn density_range(&self) -> Option<ValueRange> {
        self.density.density_range()
    }

    /// Members of one bin
    pub fn objects_in_bin(&self, dataset: usize, kind: MethodKind, bin: usize) -> Result<&Bin> {
        let set = self.bin_set(dataset, kind)?;
        set.bin(bin)
            .ok_or_else(|| Error::out_of_range("bin", bin, set.len()))
    }

    /// Object rows of the picked cells, grouped in cell order
    pub fn selected_objects(&self, kind: MethodKind, cells: &[Cell]) -> Result<Vec<ObjectRow>> {
        let mut rows = Vec::new();
        for cell in cells {
            rows.extend_from_slice(self.objects_in_bin(cell.dataset, kind, cell.bin)?.rows());
        }
        Ok(rows)
    }

    /// Dataset indices ordered by chi-squared distance to the reference
    pub fn similarity_order(&self, kind: MethodKind, reference: &SimilarityReference) -> Result<Vec<usize>> {
        similarity_order(&self.table(kind)?.counts(), reference)
    }

    /// Dataset indices ordered by number of objects
    pub fn object_count_order(&self, order: ObjectCountOrder) -> Vec<usize> {
        let counts: Vec<usize> = self.datasets.iter().map(Dataset::len).collect();
        order.order(&counts)
    }

    /// Silhouette coefficient of every dataset under one method
    pub fn silhouette(&self, kind: MethodKind) -> Result<Vec<f64>> {
        Ok(silhouettes(self.table(kind)?.bin_sets()))
    }

    /// Current drill-down state, if any
    pub fn zoom_selection(&self) -> Option<&ZoomSelection> {
        self.zoom.as_ref()
    }

    /// Drill into the picked cells of one method's table
    ///
    /// A count above `max_bins` switches to point representation; anything
    /// else is clamped to `[zoom_min_bins, max_bins]`. The selection replaces
    /// any previous zoom.
    #[instrument(skip(self, cells), fields(n_cells = cells.len()))]
    pub fn zoom(&mut self, kind: MethodKind, cells: &[Cell], bin_count: usize) -> Result<ZoomOutcome> {
        if cells.is_empty() {
            return Err(Error::InvalidInput("zoom requires at least one selected cell".into()));
        }
        for cell in cells {
            self.objects_in_bin(cell.dataset, kind, cell.bin)?;
        }
        let point_representation = bin_count > self.config.max_bins;
        let selection = ZoomSelection {
            kind,
            cells: cells.iter().copied().collect::<BTreeSet<_>>(),
            bin_count: self.config.clamp_zoom_bins(bin_count),
            point_representation,
        };
        let outcome = self.render_zoom(&selection)?;
        self.zoom = Some(selection);
        Ok(outcome)
    }

    /// Double the zoom count; at `max_bins` switch to point representation
    pub fn zoom_in_selection(&mut self) -> Result<ZoomOutcome> {
        let mut selection = self.zoom.clone().ok_or_else(no_selection)?;
        let (min, max) = (self.config.zoom_min_bins, self.config.max_bins);
        if !selection.point_representation {
            if selection.bin_count >= min && selection.bin_count < max {
                selection.bin_count = (selection.bin_count * 2).min(max);
            } else if selection.bin_count == max {
                selection.point_representation = true;
            }
        }
        debug!(bins = selection.bin_count, points = selection.point_representation, "zoom in");
        let outcome = self.render_zoom(&selection)?;
        self.zoom = Some(selection);
        Ok(outcome)
    }

    /// Leave point representation, or halve the zoom count
    pub fn zoom_out_selection(&mut self) -> Result<ZoomOutcome> {
        let mut selection = self.zoom.clone().ok_or_else(no_selection)?;
        let (min, max) = (self.config.zoom_min_bins, self.config.max_bins);
        if selection.point_representation {
            selection.point_representation = false;
        } else if selection.bin_count > min && selection.bin_count <= max {
            selection.bin_count = (selection.bin_count / 2).max(min);
        }
        debug!(bins = selection.bin_count, points = selection.point_representation, "zoom out");
        let outcome = self.render_zoom(&selection)?;
        self.zoom = Some(selection);
        Ok(outcome)
    }

    /// Discard the drill-down state
    pub fn clear_zoom(&mut self) {
        self.zoom = None;
    }

    fn render_zoom(&self, selection: &ZoomSelection) -> Result<ZoomOutcome> {
        let mut bins = Vec::with_capacity(selection.cells.len());
        for &cell in &selection.cells {
            bins.push((cell, self.objects_in_bin(cell.dataset, selection.kind, cell.bin)?));
        }
        if selection.point_representation {
            return Ok(ZoomOutcome::PointRepresentation(PointRepresentation::from_cells(bins)));
        }
        let cells = bins
            .into_iter()
            .map(|(cell, bin)| zoom_bin(bin, selection.bin_count).map(|z| (cell, z)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        Ok(ZoomOutcome::Bins {
            bin_count: selection.bin_count,
            cells,
        })
    }
}

fn no_selection() -> Error {
    Error::InvalidInput("no zoom selection to change".into())
}
