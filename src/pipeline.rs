//! The two one-shot runs: load → aggregate → render → write.
//!
//! Each run re-derives everything from the raw CSVs; nothing is shared
//! between them.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;

use crate::aggregation::CategoryTotal;
use crate::allocation::{self, Allocation, AllocationMatrix};
use crate::config::{DatasetConfig, MapConfig, SankeyConfig};
use crate::error::BiomassError;
use crate::flow_graph::FlowGraph;
use crate::model::ResourceModel;
use crate::report;
use crate::selection::{self, SelectionSummary};
use crate::visualization;

#[derive(Debug, Clone, Serialize)]
pub struct MapRun {
    pub output: PathBuf,
    pub record_count: usize,
    pub max_points_per_category: usize,
    pub totals: Vec<CategoryTotal>,
    pub selections: Vec<SelectionSummary>,
}

impl MapRun {
    pub fn report(&self) -> String {
        format!(
            "{}\n{}",
            report::resource_summary(&self.totals, self.record_count),
            report::selection_summary(&self.selections, self.max_points_per_category)
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SankeyRun {
    pub output: PathBuf,
    pub allocation: Allocation,
}

impl SankeyRun {
    pub fn report(&self) -> String {
        report::allocation_report(&self.allocation)
    }
}

/// Build the layered resource map and write it to `output`.
pub fn run_map(
    datasets: &DatasetConfig,
    config: &MapConfig,
    output: &Path,
) -> Result<MapRun, BiomassError> {
    let model = ResourceModel::load(datasets)?;
    let totals = model.category_totals()?;
    let center = model.center()?;

    let selections = selection::select_per_category(
        model.points(),
        model.order(),
        config.max_points_per_category,
    );
    for sel in selections.iter().filter(|s| s.truncated()) {
        warn!(
            "event=points_capped category=\"{}\" shown={} available={}",
            sel.category,
            sel.points.len(),
            sel.available
        );
    }

    let html = visualization::generate_map_html(&selections, center, datasets, config)?;
    write_artifact(output, &html)?;

    Ok(MapRun {
        output: output.to_path_buf(),
        record_count: model.record_count(),
        max_points_per_category: config.max_points_per_category,
        totals,
        selections: selections.iter().map(|s| s.summary()).collect(),
    })
}

/// Allocate category totals over the end uses and write the flow diagram.
pub fn run_sankey(
    datasets: &DatasetConfig,
    matrix: &AllocationMatrix,
    config: &SankeyConfig,
    output: &Path,
) -> Result<SankeyRun, BiomassError> {
    let model = ResourceModel::load(datasets)?;
    let totals = model.category_totals()?;
    let allocation = allocation::allocate(&totals, matrix)?;

    let graph = FlowGraph::from_allocation(&allocation);
    let html = visualization::generate_sankey_html(&graph, datasets, config)?;
    write_artifact(output, &html)?;

    Ok(SankeyRun {
        output: output.to_path_buf(),
        allocation,
    })
}

fn write_artifact(path: &Path, contents: &str) -> Result<(), BiomassError> {
    std::fs::write(path, contents)?;
    info!(
        "event=artifact_written path={} bytes={}",
        path.display(),
        contents.len()
    );
    Ok(())
}
