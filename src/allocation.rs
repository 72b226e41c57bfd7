//! Resource-to-end-use allocation.
//!
//! Each source category's total is fanned out over the end uses by a fixed
//! fraction table. Rows may be partial (fractions summing below 1); the
//! residual is left unallocated and reported, never redistributed.

use log::warn;
use serde::Serialize;

use crate::aggregation::{self, CategoryTotal};
use crate::category::CategoryOrder;
use crate::error::BiomassError;

/// Rows summing above 1 by more than this are over-allocated.
const ROW_SUM_TOLERANCE: f64 = 1e-9;

// ── Matrix ──────────────────────────────────────────────────────────────────

/// Dense (source category × end use) fraction table.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationMatrix {
    end_uses: CategoryOrder,
    sources: Vec<String>,
    /// rows[source][end_use], aligned with `end_uses`
    rows: Vec<Vec<f64>>,
}

impl AllocationMatrix {
    pub fn new(end_uses: CategoryOrder) -> Self {
        Self {
            end_uses,
            sources: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Add the row for `source`; `fractions` follow the end-use order.
    pub fn with_row(mut self, source: &str, fractions: &[f64]) -> Result<Self, BiomassError> {
        if self.sources.iter().any(|s| s == source) {
            return Err(BiomassError::InvalidAllocation(format!(
                "duplicate row for '{source}'"
            )));
        }
        if fractions.len() != self.end_uses.len() {
            return Err(BiomassError::InvalidAllocation(format!(
                "row '{source}' has {} fractions, expected {}",
                fractions.len(),
                self.end_uses.len()
            )));
        }
        for (end_use, &f) in self.end_uses.iter().zip(fractions) {
            if !f.is_finite() || !(0.0..=1.0).contains(&f) {
                return Err(BiomassError::InvalidAllocation(format!(
                    "fraction {f} for '{source}' -> '{end_use}' is outside [0, 1]"
                )));
            }
        }
        let sum: f64 = fractions.iter().sum();
        if sum > 1.0 + ROW_SUM_TOLERANCE {
            return Err(BiomassError::InvalidAllocation(format!(
                "row '{source}' allocates {sum} of its total"
            )));
        }

        self.sources.push(source.to_string());
        self.rows.push(fractions.to_vec());
        Ok(self)
    }

    pub fn end_uses(&self) -> &CategoryOrder {
        &self.end_uses
    }

    pub fn row(&self, source: &str) -> Option<&[f64]> {
        self.sources
            .iter()
            .position(|s| s == source)
            .map(|i| self.rows[i].as_slice())
    }

    pub fn row_sum(&self, source: &str) -> Option<f64> {
        self.row(source).map(|row| row.iter().sum())
    }

    /// Share of the source's total left unallocated by a partial row.
    pub fn residual(&self, source: &str) -> Option<f64> {
        self.row_sum(source).map(|sum| (1.0 - sum).max(0.0))
    }
}

/// The fixed allocation table for the California forest-biomass model.
pub fn default_matrix() -> Result<AllocationMatrix, BiomassError> {
    let end_uses = CategoryOrder::new([
        "Bioenergy & Electricity",
        "Heat & Thermal Energy",
        "Wood Pellets",
        "Biofuels (Ethanol/Biodiesel)",
        "Biochar & Soil Amendments",
        "Biochemicals & Materials",
    ])?;

    AllocationMatrix::new(end_uses)
        .with_row(
            "Forest Processing Waste",
            &[0.35, 0.25, 0.20, 0.10, 0.05, 0.05],
        )?
        .with_row("Logging Residues", &[0.40, 0.20, 0.15, 0.15, 0.05, 0.05])?
        .with_row("Other Forest Waste", &[0.30, 0.25, 0.20, 0.10, 0.10, 0.05])?
        .with_row(
            "Small-Diameter Trees",
            &[0.25, 0.15, 0.30, 0.10, 0.05, 0.15],
        )
}

// ── Allocation result ───────────────────────────────────────────────────────

/// One (source, end use) flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowEdge {
    pub source: String,
    pub end_use: String,
    pub source_index: usize,
    pub end_use_index: usize,
    pub fraction: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndUseTotal {
    pub end_use: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub sources: CategoryOrder,
    pub end_uses: CategoryOrder,
    pub source_totals: Vec<CategoryTotal>,
    /// Source-major, end uses in matrix order.
    pub edges: Vec<FlowEdge>,
    pub end_use_totals: Vec<EndUseTotal>,
    pub grand_total: f64,
}

impl Allocation {
    pub fn edges_from<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a FlowEdge> + 'a {
        self.edges.iter().filter(move |e| e.source == source)
    }

    pub fn allocated_total(&self) -> f64 {
        self.end_use_totals.iter().map(|t| t.amount).sum()
    }

    pub fn unallocated_total(&self) -> f64 {
        (self.grand_total - self.allocated_total()).max(0.0)
    }

    /// `amount` as a percentage of the grand total; `None` when nothing was loaded.
    pub fn percent_of_total(&self, amount: f64) -> Option<f64> {
        (self.grand_total > 0.0).then(|| amount / self.grand_total * 100.0)
    }
}

/// Fan every category total out over the end uses.
///
/// Sources are visited in `totals` order and end uses in matrix order, so
/// the edge list (and the diagram built from it) is reproducible. A source
/// with no matrix row is an error.
pub fn allocate(
    totals: &[CategoryTotal],
    matrix: &AllocationMatrix,
) -> Result<Allocation, BiomassError> {
    let sources = CategoryOrder::new(totals.iter().map(|t| t.category.clone()))?;
    let end_uses = matrix.end_uses().clone();

    let mut edges = Vec::with_capacity(totals.len() * end_uses.len());
    let mut end_use_amounts = vec![0.0f64; end_uses.len()];

    for (i, total) in totals.iter().enumerate() {
        if !total.sum.is_finite() || total.sum < 0.0 {
            return Err(BiomassError::InvalidData(format!(
                "total for '{}' is {}",
                total.category, total.sum
            )));
        }
        let row = matrix
            .row(&total.category)
            .ok_or_else(|| BiomassError::UnallocatedCategory(total.category.clone()))?;

        if let Some(residual) = matrix.residual(&total.category) {
            if residual > ROW_SUM_TOLERANCE {
                warn!(
                    "event=partial_allocation category=\"{}\" residual_fraction={:.4}",
                    total.category, residual
                );
            }
        }

        for (j, end_use) in end_uses.iter().enumerate() {
            let fraction = row[j];
            let amount = total.sum * fraction;
            end_use_amounts[j] += amount;
            edges.push(FlowEdge {
                source: total.category.clone(),
                end_use: end_use.to_string(),
                source_index: i,
                end_use_index: j,
                fraction,
                amount,
            });
        }
    }

    let end_use_totals = end_uses
        .iter()
        .zip(end_use_amounts)
        .map(|(end_use, amount)| EndUseTotal {
            end_use: end_use.to_string(),
            amount,
        })
        .collect();

    Ok(Allocation {
        sources,
        end_uses,
        source_totals: totals.to_vec(),
        edges,
        end_use_totals,
        grand_total: aggregation::grand_total(totals),
    })
}
