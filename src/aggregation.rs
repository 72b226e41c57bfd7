use std::collections::HashMap;

use polars::prelude::*;
use serde::Serialize;

use crate::category::CategoryOrder;
use crate::error::BiomassError;
use crate::schema::{point, totals};

/// Per-category aggregate of `resource_amount`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub sum: f64,
    /// `None` for a category with no points.
    pub mean: Option<f64>,
    pub count: u64,
}

impl CategoryTotal {
    pub fn new(category: impl Into<String>, sum: f64, mean: Option<f64>, count: u64) -> Self {
        Self {
            category: category.into(),
            sum,
            mean,
            count,
        }
    }

    fn empty(category: &str) -> Self {
        Self::new(category, 0.0, None, 0)
    }
}

/// Group the unified record set by category and compute sum, mean and count.
///
/// Results follow `order`; a configured category with no rows still gets an
/// entry (sum 0, count 0). A row tagged with a category outside `order`
/// is reported as invalid data.
pub fn category_totals(
    frame: &DataFrame,
    order: &CategoryOrder,
) -> Result<Vec<CategoryTotal>, BiomassError> {
    let grouped = frame
        .clone()
        .lazy()
        .group_by_stable([col(point::RESOURCE_CATEGORY)])
        .agg([
            col(point::RESOURCE_AMOUNT).sum().alias(totals::SUM),
            col(point::RESOURCE_AMOUNT).mean().alias(totals::MEAN),
            col(point::RESOURCE_AMOUNT)
                .count()
                .cast(DataType::UInt64)
                .alias(totals::COUNT),
        ])
        .collect()?;

    let categories = grouped.column(point::RESOURCE_CATEGORY)?.str()?;
    let sums = grouped.column(totals::SUM)?.f64()?;
    let means = grouped.column(totals::MEAN)?.f64()?;
    let counts = grouped.column(totals::COUNT)?.u64()?;

    let mut found: HashMap<&str, CategoryTotal> = HashMap::new();
    for i in 0..grouped.height() {
        let label = categories
            .get(i)
            .ok_or_else(|| BiomassError::InvalidData(format!("Null category at row {i}")))?;
        if order.position(label).is_none() {
            return Err(BiomassError::InvalidData(format!(
                "Unknown resource category: {label}"
            )));
        }
        found.insert(
            label,
            CategoryTotal::new(
                label,
                sums.get(i).unwrap_or(0.0),
                means.get(i),
                counts.get(i).unwrap_or(0),
            ),
        );
    }

    Ok(order
        .iter()
        .map(|label| {
            found
                .remove(label)
                .unwrap_or_else(|| CategoryTotal::empty(label))
        })
        .collect())
}

/// Sum of every category's total.
pub fn grand_total(totals: &[CategoryTotal]) -> f64 {
    totals.iter().map(|t| t.sum).sum()
}
