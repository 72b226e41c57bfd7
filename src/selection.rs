use serde::Serialize;

use crate::category::CategoryOrder;
use crate::model::ResourcePoint;

/// Points chosen for display in one category.
#[derive(Debug, Clone)]
pub struct CategorySelection<'a> {
    pub category: String,
    /// Largest amounts first; equal amounts keep input order.
    pub points: Vec<&'a ResourcePoint>,
    /// Points the category had before the cap.
    pub available: usize,
}

impl CategorySelection<'_> {
    pub fn truncated(&self) -> bool {
        self.available > self.points.len()
    }

    pub fn summary(&self) -> SelectionSummary {
        SelectionSummary {
            category: self.category.clone(),
            shown: self.points.len(),
            available: self.available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub category: String,
    pub shown: usize,
    pub available: usize,
}

/// Top-`k` points of `category` by descending amount.
pub fn top_k_by_amount<'a>(
    points: &'a [ResourcePoint],
    category: &str,
    k: usize,
) -> CategorySelection<'a> {
    let mut selected: Vec<&ResourcePoint> =
        points.iter().filter(|p| p.category == category).collect();
    let available = selected.len();
    // sort_by is stable, so ties stay in input order
    selected.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    selected.truncate(k);
    CategorySelection {
        category: category.to_string(),
        points: selected,
        available,
    }
}

/// Apply the per-category cap to every category in `order`.
pub fn select_per_category<'a>(
    points: &'a [ResourcePoint],
    order: &CategoryOrder,
    k: usize,
) -> Vec<CategorySelection<'a>> {
    order
        .iter()
        .map(|category| top_k_by_amount(points, category, k))
        .collect()
}
