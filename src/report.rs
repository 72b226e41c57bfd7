//! Console summaries printed after each run.

use std::fmt::Write as FmtWrite;

use crate::aggregation::CategoryTotal;
use crate::allocation::Allocation;
use crate::format::thousands;
use crate::schema::units;
use crate::selection::SelectionSummary;

fn rule(width: usize) -> String {
    "=".repeat(width)
}

/// Total, average and point count per category.
pub fn resource_summary(totals: &[CategoryTotal], record_count: usize) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "Total records: {}", thousands(record_count as f64, 0));
    let _ = writeln!(s);
    let _ = writeln!(s, "{}", rule(60));
    let _ = writeln!(s, "RESOURCE SUMMARY");
    let _ = writeln!(s, "{}", rule(60));
    for t in totals {
        let _ = writeln!(s);
        let _ = writeln!(s, "{}:", t.category);
        let _ = writeln!(s, "  Total: {} {}", thousands(t.sum, 2), units::AMOUNT);
        match t.mean {
            Some(mean) => {
                let _ = writeln!(s, "  Average per point: {mean:.2} {}", units::AMOUNT);
            }
            None => {
                let _ = writeln!(s, "  Average per point: n/a");
            }
        }
        let _ = writeln!(s, "  Number of points: {}", thousands(t.count as f64, 0));
    }
    s
}

/// Which categories were capped for display.
pub fn selection_summary(selections: &[SelectionSummary], cap: usize) -> String {
    let mut s = String::new();
    for sel in selections {
        if sel.available > sel.shown {
            let _ = writeln!(s, "  {}: Using top {cap} largest sources", sel.category);
        } else {
            let _ = writeln!(s, "  {}: Using all {} points", sel.category, sel.shown);
        }
    }
    s
}

/// Source totals, per-source fan-out and end-use totals.
pub fn allocation_report(allocation: &Allocation) -> String {
    let mut s = String::new();

    let _ = writeln!(s, "{}", rule(70));
    let _ = writeln!(s, "FOREST BIOMASS RESOURCES ({})", units::AMOUNT);
    let _ = writeln!(s, "{}", rule(70));
    for t in &allocation.source_totals {
        let _ = writeln!(s, "{:.<45} {:>15}", t.category, thousands(t.sum, 0));
    }
    let _ = writeln!(
        s,
        "{:.<45} {:>15}",
        "TOTAL",
        thousands(allocation.grand_total, 0)
    );
    let _ = writeln!(s, "{}", rule(70));

    let _ = writeln!(s);
    let _ = writeln!(s, "{}", rule(70));
    let _ = writeln!(s, "POTENTIAL END USE ALLOCATION ({})", units::AMOUNT);
    let _ = writeln!(s, "{}", rule(70));
    for t in &allocation.source_totals {
        let _ = writeln!(s);
        let _ = writeln!(s, "{} ({} tonnes/year):", t.category, thousands(t.sum, 0));
        for edge in allocation.edges_from(&t.category) {
            let _ = writeln!(
                s,
                "  \u{2192} {:.<45} {:>12} ({:.0}%)",
                edge.end_use,
                thousands(edge.amount, 0),
                edge.fraction * 100.0
            );
        }
    }

    let _ = writeln!(s);
    let _ = writeln!(s, "{}", rule(70));
    let _ = writeln!(s, "TOTAL BY END USE");
    let _ = writeln!(s, "{}", rule(70));
    for t in &allocation.end_use_totals {
        let _ = writeln!(
            s,
            "{:.<50} {:>12} ({})",
            t.end_use,
            thousands(t.amount, 0),
            percent(allocation.percent_of_total(t.amount))
        );
    }
    let unallocated = allocation.unallocated_total();
    if unallocated > 0.0 && allocation.grand_total > 0.0 && unallocated / allocation.grand_total > 1e-9 {
        let _ = writeln!(
            s,
            "{:.<50} {:>12} ({})",
            "Unallocated",
            thousands(unallocated, 0),
            percent(allocation.percent_of_total(unallocated))
        );
    }
    let _ = writeln!(s, "{}", rule(70));
    s
}

fn percent(value: Option<f64>) -> String {
    match value {
        Some(p) => format!("{p:.1}%"),
        None => "n/a".to_string(),
    }
}
