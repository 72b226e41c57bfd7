use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::allocation::Allocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Source,
    EndUse,
}

/// Node payload: label plus the total shown on hover.
#[derive(Debug, Clone)]
pub struct FlowNode {
    pub label: String,
    pub kind: NodeKind,
    pub total: f64,
}

/// Edge payload.
#[derive(Debug, Clone)]
pub struct FlowLink {
    pub fraction: f64,
    pub amount: f64,
}

/// Two-tier directed graph of an allocation.
///
/// Sources are added first, then end uses, each in their category order,
/// so a node's index is its position in the diagram.
pub struct FlowGraph {
    graph: DiGraph<FlowNode, FlowLink>,
}

impl FlowGraph {
    pub fn from_allocation(allocation: &Allocation) -> Self {
        let mut graph = DiGraph::with_capacity(
            allocation.sources.len() + allocation.end_uses.len(),
            allocation.edges.len(),
        );

        let sources: Vec<NodeIndex> = allocation
            .source_totals
            .iter()
            .map(|t| {
                graph.add_node(FlowNode {
                    label: t.category.clone(),
                    kind: NodeKind::Source,
                    total: t.sum,
                })
            })
            .collect();

        let end_uses: Vec<NodeIndex> = allocation
            .end_use_totals
            .iter()
            .map(|t| {
                graph.add_node(FlowNode {
                    label: t.end_use.clone(),
                    kind: NodeKind::EndUse,
                    total: t.amount,
                })
            })
            .collect();

        for edge in &allocation.edges {
            graph.add_edge(
                sources[edge.source_index],
                end_uses[edge.end_use_index],
                FlowLink {
                    fraction: edge.fraction,
                    amount: edge.amount,
                },
            );
        }

        Self { graph }
    }

    /// Nodes in diagram order.
    pub fn nodes(&self) -> impl Iterator<Item = &FlowNode> {
        self.graph.node_indices().map(move |i| &self.graph[i])
    }

    /// `(source position, target position, link)` in insertion order.
    pub fn links(&self) -> impl Iterator<Item = (usize, usize, &FlowLink)> {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), e.weight()))
    }

    pub fn label(&self, position: usize) -> Option<&str> {
        self.graph
            .node_weight(NodeIndex::new(position))
            .map(|n| n.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::CategoryTotal;
    use crate::allocation::{allocate, default_matrix};

    fn graph() -> FlowGraph {
        let totals = vec![
            CategoryTotal::new("Forest Processing Waste", 100.0, None, 1),
            CategoryTotal::new("Logging Residues", 200.0, None, 1),
            CategoryTotal::new("Other Forest Waste", 50.0, None, 1),
            CategoryTotal::new("Small-Diameter Trees", 10.0, None, 1),
        ];
        FlowGraph::from_allocation(&allocate(&totals, &default_matrix().unwrap()).unwrap())
    }

    #[test]
    fn positions_follow_category_order() {
        let g = graph();
        assert_eq!(g.nodes().count(), 10);
        assert_eq!(g.label(0), Some("Forest Processing Waste"));
        assert_eq!(g.label(4), Some("Bioenergy & Electricity"));
        assert_eq!(g.label(9), Some("Biochemicals & Materials"));

        let kinds: Vec<NodeKind> = g.nodes().map(|n| n.kind).collect();
        assert_eq!(kinds[3], NodeKind::Source);
        assert_eq!(kinds[4], NodeKind::EndUse);
    }

    #[test]
    fn links_point_from_sources_to_end_uses() {
        let g = graph();
        let links: Vec<(usize, usize)> = g.links().map(|(s, t, _)| (s, t)).collect();
        assert_eq!(links.len(), 24);
        assert_eq!(links[0], (0, 4));
        assert_eq!(links[23], (3, 9));
    }

    #[test]
    fn node_flows_balance() {
        let g = graph();
        let into_bioenergy: f64 = g
            .links()
            .filter(|(_, t, _)| *t == 4)
            .map(|(_, _, l)| l.amount)
            .sum();
        let out_of_logging: f64 = g
            .links()
            .filter(|(s, _, _)| *s == 1)
            .map(|(_, _, l)| l.amount)
            .sum();
        assert!((into_bioenergy - 132.5).abs() < 1e-9);
        assert!((out_of_logging - 200.0).abs() < 1e-9);

        let totals: Vec<f64> = g.nodes().map(|n| n.total).collect();
        assert!((totals[4] - into_bioenergy).abs() < 1e-9);
        assert!((totals[1] - out_of_logging).abs() < 1e-9);
    }
}
