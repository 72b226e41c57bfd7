use serde::Serialize;

use crate::config::{DatasetConfig, SankeyConfig};
use crate::error::BiomassError;
use crate::flow_graph::{FlowGraph, NodeKind};
use crate::format::{escape_html, script_json, thousands};
use crate::schema::units;

const SANKEY_JS: &str = include_str!("sankey_view.js");

// ── Intermediate data structures ────────────────────────────────────────────

#[derive(Serialize)]
struct NodeData<'a> {
    label: &'a str,
    color: &'a str,
    /// 0 = sources, 1 = end uses
    column: u8,
    value: f64,
    hover: String,
}

#[derive(Serialize)]
struct LinkData {
    source: usize,
    target: usize,
    value: f64,
    hover: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SankeyData<'a> {
    width: u32,
    height: u32,
    node_pad: u32,
    node_thickness: u32,
    link_color: &'a str,
    nodes: Vec<NodeData<'a>>,
    links: Vec<LinkData>,
}

// ── HTML generation ─────────────────────────────────────────────────────────

/// Two-column flow diagram as a standalone HTML document.
///
/// Node order and link endpoints are taken from the graph positions as-is.
pub fn generate_sankey_html(
    graph: &FlowGraph,
    datasets: &DatasetConfig,
    config: &SankeyConfig,
) -> Result<String, BiomassError> {
    let nodes: Vec<NodeData> = graph
        .nodes()
        .map(|n| NodeData {
            label: &n.label,
            color: match n.kind {
                NodeKind::Source => datasets.color_of(&n.label),
                NodeKind::EndUse => config.end_use_color(&n.label),
            },
            column: match n.kind {
                NodeKind::Source => 0,
                NodeKind::EndUse => 1,
            },
            value: n.total,
            hover: format!("{}\n{} {}", n.label, thousands(n.total, 0), units::AMOUNT),
        })
        .collect();

    let links: Vec<LinkData> = graph
        .links()
        .map(|(source, target, link)| LinkData {
            source,
            target,
            value: link.amount,
            hover: format!(
                "{} \u{2192} {}\n{} {} ({:.0}%)",
                graph.label(source).unwrap_or(""),
                graph.label(target).unwrap_or(""),
                thousands(link.amount, 0),
                units::AMOUNT,
                link.fraction * 100.0
            ),
        })
        .collect();

    let data = SankeyData {
        width: config.width_px,
        height: config.height_px,
        node_pad: config.node_pad_px,
        node_thickness: config.node_thickness_px,
        link_color: &config.link_color,
        nodes,
        links,
    };

    let head = r##"<style>
  body { margin: 0; background: white; font-family: sans-serif; font-size: 12px; }
  .sankey-title { text-align: center; margin: 16px 0 4px 0; font-size: 20px; }
  .sankey-subtitle { text-align: center; color: #495057; font-size: 13px; margin-bottom: 8px; }
  #sankey-root { position: relative; margin: 0 auto; }
  .sankey-link { fill: none; cursor: pointer; }
  .sankey-link:hover { stroke-opacity: 0.8; }
  .sankey-node { stroke: black; stroke-width: 0.5; cursor: pointer; }
  .sankey-label { font-size: 12px; fill: #212529; pointer-events: none; }
  #sankey-tooltip {
    position: absolute; display: none; pointer-events: none; white-space: pre-line;
    background: rgba(255, 255, 255, 0.95); border: 1px solid #adb5bd; border-radius: 3px;
    padding: 4px 8px; font-size: 12px; color: #212529;
  }
</style>"##;

    let body = format!(
        r##"<div class="sankey-title">{title}</div>
<div class="sankey-subtitle">{subtitle}</div>
<div id="sankey-root" style="width:{width}px; height:{height}px;">
  <svg id="sankey-svg" xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"></svg>
  <div id="sankey-tooltip"></div>
</div>
<script>
{sankey_js}
SankeyView.create({data_json});
</script>"##,
        title = escape_html(&config.title),
        subtitle = escape_html(&config.subtitle),
        width = config.width_px,
        height = config.height_px,
        sankey_js = SANKEY_JS,
        data_json = script_json(&data)?,
    );

    Ok(super::document(&config.title, head, &body))
}
