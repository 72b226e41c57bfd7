use serde::Serialize;

use crate::config::{DatasetConfig, MapConfig};
use crate::error::BiomassError;
use crate::format::{escape_html, script_json};
use crate::model::ResourcePoint;
use crate::schema::units;
use crate::selection::CategorySelection;

const MAP_JS: &str = include_str!("map_view.js");

const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

// ── Intermediate data structures ────────────────────────────────────────────

#[derive(Serialize)]
struct MarkerData {
    lat: f64,
    lon: f64,
    radius: f64,
    popup: String,
}

#[derive(Serialize)]
struct LayerData<'a> {
    name: &'a str,
    color: &'a str,
    markers: Vec<MarkerData>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapData<'a> {
    center: [f64; 2],
    zoom: u8,
    tile_url: &'a str,
    tile_attribution: &'a str,
    fill_opacity: f64,
    weight: f64,
    popup_max_width: u32,
    layers: Vec<LayerData<'a>>,
}

// ── Marker helpers ──────────────────────────────────────────────────────────

/// Linear in amount, clamped to the configured bounds.
pub fn marker_radius(amount: f64, config: &MapConfig) -> f64 {
    (amount * config.radius_scale)
        .max(config.min_radius)
        .min(config.max_radius)
}

/// Popup body for one point. Text fields are escaped.
pub fn popup_html(point: &ResourcePoint) -> String {
    let price = match point.price {
        Some(p) => format!("${p:.2}/{}", units::PRICE),
        None => "n/a".to_string(),
    };
    format!(
        "<b>{category}</b><br>\
         <b>Amount:</b> {amount:.2} {unit}<br>\
         <b>Resource:</b> {resource}<br>\
         <b>County:</b> {county}<br>\
         <b>Scenario:</b> {scenario}<br>\
         <b>Price:</b> {price}<br>\
         <b>Location:</b> ({lat:.4}, {lon:.4})",
        category = escape_html(&point.category),
        amount = point.amount,
        unit = units::AMOUNT,
        resource = escape_html(&point.resource),
        county = escape_html(&point.county),
        scenario = escape_html(&point.scenario),
        price = price,
        lat = point.latitude,
        lon = point.longitude,
    )
}

// ── HTML generation ─────────────────────────────────────────────────────────

/// Layered point map as a standalone HTML document.
///
/// One toggleable layer per selection, in the given order.
pub fn generate_map_html(
    selections: &[CategorySelection<'_>],
    center: [f64; 2],
    datasets: &DatasetConfig,
    config: &MapConfig,
) -> Result<String, BiomassError> {
    let layers = selections
        .iter()
        .map(|sel| LayerData {
            name: &sel.category,
            color: datasets.color_of(&sel.category),
            markers: sel
                .points
                .iter()
                .map(|p| MarkerData {
                    lat: p.latitude,
                    lon: p.longitude,
                    radius: marker_radius(p.amount, config),
                    popup: popup_html(p),
                })
                .collect(),
        })
        .collect();

    let data = MapData {
        center,
        zoom: config.zoom_start,
        tile_url: &config.tile_url,
        tile_attribution: &config.tile_attribution,
        fill_opacity: config.fill_opacity,
        weight: config.stroke_weight,
        popup_max_width: config.popup_max_width,
        layers,
    };

    let head = format!(
        r##"<link rel="stylesheet" href="{css}">
<script src="{js}"></script>
<style>
  html, body {{ margin: 0; padding: 0; height: 100%; }}
  #biomass-map {{ position: absolute; top: 0; bottom: 0; left: 0; right: 0; }}
  .biomass-title {{
    position: fixed; top: 10px; left: 50px; width: 400px;
    background-color: white; border: 2px solid grey; z-index: 9999;
    font-family: sans-serif; font-size: 14px; padding: 10px; border-radius: 5px;
  }}
  .biomass-title h4 {{ margin-top: 0; }}
  .biomass-title p {{ margin: 0; font-size: 11px; }}
  .biomass-fullscreen {{
    width: 30px; height: 30px; line-height: 30px; text-align: center;
    background: #fff; font-size: 18px; text-decoration: none; color: #333;
  }}
</style>"##,
        css = LEAFLET_CSS,
        js = LEAFLET_JS,
    );

    let body = format!(
        r##"<div class="biomass-title">
  <h4>{title}</h4>
  <p>{subtitle}</p>
</div>
<div id="biomass-map"></div>
<script>
{map_js}
BiomassMap.create({data_json});
</script>"##,
        title = escape_html(&config.title),
        subtitle = escape_html(&config.subtitle),
        map_js = MAP_JS,
        data_json = script_json(&data)?,
    );

    Ok(super::document(&config.title, &head, &body))
}
