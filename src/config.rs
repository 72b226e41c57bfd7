use std::path::PathBuf;

use crate::category::CategoryOrder;
use crate::error::BiomassError;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_MAP_OUTPUT: &str = "california_forest_biomass_map.html";
pub const DEFAULT_SANKEY_OUTPUT: &str = "biomass_sankey_diagram.html";

const FALLBACK_COLOR: &str = "#999999";

// ── Datasets ────────────────────────────────────────────────────────────────

/// One labelled CSV source.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    pub category: String,
    /// Relative to `DatasetConfig::data_dir` unless absolute.
    pub file: PathBuf,
    pub color: String,
}

/// The ordered set of datasets a run loads.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub data_dir: PathBuf,
    pub sources: Vec<DatasetSource>,
}

impl DatasetConfig {
    /// The four Billion Ton Report point files for California.
    pub fn california_default(data_dir: impl Into<PathBuf>) -> Self {
        let source = |category: &str, file: &str, color: &str| DatasetSource {
            category: category.to_string(),
            file: PathBuf::from(file),
            color: color.to_string(),
        };
        Self {
            data_dir: data_dir.into(),
            sources: vec![
                source(
                    "Forest Processing Waste",
                    "CA_forest_processing_waste_points_BillionTonReport.csv",
                    "#FF6B6B",
                ),
                source(
                    "Logging Residues",
                    "CA_logging_residues_points_BillionTonReport.csv",
                    "#4ECDC4",
                ),
                source(
                    "Other Forest Waste",
                    "CA_other_forest_waste_points_BillionTonReport.csv",
                    "#95E1D3",
                ),
                source(
                    "Small-Diameter Trees",
                    "CA_small-diameter_trees_points_BillionTonReport.csv",
                    "#F38181",
                ),
            ],
        }
    }

    pub fn path_of(&self, source: &DatasetSource) -> PathBuf {
        if source.file.is_absolute() {
            source.file.clone()
        } else {
            self.data_dir.join(&source.file)
        }
    }

    pub fn category_order(&self) -> Result<CategoryOrder, BiomassError> {
        CategoryOrder::new(self.sources.iter().map(|s| s.category.clone()))
    }

    pub fn color_of(&self, category: &str) -> &str {
        self.sources
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.color.as_str())
            .unwrap_or(FALLBACK_COLOR)
    }
}

// ── Map ─────────────────────────────────────────────────────────────────────

/// Configuration for the resource map.
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Cap on markers per category (largest amounts win)
    pub max_points_per_category: usize,
    /// Marker radius = amount * radius_scale, clamped to [min_radius, max_radius]
    pub radius_scale: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub zoom_start: u8,
    pub tile_url: String,
    pub tile_attribution: String,
    pub title: String,
    pub subtitle: String,
    pub fill_opacity: f64,
    pub stroke_weight: f64,
    pub popup_max_width: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            max_points_per_category: 500,
            radius_scale: 0.5,
            min_radius: 3.0,
            max_radius: 15.0,
            zoom_start: 6,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            tile_attribution:
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                    .to_string(),
            title: "California Forest Biomass Waste Resources".to_string(),
            subtitle: "Data from 2023 Billion Ton Report".to_string(),
            fill_opacity: 0.6,
            stroke_weight: 1.0,
            popup_max_width: 300,
        }
    }
}

// ── Sankey ──────────────────────────────────────────────────────────────────

/// Configuration for the flow diagram.
#[derive(Debug, Clone)]
pub struct SankeyConfig {
    pub title: String,
    pub subtitle: String,
    pub width_px: u32,
    pub height_px: u32,
    pub node_pad_px: u32,
    pub node_thickness_px: u32,
    pub link_color: String,
    /// Node colours for the end-use column; sources take theirs from the datasets.
    pub end_use_colors: Vec<(String, String)>,
}

impl SankeyConfig {
    pub fn end_use_color(&self, end_use: &str) -> &str {
        self.end_use_colors
            .iter()
            .find(|(label, _)| label == end_use)
            .map(|(_, color)| color.as_str())
            .unwrap_or(FALLBACK_COLOR)
    }
}

impl Default for SankeyConfig {
    fn default() -> Self {
        let colors = [
            ("Bioenergy & Electricity", "#FFA07A"),
            ("Heat & Thermal Energy", "#FFD700"),
            ("Wood Pellets", "#DDA15E"),
            ("Biofuels (Ethanol/Biodiesel)", "#90EE90"),
            ("Biochar & Soil Amendments", "#8B4513"),
            ("Biochemicals & Materials", "#9370DB"),
        ];
        Self {
            title: "California Forest Biomass: Resources to End Uses".to_string(),
            subtitle: "Annual flow potential in dry tonnes/year".to_string(),
            width_px: 1400,
            height_px: 800,
            node_pad_px: 15,
            node_thickness_px: 20,
            link_color: "rgba(200, 200, 200, 0.4)".to_string(),
            end_use_colors: colors
                .iter()
                .map(|(l, c)| (l.to_string(), c.to_string()))
                .collect(),
        }
    }
}
