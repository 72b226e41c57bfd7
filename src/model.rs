use std::path::Path;

use log::{debug, info};
use polars::prelude::*;
use serde::Serialize;

use crate::aggregation::{self, CategoryTotal};
use crate::category::CategoryOrder;
use crate::config::DatasetConfig;
use crate::error::BiomassError;
use crate::schema::point;

/// One geolocated resource record, tagged with its category at load time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourcePoint {
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Dry tonnes/year
    pub amount: f64,
    pub resource: String,
    pub county: String,
    pub scenario: String,
    /// Per tonne; blank in the source file maps to `None`.
    pub price: Option<f64>,
}

/// The unified record set for one run.
///
/// Holds the concatenated DataFrame (all sources, tagged with
/// `resource_category`) plus the same rows materialized as `ResourcePoint`s.
pub struct ResourceModel {
    order: CategoryOrder,
    frame: DataFrame,
    points: Vec<ResourcePoint>,
}

impl ResourceModel {
    // ── Data loading ────────────────────────────────────────────────────────

    /// Load every configured dataset, in order.
    ///
    /// Any single source failing aborts the whole load; the error names
    /// the category and file.
    pub fn load(config: &DatasetConfig) -> Result<Self, BiomassError> {
        let order = config.category_order()?;
        if order.is_empty() {
            return Err(BiomassError::InvalidData("no datasets configured".into()));
        }

        let mut frames = Vec::with_capacity(config.sources.len());
        for source in &config.sources {
            let path = config.path_of(source);
            let df = Self::load_source(&path, &source.category)
                .map_err(|err| err.for_dataset(&source.category, &path))?;
            info!(
                "event=dataset_loaded category=\"{}\" records={} path={}",
                source.category,
                df.height(),
                path.display()
            );
            frames.push(df.lazy());
        }

        let frame = concat(frames, UnionArgs::default())?.collect()?;
        let points = Self::materialize_points(&frame)?;
        debug!("event=records_combined records={}", points.len());

        Ok(Self {
            order,
            frame,
            points,
        })
    }

    /// Load a single CSV, keep the known columns, parse the numeric ones and
    /// tag every row with `category`.
    fn load_source(path: &Path, category: &str) -> Result<DataFrame, BiomassError> {
        let raw = Self::read_csv_as_strings(path)?;
        Self::require_columns(&raw, &point::REQUIRED)?;

        let numeric: Vec<Expr> = point::NUMERIC
            .iter()
            .map(|c| {
                col(*c)
                    .str()
                    .strip_chars(lit(" \t\r\n"))
                    .cast(DataType::Float64)
            })
            .collect();

        let df = raw
            .clone()
            .lazy()
            .select(point::REQUIRED.iter().map(|c| col(*c)).collect::<Vec<_>>())
            .with_columns(numeric)
            .with_column(lit(category).alias(point::RESOURCE_CATEGORY))
            .collect()?;

        Self::validate_numeric(&raw, &df)?;
        Ok(df)
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn order(&self) -> &CategoryOrder {
        &self.order
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn points(&self) -> &[ResourcePoint] {
        &self.points
    }

    pub fn record_count(&self) -> usize {
        self.points.len()
    }

    /// Sum / mean / count per category, in load order.
    pub fn category_totals(&self) -> Result<Vec<CategoryTotal>, BiomassError> {
        aggregation::category_totals(&self.frame, &self.order)
    }

    /// Mean latitude and longitude over every loaded point.
    pub fn center(&self) -> Result<[f64; 2], BiomassError> {
        if self.points.is_empty() {
            return Err(BiomassError::NoPoints);
        }
        let n = self.points.len() as f64;
        let (lat, lon) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(lat, lon), p| (lat + p.latitude, lon + p.longitude));
        Ok([lat / n, lon / n])
    }
}

// ── Private helpers ─────────────────────────────────────────────────────────

impl ResourceModel {
    /// Read a CSV file with all columns as String dtype.
    /// Trims whitespace from column names.
    fn read_csv_as_strings(path: &Path) -> Result<DataFrame, BiomassError> {
        if !path.is_file() {
            return Err(BiomassError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "file not found",
            )));
        }

        let mut df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0)) // all columns as String
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;

        let trimmed: Vec<String> = df
            .get_column_names_str()
            .iter()
            .map(|c| c.trim().to_string())
            .collect();
        df.set_column_names(trimmed.as_slice())?;

        Ok(df)
    }

    fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), BiomassError> {
        for &col_name in required {
            if df.column(col_name).is_err() {
                return Err(BiomassError::MissingColumn(col_name.to_string()));
            }
        }
        Ok(())
    }

    /// Coordinates and amount must parse on every row; price may be blank but
    /// not garbage. Every parsed value must be finite and amounts
    /// non-negative.
    fn validate_numeric(raw: &DataFrame, parsed: &DataFrame) -> Result<(), BiomassError> {
        for &name in &point::NUMERIC {
            let blank = raw
                .column(name)?
                .str()?
                .into_iter()
                .filter(|cell| cell.is_none_or(|c| c.trim().is_empty()))
                .count();
            let values = parsed.column(name)?.f64()?;
            let missing = values.null_count();
            if point::NON_NULL.contains(&name) && missing > 0 {
                return Err(BiomassError::InvalidData(format!(
                    "column '{name}' has {missing} missing or non-numeric values"
                )));
            }
            if missing > blank {
                return Err(BiomassError::InvalidData(format!(
                    "column '{name}' has {} non-numeric values",
                    missing - blank
                )));
            }

            let non_finite = values.into_iter().flatten().filter(|v| !v.is_finite()).count();
            if non_finite > 0 {
                return Err(BiomassError::InvalidData(format!(
                    "column '{name}' has {non_finite} non-finite values"
                )));
            }
        }

        let negative = parsed
            .column(point::RESOURCE_AMOUNT)?
            .f64()?
            .into_iter()
            .flatten()
            .filter(|v| *v < 0.0)
            .count();
        if negative > 0 {
            return Err(BiomassError::InvalidData(format!(
                "column '{}' has {negative} negative values",
                point::RESOURCE_AMOUNT
            )));
        }
        Ok(())
    }

    fn materialize_points(df: &DataFrame) -> Result<Vec<ResourcePoint>, BiomassError> {
        let categories = df.column(point::RESOURCE_CATEGORY)?.str()?;
        let lats = df.column(point::LATITUDE)?.f64()?;
        let lons = df.column(point::LONGITUDE)?.f64()?;
        let amounts = df.column(point::RESOURCE_AMOUNT)?.f64()?;
        let resources = df.column(point::RESOURCE)?.str()?;
        let counties = df.column(point::COUNTY_NAME)?.str()?;
        let scenarios = df.column(point::SCENARIO)?.str()?;
        let prices = df.column(point::RESOURCE_PRICE)?.f64()?;

        let mut points = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            points.push(ResourcePoint {
                category: categories.get(i).unwrap_or("").to_string(),
                latitude: lats.get(i).unwrap_or(0.0),
                longitude: lons.get(i).unwrap_or(0.0),
                amount: amounts.get(i).unwrap_or(0.0),
                resource: resources.get(i).unwrap_or("").to_string(),
                county: counties.get(i).unwrap_or("").to_string(),
                scenario: scenarios.get(i).unwrap_or("").to_string(),
                price: prices.get(i),
            });
        }
        Ok(points)
    }
}
