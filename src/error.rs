use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BiomassError {
    #[error("Failed to load '{category}' from {}: {source}", path.display())]
    Load {
        category: String,
        path: PathBuf,
        #[source]
        source: Box<BiomassError>,
    },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("InvalidData: {0}")]
    InvalidData(String),

    #[error("Category '{0}' has no row in the allocation matrix")]
    UnallocatedCategory(String),

    #[error("Invalid allocation matrix: {0}")]
    InvalidAllocation(String),

    #[error("No resource points loaded")]
    NoPoints,

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Logger error: {0}")]
    Logger(String),
}

impl From<flexi_logger::FlexiLoggerError> for BiomassError {
    fn from(err: flexi_logger::FlexiLoggerError) -> Self {
        BiomassError::Logger(err.to_string())
    }
}

impl BiomassError {
    /// Wrap a failure with the dataset it came from.
    pub fn for_dataset(self, category: &str, path: impl Into<PathBuf>) -> Self {
        BiomassError::Load {
            category: category.to_string(),
            path: path.into(),
            source: Box::new(self),
        }
    }
}
