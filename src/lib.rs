pub mod aggregation;
pub mod allocation;
pub mod category;
pub mod config;
mod error;
pub mod flow_graph;
pub mod format;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod selection;
pub mod visualization;

pub use error::BiomassError;
