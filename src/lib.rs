pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{storage::LocalStorage, ImportConfig};

pub use crate::core::{etl::ImportEngine, pipeline::CustomerPipeline};
pub use crate::domain::model::{DomainCount, DomainTable, Record, Report, SortPolicy};
pub use crate::utils::error::{ImportError, Result};

/// Reads the customer file at `input_path`, tallies customers per email
/// domain and returns the sorted report. When `output_path` is given the
/// report is also written there as `domain,count` lines.
pub async fn process_customers(input_path: &str, output_path: Option<&str>) -> Result<Report> {
    let config = ImportConfig::new(input_path, output_path);
    let storage = LocalStorage::new(String::new());
    let pipeline = CustomerPipeline::new(storage, config);
    ImportEngine::new(pipeline).run().await
}
