pub mod storage;

use crate::domain::model::SortPolicy;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

fn default_workers() -> usize {
    num_cpus::get().max(1)
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "customer-importer")]
#[command(about = "Tally customers per email domain from a delimited customer export")]
pub struct CliConfig {
    #[arg(help = "Path to the customers CSV file")]
    pub input_path: String,

    #[arg(long, help = "Write the report as domain,count lines to this path")]
    pub output_path: Option<String>,

    #[arg(long, default_value_t = default_workers(), help = "Number of parse/aggregate workers")]
    pub workers: usize,

    #[arg(
        long,
        default_value_t = SortPolicy::DomainAscending,
        help = "Report order: domain-ascending or count-descending"
    )]
    pub sort_by: SortPolicy,

    #[arg(long, help = "Print the report as JSON instead of domain,count lines")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    fn workers(&self) -> usize {
        self.workers
    }

    fn sort_policy(&self) -> SortPolicy {
        self.sort_by
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input_path", &self.input_path)?;
        if let Some(output_path) = &self.output_path {
            validation::validate_path("output_path", output_path)?;
        }
        validation::validate_positive_number("workers", self.workers, 1)?;
        Ok(())
    }
}

/// Plain configuration for embedding the importer as a library, without the
/// CLI surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    pub input_path: String,
    pub output_path: Option<String>,
    pub workers: usize,
    pub sort_by: SortPolicy,
}

impl ImportConfig {
    pub fn new(input_path: impl Into<String>, output_path: Option<&str>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.map(str::to_owned),
            workers: default_workers(),
            sort_by: SortPolicy::default(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_sort_policy(mut self, sort_by: SortPolicy) -> Self {
        self.sort_by = sort_by;
        self
    }
}

impl ConfigProvider for ImportConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    fn workers(&self) -> usize {
        self.workers
    }

    fn sort_policy(&self) -> SortPolicy {
        self.sort_by
    }
}

impl Validate for ImportConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input_path", &self.input_path)?;
        if let Some(output_path) = &self.output_path {
            validation::validate_path("output_path", output_path)?;
        }
        validation::validate_positive_number("workers", self.workers, 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_config_defaults() {
        let config = ImportConfig::new("customers.csv", None);
        assert!(config.workers >= 1);
        assert_eq!(config.sort_by, SortPolicy::DomainAscending);
        assert!(config.output_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_import_config_rejects_zero_workers() {
        let config = ImportConfig::new("customers.csv", None).with_workers(0);
        assert!(config.validate().is_err());
    }
}
