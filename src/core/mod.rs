pub mod aggregate;
pub mod etl;
pub mod parse;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{DomainCount, DomainTable, Record, Report, SortPolicy};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
