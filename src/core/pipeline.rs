use crate::core::aggregate::count_domains;
use crate::core::parse::{find_email_column, parse_line};
use crate::core::report::{sort_domains, write_report_csv};
use crate::core::{ConfigProvider, Pipeline, Record, Report, Storage};
use crate::utils::error::{ImportError, Result};
use tokio::task::JoinSet;

pub struct CustomerPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CustomerPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

/// Parses one worker's chunk of raw lines. Lines that fail delimited parsing
/// are skipped and logged; a single bad line never aborts the read.
fn parse_chunk(lines: Vec<String>, base_line: usize) -> Vec<Record> {
    let mut records = Vec::with_capacity(lines.len());
    for (offset, line) in lines.iter().enumerate() {
        match parse_line(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("skipping input line {}: {}", base_line + offset + 1, e);
            }
        }
    }
    records
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CustomerPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        tracing::debug!("Reading input file: {}", self.config.input_path());
        let raw = self.storage.read_file(self.config.input_path()).await?;
        let text = String::from_utf8(raw)?;
        let lines: Vec<String> = text.lines().map(str::to_owned).collect();
        if lines.is_empty() {
            return Ok(Vec::new());
        }

        // 分塊並行解析，單一讀取者、多個解析工作者
        let chunk_size = lines.len().div_ceil(self.config.workers().max(1)).max(1);
        let mut join_set = JoinSet::new();
        for (chunk_index, chunk) in lines.chunks(chunk_size).enumerate() {
            let chunk: Vec<String> = chunk.to_vec();
            let base_line = chunk_index * chunk_size;
            join_set.spawn_blocking(move || (chunk_index, parse_chunk(chunk, base_line)));
        }

        let mut parts: Vec<(usize, Vec<Record>)> = Vec::with_capacity(join_set.len());
        while let Some(joined) = join_set.join_next().await {
            let part = joined.map_err(|e| ImportError::ProcessingError {
                message: format!("parse worker failed: {}", e),
            })?;
            parts.push(part);
        }

        // Chunks come back in completion order; reassembling by index keeps
        // the header as the first record.
        parts.sort_by_key(|(chunk_index, _)| *chunk_index);
        let records: Vec<Record> = parts
            .into_iter()
            .flat_map(|(_, records)| records)
            .collect();

        tracing::debug!("Parsed {} records", records.len());
        Ok(records)
    }

    async fn transform(&self, records: Vec<Record>) -> Result<Report> {
        if records.is_empty() {
            return Err(ImportError::EmptyInput);
        }

        let email_column =
            find_email_column(&records[0]).ok_or(ImportError::ColumnNotFound)?;
        tracing::debug!("Resolved email column index: {}", email_column);

        let table = count_domains(records, email_column, self.config.workers()).await?;
        Ok(sort_domains(table, self.config.sort_policy()))
    }

    async fn load(&self, report: &Report) -> Result<Option<String>> {
        let Some(output_path) = self.config.output_path() else {
            tracing::debug!("No output path configured, keeping report in memory only");
            return Ok(None);
        };

        let data = write_report_csv(report)?;
        tracing::debug!("Writing report ({} bytes) to {}", data.len(), output_path);
        self.storage.write_file(output_path, &data).await?;
        Ok(Some(output_path.to_string()))
    }
}
