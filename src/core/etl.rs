use crate::core::{Pipeline, Report};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct ImportEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ImportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Runs extract -> transform -> load and returns the sorted report.
    /// Any stage failure short-circuits, wrapped with the stage name.
    pub async fn run(&self) -> Result<Report> {
        tracing::info!("Starting customer import");

        let records = self
            .pipeline
            .extract()
            .await
            .map_err(|e| e.in_stage("extract"))?;
        tracing::info!("Read {} records", records.len());
        self.monitor.log_stats("extract");

        let report = self
            .pipeline
            .transform(records)
            .await
            .map_err(|e| e.in_stage("transform"))?;
        tracing::info!("Aggregated {} distinct domains", report.len());
        self.monitor.log_stats("transform");

        let written = self
            .pipeline
            .load(&report)
            .await
            .map_err(|e| e.in_stage("load"))?;
        if let Some(path) = &written {
            tracing::info!("Report saved to: {}", path);
        }
        self.monitor.log_final_stats();

        Ok(report)
    }
}
