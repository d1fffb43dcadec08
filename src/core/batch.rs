use crate::config::toml_config::{BatchConfig, JobErrorPolicy};
use crate::core::engine::EstimateEngine;
use crate::core::report::{render_batch, BatchReport, JobOutcome};
use crate::core::Storage;
use crate::utils::error::{EstimatorError, Result};

#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub report: BatchReport,
    pub written_files: Vec<String>,
}

/// Runs every job of a batch file and writes the configured report formats.
pub struct BatchRunner<S: Storage> {
    storage: S,
    config: BatchConfig,
    engine: EstimateEngine,
}

impl<S: Storage> BatchRunner<S> {
    pub fn new(storage: S, config: BatchConfig) -> Self {
        Self {
            storage,
            config,
            engine: EstimateEngine::new(),
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn estimate_all(&self) -> Result<BatchReport> {
        let policy = self.config.job_error_policy();
        let mut outcomes = Vec::with_capacity(self.config.jobs.len());

        for job in &self.config.jobs {
            tracing::info!("🧮 Running job '{}' ({})", job.name, job.request.kind());
            match self.engine.run(&job.request) {
                Ok(estimate) => outcomes.push(JobOutcome::completed(&job.name, estimate)),
                Err(e) if policy == JobErrorPolicy::Abort => {
                    tracing::error!("❌ Job '{}' failed, aborting batch: {}", job.name, e);
                    return Err(EstimatorError::JobError {
                        job: job.name.clone(),
                        source: Box::new(e),
                    });
                }
                Err(e) => {
                    tracing::warn!("⚠️ Job '{}' failed, skipping: {}", job.name, e);
                    outcomes.push(JobOutcome::failed(&job.name, job.request.kind(), &e));
                }
            }
        }

        Ok(BatchReport::new(self.config.project.name.clone(), outcomes))
    }

    pub fn write_outputs(&self, report: &BatchReport) -> Result<Vec<String>> {
        let mut written = Vec::new();
        for format in self.config.output_formats()? {
            let filename = format!("{}.{}", self.config.file_stem(), format.extension());
            let content = render_batch(report, format)?;
            let path = self.storage.write_file(&filename, content.as_bytes())?;
            tracing::debug!("💾 Wrote {} report to {}", format, path);
            written.push(path);
        }
        Ok(written)
    }

    pub fn run(&self) -> Result<BatchSummary> {
        tracing::info!(
            "🚀 Starting batch '{}' with {} job(s)",
            self.config.project.name,
            self.config.jobs.len()
        );

        let report = self.estimate_all()?;
        tracing::info!(
            "📊 {} job(s) completed, {} failed",
            report.completed_count(),
            report.failed_count()
        );

        let written_files = self.write_outputs(&report)?;
        Ok(BatchSummary {
            report,
            written_files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl Storage for MemoryStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                EstimatorError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, path.to_string()))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            self.files.borrow_mut().insert(path.to_string(), data.to_vec());
            Ok(path.to_string())
        }
    }

    fn config(extra: &str) -> BatchConfig {
        let content = format!(
            r#"
[project]
name = "unit"

[output]
path = "./unused"
formats = ["csv", "txt"]
filename = "unit-report"
{extra}

[[jobs]]
name = "paint"
calculator = "paint"
total_area = 450.0

[[jobs]]
name = "bad-floor"
calculator = "floor"
length = 0.0
width = 10.0

[[jobs]]
name = "ceiling"
calculator = "ceiling"
length = 12.0
width = 10.0
"#
        );
        BatchConfig::from_toml_str(&content).unwrap()
    }

    #[test]
    fn test_skip_policy_records_failures_and_continues() {
        let storage = MemoryStorage::default();
        let runner = BatchRunner::new(&storage, config(""));

        let summary = runner.run().unwrap();
        assert_eq!(summary.report.completed_count(), 2);
        assert_eq!(summary.report.failed_count(), 1);

        let bad = summary.report.outcome("bad-floor").unwrap();
        assert_eq!(bad.errors[0].field, "length");

        assert_eq!(summary.written_files, vec!["unit-report.csv", "unit-report.txt"]);
        let csv = String::from_utf8(storage.read_file("unit-report.csv").unwrap()).unwrap();
        assert!(csv.contains("ceiling,ceiling,totalArea,120,sq ft,"));
    }

    #[test]
    fn test_abort_policy_stops_at_first_failure() {
        let storage = MemoryStorage::default();
        let runner = BatchRunner::new(
            &storage,
            config("\n[error_handling]\non_job_error = \"abort\""),
        );

        let err = runner.run().unwrap_err();
        match err {
            EstimatorError::JobError { job, .. } => assert_eq!(job, "bad-floor"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(storage.files.borrow().is_empty());
    }
}
