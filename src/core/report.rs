use crate::config::toml_config::OutputFormat;
use crate::core::{CalculatorKind, Estimate};
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::FieldError;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct JobOutcome {
    pub job: String,
    pub calculator: CalculatorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<Estimate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl JobOutcome {
    pub fn completed(job: impl Into<String>, estimate: Estimate) -> Self {
        Self {
            job: job.into(),
            calculator: estimate.kind(),
            estimate: Some(estimate),
            errors: Vec::new(),
        }
    }

    /// 把計算錯誤轉成欄位錯誤清單，方便在報表中逐欄顯示
    pub fn failed(job: impl Into<String>, calculator: CalculatorKind, error: &EstimatorError) -> Self {
        let errors = match error {
            EstimatorError::ValidationError { errors, .. } => errors.iter().cloned().collect(),
            EstimatorError::DegenerateInputError { field, message } => {
                vec![FieldError::new(field.clone(), message.clone())]
            }
            other => vec![FieldError::new("job", other.to_string())],
        };
        Self {
            job: job.into(),
            calculator,
            estimate: None,
            errors,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.estimate.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub project: String,
    pub generated_at: DateTime<Utc>,
    pub outcomes: Vec<JobOutcome>,
}

impl BatchReport {
    pub fn new(project: impl Into<String>, outcomes: Vec<JobOutcome>) -> Self {
        Self {
            project: project.into(),
            generated_at: Utc::now(),
            outcomes,
        }
    }

    pub fn completed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.completed_count()
    }

    pub fn outcome(&self, job: &str) -> Option<&JobOutcome> {
        self.outcomes.iter().find(|o| o.job == job)
    }
}

pub fn render_estimate_text(estimate: &Estimate) -> String {
    let mut lines = vec![format!("{} Estimate", estimate.kind().title())];
    for metric in estimate.metrics() {
        lines.push(format!("  {}", metric));
    }
    lines.join("\n")
}

pub fn render_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn render_batch_text(report: &BatchReport) -> String {
    let mut out = format!(
        "Project: {}\nJobs: {} completed, {} failed\n",
        report.project,
        report.completed_count(),
        report.failed_count()
    );
    for outcome in &report.outcomes {
        out.push('\n');
        out.push_str(&format!("[{}]\n", outcome.job));
        match &outcome.estimate {
            Some(estimate) => {
                out.push_str(&render_estimate_text(estimate));
                out.push('\n');
            }
            None => {
                out.push_str(&format!("{} Estimate FAILED\n", outcome.calculator.title()));
                for error in &outcome.errors {
                    out.push_str(&format!("  {}\n", error));
                }
            }
        }
    }
    out
}

/// Long format: one row per metric, or one row per field error for failed jobs.
///
/// Values are written at full precision; only the text report rounds.
pub fn render_delimited(report: &BatchReport, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer.write_record(["job", "calculator", "metric", "value", "unit", "error"])?;

    for outcome in &report.outcomes {
        let calculator = outcome.calculator.as_str();
        match &outcome.estimate {
            Some(estimate) => {
                for metric in estimate.metrics() {
                    let value = metric.value.to_string();
                    writer.write_record([
                        outcome.job.as_str(),
                        calculator,
                        metric.key,
                        value.as_str(),
                        metric.unit,
                        "",
                    ])?;
                }
            }
            None => {
                for error in &outcome.errors {
                    writer.write_record([
                        outcome.job.as_str(),
                        calculator,
                        error.field.as_str(),
                        "",
                        "",
                        error.message.as_str(),
                    ])?;
                }
            }
        }
    }

    let bytes = writer.into_inner().map_err(|e| EstimatorError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| EstimatorError::ConfigError {
        message: format!("Report is not valid UTF-8: {}", e),
    })
}

pub fn render_batch(report: &BatchReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => render_json(report),
        OutputFormat::Csv => render_delimited(report, b','),
        OutputFormat::Tsv => render_delimited(report, b'\t'),
        OutputFormat::Txt => Ok(render_batch_text(report)),
    }
}
