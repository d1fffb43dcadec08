use crate::core::EstimateRequest;
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_path, validate_unique_names, Validate,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_FILE_STEM: &str = "estimates";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub project: ProjectConfig,
    pub output: OutputConfig,
    pub error_handling: Option<ErrorHandlingConfig>,
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    pub on_job_error: Option<JobErrorPolicy>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobErrorPolicy {
    /// 記錄錯誤並繼續下一個工作
    #[default]
    Skip,
    /// 第一個失敗的工作即中止整個批次
    Abort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub name: String,
    #[serde(flatten)]
    pub request: EstimateRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Csv,
    Tsv,
    Txt,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 4] = ["json", "csv", "tsv", "txt"];

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Txt => "txt",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = EstimatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "txt" => Ok(OutputFormat::Txt),
            other => Err(EstimatorError::InvalidConfigValueError {
                field: "output.formats".to_string(),
                value: other.to_string(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    OutputFormat::NAMES.join(", ")
                ),
            }),
        }
    }
}

impl BatchConfig {
    /// 從 TOML 檔案載入批次設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EstimatorError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析批次設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${ROOM_LENGTH})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EstimatorError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("project.name", &self.project.name)?;
        validate_path("output.path", &self.output.path)?;

        if self.output.formats.is_empty() {
            return Err(EstimatorError::MissingConfigError {
                field: "output.formats".to_string(),
            });
        }
        for format in &self.output.formats {
            validate_one_of("output.formats", format, &OutputFormat::NAMES)?;
        }

        if let Some(stem) = &self.output.filename {
            validate_non_empty_string("output.filename", stem)?;
        }

        if self.jobs.is_empty() {
            return Err(EstimatorError::MissingConfigError {
                field: "jobs".to_string(),
            });
        }
        for job in &self.jobs {
            validate_non_empty_string("jobs.name", &job.name)?;
        }
        validate_unique_names("jobs.name", self.jobs.iter().map(|j| j.name.as_str()))?;

        Ok(())
    }

    pub fn output_path(&self) -> &str {
        &self.output.path
    }

    pub fn file_stem(&self) -> &str {
        self.output.filename.as_deref().unwrap_or(DEFAULT_FILE_STEM)
    }

    pub fn output_formats(&self) -> Result<Vec<OutputFormat>> {
        let mut formats = Vec::new();
        for name in &self.output.formats {
            let format = name.parse::<OutputFormat>()?;
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        Ok(formats)
    }

    pub fn set_output_formats(&mut self, formats: &[OutputFormat]) {
        self.output.formats = formats.iter().map(|f| f.extension().to_string()).collect();
    }

    pub fn job_error_policy(&self) -> JobErrorPolicy {
        self.error_handling
            .as_ref()
            .and_then(|e| e.on_job_error)
            .unwrap_or_default()
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
