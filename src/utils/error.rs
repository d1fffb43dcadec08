use crate::utils::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("Validation failed for {calculator}: {errors}")]
    ValidationError {
        calculator: String,
        errors: ValidationErrors,
    },

    #[error("{field}: {message}")]
    DegenerateInputError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Batch job '{job}' failed: {source}")]
    JobError {
        job: String,
        #[source]
        source: Box<EstimatorError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EstimatorError {
    pub fn validation(calculator: impl Into<String>, errors: ValidationErrors) -> Self {
        Self::ValidationError {
            calculator: calculator.into(),
            errors,
        }
    }

    pub fn degenerate(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DegenerateInputError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } | Self::DegenerateInputError { .. } => ErrorCategory::Input,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) | Self::CsvError(_) => {
                ErrorCategory::Output
            }
            Self::JobError { source, .. } => source.category(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 使用者輸入錯誤：修正後重新計算即可
            Self::ValidationError { .. } | Self::DegenerateInputError { .. } => {
                ErrorSeverity::Medium
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) | Self::CsvError(_) => {
                ErrorSeverity::Critical
            }
            Self::JobError { source, .. } => source.severity(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ValidationError { errors, .. } => match errors.first() {
                Some(first) => format!("Check the value of '{}' and try again", first.field),
                None => "Check the entered measurements and try again".to_string(),
            },
            Self::DegenerateInputError { field, .. } => {
                format!("Use a larger value for '{}'", field)
            }
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Make sure the batch file exists and is valid TOML".to_string()
            }
            Self::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' entry in the batch file", field)
            }
            Self::MissingConfigError { field } => {
                format!("Add '{}' to the batch file", field)
            }
            Self::IoError(_) => "Check that the output directory is writable".to_string(),
            Self::SerializationError(_) | Self::CsvError(_) => {
                "Try a different output format".to_string()
            }
            Self::JobError { source, .. } => source.recovery_suggestion(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { calculator, errors } => {
                let mut message = format!("Some {} measurements are invalid:", calculator);
                for error in errors.iter() {
                    message.push_str(&format!("\n  - {}", error));
                }
                message
            }
            Self::DegenerateInputError { field, message } => format!("{} ({})", message, field),
            Self::JobError { job, source } => {
                format!("Job '{}': {}", job, source.user_friendly_message())
            }
            other => other.to_string(),
        }
    }

    /// 依嚴重程度決定 CLI 結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl From<toml::de::Error> for EstimatorError {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, EstimatorError>;
