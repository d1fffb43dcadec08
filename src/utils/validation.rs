use crate::utils::error::{EstimatorError, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 單一欄位的驗證錯誤
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// 表單驗證失敗時回傳的所有欄位錯誤，依欄位宣告順序排列
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.get(field).is_some()
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Upper bound for every numeric form field. Keeps each formula's result finite.
pub const MAX_FIELD_VALUE: f64 = 1_000_000.0;

/// Collects field errors while a form is turned into a validated input.
///
/// Every check returns a usable value even on failure so that all fields get
/// checked in one pass; `finish` discards the value if anything failed.
#[derive(Debug, Default)]
pub struct FormValidator {
    errors: Vec<FieldError>,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// 取得必填數值，缺少或非有限數時記錄錯誤
    pub fn required(&mut self, field: &str, value: Option<f64>) -> Option<f64> {
        match value {
            None => {
                self.push(field, "Value is required");
                None
            }
            Some(v) if !v.is_finite() => {
                self.push(field, "Value must be a finite number");
                None
            }
            Some(v) if v > MAX_FIELD_VALUE => {
                self.push(field, "Value must be at most 1000000");
                None
            }
            Some(v) => Some(v),
        }
    }

    fn with_default(&mut self, field: &str, value: Option<f64>, default: Option<f64>) -> Option<f64> {
        match (value, default) {
            (None, Some(d)) => Some(d),
            _ => self.required(field, value),
        }
    }

    /// value > 0
    pub fn positive(&mut self, field: &str, value: Option<f64>, message: &str) -> f64 {
        match self.required(field, value) {
            Some(v) if v > 0.0 => v,
            Some(_) => {
                self.push(field, message);
                0.0
            }
            None => 0.0,
        }
    }

    /// value >= min, falling back to `default` when the field was left empty
    pub fn at_least(
        &mut self,
        field: &str,
        value: Option<f64>,
        default: Option<f64>,
        min: f64,
        message: &str,
    ) -> f64 {
        match self.with_default(field, value, default) {
            Some(v) if v >= min => v,
            Some(_) => {
                self.push(field, message);
                min
            }
            None => min,
        }
    }

    /// value > 0, falling back to `default` when the field was left empty
    pub fn positive_or(&mut self, field: &str, value: Option<f64>, default: f64, message: &str) -> f64 {
        self.positive(field, value.or(Some(default)), message)
    }

    pub fn between(
        &mut self,
        field: &str,
        value: Option<f64>,
        default: Option<f64>,
        min: f64,
        max: f64,
        message: &str,
    ) -> f64 {
        match self.with_default(field, value, default) {
            Some(v) if v >= min && v <= max => v,
            Some(_) => {
                self.push(field, message);
                min
            }
            None => min,
        }
    }

    /// 整數欄位 (數量、塗層數)，必須為不小於 `min` 的整數
    pub fn whole_at_least(
        &mut self,
        field: &str,
        value: Option<f64>,
        default: Option<u32>,
        min: u32,
        message: &str,
    ) -> u32 {
        let value = self.with_default(field, value, default.map(f64::from));
        match value {
            Some(v) if v.fract() != 0.0 => {
                self.push(field, "Value must be a whole number");
                min
            }
            Some(v) if v < f64::from(min) || v > f64::from(u32::MAX) => {
                self.push(field, message);
                min
            }
            Some(v) => v as u32,
            None => min,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn finish<T>(self, value: T) -> std::result::Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique_names<'a>(
    field_name: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(EstimatorError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.to_string(),
                reason: "Duplicate name".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(EstimatorError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}
