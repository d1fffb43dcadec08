//! 地板面積：長 × 寬，再加上裁切損耗百分比

use crate::core::Calculator;
use crate::domain::model::CalculatorKind;
use crate::utils::error::Result;
use crate::utils::validation::{FormValidator, ValidationErrors};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WASTAGE_PERCENT: f64 = 10.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloorForm {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub wastage: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorInput {
    pub length: f64,
    pub width: f64,
    /// Percentage, 0..=100
    pub wastage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorEstimate {
    pub total_area: f64,
}

impl FloorForm {
    pub fn validate(&self) -> std::result::Result<FloorInput, ValidationErrors> {
        let mut v = FormValidator::new();
        let length = v.positive("length", self.length, "Length must be positive");
        let width = v.positive("width", self.width, "Width must be positive");
        let wastage = v.between(
            "wastage",
            self.wastage,
            Some(DEFAULT_WASTAGE_PERCENT),
            0.0,
            100.0,
            "Wastage must be between 0 and 100",
        );
        v.finish(FloorInput {
            length,
            width,
            wastage,
        })
    }
}

pub fn compute(input: &FloorInput) -> FloorEstimate {
    let base_area = input.length * input.width;
    FloorEstimate {
        total_area: base_area * (1.0 + input.wastage / 100.0),
    }
}

pub struct FloorCalculator;

impl Calculator for FloorCalculator {
    const KIND: CalculatorKind = CalculatorKind::Floor;
    type Form = FloorForm;
    type Input = FloorInput;
    type Output = FloorEstimate;

    fn validate(form: &FloorForm) -> std::result::Result<FloorInput, ValidationErrors> {
        form.validate()
    }

    fn compute(input: &FloorInput) -> Result<FloorEstimate> {
        Ok(compute(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_area_with_default_wastage() {
        let form = FloorForm {
            length: Some(12.0),
            width: Some(10.0),
            wastage: None,
        };
        let input = form.validate().unwrap();
        assert_eq!(input.wastage, 10.0);

        let estimate = compute(&input);
        assert!((estimate.total_area - 132.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_wastage_is_plain_area() {
        let input = FloorInput {
            length: 5.5,
            width: 4.0,
            wastage: 0.0,
        };
        assert_eq!(compute(&input).total_area, 22.0);
    }

    #[test]
    fn test_rejects_wastage_out_of_range() {
        let form = FloorForm {
            length: Some(12.0),
            width: Some(10.0),
            wastage: Some(101.0),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_field("wastage"));
    }

    #[test]
    fn test_rejects_missing_dimensions() {
        let errors = FloorForm::default().validate().unwrap_err();
        assert!(errors.contains_field("length"));
        assert!(errors.contains_field("width"));
        assert!(!errors.contains_field("wastage"));
    }
}
