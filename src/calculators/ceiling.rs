use crate::core::Calculator;
use crate::domain::model::CalculatorKind;
use crate::utils::error::Result;
use crate::utils::validation::{FormValidator, ValidationErrors};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CeilingForm {
    pub length: Option<f64>,
    pub width: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CeilingInput {
    pub length: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CeilingEstimate {
    pub total_area: f64,
}

impl CeilingForm {
    pub fn validate(&self) -> std::result::Result<CeilingInput, ValidationErrors> {
        let mut v = FormValidator::new();
        let length = v.positive("length", self.length, "Length must be positive");
        let width = v.positive("width", self.width, "Width must be positive");
        v.finish(CeilingInput { length, width })
    }
}

pub fn compute(input: &CeilingInput) -> CeilingEstimate {
    CeilingEstimate {
        total_area: input.length * input.width,
    }
}

pub struct CeilingCalculator;

impl Calculator for CeilingCalculator {
    const KIND: CalculatorKind = CalculatorKind::Ceiling;
    type Form = CeilingForm;
    type Input = CeilingInput;
    type Output = CeilingEstimate;

    fn validate(form: &CeilingForm) -> std::result::Result<CeilingInput, ValidationErrors> {
        form.validate()
    }

    fn compute(input: &CeilingInput) -> Result<CeilingEstimate> {
        Ok(compute(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_area() {
        let input = CeilingForm {
            length: Some(12.0),
            width: Some(10.0),
        }
        .validate()
        .unwrap();
        assert_eq!(compute(&input).total_area, 120.0);
    }

    #[test]
    fn test_rejects_negative_width() {
        let errors = CeilingForm {
            length: Some(12.0),
            width: Some(-1.0),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get("width").unwrap().message, "Width must be positive");
    }
}
