//! 油漆用量：面積 × 塗層數 ÷ 每桶覆蓋面積，無條件進位

use super::round_up_count;
use crate::core::Calculator;
use crate::domain::model::CalculatorKind;
use crate::utils::error::Result;
use crate::utils::validation::{FormValidator, ValidationErrors};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COATS: u32 = 2;
pub const DEFAULT_COVERAGE: f64 = 350.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaintForm {
    pub total_area: Option<f64>,
    pub coats: Option<f64>,
    pub coverage: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintInput {
    pub total_area: f64,
    pub coats: u32,
    /// Area covered by one container
    pub coverage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaintEstimate {
    pub gallons: u64,
}

impl PaintForm {
    pub fn validate(&self) -> std::result::Result<PaintInput, ValidationErrors> {
        let mut v = FormValidator::new();
        let total_area = v.at_least(
            "total_area",
            self.total_area,
            None,
            1.0,
            "Total area must be positive",
        );
        let coats = v.whole_at_least(
            "coats",
            self.coats,
            Some(DEFAULT_COATS),
            1,
            "At least one coat is required",
        );
        let coverage = v.at_least(
            "coverage",
            self.coverage,
            Some(DEFAULT_COVERAGE),
            1.0,
            "Coverage must be at least 1",
        );
        v.finish(PaintInput {
            total_area,
            coats,
            coverage,
        })
    }
}

pub fn compute(input: &PaintInput) -> Result<PaintEstimate> {
    let paint_area = input.total_area * f64::from(input.coats);
    Ok(PaintEstimate {
        gallons: round_up_count("coverage", paint_area / input.coverage)?,
    })
}

pub struct PaintCalculator;

impl Calculator for PaintCalculator {
    const KIND: CalculatorKind = CalculatorKind::Paint;
    type Form = PaintForm;
    type Input = PaintInput;
    type Output = PaintEstimate;

    fn validate(form: &PaintForm) -> std::result::Result<PaintInput, ValidationErrors> {
        form.validate()
    }

    fn compute(input: &PaintInput) -> Result<PaintEstimate> {
        compute(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_coats_round_up() {
        let input = PaintForm {
            total_area: Some(450.0),
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert_eq!(input.coats, 2);
        assert_eq!(input.coverage, 350.0);
        assert_eq!(compute(&input).unwrap().gallons, 3);
    }

    #[test]
    fn test_exact_multiple_does_not_round_up() {
        let input = PaintInput {
            total_area: 350.0,
            coats: 2,
            coverage: 350.0,
        };
        assert_eq!(compute(&input).unwrap().gallons, 2);
    }

    #[test]
    fn test_rejects_fractional_coats() {
        let errors = PaintForm {
            total_area: Some(100.0),
            coats: Some(1.5),
            coverage: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get("coats").unwrap().message, "Value must be a whole number");
    }

    #[test]
    fn test_rejects_zero_coats_and_area_below_one() {
        let errors = PaintForm {
            total_area: Some(0.5),
            coats: Some(0.0),
            coverage: Some(0.0),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
