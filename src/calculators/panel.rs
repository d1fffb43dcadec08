//! 牆板數量：總面積 ÷ 單片面積，無條件進位

use super::round_up_count;
use crate::core::Calculator;
use crate::domain::model::CalculatorKind;
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{FormValidator, ValidationErrors};
use serde::{Deserialize, Serialize};
use std::fmt;

const SQ_INCHES_PER_SQ_FOOT: f64 = 144.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum PanelUnit {
    #[default]
    #[serde(rename = "ft")]
    #[cfg_attr(feature = "cli", value(name = "ft"))]
    Feet,
    #[serde(rename = "in")]
    #[cfg_attr(feature = "cli", value(name = "in"))]
    Inches,
}

impl PanelUnit {
    /// Converts an area in this unit squared into square feet.
    pub fn to_square_feet(self, area: f64) -> f64 {
        match self {
            PanelUnit::Feet => area,
            PanelUnit::Inches => area / SQ_INCHES_PER_SQ_FOOT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PanelUnit::Feet => "ft",
            PanelUnit::Inches => "in",
        }
    }
}

impl fmt::Display for PanelUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelForm {
    pub total_area: Option<f64>,
    pub panel_width: Option<f64>,
    pub panel_height: Option<f64>,
    pub unit: Option<PanelUnit>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelInput {
    /// Square feet
    pub total_area: f64,
    pub panel_width: f64,
    pub panel_height: f64,
    pub unit: PanelUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelEstimate {
    pub num_panels: u64,
}

impl PanelForm {
    pub fn validate(&self) -> std::result::Result<PanelInput, ValidationErrors> {
        let mut v = FormValidator::new();
        let total_area = v.at_least(
            "total_area",
            self.total_area,
            None,
            1.0,
            "Total area must be at least 1",
        );
        let panel_width = v.positive("panel_width", self.panel_width, "Panel width must be positive");
        let panel_height = v.positive(
            "panel_height",
            self.panel_height,
            "Panel height must be positive",
        );
        v.finish(PanelInput {
            total_area,
            panel_width,
            panel_height,
            unit: self.unit.unwrap_or_default(),
        })
    }
}

/// Fails when the panel area is zero after unit conversion instead of
/// dividing by zero.
pub fn compute(input: &PanelInput) -> Result<PanelEstimate> {
    let panel_area = input
        .unit
        .to_square_feet(input.panel_width * input.panel_height);
    if panel_area == 0.0 {
        return Err(EstimatorError::degenerate(
            "panel_width",
            "Panel area cannot be zero",
        ));
    }

    Ok(PanelEstimate {
        num_panels: round_up_count("panel_width", input.total_area / panel_area)?,
    })
}

pub struct PanelCalculator;

impl Calculator for PanelCalculator {
    const KIND: CalculatorKind = CalculatorKind::Panel;
    type Form = PanelForm;
    type Input = PanelInput;
    type Output = PanelEstimate;

    fn validate(form: &PanelForm) -> std::result::Result<PanelInput, ValidationErrors> {
        form.validate()
    }

    fn compute(input: &PanelInput) -> Result<PanelEstimate> {
        compute(input)
    }
}
