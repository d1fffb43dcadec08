//! 窗簾尺寸 (單位：英吋)

use crate::core::Calculator;
use crate::domain::model::CalculatorKind;
use crate::utils::error::Result;
use crate::utils::validation::{FormValidator, ValidationErrors};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_STACKBACK: f64 = 6.0;
pub const DEFAULT_OVERLAP: f64 = 3.0;
pub const DEFAULT_ABOVE_OFFSET: f64 = 6.0;
pub const DEFAULT_BELOW_OFFSET: f64 = 4.0;

/// Curtain-width-to-rod-width ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Fullness {
    #[serde(rename = "1.5")]
    #[cfg_attr(feature = "cli", value(name = "1.5"))]
    Standard,
    #[default]
    #[serde(rename = "2.0")]
    #[cfg_attr(feature = "cli", value(name = "2.0"))]
    Full,
    #[serde(rename = "2.5")]
    #[cfg_attr(feature = "cli", value(name = "2.5"))]
    ExtraFull,
}

const FULLNESS_TABLE: [(Fullness, &str, f64); 3] = [
    (Fullness::Standard, "1.5", 1.5),
    (Fullness::Full, "2.0", 2.0),
    (Fullness::ExtraFull, "2.5", 2.5),
];

impl Fullness {
    // table rows follow declaration order
    fn entry(self) -> (&'static str, f64) {
        let (_, label, multiplier) = FULLNESS_TABLE[self as usize];
        (label, multiplier)
    }

    pub fn multiplier(self) -> f64 {
        self.entry().1
    }

    pub fn as_str(self) -> &'static str {
        self.entry().0
    }
}

impl fmt::Display for Fullness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Fullness {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FULLNESS_TABLE
            .iter()
            .find(|(_, label, _)| *label == s.trim())
            .map(|(f, _, _)| *f)
            .ok_or_else(|| format!("Unknown fullness '{}'. Valid values: 1.5, 2.0, 2.5", s))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CurtainForm {
    pub window_width: Option<f64>,
    pub window_height: Option<f64>,
    pub fullness: Option<Fullness>,
    pub stackback: Option<f64>,
    pub overlap: Option<f64>,
    pub above_offset: Option<f64>,
    pub below_offset: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurtainInput {
    pub window_width: f64,
    pub window_height: f64,
    pub fullness: Fullness,
    pub stackback: f64,
    pub overlap: f64,
    pub above_offset: f64,
    pub below_offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurtainEstimate {
    pub rod_width: f64,
    pub curtain_width: f64,
    pub curtain_height: f64,
}

impl CurtainForm {
    pub fn validate(&self) -> std::result::Result<CurtainInput, ValidationErrors> {
        let mut v = FormValidator::new();
        let window_width = v.at_least(
            "window_width",
            self.window_width,
            None,
            1.0,
            "Window width must be at least 1",
        );
        let window_height = v.at_least(
            "window_height",
            self.window_height,
            None,
            1.0,
            "Window height must be at least 1",
        );
        let mut non_negative = |field: &str, value: Option<f64>, default: f64| {
            v.at_least(field, value, Some(default), 0.0, "Value must be non-negative")
        };
        let stackback = non_negative("stackback", self.stackback, DEFAULT_STACKBACK);
        let overlap = non_negative("overlap", self.overlap, DEFAULT_OVERLAP);
        let above_offset = non_negative("above_offset", self.above_offset, DEFAULT_ABOVE_OFFSET);
        let below_offset = non_negative("below_offset", self.below_offset, DEFAULT_BELOW_OFFSET);

        v.finish(CurtainInput {
            window_width,
            window_height,
            fullness: self.fullness.unwrap_or_default(),
            stackback,
            overlap,
            above_offset,
            below_offset,
        })
    }
}

pub fn compute(input: &CurtainInput) -> CurtainEstimate {
    // stackback applies on both sides of the window
    let rod_width = input.window_width + input.stackback * 2.0;
    CurtainEstimate {
        rod_width,
        curtain_width: (rod_width + input.overlap) * input.fullness.multiplier(),
        curtain_height: input.window_height + input.above_offset + input.below_offset,
    }
}

pub struct CurtainCalculator;

impl Calculator for CurtainCalculator {
    const KIND: CalculatorKind = CalculatorKind::Curtain;
    type Form = CurtainForm;
    type Input = CurtainInput;
    type Output = CurtainEstimate;

    fn validate(form: &CurtainForm) -> std::result::Result<CurtainInput, ValidationErrors> {
        form.validate()
    }

    fn compute(input: &CurtainInput) -> Result<CurtainEstimate> {
        Ok(compute(input))
    }
}
