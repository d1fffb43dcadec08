//! POP (plaster of Paris) ceiling estimate.
//!
//! Material is sized on the design-adjusted area, while labor and margin are
//! charged on the flat ceiling area. Bags always round up.

use super::round_up_count;
use crate::core::Calculator;
use crate::domain::model::CalculatorKind;
use crate::utils::error::Result;
use crate::utils::validation::{FormValidator, ValidationErrors};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DESIGN_FACTOR: f64 = 1.0;
/// Square meters covered by one bag
pub const DEFAULT_BAG_COVERAGE: f64 = 1.5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PopCeilingForm {
    pub length: Option<f64>,
    pub width: Option<f64>,
    pub design_factor: Option<f64>,
    pub labor_cost_per_sqm: Option<f64>,
    pub margin_per_sqm: Option<f64>,
    pub pop_bag_cost: Option<f64>,
    pub pop_bag_coverage: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopCeilingInput {
    pub length: f64,
    pub width: f64,
    pub design_factor: f64,
    pub labor_cost_per_sqm: f64,
    pub margin_per_sqm: f64,
    pub pop_bag_cost: f64,
    pub pop_bag_coverage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopCeilingEstimate {
    pub ceiling_area: f64,
    pub pop_bags_needed: u64,
    pub total_material_cost: f64,
    pub total_labor_cost: f64,
    pub total_margin: f64,
    pub final_price_estimate: f64,
}

impl PopCeilingForm {
    pub fn validate(&self) -> std::result::Result<PopCeilingInput, ValidationErrors> {
        let mut v = FormValidator::new();
        let length = v.positive("length", self.length, "Length must be positive");
        let width = v.positive("width", self.width, "Width must be positive");
        let design_factor = v.at_least(
            "design_factor",
            self.design_factor,
            Some(DEFAULT_DESIGN_FACTOR),
            1.0,
            "Design factor must be at least 1",
        );
        let labor_cost_per_sqm = v.at_least(
            "labor_cost_per_sqm",
            self.labor_cost_per_sqm,
            None,
            0.0,
            "Labor cost must be non-negative",
        );
        let margin_per_sqm = v.at_least(
            "margin_per_sqm",
            self.margin_per_sqm,
            None,
            0.0,
            "Margin must be non-negative",
        );
        let pop_bag_cost = v.at_least(
            "pop_bag_cost",
            self.pop_bag_cost,
            None,
            0.0,
            "POP bag cost must be non-negative",
        );
        let pop_bag_coverage = v.positive_or(
            "pop_bag_coverage",
            self.pop_bag_coverage,
            DEFAULT_BAG_COVERAGE,
            "Coverage must be positive",
        );

        v.finish(PopCeilingInput {
            length,
            width,
            design_factor,
            labor_cost_per_sqm,
            margin_per_sqm,
            pop_bag_cost,
            pop_bag_coverage,
        })
    }
}

pub fn compute(input: &PopCeilingInput) -> Result<PopCeilingEstimate> {
    let ceiling_area = input.length * input.width;
    let design_area = ceiling_area * input.design_factor;
    let pop_bags_needed = round_up_count("pop_bag_coverage", design_area / input.pop_bag_coverage)?;

    let total_material_cost = pop_bags_needed as f64 * input.pop_bag_cost;
    // labor and margin use the flat area, not the design area
    let total_labor_cost = ceiling_area * input.labor_cost_per_sqm;
    let total_margin = ceiling_area * input.margin_per_sqm;

    Ok(PopCeilingEstimate {
        ceiling_area,
        pop_bags_needed,
        total_material_cost,
        total_labor_cost,
        total_margin,
        final_price_estimate: total_material_cost + total_labor_cost + total_margin,
    })
}

pub struct PopCeilingCalculator;

impl Calculator for PopCeilingCalculator {
    const KIND: CalculatorKind = CalculatorKind::PopCeiling;
    type Form = PopCeilingForm;
    type Input = PopCeilingInput;
    type Output = PopCeilingEstimate;

    fn validate(form: &PopCeilingForm) -> std::result::Result<PopCeilingInput, ValidationErrors> {
        form.validate()
    }

    fn compute(input: &PopCeilingInput) -> Result<PopCeilingEstimate> {
        compute(input)
    }
}
