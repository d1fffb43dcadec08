//! 牆面面積：牆高 × 各面牆長總和，扣除門窗開口面積
//!
//! Openings are entered for the room as a whole rather than per wall, so their
//! combined area can exceed the wall area. The final area is clamped at zero.

use crate::core::Calculator;
use crate::domain::model::CalculatorKind;
use crate::utils::error::Result;
use crate::utils::validation::{FormValidator, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Standard door preset, width × height
pub const STANDARD_DOOR: (f64, f64) = (3.0, 6.8);
/// Standard window preset, width × height
pub const STANDARD_WINDOW: (f64, f64) = (4.0, 3.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningKind {
    Door,
    Window,
}

impl OpeningKind {
    fn field_prefix(self) -> &'static str {
        match self {
            OpeningKind::Door => "doors",
            OpeningKind::Window => "windows",
        }
    }

    pub fn preset(self) -> (f64, f64) {
        match self {
            OpeningKind::Door => STANDARD_DOOR,
            OpeningKind::Window => STANDARD_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WallSegmentForm {
    pub length: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpeningForm {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub quantity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WallForm {
    pub height: Option<f64>,
    #[serde(default)]
    pub walls: Vec<WallSegmentForm>,
    #[serde(default)]
    pub doors: Vec<OpeningForm>,
    #[serde(default)]
    pub windows: Vec<OpeningForm>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opening {
    pub width: f64,
    pub height: f64,
    pub quantity: u32,
}

impl Opening {
    pub fn area(&self) -> f64 {
        self.width * self.height * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WallInput {
    pub height: f64,
    pub wall_lengths: Vec<f64>,
    pub doors: Vec<Opening>,
    pub windows: Vec<Opening>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallEstimate {
    pub total_wall_area: f64,
    pub total_opening_area: f64,
    pub final_area: f64,
}

fn validate_openings(
    v: &mut FormValidator,
    kind: OpeningKind,
    openings: &[OpeningForm],
) -> Vec<Opening> {
    let (preset_width, preset_height) = kind.preset();
    openings
        .iter()
        .enumerate()
        .map(|(i, opening)| {
            let prefix = format!("{}[{}]", kind.field_prefix(), i);
            Opening {
                width: v.positive_or(
                    &format!("{}.width", prefix),
                    opening.width,
                    preset_width,
                    "Width must be positive",
                ),
                height: v.positive_or(
                    &format!("{}.height", prefix),
                    opening.height,
                    preset_height,
                    "Height must be positive",
                ),
                quantity: v.whole_at_least(
                    &format!("{}.quantity", prefix),
                    opening.quantity,
                    Some(1),
                    1,
                    "Quantity must be at least 1",
                ),
            }
        })
        .collect()
}

impl WallForm {
    pub fn validate(&self) -> std::result::Result<WallInput, ValidationErrors> {
        let mut v = FormValidator::new();
        let height = v.positive("height", self.height, "Height must be positive");

        if self.walls.is_empty() {
            v.push("walls", "Add at least one wall");
        }
        let wall_lengths: Vec<f64> = self
            .walls
            .iter()
            .enumerate()
            .map(|(i, wall)| {
                v.positive(
                    &format!("walls[{}].length", i),
                    wall.length,
                    "Length must be positive",
                )
            })
            .collect();

        let doors = validate_openings(&mut v, OpeningKind::Door, &self.doors);
        let windows = validate_openings(&mut v, OpeningKind::Window, &self.windows);

        v.finish(WallInput {
            height,
            wall_lengths,
            doors,
            windows,
        })
    }

    pub fn add_opening(&mut self, kind: OpeningKind, opening: OpeningForm) {
        match kind {
            OpeningKind::Door => self.doors.push(opening),
            OpeningKind::Window => self.windows.push(opening),
        }
    }
}

pub fn compute(input: &WallInput) -> WallEstimate {
    let total_wall_area = input.height * input.wall_lengths.iter().sum::<f64>();
    let total_opening_area = input
        .doors
        .iter()
        .chain(input.windows.iter())
        .map(Opening::area)
        .sum::<f64>();

    WallEstimate {
        total_wall_area,
        total_opening_area,
        final_area: (total_wall_area - total_opening_area).max(0.0),
    }
}

pub struct WallCalculator;

impl Calculator for WallCalculator {
    const KIND: CalculatorKind = CalculatorKind::Wall;
    type Form = WallForm;
    type Input = WallInput;
    type Output = WallEstimate;

    fn validate(form: &WallForm) -> std::result::Result<WallInput, ValidationErrors> {
        form.validate()
    }

    fn compute(input: &WallInput) -> Result<WallEstimate> {
        Ok(compute(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(length: f64) -> WallSegmentForm {
        WallSegmentForm {
            length: Some(length),
        }
    }

    #[test]
    fn test_wall_area_minus_door() {
        let form = WallForm {
            height: Some(8.0),
            walls: vec![wall(12.0), wall(10.0)],
            doors: vec![OpeningForm {
                width: Some(3.0),
                height: Some(6.8),
                quantity: Some(1.0),
            }],
            windows: vec![],
        };
        let estimate = compute(&form.validate().unwrap());

        assert_eq!(estimate.total_wall_area, 176.0);
        assert!((estimate.total_opening_area - 20.4).abs() < 1e-9);
        assert!((estimate.final_area - 155.6).abs() < 1e-9);
    }

    #[test]
    fn test_openings_larger_than_walls_clamp_to_zero() {
        let input = WallInput {
            height: 8.0,
            wall_lengths: vec![2.0],
            doors: vec![],
            windows: vec![Opening {
                width: 4.0,
                height: 3.0,
                quantity: 5,
            }],
        };
        let estimate = compute(&input);

        assert_eq!(estimate.total_opening_area, 60.0);
        assert_eq!(estimate.final_area, 0.0);
        assert!(estimate.final_area.is_sign_positive());
    }

    #[test]
    fn test_openings_default_to_presets() {
        let mut form = WallForm {
            height: Some(8.0),
            walls: vec![wall(12.0)],
            ..Default::default()
        };
        form.add_opening(OpeningKind::Door, OpeningForm::default());
        form.add_opening(
            OpeningKind::Window,
            OpeningForm {
                quantity: Some(2.0),
                ..Default::default()
            },
        );

        let input = form.validate().unwrap();
        assert_eq!(
            input.doors[0],
            Opening {
                width: 3.0,
                height: 6.8,
                quantity: 1
            }
        );
        assert_eq!(input.windows[0].quantity, 2);
        assert_eq!(input.windows[0].area(), 24.0);
    }

    #[test]
    fn test_requires_at_least_one_wall() {
        let form = WallForm {
            height: Some(8.0),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("walls").unwrap().message, "Add at least one wall");
    }

    #[test]
    fn test_reports_indexed_opening_fields() {
        let form = WallForm {
            height: Some(8.0),
            walls: vec![wall(12.0), wall(0.0)],
            doors: vec![],
            windows: vec![
                OpeningForm::default(),
                OpeningForm {
                    quantity: Some(0.0),
                    ..Default::default()
                },
            ],
        };
        let errors = form.validate().unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors.contains_field("walls[1].length"));
        assert_eq!(
            errors.get("windows[1].quantity").unwrap().message,
            "Quantity must be at least 1"
        );
    }
}
