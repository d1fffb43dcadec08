use crate::calculators::{
    ceiling::{CeilingEstimate, CeilingForm},
    curtain::{CurtainEstimate, CurtainForm},
    floor::{FloorEstimate, FloorForm},
    paint::{PaintEstimate, PaintForm},
    panel::{PanelEstimate, PanelForm},
    pop_ceiling::{PopCeilingEstimate, PopCeilingForm},
    wall::{WallEstimate, WallForm},
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    Floor,
    Wall,
    Ceiling,
    PopCeiling,
    Curtain,
    Panel,
    Paint,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 7] = [
        CalculatorKind::Floor,
        CalculatorKind::Wall,
        CalculatorKind::Ceiling,
        CalculatorKind::PopCeiling,
        CalculatorKind::Curtain,
        CalculatorKind::Panel,
        CalculatorKind::Paint,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CalculatorKind::Floor => "floor",
            CalculatorKind::Wall => "wall",
            CalculatorKind::Ceiling => "ceiling",
            CalculatorKind::PopCeiling => "pop_ceiling",
            CalculatorKind::Curtain => "curtain",
            CalculatorKind::Panel => "panel",
            CalculatorKind::Paint => "paint",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            CalculatorKind::Floor => "Flooring",
            CalculatorKind::Wall => "Walls",
            CalculatorKind::Ceiling => "Ceiling",
            CalculatorKind::PopCeiling => "POP Ceiling",
            CalculatorKind::Curtain => "Curtains",
            CalculatorKind::Panel => "Panels",
            CalculatorKind::Paint => "Paint",
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一次計算請求：計算器種類 + 尚未驗證的表單
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum EstimateRequest {
    Floor(FloorForm),
    Wall(WallForm),
    Ceiling(CeilingForm),
    PopCeiling(PopCeilingForm),
    Curtain(CurtainForm),
    Panel(PanelForm),
    Paint(PaintForm),
}

impl EstimateRequest {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            EstimateRequest::Floor(_) => CalculatorKind::Floor,
            EstimateRequest::Wall(_) => CalculatorKind::Wall,
            EstimateRequest::Ceiling(_) => CalculatorKind::Ceiling,
            EstimateRequest::PopCeiling(_) => CalculatorKind::PopCeiling,
            EstimateRequest::Curtain(_) => CalculatorKind::Curtain,
            EstimateRequest::Panel(_) => CalculatorKind::Panel,
            EstimateRequest::Paint(_) => CalculatorKind::Paint,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum Estimate {
    Floor(FloorEstimate),
    Wall(WallEstimate),
    Ceiling(CeilingEstimate),
    PopCeiling(PopCeilingEstimate),
    Curtain(CurtainEstimate),
    Panel(PanelEstimate),
    Paint(PaintEstimate),
}

/// One displayable line of an estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub key: &'static str,
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
    #[serde(skip)]
    pub precision: usize,
}

impl Metric {
    fn new(key: &'static str, label: &'static str, value: f64, unit: &'static str, precision: usize) -> Self {
        Self {
            key,
            label,
            value,
            unit,
            precision,
        }
    }

    fn count(key: &'static str, label: &'static str, value: u64, unit: &'static str) -> Self {
        Self::new(key, label, value as f64, unit, 0)
    }

    pub fn formatted_value(&self) -> String {
        format!("{:.*}", self.precision, self.value)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}: {}", self.label, self.formatted_value())
        } else {
            write!(f, "{}: {} {}", self.label, self.formatted_value(), self.unit)
        }
    }
}

impl Estimate {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            Estimate::Floor(_) => CalculatorKind::Floor,
            Estimate::Wall(_) => CalculatorKind::Wall,
            Estimate::Ceiling(_) => CalculatorKind::Ceiling,
            Estimate::PopCeiling(_) => CalculatorKind::PopCeiling,
            Estimate::Curtain(_) => CalculatorKind::Curtain,
            Estimate::Panel(_) => CalculatorKind::Panel,
            Estimate::Paint(_) => CalculatorKind::Paint,
        }
    }

    /// 依畫面顯示精度列出結果：面積與金額兩位小數、窗簾一位、數量取整
    pub fn metrics(&self) -> Vec<Metric> {
        match self {
            Estimate::Floor(e) => vec![Metric::new("totalArea", "Total Area", e.total_area, "sq ft", 2)],
            Estimate::Ceiling(e) => {
                vec![Metric::new("totalArea", "Total Area", e.total_area, "sq ft", 2)]
            }
            Estimate::Wall(e) => vec![
                Metric::new("finalArea", "Paintable Area", e.final_area, "sq ft", 2),
                Metric::new("totalWallArea", "Total Wall Area", e.total_wall_area, "sq ft", 2),
                Metric::new("totalOpeningArea", "Openings", e.total_opening_area, "sq ft", 2),
            ],
            Estimate::PopCeiling(e) => vec![
                Metric::new("finalPriceEstimate", "Final Price Estimate", e.final_price_estimate, "", 2),
                Metric::new("ceilingArea", "Ceiling Area", e.ceiling_area, "m²", 2),
                Metric::count("popBagsNeeded", "POP Bags Needed", e.pop_bags_needed, "bags"),
                Metric::new("totalMaterialCost", "Material Cost", e.total_material_cost, "", 2),
                Metric::new("totalLaborCost", "Labor Cost", e.total_labor_cost, "", 2),
                Metric::new("totalMargin", "Margin", e.total_margin, "", 2),
            ],
            Estimate::Curtain(e) => vec![
                Metric::new("rodWidth", "Rod Width", e.rod_width, "in", 1),
                Metric::new("curtainWidth", "Curtain Width", e.curtain_width, "in", 1),
                Metric::new("curtainHeight", "Curtain Height", e.curtain_height, "in", 1),
            ],
            Estimate::Panel(e) => vec![Metric::count("numPanels", "Panels Needed", e.num_panels, "panels")],
            Estimate::Paint(e) => vec![Metric::count("gallons", "Paint Needed", e.gallons, "gallons")],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_tag_round_trips_through_json() {
        let json = r#"{"calculator":"pop_ceiling","length":5.0,"width":4.0}"#;
        let request: EstimateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.kind(), CalculatorKind::PopCeiling);
    }

    #[test]
    fn test_estimate_serializes_with_camel_case_fields() {
        let estimate = Estimate::Wall(WallEstimate {
            total_wall_area: 176.0,
            total_opening_area: 20.0,
            final_area: 156.0,
        });
        let value = serde_json::to_value(&estimate).unwrap();

        assert_eq!(value["calculator"], "wall");
        assert_eq!(value["finalArea"], 156.0);
        assert_eq!(value["totalOpeningArea"], 20.0);
    }

    #[test]
    fn test_metric_display_precision() {
        let floor = Estimate::Floor(FloorEstimate { total_area: 132.0 });
        assert_eq!(floor.metrics()[0].to_string(), "Total Area: 132.00 sq ft");

        let paint = Estimate::Paint(PaintEstimate { gallons: 3 });
        assert_eq!(paint.metrics()[0].to_string(), "Paint Needed: 3 gallons");

        let curtain = Estimate::Curtain(CurtainEstimate {
            rod_width: 48.0,
            curtain_width: 102.0,
            curtain_height: 58.0,
        });
        assert_eq!(curtain.metrics()[1].formatted_value(), "102.0");
    }

    #[test]
    fn test_kind_names() {
        let names: Vec<&str> = CalculatorKind::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            ["floor", "wall", "ceiling", "pop_ceiling", "curtain", "panel", "paint"]
        );
    }
}
