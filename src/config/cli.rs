use crate::calculators::{
    ceiling::CeilingForm,
    curtain::{CurtainForm, Fullness},
    floor::FloorForm,
    paint::PaintForm,
    panel::{PanelForm, PanelUnit},
    pop_ceiling::PopCeilingForm,
    wall::{OpeningForm, OpeningKind, WallForm, WallSegmentForm},
};
use crate::core::EstimateRequest;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "elevate", version)]
#[command(about = "Quickly estimate materials for your next home project")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Print the estimate as JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: EstimateCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum EstimateCommand {
    /// Flooring area including cutting wastage (sq ft)
    Floor(FloorArgs),
    /// Paintable wall area after doors and windows (sq ft)
    Wall(WallArgs),
    /// Flat ceiling area (sq ft)
    Ceiling(CeilingArgs),
    /// Plaster of Paris ceiling cost estimate (meters)
    PopCeiling(PopCeilingArgs),
    /// Curtain and rod sizing (inches)
    Curtain(CurtainArgs),
    /// Number of panels to cover an area
    Panel(PanelArgs),
    /// Paint containers needed for an area
    Paint(PaintArgs),
}

#[derive(Debug, Clone, Args)]
#[command(allow_negative_numbers = true)]
pub struct FloorArgs {
    #[arg(long, help = "Room length (ft)")]
    pub length: Option<f64>,
    #[arg(long, help = "Room width (ft)")]
    pub width: Option<f64>,
    #[arg(long, help = "Wastage percentage [default: 10]")]
    pub wastage: Option<f64>,
}

#[derive(Debug, Clone, Args)]
#[command(allow_negative_numbers = true)]
pub struct CeilingArgs {
    #[arg(long, help = "Ceiling length (ft)")]
    pub length: Option<f64>,
    #[arg(long, help = "Ceiling width (ft)")]
    pub width: Option<f64>,
}

#[derive(Debug, Clone, Args)]
#[command(allow_negative_numbers = true)]
pub struct WallArgs {
    #[arg(long, help = "Wall height (ft)")]
    pub height: Option<f64>,

    #[arg(long = "wall", value_name = "LENGTH", help = "Wall length (ft), repeat for each wall")]
    pub walls: Vec<f64>,

    #[arg(
        long = "door",
        value_name = "WxH[xQTY]",
        value_parser = parse_opening,
        help = "Door size, e.g. 3x6.8 or 3x6.8x2"
    )]
    pub doors: Vec<OpeningForm>,

    #[arg(
        long = "window",
        value_name = "WxH[xQTY]",
        value_parser = parse_opening,
        help = "Window size, e.g. 4x3 or 4x3x2"
    )]
    pub windows: Vec<OpeningForm>,

    #[arg(long, default_value_t = 0, help = "Number of standard 3x6.8 doors")]
    pub standard_doors: u32,

    #[arg(long, default_value_t = 0, help = "Number of standard 4x3 windows")]
    pub standard_windows: u32,
}

#[derive(Debug, Clone, Args)]
#[command(allow_negative_numbers = true)]
pub struct PopCeilingArgs {
    #[arg(long, help = "Ceiling length (m)")]
    pub length: Option<f64>,
    #[arg(long, help = "Ceiling width (m)")]
    pub width: Option<f64>,
    #[arg(long, help = "Design factor, 1 for a flat ceiling [default: 1]")]
    pub design_factor: Option<f64>,
    #[arg(long, help = "Labor cost per m²")]
    pub labor_cost_per_sqm: Option<f64>,
    #[arg(long, help = "Margin per m²")]
    pub margin_per_sqm: Option<f64>,
    #[arg(long, help = "Cost per POP bag")]
    pub pop_bag_cost: Option<f64>,
    #[arg(long, help = "Area covered by one bag (m²) [default: 1.5]")]
    pub pop_bag_coverage: Option<f64>,
}

#[derive(Debug, Clone, Args)]
#[command(allow_negative_numbers = true)]
pub struct CurtainArgs {
    #[arg(long, help = "Window width (in)")]
    pub window_width: Option<f64>,
    #[arg(long, help = "Window height (in)")]
    pub window_height: Option<f64>,
    #[arg(long, value_enum, help = "Fullness ratio [default: 2.0]")]
    pub fullness: Option<Fullness>,
    #[arg(long, help = "Stackback per side (in) [default: 6]")]
    pub stackback: Option<f64>,
    #[arg(long, help = "Center overlap (in) [default: 3]")]
    pub overlap: Option<f64>,
    #[arg(long, help = "Rod height above the window (in) [default: 6]")]
    pub above_offset: Option<f64>,
    #[arg(long, help = "Curtain length below the window (in) [default: 4]")]
    pub below_offset: Option<f64>,
}

#[derive(Debug, Clone, Args)]
#[command(allow_negative_numbers = true)]
pub struct PanelArgs {
    #[arg(long, help = "Area to cover (sq ft)")]
    pub total_area: Option<f64>,
    #[arg(long, help = "Panel width")]
    pub panel_width: Option<f64>,
    #[arg(long, help = "Panel height")]
    pub panel_height: Option<f64>,
    #[arg(long, value_enum, help = "Unit of the panel dimensions [default: ft]")]
    pub unit: Option<PanelUnit>,
}

#[derive(Debug, Clone, Args)]
#[command(allow_negative_numbers = true)]
pub struct PaintArgs {
    #[arg(long, help = "Area to paint (sq ft)")]
    pub total_area: Option<f64>,
    #[arg(long, help = "Number of coats [default: 2]")]
    pub coats: Option<f64>,
    #[arg(long, help = "Coverage per gallon (sq ft) [default: 350]")]
    pub coverage: Option<f64>,
}

/// 解析 `寬x高[x數量]` 格式的門窗尺寸
pub fn parse_opening(s: &str) -> Result<OpeningForm, String> {
    let parts: Vec<&str> = s.split(['x', 'X']).map(str::trim).collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(format!("expected WIDTHxHEIGHT[xQTY], got '{}'", s));
    }

    let number = |part: &str| {
        part.parse::<f64>()
            .map_err(|_| format!("'{}' is not a number", part))
    };

    Ok(OpeningForm {
        width: Some(number(parts[0])?),
        height: Some(number(parts[1])?),
        quantity: parts.get(2).map(|q| number(*q)).transpose()?,
    })
}

impl From<WallArgs> for WallForm {
    fn from(args: WallArgs) -> Self {
        let mut form = WallForm {
            height: args.height,
            walls: args
                .walls
                .into_iter()
                .map(|length| WallSegmentForm {
                    length: Some(length),
                })
                .collect(),
            doors: args.doors,
            windows: args.windows,
        };

        let presets = [
            (OpeningKind::Door, args.standard_doors),
            (OpeningKind::Window, args.standard_windows),
        ];
        for (kind, count) in presets {
            if count > 0 {
                form.add_opening(
                    kind,
                    OpeningForm {
                        quantity: Some(f64::from(count)),
                        ..Default::default()
                    },
                );
            }
        }
        form
    }
}

impl From<EstimateCommand> for EstimateRequest {
    fn from(command: EstimateCommand) -> Self {
        match command {
            EstimateCommand::Floor(a) => EstimateRequest::Floor(FloorForm {
                length: a.length,
                width: a.width,
                wastage: a.wastage,
            }),
            EstimateCommand::Wall(a) => EstimateRequest::Wall(a.into()),
            EstimateCommand::Ceiling(a) => EstimateRequest::Ceiling(CeilingForm {
                length: a.length,
                width: a.width,
            }),
            EstimateCommand::PopCeiling(a) => EstimateRequest::PopCeiling(PopCeilingForm {
                length: a.length,
                width: a.width,
                design_factor: a.design_factor,
                labor_cost_per_sqm: a.labor_cost_per_sqm,
                margin_per_sqm: a.margin_per_sqm,
                pop_bag_cost: a.pop_bag_cost,
                pop_bag_coverage: a.pop_bag_coverage,
            }),
            EstimateCommand::Curtain(a) => EstimateRequest::Curtain(CurtainForm {
                window_width: a.window_width,
                window_height: a.window_height,
                fullness: a.fullness,
                stackback: a.stackback,
                overlap: a.overlap,
                above_offset: a.above_offset,
                below_offset: a.below_offset,
            }),
            EstimateCommand::Panel(a) => EstimateRequest::Panel(PanelForm {
                total_area: a.total_area,
                panel_width: a.panel_width,
                panel_height: a.panel_height,
                unit: a.unit,
            }),
            EstimateCommand::Paint(a) => EstimateRequest::Paint(PaintForm {
                total_area: a.total_area,
                coats: a.coats,
                coverage: a.coverage,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CalculatorKind;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("elevate").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_opening() {
        let door = parse_opening("3x6.8").unwrap();
        assert_eq!(door.width, Some(3.0));
        assert_eq!(door.height, Some(6.8));
        assert_eq!(door.quantity, None);

        assert_eq!(parse_opening("4X3x2").unwrap().quantity, Some(2.0));
        assert!(parse_opening("4").is_err());
        assert!(parse_opening("4xwide").is_err());
    }

    #[test]
    fn test_wall_command_builds_form() {
        let config = parse(&[
            "wall",
            "--height",
            "8",
            "--wall",
            "12",
            "--wall",
            "10",
            "--door",
            "3x6.8",
            "--standard-windows",
            "2",
        ]);

        let request = EstimateRequest::from(config.command);
        let EstimateRequest::Wall(form) = request else {
            panic!("expected a wall request");
        };
        assert_eq!(form.walls.len(), 2);
        assert_eq!(form.doors.len(), 1);
        assert_eq!(form.windows[0].quantity, Some(2.0));
        assert_eq!(form.windows[0].width, None);
    }

    #[test]
    fn test_curtain_fullness_and_global_flags() {
        let config = parse(&[
            "curtain",
            "--window-width",
            "36",
            "--window-height",
            "48",
            "--fullness",
            "2.5",
            "--json",
        ]);
        assert!(config.json);

        let request = EstimateRequest::from(config.command);
        assert_eq!(request.kind(), CalculatorKind::Curtain);
        let EstimateRequest::Curtain(form) = request else {
            panic!("expected a curtain request");
        };
        assert_eq!(form.fullness, Some(Fullness::ExtraFull));
    }

    #[test]
    fn test_negative_values_reach_validation() {
        let config = parse(&["floor", "--length", "-5", "--width", "10"]);
        let EstimateRequest::Floor(form) = EstimateRequest::from(config.command) else {
            panic!("expected a floor request");
        };
        assert_eq!(form.length, Some(-5.0));
    }

    #[test]
    fn test_panel_unit_value() {
        let config = parse(&["panel", "--total-area", "120", "--panel-width", "48", "--panel-height", "96", "--unit", "in"]);
        let EstimateRequest::Panel(form) = EstimateRequest::from(config.command) else {
            panic!("expected a panel request");
        };
        assert_eq!(form.unit, Some(PanelUnit::Inches));
    }
}
