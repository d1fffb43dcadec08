use elevate_interior::calculators::{
    ceiling::CeilingForm,
    curtain::{CurtainForm, Fullness},
    floor::FloorForm,
    paint::PaintForm,
    panel::{PanelForm, PanelUnit},
    pop_ceiling::PopCeilingForm,
    wall::{OpeningForm, WallForm, WallSegmentForm},
};
use elevate_interior::{Estimate, EstimateEngine, EstimateRequest, EstimatorError};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn run(request: EstimateRequest) -> Estimate {
    EstimateEngine::new().run(&request).unwrap()
}

#[test]
fn test_floor_example() {
    let Estimate::Floor(e) = run(EstimateRequest::Floor(FloorForm {
        length: Some(12.0),
        width: Some(10.0),
        wastage: Some(10.0),
    })) else {
        panic!("expected floor estimate");
    };
    assert!(close(e.total_area, 132.0));
}

#[test]
fn test_ceiling_example() {
    let Estimate::Ceiling(e) = run(EstimateRequest::Ceiling(CeilingForm {
        length: Some(12.0),
        width: Some(10.0),
    })) else {
        panic!("expected ceiling estimate");
    };
    assert_eq!(e.total_area, 120.0);
}

#[test]
fn test_wall_example() {
    let Estimate::Wall(e) = run(EstimateRequest::Wall(WallForm {
        height: Some(8.0),
        walls: vec![
            WallSegmentForm { length: Some(12.0) },
            WallSegmentForm { length: Some(10.0) },
        ],
        doors: vec![OpeningForm {
            width: Some(3.0),
            height: Some(6.8),
            quantity: Some(1.0),
        }],
        windows: vec![],
    })) else {
        panic!("expected wall estimate");
    };
    assert_eq!(e.total_wall_area, 176.0);
    assert!(close(e.total_opening_area, 20.4));
    assert!(close(e.final_area, 155.6));
}

#[test]
fn test_wall_never_goes_negative() {
    for quantity in 1..=20 {
        let Estimate::Wall(e) = run(EstimateRequest::Wall(WallForm {
            height: Some(8.0),
            walls: vec![WallSegmentForm { length: Some(3.0) }],
            doors: vec![OpeningForm {
                quantity: Some(f64::from(quantity)),
                ..Default::default()
            }],
            windows: vec![],
        })) else {
            panic!("expected wall estimate");
        };

        if e.total_opening_area > e.total_wall_area {
            assert_eq!(e.final_area, 0.0);
        } else {
            assert!(close(e.final_area, e.total_wall_area - e.total_opening_area));
        }
        assert!(e.final_area >= 0.0);
    }
}

#[test]
fn test_pop_ceiling_example() {
    let Estimate::PopCeiling(e) = run(EstimateRequest::PopCeiling(PopCeilingForm {
        length: Some(5.0),
        width: Some(4.0),
        design_factor: Some(1.0),
        labor_cost_per_sqm: Some(250.0),
        margin_per_sqm: Some(50.0),
        pop_bag_cost: Some(300.0),
        pop_bag_coverage: Some(1.5),
    })) else {
        panic!("expected pop ceiling estimate");
    };
    assert_eq!(e.ceiling_area, 20.0);
    assert_eq!(e.pop_bags_needed, 14);
    assert_eq!(e.total_material_cost, 4200.0);
    assert_eq!(e.total_labor_cost, 5000.0);
    assert_eq!(e.total_margin, 1000.0);
    assert_eq!(e.final_price_estimate, 10200.0);
}

#[test]
fn test_curtain_example() {
    let Estimate::Curtain(e) = run(EstimateRequest::Curtain(CurtainForm {
        window_width: Some(36.0),
        window_height: Some(48.0),
        fullness: Some(Fullness::Full),
        stackback: Some(6.0),
        overlap: Some(3.0),
        above_offset: Some(6.0),
        below_offset: Some(4.0),
    })) else {
        panic!("expected curtain estimate");
    };
    assert_eq!(e.rod_width, 48.0);
    assert_eq!(e.curtain_width, 102.0);
    assert_eq!(e.curtain_height, 58.0);
}

#[test]
fn test_panel_example_and_inch_conversion() {
    let panel = |unit| {
        run(EstimateRequest::Panel(PanelForm {
            total_area: Some(120.0),
            panel_width: Some(4.0),
            panel_height: Some(8.0),
            unit: Some(unit),
        }))
    };

    let Estimate::Panel(feet) = panel(PanelUnit::Feet) else {
        panic!("expected panel estimate");
    };
    let Estimate::Panel(inches) = panel(PanelUnit::Inches) else {
        panic!("expected panel estimate");
    };
    assert_eq!(feet.num_panels, 4);
    assert_ne!(inches.num_panels, feet.num_panels);
}

#[test]
fn test_panel_zero_width_is_rejected() {
    let request = EstimateRequest::Panel(PanelForm {
        total_area: Some(120.0),
        panel_width: Some(0.0),
        panel_height: Some(8.0),
        unit: None,
    });
    let err = EstimateEngine::new().run(&request).unwrap_err();

    // caught by validation before the formula runs
    match err {
        EstimatorError::ValidationError { errors, .. } => {
            assert!(errors.contains_field("panel_width"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_paint_example() {
    let Estimate::Paint(e) = run(EstimateRequest::Paint(PaintForm {
        total_area: Some(450.0),
        coats: Some(2.0),
        coverage: Some(350.0),
    })) else {
        panic!("expected paint estimate");
    };
    assert_eq!(e.gallons, 3);
}

#[test]
fn test_results_are_finite_and_non_negative() {
    let requests = vec![
        EstimateRequest::Floor(FloorForm {
            length: Some(0.1),
            width: Some(0.1),
            wastage: Some(0.0),
        }),
        EstimateRequest::Floor(FloorForm {
            length: Some(250.0),
            width: Some(80.0),
            wastage: Some(100.0),
        }),
        EstimateRequest::PopCeiling(PopCeilingForm {
            length: Some(0.5),
            width: Some(0.5),
            labor_cost_per_sqm: Some(0.0),
            margin_per_sqm: Some(0.0),
            pop_bag_cost: Some(0.0),
            ..Default::default()
        }),
        EstimateRequest::Curtain(CurtainForm {
            window_width: Some(1.0),
            window_height: Some(1.0),
            stackback: Some(0.0),
            overlap: Some(0.0),
            above_offset: Some(0.0),
            below_offset: Some(0.0),
            fullness: Some(Fullness::Standard),
        }),
        EstimateRequest::Panel(PanelForm {
            total_area: Some(1.0),
            panel_width: Some(0.5),
            panel_height: Some(0.5),
            unit: Some(PanelUnit::Inches),
        }),
        EstimateRequest::Paint(PaintForm {
            total_area: Some(1.0),
            coats: Some(1.0),
            coverage: Some(1.0),
        }),
    ];

    for request in requests {
        let estimate = run(request);
        for metric in estimate.metrics() {
            assert!(metric.value.is_finite(), "{} is not finite", metric.key);
            assert!(metric.value >= 0.0, "{} is negative", metric.key);
        }
    }
}

#[test]
fn test_largest_accepted_inputs_stay_finite() {
    let max = 1_000_000.0;
    let requests = vec![
        EstimateRequest::Floor(FloorForm {
            length: Some(max),
            width: Some(max),
            wastage: Some(100.0),
        }),
        EstimateRequest::Wall(WallForm {
            height: Some(max),
            walls: vec![WallSegmentForm { length: Some(max) }; 4],
            doors: vec![OpeningForm {
                width: Some(max),
                height: Some(max),
                quantity: Some(max),
            }],
            windows: vec![],
        }),
        EstimateRequest::PopCeiling(PopCeilingForm {
            length: Some(max),
            width: Some(max),
            design_factor: Some(max),
            labor_cost_per_sqm: Some(max),
            margin_per_sqm: Some(max),
            pop_bag_cost: Some(max),
            pop_bag_coverage: Some(max),
        }),
        EstimateRequest::Paint(PaintForm {
            total_area: Some(max),
            coats: Some(max),
            coverage: Some(1.0),
        }),
    ];

    for request in requests {
        let estimate = run(request);
        for metric in estimate.metrics() {
            assert!(metric.value.is_finite(), "{} is not finite", metric.key);
            assert!(metric.value >= 0.0, "{} is negative", metric.key);
        }
    }
}

#[test]
fn test_huge_dimensions_are_rejected_at_validation() {
    let request = EstimateRequest::Floor(FloorForm {
        length: Some(1e200),
        width: Some(1e200),
        wastage: None,
    });
    match EstimateEngine::new().run(&request).unwrap_err() {
        EstimatorError::ValidationError { errors, .. } => {
            assert_eq!(errors.len(), 2);
            assert_eq!(errors.get("length").unwrap().message, "Value must be at most 1000000");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_counts_that_cannot_be_represented_are_errors() {
    let engine = EstimateEngine::new();
    let cases = [
        (
            EstimateRequest::Panel(PanelForm {
                total_area: Some(120.0),
                panel_width: Some(1e-160),
                panel_height: Some(1e-160),
                unit: Some(PanelUnit::Inches),
            }),
            "panel_width",
        ),
        (
            EstimateRequest::PopCeiling(PopCeilingForm {
                length: Some(5.0),
                width: Some(4.0),
                labor_cost_per_sqm: Some(250.0),
                margin_per_sqm: Some(50.0),
                pop_bag_cost: Some(300.0),
                pop_bag_coverage: Some(1e-300),
                ..Default::default()
            }),
            "pop_bag_coverage",
        ),
    ];

    for (request, expected_field) in cases {
        match engine.run(&request).unwrap_err() {
            EstimatorError::DegenerateInputError { field, .. } => assert_eq!(field, expected_field),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[test]
fn test_identical_requests_give_identical_results() {
    let request = EstimateRequest::Wall(WallForm {
        height: Some(9.0),
        walls: vec![WallSegmentForm { length: Some(14.0) }],
        doors: vec![OpeningForm::default()],
        windows: vec![OpeningForm::default()],
    });
    let engine = EstimateEngine::new();

    let first = engine.run(&request).unwrap();
    let second = engine.run(&request).unwrap();
    assert_eq!(first, second);
}
