use crate::calculators::{
    CeilingCalculator, CurtainCalculator, FloorCalculator, PaintCalculator, PanelCalculator,
    PopCeilingCalculator, WallCalculator,
};
use crate::core::{Calculator, Estimate, EstimateRequest};
use crate::utils::error::{EstimatorError, Result};

/// Runs requests through validate -> compute. Holds no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimateEngine;

impl EstimateEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn estimate<C: Calculator>(&self, form: &C::Form) -> Result<C::Output> {
        let calculator = C::KIND;

        tracing::debug!("🔍 Validating {} form", calculator);
        let input = C::validate(form).map_err(|errors| {
            tracing::warn!(
                "❌ {} form rejected: {} invalid field(s)",
                calculator,
                errors.len()
            );
            EstimatorError::validation(calculator.as_str(), errors)
        })?;

        tracing::debug!("🧮 Computing {} estimate", calculator);
        let output = C::compute(&input).inspect_err(|e| {
            tracing::warn!("❌ {} estimate failed: {}", calculator, e);
        })?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            if let Ok(json) = serde_json::to_string(&output) {
                tracing::debug!("✅ {} estimate: {}", calculator, json);
            }
        }
        Ok(output)
    }

    pub fn run(&self, request: &EstimateRequest) -> Result<Estimate> {
        let estimate = match request {
            EstimateRequest::Floor(form) => Estimate::Floor(self.estimate::<FloorCalculator>(form)?),
            EstimateRequest::Wall(form) => Estimate::Wall(self.estimate::<WallCalculator>(form)?),
            EstimateRequest::Ceiling(form) => {
                Estimate::Ceiling(self.estimate::<CeilingCalculator>(form)?)
            }
            EstimateRequest::PopCeiling(form) => {
                Estimate::PopCeiling(self.estimate::<PopCeilingCalculator>(form)?)
            }
            EstimateRequest::Curtain(form) => {
                Estimate::Curtain(self.estimate::<CurtainCalculator>(form)?)
            }
            EstimateRequest::Panel(form) => Estimate::Panel(self.estimate::<PanelCalculator>(form)?),
            EstimateRequest::Paint(form) => Estimate::Paint(self.estimate::<PaintCalculator>(form)?),
        };
        tracing::info!("✅ {} estimate completed", estimate.kind().title());
        Ok(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::floor::FloorForm;
    use crate::calculators::panel::{PanelForm, PanelUnit};

    #[test]
    fn test_validation_errors_are_wrapped_with_calculator_name() {
        let engine = EstimateEngine::new();
        let err = engine
            .run(&EstimateRequest::Floor(FloorForm::default()))
            .unwrap_err();

        match err {
            EstimatorError::ValidationError { calculator, errors } => {
                assert_eq!(calculator, "floor");
                assert_eq!(errors.len(), 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_degenerate_panel_area_surfaces_from_compute() {
        let engine = EstimateEngine::new();
        let request = EstimateRequest::Panel(PanelForm {
            total_area: Some(100.0),
            panel_width: Some(1e-200),
            panel_height: Some(1e-200),
            unit: Some(PanelUnit::Feet),
        });

        let err = engine.run(&request).unwrap_err();
        assert!(matches!(err, EstimatorError::DegenerateInputError { .. }));
    }

    #[test]
    fn test_same_request_gives_same_estimate() {
        let engine = EstimateEngine::new();
        let request = EstimateRequest::Floor(FloorForm {
            length: Some(12.0),
            width: Some(10.0),
            wastage: Some(10.0),
        });

        let first = engine.run(&request).unwrap();
        let second = engine.run(&request).unwrap();
        assert_eq!(first, second);
    }
}
