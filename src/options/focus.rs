use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::MolviewError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Focus", inline)]
#[serde(default)]
/// Camera focus easing parameters.
pub struct FocusOptions {
    /// Each frame moves `1 / divisor` of the remaining distance.
    #[schemars(title = "Easing Divisor", range(min = 1.5, max = 60.0), extend("step" = 0.5))]
    pub divisor: f64,
    /// Per-axis settle tolerance for the orbit target.
    #[schemars(skip)]
    pub target_tolerance: f64,
    /// Per-axis settle tolerance for the camera position.
    #[schemars(skip)]
    pub camera_tolerance: f64,
    /// Camera destination relative to the focus destination.
    #[schemars(skip)]
    pub camera_offset: [f64; 3],
}

impl Default for FocusOptions {
    fn default() -> Self {
        Self {
            divisor: 10.0,
            target_tolerance: 0.0001,
            camera_tolerance: 0.1,
            camera_offset: [0.0; 3],
        }
    }
}

impl FocusOptions {
    /// Reject settings under which a focus would diverge or never settle:
    /// the divisor must be at least 1 and both tolerances finite and
    /// positive.
    ///
    /// # Errors
    ///
    /// [`MolviewError::OptionsParse`] naming the offending field.
    pub fn validate(&self) -> Result<(), MolviewError> {
        let divisor_ok = self.divisor.is_finite() && self.divisor >= 1.0;
        if !divisor_ok {
            return Err(MolviewError::OptionsParse(format!(
                "focus.divisor must be a finite number >= 1, got {}",
                self.divisor
            )));
        }
        for (name, tolerance) in [
            ("target_tolerance", self.target_tolerance),
            ("camera_tolerance", self.camera_tolerance),
        ] {
            let tolerance_ok = tolerance.is_finite() && tolerance > 0.0;
            if !tolerance_ok {
                return Err(MolviewError::OptionsParse(format!(
                    "focus.{name} must be finite and > 0, got {tolerance}"
                )));
            }
        }
        if !self.camera_offset.into_iter().all(f64::is_finite) {
            return Err(MolviewError::OptionsParse(
                "focus.camera_offset must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}
