use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Initial camera pose and orbit behavior.
pub struct CameraOptions {
    /// Camera position the rig starts at and returns to on reset.
    #[schemars(skip)]
    pub home_position: [f64; 3],
    /// Orbit target the rig starts at and returns to on reset.
    #[schemars(skip)]
    pub home_target: [f64; 3],
    /// Whether the camera orbits its target on its own.
    #[schemars(title = "Auto Rotate")]
    pub auto_rotate: bool,
    /// Auto-rotation speed; 1.0 is one orbit per minute at 60 fps.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 10.0), extend("step" = 0.1))]
    pub auto_rotate_speed: f64,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            home_position: [10.0, 3.0, 10.0],
            home_target: [0.0, 0.0, 0.0],
            auto_rotate: true,
            auto_rotate_speed: 2.0,
        }
    }
}
