use glam::DVec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where successive models are placed in the scene.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum Placement {
    /// Model `i` sits at `(spacing * i, spacing * i, 0)`.
    Diagonal {
        /// Grid step between neighboring models.
        spacing: f64,
    },
    /// Every model shares the origin.
    Shared,
}

impl Placement {
    /// Local-root offset of the model at 0-based document index `index`.
    #[must_use]
    pub fn offset(self, index: usize) -> DVec3 {
        match self {
            Self::Diagonal { spacing } => {
                let step = spacing * index as f64;
                DVec3::new(step, step, 0.0)
            }
            Self::Shared => DVec3::ZERO,
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::Diagonal { spacing: 15.0 }
    }
}
