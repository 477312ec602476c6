use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Assets", inline)]
#[serde(default)]
/// Timing for asynchronously delivered assets and loop pauses.
pub struct AssetOptions {
    /// How long lone pairs wait for the marker asset before giving up.
    #[schemars(skip)]
    pub marker_timeout_ms: u64,
    /// How long the render loop stays paused on a pause-and-reset.
    #[schemars(skip)]
    pub pause_delay_ms: u64,
}

impl AssetOptions {
    /// Marker timeout as a [`Duration`].
    #[must_use]
    pub fn marker_timeout(&self) -> Duration {
        Duration::from_millis(self.marker_timeout_ms)
    }

    /// Pause delay as a [`Duration`].
    #[must_use]
    pub fn pause_delay(&self) -> Duration {
        Duration::from_millis(self.pause_delay_ms)
    }
}

impl Default for AssetOptions {
    fn default() -> Self {
        Self {
            marker_timeout_ms: 5000,
            pause_delay_ms: 1000,
        }
    }
}
