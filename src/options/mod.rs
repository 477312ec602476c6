//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (model placement, focus easing, camera rig,
//! primitive geometry, asset timing, keybindings) are consolidated here.
//! Options serialize to/from TOML so hosts can keep presets on disk.

mod assets;
mod camera;
mod focus;
mod geometry;
mod placement;

use std::path::Path;

pub use assets::AssetOptions;
pub use camera::CameraOptions;
pub use focus::FocusOptions;
pub use geometry::{GeometryOptions, TripleBondLayout};
pub use placement::Placement;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::MolviewError;
use crate::input::KeyBindings;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[focus]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Model placement rule.
    pub placement: Placement,
    /// Camera focus easing.
    pub focus: FocusOptions,
    /// Camera rig pose and auto-rotation.
    pub camera: CameraOptions,
    /// Primitive dimensions.
    pub geometry: GeometryOptions,
    /// Asset and pause timing.
    #[schemars(skip)]
    pub assets: AssetOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeyBindings,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// [`MolviewError::OptionsParse`] when the text is not valid TOML for
    /// these options or fails [`validate`](Self::validate).
    pub fn from_toml(text: &str) -> Result<Self, MolviewError> {
        let options: Self = toml::from_str(text)
            .map_err(|e| MolviewError::OptionsParse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// [`MolviewError::OptionsParse`] for out-of-range focus settings.
    pub fn validate(&self) -> Result<(), MolviewError> {
        self.focus.validate()
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// I/O failures and TOML parse failures.
    pub fn load(path: &Path) -> Result<Self, MolviewError> {
        let content = std::fs::read_to_string(path).map_err(MolviewError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// I/O failures and TOML serialization failures.
    pub fn save(&self, path: &Path) -> Result<(), MolviewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MolviewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MolviewError::Io)?;
        }
        std::fs::write(path, content).map_err(MolviewError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
