//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns the key-binding map. It is the only thing that
//! sits between raw window/panel events and the engine's
//! [`execute`](crate::engine::MolviewEngine::execute) method.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::event::{InputEvent, PanelEvent};
use crate::engine::MolviewCommand;

/// Maps physical key strings to [`MolviewCommand`] variants.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format:
/// `"ArrowLeft"`, `"Escape"`, `"KeyR"`, etc.
///
/// Only *discrete* commands make sense as key bindings; parameterized
/// commands like `SelectModel` come from the control panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

/// Serializable tag for the subset of [`MolviewCommand`] that can be
/// key-bound (discrete, parameterless actions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Focus the next model.
    NextModel,
    /// Focus the previous model.
    PreviousModel,
    /// Toggle turntable auto-rotation.
    ToggleAutoRotate,
    /// Re-fetch the structure document and rebuild the scene.
    Reload,
    /// Remove everything from the scene.
    Clear,
    /// Pause the loop, then resume with the camera reset.
    PauseAndReset,
}

impl KeyCommandTag {
    /// Convert to the corresponding parameterless [`MolviewCommand`].
    fn to_command(self) -> MolviewCommand {
        match self {
            Self::NextModel => MolviewCommand::NextModel,
            Self::PreviousModel => MolviewCommand::PreviousModel,
            Self::ToggleAutoRotate => MolviewCommand::ToggleAutoRotate,
            Self::Reload => MolviewCommand::Reload,
            Self::Clear => MolviewCommand::Clear,
            Self::PauseAndReset => MolviewCommand::PauseAndReset,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("ArrowRight".into(), KeyCommandTag::NextModel),
            ("ArrowLeft".into(), KeyCommandTag::PreviousModel),
            ("Escape".into(), KeyCommandTag::ToggleAutoRotate),
            ("KeyR".into(), KeyCommandTag::Reload),
            ("Delete".into(), KeyCommandTag::Clear),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<MolviewCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }

    /// Bind `key` to `tag`, replacing any previous binding of that key.
    pub fn bind(&mut self, key: impl Into<String>, tag: KeyCommandTag) {
        let _ = self.bindings.insert(key.into(), tag);
    }

    /// Remove the binding for `key`, if any.
    pub fn unbind(&mut self, key: &str) {
        let _ = self.bindings.remove(key);
    }
}

/// Converts raw key and panel events into [`MolviewCommand`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_key_press("ArrowRight") {
///     engine.execute(cmd)?;
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    /// Key string → command mapping.
    key_bindings: KeyBindings,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self { key_bindings }
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeyBindings {
        &self.key_bindings
    }

    /// Mutable access to the key bindings for reconfiguration.
    pub fn key_bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.key_bindings
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<MolviewCommand> {
        self.key_bindings.lookup(key)
    }

    /// Process a raw input event and return zero or one commands.
    #[must_use]
    pub fn handle_event(&self, event: &InputEvent) -> Option<MolviewCommand> {
        match event {
            InputEvent::KeyPressed { code } => self.handle_key_press(code),
            InputEvent::Panel(panel) => Some(Self::panel_command(*panel)),
        }
    }

    fn panel_command(event: PanelEvent) -> MolviewCommand {
        match event {
            PanelEvent::AutoRotateSwitched { enabled } => {
                MolviewCommand::SetAutoRotate { enabled }
            }
            PanelEvent::ModelSelected { ordinal } => {
                MolviewCommand::SelectModel { ordinal }
            }
            PanelEvent::PauseAndReset => MolviewCommand::PauseAndReset,
            PanelEvent::ClearScene => MolviewCommand::Clear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_navigate_and_escape_toggles() {
        let input = InputProcessor::new();
        assert_eq!(
            input.handle_key_press("ArrowLeft"),
            Some(MolviewCommand::PreviousModel)
        );
        assert_eq!(
            input.handle_event(&InputEvent::KeyPressed {
                code: "Escape".into()
            }),
            Some(MolviewCommand::ToggleAutoRotate)
        );
        assert_eq!(input.handle_key_press("KeyQ"), None);
    }

    #[test]
    fn panel_events_map_directly() {
        let input = InputProcessor::new();
        assert_eq!(
            input.handle_event(&InputEvent::Panel(PanelEvent::ModelSelected {
                ordinal: 3
            })),
            Some(MolviewCommand::SelectModel { ordinal: 3 })
        );
        assert_eq!(
            input.handle_event(&InputEvent::Panel(
                PanelEvent::AutoRotateSwitched { enabled: false }
            )),
            Some(MolviewCommand::SetAutoRotate { enabled: false })
        );
    }

    #[test]
    fn rebinding_replaces_previous_key() {
        let mut input = InputProcessor::new();
        input.key_bindings_mut().unbind("KeyR");
        input
            .key_bindings_mut()
            .bind("F5", KeyCommandTag::Reload);
        assert_eq!(input.handle_key_press("KeyR"), None);
        assert_eq!(
            input.handle_key_press("F5"),
            Some(MolviewCommand::Reload)
        );
    }

    #[test]
    fn bindings_round_trip_through_toml() {
        let mut bindings = KeyBindings::default();
        bindings.bind("KeyP", KeyCommandTag::PauseAndReset);
        let text = toml::to_string(&bindings).unwrap();
        let parsed: KeyBindings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, bindings);
    }
}
