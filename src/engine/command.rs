//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a
//! control-panel widget or a programmatic call, is represented as a
//! `MolviewCommand`. Consumers construct commands and pass them to
//! [`MolviewEngine::execute`](super::MolviewEngine::execute).

/// A discrete action the engine can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MolviewCommand {
    /// Focus the next model (no-op at the last one).
    NextModel,
    /// Focus the previous model (no-op at the first one).
    PreviousModel,
    /// Focus the model with the given 1-based ordinal.
    SelectModel {
        /// 1-based model ordinal; out-of-range values are ignored.
        ordinal: usize,
    },
    /// Flip turntable auto-rotation.
    ToggleAutoRotate,
    /// Set turntable auto-rotation.
    SetAutoRotate {
        /// New state.
        enabled: bool,
    },
    /// Re-fetch the structure document and rebuild the scene.
    Reload,
    /// Remove every model, label and pending lone pair.
    Clear,
    /// Pause frame updates, then resume with the camera rig reset.
    PauseAndReset,
    /// Stop frame updates for good.
    End,
}
