/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`MolviewCommand`](crate::engine::MolviewCommand)
/// values.
///
/// # Example
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(&InputEvent::KeyPressed {
///     code: "ArrowRight".into(),
/// }) {
///     engine.execute(cmd)?;
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key went down (including OS auto-repeat).
    KeyPressed {
        /// Physical key in `winit::keyboard::KeyCode` debug format, e.g.
        /// `"ArrowLeft"`.
        code: String,
    },
    /// The control panel changed a value or fired an action.
    Panel(PanelEvent),
}

/// Events raised by the host's control panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// The auto-rotate switch was flipped.
    AutoRotateSwitched {
        /// New switch state.
        enabled: bool,
    },
    /// A model was picked in the 1-based model selector.
    ModelSelected {
        /// Chosen model ordinal.
        ordinal: usize,
    },
    /// "Troubleshoot": pause the render loop, then resume with a reset rig.
    PauseAndReset,
    /// Remove everything from the scene.
    ClearScene,
}
