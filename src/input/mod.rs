//! Input handling: event types and the input processor that converts raw
//! key presses and control-panel events into engine commands.

/// Platform-agnostic input events.
pub mod event;
/// Converts raw events into engine commands.
pub mod processor;

pub use event::{InputEvent, PanelEvent};
pub use processor::{InputProcessor, KeyBindings, KeyCommandTag};
