//! Camera state driven by the engine: the rig the host mirrors each frame,
//! and the easing focus controller that moves it between models.

/// Incremental easing toward a focus destination.
pub mod focus;
/// Camera position, orbit target and auto-rotation.
pub mod rig;

pub use focus::{
    ease_step, FocusController, FocusParams, FocusState, FocusStatus,
    FocusStep, FocusToken,
};
pub use rig::CameraRig;
