//! Shared utilities: frame loop state and FPS smoothing.

/// Pause/resume/end gate and FPS smoothing for the host render loop.
pub mod frame_loop;
