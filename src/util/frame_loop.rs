//! Host render-loop gate and frame-rate smoothing.
//!
//! [`FrameLoop`] decides whether each frame runs, is skipped during a timed
//! pause, or is refused after the loop ends, and keeps an exponential
//! moving average of frames per second for the control panel.

use web_time::{Duration, Instant};

/// Run state of the host render loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Frames run normally.
    Running,
    /// Frames are skipped until `resume_at`.
    Paused {
        /// When the loop resumes.
        resume_at: Instant,
    },
    /// The loop was ended; no more frames run.
    Ended,
}

/// What the current frame should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameGate {
    /// Run the frame.
    Run,
    /// The pause just elapsed; run the frame after resetting.
    Resumed,
    /// Still paused; skip the frame.
    Paused,
    /// Ended; skip the frame.
    Ended,
}

/// Pause/end state plus smoothed FPS for the frame-driven engine.
#[derive(Debug, Clone)]
pub struct FrameLoop {
    state: LoopState,
    /// Last frame timestamp
    last_frame: Option<Instant>,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameLoop {
    /// A running loop.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: LoopState::Running,
            last_frame: None,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Current run state.
    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Pause until `now + delay`. Ignored once ended.
    pub fn pause(&mut self, now: Instant, delay: Duration) {
        if self.state != LoopState::Ended {
            self.state = LoopState::Paused {
                resume_at: now + delay,
            };
        }
    }

    /// End the loop for good.
    pub fn end(&mut self) {
        self.state = LoopState::Ended;
    }

    /// Decide what the frame at `now` does, resuming an elapsed pause.
    pub fn gate(&mut self, now: Instant) -> FrameGate {
        match self.state {
            LoopState::Running => FrameGate::Run,
            LoopState::Ended => FrameGate::Ended,
            LoopState::Paused { resume_at } if now >= resume_at => {
                self.state = LoopState::Running;
                FrameGate::Resumed
            }
            LoopState::Paused { .. } => FrameGate::Paused,
        }
    }

    /// Record a rendered frame at `now` and update the FPS average.
    pub fn end_frame(&mut self, now: Instant) {
        if let Some(last) = self.last_frame.replace(now) {
            let frame_time = now.saturating_duration_since(last).as_secs_f32();
            if frame_time > 0.0 {
                let instant_fps = 1.0 / frame_time;
                self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                    + instant_fps * self.smoothing;
            }
        }
    }

    /// Smoothed FPS.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}
