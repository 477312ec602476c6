//! Incremental camera focus.
//!
//! Each frame moves the orbit target and the camera a fixed fraction of the
//! remaining distance toward a destination, axis by axis, until both are
//! within tolerance. [`ease_step`] is the pure transition;
//! [`FocusController`] adds the single live request and its cancellation
//! token.

use glam::DVec3;

use super::rig::CameraRig;
use crate::options::FocusOptions;

/// Easing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusParams {
    /// Fraction divisor: each step covers `1 / divisor` of the gap.
    pub divisor: f64,
    /// Per-axis tolerance for the orbit target.
    pub target_tolerance: f64,
    /// Per-axis tolerance for the camera.
    pub camera_tolerance: f64,
    /// Camera destination relative to the focus destination.
    pub camera_offset: DVec3,
}

impl From<&FocusOptions> for FocusParams {
    fn from(options: &FocusOptions) -> Self {
        Self {
            divisor: options.divisor,
            target_tolerance: options.target_tolerance,
            camera_tolerance: options.camera_tolerance,
            camera_offset: DVec3::from_array(options.camera_offset),
        }
    }
}

impl Default for FocusParams {
    fn default() -> Self {
        Self::from(&FocusOptions::default())
    }
}

/// The two positions a focus moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusState {
    /// Camera position.
    pub camera: DVec3,
    /// Orbit target.
    pub target: DVec3,
}

/// Outcome of one easing step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusStep {
    /// Still outside tolerance.
    Continue(FocusState),
    /// Both positions settled.
    Done(FocusState),
}

impl FocusStep {
    /// The positions after the step.
    #[must_use]
    pub fn state(self) -> FocusState {
        match self {
            Self::Continue(state) | Self::Done(state) => state,
        }
    }

    /// Whether the focus settled.
    #[must_use]
    pub fn is_done(self) -> bool {
        matches!(self, Self::Done(_))
    }
}

/// Move each axis of `from` toward `to` unless it is already within
/// `tolerance`. Returns the new position and whether every axis settled.
///
/// A non-finite gap never counts as settled and leaves its axis alone.
fn ease_axes(from: DVec3, to: DVec3, divisor: f64, tolerance: f64) -> (DVec3, bool) {
    let mut out = from.to_array();
    let goal = to.to_array();
    let mut settled = true;
    for (v, dest) in out.iter_mut().zip(goal) {
        let gap = dest - *v;
        if !gap.is_finite() {
            settled = false;
        } else if gap.abs() > tolerance {
            *v += gap / divisor;
            settled = false;
        }
    }
    (DVec3::from_array(out), settled)
}

/// One frame of easing from `state` toward `destination`.
///
/// Each target axis outside `target_tolerance` moves `1 / divisor` of its
/// gap; each camera axis likewise toward `destination + camera_offset`
/// with `camera_tolerance`. Done once every axis of both is within
/// tolerance.
#[must_use]
pub fn ease_step(
    state: FocusState,
    destination: DVec3,
    params: &FocusParams,
) -> FocusStep {
    let (target, target_settled) = ease_axes(
        state.target,
        destination,
        params.divisor,
        params.target_tolerance,
    );
    let (camera, camera_settled) = ease_axes(
        state.camera,
        destination + params.camera_offset,
        params.divisor,
        params.camera_tolerance,
    );
    let next = FocusState { camera, target };
    if target_settled && camera_settled {
        FocusStep::Done(next)
    } else {
        FocusStep::Continue(next)
    }
}

/// Identifies one focus request. Only the latest is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FocusToken(u64);

/// Result of driving the controller for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusStatus {
    /// No focus in flight.
    Idle,
    /// The rig moved and the focus continues next frame.
    Moving,
    /// The focus settled this frame.
    Arrived,
    /// The token was superseded; the rig was not touched.
    Cancelled,
}

#[derive(Debug, Clone, Copy)]
struct ActiveFocus {
    token: FocusToken,
    destination: DVec3,
}

/// Holds at most one live focus request.
#[derive(Debug, Clone, Default)]
pub struct FocusController {
    params: FocusParams,
    next_token: u64,
    active: Option<ActiveFocus>,
}

impl FocusController {
    /// Controller with the given easing parameters.
    #[must_use]
    pub fn new(params: FocusParams) -> Self {
        Self {
            params,
            next_token: 0,
            active: None,
        }
    }

    /// Easing parameters.
    #[must_use]
    pub fn params(&self) -> &FocusParams {
        &self.params
    }

    /// Replace the easing parameters. An in-flight focus keeps going with
    /// the new values.
    pub fn set_params(&mut self, params: FocusParams) {
        self.params = params;
    }

    /// Start focusing `destination`, superseding any in-flight request.
    pub fn request(&mut self, destination: DVec3) -> FocusToken {
        self.next_token += 1;
        let token = FocusToken(self.next_token);
        if let Some(previous) = self.active.replace(ActiveFocus {
            token,
            destination,
        }) {
            log::debug!("focus {:?} superseded by {token:?}", previous.token);
        }
        token
    }

    /// Step the request identified by `token`.
    pub fn step(&mut self, token: FocusToken, rig: &mut CameraRig) -> FocusStatus {
        let Some(active) = self.active.filter(|a| a.token == token) else {
            return FocusStatus::Cancelled;
        };
        let state = FocusState {
            camera: rig.camera,
            target: rig.target,
        };
        let step = ease_step(state, active.destination, &self.params);
        let next = step.state();
        rig.camera = next.camera;
        rig.target = next.target;
        if step.is_done() {
            self.active = None;
            FocusStatus::Arrived
        } else {
            FocusStatus::Moving
        }
    }

    /// Step the live request, if any.
    pub fn tick(&mut self, rig: &mut CameraRig) -> FocusStatus {
        match self.active {
            Some(active) => self.step(active.token, rig),
            None => FocusStatus::Idle,
        }
    }

    /// Drop the live request.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Whether a request is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Destination of the live request.
    #[must_use]
    pub fn destination(&self) -> Option<DVec3> {
        self.active.map(|a| a.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps_to_converge(start: FocusState, destination: DVec3) -> usize {
        let params = FocusParams::default();
        let mut state = start;
        for n in 1..=1000 {
            match ease_step(state, destination, &params) {
                FocusStep::Done(_) => return n,
                FocusStep::Continue(next) => state = next,
            }
        }
        panic!("focus did not converge");
    }

    #[test]
    fn converges_within_tolerance() {
        let params = FocusParams::default();
        let destination = DVec3::new(15.0, 15.0, 0.0);
        let mut state = FocusState {
            camera: DVec3::new(10.0, 3.0, 10.0),
            target: DVec3::ZERO,
        };
        let mut steps = 0;
        loop {
            steps += 1;
            match ease_step(state, destination, &params) {
                FocusStep::Continue(next) => state = next,
                FocusStep::Done(last) => {
                    state = last;
                    break;
                }
            }
        }
        assert!(steps < 200, "took {steps} steps");
        for axis in 0..3 {
            assert!((state.target[axis] - destination[axis]).abs() <= 1e-4);
            assert!((state.camera[axis] - destination[axis]).abs() <= 0.1);
        }
    }

    #[test]
    fn closer_starts_take_no_more_steps() {
        let destination = DVec3::splat(15.0);
        let far = steps_to_converge(
            FocusState {
                camera: DVec3::splat(-30.0),
                target: DVec3::splat(-30.0),
            },
            destination,
        );
        let near = steps_to_converge(
            FocusState {
                camera: DVec3::splat(10.0),
                target: DVec3::splat(10.0),
            },
            destination,
        );
        assert!(near <= far, "near {near} > far {far}");
    }

    #[test]
    fn settled_axes_do_not_move() {
        let params = FocusParams::default();
        let state = FocusState {
            camera: DVec3::new(0.05, 5.0, 0.0),
            target: DVec3::new(0.0, 5.0, 0.0),
        };
        let next = ease_step(state, DVec3::ZERO, &params).state();
        assert_eq!(next.camera.x, 0.05);
        assert_eq!(next.target.x, 0.0);
        assert!((next.target.y - 4.5).abs() < 1e-12);
    }

    #[test]
    fn non_finite_positions_never_settle() {
        let params = FocusParams::default();
        let state = FocusState {
            camera: DVec3::new(f64::NAN, 0.0, 0.0),
            target: DVec3::new(0.0, f64::INFINITY, 0.0),
        };
        let step = ease_step(state, DVec3::ZERO, &params);
        assert!(!step.is_done());
        let next = step.state();
        assert!(next.camera.x.is_nan());
        assert_eq!(next.target.y, f64::INFINITY);
    }

    #[test]
    fn camera_offset_shifts_camera_destination() {
        let params = FocusParams {
            camera_offset: DVec3::new(0.0, 0.0, 5.0),
            ..FocusParams::default()
        };
        let mut state = FocusState {
            camera: DVec3::ZERO,
            target: DVec3::ZERO,
        };
        let destination = DVec3::splat(3.0);
        for _ in 0..500 {
            match ease_step(state, destination, &params) {
                FocusStep::Continue(next) => state = next,
                FocusStep::Done(last) => {
                    state = last;
                    break;
                }
            }
        }
        assert!((state.camera - DVec3::new(3.0, 3.0, 8.0)).length() < 0.2);
    }

    #[test]
    fn new_request_cancels_the_old_one() {
        let mut controller = FocusController::default();
        let mut rig = CameraRig::default();
        let first = controller.request(DVec3::splat(15.0));
        assert_eq!(controller.step(first, &mut rig), FocusStatus::Moving);

        let second = controller.request(DVec3::new(30.0, 30.0, 0.0));
        let before = rig.clone();
        assert_eq!(controller.step(first, &mut rig), FocusStatus::Cancelled);
        assert_eq!(rig, before);

        let mut status = FocusStatus::Moving;
        for _ in 0..1000 {
            status = controller.step(second, &mut rig);
            if status == FocusStatus::Arrived {
                break;
            }
        }
        assert_eq!(status, FocusStatus::Arrived);
        assert!((rig.target - DVec3::new(30.0, 30.0, 0.0)).length() < 1e-3);
        assert!(!controller.is_active());
        assert_eq!(controller.tick(&mut rig), FocusStatus::Idle);
    }

    #[test]
    fn cancel_stops_ticking() {
        let mut controller = FocusController::default();
        let mut rig = CameraRig::default();
        let token = controller.request(DVec3::splat(15.0));
        controller.cancel();
        assert_eq!(controller.tick(&mut rig), FocusStatus::Idle);
        assert_eq!(controller.step(token, &mut rig), FocusStatus::Cancelled);
        assert_eq!(controller.destination(), None);
    }
}
