//! Camera rig: camera position, orbit target and turntable auto-rotation.
//!
//! The host reads `camera` and `target` every frame and applies them to its
//! own camera and orbit controls.

use std::f64::consts::TAU;

use glam::{DQuat, DVec3};

use crate::options::CameraOptions;

/// Frames per auto-rotation orbit at speed 1.0.
const FRAMES_PER_ORBIT: f64 = 3600.0;

/// Camera position plus orbit target.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    /// Camera position.
    pub camera: DVec3,
    /// Orbit target.
    pub target: DVec3,
    /// Whether the camera orbits on its own.
    pub auto_rotate: bool,
    /// Orbit speed multiplier.
    pub auto_rotate_speed: f64,
    home_camera: DVec3,
    home_target: DVec3,
    home_auto_rotate: bool,
}

impl CameraRig {
    /// Rig at the configured home pose.
    #[must_use]
    pub fn from_options(options: &CameraOptions) -> Self {
        let camera = DVec3::from_array(options.home_position);
        let target = DVec3::from_array(options.home_target);
        Self {
            camera,
            target,
            auto_rotate: options.auto_rotate,
            auto_rotate_speed: options.auto_rotate_speed,
            home_camera: camera,
            home_target: target,
            home_auto_rotate: options.auto_rotate,
        }
    }

    /// Flip auto-rotation. Returns the new state.
    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.auto_rotate
    }

    /// Set auto-rotation.
    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    /// One frame of turntable rotation: the camera orbits the target about
    /// world Y. No-op when auto-rotation is off.
    pub fn update(&mut self) {
        if !self.auto_rotate {
            return;
        }
        let angle = -TAU / FRAMES_PER_ORBIT * self.auto_rotate_speed;
        let arm = self.camera - self.target;
        self.camera = self.target + DQuat::from_rotation_y(angle) * arm;
    }

    /// Back to the home pose and auto-rotate setting.
    pub fn reset(&mut self) {
        self.camera = self.home_camera;
        self.target = self.home_target;
        self.auto_rotate = self.home_auto_rotate;
    }

    /// Distance from camera to target.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.camera.distance(self.target)
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default())
    }
}
