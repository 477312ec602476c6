//! Orientation helpers shared by bond rods and lone-pair markers.

use std::f64::consts::FRAC_PI_2;

use glam::{DMat3, DQuat, DVec3};

/// Nudge applied to a forward axis parallel to `up`.
const PARALLEL_NUDGE: f64 = 0.0001;

/// Rotation that points the local +Z axis along `forward`, keeping local +Y
/// as close to `up` as possible.
///
/// A zero `forward` looks down +Z. When `forward` is parallel to `up`, the
/// forward axis is nudged slightly so the basis stays well defined.
#[must_use]
pub fn look_rotation(forward: DVec3, up: DVec3) -> DQuat {
    let mut z = if forward.length_squared() == 0.0 {
        DVec3::Z
    } else {
        forward.normalize()
    };

    let mut x = up.cross(z);
    if x.length_squared() == 0.0 {
        if up.z.abs() == 1.0 {
            z.x += PARALLEL_NUDGE;
        } else {
            z.z += PARALLEL_NUDGE;
        }
        z = z.normalize();
        x = up.cross(z);
    }

    let x = x.normalize();
    let y = z.cross(x);
    DQuat::from_mat3(&DMat3::from_cols(x, y, z)).normalize()
}

/// Rotation that turns the canonical Y-aligned cylinder (and the marker
/// asset) onto the +Z axis of its parent group.
#[must_use]
pub fn quarter_turn_x() -> DQuat {
    DQuat::from_rotation_x(FRAC_PI_2)
}
