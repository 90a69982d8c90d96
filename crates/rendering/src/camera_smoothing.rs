//! Orbit damping via exponential interpolation.
//!
//! Input systems steer the `FloorCamera` target; each frame
//! `smooth_orbit_to_target` moves the live orbit toward it:
//!
//!   `value += (target - value) * (1 - exp(-speed * dt))`
//!
//! The default speed matches a 5% per-frame step at 60 fps, so motion keeps
//! gliding briefly after the pointer is released.

use bevy::prelude::*;

use crate::camera::{FloorCamera, OrbitState};

#[derive(Resource, Debug, Clone)]
pub struct OrbitDamping {
    /// Higher is snappier.
    pub speed: f32,
    /// Below this difference a component snaps to its target.
    pub epsilon: f32,
}

impl Default for OrbitDamping {
    fn default() -> Self {
        Self {
            speed: -(1.0_f32 - 0.05).ln() * 60.0,
            epsilon: 0.0005,
        }
    }
}

#[inline]
pub(crate) fn exp_lerp_factor(speed: f32, dt: f32) -> f32 {
    1.0 - (-speed * dt).exp()
}

fn approach_scalar(value: &mut f32, target: f32, factor: f32, eps: f32) -> bool {
    let delta = target - *value;
    if delta.abs() > eps {
        *value += delta * factor;
        true
    } else if delta != 0.0 {
        *value = target;
        true
    } else {
        false
    }
}

/// Move `orbit` one step toward `target`. Returns whether anything moved.
pub fn approach(orbit: &mut OrbitState, target: &OrbitState, factor: f32, eps: f32) -> bool {
    let mut moved = false;

    let focus_delta = target.focus - orbit.focus;
    if focus_delta.length_squared() > eps * eps {
        orbit.focus += focus_delta * factor;
        moved = true;
    } else if focus_delta != Vec3::ZERO {
        orbit.focus = target.focus;
        moved = true;
    }

    moved |= approach_scalar(&mut orbit.distance, target.distance, factor, eps);
    moved |= approach_scalar(&mut orbit.yaw, target.yaw, factor, eps);
    moved |= approach_scalar(&mut orbit.pitch, target.pitch, factor, eps);
    moved
}

/// Only marks `FloorCamera` changed when the orbit actually moved, so an idle
/// camera doesn't rewrite its transform every frame.
pub fn smooth_orbit_to_target(
    time: Res<Time>,
    damping: Res<OrbitDamping>,
    mut camera: ResMut<FloorCamera>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    let factor = exp_lerp_factor(damping.speed, dt);
    let (orbit, target) = camera.bypass_change_detection().orbit_and_target_mut();
    let target = *target;
    if approach(orbit, &target, factor, damping.epsilon) {
        camera.set_changed();
    }
}
