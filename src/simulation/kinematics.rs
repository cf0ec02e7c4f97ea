//! Velocity integration for scene objects.
//!
//! Linear velocity is in units per millisecond. Angular velocity is a rotation
//! axis scaled by radians per millisecond, applied according to the object's
//! [`Motion`].

use cgmath::{InnerSpace, Rotation};

use crate::gfx::scene::{Motion, SceneObject};
use crate::math::{axis_angle_to_quat, is_finite};

/// Advance one object by `delta` milliseconds. A zero delta changes nothing.
pub fn integrate(object: &mut SceneObject, delta: f32) {
    if delta == 0.0 {
        return;
    }

    if object.linear_velocity.magnitude2() > 0.0 {
        let moved = object.position + object.linear_velocity * delta;
        if is_finite(moved) {
            object.position = moved;
        } else {
            log::warn!("Dropping non-finite step for '{}'", object.name);
        }
    }

    let speed = object.angular_velocity.magnitude();
    if speed == 0.0 || !speed.is_finite() {
        return;
    }
    let rotation = axis_angle_to_quat(object.angular_velocity, speed * delta);

    match object.motion {
        Motion::Spin => object.rotate_world(rotation),
        Motion::Orbit { center } => {
            let moved = center + rotation.rotate_vector(object.position - center);
            if is_finite(moved) {
                object.position = moved;
                object.rotate_world(rotation);
            } else {
                log::warn!("Dropping non-finite orbit step for '{}'", object.name);
            }
        }
    }
}
