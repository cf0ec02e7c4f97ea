use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector3, Zero};

use super::camera_utils::{basis_toward, Viewpoint};
use crate::config::OrbitConfig;
use crate::math::{view_matrix, WORLD_UP};

/// Pitch stays this far short of straight up or down
const PITCH_MARGIN: f32 = 1.0e-3;
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - PITCH_MARGIN;

/// Camera circling a target point.
///
/// The eye is never stored: it is derived from `target`, `distance`, `yaw`
/// and `pitch` on every query, so nothing goes stale when the target moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    target: Vector3<f32>,
    distance: f32,
    /// Radians about the world up axis; zero places the eye on +Z
    yaw: f32,
    /// Radians above the target's horizontal plane
    pitch: f32,
    bounds: OrbitCameraBounds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCameraBounds {
    pub closest: f32,
    pub farthest: f32,
}

impl OrbitCameraBounds {
    /// Inverted limits are swapped, negative ones raised to zero and a NaN
    /// limit collapses onto the other, so `closest <= farthest` always holds.
    pub fn new(closest: f32, farthest: f32) -> Self {
        let (closest, farthest) = if closest > farthest {
            log::warn!(
                "Orbit bounds closest {} > farthest {}, swapping them",
                closest,
                farthest
            );
            (farthest, closest)
        } else {
            (closest, farthest)
        };
        // f32::max returns the non-NaN operand
        let closest = closest.max(0.0);
        Self {
            closest,
            farthest: farthest.max(closest),
        }
    }

    fn clamp(&self, distance: f32) -> f32 {
        if distance.is_nan() {
            return self.closest;
        }
        distance.clamp(self.closest, self.farthest)
    }
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        let config = OrbitConfig::default();
        Self::new(config.closest, config.farthest)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&OrbitConfig::default())
    }
}

impl OrbitCamera {
    pub fn new(target: Vector3<f32>, distance: f32, bounds: OrbitCameraBounds) -> Self {
        Self {
            target,
            distance: bounds.clamp(distance),
            yaw: 0.0,
            pitch: 0.0,
            bounds,
        }
    }

    pub fn from_config(config: &OrbitConfig) -> Self {
        Self::new(
            Vector3::zero(),
            config.distance,
            OrbitCameraBounds::new(config.closest, config.farthest),
        )
    }

    pub fn orbit_point(&self) -> Vector3<f32> {
        self.target
    }

    /// Retarget the orbit; distance and angles are kept
    pub fn set_orbit_point(&mut self, target: Vector3<f32>) {
        if !crate::math::is_finite(target) {
            log::warn!("Ignoring non-finite orbit point {:?}", target);
            return;
        }
        self.target = target;
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = self.bounds.clamp(distance);
    }

    pub fn go_closer(&mut self, amount: f32) {
        self.set_distance(self.distance - amount);
    }

    pub fn go_farther(&mut self, amount: f32) {
        self.set_distance(self.distance + amount);
    }

    pub fn closest_distance(&self) -> f32 {
        self.bounds.closest
    }

    pub fn farthest_distance(&self) -> f32 {
        self.bounds.farthest
    }

    /// Values above the farthest limit are pulled down to it
    pub fn set_closest_distance(&mut self, closest: f32) {
        if !closest.is_finite() {
            log::warn!("Ignoring non-finite closest distance {}", closest);
            return;
        }
        self.bounds.closest = closest.max(0.0).min(self.bounds.farthest);
        self.set_distance(self.distance);
    }

    /// Values below the closest limit are raised to it
    pub fn set_farthest_distance(&mut self, farthest: f32) {
        if farthest.is_nan() {
            log::warn!("Ignoring NaN farthest distance");
            return;
        }
        self.bounds.farthest = farthest.max(self.bounds.closest);
        self.set_distance(self.distance);
    }

    pub fn yaw_angle(&self) -> f32 {
        self.yaw
    }

    pub fn pitch_angle(&self) -> f32 {
        self.pitch
    }

    /// Accumulate rotation about the world up axis through the orbit point
    pub fn yaw(&mut self, delta: f32) {
        if !delta.is_finite() {
            log::warn!("Ignoring non-finite yaw {}", delta);
            return;
        }
        self.yaw = (self.yaw + delta) % std::f32::consts::TAU;
    }

    /// Accumulate elevation, stopping just short of the poles
    pub fn pitch(&mut self, delta: f32) {
        if !delta.is_finite() {
            log::warn!("Ignoring non-finite pitch {}", delta);
            return;
        }
        self.pitch = (self.pitch + delta).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Place the eye at a world point, re-deriving distance and angles
    pub fn set_position(&mut self, position: Vector3<f32>) {
        let offset = position - self.target;
        let length = offset.magnitude();
        if !length.is_finite() || length <= f32::EPSILON {
            log::warn!("Orbit camera position {:?} coincides with its target", position);
            return;
        }
        self.set_distance(length);
        self.pitch = (offset.y / length).clamp(-1.0, 1.0).asin().clamp(-MAX_PITCH, MAX_PITCH);
        // At the poles the horizontal offset vanishes; keep the current yaw
        if offset.x.abs() > f32::EPSILON || offset.z.abs() > f32::EPSILON {
            self.yaw = offset.x.atan2(offset.z);
        }
    }
}

impl Viewpoint for OrbitCamera {
    fn position(&self) -> Vector3<f32> {
        calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target)
    }

    fn dir(&self) -> Vector3<f32> {
        basis_toward(self.position(), self.target, WORLD_UP).0
    }

    fn left(&self) -> Vector3<f32> {
        basis_toward(self.position(), self.target, WORLD_UP).1
    }

    fn up(&self) -> Vector3<f32> {
        basis_toward(self.position(), self.target, WORLD_UP).2
    }

    fn view_matrix(&self) -> Matrix4<f32> {
        view_matrix(self.position(), self.target, WORLD_UP).unwrap_or_else(Matrix4::identity)
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(Vector3::zero(), 200.0, OrbitCameraBounds::new(60.0, 1000.0))
    }

    #[test]
    fn test_default_eye_on_positive_z() {
        let camera = camera();
        assert_abs_diff_eq!((camera.position() - Vector3::new(0.0, 0.0, 200.0)).magnitude(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_set_distance_clamps_to_farthest() {
        let mut camera = camera();
        camera.set_distance(1100.0);
        assert_eq!(camera.distance(), 1000.0);
        camera.set_distance(1100.0);
        assert_eq!(camera.distance(), 1000.0);
    }

    #[test]
    fn test_go_closer_clamps_to_closest() {
        let mut camera = camera();
        camera.go_closer(500.0);
        assert_eq!(camera.distance(), 60.0);
        camera.go_farther(15.0);
        assert_eq!(camera.distance(), 75.0);
    }

    #[test]
    fn test_yaw_quarter_turn() {
        let mut camera = camera();
        camera.yaw(FRAC_PI_2);
        let eye = camera.position();
        assert_abs_diff_eq!(eye.x, 200.0, epsilon = 1e-3);
        assert_abs_diff_eq!(eye.z, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_pitch_is_clamped_short_of_pole() {
        let mut camera = camera();
        camera.pitch(10.0);
        assert!(camera.pitch_angle() < FRAC_PI_2);
        let view = camera.view_matrix();
        assert!(view != Matrix4::identity());
        assert!(crate::math::is_finite(camera.left()));
    }

    #[test]
    fn test_retarget_keeps_offset() {
        let mut camera = camera();
        camera.set_orbit_point(Vector3::new(100.0, 0.0, 0.0));
        assert_abs_diff_eq!((camera.position() - Vector3::new(100.0, 0.0, 200.0)).magnitude(), 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!((camera.dir() - Vector3::new(0.0, 0.0, -1.0)).magnitude(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_set_position_rederives_orbit() {
        let mut camera = camera();
        camera.set_position(Vector3::new(300.0, 0.0, 0.0));
        assert_abs_diff_eq!(camera.distance(), 300.0, epsilon = 1e-4);
        assert_abs_diff_eq!(camera.yaw_angle(), FRAC_PI_2, epsilon = 1e-6);
        assert_abs_diff_eq!((camera.position() - Vector3::new(300.0, 0.0, 0.0)).magnitude(), 0.0, epsilon = 1e-3);

        // straight overhead lands just short of the pole
        camera.set_position(Vector3::new(0.0, 200.0, 0.0));
        assert_abs_diff_eq!(camera.pitch_angle(), MAX_PITCH, epsilon = 1e-6);
    }

    #[test]
    fn test_bound_setters_reclamp_distance() {
        let mut camera = camera();
        camera.set_farthest_distance(150.0);
        assert_eq!(camera.distance(), 150.0);
        camera.set_closest_distance(500.0);
        assert_eq!(camera.closest_distance(), 150.0);
    }

    #[test]
    fn test_inverted_bounds_are_swapped() {
        let bounds = OrbitCameraBounds::new(1000.0, 60.0);
        assert_eq!(bounds.closest, 60.0);
        assert_eq!(bounds.farthest, 1000.0);
    }

    #[test]
    fn test_negative_and_nan_bounds_stay_ordered() {
        let bounds = OrbitCameraBounds::new(-10.0, -5.0);
        assert_eq!(bounds.closest, 0.0);
        assert_eq!(bounds.farthest, 0.0);

        let bounds = OrbitCameraBounds::new(60.0, f32::NAN);
        assert_eq!(bounds.closest, 60.0);
        assert_eq!(bounds.farthest, 60.0);

        let bounds = OrbitCameraBounds::new(f32::NAN, 500.0);
        assert_eq!(bounds.closest, 0.0);
        assert_eq!(bounds.farthest, 500.0);

        let camera = OrbitCamera::new(Vector3::zero(), 200.0, OrbitCameraBounds::new(-10.0, -5.0));
        assert_eq!(camera.distance(), 0.0);
    }
}
