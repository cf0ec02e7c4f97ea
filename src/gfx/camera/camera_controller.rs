use super::orbit_camera::OrbitCamera;
use crate::input::{ButtonMask, InputEvent};

/// Drag-to-orbit and scroll-to-zoom for an [`OrbitCamera`].
///
/// Drag deltas are measured in normalized canvas units (-1 to 1 across the
/// canvas), so a full-width drag yaws by `2 * rotate_speed` radians.
pub struct OrbitController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    is_dragging: bool,
    last_position: (f32, f32),
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(0.7, 3.0)
    }
}

impl OrbitController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            is_dragging: false,
            last_position: (0.0, 0.0),
        }
    }

    /// Applies `event` to `camera`; returns true if the camera moved
    pub fn process_event(
        &mut self,
        event: &InputEvent,
        camera: &mut OrbitCamera,
        canvas: (u32, u32),
    ) -> bool {
        match *event {
            InputEvent::MouseDown { x, y, buttons } if buttons.contains(ButtonMask::LEFT) => {
                if let Some(position) = normalized(x, y, canvas) {
                    self.is_dragging = true;
                    self.last_position = position;
                }
                false
            }
            InputEvent::MouseUp { buttons, .. } if buttons.contains(ButtonMask::LEFT) => {
                self.is_dragging = false;
                false
            }
            InputEvent::MouseMove { x, y, .. } if self.is_dragging => {
                let Some((nx, ny)) = normalized(x, y, canvas) else {
                    return false;
                };
                let delta_x = nx - self.last_position.0;
                let delta_y = ny - self.last_position.1;
                self.last_position = (nx, ny);

                camera.yaw(-delta_x * self.rotate_speed);
                camera.pitch(delta_y * self.rotate_speed);
                true
            }
            InputEvent::Scroll { delta } => {
                // Positive deltas scroll toward the user
                camera.go_farther(delta * self.zoom_speed);
                true
            }
            _ => false,
        }
    }

    /// Returns true while the left button is held
    pub fn is_rotating(&self) -> bool {
        self.is_dragging
    }
}

fn normalized(x: f32, y: f32, (width, height): (u32, u32)) -> Option<(f32, f32)> {
    if width == 0 || height == 0 {
        log::debug!("Ignoring pointer input on a zero-sized canvas");
        return None;
    }
    Some((
        2.0 * x / width as f32 - 1.0,
        2.0 * y / height as f32 - 1.0,
    ))
}
