//! Per-frame scene update.
//!
//! Every tick runs, in order:
//!
//! 1. light animation
//! 2. kinematic integration of every live object
//! 3. aging and expiry of aging particles
//! 4. stochastic spawning
//! 5. the user update callback
//!
//! and then refreshes the camera uniform. All time-scaled steps are skipped
//! for a zero delta.

use super::kinematics::integrate;
use super::spawner::{SpawnClock, SpawnPolicy, Spawner};
use crate::gfx::scene::{ObjectId, SceneContext};

/// Frame counters and a once-per-second FPS estimate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub frame_count: u64,
    /// Total elapsed milliseconds
    pub elapsed_ms: f64,
    fps: f32,
    window_ms: f32,
    window_frames: u32,
}

impl FrameStats {
    pub fn record(&mut self, delta: f32) {
        self.frame_count += 1;
        self.elapsed_ms += f64::from(delta);
        self.window_ms += delta;
        self.window_frames += 1;

        if self.window_ms >= 1000.0 {
            self.fps = self.window_frames as f32 * 1000.0 / self.window_ms;
            self.window_ms = 0.0;
            self.window_frames = 0;
        }
    }

    /// Frames per second over the last full second, zero until one has passed
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// What changed in the object set during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub expired: Vec<ObjectId>,
    pub spawned: Vec<ObjectId>,
}

/// Drives one scene forward a frame at a time
pub struct FrameScheduler {
    spawn_clock: SpawnClock,
    spawner: Option<Box<dyn Spawner>>,
    stats: FrameStats,
}

impl FrameScheduler {
    pub fn new(policy: SpawnPolicy) -> Self {
        Self {
            spawn_clock: SpawnClock::new(policy),
            spawner: None,
            stats: FrameStats::default(),
        }
    }

    pub fn set_spawner(&mut self, spawner: Box<dyn Spawner>) {
        log::debug!("Spawner '{}' attached", spawner.name());
        self.spawner = Some(spawner);
    }

    pub fn clear_spawner(&mut self) {
        self.spawner = None;
    }

    pub fn set_spawn_policy(&mut self, policy: SpawnPolicy) {
        self.spawn_clock.set_policy(policy);
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Run steps 1-4 and the camera refresh without a user callback
    pub fn step(&mut self, scene: &mut SceneContext, delta: f32) -> FrameReport {
        self.tick(scene, delta, |_, _| {})
    }

    /// Run a full frame, calling `on_update` as the last step
    pub fn tick<F>(&mut self, scene: &mut SceneContext, delta: f32, on_update: F) -> FrameReport
    where
        F: FnOnce(&mut SceneContext, f32),
    {
        let delta = if delta.is_finite() && delta >= 0.0 {
            delta
        } else {
            log::warn!("Frame delta {} is not a non-negative number, using 0", delta);
            0.0
        };
        let mut report = FrameReport::default();

        if delta > 0.0 {
            for light in scene.lights_mut() {
                light.animate(delta);
            }

            for (_, object) in scene.objects.iter_mut() {
                integrate(object, delta);
            }

            report.expired = scene.objects.sweep(|_, object| !object.advance_age(delta));

            if let Some(spawner) = self.spawner.as_mut() {
                let due = self.spawn_clock.due(delta, &mut scene.rng);
                for _ in 0..due {
                    if let Some(object) = spawner.spawn(&mut scene.rng) {
                        report.spawned.push(scene.objects.add(object));
                    }
                }
            }
        }

        on_update(scene, delta);

        scene.refresh_camera_uniform();
        self.stats.record(delta);
        log::trace!(
            "Frame {}: {} objects, {} expired, {} spawned",
            self.stats.frame_count,
            scene.objects.size(),
            report.expired.len(),
            report.spawned.len()
        );
        report
    }
}
