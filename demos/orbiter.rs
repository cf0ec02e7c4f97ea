//! # Orbiter Example
//!
//! An earth with a circling moon and a swarm of short-lived planes flying
//! great circles over its surface. The orbit camera follows whichever body is
//! currently tracked:
//!
//! - `M` tracks the moon
//! - `E` tracks the earth
//! - `S` moves the eye to `(0, 200, 0)`
//!
//! The example runs headless: it feeds a scripted sequence of input events
//! through the scene and logs what it would draw.
//!
//! Run with `cargo run --example orbiter [config.toml]`.

use std::cell::Cell;
use std::rc::Rc;

use canvas3d::prelude::*;

const KEY_E: KeyCode = 69;
const KEY_M: KeyCode = 77;
const KEY_S: KeyCode = 83;

const FRAME_MS: f32 = 1000.0 / 60.0;
const FRAMES: u32 = 1800;

/// Stands in for a GPU backend and reports what each frame contains
struct LogRenderer {
    frames: u64,
}

impl RenderBackend for LogRenderer {
    fn render(
        &mut self,
        objects: &ObjectSet,
        camera: &Camera,
        lights: &[Light],
        _camera_uniform: &canvas3d::gfx::CameraUniform,
    ) {
        self.frames += 1;
        if self.frames % 300 == 0 {
            let planes = objects.iter().filter(|(_, object)| object.is_aging()).count();
            log::info!(
                "frame {}: {} objects ({} planes), eye at {:?}, sun {:?}",
                self.frames,
                objects.size(),
                planes,
                camera.position(),
                lights.first().map(Light::vector)
            );
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        log::info!("Canvas resized to {}x{}", width, height);
    }
}

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::load(path)?,
        None => {
            let mut config = SceneConfig::default();
            config.orbit.closest = 60.0;
            config.orbit.farthest = 1000.0;
            config.orbit.distance = 200.0;
            config.spawn = SpawnPolicy::PerFrame { one_in: 50 };
            config.rng_seed = Some(7);
            config
        }
    };
    canvas3d::init_logging(&config.log_filter);

    let mut app = SceneApp::new(config);
    let scene = app.context_mut();

    // Earth spins slowly in place
    let mut earth = SceneObject::new("earth")
        .with_mesh(generate_sphere(32, 16))
        .with_angular_velocity(Vector3::new(0.0, 1.0 / 20000.0, 0.0));
    earth.set_scale(Vector3::new(50.0, 50.0, 50.0));
    let earth_id = scene.objects.add(earth);

    // Moon circles the origin once every 40000 * 2pi ms
    let mut moon = SceneObject::new("moon")
        .with_mesh(generate_sphere(16, 8))
        .with_position(Vector3::new(0.0, 0.0, 300.0))
        .with_angular_velocity(Vector3::new(0.0, 1.0 / 40000.0, 0.0))
        .with_motion(Motion::Orbit {
            center: Vector3::zero(),
        });
    moon.set_scale(Vector3::new(12.0, 12.0, 12.0));
    let moon_id = scene.objects.add(moon);

    // A few fixed beacons on the surface
    for (i, normal) in [Vector3::unit_x(), -Vector3::unit_x(), Vector3::unit_z()]
        .into_iter()
        .enumerate()
    {
        let mut beacon = SceneObject::new(format!("beacon-{}", i))
            .with_mesh(generate_cube())
            .with_position(normal * 52.0);
        beacon.set_scale(Vector3::new(2.0, 2.0, 2.0));
        scene.objects.add(beacon);
    }

    scene.add_light(
        Light::directional("sun", Vector3::new(0.0, 0.0, 1.0))
            .with_colors([0.1, 0.1, 0.1], [1.0, 0.95, 0.9], [1.0, 1.0, 1.0])
            .with_rotation(Vector3::unit_y(), 1800.0),
    )?;

    app.set_spawner(Box::new(SurfaceSpawner::default()));
    app.enable_orbit_controls(OrbitController::default());
    app.set_renderer(Box::new(LogRenderer { frames: 0 }));

    let tracked = Rc::new(Cell::new(earth_id));

    // Keep the camera centred on the tracked body
    let follow = Rc::clone(&tracked);
    app.set_update_callback(move |scene, _delta| {
        let Some(target) = scene.objects.get(follow.get()).map(|object| object.position) else {
            return;
        };
        if let Some(camera) = scene.camera.as_orbit_mut() {
            camera.set_orbit_point(target);
        }
    });

    let select = Rc::clone(&tracked);
    app.set_keyboard_callbacks(
        |_, _| {},
        move |scene, code| match code {
            KEY_M => {
                log::info!("Tracking the moon");
                select.set(moon_id);
            }
            KEY_E => {
                log::info!("Tracking the earth");
                select.set(earth_id);
            }
            KEY_S => {
                if let Some(camera) = scene.camera.as_orbit_mut() {
                    camera.set_position(Vector3::new(0.0, 200.0, 0.0));
                }
            }
            _ => {}
        },
    );

    app.set_picking_callback(|scene, hits| match hits.first() {
        Some(hit) => {
            let name = scene
                .objects
                .get(hit.id)
                .map(|object| object.name.as_str())
                .unwrap_or("?");
            log::info!("Picked {} {} at distance {:.1} ({} hits)", name, hit.id, hit.distance, hits.len());
        }
        None => log::info!("Nothing under the cursor"),
    })?;

    app.start()?;

    let (width, height) = app.context().canvas_size();
    let centre = (width as f32 / 2.0, height as f32 / 2.0);

    for frame in 0..FRAMES {
        match frame {
            // Click the earth in the middle of the canvas
            120 => {
                app.handle_input(InputEvent::MouseDown {
                    x: centre.0,
                    y: centre.1,
                    buttons: ButtonMask::LEFT,
                });
                app.handle_input(InputEvent::MouseUp {
                    x: centre.0,
                    y: centre.1,
                    buttons: ButtonMask::LEFT,
                });
            }
            // Drag to swing the camera around
            240 => app.handle_input(InputEvent::MouseDown {
                x: centre.0,
                y: centre.1,
                buttons: ButtonMask::LEFT,
            }),
            241..=270 => {
                let step = (frame - 240) as f32;
                app.handle_input(InputEvent::MouseMove {
                    x: centre.0 + step * 4.0,
                    y: centre.1 + step,
                    buttons: ButtonMask::LEFT,
                });
            }
            271 => app.handle_input(InputEvent::MouseUp {
                x: centre.0 + 120.0,
                y: centre.1 + 30.0,
                buttons: ButtonMask::LEFT,
            }),
            300 => app.handle_input(InputEvent::Scroll { delta: -20.0 }),
            600 => app.handle_input(InputEvent::KeyDown(KEY_M)),
            900 => app.handle_input(InputEvent::KeyDown(KEY_S)),
            1200 => app.handle_input(InputEvent::KeyDown(KEY_E)),
            1500 => app.resize(800, 600),
            _ => {}
        }

        if let Some(report) = app.tick(FRAME_MS) {
            if !report.expired.is_empty() {
                log::debug!("{} planes landed", report.expired.len());
            }
        }
    }

    let stats = app.stats();
    log::info!(
        "Ran {} frames over {:.1} s at {:.1} fps, {} objects alive",
        stats.frame_count,
        stats.elapsed_ms / 1000.0,
        stats.fps(),
        app.context().objects.size()
    );
    app.stop();

    Ok(())
}
